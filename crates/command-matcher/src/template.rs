//! Command template compilation.
//!
//! Catalog authors write templates as literal Slovene text with `<name>`
//! slots, e.g. `"Nastavi temperaturo na <temperature> stopinj"`. Compiling
//! produces the fixed text used for fuzzy scoring and an anchored pattern
//! used for slot extraction.

use crate::error::TemplateError;
use regex::Regex;
use std::sync::OnceLock;

fn slot_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(\w+)>").expect("Invalid regex pattern - this is a bug"))
}

/// A catalog command compiled for matching.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    /// The human-authored template, also the catalog key.
    pub template: String,
    /// Slot names in order of appearance.
    pub slot_names: Vec<String>,
    /// Template text with slots removed, lower-cased, whitespace
    /// normalized. Used only for similarity scoring.
    pub fixed_text: String,
    pattern: Regex,
}

impl CommandTemplate {
    /// Compile a template string.
    ///
    /// Literal text is escaped, single spaces match any whitespace run and
    /// each `<name>` becomes a named non-greedy capture of word characters,
    /// Slovene letters and spaces. Fails only when the synthesized pattern
    /// is invalid, which takes a malformed template such as a repeated
    /// slot name.
    pub fn compile(template: &str) -> Result<Self, TemplateError> {
        let slot_names: Vec<String> = slot_regex()
            .captures_iter(template)
            .map(|c| c[1].to_string())
            .collect();

        let without_slots = slot_regex().replace_all(template, "");
        let fixed_text = without_slots
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let mut pat = regex::escape(&template.to_lowercase()).replace(' ', r"\s+");
        for name in &slot_names {
            let placeholder = regex::escape(&format!("<{name}>"));
            let group = format!(r"(?P<{name}>[\wčšž\s]+?)");
            pat = pat.replace(&placeholder, &group);
        }

        let pattern = Regex::new(&format!("(?i)^{pat}$")).map_err(|err| TemplateError {
            template: template.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            template: template.to_string(),
            slot_names,
            fixed_text,
            pattern,
        })
    }

    /// Run the extraction pattern against normalized utterance text.
    pub fn captures<'t>(&self, text: &'t str) -> Option<regex::Captures<'t>> {
        self.pattern.captures(text)
    }
}
