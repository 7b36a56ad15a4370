//! Utterance recognition against a compiled template catalog.

use crate::error::{MatchError, TemplateError};
use crate::normalize::normalize;
use crate::numerals::parse_number;
use crate::similarity::{PartialRatio, Similarity};
use crate::template::CommandTemplate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Minimum fixed-text similarity for a template to win.
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Degree-unit words stripped from slot text before numeral parsing,
/// longest suffix first.
const UNIT_SUFFIXES: &[&str] = &["stopinje", "stopinjo", "stopinja", "stopinj"];

/// A slot value resolved from an utterance: a parsed numeral, or the raw
/// captured text when no integer could be derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Number(i64),
    Text(String),
}

impl SlotValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            SlotValue::Number(n) => Some(*n),
            SlotValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Number(_) => None,
            SlotValue::Text(t) => Some(t),
        }
    }
}

/// The result of recognizing one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedAction {
    /// The winning template's original string, the catalog key the
    /// dispatcher resolves.
    pub action_id: String,
    /// Slot name to resolved value.
    pub parameters: HashMap<String, SlotValue>,
}

/// Matches normalized utterances against a compiled catalog.
///
/// The catalog is compiled once at construction and never mutated, so a
/// matcher is safe to share across concurrent recognitions.
pub struct CommandMatcher {
    templates: Vec<CommandTemplate>,
    scorer: Box<dyn Similarity>,
}

impl CommandMatcher {
    /// Compile a catalog of template strings with the default
    /// partial-ratio scorer.
    pub fn new<I, S>(catalog: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_scorer(catalog, Box::new(PartialRatio))
    }

    /// Compile a catalog with a caller-provided similarity scorer.
    pub fn with_scorer<I, S>(catalog: I, scorer: Box<dyn Similarity>) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let templates = catalog
            .into_iter()
            .map(|t| CommandTemplate::compile(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { templates, scorer })
    }

    /// Number of compiled templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Recognize an utterance with [`DEFAULT_THRESHOLD`].
    pub fn recognize(&self, utterance: &str) -> Result<RecognizedAction, MatchError> {
        self.recognize_with_threshold(utterance, DEFAULT_THRESHOLD)
    }

    /// Recognize an utterance: normalize, pick the best-scoring template
    /// by fixed text, then extract and resolve its slots.
    pub fn recognize_with_threshold(
        &self,
        utterance: &str,
        threshold: u8,
    ) -> Result<RecognizedAction, MatchError> {
        if self.templates.is_empty() {
            return Err(MatchError::EmptyCatalog);
        }

        let clean = normalize(utterance);

        // Distinct fixed texts; on a collision the later catalog entry
        // wins, so authors must keep fixed texts unique.
        let mut by_fixed: HashMap<&str, &CommandTemplate> = HashMap::new();
        for tpl in &self.templates {
            if let Some(earlier) = by_fixed.insert(tpl.fixed_text.as_str(), tpl) {
                warn!(
                    fixed_text = %tpl.fixed_text,
                    earlier = %earlier.template,
                    later = %tpl.template,
                    "fixed-text collision, later template wins"
                );
            }
        }

        // Scored in catalog order for deterministic tie-breaking.
        let mut best: Option<(&CommandTemplate, u8)> = None;
        for tpl in &self.templates {
            let owns_fixed = by_fixed
                .get(tpl.fixed_text.as_str())
                .map_or(false, |winner| std::ptr::eq(*winner, tpl));
            if !owns_fixed {
                continue;
            }
            let score = self.scorer.score(&clean, &tpl.fixed_text);
            debug!(template = %tpl.template, score, "scored candidate");
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((tpl, score));
            }
        }

        let Some((winner, best_score)) = best else {
            return Err(MatchError::EmptyCatalog);
        };

        if best_score < threshold {
            debug!(%clean, best_score, "no template above threshold");
            return Err(MatchError::NoMatch {
                utterance: utterance.to_string(),
                best_score,
            });
        }

        let mut parameters = HashMap::new();
        if let Some(caps) = winner.captures(&clean) {
            for name in &winner.slot_names {
                if let Some(m) = caps.name(name) {
                    let raw = m.as_str().trim();
                    parameters.insert(name.clone(), resolve_slot(raw));
                }
            }
        } else {
            // Fixed text was close enough but the slot content broke the
            // pattern anchors. Approximate the slot text instead; every
            // declared slot gets the same value, which is only meaningful
            // for single-slot templates.
            let approximated = approximate_slot_text(&clean, &winner.fixed_text);
            debug!(
                template = %winner.template,
                slot_text = %approximated,
                "pattern mismatch, approximating slot content"
            );
            for name in &winner.slot_names {
                parameters.insert(name.clone(), resolve_slot(&approximated));
            }
        }

        Ok(RecognizedAction {
            action_id: winner.template.clone(),
            parameters,
        })
    }
}

/// Resolve captured slot text: strip a trailing degree-unit word, parse as
/// a spoken numeral, fall back to the raw text.
fn resolve_slot(raw: &str) -> SlotValue {
    let mut numeric = raw;
    for suffix in UNIT_SUFFIXES {
        if let Some(stripped) = numeric.strip_suffix(suffix) {
            numeric = stripped.trim_end();
            break;
        }
    }
    match parse_number(numeric) {
        Ok(n) => SlotValue::Number(n),
        Err(_) => SlotValue::Text(raw.to_string()),
    }
}

/// Approximate slot content when the winning pattern does not match:
/// remove the literal fixed text from the utterance, or fall back to the
/// last whitespace-delimited token.
fn approximate_slot_text(clean: &str, fixed_text: &str) -> String {
    if !fixed_text.is_empty() {
        let stripped = clean.replacen(fixed_text, "", 1);
        let stripped = stripped.trim();
        if !stripped.is_empty() && stripped != clean {
            return stripped.to_string();
        }
    }
    clean
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SET_TEMP: &str = "Nastavi temperaturo na <temperature> stopinj";

    #[test]
    fn recognizes_template_and_parses_slot() {
        let matcher = CommandMatcher::new([SET_TEMP]).expect("compiles");
        let action = matcher
            .recognize("nastavi temperaturo na petnajst stopinj")
            .expect("recognized");
        assert_eq!(action.action_id, SET_TEMP);
        assert_eq!(
            action.parameters.get("temperature"),
            Some(&SlotValue::Number(15))
        );
    }

    #[test]
    fn tolerates_fillers_and_punctuation() {
        let matcher = CommandMatcher::new([SET_TEMP]).expect("compiles");
        let action = matcher
            .recognize("Hej, prosim nastavi temperaturo na 22 stopinj!")
            .expect("recognized");
        assert_eq!(
            action.parameters.get("temperature"),
            Some(&SlotValue::Number(22))
        );
    }

    #[test]
    fn unrelated_utterance_is_no_match() {
        let matcher = CommandMatcher::new([SET_TEMP]).expect("compiles");
        let err = matcher
            .recognize("povej mi vic o zajcih")
            .expect_err("must not match");
        match err {
            MatchError::NoMatch {
                utterance,
                best_score,
            } => {
                assert_eq!(utterance, "povej mi vic o zajcih");
                assert!(best_score < DEFAULT_THRESHOLD);
            }
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_catalog_always_fails() {
        let matcher = CommandMatcher::new(Vec::<String>::new()).expect("compiles");
        for utterance in ["vklopi sistem", ""] {
            assert_eq!(
                matcher.recognize(utterance),
                Err(MatchError::EmptyCatalog)
            );
        }
    }

    #[test]
    fn zero_slot_template_has_empty_parameters() {
        let matcher = CommandMatcher::new(["Vklopi sistem"]).expect("compiles");
        let action = matcher.recognize("vklopi sistem").expect("recognized");
        assert_eq!(action.action_id, "Vklopi sistem");
        assert!(action.parameters.is_empty());
    }

    #[test]
    fn two_slot_template_fills_both_slots() {
        let matcher = CommandMatcher::new(["Nastavi krog <loop> na <temperature> stopinj"])
            .expect("compiles");
        // two slots leave little fixed text to score against, so allow a
        // lower acceptance bound than the interactive default
        let action = matcher
            .recognize_with_threshold("nastavi krog dva na dvajset stopinj", 50)
            .expect("recognized");
        assert_eq!(action.parameters.len(), 2);
        assert_eq!(action.parameters.get("loop"), Some(&SlotValue::Number(2)));
        assert_eq!(
            action.parameters.get("temperature"),
            Some(&SlotValue::Number(20))
        );
    }

    #[test]
    fn unparseable_slot_text_stays_raw() {
        let matcher =
            CommandMatcher::new(["Nastavi režim na <mode> način"]).expect("compiles");
        let action = matcher
            .recognize("nastavi režim na eco način")
            .expect("recognized");
        assert_eq!(
            action.parameters.get("mode"),
            Some(&SlotValue::Text("eco".to_string()))
        );
    }

    #[test]
    fn strips_degree_suffix_before_parsing() {
        assert_eq!(resolve_slot("petnajst stopinj"), SlotValue::Number(15));
        assert_eq!(resolve_slot("22 stopinj"), SlotValue::Number(22));
        assert_eq!(resolve_slot("tri stopinje"), SlotValue::Number(3));
    }

    #[test]
    fn later_template_wins_fixed_text_collision() {
        // same fixed text, different slot name
        let matcher = CommandMatcher::new([
            "Nastavi temperaturo na <a> stopinj",
            "Nastavi temperaturo na <b> stopinj",
        ])
        .expect("compiles");
        let action = matcher
            .recognize("nastavi temperaturo na pet stopinj")
            .expect("recognized");
        assert_eq!(action.action_id, "Nastavi temperaturo na <b> stopinj");
        assert_eq!(action.parameters.get("b"), Some(&SlotValue::Number(5)));
    }

    #[test]
    fn pattern_mismatch_falls_back_to_approximated_slot() {
        // slot content after the final literal breaks the anchors, but the
        // fixed text is still present verbatim and scores 100
        let matcher = CommandMatcher::new([SET_TEMP]).expect("compiles");
        let action = matcher
            .recognize("nastavi temperaturo na stopinj petnajst")
            .expect("recognized");
        assert_eq!(action.action_id, SET_TEMP);
        let value = action.parameters.get("temperature").expect("slot present");
        assert_eq!(value, &SlotValue::Number(15));
    }

    #[test]
    fn approximate_slot_text_removes_fixed_text() {
        assert_eq!(
            approximate_slot_text("vklopi sistem takoj", "vklopi sistem"),
            "takoj"
        );
        // nothing removed: fall back to the last token
        assert_eq!(
            approximate_slot_text("nastavi nekaj drugega", "vklopi sistem"),
            "drugega"
        );
        // removal leaves nothing: fall back to the last token
        assert_eq!(
            approximate_slot_text("vklopi sistem", "vklopi sistem"),
            "sistem"
        );
    }
}
