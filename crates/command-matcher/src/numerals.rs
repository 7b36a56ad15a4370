//! Spoken Slovene numerals.
//!
//! `parse_number` resolves word sequences like "petindvajset" or
//! "dvajset in tri" into integers, with fuzzy fallbacks for ASR typos.

use crate::error::NumberParseError;
use crate::normalize::transliterate;
use crate::similarity::{PartialRatio, Similarity};
use regex::Regex;
use std::sync::OnceLock;

/// Unit words 0-19 as authored, before transliteration.
const RAW_UNIT_WORDS: &[(&str, i64)] = &[
    ("nič", 0),
    ("ena", 1),
    ("dva", 2),
    ("tri", 3),
    ("štiri", 4),
    ("pet", 5),
    ("šest", 6),
    ("sedem", 7),
    ("osem", 8),
    ("devet", 9),
    ("deset", 10),
    ("enajst", 11),
    ("dvanajst", 12),
    ("trinajst", 13),
    ("štirinajst", 14),
    ("petnajst", 15),
    ("šestnajst", 16),
    ("sedemnajst", 17),
    ("osemnajst", 18),
    ("devetnajst", 19),
];

/// Tens words 20-90 as authored, before transliteration.
const RAW_TENS_WORDS: &[(&str, i64)] = &[
    ("dvajset", 20),
    ("trideset", 30),
    ("štirideset", 40),
    ("petdeset", 50),
    ("šestdeset", 60),
    ("sedemdeset", 70),
    ("osemdeset", 80),
    ("devetdeset", 90),
];

/// Minimum fuzzy score for the typo fallback.
const FUZZY_ACCEPT: u8 = 80;

fn unit_words() -> &'static [(String, i64)] {
    static TABLE: OnceLock<Vec<(String, i64)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        RAW_UNIT_WORDS
            .iter()
            .map(|&(word, value)| (transliterate(word), value))
            .collect()
    })
}

fn tens_words() -> &'static [(String, i64)] {
    static TABLE: OnceLock<Vec<(String, i64)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        RAW_TENS_WORDS
            .iter()
            .map(|&(word, value)| (transliterate(word), value))
            .collect()
    })
}

fn vocabulary() -> impl Iterator<Item = &'static (String, i64)> {
    unit_words().iter().chain(tens_words().iter())
}

fn digit_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("Invalid regex pattern - this is a bug"))
}

/// Parse spoken Slovene number text into an integer.
///
/// Strategies are tried in order of specificity; the first success wins:
/// compound split on the connective "in", pure digits, exact vocabulary,
/// tens-prefix and tens-suffix decomposition, fuzzy vocabulary lookup,
/// and finally any digit run embedded in the text.
pub fn parse_number(text: &str) -> Result<i64, NumberParseError> {
    let text = transliterate(text.trim()).to_lowercase();
    parse_normalized(&text)
}

fn parse_normalized(text: &str) -> Result<i64, NumberParseError> {
    if text.is_empty() {
        return Err(NumberParseError {
            text: text.to_string(),
        });
    }

    // compounds: "dvajset in tri", but also concatenated "petindvajset";
    // the connective is matched as a substring, so both forms split here
    if let Some(idx) = text.find("in") {
        let left = text[..idx].trim();
        let right = text[idx + 2..].trim();
        if let (Ok(l), Ok(r)) = (parse_normalized(left), parse_normalized(right)) {
            return Ok(l + r);
        }
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(n);
        }
    }

    for (word, value) in vocabulary() {
        if text == word.as_str() {
            return Ok(*value);
        }
    }

    // tens+unit run together, e.g. "sestdesetsest"
    for (word, value) in tens_words() {
        if let Some(rest) = text.strip_prefix(word.as_str()) {
            if let Ok(unit) = parse_normalized(rest.trim()) {
                return Ok(value + unit);
            }
        }
    }

    // unit+tens run together, e.g. "sestdvajset"
    for (word, value) in tens_words() {
        if let Some(rest) = text.strip_suffix(word.as_str()) {
            if let Ok(unit) = parse_normalized(rest.trim()) {
                return Ok(value + unit);
            }
        }
    }

    // minor ASR typos
    let scorer = PartialRatio;
    let mut best: Option<(i64, u8)> = None;
    for (word, value) in vocabulary() {
        let score = scorer.score(text, word);
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((*value, score));
        }
    }
    if let Some((value, score)) = best {
        if score >= FUZZY_ACCEPT {
            return Ok(value);
        }
    }

    // digits buried in other characters
    if let Some(run) = digit_run_regex().find(text) {
        if let Ok(n) = run.as_str().parse::<i64>() {
            return Ok(n);
        }
    }

    Err(NumberParseError {
        text: text.to_string(),
    })
}
