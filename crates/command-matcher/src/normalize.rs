//! Utterance normalization for Slovene transcriptions.

use regex::Regex;
use std::sync::OnceLock;

fn punctuation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\sčšž]").expect("Invalid regex pattern - this is a bug"))
}

fn filler_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // hesitation sounds and politeness/greeting words seen in ASR output
        Regex::new(r"\b(?:um+|ahm+|eee+|please|prosim|hej)\b")
            .expect("Invalid regex pattern - this is a bug")
    })
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern - this is a bug"))
}

/// Canonicalize a raw transcription: lower-case, drop punctuation except
/// the Slovene letters, remove filler words, collapse whitespace.
///
/// Total and idempotent; never fails.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let depunctuated = punctuation_regex().replace_all(&lowered, " ");
    let defillered = filler_regex().replace_all(&depunctuated, " ");
    let collapsed = whitespace_regex().replace_all(&defillered, " ");
    collapsed.trim().to_string()
}

/// Map the Slovene letters č, š and ž to their base Latin form.
///
/// Applied to numeral vocabulary keys at table-build time and to number
/// text before lookup, so garbled diacritics from ASR still resolve.
pub fn transliterate(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'č' => 'c',
            'š' => 's',
            'ž' => 'z',
            'Č' => 'C',
            'Š' => 'S',
            'Ž' => 'Z',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Vklopi sistem!"), "vklopi sistem");
        assert_eq!(normalize("Kakšna je, temperatura?"), "kakšna je temperatura");
    }

    #[test]
    fn keeps_slovene_letters() {
        assert_eq!(normalize("štiri čaše žita"), "štiri čaše žita");
    }

    #[test]
    fn removes_filler_words() {
        assert_eq!(
            normalize("hej umm prosim vklopi sistem"),
            "vklopi sistem"
        );
        assert_eq!(normalize("eee nastavi pet"), "nastavi pet");
    }

    #[test]
    fn fillers_inside_words_survive() {
        // "um" only goes away as a whole word
        assert_eq!(normalize("urnik"), "urnik");
        assert_eq!(normalize("po urniku"), "po urniku");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  vklopi \t sistem \n"), "vklopi sistem");
    }

    #[test]
    fn idempotent() {
        for input in [
            "Hej, prosim nastavi temperaturo na 22 stopinj!",
            "ŠTIRI",
            "",
            "   ",
            "že normalizirano besedilo",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn transliterates_special_letters() {
        assert_eq!(transliterate("štiriindvajset"), "stiriindvajset");
        assert_eq!(transliterate("ŽE ČAS"), "ZE CAS");
        assert_eq!(transliterate("plain"), "plain");
    }
}
