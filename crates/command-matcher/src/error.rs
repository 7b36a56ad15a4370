use thiserror::Error;

/// No integer could be derived from spoken-number text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse number from '{text}'")]
pub struct NumberParseError {
    /// The text that exhausted every parsing strategy.
    pub text: String,
}

/// Utterance recognition failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("no command matches '{utterance}' (best score={best_score})")]
    NoMatch { utterance: String, best_score: u8 },
    #[error("command catalog is empty")]
    EmptyCatalog,
}

/// A template whose synthesized pattern cannot be compiled, e.g. a slot
/// name repeated within one template.
#[derive(Debug, Clone, Error)]
#[error("invalid command template '{template}': {reason}")]
pub struct TemplateError {
    pub template: String,
    pub reason: String,
}
