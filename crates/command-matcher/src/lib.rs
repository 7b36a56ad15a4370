//! Slovene voice-command matching
//!
//! This crate turns a transcribed utterance into a resolved catalog action:
//! the utterance is normalized, scored against every compiled command
//! template, and the winning template's slots are filled by parsing spoken
//! Slovene numerals out of the captured text.

mod catalog;
mod error;
mod matcher;
mod normalize;
mod numerals;
mod similarity;
mod template;

pub use catalog::{load_catalog_file, CatalogEntry, CommandCatalog};
pub use error::{MatchError, NumberParseError, TemplateError};
pub use matcher::{CommandMatcher, RecognizedAction, SlotValue, DEFAULT_THRESHOLD};
pub use normalize::{normalize, transliterate};
pub use numerals::parse_number;
pub use similarity::{PartialRatio, Similarity};
pub use template::CommandTemplate;
