/*!
 * Response parsing for the lookup providers.
 *
 * - `translate`: JSON bodies of the machine translation endpoint
 * - `dictionary`: HTML result pages of the dictionary service
 * - `dom`: structural queries used by the dictionary extraction
 *
 * `ResponseParser` is the single entry point the providers use; it knows
 * which format a body is in and how to merge it into a `TranslationResult`.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ProviderError;
use crate::translation::types::TranslationResult;

pub mod dictionary;
pub mod dom;
pub mod translate;

pub use dictionary::{DictionaryEntry, Explanation, parse_dictionary};
pub use translate::{TranslateShape, parse_translation};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse every whitespace run to one space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// What a provider response body contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseParser {
    /// JSON from the translation endpoint
    MachineTranslation(TranslateShape),
    /// HTML from the dictionary page
    Dictionary,
}

/// Parsed form of a response body
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// First translated segment
    Translation(String),
    /// Extracted dictionary fields, possibly all empty
    Dictionary(DictionaryEntry),
}

impl ResponseParser {
    /// Parse `body`. Dictionary pages never fail; a page without the expected
    /// sections yields an empty entry.
    pub fn parse(&self, body: &str) -> Result<ParsedResponse, ProviderError> {
        match self {
            Self::MachineTranslation(shape) => {
                parse_translation(*shape, body).map(ParsedResponse::Translation)
            }
            Self::Dictionary => Ok(ParsedResponse::Dictionary(parse_dictionary(body))),
        }
    }

    /// Merge `body` into `result`. A body that cannot be parsed leaves the
    /// corresponding fields empty.
    pub fn apply(&self, body: &str, result: TranslationResult) -> TranslationResult {
        match self.parse(body) {
            Ok(ParsedResponse::Translation(text)) => result.with_translation(text),
            Ok(ParsedResponse::Dictionary(entry)) => result.with_dictionary(entry),
            Err(e) => {
                warn!(
                    "Could not parse response for '{}': {}",
                    result.source_text, e
                );
                result
            }
        }
    }
}
