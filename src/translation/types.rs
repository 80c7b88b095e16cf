/*!
 * Records flowing through the translation pipeline.
 */

use chrono::{DateTime, Local};
use std::collections::BTreeMap;

use crate::parsers::dictionary::DictionaryEntry;

/// Which kind of lookup a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Probably a single word: dictionary lookup, detailed translation
    Short,
    /// Anything else: plain sentence translation
    Long,
}

/// One accepted selection change waiting for its lookup
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Normalized selection text
    pub source_text: String,
    /// Position among all requests of this run, starting at 0
    pub sequence_index: u64,
    /// When the change was detected
    pub timestamp: DateTime<Local>,
    /// Lookup strategy chosen by the router
    pub kind: LookupKind,
}

impl TranslationRequest {
    /// Create a request stamped with the current local time
    pub fn new(source_text: impl Into<String>, sequence_index: u64, kind: LookupKind) -> Self {
        Self {
            source_text: source_text.into(),
            sequence_index,
            timestamp: Local::now(),
            kind,
        }
    }
}

/// Outcome of a lookup as far as the reader is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupStatus {
    /// At least one field carries content
    Found,
    /// The services answered but had nothing for this text
    NotFound,
    /// The lookup could not be carried out
    Failed(String),
}

/// Unified result of a machine translation and/or dictionary lookup
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    /// Text that was looked up, always the request's text
    pub source_text: String,
    /// Machine translation, empty when none was obtained
    pub translated_text: String,
    /// Dictionary glosses, one entry per list item
    pub chinese_explanations: Vec<String>,
    /// Dictionary web translations in document order
    pub web_explanations: Vec<String>,
    /// Dictionary web phrases keyed by phrase title
    pub web_phrases: BTreeMap<String, Vec<String>>,
    /// UK then US phonetics, at most one each
    pub pronunciations: Vec<String>,
    /// Release order in the ordering queue
    pub ordering_key: u64,
    /// Sequence index of the originating request
    pub sequence_index: u64,
    /// Timestamp of the originating request
    pub timestamp: DateTime<Local>,
    /// Lookup outcome
    pub status: LookupStatus,
}

impl TranslationResult {
    /// Empty result for `request`, keyed for in-order release
    pub fn for_request(request: &TranslationRequest) -> Self {
        Self {
            source_text: request.source_text.clone(),
            translated_text: String::new(),
            chinese_explanations: Vec::new(),
            web_explanations: Vec::new(),
            web_phrases: BTreeMap::new(),
            pronunciations: Vec::new(),
            ordering_key: request.sequence_index,
            sequence_index: request.sequence_index,
            timestamp: request.timestamp,
            status: LookupStatus::NotFound,
        }
    }

    /// Result reporting that the lookup for `request` failed
    pub fn failed(request: &TranslationRequest, reason: impl Into<String>) -> Self {
        let mut result = Self::for_request(request);
        result.status = LookupStatus::Failed(reason.into());
        result
    }

    /// Attach a machine translation
    pub fn with_translation(mut self, translated_text: impl Into<String>) -> Self {
        self.translated_text = translated_text.into();
        self.refresh_status();
        self
    }

    /// Attach the fields extracted from a dictionary page
    pub fn with_dictionary(mut self, entry: DictionaryEntry) -> Self {
        self.pronunciations = entry.pronunciations;
        self.chinese_explanations = entry.chinese_explanations;
        self.web_explanations = entry.web_explanations;
        self.web_phrases = entry.web_phrases;
        self.refresh_status();
        self
    }

    /// Whether any dictionary field carries content
    pub fn has_dictionary_content(&self) -> bool {
        !self.pronunciations.is_empty()
            || !self.chinese_explanations.is_empty()
            || !self.web_explanations.is_empty()
            || !self.web_phrases.is_empty()
    }

    /// Whether anything at all can be shown for this result
    pub fn has_content(&self) -> bool {
        !self.translated_text.is_empty() || self.has_dictionary_content()
    }

    /// Whether the lookup failed
    pub fn is_failed(&self) -> bool {
        matches!(self.status, LookupStatus::Failed(_))
    }

    fn refresh_status(&mut self) {
        self.status = if self.has_content() {
            LookupStatus::Found
        } else {
            LookupStatus::NotFound
        };
    }
}
