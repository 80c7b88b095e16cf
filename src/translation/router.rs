/*!
 * Routing of accepted selections to a lookup strategy.
 *
 * Lengths are counted in characters, so a CJK selection is measured the way
 * the user sees it rather than by its UTF-8 size.
 */

use std::fmt;

use super::types::LookupKind;

/// Why a selection was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The selection is longer than the configured maximum
    TooLong {
        /// Character count of the selection
        length: usize,
        /// Configured maximum
        limit: usize,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { length, limit } => {
                write!(f, "selection too long ({} characters, limit is {})", length, limit)
            }
        }
    }
}

/// Routing decision for one selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Refuse the selection
    Reject(RejectReason),
    /// Probably a single word
    ShortLookup,
    /// Translate verbatim
    LongTranslate,
}

impl RouteDecision {
    /// Lookup kind for accepted decisions
    pub fn lookup_kind(&self) -> Option<LookupKind> {
        match self {
            Self::Reject(_) => None,
            Self::ShortLookup => Some(LookupKind::Short),
            Self::LongTranslate => Some(LookupKind::Long),
        }
    }
}

/// Classifies selections by shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationRouter {
    max_length: usize,
    short_max_length: usize,
}

impl TranslationRouter {
    /// Create a router rejecting texts longer than `max_length` and treating
    /// space-free texts shorter than `short_max_length` as single words
    pub fn new(max_length: usize, short_max_length: usize) -> Self {
        Self {
            max_length,
            short_max_length,
        }
    }

    /// Create a router from the application configuration
    pub fn from_config(config: &crate::app_config::Config) -> Self {
        Self::new(config.max_selection_length, config.short_lookup_max_length)
    }

    /// Classify `text`
    pub fn route(&self, text: &str) -> RouteDecision {
        let length = text.chars().count();

        if length > self.max_length {
            RouteDecision::Reject(RejectReason::TooLong {
                length,
                limit: self.max_length,
            })
        } else if !text.contains(' ') && length < self.short_max_length {
            RouteDecision::ShortLookup
        } else {
            RouteDecision::LongTranslate
        }
    }
}

impl Default for TranslationRouter {
    fn default() -> Self {
        Self::new(255, 30)
    }
}
