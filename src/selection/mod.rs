/*!
 * Text selection handling.
 *
 * - `source`: reads and clears the host selection through an external command
 * - `normalizer`: turns raw selection bytes into a comparable string
 * - `detector`: decides whether a freshly read selection is new
 */

pub mod detector;
pub mod normalizer;
pub mod source;

pub use self::detector::ChangeDetector;
pub use self::normalizer::{normalize, normalize_lines};
pub use self::source::{CommandSelectionSource, SelectionSource};

/// The normalized selection seen at one poll instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Normalized text
    pub text: String,
    /// Poll sequence number, `None` when the read failed and the value must be skipped
    pub index: Option<u64>,
}

impl Selection {
    /// Create a valid selection
    pub fn new(text: impl Into<String>, index: u64) -> Self {
        Self {
            text: text.into(),
            index: Some(index),
        }
    }

    /// Selection standing in for a failed read
    pub fn invalid() -> Self {
        Self {
            text: String::new(),
            index: None,
        }
    }

    /// Whether the read that produced this selection succeeded
    pub fn is_valid(&self) -> bool {
        self.index.is_some()
    }

    /// Whether there is no text to translate
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(String::new(), 0)
    }
}
