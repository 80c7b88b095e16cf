//! Selection change detection.

use super::Selection;

/// Whether `current` should be treated as a new selection after `previous`.
///
/// Only equality matters: a valid, non-blank selection whose text differs
/// byte-for-byte from the previous one counts as changed.
pub fn changed(previous: &Selection, current: &Selection) -> bool {
    current.is_valid() && !current.is_blank() && current.text != previous.text
}

/// Remembers the last observed selection on behalf of the poll loop
#[derive(Debug, Default)]
pub struct ChangeDetector {
    previous: Selection,
}

impl ChangeDetector {
    /// Create a detector that has not observed anything yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current` and report whether it is a change.
    ///
    /// Failed reads are ignored entirely. Blank reads are remembered, so text
    /// selected again after the selection was dropped counts as new.
    pub fn observe(&mut self, current: Selection) -> bool {
        if !current.is_valid() {
            return false;
        }

        let is_change = changed(&self.previous, &current);
        self.previous = current;
        is_change
    }

    /// The last remembered selection
    pub fn previous(&self) -> &Selection {
        &self.previous
    }

    /// Forget the remembered text, e.g. after the selection was cleared
    pub fn reset(&mut self) {
        self.previous = Selection::default();
    }
}
