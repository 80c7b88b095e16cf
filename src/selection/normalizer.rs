//! Selection text normalization.
//!
//! Both variants are pure and never fail; invalid UTF-8 is replaced lossily.

const TRIMMED: &[char] = &[' ', '\t', '\r', '\n'];

/// Normalize a raw selection: trim it, collapse every run of line breaks into
/// one space and rejoin words hyphenated across a line wrap.
pub fn normalize(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let mut joined = String::with_capacity(text.len());
    let mut in_break = false;

    for c in text.trim_matches(TRIMMED).chars() {
        if c == '\n' || c == '\r' {
            if !in_break {
                joined.push(' ');
                in_break = true;
            }
        } else {
            joined.push(c);
            in_break = false;
        }
    }

    rejoin_hyphens(&joined)
}

/// Line-aware variant: every line is trimmed on its own before the non-empty
/// lines are joined with single spaces, so indentation of wrapped text
/// disappears.
pub fn normalize_lines(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let joined = text
        .trim_matches(TRIMMED)
        .split('\n')
        .map(|line| line.trim_matches(TRIMMED))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    rejoin_hyphens(&joined)
}

/// `"trans- lation"` -> `"trans-lation"`
fn rejoin_hyphens(text: &str) -> String {
    text.replace("- ", "-")
}
