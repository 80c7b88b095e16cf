/*!
 * Console rendering of lookup results.
 *
 * Each result becomes one block: a header with the sequence index, the time
 * the selection was seen and the source text, followed by the translation or
 * the dictionary breakdown. Color uses plain ANSI escapes and can be turned
 * off for pipes and tests.
 */

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::parsers::Explanation;
use crate::translation::types::{LookupStatus, TranslationResult};

const RESET: &str = "\x1B[0m";
const PROMPT: &str = "\x1B[1;93m";
const ARROW: &str = "\x1B[1;92m";
const LABEL: &str = "\x1B[1;3;96m";
const ERROR: &str = "\x1B[1;3;91m";

/// Writes formatted results to an output stream
pub struct Renderer {
    out: Box<dyn Write + Send>,
    color: bool,
}

impl Renderer {
    /// Render to `out`
    pub fn new(out: Box<dyn Write + Send>, color: bool) -> Self {
        Self { out, color }
    }

    /// Render to standard output
    pub fn stdout(color: bool) -> Self {
        Self::new(Box::new(io::stdout()), color)
    }

    /// Write the block for `result`
    pub fn render(&mut self, result: &TranslationResult) -> io::Result<()> {
        let block = self.format_result(result);
        self.out.write_all(block.as_bytes())?;
        self.out.flush()
    }

    /// Write a one-line notice that is not tied to a result
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        let line = format!("{} {}\n\n", self.paint(PROMPT, "[notice]"), self.paint(ERROR, message));
        self.out.write_all(line.as_bytes())?;
        self.out.flush()
    }

    /// Format the block for `result` without writing it
    pub fn format_result(&self, result: &TranslationResult) -> String {
        let mut block = String::new();

        let _ = write!(
            block,
            "{} {} {}",
            self.paint(PROMPT, &format!("#{} {}", result.sequence_index, result.timestamp.format("%H:%M:%S"))),
            self.paint(ARROW, ">>>"),
            result.source_text
        );
        for pronunciation in &result.pronunciations {
            let _ = write!(block, " {}", self.paint(PROMPT, pronunciation));
        }
        block.push('\n');

        match &result.status {
            LookupStatus::Failed(reason) => {
                let _ = writeln!(block, "  {}", self.paint(ERROR, &format!("Lookup failed: {}", reason)));
            }
            LookupStatus::NotFound => {
                let _ = writeln!(block, "  {}", self.paint(ERROR, "Translation not found"));
            }
            LookupStatus::Found => self.format_found(result, &mut block),
        }

        block.push('\n');
        block
    }

    fn format_found(&self, result: &TranslationResult, block: &mut String) {
        if !result.translated_text.is_empty() {
            let _ = writeln!(block, "  {}", result.translated_text);
        }

        for entry in &result.chinese_explanations {
            let explanation = Explanation::parse(entry);
            let label = explanation.part_of_speech.as_deref().unwrap_or("Phrase");
            let indent = " ".repeat(label.chars().count() + 3);

            for (i, gloss) in explanation.glosses.iter().enumerate() {
                if i == 0 {
                    let _ = writeln!(block, "  {} * {}", self.paint(LABEL, label), gloss);
                } else {
                    let _ = writeln!(block, "{}* {}", indent, gloss);
                }
            }
        }

        for (i, web) in result.web_explanations.iter().enumerate() {
            if i == 0 {
                let _ = writeln!(block, "  {} * {}", self.paint(LABEL, "Web"), web);
            } else {
                let _ = writeln!(block, "      * {}", web);
            }
        }

        if !result.web_phrases.is_empty() {
            let _ = writeln!(block, "  {}", self.paint(LABEL, "Web Phrases"));
            for (title, examples) in &result.web_phrases {
                let _ = writeln!(block, "    {}", self.paint(LABEL, title));
                for example in examples {
                    let _ = writeln!(block, "      - {}", example);
                }
            }
        }
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", style, text, RESET)
        } else {
            text.to_string()
        }
    }
}
