/*!
 * Extraction of dictionary fields from a dictionary result page.
 *
 * The page is queried structurally; any section that is missing simply
 * yields an empty field. Deciding whether the word was found at all is left
 * to the caller via `DictionaryEntry::is_empty`.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::collapse_whitespace;
use super::dom::{Document, Selector, select_within, text_content, text_of};

static PRONUNCIATION_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::new("#results-contents #phrsListTab h2 div.baav"));
static TRANSLATION_ITEMS: Lazy<Selector> =
    Lazy::new(|| Selector::new("#phrsListTab .trans-container ul li"));
static WEB_TRANSLATION_TITLES: Lazy<Selector> =
    Lazy::new(|| Selector::new("#tWebTrans div.wt-container .title"));
static WEB_PHRASE_GROUPS: Lazy<Selector> = Lazy::new(|| Selector::new("#webPhrase p.wordGroup"));
static WEB_PHRASE_TITLE: Lazy<Selector> = Lazy::new(|| Selector::new(".contentTitle a.search-js"));

static UK_PHONETIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"英\s*\[.*?\]").expect("valid regex"));
static US_PHONETIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"美\s*\[.*?\]").expect("valid regex"));
static PART_OF_SPEECH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\.\s*(.*)$").expect("valid regex"));

/// Separator between glosses inside one explanation
const GLOSS_SEPARATOR: char = '；';

/// Fields extracted from a dictionary page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionaryEntry {
    /// UK then US phonetics, at most one each
    pub pronunciations: Vec<String>,
    /// One string per item of the main translation list
    pub chinese_explanations: Vec<String>,
    /// Web translation titles in document order
    pub web_explanations: Vec<String>,
    /// Web phrase title to examples; a repeated title keeps the last group
    pub web_phrases: BTreeMap<String, Vec<String>>,
}

impl DictionaryEntry {
    /// Whether the page yielded none of the fields
    pub fn is_empty(&self) -> bool {
        self.pronunciations.is_empty()
            && self.chinese_explanations.is_empty()
            && self.web_explanations.is_empty()
            && self.web_phrases.is_empty()
    }
}

/// Extract all dictionary fields from `html`
pub fn parse_dictionary(html: &str) -> DictionaryEntry {
    let doc = Document::parse(html);

    DictionaryEntry {
        pronunciations: pronunciations(&doc),
        chinese_explanations: collapsed_texts(&doc, &TRANSLATION_ITEMS),
        web_explanations: collapsed_texts(&doc, &WEB_TRANSLATION_TITLES),
        web_phrases: web_phrases(&doc),
    }
}

fn pronunciations(doc: &Document) -> Vec<String> {
    let block = collapse_whitespace(&text_of(&doc.select(&PRONUNCIATION_BLOCK)));

    [&*UK_PHONETIC, &*US_PHONETIC]
        .iter()
        .filter_map(|region| region.find(&block))
        .map(|found| collapse_whitespace(found.as_str()))
        .collect()
}

fn collapsed_texts(doc: &Document, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .iter()
        .map(|node| collapse_whitespace(&text_content(node)))
        .filter(|text| !text.is_empty())
        .collect()
}

fn web_phrases(doc: &Document) -> BTreeMap<String, Vec<String>> {
    let mut phrases = BTreeMap::new();

    for group in doc.select(&WEB_PHRASE_GROUPS) {
        let title = collapse_whitespace(&text_of(&select_within(&group, &WEB_PHRASE_TITLE)));
        if title.is_empty() {
            continue;
        }

        let examples: Vec<String> = collapse_whitespace(&text_content(&group))
            .replace(&title, "")
            .split(';')
            .map(str::trim)
            .filter(|example| !example.is_empty())
            .map(String::from)
            .collect();

        if !examples.is_empty() {
            phrases.insert(title, examples);
        }
    }

    phrases
}

/// One dictionary explanation split for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    /// Part of speech such as `n` or `vt`, `None` for plain phrases
    pub part_of_speech: Option<String>,
    /// Glosses in order; the first one follows the part of speech
    pub glosses: Vec<String>,
}

impl Explanation {
    /// Split `"n. 猫；猫科动物"` into `n` and `["猫", "猫科动物"]`
    pub fn parse(entry: &str) -> Self {
        let mut glosses: Vec<String> = entry
            .split(GLOSS_SEPARATOR)
            .map(str::trim)
            .filter(|gloss| !gloss.is_empty())
            .map(String::from)
            .collect();

        let mut part_of_speech = None;
        if let Some(first) = glosses.first_mut() {
            let split = PART_OF_SPEECH
                .captures(first.as_str())
                .map(|captures| (captures[1].to_string(), captures[2].trim().to_string()));
            if let Some((label, gloss)) = split {
                part_of_speech = Some(label);
                *first = gloss;
            }
        }

        Self {
            part_of_speech,
            glosses,
        }
    }
}
