/*!
 * Tests for translation and dictionary response parsing
 */

use selectrans::errors::ProviderError;
use selectrans::parsers::{
    DictionaryEntry, Explanation, ParsedResponse, ResponseParser, TranslateShape, parse_dictionary, parse_translation,
};
use selectrans::translation::{LookupKind, LookupStatus, TranslationRequest, TranslationResult};

use crate::common::{CAT_PAGE, NOT_FOUND_PAGE};

#[test]
fn test_parseDictionary_withFullPage_shouldExtractAllFields() {
    let entry = parse_dictionary(CAT_PAGE);

    assert_eq!(entry.pronunciations, vec!["英 [kæt]", "美 [kæt]"]);
    assert_eq!(
        entry.chinese_explanations,
        vec!["n. 猫，猫科动物", "n. (Cat) （柬、印、土）卡（人名）"]
    );
    assert_eq!(entry.web_explanations, vec!["猫", "卡特彼勒公司"]);
    assert_eq!(entry.web_phrases["Cat Power"], vec!["猫力", "猫女魔力", "凯特鲍尔"]);
    assert_eq!(entry.web_phrases["Cheshire Cat"], vec!["柴郡猫", "笑脸猫"]);
}

/// A page without the translation container yields no explanations
#[test]
fn test_parseDictionary_withNotFoundPage_shouldBeEmpty() {
    let entry = parse_dictionary(NOT_FOUND_PAGE);
    assert!(entry.chinese_explanations.is_empty());
    assert!(entry.is_empty());
}

#[test]
fn test_parseDictionary_withMalformedHtml_shouldNotPanic() {
    let entry = parse_dictionary("<div id=phrsListTab><div class=trans-container><ul><li>n. 书<li>v. 预订");
    assert_eq!(entry.chinese_explanations, vec!["n. 书", "v. 预订"]);
}

#[test]
fn test_webPhrases_withValues_shouldNeverBeEmpty() {
    let entry = parse_dictionary(CAT_PAGE);
    assert!(!entry.web_phrases.is_empty());
    assert!(entry.web_phrases.values().all(|examples| !examples.is_empty()));
}

#[test]
fn test_explanation_parse_withPartOfSpeech_shouldSplitGlosses() {
    let explanation = Explanation::parse("vt. 预订；登记；把……记入");
    assert_eq!(explanation.part_of_speech.as_deref(), Some("vt"));
    assert_eq!(explanation.glosses, vec!["预订", "登记", "把……记入"]);
}

#[test]
fn test_parseTranslation_withBothShapes_shouldReturnFirstSegment() {
    let single = r#"[[["你好世界","Hello World",null,null,10]],null,"en",null,null,null,1,[],[["en"],null,[1],["en"]]]"#;
    assert_eq!(parse_translation(TranslateShape::SingleSentence, single).unwrap(), "你好世界");

    let detailed = r#"{"sentences":[{"trans":"猫","orig":"cat","backend":10},{"src_translit":"kat"}],
        "dict":[{"pos":"名词","terms":["猫"]}],"src":"en","confidence":0.9,"ld_result":{"srclangs":["en"]}}"#;
    assert_eq!(parse_translation(TranslateShape::Detailed, detailed).unwrap(), "猫");
}

#[test]
fn test_parseTranslation_withMalformedJson_shouldBeParseError() {
    let result = parse_translation(TranslateShape::Detailed, "{\"sentences\": ");
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[test]
fn test_responseParser_apply_shouldKeepRequestIdentity() {
    let request = TranslationRequest::new("cat", 9, LookupKind::Short);

    let result = ResponseParser::Dictionary.apply(CAT_PAGE, TranslationResult::for_request(&request));
    assert_eq!(result.source_text, "cat");
    assert_eq!(result.sequence_index, 9);
    assert_eq!(result.ordering_key, 9);
    assert_eq!(result.status, LookupStatus::Found);

    let missing = ResponseParser::Dictionary.apply(NOT_FOUND_PAGE, TranslationResult::for_request(&request));
    assert_eq!(missing.status, LookupStatus::NotFound);
}

#[test]
fn test_responseParser_parse_shouldTagResultKind() {
    let parser = ResponseParser::MachineTranslation(TranslateShape::SingleSentence);
    assert_eq!(
        parser.parse(r#"[[["你好","hi"]]]"#).unwrap(),
        ParsedResponse::Translation("你好".to_string())
    );
    assert!(matches!(
        ResponseParser::Dictionary.parse(NOT_FOUND_PAGE).unwrap(),
        ParsedResponse::Dictionary(entry) if entry == DictionaryEntry::default()
    ));
}
