/*!
 * Tests for normalization, change detection and routing
 */

use selectrans::selection::detector::changed;
use selectrans::selection::{ChangeDetector, Selection, normalize, normalize_lines};
use selectrans::translation::{RouteDecision, TranslationRouter};

#[test]
fn test_normalize_withWrappedText_shouldJoinLines() {
    assert_eq!(normalize(b"  Hello World  \n"), "Hello World");
    assert_eq!(normalize(b"first line\nsecond line"), "first line second line");
    assert_eq!(normalize(b"first\r\n\r\nsecond"), "first second");
    assert_eq!(normalize(b"trans-\nlation"), "trans-lation");
    assert_eq!(normalize(b""), "");
    assert_eq!(normalize(b" \t\n "), "");
}

#[test]
fn test_normalizeLines_withIndentedText_shouldTrimEachLine() {
    assert_eq!(normalize_lines(b"   first line  \n\t  second line\n"), "first line second line");
    assert_eq!(normalize_lines(b"para one\n\n\npara two"), "para one para two");
    assert_eq!(normalize_lines(b"well-\n   known"), "well-known");
}

#[test]
fn test_normalize_withInvalidUtf8_shouldNotFail() {
    let text = normalize(&[0x66, 0x6f, 0xff, 0x6f]);
    assert_eq!(text.chars().count(), 4);
    assert!(text.starts_with("fo"));
}

/// Selections that normalize to the same text are never a change
#[test]
fn test_changed_withEquivalentRawSelections_shouldReportUnchanged() {
    let pairs: [(&[u8], &[u8]); 4] = [
        (b"Hello World", b"  Hello World  \n"),
        (b"cat", b"\tcat\n"),
        (b"first line second", b"first line\nsecond"),
        (b"re-enter", b"re- enter"),
    ];

    for (a, b) in pairs {
        let previous = Selection::new(normalize(a), 0);
        let current = Selection::new(normalize(b), 1);
        assert!(!changed(&previous, &current), "{:?} vs {:?}", previous.text, current.text);
    }
}

#[test]
fn test_changeDetector_withRepeatedPolls_shouldEmitOnce() {
    let mut detector = ChangeDetector::new();
    let mut changes = 0;
    for index in 0..5 {
        if detector.observe(Selection::new("same text", index)) {
            changes += 1;
        }
    }
    assert_eq!(changes, 1);
}

#[test]
fn test_changeDetector_withInvalidRead_shouldKeepPrevious() {
    let mut detector = ChangeDetector::new();
    assert!(detector.observe(Selection::new("cat", 0)));
    assert!(!detector.observe(Selection::invalid()));
    assert_eq!(detector.previous().text, "cat");
    assert!(!detector.observe(Selection::new("cat", 1)));
}

/// Every space-free text shorter than the limit is a short lookup
#[test]
fn test_route_withSpaceFreeShortTexts_shouldSelectShortLookup() {
    let router = TranslationRouter::default();
    for length in 1..30 {
        let text: String = "abcdefghij".chars().cycle().take(length).collect();
        assert_eq!(router.route(&text), RouteDecision::ShortLookup, "length {}", length);
    }
}

/// Every text over the maximum is rejected whatever it contains
#[test]
fn test_route_withOverLengthTexts_shouldAlwaysReject() {
    let router = TranslationRouter::default();
    let samples = [
        "x".repeat(256),
        "word ".repeat(52),
        "翻".repeat(300),
        format!("{}\u{3000}", "a".repeat(256)),
    ];
    for text in samples {
        assert!(matches!(router.route(&text), RouteDecision::Reject(_)), "{} chars", text.chars().count());
    }
}

#[test]
fn test_route_withConfiguredLimits_shouldUseThem() {
    let mut config = selectrans::Config::default();
    config.max_selection_length = 50;
    config.short_lookup_max_length = 5;
    let router = TranslationRouter::from_config(&config);

    assert_eq!(router.route("word"), RouteDecision::ShortLookup);
    assert_eq!(router.route("words"), RouteDecision::LongTranslate);
    assert!(matches!(router.route(&"y".repeat(51)), RouteDecision::Reject(_)));
}
