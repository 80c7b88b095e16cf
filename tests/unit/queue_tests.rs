/*!
 * Tests for the result ordering queue
 */

use selectrans::translation::{
    LookupKind, ReorderBuffer, ResultOrderingQueue, TranslationRequest, TranslationResult,
};

fn result(text: &str, index: u64) -> TranslationResult {
    TranslationResult::for_request(&TranslationRequest::new(text, index, LookupKind::Long))
}

/// Popped keys never decrease and the queue empties after as many pops as pushes
#[test]
fn test_queue_withShuffledPushes_shouldPopNonDecreasingKeys() {
    let keys = [7u64, 3, 9, 3, 0, 12, 5, 5, 1, 8, 2, 11];
    let mut queue = ResultOrderingQueue::new();
    for (i, key) in keys.iter().enumerate() {
        queue.push(result(&format!("text {}", i), *key));
    }
    assert_eq!(queue.len(), keys.len());

    let mut popped = Vec::new();
    for _ in 0..keys.len() {
        popped.push(queue.pop().expect("entry").ordering_key);
    }

    assert!(popped.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(queue.is_empty());
    assert!(queue.pop().is_none());
}

#[test]
fn test_queue_withEqualKeys_shouldReleaseFirstInsertedFirst() {
    let mut queue = ResultOrderingQueue::new();
    queue.push(result("first", 0));
    queue.push(result("second", 0));

    assert_eq!(queue.pop().unwrap().source_text, "first");
    assert_eq!(queue.pop().unwrap().source_text, "second");
}

/// Results completing in reverse order come out in sequence order
#[test]
fn test_reorderBuffer_withReverseCompletion_shouldReleaseInSequence() {
    let mut buffer = ReorderBuffer::new();
    let mut released = Vec::new();

    for index in (0..5).rev() {
        assert!(buffer.push(result(&format!("r{}", index), index)));
        released.extend(buffer.drain_ready().into_iter().map(|r| r.sequence_index));
    }

    assert_eq!(released, vec![0, 1, 2, 3, 4]);
    assert_eq!(buffer.pending(), 0);
}

/// The buffer never holds two results with the same sequence index
#[test]
fn test_reorderBuffer_withDuplicateIndex_shouldKeepFirst() {
    let mut buffer = ReorderBuffer::new();
    assert!(buffer.push(result("foo", 1)));
    assert!(!buffer.push(result("foo again", 1)));
    assert_eq!(buffer.pending(), 1);

    buffer.push(result("bar", 0));
    let texts: Vec<String> = buffer.drain_ready().into_iter().map(|r| r.source_text).collect();
    assert_eq!(texts, vec!["bar", "foo"]);
}
