/*!
 * Integration tests for the selection monitor: dispatch, de-duplication,
 * ordering and shutdown
 */

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use selectrans::providers::MockProvider;
use selectrans::translation::{Monitor, PollOutcome, Translator};

use crate::common::{ScriptedSource, SharedBuffer, Step, test_config};

/// "foo" then "bar": bar's lookup finishes first but foo is printed first
#[tokio::test]
async fn test_monitor_withOutOfOrderCompletion_shouldRenderInSelectionOrder() {
    let machine = MockProvider::translating().with_delay("foo", 200).with_delay("bar", 10);
    let output = SharedBuffer::default();
    let mut monitor = Monitor::new(
        ScriptedSource::texts(&["foo", "bar"]),
        Translator::new(Arc::new(machine.clone())),
        output.renderer(),
        &test_config(),
    );

    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(0));
    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(1));

    // bar is done, foo is not: nothing may be printed yet
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(output.contents().is_empty());

    let stats = monitor.shutdown().await;
    assert_eq!(stats.dispatched, 2);
    assert_eq!(stats.rendered, 2);

    let printed = output.contents();
    let foo = printed.find("#0 ").expect("foo block");
    let bar = printed.find("#1 ").expect("bar block");
    assert!(foo < bar);
    assert!(printed[foo..bar].contains("[zh] foo"));
    assert!(printed[bar..].contains("[zh] bar"));
}

/// Re-polling an unchanged selection never creates a new request
#[tokio::test]
async fn test_monitor_withUnchangedSelection_shouldDispatchOnce() {
    let machine = MockProvider::translating();
    let mut monitor = Monitor::new(
        ScriptedSource::texts(&["Hello World", "  Hello World\n"]),
        Translator::new(Arc::new(machine.clone())),
        SharedBuffer::default().renderer(),
        &test_config(),
    );

    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(0));
    assert_eq!(monitor.poll_once().await, PollOutcome::Unchanged);
    assert_eq!(monitor.poll_once().await, PollOutcome::Unchanged);

    let stats = monitor.shutdown().await;
    assert_eq!(stats.polls, 3);
    assert_eq!(stats.dispatched, 1);
    assert_eq!(machine.request_count(), 1);
}

/// Selecting the same text again after the selection was dropped counts as new
#[tokio::test]
async fn test_monitor_withBlankInBetween_shouldTranslateAgain() {
    let mut monitor = Monitor::new(
        ScriptedSource::texts(&["cat", "", "cat"]),
        Translator::new(Arc::new(MockProvider::translating())),
        SharedBuffer::default().renderer(),
        &test_config(),
    );

    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(0));
    assert_eq!(monitor.poll_once().await, PollOutcome::Blank);
    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(1));
    assert_eq!(monitor.shutdown().await.rendered, 2);
}

/// A text already being looked up is skipped without using up an index
#[tokio::test]
async fn test_monitor_withTextInFlight_shouldSkipDuplicate() {
    let machine = MockProvider::translating().with_delay("foo", 200);
    let output = SharedBuffer::default();
    let mut monitor = Monitor::new(
        ScriptedSource::texts(&["foo", "bar", "foo", "baz"]),
        Translator::new(Arc::new(machine.clone())),
        output.renderer(),
        &test_config(),
    );

    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(0));
    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(1));
    assert_eq!(monitor.poll_once().await, PollOutcome::Duplicate);
    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(2));

    let stats = monitor.shutdown().await;
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.dispatched, 3);
    assert_eq!(stats.rendered, 3);
    assert_eq!(machine.seen(), vec!["foo", "bar", "baz"]);
}

/// Read failures are counted and do not disturb the sequence
#[tokio::test]
async fn test_monitor_withSourceError_shouldRecoverOnNextPoll() {
    let mut monitor = Monitor::new(
        ScriptedSource::new(vec![Step::Fail, Step::Text("word".to_string()), Step::Fail]),
        Translator::new(Arc::new(MockProvider::translating())),
        SharedBuffer::default().renderer(),
        &test_config(),
    );

    assert_eq!(monitor.poll_once().await, PollOutcome::SourceError);
    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(0));
    assert_eq!(monitor.poll_once().await, PollOutcome::SourceError);
    assert_eq!(monitor.poll_once().await, PollOutcome::Unchanged);

    let stats = monitor.shutdown().await;
    assert_eq!(stats.source_errors, 2);
    assert_eq!(stats.dispatched, 1);
}

/// Provider failures are printed inline and the monitor keeps going
#[tokio::test]
async fn test_monitor_withFailingProvider_shouldRenderFailureAndContinue() {
    let output = SharedBuffer::default();
    let mut monitor = Monitor::new(
        ScriptedSource::texts(&["Hello World", "Good night"]),
        Translator::new(Arc::new(MockProvider::failing())),
        output.renderer(),
        &test_config(),
    );

    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(0));
    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(1));
    let stats = monitor.shutdown().await;

    assert_eq!(stats.rendered, 2);
    assert_eq!(output.contents().matches("Lookup failed").count(), 2);
}

/// Concurrency limit of one still yields every result in order
#[tokio::test]
async fn test_monitor_withSingleWorker_shouldSerializeLookups() {
    let mut config = test_config();
    config.concurrent_requests = 1;
    let output = SharedBuffer::default();
    let mut monitor = Monitor::new(
        ScriptedSource::texts(&["one", "two", "three"]),
        Translator::new(Arc::new(MockProvider::translating().with_default_delay(20))),
        output.renderer(),
        &config,
    );

    for _ in 0..3 {
        monitor.poll_once().await;
    }
    assert_eq!(monitor.shutdown().await.rendered, 3);

    let printed = output.contents();
    let positions: Vec<usize> = ["#0 ", "#1 ", "#2 "]
        .iter()
        .map(|header| printed.find(header).expect("header"))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

/// `run` polls on its own until the shutdown future resolves
#[tokio::test]
async fn test_monitor_run_withShutdownSignal_shouldStopAndFlush() {
    let source = ScriptedSource::texts(&["alpha", "alpha", "beta"]);
    let clears = source.clear_counter();
    let output = SharedBuffer::default();
    let monitor = Monitor::new(
        source,
        Translator::new(Arc::new(MockProvider::translating())),
        output.renderer(),
        &test_config(),
    );

    let stats = monitor.run(tokio::time::sleep(Duration::from_millis(150))).await;

    assert!(stats.polls >= 3);
    assert_eq!(stats.dispatched, 2);
    assert_eq!(stats.rendered, 2);
    assert_eq!(clears.load(Ordering::SeqCst), 0);
    assert!(output.contents().contains("[zh] beta"));
}

/// A lookup that crashes is reported in its slot and does not hold back later results
#[tokio::test]
async fn test_monitor_withPanickingLookup_shouldRenderFailureAndKeepOrder() {
    let machine = MockProvider::translating().with_panic("foo").with_delay("bar", 5);
    let output = SharedBuffer::default();
    let mut monitor = Monitor::new(
        ScriptedSource::texts(&["foo", "bar"]),
        Translator::new(Arc::new(machine)),
        output.renderer(),
        &test_config(),
    );

    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(0));
    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(1));
    tokio::time::sleep(Duration::from_millis(50)).await;

    // the next poll notices the crashed task while the monitor is still running
    assert_eq!(monitor.poll_once().await, PollOutcome::Unchanged);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let printed = output.contents();
    let foo = printed.find("#0 ").expect("foo block");
    let bar = printed.find("#1 ").expect("bar block");
    assert!(foo < bar);
    assert!(printed[foo..bar].contains("Lookup failed: lookup panicked"));
    assert!(printed[bar..].contains("[zh] bar"));

    let stats = monitor.shutdown().await;
    assert_eq!(stats.rendered, 2);
}

/// A crashed lookup frees its text so selecting it again retries
#[tokio::test]
async fn test_monitor_withPanickingLookup_shouldAllowRetryOfSameText() {
    let machine = MockProvider::translating().with_panic("foo");
    let mut monitor = Monitor::new(
        ScriptedSource::texts(&["foo", "", "foo"]),
        Translator::new(Arc::new(machine.clone())),
        SharedBuffer::default().renderer(),
        &test_config(),
    );

    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(0));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(monitor.poll_once().await, PollOutcome::Blank);
    assert_eq!(monitor.poll_once().await, PollOutcome::Dispatched(1));

    monitor.shutdown().await;
    assert_eq!(machine.request_count(), 2);
}
