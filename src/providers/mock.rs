/*!
 * Mock provider implementations for testing.
 *
 * This module provides a scriptable provider that simulates the services:
 * - `MockProvider::translating()` - Always succeeds with a translated text
 * - `MockProvider::dictionary()` - Serves canned dictionary entries
 * - `MockProvider::not_found()` - Answers, but with nothing
 * - `MockProvider::failing()` - Always fails with an error
 *
 * Per-text delays make it possible to finish lookups out of order, and
 * `with_panic` makes the lookup task for one text crash.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::parsers::DictionaryEntry;
use crate::providers::Provider;
use crate::translation::types::{TranslationRequest, TranslationResult};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with `[<tag>] <text>` as translation
    Translating,
    /// Returns the canned dictionary entry for the text, or nothing
    Dictionary,
    /// Always answers with an empty result
    NotFound,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// Mock provider for testing lookup behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Tag put in front of translations
    tag: String,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Texts seen, in call order
    seen: Arc<Mutex<Vec<String>>>,
    /// Artificial latency per text
    delays: HashMap<String, Duration>,
    /// Latency for texts without their own delay
    default_delay: Duration,
    /// Canned dictionary entries
    entries: HashMap<String, DictionaryEntry>,
    /// Texts whose lookup panics
    panics: HashSet<String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            tag: "zh".to_string(),
            request_count: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
            delays: HashMap::new(),
            default_delay: Duration::ZERO,
            entries: HashMap::new(),
            panics: HashSet::new(),
        }
    }

    /// Create a provider that always translates
    pub fn translating() -> Self {
        Self::new(MockBehavior::Translating)
    }

    /// Create a provider serving canned dictionary entries
    pub fn dictionary() -> Self {
        Self::new(MockBehavior::Dictionary)
    }

    /// Create a provider that never finds anything
    pub fn not_found() -> Self {
        Self::new(MockBehavior::NotFound)
    }

    /// Create an intermittently failing mock provider; every request fails
    /// when `fail_every` is 0 or 1
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set the translation tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Delay lookups of `text`
    pub fn with_delay(mut self, text: impl Into<String>, delay_ms: u64) -> Self {
        self.delays.insert(text.into(), Duration::from_millis(delay_ms));
        self
    }

    /// Delay every lookup without its own delay
    pub fn with_default_delay(mut self, delay_ms: u64) -> Self {
        self.default_delay = Duration::from_millis(delay_ms);
        self
    }

    /// Serve `entry` for `text`
    pub fn with_entry(mut self, text: impl Into<String>, entry: DictionaryEntry) -> Self {
        self.entries.insert(text.into(), entry);
        self
    }

    /// Panic while looking up `text`
    pub fn with_panic(mut self, text: impl Into<String>) -> Self {
        self.panics.insert(text.into());
        self
    }

    /// Number of lookups started so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Texts looked up so far, in call order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            tag: self.tag.clone(),
            request_count: Arc::clone(&self.request_count),
            seen: Arc::clone(&self.seen),
            delays: self.delays.clone(),
            default_delay: self.default_delay,
            entries: self.entries.clone(),
            panics: self.panics.clone(),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(request.source_text.clone());

        let delay = self
            .delays
            .get(&request.source_text)
            .copied()
            .unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.panics.contains(&request.source_text) {
            panic!("Simulated crash while looking up '{}'", request.source_text);
        }

        let result = TranslationResult::for_request(request);
        let translated = || format!("[{}] {}", self.tag, request.source_text);

        match self.behavior {
            MockBehavior::Translating => Ok(result.with_translation(translated())),

            MockBehavior::Dictionary => Ok(match self.entries.get(&request.source_text) {
                Some(entry) => result.with_dictionary(entry.clone()),
                None => result,
            }),

            MockBehavior::NotFound => Ok(result),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(result.with_translation(translated()))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
