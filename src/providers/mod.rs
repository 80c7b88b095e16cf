/*!
 * Lookup providers.
 *
 * This module contains client implementations for the remote services:
 * - `google`: machine translation endpoint (JSON)
 * - `youdao`: dictionary result pages (HTML)
 * - `mock`: scriptable provider for tests
 *
 * All of them share the `http` transport.
 */

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::translation::types::{TranslationRequest, TranslationResult};

pub mod google;
pub mod http;
pub mod mock;
pub mod youdao;

pub use google::GoogleTranslate;
pub use http::HttpClient;
pub use mock::{MockBehavior, MockProvider};
pub use youdao::YoudaoDictionary;

/// Characters left as-is in a query component; everything else is encoded,
/// spaces included (`%20`)
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode `text` for use in a URL query or path segment
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, QUERY_COMPONENT).to_string()
}

/// Common trait for all lookup providers
///
/// Providers are interchangeable behind this trait so the translator and the
/// tests can swap the real services for scripted ones.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Look up `request` and return a result carrying the request's text,
    /// sequence index and timestamp
    async fn complete(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError>;

    /// Check that the service answers at all
    async fn test_connection(&self) -> Result<(), ProviderError>;
}
