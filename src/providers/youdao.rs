/*!
 * Dictionary lookups against Youdao result pages.
 */

use async_trait::async_trait;
use log::debug;

use super::{HttpClient, Provider, encode_component};
use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::parsers::ResponseParser;
use crate::translation::types::{TranslationRequest, TranslationResult};

/// Client for the dictionary pages
#[derive(Debug, Clone)]
pub struct YoudaoDictionary {
    /// Page prefix the encoded word is appended to
    endpoint: String,
    /// Shared transport
    http: HttpClient,
}

impl YoudaoDictionary {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, http: HttpClient) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config, http: HttpClient) -> Self {
        Self::new(config.providers.dictionary_endpoint.clone(), http)
    }

    /// Page URL for `word`
    pub fn build_url(&self, word: &str) -> String {
        format!("{}{}", self.endpoint, encode_component(word))
    }
}

#[async_trait]
impl Provider for YoudaoDictionary {
    fn name(&self) -> &'static str {
        "youdao"
    }

    async fn complete(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError> {
        let body = self.http.get_text(&self.build_url(&request.source_text)).await?;
        debug!(
            "Dictionary page for #{} is {} bytes",
            request.sequence_index,
            body.len()
        );

        Ok(ResponseParser::Dictionary.apply(&body, TranslationResult::for_request(request)))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.http.get_text(&self.build_url("hello")).await.map(|_| ())
    }
}
