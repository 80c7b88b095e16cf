/*!
 * Machine translation via the Google translate JSON endpoint.
 */

use async_trait::async_trait;
use log::debug;

use super::{HttpClient, Provider, encode_component};
use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::parsers::{ResponseParser, TranslateShape};
use crate::translation::types::{LookupKind, TranslationRequest, TranslationResult};

/// Extra `dt` parameters requesting the detailed (`dj=1`) response
const DETAILED_PARAMS: &str = "dj=1&dt=t&dt=bd&dt=qc&dt=rm&dt=ex&dt=at&dt=ss&dt=rw&dt=ld";

/// Client for the translate endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// Endpoint without query string
    endpoint: String,
    /// Source language tag
    source_language: String,
    /// Target language tag
    target_language: String,
    /// Shared transport
    http: HttpClient,
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(
        endpoint: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        http: HttpClient,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            http,
        }
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config, http: HttpClient) -> Self {
        Self::new(
            config.providers.translate_endpoint.clone(),
            config.source_language.clone(),
            config.target_language.clone(),
            http,
        )
    }

    /// Response shape used for a lookup kind
    pub fn shape_for(kind: LookupKind) -> TranslateShape {
        match kind {
            LookupKind::Short => TranslateShape::Detailed,
            LookupKind::Long => TranslateShape::SingleSentence,
        }
    }

    /// Request URL for `text` in the given response shape
    pub fn build_url(&self, shape: TranslateShape, text: &str) -> String {
        let mut url = format!(
            "{}?client=gtx&sl={}&tl={}&",
            self.endpoint,
            encode_component(&self.source_language),
            encode_component(&self.target_language)
        );
        match shape {
            TranslateShape::SingleSentence => url.push_str("dt=t"),
            TranslateShape::Detailed => url.push_str(DETAILED_PARAMS),
        }
        url.push_str("&q=");
        url.push_str(&encode_component(text));
        url
    }

    /// Translate `request` in an explicit response shape
    pub async fn translate_with(
        &self,
        request: &TranslationRequest,
        shape: TranslateShape,
    ) -> Result<TranslationResult, ProviderError> {
        let url = self.build_url(shape, &request.source_text);
        let body = self.http.get_text(&url).await?;
        debug!(
            "Translation #{} received {} bytes",
            request.sequence_index,
            body.len()
        );

        Ok(ResponseParser::MachineTranslation(shape).apply(&body, TranslationResult::for_request(request)))
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn complete(&self, request: &TranslationRequest) -> Result<TranslationResult, ProviderError> {
        self.translate_with(request, Self::shape_for(request.kind)).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = self.build_url(TranslateShape::SingleSentence, "hello");
        let body = self.http.get_text(&url).await?;
        ResponseParser::MachineTranslation(TranslateShape::SingleSentence)
            .parse(&body)
            .map(|_| ())
    }
}
