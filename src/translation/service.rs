/*!
 * Lookup composition for one request.
 *
 * Long selections go to machine translation. Short selections go to the
 * dictionary first and, when it has nothing or cannot be reached, to the
 * machine translation in detailed mode. `Translator::translate` never fails:
 * provider errors come back as a `Failed` result so the ordering stays intact.
 */

use log::{debug, warn};
use std::sync::Arc;

use super::types::{LookupKind, LookupStatus, TranslationRequest, TranslationResult};
use crate::app_config::Config;
use crate::errors::{ProviderError, TranslationError};
use crate::providers::{GoogleTranslate, HttpClient, Provider, YoudaoDictionary};

/// Runs the providers for a request
#[derive(Debug, Clone)]
pub struct Translator {
    /// Machine translation provider
    machine: Arc<dyn Provider>,
    /// Dictionary provider, if enabled
    dictionary: Option<Arc<dyn Provider>>,
    /// Ask the machine translation when the dictionary has nothing
    fallback_to_translation: bool,
}

impl Translator {
    /// Create a translator using only machine translation
    pub fn new(machine: Arc<dyn Provider>) -> Self {
        Self {
            machine,
            dictionary: None,
            fallback_to_translation: true,
        }
    }

    /// Add a dictionary provider for short lookups
    pub fn with_dictionary(mut self, dictionary: Arc<dyn Provider>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Enable or disable the translation fallback for short lookups
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_translation = enabled;
        self
    }

    /// Build the real providers from the configuration
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let http = HttpClient::new(&config.http)?;
        let mut translator = Self::new(Arc::new(GoogleTranslate::from_config(config, http.clone())))
            .with_fallback(config.providers.fallback_to_translation);

        if config.providers.dictionary_enabled {
            translator = translator.with_dictionary(Arc::new(YoudaoDictionary::from_config(config, http)));
        }

        Ok(translator)
    }

    /// All configured providers, machine translation first
    pub fn providers(&self) -> Vec<Arc<dyn Provider>> {
        let mut providers = vec![Arc::clone(&self.machine)];
        providers.extend(self.dictionary.iter().cloned());
        providers
    }

    /// Look up `request`, returning provider errors to the caller
    pub async fn try_translate(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslationError> {
        match (request.kind, &self.dictionary) {
            (LookupKind::Short, Some(dictionary)) => self.lookup_word(dictionary.as_ref(), request).await,
            _ => Ok(self.machine.complete(request).await?),
        }
    }

    /// Look up `request`; failures become a `Failed` result
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        match self.try_translate(request).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Lookup #{} for '{}' failed: {}", request.sequence_index, request.source_text, e);
                TranslationResult::failed(request, e.to_string())
            }
        }
    }

    async fn lookup_word(
        &self,
        dictionary: &dyn Provider,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslationError> {
        let looked_up = dictionary.complete(request).await;

        match &looked_up {
            Ok(result) if result.status == LookupStatus::Found => return Ok(result.clone()),
            Ok(_) => debug!("No dictionary entry for '{}'", request.source_text),
            Err(e) => warn!("Dictionary lookup for '{}' failed: {}", request.source_text, e),
        }

        if !self.fallback_to_translation {
            return Ok(looked_up?);
        }

        let fallback = self.machine.complete(request).await;
        match (looked_up, fallback) {
            (Ok(entry), Ok(machine)) => Ok(entry.with_translation(machine.translated_text)),
            (Err(_), Ok(machine)) => Ok(machine),
            (Ok(entry), Err(e)) => {
                warn!("Fallback translation for '{}' failed: {}", request.source_text, e);
                Ok(entry)
            }
            (Err(dictionary), Err(fallback)) => Err(TranslationError::FallbackFailed { dictionary, fallback }),
        }
    }
}
