/*!
 * Shared HTTP transport for the lookup providers.
 *
 * Wraps a `reqwest::Client` configured with the request timeout and user
 * agent, and retries transient failures with exponential backoff.
 */

use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

use crate::app_config::HttpConfig;
use crate::errors::ProviderError;

/// Longest pause between two attempts
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// GET-only HTTP client with retry
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Underlying reqwest client
    client: Client,
    /// Retries after the first attempt
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

impl HttpClient {
    /// Create a client from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_retries: config.retry_count,
            backoff_base_ms: config.retry_backoff_ms,
        })
    }

    /// Fetch `url` and return the body as text.
    ///
    /// Timeouts, connection failures and server errors are retried; client
    /// errors are returned straight away.
    pub async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        let mut attempt = 0;

        loop {
            let error = match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => e,
            };

            if !error.is_retryable() || attempt >= self.max_retries {
                return Err(error);
            }

            attempt += 1;
            error!(
                "Request to {} failed: {} - attempt {}/{}",
                url,
                error,
                attempt,
                self.max_retries + 1
            );

            tokio::time::sleep(self.backoff(attempt)).await;
        }
    }

    /// Pause before retry number `attempt` (1-based): the base doubled per
    /// earlier retry, capped at `MAX_BACKOFF`
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor)).min(MAX_BACKOFF)
    }

    async fn fetch_once(&self, url: &str) -> Result<String, ProviderError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        Ok(response.text().await?)
    }
}
