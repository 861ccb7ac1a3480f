use async_trait::async_trait;
use config::GoogleConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::{GenerativeBackend, http_client::default_http_client_builder};
use crate::{
    error::BackendError,
    model::GeminiModel,
    protocol::{GenerateContentRequest, GenerateContentResponse},
};

const DEFAULT_GOOGLE_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// [`GenerativeBackend`] over the public Gemini REST API.
pub struct GoogleClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl GoogleClient {
    pub fn new(config: &GoogleConfig) -> Result<Self, BackendError> {
        let client = default_http_client_builder(config.timeout).build().map_err(|e| {
            log::error!("Failed to create HTTP client for Google provider: {e}");
            BackendError::ConnectionError(format!("Failed to create HTTP client: {e}"))
        })?;

        let base_url = config
            .base_url
            .as_ref()
            .map(|url| url.as_str().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GOOGLE_API_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl GenerativeBackend for GoogleClient {
    async fn generate_content(
        &self,
        model: GeminiModel,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, BackendError> {
        let api_key = self.api_key.as_ref().ok_or(BackendError::MissingApiKey)?;

        // The key travels as a query parameter and stays out of the logged URL.
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        log::debug!("Sending request to Google API at URL: {url}");

        let body = sonic_rs::to_vec(&request).map_err(|e| {
            log::error!("Failed to serialize Google request: {e}");
            BackendError::Serialization(e.to_string())
        })?;

        if log::log_enabled!(log::Level::Debug) {
            let json = String::from_utf8_lossy(&body);

            let preview = if json.len() > 1000 {
                format!("{}... (truncated, {} bytes total)", json.chars().take(1000).collect::<String>(), json.len())
            } else {
                json.into_owned()
            };

            log::debug!("Google API request: {preview}");
        }

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.expose_secret())])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| BackendError::ConnectionError(format!("Failed to send request to Google: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Google API error ({status}): {error_text}");

            return Err(BackendError::from_status(status.as_u16(), error_text));
        }

        let response_text = response.text().await.map_err(|e| {
            log::error!("Failed to read Google response body: {e}");
            BackendError::ConnectionError(format!("Failed to read response body: {e}"))
        })?;

        let response: GenerateContentResponse = sonic_rs::from_str(&response_text).map_err(|e| {
            log::error!("Failed to parse Google generateContent response: {e}");
            log::error!("Full response text that failed to parse: {response_text}");

            BackendError::Serialization(e.to_string())
        })?;

        log::debug!(
            "Google API returned {} candidate(s) from {}",
            response.candidates.len(),
            response.model_version.as_deref().unwrap_or(model.as_str())
        );

        Ok(response)
    }
}
