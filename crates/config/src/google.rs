//! Settings for the Google Gemini backend.

use std::time::Duration;

use duration_str::deserialize_duration;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Connection settings for the Gemini `generateContent` API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoogleConfig {
    /// API key sent with every request.
    pub api_key: Option<SecretString>,

    /// Override for the API root, e.g. a proxy or a local mock.
    /// Defaults to `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: Option<Url>,

    /// Timeout for a single request, including reading the body.
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: Duration::from_secs(60),
        }
    }
}
