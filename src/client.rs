//! Conversation API client
//!
//! HTTP implementation of [`MicroagentSource`] against the conversation
//! server: `GET {base}/api/conversations/{id}/microagents`.

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::query::MicroagentSource;
use crate::state::Microagent;
use async_trait::async_trait;
use serde::Deserialize;

/// Header carrying the session key on authenticated servers
pub const SESSION_API_KEY_HEADER: &str = "X-Session-API-Key";

#[derive(Debug, Deserialize)]
struct MicroagentsResponse {
    microagents: Vec<Microagent>,
}

/// Fetches microagents over HTTP
#[derive(Debug, Clone)]
pub struct HttpMicroagentSource {
    client: reqwest::Client,
    base_url: reqwest::Url,
    session_api_key: Option<String>,
}

impl HttpMicroagentSource {
    /// Build a source from API configuration
    ///
    /// # Errors
    /// * `FetchError::InvalidBaseUrl` if `base_url` is not an absolute URL
    /// * `FetchError::Request` if the HTTP client cannot be constructed
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Self::with_client(client, &config.base_url, config.session_api_key.clone())
    }

    /// Build a source around an existing client (shared connection pool)
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        session_api_key: Option<String>,
    ) -> Result<Self, FetchError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| FetchError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url: parsed,
            session_api_key,
        })
    }

    /// Endpoint for `conversation_id`. The id is pushed as a single
    /// percent-encoded path segment.
    fn microagents_url(&self, conversation_id: &str) -> Result<reqwest::Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "conversations", conversation_id, "microagents"]);
        Ok(url)
    }
}

#[async_trait]
impl MicroagentSource for HttpMicroagentSource {
    async fn list_microagents(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<Microagent>, FetchError> {
        let conversation_id = conversation_id.trim();
        if conversation_id.is_empty() {
            return Err(FetchError::MissingConversationId);
        }

        let url = self.microagents_url(conversation_id)?;
        tracing::debug!(url = %url, "Requesting microagents");

        let mut request = self.client.get(url);
        if let Some(key) = &self.session_api_key {
            request = request.header(SESSION_API_KEY_HEADER, key);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!(
                status_code = status.as_u16(),
                error_body = %body,
                "Conversation API returned error status"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: MicroagentsResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            count = parsed.microagents.len(),
            "Received microagents from conversation API"
        );

        Ok(parsed.microagents)
    }
}
