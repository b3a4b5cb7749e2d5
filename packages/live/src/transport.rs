//! HTTP transport for provider requests.
//!
//! The fetcher talks to providers through [`JsonTransport`] so tests can
//! substitute a counting fake and assert that no request is made.

use async_trait::async_trait;

use crate::LiveError;

/// Issues a GET request and decodes the body as JSON.
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// Fetches `url` with `query` appended.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError`] on transport failure, non-success status, or
    /// an undecodable body.
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, LiveError>;
}

/// Production transport backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an existing client.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonTransport for ReqwestTransport {
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, LiveError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LiveError::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| LiveError::Parse {
            message: format!("{e} (received {} bytes)", text.len()),
        })
    }
}
