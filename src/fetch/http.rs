//! `reqwest`-backed fetcher

use reqwest::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;
use url::Url;

use super::{FetchResponse, Fetcher, ResponseMeta};
use crate::utils::{DEFAULT_REQUEST_TIMEOUT, USER_AGENT};
use crate::widget::errors::{RemoteSearchError, RemoteSearchResult};

/// HTTP fetcher with a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with its own connection pool
    ///
    /// # Errors
    ///
    /// Fails with `Configuration` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> RemoteSearchResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RemoteSearchError::Configuration(format!("HTTP client: {e}")))?;
        Ok(Self::with_client(client, timeout))
    }

    /// Reuse an existing client, e.g. one shared with the rest of the host
    #[must_use]
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::with_client(Client::new(), DEFAULT_REQUEST_TIMEOUT)
    }
}

impl Fetcher for HttpFetcher {
    async fn get_json(&self, url: Url) -> RemoteSearchResult<FetchResponse> {
        tracing::debug!(url = %url, "Issuing search request");

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteSearchError::Server {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let meta = ResponseMeta {
            url: response.url().to_string(),
            status: status.as_u16(),
        };
        let body = response.json().await?;

        Ok(FetchResponse { body, meta })
    }
}
