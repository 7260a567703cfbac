//! HTTP client for the storefront admin API.
//!
//! Wraps `reqwest` with the admin API's conventions: JSON request bodies,
//! `200` or `201` on success, and every other status surfaced as
//! [`ClientError::UnexpectedStatus`]. The base URL comes from
//! [`AppConfig`] at construction; nothing here reads the environment.

mod categories;
mod products;

use std::time::Duration;

use catload_core::AppConfig;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Serialize;

use crate::error::ClientError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Client for the admin API.
///
/// Use [`AdminClient::new`] with the loaded configuration, or
/// [`AdminClient::with_base_url`] to point at a mock server in tests.
pub struct AdminClient {
    client: Client,
    base_url: Url,
}

impl AdminClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`AdminClient::with_base_url`].
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client for an explicit base URL.
    ///
    /// `timeout_secs` bounds each request end to end.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so that joining "api/..." appends to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    /// Sends a GET and returns the response once its status is accepted.
    async fn get(&self, path: &str) -> Result<(Url, Response), ClientError> {
        let url = self.endpoint(path)?;
        let response = self.client.get(url.clone()).send().await?;
        let response = check_status(&url, response)?;
        Ok((url, response))
    }

    /// POSTs `body` as JSON and returns the response once its status is
    /// accepted.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(Url, Response), ClientError> {
        let url = self.endpoint(path)?;
        let response = self.client.post(url.clone()).json(body).send().await?;
        let response = check_status(&url, response)?;
        Ok((url, response))
    }
}

/// The admin API answers `200` or `201` on success; anything else, including
/// other 2xx codes, is a failure.
fn is_accepted(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

fn check_status(url: &Url, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if is_accepted(status) {
        Ok(response)
    } else {
        Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
