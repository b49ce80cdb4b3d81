//! Exchange with the analytics generation endpoints.

use std::time::Duration;

use repsim_core::BusinessMetrics;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

const GENERATE_PATH: &str = "api/v1/business-data";
const HEADLINE_PATH: &str = "api/v1/regenerate-headline";

/// Request/response contract between the store and the generator service.
///
/// The store is the only caller. Implementations own timeout policy; the
/// store imposes none of its own.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Run a full generation for the pair.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on endpoint rejection or exchange failure.
    async fn generate(&self, name: &str, location: &str)
        -> Result<BusinessMetrics, TransportError>;

    /// Recompute only the headline for the pair.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on endpoint rejection or exchange failure.
    async fn regenerate_headline(
        &self,
        name: &str,
        location: &str,
    ) -> Result<String, TransportError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    name: &'a str,
    location: &'a str,
}

#[derive(Debug, Deserialize)]
struct HeadlineResponse {
    headline: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP implementation of [`Transport`] against the repsim server.
pub struct HttpTransport {
    client: Client,
    generate_url: Url,
    headline_url: Url,
}

impl HttpTransport {
    /// Creates a transport pointed at `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TransportError::Endpoint`] if `base_url`
    /// is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("repsim/0.1 (reputation-analytics)")
            .build()?;

        // Keep exactly one trailing slash so joins append instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |e: &dyn std::fmt::Display| {
            TransportError::Endpoint(format!("invalid base URL '{base_url}': {e}"))
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(&e))?;
        let generate_url = base.join(GENERATE_PATH).map_err(|e| invalid(&e))?;
        let headline_url = base.join(HEADLINE_PATH).map_err(|e| invalid(&e))?;

        Ok(Self {
            client,
            generate_url,
            headline_url,
        })
    }

    /// Maps a non-2xx response to [`TransportError::Endpoint`], preferring
    /// the endpoint's own `message` body over a generic status string.
    async fn endpoint_error(response: reqwest::Response) -> TransportError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.message);
        TransportError::Endpoint(
            message.unwrap_or_else(|| format!("endpoint returned HTTP {status}")),
        )
    }
}

impl Transport for HttpTransport {
    async fn generate(
        &self,
        name: &str,
        location: &str,
    ) -> Result<BusinessMetrics, TransportError> {
        let response = self
            .client
            .post(self.generate_url.clone())
            .json(&GenerateRequest { name, location })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::endpoint_error(response).await);
        }

        Ok(response.json::<BusinessMetrics>().await?)
    }

    async fn regenerate_headline(
        &self,
        name: &str,
        location: &str,
    ) -> Result<String, TransportError> {
        let mut url = self.headline_url.clone();
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("location", location);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Self::endpoint_error(response).await);
        }

        Ok(response.json::<HeadlineResponse>().await?.headline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_builds_endpoint_urls() {
        let transport = HttpTransport::new("http://localhost:3000", 30).expect("transport");
        assert_eq!(
            transport.generate_url.as_str(),
            "http://localhost:3000/api/v1/business-data"
        );
        assert_eq!(
            transport.headline_url.as_str(),
            "http://localhost:3000/api/v1/regenerate-headline"
        );
    }

    #[test]
    fn constructor_strips_extra_trailing_slashes() {
        let transport = HttpTransport::new("http://localhost:3000///", 30).expect("transport");
        assert_eq!(
            transport.generate_url.as_str(),
            "http://localhost:3000/api/v1/business-data"
        );
    }

    #[test]
    fn constructor_rejects_garbage_base_url() {
        let result = HttpTransport::new("not a url", 30);
        assert!(matches!(result, Err(TransportError::Endpoint(_))));
    }
}
