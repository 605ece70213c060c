// HEAD-request content type probe

use crate::errors::probe_error;
use playground_core::{ContentTypeProbe, PlaygroundConfig, ProbeError, ProbeFuture};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Probe issuing a HEAD request and reading the `content-type` header
///
/// In the browser the request goes through `fetch`, so cross-origin servers
/// without CORS headers surface as network errors.
#[derive(Debug, Clone)]
pub struct HttpContentTypeProbe {
    client: reqwest::Client,
}

impl HttpContentTypeProbe {
    /// Create a probe
    ///
    /// # Arguments
    /// * `timeout` - Request timeout (ignored in the browser, where fetch has none)
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let builder = reqwest::Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(timeout)
            .no_proxy(); // Disable proxy for localhost connections

        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        let client = builder.build().map_err(|e| probe_error(&e))?;
        Ok(Self { client })
    }

    pub fn from_config(config: &PlaygroundConfig) -> Result<Self, ProbeError> {
        Self::new(Duration::from_secs(config.probe_timeout_secs))
    }

    /// Send a HEAD request to `url`
    ///
    /// # Returns
    /// The declared content type, `None` if the header is missing.
    /// Non-success statuses are reported as [`ProbeError::Status`].
    pub async fn head_content_type(&self, url: &str) -> Result<Option<String>, ProbeError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| probe_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "probe returned error status");
            return Err(ProbeError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(content_type)
    }
}

impl ContentTypeProbe for HttpContentTypeProbe {
    fn content_type<'a>(&'a self, url: &'a str) -> ProbeFuture<'a, Result<Option<String>, ProbeError>> {
        Box::pin(self.head_content_type(url))
    }
}
