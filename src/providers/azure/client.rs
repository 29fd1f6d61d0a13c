use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::auth::Token;
use crate::error::{AzdoError, Result};

const USER_AGENT: &str = concat!("azdo/", env!("CARGO_PKG_VERSION"));

/// Authenticated HTTP client for the Azure DevOps REST API.
///
/// Every request carries `Authorization: Basic base64(":" + pat)` and is bound
/// by the timeout given at construction. One call is one request: nothing is
/// retried.
pub struct AzureDevOpsClient {
    client: Client,
    base_url: Url,
}

impl AzureDevOpsClient {
    pub fn new(base_url: &str, token: &Token, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, token.basic_auth_header()?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AzdoError::Config(format!("Failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| AzdoError::Config(format!("Invalid base URL: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends one request and returns the decoded JSON body of a 2xx response.
    ///
    /// An empty 2xx body decodes to `Value::Null`. Non-2xx statuses, transport
    /// errors, timeouts and undecodable bodies all map to
    /// [`AzdoError::UpstreamRequestFailed`].
    pub async fn invoke(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value> {
        let endpoint = url.to_string();
        debug!("{method} {endpoint}");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("request timed out: {e}")
            } else {
                format!("transport error: {e}")
            };
            AzdoError::UpstreamRequestFailed {
                endpoint: endpoint.clone(),
                status: None,
                message,
            }
        })?;

        let status = response.status();
        debug!("{endpoint} answered {status}");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AzdoError::UpstreamRequestFailed {
                endpoint: endpoint.clone(),
                status: Some(status.as_u16()),
                message: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            let message = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("no response body")
                    .to_string()
            } else {
                text
            };
            return Err(AzdoError::UpstreamRequestFailed {
                endpoint,
                status: Some(status.as_u16()),
                message,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| AzdoError::UpstreamRequestFailed {
            endpoint,
            status: Some(status.as_u16()),
            message: format!("response body is not valid JSON: {e}"),
        })
    }
}
