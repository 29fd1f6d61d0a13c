//! Personal Access Token handling.
//!
//! Azure DevOps accepts a PAT as the password of a Basic-auth pair with an empty
//! user name. The token stays inside a [`SecretString`] until the header is built.

use base64::Engine;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::error::{AzdoError, Result};

const REDACTED: &str = "[REDACTED]";

/// Personal Access Token for Azure DevOps.
#[derive(Clone)]
pub struct Token(SecretString);

impl Token {
    pub fn is_blank(&self) -> bool {
        self.0.expose_secret().trim().is_empty()
    }

    /// Builds the `Authorization` header value: `Basic base64(":" + token)`.
    pub fn basic_auth_header(&self) -> Result<HeaderValue> {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!(":{}", self.0.expose_secret()));

        // Base64 output is plain ASCII, so any token yields a valid header.
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|e| AzdoError::Config(format!("Failed to build Authorization header: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(SecretString::from(value.trim().to_string()))
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&REDACTED).finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
