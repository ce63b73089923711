// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ClientError;
use reqwest::Url;
use std::time::Duration;

/// Applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the optimizer lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
}

impl ClientConfig {
    /// Parses and validates the optimizer base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not http(s).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url: Url = Url::parse(base_url.trim()).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        match base_url.scheme() {
            "http" | "https" => Ok(Self { base_url, timeout }),
            other => Err(ClientError::UnsupportedScheme(other.to_string())),
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
