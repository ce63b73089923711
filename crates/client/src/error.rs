// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised while setting up the optimizer client.
///
/// Request failures are reported as `crewdash::ServiceError` instead.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid optimizer URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("optimizer URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
