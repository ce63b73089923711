// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewdash_domain::DomainError;

/// Errors that reject a message without changing the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A disruption or the refresh after it is still outstanding.
    DisruptionInFlight,
    /// A roster generation is already running.
    GenerationInFlight,
    /// An accepted disruption finished without emitting its outcome event.
    MissingOutcome,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::DisruptionInFlight => {
                write!(f, "A disruption simulation is already in progress")
            }
            Self::GenerationInFlight => write!(f, "Roster generation is already in progress"),
            Self::MissingOutcome => {
                write!(f, "Disruption finished without reporting an outcome")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// A failed call to the optimizer service, as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The service could not be reached.
    #[error("optimizer service unreachable: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("optimizer service returned HTTP {status}")]
    Status { status: u16 },
    /// The response body could not be decoded.
    #[error("could not decode optimizer response: {0}")]
    Decode(String),
    /// The request did not complete in time.
    #[error("optimizer service timed out")]
    Timeout,
}

impl ServiceError {
    /// Returns `true` for failures where the service never answered.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}
