// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A disruption was requested without a crew identifier.
    MissingCrewId,
    /// A disruption was requested without a flight identifier.
    MissingFlightId,
    /// The configured viewer time zone is not a known IANA zone.
    UnknownTimezone(String),
    /// The roster could not be rendered as CSV.
    ExportFailed {
        /// Why the export failed.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCrewId => write!(f, "Crew ID is required to simulate a disruption"),
            Self::MissingFlightId => {
                write!(f, "Flight ID is required to simulate a disruption")
            }
            Self::UnknownTimezone(name) => write!(f, "Unknown time zone: '{name}'"),
            Self::ExportFailed { reason } => write!(f, "Roster export failed: {reason}"),
        }
    }
}

impl std::error::Error for DomainError {}
