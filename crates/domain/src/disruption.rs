// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::compliance::VIOLATION_THRESHOLD_HOURS;
use crate::error::DomainError;
use crate::types::Metrics;
use serde::{Deserialize, Serialize};

/// The crew member and flight a disruption removes.
///
/// Both identifiers are trimmed and non-empty. Construct through
/// [`validate_disruption_target`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisruptionTarget {
    pub crew_id: String,
    pub flight_id: String,
}

/// Validates the operator's disruption input.
///
/// The crew identifier is checked first.
///
/// # Errors
///
/// Returns `DomainError::MissingCrewId` or `DomainError::MissingFlightId` if
/// the respective field is empty after trimming.
pub fn validate_disruption_target(
    crew_id: &str,
    flight_id: &str,
) -> Result<DisruptionTarget, DomainError> {
    let crew_id: &str = crew_id.trim();
    if crew_id.is_empty() {
        return Err(DomainError::MissingCrewId);
    }

    let flight_id: &str = flight_id.trim();
    if flight_id.is_empty() {
        return Err(DomainError::MissingFlightId);
    }

    Ok(DisruptionTarget {
        crew_id: crew_id.to_string(),
        flight_id: flight_id.to_string(),
    })
}

/// The optimizer's answer to a disruption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptionResult {
    pub removed_crew: String,
    pub affected_flight: String,
    pub recovery_score: f64,
    /// Metrics of the re-optimized roster.
    #[serde(default)]
    pub new_metrics: Metrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DisruptionResult {
    #[must_use]
    pub fn summary(&self) -> DisruptionSummary {
        DisruptionSummary::from_result(self)
    }
}

/// Numbers shown after a disruption has been handled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisruptionSummary {
    pub recovery_score: f64,
    pub covered_flights: u32,
    pub total_flights: u32,
    pub violations: u32,
    pub crew_utilized: u32,
    pub max_duty_hours: f64,
    /// Set when the re-optimized roster has someone over 14 hours.
    pub max_duty_alert: bool,
    pub duplicate_assignments: u32,
}

impl DisruptionSummary {
    #[must_use]
    pub fn from_result(result: &DisruptionResult) -> Self {
        let metrics: &Metrics = &result.new_metrics;
        Self {
            recovery_score: result.recovery_score,
            covered_flights: metrics.covered_flights,
            total_flights: metrics.total_flights,
            violations: metrics.violations,
            crew_utilized: metrics.crew_utilized,
            max_duty_hours: metrics.max_duty_hours,
            max_duty_alert: metrics.max_duty_hours > VIOLATION_THRESHOLD_HOURS,
            duplicate_assignments: metrics.duplicate_assignments,
        }
    }
}

/// A preset scenario the operator can pick instead of typing identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleDisruption {
    pub crew_id: &'static str,
    pub flight_id: &'static str,
    pub description: &'static str,
}

const SAMPLES: [SampleDisruption; 3] = [
    SampleDisruption {
        crew_id: "PIL0012",
        flight_id: "6E1431",
        description: "Captain sickness on main flight",
    },
    SampleDisruption {
        crew_id: "CAB0076",
        flight_id: "6E2280",
        description: "Senior crew emergency leave",
    },
    SampleDisruption {
        crew_id: "PIL0009",
        flight_id: "I54264",
        description: "First Officer family emergency",
    },
];

/// Returns the preset disruption scenarios.
#[must_use]
pub const fn sample_disruptions() -> &'static [SampleDisruption] {
    &SAMPLES
}
