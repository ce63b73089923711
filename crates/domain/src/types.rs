// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire-shaped roster types as produced by the optimizer service.
//!
//! Every field that the service may omit carries a serde default. A metrics
//! object for an empty roster arrives as `{}` and must still decode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single crew-to-flight assignment.
///
/// The identity key is `(crew_id, flight_id)`. The same pair may appear more
/// than once; duplicates are kept and counted, never collapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The crew member identifier (e.g. `PIL0012`).
    pub crew_id: String,
    /// The flight identifier (e.g. `6E1431`).
    pub flight_id: String,
    /// The role the crew member flies in.
    #[serde(default)]
    pub role: String,
    /// Duty hours attributed to this assignment.
    #[serde(default)]
    pub duty_hours: f64,
    /// ISO-8601 departure timestamp, with or without an offset.
    #[serde(default)]
    pub departure_time: String,
}

impl Assignment {
    /// Returns the identity key of this assignment.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.crew_id, &self.flight_id)
    }
}

/// Route and equipment metadata for one flight.
///
/// The service builds these with a left join, so individual fields can be
/// null when the flight is missing from its schedule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetail {
    /// The flight identifier.
    pub flight_id: String,
    /// Origin airport code.
    #[serde(default)]
    pub origin: Option<String>,
    /// Destination airport code.
    #[serde(default)]
    pub destination: Option<String>,
    /// Aircraft type.
    #[serde(default)]
    pub aircraft_type: Option<String>,
}

/// Summary metrics computed by the optimizer for one roster.
///
/// The dashboard never recomputes these numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub total_flights: u32,
    pub covered_flights: u32,
    pub coverage_percentage: f64,
    pub total_crew: u32,
    pub crew_utilized: u32,
    pub utilization_percentage: f64,
    pub max_duty_hours: f64,
    pub violations: u32,
    pub crew_over_12h: u32,
    pub crew_over_14h: u32,
    pub duplicate_assignments: u32,
    pub flight_details: Vec<FlightDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_assignments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duty_hours: Option<f64>,
    pub aircraft_types_covered: Vec<String>,
}

impl Metrics {
    /// Looks up the flight detail for a flight, if the service sent one.
    #[must_use]
    pub fn flight_detail(&self, flight_id: &str) -> Option<&FlightDetail> {
        self.flight_details.iter().find(|d| d.flight_id == flight_id)
    }
}

/// A roster: the assignment list plus the optimizer's metrics.
///
/// On the wire the assignment list is keyed `roster`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// All assignments, in service order.
    #[serde(rename = "roster", alias = "assignments", default)]
    pub assignments: Vec<Assignment>,
    /// Service-computed metrics.
    #[serde(default)]
    pub metrics: Metrics,
}

impl Roster {
    /// Creates a roster from its parts.
    #[must_use]
    pub const fn new(assignments: Vec<Assignment>, metrics: Metrics) -> Self {
        Self {
            assignments,
            metrics,
        }
    }
}

/// Fleet and crew statistics from `GET /api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStats {
    pub total_flights: u32,
    pub total_crew: u32,
    pub active_crew: u32,
    pub crew_by_role: BTreeMap<String, u32>,
    pub flights_by_aircraft: BTreeMap<String, u32>,
    pub flights_by_origin: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew_preferences: Option<u32>,
    /// Metrics for the most recently generated roster, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_roster: Option<Metrics>,
}
