// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{FlightDetail, Roster};
use serde::Serialize;

const HEADER: [&str; 8] = [
    "crew_id",
    "flight_id",
    "role",
    "duty_hours",
    "departure_time",
    "origin",
    "destination",
    "aircraft_type",
];

#[derive(Serialize)]
struct ExportRow<'a> {
    crew_id: &'a str,
    flight_id: &'a str,
    role: &'a str,
    duty_hours: f64,
    departure_time: &'a str,
    origin: Option<&'a str>,
    destination: Option<&'a str>,
    aircraft_type: Option<&'a str>,
}

/// Renders the roster as CSV, one row per assignment.
///
/// Assignments are left-joined with the flight details in the roster's
/// metrics; missing route or aircraft fields are written as empty cells.
/// The header row is always present, even for an empty roster.
///
/// # Errors
///
/// Returns `DomainError::ExportFailed` if a row cannot be written.
pub fn roster_csv(roster: &Roster) -> Result<String, DomainError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| DomainError::ExportFailed {
            reason: e.to_string(),
        })?;

    for assignment in &roster.assignments {
        let detail: Option<&FlightDetail> = roster.metrics.flight_detail(&assignment.flight_id);
        writer
            .serialize(ExportRow {
                crew_id: &assignment.crew_id,
                flight_id: &assignment.flight_id,
                role: &assignment.role,
                duty_hours: assignment.duty_hours,
                departure_time: &assignment.departure_time,
                origin: detail.and_then(|d| d.origin.as_deref()),
                destination: detail.and_then(|d| d.destination.as_deref()),
                aircraft_type: detail.and_then(|d| d.aircraft_type.as_deref()),
            })
            .map_err(|e| DomainError::ExportFailed {
                reason: e.to_string(),
            })?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| DomainError::ExportFailed {
        reason: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| DomainError::ExportFailed {
        reason: e.to_string(),
    })
}
