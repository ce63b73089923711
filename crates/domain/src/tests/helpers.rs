// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Assignment, FlightDetail, Metrics, Roster};

pub fn create_test_assignment(
    crew_id: &str,
    flight_id: &str,
    role: &str,
    duty_hours: f64,
    departure_time: &str,
) -> Assignment {
    Assignment {
        crew_id: String::from(crew_id),
        flight_id: String::from(flight_id),
        role: String::from(role),
        duty_hours,
        departure_time: String::from(departure_time),
    }
}

pub fn create_test_flight_detail(flight_id: &str, origin: &str, destination: &str) -> FlightDetail {
    FlightDetail {
        flight_id: String::from(flight_id),
        origin: Some(String::from(origin)),
        destination: Some(String::from(destination)),
        aircraft_type: Some(String::from("A320")),
    }
}

/// A small roster with one crew member over the duty limit.
pub fn create_test_assignments() -> Vec<Assignment> {
    vec![
        create_test_assignment("PIL0012", "6E1431", "Captain", 9.5, "2025-08-01T06:00:00"),
        create_test_assignment("CAB0076", "6E1431", "Cabin Crew", 4.0, "2025-08-01T06:00:00"),
        create_test_assignment("PIL0012", "6E2280", "First Officer", 6.0, "2025-08-02T09:30:00"),
        create_test_assignment("PIL0009", "I54264", "First Officer", 11.0, "2025-08-01T18:15:00"),
    ]
}

pub fn create_test_metrics() -> Metrics {
    Metrics {
        total_flights: 40,
        covered_flights: 38,
        coverage_percentage: 95.0,
        total_crew: 120,
        crew_utilized: 90,
        utilization_percentage: 75.0,
        max_duty_hours: 15.5,
        violations: 1,
        crew_over_12h: 12,
        crew_over_14h: 3,
        duplicate_assignments: 0,
        flight_details: vec![
            create_test_flight_detail("6E1431", "DEL", "BOM"),
            create_test_flight_detail("6E2280", "BOM", "BLR"),
        ],
        total_assignments: Some(4),
        avg_duty_hours: Some(7.6),
        aircraft_types_covered: vec![String::from("A320")],
    }
}

pub fn create_test_roster() -> Roster {
    Roster::new(create_test_assignments(), create_test_metrics())
}
