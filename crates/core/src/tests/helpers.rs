// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EventSink, OptimizerService, RosterFetch, ServiceError, SessionEvent};
use crewdash_domain::{
    Assignment, DisruptionResult, DisruptionTarget, Metrics, Roster, SystemStats,
};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn create_test_assignment(crew_id: &str, flight_id: &str, duty_hours: f64) -> Assignment {
    Assignment {
        crew_id: String::from(crew_id),
        flight_id: String::from(flight_id),
        role: String::from("Captain"),
        duty_hours,
        departure_time: String::from("2025-08-01T06:00:00"),
    }
}

pub fn create_test_roster() -> Roster {
    Roster::new(
        vec![
            create_test_assignment("PIL0012", "6E1431", 9.5),
            create_test_assignment("PIL0012", "6E2280", 6.0),
            create_test_assignment("CAB0076", "6E1431", 4.0),
        ],
        Metrics {
            total_flights: 2,
            covered_flights: 2,
            total_crew: 3,
            crew_utilized: 2,
            max_duty_hours: 15.5,
            violations: 1,
            ..Metrics::default()
        },
    )
}

pub fn create_test_stats() -> SystemStats {
    SystemStats {
        total_flights: 2,
        total_crew: 3,
        active_crew: 3,
        ..SystemStats::default()
    }
}

pub fn create_test_result(crew_id: &str, flight_id: &str) -> DisruptionResult {
    DisruptionResult {
        removed_crew: String::from(crew_id),
        affected_flight: String::from(flight_id),
        recovery_score: 82.4,
        new_metrics: Metrics::default(),
        message: None,
    }
}

/// An optimizer that answers from fixed responses and records every call.
pub struct ScriptedService {
    pub roster: Mutex<Result<RosterFetch, ServiceError>>,
    pub stats: Result<SystemStats, ServiceError>,
    pub generate: Result<(), ServiceError>,
    pub disruption: Option<ServiceError>,
    pub calls: Mutex<Vec<String>>,
    /// When set, disruption calls wait for a notification before answering.
    pub disruption_gate: Option<Arc<Notify>>,
    /// When set, roster fetches wait for a notification before answering.
    pub roster_gate: Option<Arc<Notify>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            roster: Mutex::new(Ok(RosterFetch::Available(create_test_roster()))),
            stats: Ok(create_test_stats()),
            generate: Ok(()),
            disruption: None,
            calls: Mutex::new(Vec::new()),
            disruption_gate: None,
            roster_gate: None,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl OptimizerService for ScriptedService {
    fn fetch_roster(&self) -> impl Future<Output = Result<RosterFetch, ServiceError>> + Send {
        self.record(String::from("fetch_roster"));
        let response = self.roster.lock().unwrap().clone();
        let gate: Option<Arc<Notify>> = self.roster_gate.clone();
        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            response
        }
    }

    fn fetch_stats(&self) -> impl Future<Output = Result<SystemStats, ServiceError>> + Send {
        self.record(String::from("fetch_stats"));
        let response = self.stats.clone();
        async move { response }
    }

    fn generate_roster(&self) -> impl Future<Output = Result<(), ServiceError>> + Send {
        self.record(String::from("generate_roster"));
        let response = self.generate.clone();
        async move { response }
    }

    fn submit_disruption(
        &self,
        target: &DisruptionTarget,
    ) -> impl Future<Output = Result<DisruptionResult, ServiceError>> + Send {
        self.record(format!("submit_disruption {}/{}", target.crew_id, target.flight_id));
        let response = self.disruption.clone().map_or_else(
            || Ok(create_test_result(&target.crew_id, &target.flight_id)),
            Err,
        );
        let gate: Option<Arc<Notify>> = self.disruption_gate.clone();
        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            response
        }
    }
}

/// Collects published events.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<SessionEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}
