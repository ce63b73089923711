// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AppState, build_router};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use crewdash::{OptimizerService, RosterFetch, ServiceError};
use crewdash_domain::{
    Assignment, DisruptionResult, DisruptionTarget, FlightDetail, Metrics, Roster, SystemStats,
    ViewerZone,
};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tower::ServiceExt;

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

pub fn create_test_roster() -> Roster {
    Roster::new(
        vec![
            create_test_assignment("PIL0012", "6E1431", "Captain", 9.5, "2025-08-01T06:00:00"),
            create_test_assignment("PIL0012", "6E2280", "Captain", 6.0, "2025-08-02T09:30:00"),
            create_test_assignment("CAB0076", "6E1431", "Senior Crew", 4.0, "2025-08-01T06:00:00"),
            create_test_assignment("CAB0076", "6E1431", "Senior Crew", 4.0, "2025-08-01T06:00:00"),
        ],
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
            duplicate_assignments: 1,
            flight_details: vec![FlightDetail {
                flight_id: String::from("6E1431"),
                origin: Some(String::from("DEL")),
                destination: Some(String::from("BOM")),
                aircraft_type: Some(String::from("A320")),
            }],
            ..Metrics::default()
        },
    )
}

pub fn create_test_stats() -> SystemStats {
    SystemStats {
        total_flights: 40,
        total_crew: 120,
        active_crew: 110,
        crew_by_role: BTreeMap::from([
            (String::from("Captain"), 30),
            (String::from("Cabin Crew"), 60),
            (String::from("First Officer"), 30),
        ]),
        ..SystemStats::default()
    }
}

/// An optimizer that answers from fixed responses and records every call.
pub struct ScriptedOptimizer {
    pub roster: Mutex<Result<RosterFetch, ServiceError>>,
    pub stats: Result<SystemStats, ServiceError>,
    pub generate: Result<(), ServiceError>,
    pub disruption: Option<ServiceError>,
    pub calls: Arc<Mutex<Vec<String>>>,
    /// When set, disruption calls wait for a notification before answering.
    pub disruption_gate: Option<Arc<Notify>>,
    /// When set, roster fetches wait for a notification before answering.
    pub roster_gate: Option<Arc<Notify>>,
}

impl ScriptedOptimizer {
    pub fn new() -> Self {
        Self {
            roster: Mutex::new(Ok(RosterFetch::Available(create_test_roster()))),
            stats: Ok(create_test_stats()),
            generate: Ok(()),
            disruption: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            disruption_gate: None,
            roster_gate: None,
        }
    }

    pub fn without_roster() -> Self {
        Self {
            roster: Mutex::new(Ok(RosterFetch::Unavailable { status: 404 })),
            ..Self::new()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl OptimizerService for ScriptedOptimizer {
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
            || {
                Ok(DisruptionResult {
                    removed_crew: target.crew_id.clone(),
                    affected_flight: target.flight_id.clone(),
                    recovery_score: 82.4,
                    new_metrics: Metrics {
                        total_flights: 40,
                        covered_flights: 40,
                        crew_utilized: 91,
                        max_duty_hours: 14.5,
                        ..Metrics::default()
                    },
                    message: Some(String::from("Roster re-optimized")),
                })
            },
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

/// Builds app state around `optimizer` with the session already started.
pub async fn create_started_app_state(optimizer: ScriptedOptimizer) -> AppState<ScriptedOptimizer> {
    let app_state: AppState<ScriptedOptimizer> =
        AppState::new(optimizer, ViewerZone::parse("UTC").unwrap());
    app_state.session.start().await;
    app_state
}

pub async fn create_test_app(optimizer: ScriptedOptimizer) -> Router {
    build_router(create_started_app_state(optimizer).await)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body.to_string())).await
}

pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, None).await
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, serde_json::Value) {
    let request: Request<Body> = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, Body::from))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
