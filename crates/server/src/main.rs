// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{FromRef, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use clap::Parser;
use crewdash::{
    CoreError, DisruptionFailure, DisruptionOutcome, DisruptionPhase, EventSink, OptimizerService,
    RefreshStatus, RosterAvailability, Session, ViewState,
};
use crewdash_chat::{ChatExchange, ChatMessage};
use crewdash_client::{ClientConfig, DEFAULT_TIMEOUT, HttpOptimizerClient};
use crewdash_domain::{
    CrewGroup, DisruptionResult, DisruptionSummary, DisruptionTarget, DomainError, DuplicatePair,
    FlightGroup, MetricsOverview, SampleDisruption, StatsBreakdown, SummaryCounts, ViewerZone,
    sample_disruptions,
};
use live::{LiveEventBroadcaster, live_events_handler};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Crew Dashboard Server - backend for the crew scheduling dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the roster optimizer service
    #[arg(long, default_value = "http://localhost:8000")]
    service_url: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// IANA time zone used to bucket departures by date, or `local`
    #[arg(long, default_value = "local")]
    timezone: String,

    /// Timeout for each optimizer request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    request_timeout_secs: u64,

    /// Do not fetch the roster and stats on startup
    #[arg(long)]
    skip_initial_fetch: bool,
}

/// Application state shared across handlers.
///
/// Generic over the optimizer so the router can be exercised against a
/// scripted service.
struct AppState<S> {
    /// The dashboard session.
    session: Session<S>,
    /// Fan-out for live events; also the session's event sink.
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            broadcaster: Arc::clone(&self.broadcaster),
        }
    }
}

impl<S> FromRef<AppState<S>> for Arc<LiveEventBroadcaster> {
    fn from_ref(app_state: &AppState<S>) -> Self {
        Arc::clone(&app_state.broadcaster)
    }
}

impl<S: OptimizerService> AppState<S> {
    /// Wires a session to a fresh broadcaster.
    fn new(service: S, zone: ViewerZone) -> Self {
        let broadcaster: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
        let session: Session<S> = Session::new(
            ViewState::new(zone),
            Arc::new(service),
            Arc::clone(&broadcaster) as Arc<dyn EventSink>,
        );
        Self {
            session,
            broadcaster,
        }
    }
}

/// Query parameters for the crew view.
#[derive(Debug, Default, Deserialize)]
struct CrewQuery {
    #[serde(default)]
    q: String,
}

/// Query parameters for the flight view.
#[derive(Debug, Default, Deserialize)]
struct FlightQuery {
    #[serde(default)]
    q: String,
    /// Departure date in the viewer zone, `YYYY-MM-DD`.
    #[serde(default)]
    date: Option<String>,
}

/// API request for simulating a disruption.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DisruptionApiRequest {
    #[serde(default)]
    crew_id: String,
    #[serde(default)]
    flight_id: String,
}

/// API request for sending a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatApiRequest {
    #[serde(default)]
    text: String,
}

/// Session summary returned by `/state` and by every command endpoint.
#[derive(Debug, Clone, Serialize)]
struct StateResponse {
    availability: &'static str,
    loading: bool,
    generating: bool,
    /// The dismissible banner, if any.
    error: Option<String>,
    assignments: usize,
    timezone: String,
    chat_messages: usize,
    disruption: DisruptionStateResponse,
}

#[derive(Debug, Clone, Serialize)]
struct DisruptionStateResponse {
    phase: &'static str,
    /// The submission currently outstanding.
    target: Option<DisruptionTarget>,
    can_submit: bool,
    settled: bool,
    outcome: Option<OutcomeResponse>,
    refresh: RefreshResponse,
}

#[derive(Debug, Clone, Serialize)]
struct OutcomeResponse {
    succeeded: bool,
    message: Option<String>,
    result: Option<DisruptionResult>,
    summary: Option<DisruptionSummary>,
}

#[derive(Debug, Clone, Serialize)]
struct RefreshResponse {
    status: &'static str,
    message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct OverviewResponse {
    availability: &'static str,
    overview: Option<MetricsOverview>,
    /// Max duty total is over the 14 hour limit, below the alert level or not.
    duty_limit_exceeded: bool,
}

#[derive(Debug, Clone, Serialize)]
struct CrewViewResponse {
    availability: &'static str,
    query: String,
    crew: BTreeMap<String, CrewGroup>,
    /// Matching crew whose duty total is a violation.
    violations: usize,
    /// Bucket counts over all crew, regardless of the query.
    summary_counts: SummaryCounts,
}

#[derive(Debug, Clone, Serialize)]
struct FlightViewResponse {
    availability: &'static str,
    query: String,
    /// The applied date filter, `YYYY-MM-DD`.
    date: Option<String>,
    flights: BTreeMap<String, FlightGroup>,
}

#[derive(Debug, Clone, Serialize)]
struct StatsViewResponse {
    stats: Option<StatsBreakdown>,
}

#[derive(Debug, Clone, Serialize)]
struct DuplicatesResponse {
    availability: &'static str,
    duplicates: Vec<DuplicatePair>,
    /// Assignments beyond the first of each repeated pair, counted locally.
    extra_assignments: usize,
    /// The service's own duplicate count, if a roster is loaded.
    reported: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
struct SamplesResponse {
    samples: &'static [SampleDisruption],
}

#[derive(Debug, Clone, Serialize)]
struct DisruptionApiResponse {
    result: DisruptionResult,
    summary: DisruptionSummary,
    refresh: RefreshResponse,
}

#[derive(Debug, Clone, Serialize)]
struct ChatLogResponse {
    messages: Vec<ChatMessage>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingCrewId
            | DomainError::MissingFlightId
            | DomainError::UnknownTimezone(_) => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            DomainError::ExportFailed { .. } => {
                error!(error = %err, "Export failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DomainViolation(domain) => Self::from(domain),
            CoreError::DisruptionInFlight | CoreError::GenerationInFlight => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            CoreError::MissingOutcome => {
                error!(error = %err, "Disruption outcome lost");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<DisruptionFailure> for HttpError {
    fn from(failure: DisruptionFailure) -> Self {
        match failure {
            DisruptionFailure::Invalid(err) => Self::from(err),
            DisruptionFailure::Service(ref err) => {
                warn!(error = %err, "Disruption rejected by optimizer");
                Self {
                    status: StatusCode::BAD_GATEWAY,
                    message: failure.to_string(),
                }
            }
        }
    }
}

const fn availability_label(availability: RosterAvailability) -> &'static str {
    match availability {
        RosterAvailability::Unknown => "unknown",
        RosterAvailability::Available => "available",
        RosterAvailability::Unavailable => "unavailable",
    }
}

fn refresh_to_response(refresh: &RefreshStatus) -> RefreshResponse {
    match refresh {
        RefreshStatus::NotRequested => RefreshResponse {
            status: "not_requested",
            message: None,
        },
        RefreshStatus::Pending { .. } => RefreshResponse {
            status: "pending",
            message: None,
        },
        RefreshStatus::Completed => RefreshResponse {
            status: "completed",
            message: None,
        },
        RefreshStatus::Failed(message) => RefreshResponse {
            status: "failed",
            message: Some(message.clone()),
        },
    }
}

fn outcome_to_response(outcome: &DisruptionOutcome) -> OutcomeResponse {
    match outcome {
        DisruptionOutcome::Succeeded(result) => OutcomeResponse {
            succeeded: true,
            message: result.message.clone(),
            result: Some(result.clone()),
            summary: Some(result.summary()),
        },
        DisruptionOutcome::Failed(failure) => OutcomeResponse {
            succeeded: false,
            message: Some(failure.to_string()),
            result: None,
            summary: None,
        },
    }
}

/// Converts a `ViewState` to a `StateResponse`.
fn state_to_response(state: &ViewState) -> StateResponse {
    let orchestrator = &state.disruption;
    let (phase, target): (&'static str, Option<DisruptionTarget>) = match orchestrator.phase() {
        DisruptionPhase::Idle => ("idle", None),
        DisruptionPhase::Submitting(target) => ("submitting", Some(target.clone())),
    };

    StateResponse {
        availability: availability_label(state.availability),
        loading: state.is_loading(),
        generating: state.generating,
        error: state.error.clone(),
        assignments: state.roster.as_ref().map_or(0, |r| r.assignments.len()),
        timezone: state.zone.to_string(),
        chat_messages: state.chat.len(),
        disruption: DisruptionStateResponse {
            phase,
            target,
            can_submit: orchestrator.can_submit(),
            settled: orchestrator.is_settled(),
            outcome: orchestrator.outcome().map(outcome_to_response),
            refresh: refresh_to_response(orchestrator.refresh()),
        },
    }
}

/// Parses an optional `YYYY-MM-DD` date. Blank input means no filter.
fn parse_date_filter(date: Option<&str>) -> Result<Option<NaiveDate>, HttpError> {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid date: '{raw}'. Expected YYYY-MM-DD"),
        })
}

/// Handler for GET `/state` endpoint.
async fn handle_get_state<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Json<StateResponse> {
    Json(app_state.session.read(state_to_response).await)
}

/// Handler for GET `/views/overview` endpoint.
async fn handle_overview<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Json<OverviewResponse> {
    let response: OverviewResponse = app_state
        .session
        .read(|state| {
            let overview: Option<MetricsOverview> = state.overview();
            OverviewResponse {
                availability: availability_label(state.availability),
                duty_limit_exceeded: overview
                    .as_ref()
                    .is_some_and(MetricsOverview::exceeds_duty_limit),
                overview,
            }
        })
        .await;
    Json(response)
}

/// Handler for GET `/views/crew` endpoint.
///
/// Filters crew groups by identifier; the summary counts always cover the
/// whole roster.
async fn handle_crew_view<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
    Query(query): Query<CrewQuery>,
) -> Json<CrewViewResponse> {
    let response: CrewViewResponse = app_state
        .session
        .read(|state| {
            let crew: BTreeMap<String, CrewGroup> = state.crew_view(&query.q);
            CrewViewResponse {
                availability: availability_label(state.availability),
                violations: crew
                    .values()
                    .filter(|group| group.compliance_level.is_violation())
                    .count(),
                crew,
                summary_counts: state.crew_summary(),
                query: query.q.clone(),
            }
        })
        .await;
    Json(response)
}

/// Handler for GET `/views/flights` endpoint.
async fn handle_flight_view<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
    Query(query): Query<FlightQuery>,
) -> Result<Json<FlightViewResponse>, HttpError> {
    let date: Option<NaiveDate> = parse_date_filter(query.date.as_deref())?;

    let response: FlightViewResponse = app_state
        .session
        .read(|state| FlightViewResponse {
            availability: availability_label(state.availability),
            flights: state.flight_view(&query.q, date),
            query: query.q.clone(),
            date: date.map(|d| d.to_string()),
        })
        .await;
    Ok(Json(response))
}

/// Handler for GET `/views/stats` endpoint.
async fn handle_stats_view<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Json<StatsViewResponse> {
    let stats: Option<StatsBreakdown> = app_state.session.read(ViewState::stats_view).await;
    Json(StatsViewResponse { stats })
}

/// Handler for GET `/views/duplicates` endpoint.
async fn handle_duplicates<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Json<DuplicatesResponse> {
    let response: DuplicatesResponse = app_state
        .session
        .read(|state| {
            let duplicates: Vec<DuplicatePair> = state.duplicates();
            DuplicatesResponse {
                availability: availability_label(state.availability),
                extra_assignments: duplicates.iter().map(DuplicatePair::extra).sum(),
                reported: state
                    .roster
                    .as_ref()
                    .map(|roster| roster.metrics.duplicate_assignments),
                duplicates,
            }
        })
        .await;
    Json(response)
}

/// Handler for GET `/export/roster.csv` endpoint.
async fn handle_export_csv<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Result<Response, HttpError> {
    let csv: Option<String> = app_state.session.read(ViewState::roster_csv).await?;

    let Some(csv) = csv else {
        return Err(HttpError {
            status: StatusCode::NOT_FOUND,
            message: String::from("No roster available. Generate one first."),
        });
    };

    info!(bytes = csv.len(), "Exported roster");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"roster.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Handler for GET `/disruptions/samples` endpoint.
#[allow(clippy::unused_async)]
async fn handle_samples() -> Json<SamplesResponse> {
    Json(SamplesResponse {
        samples: sample_disruptions(),
    })
}

/// Handler for POST `/roster/generate` endpoint.
///
/// Waits for generation and the follow-up refresh. A service failure is
/// reported through the banner in the returned state.
async fn handle_generate<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Result<Json<StateResponse>, HttpError> {
    info!("Roster generation requested");
    app_state.session.generate().await?;
    Ok(Json(app_state.session.read(state_to_response).await))
}

/// Handler for POST `/roster/refresh` endpoint.
async fn handle_refresh<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Result<Json<StateResponse>, HttpError> {
    app_state.session.refresh().await?;
    Ok(Json(app_state.session.read(state_to_response).await))
}

/// Handler for POST `/disruptions` endpoint.
///
/// Returns once the disruption and its roster refresh have settled.
async fn handle_disruption<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
    Json(req): Json<DisruptionApiRequest>,
) -> Result<Json<DisruptionApiResponse>, HttpError> {
    info!(
        crew_id = %req.crew_id,
        flight_id = %req.flight_id,
        "Disruption requested"
    );

    let outcome: DisruptionOutcome = app_state
        .session
        .submit_disruption(&req.crew_id, &req.flight_id)
        .await?;

    match outcome {
        DisruptionOutcome::Succeeded(result) => {
            let refresh: RefreshResponse = app_state
                .session
                .read(|state| refresh_to_response(state.disruption.refresh()))
                .await;
            Ok(Json(DisruptionApiResponse {
                summary: result.summary(),
                result,
                refresh,
            }))
        }
        DisruptionOutcome::Failed(failure) => Err(HttpError::from(failure)),
    }
}

/// Handler for POST `/chat` endpoint.
///
/// Blank messages are ignored and answered with `204 No Content`.
async fn handle_post_chat<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
    Json(req): Json<ChatApiRequest>,
) -> Response {
    match app_state.session.chat(&req.text).await {
        Some(exchange) => Json::<ChatExchange>(exchange).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Handler for GET `/chat` endpoint.
async fn handle_get_chat<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Json<ChatLogResponse> {
    let messages: Vec<ChatMessage> = app_state
        .session
        .read(|state| state.chat.messages().to_vec())
        .await;
    Json(ChatLogResponse { messages })
}

/// Handler for POST `/state/dismiss-error` endpoint.
async fn handle_dismiss_error<S: OptimizerService + 'static>(
    AxumState(app_state): AxumState<AppState<S>>,
) -> Json<StateResponse> {
    app_state.session.dismiss_error().await;
    Json(app_state.session.read(state_to_response).await)
}

/// Builds the application router with all endpoints.
fn build_router<S: OptimizerService + 'static>(app_state: AppState<S>) -> Router {
    Router::new()
        .route("/state", get(handle_get_state::<S>))
        .route("/state/dismiss-error", post(handle_dismiss_error::<S>))
        .route("/views/overview", get(handle_overview::<S>))
        .route("/views/crew", get(handle_crew_view::<S>))
        .route("/views/flights", get(handle_flight_view::<S>))
        .route("/views/stats", get(handle_stats_view::<S>))
        .route("/views/duplicates", get(handle_duplicates::<S>))
        .route("/export/roster.csv", get(handle_export_csv::<S>))
        .route("/roster/generate", post(handle_generate::<S>))
        .route("/roster/refresh", post(handle_refresh::<S>))
        .route("/disruptions", post(handle_disruption::<S>))
        .route("/disruptions/samples", get(handle_samples))
        .route("/chat", get(handle_get_chat::<S>).post(handle_post_chat::<S>))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Crew Dashboard Server");

    let zone: ViewerZone = ViewerZone::parse(&args.timezone)?;
    let config: ClientConfig = ClientConfig::new(
        &args.service_url,
        Duration::from_secs(args.request_timeout_secs),
    )?;
    let client: HttpOptimizerClient = HttpOptimizerClient::new(&config)?;
    info!(
        service_url = %config.base_url(),
        timeout_secs = args.request_timeout_secs,
        timezone = %zone,
        "Optimizer client configured"
    );

    let app_state: AppState<HttpOptimizerClient> = AppState::new(client, zone);

    if args.skip_initial_fetch {
        info!("Skipping initial roster fetch");
    } else {
        let session: Session<HttpOptimizerClient> = app_state.session.clone();
        tokio::spawn(async move { session.start().await });
    }

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = std::net::SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
