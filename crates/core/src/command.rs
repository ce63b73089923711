// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ServiceError;
use crewdash_domain::{DisruptionResult, DisruptionTarget, Roster, SystemStats};
use time::OffsetDateTime;

/// Why a roster or stats fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Session start or an operator refresh.
    Session,
    /// Follow-up to a successful roster generation.
    Generation,
    /// Follow-up to a successful disruption.
    DisruptionRefresh,
}

/// Result of `GET /api/roster` that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterFetch {
    /// The service returned a roster.
    Available(Roster),
    /// The service answered with a non-success status; no roster exists yet.
    Unavailable { status: u16 },
}

/// A message is operator intent or a service completion, as data only.
///
/// Messages are the only way to change the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The dashboard opened.
    SessionStarted,
    /// The operator asked to re-fetch roster and stats.
    RefreshRequested,
    /// The operator asked the service to generate a new roster.
    GenerateRequested,
    GenerateCompleted(Result<(), ServiceError>),
    RosterFetched {
        origin: FetchOrigin,
        result: Result<RosterFetch, ServiceError>,
    },
    StatsFetched {
        origin: FetchOrigin,
        result: Result<SystemStats, ServiceError>,
    },
    /// The operator submitted the disruption form.
    DisruptionRequested { crew_id: String, flight_id: String },
    DisruptionCompleted(Result<DisruptionResult, ServiceError>),
    /// The operator sent a chat message.
    ChatSubmitted {
        text: String,
        received_at: OffsetDateTime,
    },
    /// The operator closed the error banner.
    DismissError,
}

/// Work the session driver must perform on behalf of a transition.
///
/// Every effect completes with exactly one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchRoster(FetchOrigin),
    FetchStats(FetchOrigin),
    GenerateRoster,
    SubmitDisruption(DisruptionTarget),
}
