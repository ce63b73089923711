// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::RosterFetch;
use crate::error::ServiceError;
use crate::state::SessionEvent;
use crewdash_domain::{DisruptionResult, DisruptionTarget, SystemStats};
use std::future::Future;

/// The external roster optimizer.
///
/// Implementations convert every transport or protocol failure into a
/// `ServiceError`; they never panic and never retry.
pub trait OptimizerService: Send + Sync {
    /// `GET /api/roster`. A non-success status is `RosterFetch::Unavailable`.
    fn fetch_roster(&self) -> impl Future<Output = Result<RosterFetch, ServiceError>> + Send;

    /// `GET /api/stats`.
    fn fetch_stats(&self) -> impl Future<Output = Result<SystemStats, ServiceError>> + Send;

    /// `POST /api/generate-roster`.
    fn generate_roster(&self) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// `POST /api/disrupt/{crew_id}/{flight_id}`.
    fn submit_disruption(
        &self,
        target: &DisruptionTarget,
    ) -> impl Future<Output = Result<DisruptionResult, ServiceError>> + Send;
}

/// Receives session events after each applied transition.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: SessionEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn publish(&self, _event: SessionEvent) {}
}
