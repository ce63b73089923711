// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Disruption lifecycle.
//!
//! `Idle -> Submitting -> {Succeeded | Failed} -> Idle`. Only one submission
//! may be outstanding. A successful submission starts a roster and stats
//! refresh that is tracked on its own, so a refresh failure never rewrites
//! the submission outcome. The next submission waits for that refresh.

use crate::error::{CoreError, ServiceError};
use crewdash_domain::{DisruptionResult, DisruptionTarget, DomainError, validate_disruption_target};

/// Whether a submission is outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisruptionPhase {
    #[default]
    Idle,
    Submitting(DisruptionTarget),
}

/// Why a disruption attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisruptionFailure {
    /// The operator input was rejected before contacting the service.
    Invalid(DomainError),
    /// The service call failed.
    Service(ServiceError),
}

impl std::fmt::Display for DisruptionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Service(err) if err.is_transport() => write!(f, "Failed to connect to server"),
            Self::Service(_) => write!(f, "Failed to simulate disruption"),
        }
    }
}

/// The most recent attempt's result.
#[derive(Debug, Clone, PartialEq)]
pub enum DisruptionOutcome {
    Succeeded(DisruptionResult),
    Failed(DisruptionFailure),
}

/// Progress of the refresh that follows a successful disruption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RefreshStatus {
    #[default]
    NotRequested,
    Pending {
        roster_done: bool,
        stats_done: bool,
        failure: Option<String>,
    },
    Completed,
    Failed(String),
}

impl RefreshStatus {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Tracks one disruption at a time plus its follow-up refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisruptionOrchestrator {
    phase: DisruptionPhase,
    outcome: Option<DisruptionOutcome>,
    refresh: RefreshStatus,
}

impl DisruptionOrchestrator {
    #[must_use]
    pub const fn phase(&self) -> &DisruptionPhase {
        &self.phase
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&DisruptionOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub const fn refresh(&self) -> &RefreshStatus {
        &self.refresh
    }

    /// No submission and no disruption-triggered refresh is pending.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self.phase, DisruptionPhase::Idle) && !self.refresh.is_pending()
    }

    /// The submit control is enabled only once the previous attempt has
    /// settled, refresh included. Refresh completions carry no attempt
    /// identity, so two refreshes must never overlap.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.is_settled()
    }

    /// Starts a submission.
    ///
    /// Returns the validated target to submit, or `None` if the input was
    /// rejected; the rejection is recorded as a failed outcome and the phase
    /// stays `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DisruptionInFlight` if a submission or the refresh
    /// following the last one is still outstanding. Nothing is changed in
    /// that case.
    pub fn begin(
        &mut self,
        crew_id: &str,
        flight_id: &str,
    ) -> Result<Option<DisruptionTarget>, CoreError> {
        if !self.can_submit() {
            return Err(CoreError::DisruptionInFlight);
        }

        self.refresh = RefreshStatus::NotRequested;
        match validate_disruption_target(crew_id, flight_id) {
            Ok(target) => {
                self.outcome = None;
                self.phase = DisruptionPhase::Submitting(target.clone());
                Ok(Some(target))
            }
            Err(err) => {
                self.outcome = Some(DisruptionOutcome::Failed(DisruptionFailure::Invalid(err)));
                Ok(None)
            }
        }
    }

    /// Records the service's answer and returns to `Idle`.
    ///
    /// Returns `true` if a refresh must now be issued.
    pub fn complete(&mut self, result: Result<DisruptionResult, ServiceError>) -> bool {
        self.phase = DisruptionPhase::Idle;
        match result {
            Ok(result) => {
                self.outcome = Some(DisruptionOutcome::Succeeded(result));
                self.refresh = RefreshStatus::Pending {
                    roster_done: false,
                    stats_done: false,
                    failure: None,
                };
                true
            }
            Err(err) => {
                self.outcome = Some(DisruptionOutcome::Failed(DisruptionFailure::Service(err)));
                false
            }
        }
    }

    /// Records the refresh roster fetch. Returns the final status once the
    /// refresh has settled.
    pub fn record_roster_refresh(&mut self, failure: Option<String>) -> Option<&RefreshStatus> {
        self.record_refresh_part(true, failure)
    }

    /// Records the refresh stats fetch. Returns the final status once the
    /// refresh has settled.
    pub fn record_stats_refresh(&mut self, failure: Option<String>) -> Option<&RefreshStatus> {
        self.record_refresh_part(false, failure)
    }

    fn record_refresh_part(
        &mut self,
        is_roster: bool,
        new_failure: Option<String>,
    ) -> Option<&RefreshStatus> {
        let RefreshStatus::Pending {
            roster_done,
            stats_done,
            failure,
        } = &mut self.refresh
        else {
            return None;
        };

        if is_roster {
            *roster_done = true;
        } else {
            *stats_done = true;
        }
        if failure.is_none() {
            *failure = new_failure;
        }
        if !(*roster_done && *stats_done) {
            return None;
        }

        self.refresh = match failure.take() {
            Some(message) => RefreshStatus::Failed(message),
            None => RefreshStatus::Completed,
        };
        Some(&self.refresh)
    }
}
