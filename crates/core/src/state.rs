// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Effect;
use crate::disruption::{DisruptionFailure, DisruptionOrchestrator, RefreshStatus};
use crate::error::CoreError;
use crewdash_chat::{ChatExchange, ChatLog};
use crewdash_domain::{
    CrewGroup, DisruptionResult, DisruptionTarget, DuplicatePair, FlightGroup, MetricsOverview,
    Roster, StatsBreakdown, SummaryCounts, SystemStats, ViewerZone, duplicate_pairs,
    filter_by_date, filter_by_text, group_by_crew, group_by_flight, roster_csv, summary_counts,
};
use std::collections::BTreeMap;

/// What the dashboard knows about the service's roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RosterAvailability {
    /// No fetch has completed yet.
    #[default]
    Unknown,
    Available,
    /// The service has no roster; the operator should generate one.
    Unavailable,
}

/// The complete state of one dashboard session.
///
/// Views are derived from `roster` on every access and never cached here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub roster: Option<Roster>,
    pub availability: RosterAvailability,
    pub stats: Option<SystemStats>,
    /// Roster fetches issued but not yet completed.
    pub roster_requests_in_flight: u32,
    pub generating: bool,
    /// Dismissible banner text.
    pub error: Option<String>,
    pub disruption: DisruptionOrchestrator,
    pub chat: ChatLog,
    pub zone: ViewerZone,
}

impl ViewState {
    /// Creates an empty state viewing dates in `zone`.
    #[must_use]
    pub fn new(zone: ViewerZone) -> Self {
        Self {
            zone,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.roster_requests_in_flight > 0 || self.generating
    }

    /// Crew groups whose identifier matches `query`.
    #[must_use]
    pub fn crew_view(&self, query: &str) -> BTreeMap<String, CrewGroup> {
        self.roster.as_ref().map_or_else(BTreeMap::new, |roster| {
            filter_by_text(&group_by_crew(&roster.assignments), query)
        })
    }

    /// Duty bucket counts over all crew, ignoring any filter.
    #[must_use]
    pub fn crew_summary(&self) -> SummaryCounts {
        self.roster
            .as_ref()
            .map(|roster| summary_counts(&group_by_crew(&roster.assignments)))
            .unwrap_or_default()
    }

    /// Flight groups matching `query` and departing on `date` in the viewer zone.
    #[must_use]
    pub fn flight_view(
        &self,
        query: &str,
        date: Option<chrono::NaiveDate>,
    ) -> BTreeMap<String, FlightGroup> {
        self.roster.as_ref().map_or_else(BTreeMap::new, |roster| {
            let groups: BTreeMap<String, FlightGroup> =
                group_by_flight(&roster.assignments, &roster.metrics.flight_details);
            filter_by_date(&filter_by_text(&groups, query), date, &self.zone)
        })
    }

    #[must_use]
    pub fn overview(&self) -> Option<MetricsOverview> {
        self.roster
            .as_ref()
            .map(|roster| MetricsOverview::from_metrics(&roster.metrics))
    }

    #[must_use]
    pub fn stats_view(&self) -> Option<StatsBreakdown> {
        self.stats.as_ref().map(StatsBreakdown::from_stats)
    }

    #[must_use]
    pub fn duplicates(&self) -> Vec<DuplicatePair> {
        self.roster
            .as_ref()
            .map(|roster| duplicate_pairs(&roster.assignments))
            .unwrap_or_default()
    }

    /// Renders the current roster as CSV, or `None` if there is no roster.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DomainViolation` if the export fails.
    pub fn roster_csv(&self) -> Result<Option<String>, CoreError> {
        let Some(roster) = self.roster.as_ref() else {
            return Ok(None);
        };
        Ok(Some(roster_csv(roster)?))
    }
}

/// A notable change, published to live observers after each transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RosterReplaced { assignments: usize },
    RosterUnavailable,
    StatsReplaced,
    DisruptionSubmitted(DisruptionTarget),
    DisruptionSucceeded(DisruptionResult),
    DisruptionFailed(DisruptionFailure),
    RefreshSettled(RefreshStatus),
    ChatAppended(ChatExchange),
    ErrorRaised(String),
    ErrorDismissed,
}

/// The result of a successful transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: ViewState,
    /// Work the driver must run next.
    pub effects: Vec<Effect>,
    /// Changes to announce.
    pub events: Vec<SessionEvent>,
}
