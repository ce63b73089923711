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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod aggregate;
mod compliance;
mod disruption;
mod error;
mod export;
mod overview;
mod stats;
mod types;
mod zone;

#[cfg(test)]
mod tests;

pub use aggregate::{
    CrewGroup, DuplicatePair, FlightGroup, SummaryCounts, duplicate_pairs, filter_by_date,
    filter_by_text, group_by_crew, group_by_flight, summary_counts,
};
pub use compliance::{
    ComplianceLevel, ELEVATED_THRESHOLD_HOURS, HIGH_THRESHOLD_HOURS, VIOLATION_THRESHOLD_HOURS,
    classify,
};
pub use disruption::{
    DisruptionResult, DisruptionSummary, DisruptionTarget, SampleDisruption, sample_disruptions,
    validate_disruption_target,
};
pub use error::DomainError;
pub use export::roster_csv;
pub use overview::{ComplianceSummary, DutyBands, MetricsOverview, ProgressBar};
pub use stats::{CountBucket, StatsBreakdown};
pub use types::{Assignment, FlightDetail, Metrics, Roster, SystemStats};
pub use zone::ViewerZone;
