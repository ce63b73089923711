// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster overview derived from service metrics.
//!
//! Percentage bars always use the same base as the service percentages
//! (`covered_flights / total_flights`, `crew_utilized / total_crew`). The
//! service is trusted to keep `crew_over_14h <= crew_over_12h <= crew_utilized`;
//! when it does not, band arithmetic saturates at zero instead of failing.

use crate::compliance::VIOLATION_THRESHOLD_HOURS;
use crate::types::Metrics;
use serde::Serialize;

/// Max duty hours above this are flagged on the overview card.
const MAX_DUTY_ALERT_HOURS: f64 = 16.0;

/// A `value / max` progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressBar {
    pub value: u32,
    pub max: u32,
    /// Fill width in percent, clamped to `0..=100`. Zero when `max` is zero.
    pub fill_percent: f64,
}

impl ProgressBar {
    /// Creates a bar for `value` out of `max`.
    #[must_use]
    pub fn new(value: u32, max: u32) -> Self {
        let fill_percent: f64 = if max == 0 {
            0.0
        } else {
            (f64::from(value) / f64::from(max) * 100.0).clamp(0.0, 100.0)
        };
        Self {
            value,
            max,
            fill_percent,
        }
    }
}

/// Crew counts per duty band, taken from the service counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DutyBands {
    pub within_12h: u32,
    pub between_12_and_14h: u32,
    pub over_14h: u32,
    pub crew_utilized: u32,
}

impl DutyBands {
    #[must_use]
    pub const fn from_metrics(metrics: &Metrics) -> Self {
        Self {
            within_12h: metrics.crew_utilized.saturating_sub(metrics.crew_over_12h),
            between_12_and_14h: metrics.crew_over_12h.saturating_sub(metrics.crew_over_14h),
            over_14h: metrics.crew_over_14h,
            crew_utilized: metrics.crew_utilized,
        }
    }
}

/// Overall compliance wording for the optimization summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceSummary {
    /// No violations.
    Perfect,
    /// At least one violation.
    Acceptable,
}

/// Everything the overview page shows for one metrics object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsOverview {
    pub coverage: ProgressBar,
    pub coverage_percentage: f64,
    pub utilization: ProgressBar,
    pub utilization_percentage: f64,
    pub max_duty_hours: f64,
    pub max_duty_alert: bool,
    pub violations: u32,
    pub duplicate_assignments: u32,
    pub duty_bands: DutyBands,
    pub compliance: ComplianceSummary,
}

impl MetricsOverview {
    #[must_use]
    pub fn from_metrics(metrics: &Metrics) -> Self {
        Self {
            coverage: ProgressBar::new(metrics.covered_flights, metrics.total_flights),
            coverage_percentage: metrics.coverage_percentage,
            utilization: ProgressBar::new(metrics.crew_utilized, metrics.total_crew),
            utilization_percentage: metrics.utilization_percentage,
            max_duty_hours: metrics.max_duty_hours,
            max_duty_alert: metrics.max_duty_hours > MAX_DUTY_ALERT_HOURS,
            violations: metrics.violations,
            duplicate_assignments: metrics.duplicate_assignments,
            duty_bands: DutyBands::from_metrics(metrics),
            compliance: if metrics.violations == 0 {
                ComplianceSummary::Perfect
            } else {
                ComplianceSummary::Acceptable
            },
        }
    }

    /// Returns `true` if the service reported a max duty total over 14 hours.
    #[must_use]
    pub fn exceeds_duty_limit(&self) -> bool {
        self.max_duty_hours > VIOLATION_THRESHOLD_HOURS
    }
}
