// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Duty-hour compliance bands.
//!
//! Each band includes its lower bound: exactly 10.0 hours is `Elevated` and
//! exactly 14.0 hours is still `High`. Only totals strictly above 14 hours are
//! a `Violation`.

use serde::{Deserialize, Serialize};

/// Lower bound of the `Elevated` band, in hours.
pub const ELEVATED_THRESHOLD_HOURS: f64 = 10.0;
/// Lower bound of the `High` band, in hours.
pub const HIGH_THRESHOLD_HOURS: f64 = 12.0;
/// Totals strictly above this value are violations.
pub const VIOLATION_THRESHOLD_HOURS: f64 = 14.0;

/// Compliance level of a crew member's duty-hour total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    /// Below 10 hours.
    Normal,
    /// 10 hours up to (not including) 12 hours.
    Elevated,
    /// 12 hours up to and including 14 hours.
    High,
    /// More than 14 hours.
    Violation,
}

impl ComplianceLevel {
    /// Returns the display label of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Elevated => "elevated",
            Self::High => "high",
            Self::Violation => "violation",
        }
    }

    /// Returns `true` for the `Violation` level.
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        matches!(self, Self::Violation)
    }
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a duty-hour total.
///
/// Negative or non-finite input is a caller error; such values fall into
/// whichever band the comparisons place them in.
#[must_use]
pub fn classify(duty_hours: f64) -> ComplianceLevel {
    if duty_hours > VIOLATION_THRESHOLD_HOURS {
        ComplianceLevel::Violation
    } else if duty_hours >= HIGH_THRESHOLD_HOURS {
        ComplianceLevel::High
    } else if duty_hours >= ELEVATED_THRESHOLD_HOURS {
        ComplianceLevel::Elevated
    } else {
        ComplianceLevel::Normal
    }
}
