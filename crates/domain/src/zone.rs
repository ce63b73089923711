// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

/// Naive timestamp layouts the optimizer is known to emit.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The time zone in which the operator views calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerZone {
    /// The zone of the machine running the dashboard.
    #[default]
    Local,
    /// A named IANA zone.
    Named(Tz),
}

impl ViewerZone {
    /// Parses a zone name. `local` (any case) selects the machine zone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownTimezone` if the name is not an IANA zone.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let trimmed: &str = name.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| DomainError::UnknownTimezone(trimmed.to_string()))
    }

    /// Returns the viewer-local calendar date of an ISO-8601 timestamp.
    ///
    /// Timestamps carrying an offset are converted into this zone. Naive
    /// timestamps are already viewer wall-clock time and are taken as-is.
    /// Returns `None` if the timestamp cannot be parsed.
    #[must_use]
    pub fn local_date(&self, timestamp: &str) -> Option<NaiveDate> {
        let timestamp: &str = timestamp.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(timestamp) {
            return Some(match self {
                Self::Local => instant.with_timezone(&Local).date_naive(),
                Self::Named(tz) => instant.with_timezone(tz).date_naive(),
            });
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
            .map(|naive| naive.date())
            .or_else(|| NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok())
    }
}

impl std::fmt::Display for ViewerZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}
