// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster aggregation.
//!
//! Groupings are **computed**, not stored. Every function here is a pure
//! derivation of an assignment list and never mutates its input. Group maps
//! are keyed by identifier in ascending order.

use crate::compliance::{
    ComplianceLevel, ELEVATED_THRESHOLD_HOURS, VIOLATION_THRESHOLD_HOURS, classify,
};
use crate::types::{Assignment, FlightDetail};
use crate::zone::ViewerZone;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// All assignments of one crew member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewGroup {
    /// The crew member identifier.
    pub crew_id: String,
    /// Assignments in the order they appear in the roster.
    pub assignments: Vec<Assignment>,
    /// Sum of `duty_hours` over `assignments`.
    pub total_duty_hours: f64,
    /// Role of the first assignment seen for this crew member.
    pub role: String,
    /// Classification of `total_duty_hours`.
    pub compliance_level: ComplianceLevel,
}

/// All assignments on one flight, joined with its detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightGroup {
    /// The flight identifier.
    pub flight_id: String,
    /// Assignments in the order they appear in the roster.
    pub assignments: Vec<Assignment>,
    /// Route and aircraft metadata, when the service provided it.
    pub flight_detail: Option<FlightDetail>,
}

impl FlightGroup {
    /// Departure timestamp of the first assignment on this flight.
    #[must_use]
    pub fn departure_time(&self) -> Option<&str> {
        self.assignments.first().map(|a| a.departure_time.as_str())
    }
}

/// Bucket counts over crew duty totals.
///
/// The cut points are 10 and 14 hours: `h <= 10`, `10 < h <= 14`, `h > 14`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub total: usize,
    pub under_10h: usize,
    pub between_10_and_14h: usize,
    pub over_14h: usize,
}

/// A `(crew_id, flight_id)` pair that occurs more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePair {
    pub crew_id: String,
    pub flight_id: String,
    /// How many times the pair occurs (always at least 2).
    pub occurrences: usize,
}

impl DuplicatePair {
    /// Occurrences beyond the first.
    #[must_use]
    pub const fn extra(&self) -> usize {
        self.occurrences.saturating_sub(1)
    }
}

/// Groups assignments by crew member.
///
/// The role of each group is the first role encountered for that crew member;
/// later disagreeing roles are not reported.
#[must_use]
pub fn group_by_crew(assignments: &[Assignment]) -> BTreeMap<String, CrewGroup> {
    let mut groups: BTreeMap<String, CrewGroup> = BTreeMap::new();

    for assignment in assignments {
        let group: &mut CrewGroup = groups
            .entry(assignment.crew_id.clone())
            .or_insert_with(|| CrewGroup {
                crew_id: assignment.crew_id.clone(),
                assignments: Vec::new(),
                total_duty_hours: 0.0,
                role: assignment.role.clone(),
                compliance_level: ComplianceLevel::Normal,
            });
        group.total_duty_hours += assignment.duty_hours;
        group.assignments.push(assignment.clone());
    }

    for group in groups.values_mut() {
        group.compliance_level = classify(group.total_duty_hours);
    }

    groups
}

/// Groups assignments by flight and left-joins each group with its detail.
#[must_use]
pub fn group_by_flight(
    assignments: &[Assignment],
    flight_details: &[FlightDetail],
) -> BTreeMap<String, FlightGroup> {
    let details: BTreeMap<&str, &FlightDetail> = flight_details
        .iter()
        .map(|d| (d.flight_id.as_str(), d))
        .collect();

    let mut groups: BTreeMap<String, FlightGroup> = BTreeMap::new();
    for assignment in assignments {
        groups
            .entry(assignment.flight_id.clone())
            .or_insert_with(|| FlightGroup {
                flight_id: assignment.flight_id.clone(),
                assignments: Vec::new(),
                flight_detail: details
                    .get(assignment.flight_id.as_str())
                    .map(|d| (*d).clone()),
            })
            .assignments
            .push(assignment.clone());
    }

    groups
}

/// Keeps the groups whose key contains `query`, ignoring case.
///
/// A blank query keeps everything.
#[must_use]
pub fn filter_by_text<G: Clone>(
    groups: &BTreeMap<String, G>,
    query: &str,
) -> BTreeMap<String, G> {
    let needle: String = query.trim().to_lowercase();
    if needle.is_empty() {
        return groups.clone();
    }

    groups
        .iter()
        .filter(|(key, _)| key.to_lowercase().contains(&needle))
        .map(|(key, group)| (key.clone(), group.clone()))
        .collect()
}

/// Keeps the flights whose first departure falls on `date` in the viewer zone.
///
/// With no date set, every group is kept. Groups whose departure cannot be
/// parsed never match a set date.
#[must_use]
pub fn filter_by_date(
    groups: &BTreeMap<String, FlightGroup>,
    date: Option<NaiveDate>,
    zone: &ViewerZone,
) -> BTreeMap<String, FlightGroup> {
    let Some(date) = date else {
        return groups.clone();
    };

    groups
        .iter()
        .filter(|(_, group)| {
            group
                .departure_time()
                .and_then(|ts| zone.local_date(ts))
                .is_some_and(|local| local == date)
        })
        .map(|(key, group)| (key.clone(), group.clone()))
        .collect()
}

/// Counts crew members per duty bucket.
#[must_use]
pub fn summary_counts(groups: &BTreeMap<String, CrewGroup>) -> SummaryCounts {
    groups
        .values()
        .fold(SummaryCounts::default(), |mut counts, group| {
            let hours: f64 = group.total_duty_hours;
            counts.total += 1;
            if hours > VIOLATION_THRESHOLD_HOURS {
                counts.over_14h += 1;
            } else if hours > ELEVATED_THRESHOLD_HOURS {
                counts.between_10_and_14h += 1;
            } else {
                counts.under_10h += 1;
            }
            counts
        })
}

/// Finds every `(crew_id, flight_id)` pair that occurs more than once.
///
/// Pairs are returned in order of their first occurrence.
#[must_use]
pub fn duplicate_pairs(assignments: &[Assignment]) -> Vec<DuplicatePair> {
    let mut seen: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    let mut order: Vec<(&str, &str)> = Vec::new();

    for assignment in assignments {
        let key = assignment.key();
        let count: &mut usize = seen.entry(key).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|key| {
            let occurrences: usize = seen.get(&key).copied().unwrap_or_default();
            (occurrences > 1).then(|| DuplicatePair {
                crew_id: key.0.to_string(),
                flight_id: key.1.to_string(),
                occurrences,
            })
        })
        .collect()
}
