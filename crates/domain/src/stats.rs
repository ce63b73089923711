// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! System statistics breakdowns.

use crate::types::{Metrics, SystemStats};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// One labelled count in a breakdown list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountBucket {
    pub label: String,
    pub count: u32,
}

/// Statistics page content: breakdowns sorted by count, descending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsBreakdown {
    pub total_flights: u32,
    pub total_crew: u32,
    pub active_crew: u32,
    pub crew_by_role: Vec<CountBucket>,
    pub flights_by_aircraft: Vec<CountBucket>,
    pub flights_by_origin: Vec<CountBucket>,
    pub crew_preferences: Option<u32>,
    pub current_roster: Option<Metrics>,
}

impl StatsBreakdown {
    #[must_use]
    pub fn from_stats(stats: &SystemStats) -> Self {
        Self {
            total_flights: stats.total_flights,
            total_crew: stats.total_crew,
            active_crew: stats.active_crew,
            crew_by_role: sorted_buckets(&stats.crew_by_role),
            flights_by_aircraft: sorted_buckets(&stats.flights_by_aircraft),
            flights_by_origin: sorted_buckets(&stats.flights_by_origin),
            crew_preferences: stats.crew_preferences,
            current_roster: stats.current_roster.clone(),
        }
    }
}

// Ties keep label order because the source map is already sorted.
fn sorted_buckets(counts: &BTreeMap<String, u32>) -> Vec<CountBucket> {
    let mut buckets: Vec<CountBucket> = counts
        .iter()
        .map(|(label, count)| CountBucket {
            label: label.clone(),
            count: *count,
        })
        .collect();
    buckets.sort_by_key(|b| Reverse(b.count));
    buckets
}
