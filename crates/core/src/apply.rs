// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Effect, FetchOrigin, Message, RosterFetch};
use crate::disruption::{DisruptionFailure, DisruptionOutcome};
use crate::error::CoreError;
use crate::state::{RosterAvailability, SessionEvent, TransitionResult, ViewState};

const FETCH_ROSTER_FAILED: &str = "Failed to fetch roster";
const GENERATE_ROSTER_FAILED: &str = "Failed to generate roster";
const NO_ROSTER_AVAILABLE: &str = "No roster available";

/// Applies a message to the view state, producing a new state, follow-up
/// effects and events.
///
/// This function is pure: it performs no I/O and never mutates `state`.
/// Service failures arrive as messages and become state (a banner, an
/// unavailable roster, a failed disruption); they are never returned as
/// errors.
///
/// # Errors
///
/// Returns an error, leaving the state untouched, if:
/// - a disruption is requested while another is being submitted
/// - a generation is requested while another is running
pub fn apply(state: &ViewState, message: Message) -> Result<TransitionResult, CoreError> {
    let mut transition: TransitionResult = TransitionResult {
        new_state: state.clone(),
        effects: Vec::new(),
        events: Vec::new(),
    };

    match message {
        Message::SessionStarted | Message::RefreshRequested => {
            transition.new_state.error = None;
            fetch_roster_and_stats(&mut transition, FetchOrigin::Session);
        }
        Message::GenerateRequested => {
            if state.generating {
                return Err(CoreError::GenerationInFlight);
            }
            transition.new_state.generating = true;
            transition.new_state.error = None;
            transition.effects.push(Effect::GenerateRoster);
        }
        Message::GenerateCompleted(result) => {
            transition.new_state.generating = false;
            match result {
                Ok(()) => fetch_roster_and_stats(&mut transition, FetchOrigin::Generation),
                Err(_) => raise_error(&mut transition, GENERATE_ROSTER_FAILED),
            }
        }
        Message::RosterFetched { origin, result } => {
            transition.new_state.roster_requests_in_flight = transition
                .new_state
                .roster_requests_in_flight
                .saturating_sub(1);

            let refresh_failure: Option<String> = match result {
                Ok(RosterFetch::Available(roster)) => {
                    transition.events.push(SessionEvent::RosterReplaced {
                        assignments: roster.assignments.len(),
                    });
                    transition.new_state.roster = Some(roster);
                    transition.new_state.availability = RosterAvailability::Available;
                    None
                }
                Ok(RosterFetch::Unavailable { .. }) => {
                    transition.new_state.roster = None;
                    transition.new_state.availability = RosterAvailability::Unavailable;
                    transition.events.push(SessionEvent::RosterUnavailable);
                    Some(String::from(NO_ROSTER_AVAILABLE))
                }
                Err(err) => {
                    // The previous roster, if any, stays on screen.
                    raise_error(&mut transition, FETCH_ROSTER_FAILED);
                    Some(format!("{FETCH_ROSTER_FAILED}: {err}"))
                }
            };

            if origin == FetchOrigin::DisruptionRefresh
                && let Some(status) = transition
                    .new_state
                    .disruption
                    .record_roster_refresh(refresh_failure)
            {
                transition
                    .events
                    .push(SessionEvent::RefreshSettled(status.clone()));
            }
        }
        Message::StatsFetched { origin, result } => {
            // Stats failures are tolerated; the previous stats stay.
            if let Ok(stats) = result {
                transition.new_state.stats = Some(stats);
                transition.events.push(SessionEvent::StatsReplaced);
            }

            if origin == FetchOrigin::DisruptionRefresh
                && let Some(status) = transition.new_state.disruption.record_stats_refresh(None)
            {
                transition
                    .events
                    .push(SessionEvent::RefreshSettled(status.clone()));
            }
        }
        Message::DisruptionRequested { crew_id, flight_id } => {
            match transition.new_state.disruption.begin(&crew_id, &flight_id)? {
                Some(target) => {
                    transition
                        .events
                        .push(SessionEvent::DisruptionSubmitted(target.clone()));
                    transition.effects.push(Effect::SubmitDisruption(target));
                }
                None => {
                    if let Some(DisruptionOutcome::Failed(failure)) =
                        transition.new_state.disruption.outcome()
                    {
                        transition
                            .events
                            .push(SessionEvent::DisruptionFailed(failure.clone()));
                    }
                }
            }
        }
        Message::DisruptionCompleted(result) => {
            let event: SessionEvent = match &result {
                Ok(result) => SessionEvent::DisruptionSucceeded(result.clone()),
                Err(err) => {
                    SessionEvent::DisruptionFailed(DisruptionFailure::Service(err.clone()))
                }
            };
            transition.events.push(event);

            // The refresh is issued only now that the response has arrived.
            if transition.new_state.disruption.complete(result) {
                fetch_roster_and_stats(&mut transition, FetchOrigin::DisruptionRefresh);
            }
        }
        Message::ChatSubmitted { text, received_at } => {
            if let Some(exchange) = transition.new_state.chat.submit(&text, received_at) {
                transition.events.push(SessionEvent::ChatAppended(exchange));
            }
        }
        Message::DismissError => {
            if transition.new_state.error.take().is_some() {
                transition.events.push(SessionEvent::ErrorDismissed);
            }
        }
    }

    Ok(transition)
}

fn fetch_roster_and_stats(transition: &mut TransitionResult, origin: FetchOrigin) {
    transition.new_state.roster_requests_in_flight += 1;
    transition.effects.push(Effect::FetchStats(origin));
    transition.effects.push(Effect::FetchRoster(origin));
}

fn raise_error(transition: &mut TransitionResult, message: &str) {
    transition.new_state.error = Some(message.to_string());
    transition
        .events
        .push(SessionEvent::ErrorRaised(message.to_string()));
}
