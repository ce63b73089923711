// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_result, create_test_roster, create_test_stats};
use crate::{
    CoreError, DisruptionFailure, DisruptionOutcome, DisruptionPhase, Effect, FetchOrigin,
    Message, RefreshStatus, RosterAvailability, RosterFetch, ServiceError, SessionEvent,
    TransitionResult, ViewState, apply,
};
use crewdash_domain::{DisruptionTarget, DomainError};
use time::macros::datetime;

fn disruption_request(crew_id: &str, flight_id: &str) -> Message {
    Message::DisruptionRequested {
        crew_id: String::from(crew_id),
        flight_id: String::from(flight_id),
    }
}

fn submitting_state() -> ViewState {
    apply(&ViewState::default(), disruption_request("PIL0012", "6E1431"))
        .unwrap()
        .new_state
}

/// A successful disruption whose refresh fetches have not returned yet.
fn refreshing_state() -> ViewState {
    apply(
        &submitting_state(),
        Message::DisruptionCompleted(Ok(create_test_result("PIL0012", "6E1431"))),
    )
    .unwrap()
    .new_state
}

fn target(crew_id: &str, flight_id: &str) -> DisruptionTarget {
    DisruptionTarget {
        crew_id: String::from(crew_id),
        flight_id: String::from(flight_id),
    }
}

#[test]
fn test_session_start_fetches_stats_and_roster() {
    let state: ViewState = ViewState {
        error: Some(String::from("old")),
        ..ViewState::default()
    };

    let transition: TransitionResult = apply(&state, Message::SessionStarted).unwrap();

    assert_eq!(
        transition.effects,
        vec![
            Effect::FetchStats(FetchOrigin::Session),
            Effect::FetchRoster(FetchOrigin::Session),
        ]
    );
    assert!(transition.new_state.is_loading());
    assert_eq!(transition.new_state.error, None);
}

#[test]
fn test_apply_does_not_mutate_input_state() {
    let state: ViewState = ViewState::default();
    let before: ViewState = state.clone();

    let _ = apply(&state, Message::GenerateRequested).unwrap();

    assert_eq!(state, before);
}

#[test]
fn test_roster_fetched_replaces_roster() {
    let state: ViewState = apply(&ViewState::default(), Message::SessionStarted)
        .unwrap()
        .new_state;

    let transition: TransitionResult = apply(
        &state,
        Message::RosterFetched {
            origin: FetchOrigin::Session,
            result: Ok(RosterFetch::Available(create_test_roster())),
        },
    )
    .unwrap();

    assert_eq!(transition.new_state.roster, Some(create_test_roster()));
    assert_eq!(
        transition.new_state.availability,
        RosterAvailability::Available
    );
    assert!(!transition.new_state.is_loading());
    assert_eq!(
        transition.events,
        vec![SessionEvent::RosterReplaced { assignments: 3 }]
    );
}

#[test]
fn test_unavailable_roster_is_not_an_error() {
    let state: ViewState = ViewState {
        roster: Some(create_test_roster()),
        ..ViewState::default()
    };

    let transition: TransitionResult = apply(
        &state,
        Message::RosterFetched {
            origin: FetchOrigin::Session,
            result: Ok(RosterFetch::Unavailable { status: 404 }),
        },
    )
    .unwrap();

    assert_eq!(transition.new_state.roster, None);
    assert_eq!(
        transition.new_state.availability,
        RosterAvailability::Unavailable
    );
    assert_eq!(transition.new_state.error, None);
}

#[test]
fn test_roster_transport_failure_raises_banner_and_keeps_roster() {
    let state: ViewState = ViewState {
        roster: Some(create_test_roster()),
        availability: RosterAvailability::Available,
        ..ViewState::default()
    };

    let transition: TransitionResult = apply(
        &state,
        Message::RosterFetched {
            origin: FetchOrigin::Session,
            result: Err(ServiceError::Transport(String::from("connection refused"))),
        },
    )
    .unwrap();

    assert_eq!(
        transition.new_state.error.as_deref(),
        Some("Failed to fetch roster")
    );
    assert_eq!(transition.new_state.roster, Some(create_test_roster()));
    assert!(
        transition
            .events
            .contains(&SessionEvent::ErrorRaised(String::from(
                "Failed to fetch roster"
            )))
    );
}

#[test]
fn test_stats_failure_is_tolerated() {
    let state: ViewState = ViewState {
        stats: Some(create_test_stats()),
        ..ViewState::default()
    };

    let transition: TransitionResult = apply(
        &state,
        Message::StatsFetched {
            origin: FetchOrigin::Session,
            result: Err(ServiceError::Timeout),
        },
    )
    .unwrap();

    assert_eq!(transition.new_state.error, None);
    assert_eq!(transition.new_state.stats, Some(create_test_stats()));
    assert!(transition.events.is_empty());
}

#[test]
fn test_generate_while_generating_is_rejected() {
    let state: ViewState = apply(&ViewState::default(), Message::GenerateRequested)
        .unwrap()
        .new_state;

    let result: Result<TransitionResult, CoreError> = apply(&state, Message::GenerateRequested);

    assert_eq!(result, Err(CoreError::GenerationInFlight));
}

#[test]
fn test_generate_success_refetches_roster_and_stats() {
    let state: ViewState = apply(&ViewState::default(), Message::GenerateRequested)
        .unwrap()
        .new_state;

    let transition: TransitionResult = apply(&state, Message::GenerateCompleted(Ok(()))).unwrap();

    assert!(!transition.new_state.generating);
    assert_eq!(
        transition.effects,
        vec![
            Effect::FetchStats(FetchOrigin::Generation),
            Effect::FetchRoster(FetchOrigin::Generation),
        ]
    );
}

#[test]
fn test_generate_failure_raises_banner() {
    let state: ViewState = apply(&ViewState::default(), Message::GenerateRequested)
        .unwrap()
        .new_state;

    let transition: TransitionResult = apply(
        &state,
        Message::GenerateCompleted(Err(ServiceError::Status { status: 500 })),
    )
    .unwrap();

    assert!(!transition.new_state.generating);
    assert!(transition.effects.is_empty());
    assert_eq!(
        transition.new_state.error.as_deref(),
        Some("Failed to generate roster")
    );
}

#[test]
fn test_disruption_with_empty_flight_is_recorded_without_service_call() {
    let transition: TransitionResult =
        apply(&ViewState::default(), disruption_request("PIL0012", "  ")).unwrap();

    assert!(transition.effects.is_empty());
    assert_eq!(
        transition.new_state.disruption.phase(),
        &DisruptionPhase::Idle
    );
    assert_eq!(
        transition.new_state.disruption.outcome(),
        Some(&DisruptionOutcome::Failed(DisruptionFailure::Invalid(
            DomainError::MissingFlightId
        )))
    );
}

#[test]
fn test_valid_disruption_enters_submitting() {
    let transition: TransitionResult =
        apply(&ViewState::default(), disruption_request("PIL0012", "6E1431")).unwrap();

    assert_eq!(
        transition.effects,
        vec![Effect::SubmitDisruption(target("PIL0012", "6E1431"))]
    );
    assert!(!transition.new_state.disruption.can_submit());
    assert!(!transition.new_state.disruption.is_settled());
}

#[test]
fn test_second_disruption_while_submitting_is_rejected() {
    let state: ViewState = submitting_state();

    let result: Result<TransitionResult, CoreError> =
        apply(&state, disruption_request("CAB0076", "6E2280"));

    assert_eq!(result, Err(CoreError::DisruptionInFlight));
    assert_eq!(
        state.disruption.phase(),
        &DisruptionPhase::Submitting(target("PIL0012", "6E1431"))
    );
}

#[test]
fn test_disruption_success_issues_refresh_after_response() {
    let transition: TransitionResult = apply(
        &submitting_state(),
        Message::DisruptionCompleted(Ok(create_test_result("PIL0012", "6E1431"))),
    )
    .unwrap();

    assert_eq!(
        transition.effects,
        vec![
            Effect::FetchStats(FetchOrigin::DisruptionRefresh),
            Effect::FetchRoster(FetchOrigin::DisruptionRefresh),
        ]
    );
    assert_eq!(transition.new_state.disruption.phase(), &DisruptionPhase::Idle);
    assert!(transition.new_state.disruption.refresh().is_pending());
    assert!(!transition.new_state.disruption.can_submit());
    assert!(!transition.new_state.disruption.is_settled());
}

#[test]
fn test_disruption_while_previous_refresh_pending_is_rejected() {
    let state: ViewState = refreshing_state();

    let result: Result<TransitionResult, CoreError> =
        apply(&state, disruption_request("CAB0076", "6E2280"));

    assert_eq!(result, Err(CoreError::DisruptionInFlight));
}

#[test]
fn test_disruption_refresh_is_not_settled_by_other_fetches() {
    let state: ViewState = apply(
        &refreshing_state(),
        Message::StatsFetched {
            origin: FetchOrigin::Session,
            result: Ok(create_test_stats()),
        },
    )
    .unwrap()
    .new_state;
    let transition: TransitionResult = apply(
        &state,
        Message::RosterFetched {
            origin: FetchOrigin::Session,
            result: Ok(RosterFetch::Available(create_test_roster())),
        },
    )
    .unwrap();

    assert!(transition.new_state.disruption.refresh().is_pending());
    assert!(!transition.new_state.disruption.is_settled());
    assert!(
        !transition
            .events
            .iter()
            .any(|e| matches!(e, SessionEvent::RefreshSettled(_)))
    );
}

#[test]
fn test_disruption_refresh_settles_after_roster_and_stats() {
    let state: ViewState = apply(
        &submitting_state(),
        Message::DisruptionCompleted(Ok(create_test_result("PIL0012", "6E1431"))),
    )
    .unwrap()
    .new_state;

    let state: ViewState = apply(
        &state,
        Message::StatsFetched {
            origin: FetchOrigin::DisruptionRefresh,
            result: Ok(create_test_stats()),
        },
    )
    .unwrap()
    .new_state;
    assert!(!state.disruption.is_settled());

    let transition: TransitionResult = apply(
        &state,
        Message::RosterFetched {
            origin: FetchOrigin::DisruptionRefresh,
            result: Ok(RosterFetch::Available(create_test_roster())),
        },
    )
    .unwrap();

    assert!(transition.new_state.disruption.is_settled());
    assert_eq!(
        transition.new_state.disruption.refresh(),
        &RefreshStatus::Completed
    );
    assert!(
        transition
            .events
            .contains(&SessionEvent::RefreshSettled(RefreshStatus::Completed))
    );
    // The submission outcome is kept after the refresh.
    assert!(matches!(
        transition.new_state.disruption.outcome(),
        Some(DisruptionOutcome::Succeeded(_))
    ));
}

#[test]
fn test_disruption_refresh_failure_is_reported_separately() {
    let state: ViewState = apply(
        &submitting_state(),
        Message::DisruptionCompleted(Ok(create_test_result("PIL0012", "6E1431"))),
    )
    .unwrap()
    .new_state;

    let state: ViewState = apply(
        &state,
        Message::RosterFetched {
            origin: FetchOrigin::DisruptionRefresh,
            result: Ok(RosterFetch::Unavailable { status: 404 }),
        },
    )
    .unwrap()
    .new_state;
    let state: ViewState = apply(
        &state,
        Message::StatsFetched {
            origin: FetchOrigin::DisruptionRefresh,
            result: Ok(create_test_stats()),
        },
    )
    .unwrap()
    .new_state;

    assert_eq!(
        state.disruption.refresh(),
        &RefreshStatus::Failed(String::from("No roster available"))
    );
    assert!(matches!(
        state.disruption.outcome(),
        Some(DisruptionOutcome::Succeeded(_))
    ));
    assert!(state.disruption.is_settled());
}

#[test]
fn test_disruption_failure_returns_to_idle_without_refresh() {
    let transition: TransitionResult = apply(
        &submitting_state(),
        Message::DisruptionCompleted(Err(ServiceError::Status { status: 500 })),
    )
    .unwrap();

    assert!(transition.effects.is_empty());
    assert!(transition.new_state.disruption.is_settled());
    let Some(DisruptionOutcome::Failed(failure)) = transition.new_state.disruption.outcome()
    else {
        panic!("expected a failed outcome");
    };
    assert_eq!(failure.to_string(), "Failed to simulate disruption");
}

#[test]
fn test_new_disruption_clears_previous_result() {
    let state: ViewState = apply(
        &refreshing_state(),
        Message::StatsFetched {
            origin: FetchOrigin::DisruptionRefresh,
            result: Ok(create_test_stats()),
        },
    )
    .unwrap()
    .new_state;
    let state: ViewState = apply(
        &state,
        Message::RosterFetched {
            origin: FetchOrigin::DisruptionRefresh,
            result: Ok(RosterFetch::Available(create_test_roster())),
        },
    )
    .unwrap()
    .new_state;
    assert!(state.disruption.can_submit());

    let transition: TransitionResult =
        apply(&state, disruption_request("CAB0076", "6E2280")).unwrap();

    assert_eq!(transition.new_state.disruption.outcome(), None);
}

#[test]
fn test_chat_submission_appends_pair() {
    let transition: TransitionResult = apply(
        &ViewState::default(),
        Message::ChatSubmitted {
            text: String::from("fog and storm today"),
            received_at: datetime!(2025-08-01 06:00 UTC),
        },
    )
    .unwrap();

    assert_eq!(transition.new_state.chat.len(), 2);
    assert!(matches!(
        transition.events.as_slice(),
        [SessionEvent::ChatAppended(_)]
    ));
}

#[test]
fn test_blank_chat_submission_changes_nothing() {
    let transition: TransitionResult = apply(
        &ViewState::default(),
        Message::ChatSubmitted {
            text: String::from("   "),
            received_at: datetime!(2025-08-01 06:00 UTC),
        },
    )
    .unwrap();

    assert!(transition.new_state.chat.is_empty());
    assert!(transition.events.is_empty());
}

#[test]
fn test_dismiss_error_clears_banner() {
    let state: ViewState = ViewState {
        error: Some(String::from("Failed to fetch roster")),
        ..ViewState::default()
    };

    let transition: TransitionResult = apply(&state, Message::DismissError).unwrap();
    assert_eq!(transition.new_state.error, None);
    assert_eq!(transition.events, vec![SessionEvent::ErrorDismissed]);

    let again: TransitionResult = apply(&transition.new_state, Message::DismissError).unwrap();
    assert!(again.events.is_empty());
}
