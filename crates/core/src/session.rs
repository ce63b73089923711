// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Async driver for the pure transition function.
//!
//! The view state sits behind a mutex that is held only while `apply` runs.
//! Effects are executed with the lock released; their completions are fed
//! back as messages until no effects remain. Effects produced by the same
//! transition run concurrently.

use crate::apply::apply;
use crate::command::{Effect, Message, RosterFetch};
use crate::disruption::DisruptionOutcome;
use crate::error::CoreError;
use crate::service::{EventSink, OptimizerService};
use crate::state::{SessionEvent, TransitionResult, ViewState};
use crewdash_chat::ChatExchange;
use futures::future::join_all;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// One operator's dashboard session.
pub struct Session<S> {
    state: Arc<Mutex<ViewState>>,
    service: Arc<S>,
    sink: Arc<dyn EventSink>,
}

impl<S> Clone for Session<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            service: Arc::clone(&self.service),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S: OptimizerService> Session<S> {
    #[must_use]
    pub fn new(initial: ViewState, service: Arc<S>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
            service,
            sink,
        }
    }

    /// Returns a copy of the current view state.
    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// Reads from the current view state without copying it.
    pub async fn read<T>(&self, f: impl FnOnce(&ViewState) -> T) -> T {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Applies `message` and runs every effect it causes to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if `message` itself is rejected. Rejections of
    /// follow-up completions are logged.
    pub async fn dispatch(&self, message: Message) -> Result<Vec<SessionEvent>, CoreError> {
        let (effects, mut events) = self.step(message).await?;
        events.extend(self.run(effects).await);
        Ok(events)
    }

    /// Fetches stats and roster for a freshly opened dashboard.
    pub async fn start(&self) {
        if let Err(err) = self.dispatch(Message::SessionStarted).await {
            warn!(error = %err, "Session start rejected");
        }
    }

    /// Re-fetches roster and stats.
    ///
    /// # Errors
    ///
    /// Never fails in practice; refresh requests are always accepted.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.dispatch(Message::RefreshRequested).await.map(|_| ())
    }

    /// Asks the service for a new roster, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::GenerationInFlight` if a generation is running.
    pub async fn generate(&self) -> Result<(), CoreError> {
        self.dispatch(Message::GenerateRequested).await.map(|_| ())
    }

    /// Submits a disruption and waits for it and its refresh to settle.
    ///
    /// Validation failures and service failures are returned as a failed
    /// outcome, not as errors.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DisruptionInFlight` if another submission, or the
    /// refresh following it, is still outstanding. Returns
    /// `CoreError::MissingOutcome` if the accepted submission produced no
    /// success or failure event.
    pub async fn submit_disruption(
        &self,
        crew_id: &str,
        flight_id: &str,
    ) -> Result<DisruptionOutcome, CoreError> {
        let events: Vec<SessionEvent> = self
            .dispatch(Message::DisruptionRequested {
                crew_id: crew_id.to_string(),
                flight_id: flight_id.to_string(),
            })
            .await?;
        outcome_from_events(events)
    }

    /// Sends a chat message. Returns `None` for blank input.
    pub async fn chat(&self, text: &str) -> Option<ChatExchange> {
        let message: Message = Message::ChatSubmitted {
            text: text.to_string(),
            received_at: OffsetDateTime::now_utc(),
        };
        match self.dispatch(message).await {
            Ok(events) => events.into_iter().find_map(|event| match event {
                SessionEvent::ChatAppended(exchange) => Some(exchange),
                _ => None,
            }),
            Err(err) => {
                warn!(error = %err, "Chat message rejected");
                None
            }
        }
    }

    /// Clears the error banner.
    pub async fn dismiss_error(&self) {
        if let Err(err) = self.dispatch(Message::DismissError).await {
            warn!(error = %err, "Dismiss rejected");
        }
    }

    async fn step(&self, message: Message) -> Result<(Vec<Effect>, Vec<SessionEvent>), CoreError> {
        let (effects, events) = {
            let mut state = self.state.lock().await;
            let TransitionResult {
                new_state,
                effects,
                events,
            } = apply(&state, message)?;
            *state = new_state;
            (effects, events)
        };

        for event in &events {
            self.sink.publish(event.clone());
        }
        Ok((effects, events))
    }

    async fn run(&self, mut pending: Vec<Effect>) -> Vec<SessionEvent> {
        let mut observed: Vec<SessionEvent> = Vec::new();

        while !pending.is_empty() {
            let completions: Vec<Message> =
                join_all(pending.drain(..).map(|effect| self.execute(effect))).await;

            for completion in completions {
                match self.step(completion).await {
                    Ok((effects, events)) => {
                        pending.extend(effects);
                        observed.extend(events);
                    }
                    Err(err) => warn!(error = %err, "Completion rejected"),
                }
            }
        }

        observed
    }

    async fn execute(&self, effect: Effect) -> Message {
        debug!(?effect, "Running effect");
        match effect {
            Effect::FetchRoster(origin) => {
                let result = self.service.fetch_roster().await;
                match &result {
                    Ok(RosterFetch::Available(roster)) => {
                        info!(?origin, assignments = roster.assignments.len(), "Roster fetched");
                    }
                    Ok(RosterFetch::Unavailable { status }) => {
                        info!(?origin, status, "No roster available");
                    }
                    Err(err) => warn!(?origin, error = %err, "Failed to fetch roster"),
                }
                Message::RosterFetched { origin, result }
            }
            Effect::FetchStats(origin) => {
                let result = self.service.fetch_stats().await;
                if let Err(err) = &result {
                    warn!(?origin, error = %err, "Failed to fetch stats");
                }
                Message::StatsFetched { origin, result }
            }
            Effect::GenerateRoster => {
                let result = self.service.generate_roster().await;
                match &result {
                    Ok(()) => info!("Roster generated"),
                    Err(err) => warn!(error = %err, "Failed to generate roster"),
                }
                Message::GenerateCompleted(result)
            }
            Effect::SubmitDisruption(target) => {
                let result = self.service.submit_disruption(&target).await;
                match &result {
                    Ok(result) => info!(
                        crew_id = %target.crew_id,
                        flight_id = %target.flight_id,
                        recovery_score = result.recovery_score,
                        "Disruption handled"
                    ),
                    Err(err) => warn!(
                        crew_id = %target.crew_id,
                        flight_id = %target.flight_id,
                        error = %err,
                        "Disruption failed"
                    ),
                }
                Message::DisruptionCompleted(result)
            }
        }
    }
}

/// Picks the submission outcome out of the events of one dispatch.
pub fn outcome_from_events(
    events: Vec<SessionEvent>,
) -> Result<DisruptionOutcome, CoreError> {
    events
        .into_iter()
        .find_map(|event| match event {
            SessionEvent::DisruptionSucceeded(result) => Some(DisruptionOutcome::Succeeded(result)),
            SessionEvent::DisruptionFailed(failure) => Some(DisruptionOutcome::Failed(failure)),
            _ => None,
        })
        .ok_or(CoreError::MissingOutcome)
}
