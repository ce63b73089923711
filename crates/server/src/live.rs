// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live dashboard notifications over WebSocket.
//!
//! Events are informational only. They announce that something in the
//! session changed; clients re-read the HTTP views for the actual data. No
//! commands are accepted over the socket.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use crewdash::{DisruptionFailure, EventSink, RefreshStatus, SessionEvent};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live event types sent to dashboard clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
    /// A new roster replaced the previous one.
    RosterReplaced { assignments: usize },
    /// The optimizer has no roster.
    RosterUnavailable,
    StatsReplaced,
    DisruptionSubmitted { crew_id: String, flight_id: String },
    DisruptionSucceeded {
        crew_id: String,
        flight_id: String,
        recovery_score: f64,
    },
    DisruptionFailed { message: String },
    /// The refresh after a disruption finished.
    RefreshSettled {
        succeeded: bool,
        message: Option<String>,
    },
    ChatAppended { question: String, answer: String },
    ErrorRaised { message: String },
    ErrorDismissed,
}

impl From<SessionEvent> for LiveEvent {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::RosterReplaced { assignments } => Self::RosterReplaced { assignments },
            SessionEvent::RosterUnavailable => Self::RosterUnavailable,
            SessionEvent::StatsReplaced => Self::StatsReplaced,
            SessionEvent::DisruptionSubmitted(target) => Self::DisruptionSubmitted {
                crew_id: target.crew_id,
                flight_id: target.flight_id,
            },
            SessionEvent::DisruptionSucceeded(result) => Self::DisruptionSucceeded {
                crew_id: result.removed_crew,
                flight_id: result.affected_flight,
                recovery_score: result.recovery_score,
            },
            SessionEvent::DisruptionFailed(failure) => Self::DisruptionFailed {
                message: failure.to_string(),
            },
            SessionEvent::RefreshSettled(status) => match status {
                RefreshStatus::Failed(message) => Self::RefreshSettled {
                    succeeded: false,
                    message: Some(message),
                },
                _ => Self::RefreshSettled {
                    succeeded: true,
                    message: None,
                },
            },
            SessionEvent::ChatAppended(exchange) => Self::ChatAppended {
                question: exchange.operator.text,
                answer: exchange.assistant.text,
            },
            SessionEvent::ErrorRaised(message) => Self::ErrorRaised { message },
            SessionEvent::ErrorDismissed => Self::ErrorDismissed,
        }
    }
}

/// Broadcaster for live events.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that fans
/// session events out to every connected WebSocket client.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Events sent before subscription are not received.
    fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LiveEventBroadcaster {
    fn publish(&self, event: SessionEvent) {
        self.broadcast(&LiveEvent::from(event));
    }
}

/// Upgrades the connection and streams live events until the client leaves.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!(?e, "Failed to serialize live event"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}
