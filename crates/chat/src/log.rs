// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::rules::respond;
use serde::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Operator,
    Assistant,
}

/// A single entry in the chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Position-derived identifier, unique within one log.
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: OffsetDateTime,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &OffsetDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let formatted: String = timestamp
        .format(&Rfc3339)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

/// The operator message and the assistant answer appended for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatExchange {
    pub operator: ChatMessage,
    pub assistant: ChatMessage,
}

/// Append-only chat history.
///
/// Messages are never removed or reordered, and timestamps strictly increase
/// along the log even if the caller's clock does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends an operator message and the assistant's answer.
    ///
    /// Blank input (after trimming) is ignored and returns `None`.
    pub fn submit(&mut self, text: &str, received_at: OffsetDateTime) -> Option<ChatExchange> {
        let text: &str = text.trim();
        if text.is_empty() {
            return None;
        }

        let operator_at: OffsetDateTime = self.next_timestamp(received_at);
        let operator: ChatMessage = self.push(text.to_string(), Sender::Operator, operator_at);

        let assistant_at: OffsetDateTime = self.next_timestamp(received_at);
        let assistant: ChatMessage =
            self.push(respond(text).to_string(), Sender::Assistant, assistant_at);

        Some(ChatExchange {
            operator,
            assistant,
        })
    }

    fn next_timestamp(&self, candidate: OffsetDateTime) -> OffsetDateTime {
        match self.messages.last() {
            Some(last) if candidate <= last.timestamp => {
                last.timestamp + Duration::microseconds(1)
            }
            _ => candidate,
        }
    }

    fn push(&mut self, text: String, sender: Sender, timestamp: OffsetDateTime) -> ChatMessage {
        let message: ChatMessage = ChatMessage {
            id: self.messages.len() as u64 + 1,
            text,
            sender,
            timestamp,
        };
        self.messages.push(message.clone());
        message
    }
}
