// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod log;
mod rules;

#[cfg(test)]
mod tests;

pub use log::{ChatExchange, ChatLog, ChatMessage, Sender};
pub use rules::{FALLBACK_RESPONSE, INTENT_RULES, IntentRule, match_intent, respond};
