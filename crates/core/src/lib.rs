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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod apply;
mod command;
mod disruption;
mod error;
mod service;
mod session;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::{Effect, FetchOrigin, Message, RosterFetch};
pub use disruption::{
    DisruptionFailure, DisruptionOrchestrator, DisruptionOutcome, DisruptionPhase, RefreshStatus,
};
pub use error::{CoreError, ServiceError};
pub use service::{EventSink, NoopSink, OptimizerService};
pub use session::Session;
pub use state::{RosterAvailability, SessionEvent, TransitionResult, ViewState};
