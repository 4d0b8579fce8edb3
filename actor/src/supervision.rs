// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! Supervision collaborator
//!
//! Restart trees live outside this core. The drain loop only reports handler
//! failures to a `Supervisor` and applies the directive it returns.
//!

use crate::{Error, Pid};

use tracing::warn;

/// What to do with an actor whose handler failed.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    /// Keep the actor running and continue draining its queue.
    Resume,
    /// Tear the actor down. Envelopes left in its queue go to dead letters.
    Stop,
}

/// Decides how actor failures are handled.
///
/// The hook is invoked synchronously from the drain loop with the identity of
/// the failing actor, the type name of the offending message and the error the
/// handler returned. The failure itself never reaches the message sender.
pub trait Supervisor: Send + Sync + 'static {
    /// Handles a failure and returns the action to apply.
    fn handle_failure(&self, pid: &Pid, message_type: &str, error: &Error) -> Directive;
}

/// Default supervisor: log the failure and keep the actor running.
#[derive(Clone, Debug, Default)]
pub struct LoggingSupervisor;

impl Supervisor for LoggingSupervisor {
    fn handle_failure(&self, pid: &Pid, message_type: &str, error: &Error) -> Directive {
        warn!(
            "Actor {} failed while handling {}: {}",
            pid, message_type, error
        );
        Directive::Resume
    }
}
