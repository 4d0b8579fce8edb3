// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Errors module
//!

use crate::Pid;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for the actor runtime.
///
/// Failures inside a message handler never propagate to the sender; they are
/// reported to the supervision collaborator instead. Only request callers
/// observe failures, and only as a resolved error value on their pending
/// request.
#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
pub enum Error {
    /// A message handler failed.
    #[error("A message handler failed: {0}.")]
    Handler(String),
    /// A request was not answered before its deadline.
    #[error("Request to actor {0} timed out.")]
    Timeout(Pid),
    /// A message was addressed to an identity with no registered mailbox.
    #[error("No mailbox registered for actor {0}.")]
    DeadLetter(Pid),
    /// An actor with the same identity is already registered.
    #[error("Actor {0} already exists.")]
    Exists(Pid),
    /// An error occurred while spawning an actor.
    #[error("An error occurred while spawning an actor: {0}.")]
    Spawn(String),
    /// An error occurred while stopping an actor.
    #[error("An error occurred while stopping an actor: {0}.")]
    Stop(String),
    /// An error occurred while sending a message.
    #[error("An error occurred while sending a message: {0}.")]
    Send(String),
    /// The actor system is shutting down.
    #[error("The actor system is shutting down.")]
    Down,
    /// Error that does not compromise the operation of the system.
    #[error("Error: {0}")]
    Functional(String),
}
