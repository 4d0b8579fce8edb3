// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! Dead letter collaborator
//!
//! A dead letter is a message that could not be delivered to any live mailbox.
//! Undeliverable messages are never silently dropped and never surface as an
//! error to a fire-and-forget sender; they are handed to the configured sink.
//!

use crate::{AnyMessage, Pid};

use async_trait::async_trait;
use tracing::warn;

/// An undeliverable message.
#[derive(Clone, Debug)]
pub struct DeadLetter {
    /// The identity the message was addressed to. `None` when a handler
    /// responded without a sender to reply to.
    pub target: Option<Pid>,
    /// The message that could not be delivered.
    pub message: AnyMessage,
    /// The identity that sent the message, if any.
    pub sender: Option<Pid>,
}

/// Receives messages that could not be delivered.
#[async_trait]
pub trait DeadLetterSink: Send + Sync + 'static {
    /// Called for every undeliverable message.
    async fn deliver(&self, letter: DeadLetter);
}

/// Default sink: log the dead letter and move on.
#[derive(Clone, Debug, Default)]
pub struct LogDeadLetterSink;

#[async_trait]
impl DeadLetterSink for LogDeadLetterSink {
    async fn deliver(&self, letter: DeadLetter) {
        match &letter.target {
            Some(target) => warn!(
                "Dead letter: message {} to unknown actor {}.",
                letter.message.type_name(),
                target
            ),
            None => warn!(
                "Dead letter: response {} has no sender to reply to.",
                letter.message.type_name()
            ),
        }
    }
}
