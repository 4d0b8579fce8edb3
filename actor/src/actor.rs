// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Actor
//!
//! The `actor` module provides the `Actor` trait and the `Props` spawn
//! recipe. An actor is an isolated unit of state with a single-threaded
//! message handler, addressed by [`Pid`](crate::Pid). The mailbox guarantees
//! that `receive` never runs concurrently with itself for the same actor, so
//! actor state needs no synchronization of its own.
//!

use crate::{Error, context::ActorContext};

use async_trait::async_trait;

use std::sync::Arc;

/// Marker message visible through the context while `pre_start` runs.
#[derive(Clone, Debug)]
pub struct Started;

/// Marker message visible through the context while `post_stop` runs.
#[derive(Clone, Debug)]
pub struct Stopping;

/// Core trait implemented by every actor.
///
/// `receive` is invoked once per queued message with a fresh per-message
/// context carrying the payload, the sender and the actor's own identity. The
/// actor matches the message variants it accepts at runtime; anything else it
/// may ignore or hand to dead letters. Returning an error reports the failure
/// to the supervision collaborator, it never reaches the sender.
///
/// Handlers run to completion within one drain step and must not block the
/// worker pool on long external I/O; awaiting is fine, the pool keeps running
/// other actors' drains in the meantime.
///
/// # Examples
///
/// ```ignore
/// use actor::{Actor, ActorContext, Error};
/// use async_trait::async_trait;
///
/// struct Counter {
///     value: u64,
/// }
///
/// #[derive(Clone, Debug)]
/// struct Increment(u64);
///
/// #[derive(Clone, Debug)]
/// struct GetValue;
///
/// #[async_trait]
/// impl Actor for Counter {
///     async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
///         if let Some(Increment(amount)) = ctx.message().downcast_ref() {
///             self.value += amount;
///         } else if ctx.message().is::<GetValue>() {
///             ctx.respond(self.value).await;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Actor: Send + 'static {
    /// Handles one message.
    async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error>;

    /// Called before the first message is processed.
    ///
    /// Runs ahead of anything a caller can send; messages that arrive earlier
    /// are queued, not dropped. A failure here goes to the supervision
    /// collaborator like any handler failure.
    async fn pre_start(&mut self, _ctx: &mut ActorContext) -> Result<(), Error> {
        Ok(())
    }

    /// Called after the actor has been removed from the directory, before its
    /// teardown is confirmed to anyone waiting on it.
    async fn post_stop(&mut self, _ctx: &mut ActorContext) -> Result<(), Error> {
        Ok(())
    }
}

/// Recipe for spawning an actor.
///
/// A `Props` owns a producer that builds a fresh actor instance per spawn, so
/// the same recipe can be spawned any number of times.
///
/// # Examples
///
/// ```ignore
/// let props = Props::from_producer(|| Counter { value: 0 });
/// let pid = system.root().spawn(props).await?;
/// ```
#[derive(Clone)]
pub struct Props {
    /// Builds one actor instance.
    producer: Arc<dyn Fn() -> Box<dyn Actor> + Send + Sync>,
}

impl Props {
    /// Creates a recipe from an actor producer.
    pub fn from_producer<A, F>(producer: F) -> Self
    where
        A: Actor,
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(move || Box::new(producer())),
        }
    }

    /// Builds one actor instance.
    pub(crate) fn produce(&self) -> Box<dyn Actor> {
        (self.producer)()
    }
}
