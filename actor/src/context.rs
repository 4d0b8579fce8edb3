// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Contexts
//!
//! The `context` module provides the two facades through which messages enter
//! the system: the `RootContext` used by code outside any actor, and the
//! per-message `ActorContext` passed into a handler, which additionally knows
//! the current message, its sender and the actor's own identity.
//!
//! Fire-and-forget sends never surface a delivery failure to the caller; the
//! dead-letter collaborator is the only observer. Requests are the exception,
//! they resolve with a typed error on timeout or when the target is unknown.
//!

use crate::{
    AnyMessage, Error, Pid,
    actor::Props,
    system::ActorSystem,
};

use std::{any::Any, time::Duration};

/// Caller-side facade used by code running outside any actor.
///
/// Cloning is cheap; clones address the same actor system.
///
/// # Examples
///
/// ```ignore
/// let system = ActorSystem::new();
/// let root = system.root();
///
/// let pid = root.spawn(Props::from_producer(|| Greeter)).await?;
/// root.tell(&pid, "hello".to_string()).await;
/// let reply = root.ask(&pid, Greet).await?;
/// ```
#[derive(Clone)]
pub struct RootContext {
    /// The system this context sends through.
    system: ActorSystem,
}

impl RootContext {
    pub(crate) fn new(system: ActorSystem) -> Self {
        Self { system }
    }

    /// The actor system behind this context.
    pub fn system(&self) -> &ActorSystem {
        &self.system
    }

    /// Spawns an actor and returns its identity.
    ///
    /// The identity is usable immediately; messages sent before the actor
    /// finished initializing are queued, not dropped.
    pub async fn spawn(&self, props: Props) -> Result<Pid, Error> {
        self.system.spawn(&props, None).await
    }

    /// Spawns an actor under a caller-chosen name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Exists` if the name is already registered.
    ///
    pub async fn spawn_named(&self, name: &str, props: Props) -> Result<Pid, Error> {
        self.system.spawn(&props, Some(name.to_owned())).await
    }

    /// Sends a fire-and-forget message.
    pub async fn tell<M>(&self, target: &Pid, message: M)
    where
        M: Any + Send + Sync,
    {
        self.system
            .send(target, AnyMessage::new(message), None)
            .await;
    }

    /// Sends a message and waits for the reply.
    ///
    /// The caller suspends until the target (or whoever it delegates to)
    /// responds. Use [`ask_with_timeout`](Self::ask_with_timeout) to bound the
    /// wait.
    pub async fn ask<M>(&self, target: &Pid, message: M) -> Result<AnyMessage, Error>
    where
        M: Any + Send + Sync,
    {
        self.system
            .request(target, AnyMessage::new(message), None)
            .await
    }

    /// Sends a message and waits for the reply, up to a deadline.
    ///
    /// On timeout the pending request is removed and `Error::Timeout` is
    /// returned; a reply arriving later is dropped. The target still processes
    /// the message eventually, the timeout only cancels the waiting caller.
    pub async fn ask_with_timeout<M>(
        &self,
        target: &Pid,
        message: M,
        timeout: Duration,
    ) -> Result<AnyMessage, Error>
    where
        M: Any + Send + Sync,
    {
        self.system
            .request(target, AnyMessage::new(message), Some(timeout))
            .await
    }

    /// Requests an actor to stop, without waiting for its teardown.
    ///
    /// The stop is a control message processed in mailbox order, so messages
    /// sent before it are processed first.
    pub async fn tell_stop(&self, target: &Pid) {
        self.system.stop(target, None).await;
    }

    /// Requests an actor to stop and waits until it is torn down.
    ///
    /// Stopping an identity that is not registered resolves immediately.
    pub async fn ask_stop(&self, target: &Pid) -> Result<(), Error> {
        self.system.stop_and_wait(target).await
    }
}

/// Per-message facade handed to an actor's handler.
///
/// Besides the sending operations of [`RootContext`], it exposes the current
/// envelope: the message payload, the sender identity and the actor's own
/// identity. A fresh context is built for every message; handlers must not
/// keep it across messages.
pub struct ActorContext {
    /// The system this context sends through.
    system: ActorSystem,
    /// Identity of the actor handling the message.
    myself: Pid,
    /// Identity that sent the current message, if any.
    sender: Option<Pid>,
    /// Payload of the current message.
    message: AnyMessage,
}

impl ActorContext {
    pub(crate) fn new(
        system: ActorSystem,
        myself: Pid,
        sender: Option<Pid>,
        message: AnyMessage,
    ) -> Self {
        Self {
            system,
            myself,
            sender,
            message,
        }
    }

    /// The actor system behind this context.
    pub fn system(&self) -> &ActorSystem {
        &self.system
    }

    /// Identity of the actor handling the message.
    pub fn myself(&self) -> &Pid {
        &self.myself
    }

    /// Identity that sent the current message, if it came from an actor or a
    /// pending request.
    pub fn sender(&self) -> Option<&Pid> {
        self.sender.as_ref()
    }

    /// Payload of the current message.
    pub fn message(&self) -> &AnyMessage {
        &self.message
    }

    /// Spawns an actor and returns its identity.
    pub async fn spawn(&self, props: Props) -> Result<Pid, Error> {
        self.system.spawn(&props, None).await
    }

    /// Spawns an actor under a caller-chosen name.
    pub async fn spawn_named(&self, name: &str, props: Props) -> Result<Pid, Error> {
        self.system.spawn(&props, Some(name.to_owned())).await
    }

    /// Sends a fire-and-forget message. The envelope carries this actor as
    /// the sender.
    pub async fn tell<M>(&self, target: &Pid, message: M)
    where
        M: Any + Send + Sync,
    {
        self.system
            .send(target, AnyMessage::new(message), Some(self.myself.clone()))
            .await;
    }

    /// Forwards an already type-erased payload, preserving the sender of the
    /// current message. Routers use this so replies flow back to the original
    /// caller rather than to the router.
    pub async fn forward(&self, target: &Pid, message: AnyMessage) {
        self.system
            .send(target, message, self.sender.clone())
            .await;
    }

    /// Sends a message and waits for the reply.
    pub async fn ask<M>(&self, target: &Pid, message: M) -> Result<AnyMessage, Error>
    where
        M: Any + Send + Sync,
    {
        self.system
            .request(target, AnyMessage::new(message), None)
            .await
    }

    /// Sends a message and waits for the reply, up to a deadline.
    pub async fn ask_with_timeout<M>(
        &self,
        target: &Pid,
        message: M,
        timeout: Duration,
    ) -> Result<AnyMessage, Error>
    where
        M: Any + Send + Sync,
    {
        self.system
            .request(target, AnyMessage::new(message), Some(timeout))
            .await
    }

    /// Replies to the sender of the current message.
    ///
    /// If the sender is a pending request, this resolves it; if it is an
    /// actor, the reply lands in its mailbox. A reply with no sender to
    /// receive it goes to dead letters.
    pub async fn respond<M>(&self, message: M)
    where
        M: Any + Send + Sync,
    {
        let message = AnyMessage::new(message);
        match &self.sender {
            Some(sender) => {
                self.system
                    .send(sender, message, Some(self.myself.clone()))
                    .await;
            }
            None => {
                self.system.dead_letter(None, message, None).await;
            }
        }
    }

    /// Requests an actor to stop, without waiting for its teardown.
    pub async fn tell_stop(&self, target: &Pid) {
        self.system.stop(target, None).await;
    }

    /// Requests an actor to stop and waits until it is torn down.
    pub async fn ask_stop(&self, target: &Pid) -> Result<(), Error> {
        self.system.stop_and_wait(target).await
    }

    /// Requests this actor to stop once the messages already queued ahead are
    /// processed.
    pub async fn stop_self(&self) {
        self.system.stop(&self.myself, None).await;
    }
}
