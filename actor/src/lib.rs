// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Courier Actor Runtime
//!
//! An actor-model runtime for building concurrent systems in Rust. Actors are
//! isolated units of computation addressed by an opaque identity; each one
//! processes messages one at a time from a private mailbox while the runtime
//! overlaps work across actors on a shared worker pool. Communication happens
//! exclusively through asynchronous message passing, with a request/response
//! layer for callers that need a reply and routers for fanning messages out
//! over groups of actors.
//!
//! ## Overview
//!
//! In response to a message, an actor can:
//! - Make local decisions based on its current state
//! - Update its private internal state
//! - Send messages to other actors (including itself)
//! - Reply to the sender of the current message
//! - Spawn further actors
//! - Swap or stack its active behavior for the next message
//!
//! ## Core Architecture
//!
//! ### Mailboxes and dispatch
//!
//! Every actor owns a mailbox: an unbounded FIFO queue plus a single-flight
//! dispatch guarantee. Posting never blocks and is safe from any number of
//! concurrent producers; at most one drain loop per mailbox runs at any
//! instant, so no two handler invocations for the same actor ever overlap.
//! Messages from one sender to one receiver are processed in send order;
//! there is no ordering across different senders. Delivery is at most once.
//!
//! ### Identities and the directory
//!
//! Actors are addressed by [`Pid`], an opaque, comparable, serializable
//! identity. A directory collaborator resolves identities to live mailboxes;
//! messages addressed to an unregistered identity are handed to the
//! dead-letter collaborator and never surface as an error to a
//! fire-and-forget sender.
//!
//! ### Requests
//!
//! [`RootContext::ask`](crate::RootContext) correlates an asynchronous reply
//! to the waiting caller through a synthetic reply address. Timeouts resolve
//! the caller with a typed failure and actively remove the pending entry; the
//! target is not interrupted.
//!
//! ### Behaviors and routers
//!
//! A [`Behavior`] is a stack of message handlers attached to one actor,
//! enabling finite-state-machine style actors whose active handler is swapped
//! or nested at runtime. A [`Router`] is an actor that distributes messages
//! over a mutable set of routees through a pluggable policy; [`Broadcast`]
//! forwards every message to every member of the snapshot taken inside the
//! router's own drain step.
//!
//! ## Getting Started
//!
//! ```ignore
//! use actor::{Actor, ActorContext, ActorSystem, Error, Props};
//! use async_trait::async_trait;
//!
//! struct Counter {
//!     value: u64,
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Increment(u64);
//!
//! #[derive(Clone, Debug)]
//! struct GetValue;
//!
//! #[async_trait]
//! impl Actor for Counter {
//!     async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
//!         if let Some(Increment(amount)) = ctx.message().downcast_ref() {
//!             self.value += amount;
//!         } else if ctx.message().is::<GetValue>() {
//!             ctx.respond(self.value).await;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = ActorSystem::new();
//!     let root = system.root();
//!
//!     let counter = root.spawn(Props::from_producer(|| Counter { value: 0 })).await?;
//!     root.tell(&counter, Increment(5)).await;
//!     root.tell(&counter, Increment(3)).await;
//!
//!     let value = root.ask(&counter, GetValue).await?;
//!     assert_eq!(value.downcast_ref::<u64>(), Some(&8));
//!
//!     system.shutdown().await;
//!     Ok(())
//! }
//! ```
//!

// Private modules containing the implementation
mod actor;
mod behavior;
mod context;
mod dead_letter;
mod directory;
mod dispatcher;
mod error;
mod mailbox;
mod pid;
mod request;
mod router;
mod supervision;
mod system;

//
// Core Actor Types
//

/// The fundamental actor trait: one `receive` invocation per queued message,
/// plus optional lifecycle hooks.
pub use actor::Actor;

/// Spawn recipe producing a fresh actor instance per spawn.
pub use actor::Props;

/// Marker message visible to `pre_start` hooks.
pub use actor::Started;

/// Marker message visible to `post_stop` hooks.
pub use actor::Stopping;

//
// Identity and Messaging
//

/// Opaque, comparable, serializable actor identity.
pub use pid::Pid;

/// Type-erased, cheaply cloneable message payload.
pub use mailbox::AnyMessage;

/// Per-actor inbox with the single-flight dispatch guarantee. Exposed as the
/// value type of the directory collaborator.
pub use mailbox::Mailbox;

//
// Contexts
//

/// Per-message facade handed to a handler: the current envelope plus all
/// sending operations.
pub use context::ActorContext;

/// Caller-side facade used by code running outside any actor.
pub use context::RootContext;

//
// Behavior Stack
//

/// Stack of message handlers enabling finite-state-machine actors.
pub use behavior::Behavior;

/// One state's message handler, as stored on a behavior stack.
pub use behavior::Receive;

//
// Routers
//

/// Policy forwarding every message to every routee.
pub use router::Broadcast;

/// Actor distributing messages over a mutable routee set.
pub use router::Router;

/// Control messages a router intercepts before consulting its policy.
pub use router::RouterCommand;

/// Insertion-ordered routee set with constant-time membership.
pub use router::RouteeSet;

/// Reply to `RouterCommand::GetRoutees`.
pub use router::Routees;

/// Distribution policy of a router.
pub use router::RouterPolicy;

//
// Collaborators
//

/// Undeliverable message handed to the dead-letter sink.
pub use dead_letter::DeadLetter;

/// Receives messages that could not be delivered.
pub use dead_letter::DeadLetterSink;

/// Default dead-letter sink that logs and moves on.
pub use dead_letter::LogDeadLetterSink;

/// Registry collaborator mapping identities to mailboxes.
pub use directory::Directory;

/// Default in-memory directory.
pub use directory::InMemoryDirectory;

/// Worker pool collaborator running mailbox drain steps.
pub use dispatcher::Dispatcher;

/// Default dispatcher backed by the Tokio runtime.
pub use dispatcher::TokioDispatcher;

/// Action applied to an actor whose handler failed.
pub use supervision::Directive;

/// Decides how actor failures are handled.
pub use supervision::Supervisor;

/// Default supervisor: log the failure and keep the actor running.
pub use supervision::LoggingSupervisor;

//
// System and Errors
//

/// Handle to one actor system, wiring all collaborators together.
pub use system::ActorSystem;

/// Builder assembling an actor system from custom collaborators.
pub use system::ActorSystemBuilder;

/// Error type for the actor runtime.
pub use error::Error;
