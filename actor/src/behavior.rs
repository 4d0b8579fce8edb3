// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Behavior stack
//!
//! The `behavior` module provides a stack of message handlers attached to one
//! actor, the finite-state-machine building block. The top of the stack is the
//! active handler; `r#become` swaps it, `become_stacked` nests a new state on
//! top and `unbecome_stacked` pops back to the previous one. The stack is
//! mutated only from the owning actor's handler code, which the mailbox runs
//! single flight, so no synchronization is needed.
//!

use crate::{Error, context::ActorContext};

use futures::future::BoxFuture;
use tracing::debug;

use std::sync::Arc;

/// One state's message handler.
///
/// Handlers receive the actor itself, so they reach the owning `Behavior`
/// through a field of the actor rather than by capturing it. Plain functions
/// coerce directly:
///
/// ```ignore
/// fn off<'a>(
///     bulb: &'a mut LightBulb,
///     ctx: &'a mut ActorContext,
/// ) -> BoxFuture<'a, Result<(), Error>> {
///     Box::pin(async move {
///         if ctx.message().is::<PressSwitch>() {
///             ctx.respond("Turning on".to_string()).await;
///             bulb.behavior.r#become(Arc::new(LightBulb::on));
///         }
///         Ok(())
///     })
/// }
/// ```
pub type Receive<A> = Arc<
    dyn for<'a> Fn(&'a mut A, &'a mut ActorContext) -> BoxFuture<'a, Result<(), Error>>
        + Send
        + Sync,
>;

/// Stack of message handlers for one actor.
///
/// The stack is never empty: it is created with an initial handler and the
/// lowest entry cannot be popped.
pub struct Behavior<A> {
    /// The handler stack, top at the end.
    stack: Vec<Receive<A>>,
}

impl<A> Behavior<A> {
    /// Creates a stack with its initial handler.
    pub fn new(initial: Receive<A>) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    /// Replaces the active handler.
    ///
    /// The previous top entry is discarded, not retained beneath; use
    /// [`become_stacked`](Self::become_stacked) to nest states instead.
    /// Raw identifier because `become` is reserved.
    pub fn r#become(&mut self, receive: Receive<A>) {
        self.stack.pop();
        self.stack.push(receive);
    }

    /// Pushes a new active handler, retaining the previous one beneath it.
    pub fn become_stacked(&mut self, receive: Receive<A>) {
        self.stack.push(receive);
    }

    /// Pops the active handler, restoring the one beneath it.
    ///
    /// Popping the last remaining handler is ignored: the stack never becomes
    /// empty while the actor is alive.
    pub fn unbecome_stacked(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            debug!("Ignored attempt to pop the last behavior.");
        }
    }

    /// Number of stacked handlers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The currently active handler.
    ///
    /// The handler is cloned out of the stack so the caller can invoke it with
    /// the actor while the actor keeps owning the stack:
    ///
    /// ```ignore
    /// let receive = self.behavior.current();
    /// (*receive)(self, ctx).await
    /// ```
    pub fn current(&self) -> Receive<A> {
        // The stack is non-empty from construction on.
        Arc::clone(&self.stack[self.stack.len() - 1])
    }
}
