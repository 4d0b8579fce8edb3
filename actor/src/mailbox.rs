// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Mailbox
//!
//! The `mailbox` module provides the per-actor inbox and its dispatch loop. A
//! mailbox owns an unbounded FIFO queue of envelopes and a single atomic
//! "running" flag. Posting never blocks and is safe from any number of
//! concurrent producers; draining is single flight, so no two handler
//! invocations for the same actor ever overlap, while different mailboxes
//! drain concurrently on the shared worker pool.
//!

use crate::{
    Error, Pid,
    actor::{Actor, Started, Stopping},
    context::ActorContext,
    supervision::Directive,
    system::ActorSystem,
};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, error};

use std::{
    any::Any,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// Type-erased message payload.
///
/// Messages travel through mailboxes without a compile-time type; each actor
/// matches the variants it accepts at runtime and ignores or dead-letters the
/// rest. The payload is reference counted, so cloning an `AnyMessage` (for
/// example to broadcast it to several routees) never copies the underlying
/// value.
///
/// # Examples
///
/// ```ignore
/// use actor::AnyMessage;
///
/// let message = AnyMessage::new("hello".to_string());
/// assert_eq!(message.downcast_ref::<String>().unwrap(), "hello");
/// assert!(message.downcast_ref::<u32>().is_none());
/// ```
#[derive(Clone)]
pub struct AnyMessage {
    /// The shared payload.
    payload: Arc<dyn Any + Send + Sync>,
    /// Type name of the payload, kept for diagnostics and dead letters.
    type_name: &'static str,
}

impl AnyMessage {
    /// Wraps a value for delivery through a mailbox.
    pub fn new<M>(message: M) -> Self
    where
        M: Any + Send + Sync,
    {
        Self {
            payload: Arc::new(message),
            type_name: std::any::type_name::<M>(),
        }
    }

    /// Borrows the payload as `M`, if it has that type.
    pub fn downcast_ref<M: Any>(&self) -> Option<&M> {
        self.payload.downcast_ref::<M>()
    }

    /// True if the payload has type `M`.
    pub fn is<M: Any>(&self) -> bool {
        self.payload.is::<M>()
    }

    /// Type name of the payload.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for AnyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyMessage")
            .field("type", &self.type_name)
            .finish()
    }
}

/// A queued unit of delivery.
///
/// Control signals travel through the same FIFO as user messages, so a stop
/// takes effect in mailbox order: everything enqueued before it is processed
/// first.
pub(crate) enum Envelope {
    /// An ordinary message together with the identity that sent it.
    Message {
        message: AnyMessage,
        sender: Option<Pid>,
    },
    /// Runs the actor's `pre_start` hook. Enqueued once at spawn, ahead of
    /// anything a caller can send.
    Start,
    /// Tears the actor down. The optional channel resolves once teardown
    /// finished.
    Stop { done: Option<oneshot::Sender<()>> },
}

/// Per-actor inbox plus the single-flight dispatch guarantee.
///
/// The queue is an unbounded MPMC channel; the `running` flag guarantees that
/// at most one drain loop is active per mailbox at any instant, even under
/// concurrent posts from many producers. All actor state behind the mailbox is
/// touched exclusively from within the drain, which is what lets behavior
/// stacks and routee sets live without locks of their own.
pub struct Mailbox {
    /// Identity of the actor this mailbox belongs to.
    pid: Pid,
    /// Producer side of the queue.
    queue: Sender<Envelope>,
    /// Consumer side of the queue, popped only by the active drain.
    inbox: Receiver<Envelope>,
    /// True while a drain loop is scheduled or running.
    running: AtomicBool,
    /// True once the actor has been torn down.
    stopped: AtomicBool,
    /// The actor instance. The single-flight drain is the only contender for
    /// this lock.
    cell: Mutex<Box<dyn Actor>>,
}

impl Mailbox {
    /// Creates a mailbox for a freshly produced actor instance.
    pub(crate) fn new(pid: Pid, actor: Box<dyn Actor>) -> Arc<Self> {
        debug!("Creating mailbox for actor {}.", pid);
        let (queue, inbox) = unbounded();
        Arc::new(Self {
            pid,
            queue,
            inbox,
            running: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            cell: Mutex::new(actor),
        })
    }

    /// Identity of the actor this mailbox belongs to.
    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    /// True once the actor has been torn down.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Enqueues an envelope and schedules a drain if none is active.
    ///
    /// Never blocks the caller and is safe from any number of concurrent
    /// callers.
    pub(crate) fn post(self: Arc<Self>, envelope: Envelope, system: &ActorSystem) {
        // Both channel ends live as long as the mailbox, so the send cannot
        // fail.
        let _ = self.queue.send(envelope);
        self.schedule(system);
    }

    /// Arms a drain on the worker pool unless one is already running.
    fn schedule(self: Arc<Self>, system: &ActorSystem) {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let system = system.clone();
            let dispatcher = system.dispatcher();
            dispatcher.schedule(Box::pin(async move {
                self.drain(system).await;
            }));
        }
    }

    /// Processes queued envelopes one at a time until the queue is observed
    /// empty.
    ///
    /// After clearing the `running` flag the queue is checked again to close
    /// the race where a post arrived concurrently with the last pop; the drain
    /// re-arms itself in that case so no message is stranded.
    async fn drain(self: Arc<Self>, system: ActorSystem) {
        loop {
            while let Ok(envelope) = self.inbox.try_recv() {
                self.invoke(envelope, &system).await;
            }
            self.running.store(false, Ordering::Release);
            if self.inbox.is_empty() {
                break;
            }
            if self
                .running
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                // Another post already re-armed a drain.
                break;
            }
        }
    }

    /// Runs one envelope through the actor.
    async fn invoke(&self, envelope: Envelope, system: &ActorSystem) {
        match envelope {
            Envelope::Start => {
                let mut cell = self.cell.lock().await;
                let mut ctx = ActorContext::new(
                    system.clone(),
                    self.pid.clone(),
                    None,
                    AnyMessage::new(Started),
                );
                if let Err(err) = cell.pre_start(&mut ctx).await {
                    error!("Actor {} failed to start: {}", self.pid, err);
                    self.fail(system, &mut cell, std::any::type_name::<Started>(), err)
                        .await;
                }
            }
            Envelope::Stop { done } => {
                let mut cell = self.cell.lock().await;
                self.terminate(system, &mut cell, done).await;
            }
            Envelope::Message { message, sender } => {
                if self.is_stopped() {
                    system
                        .dead_letter(Some(self.pid.clone()), message, sender)
                        .await;
                    return;
                }
                let message_type = message.type_name();
                let mut cell = self.cell.lock().await;
                let mut ctx = ActorContext::new(
                    system.clone(),
                    self.pid.clone(),
                    sender,
                    message,
                );
                if let Err(err) = cell.receive(&mut ctx).await {
                    self.fail(system, &mut cell, message_type, err).await;
                }
            }
        }
    }

    /// Reports a handler failure to the supervision collaborator and applies
    /// its directive. The failure never reaches the sender and never crashes
    /// the drain.
    async fn fail(
        &self,
        system: &ActorSystem,
        cell: &mut Box<dyn Actor>,
        message_type: &str,
        error: Error,
    ) {
        match system
            .supervisor()
            .handle_failure(&self.pid, message_type, &error)
        {
            Directive::Resume => {
                debug!("Actor {} resumes after failure.", self.pid);
            }
            Directive::Stop => {
                self.terminate(system, cell, None).await;
            }
        }
    }

    /// Tears the actor down: unregisters the identity, runs `post_stop` and
    /// resolves any stop confirmations. Later envelopes drain to dead letters.
    async fn terminate(
        &self,
        system: &ActorSystem,
        cell: &mut Box<dyn Actor>,
        done: Option<oneshot::Sender<()>>,
    ) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            system.directory().unregister(&self.pid).await;
            let mut ctx = ActorContext::new(
                system.clone(),
                self.pid.clone(),
                None,
                AnyMessage::new(Stopping),
            );
            if let Err(err) = cell.post_stop(&mut ctx).await {
                error!("Actor {} failed while stopping: {}", self.pid, err);
            }
            debug!("Actor {} is terminated.", self.pid);
        }
        if let Some(done) = done {
            let _ = done.send(());
        }
    }
}
