// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Actor system
//!
//! The `system` module wires the collaborators together: the directory that
//! resolves identities, the request table that correlates replies, the worker
//! pool that runs drain steps, and the supervision and dead-letter hooks.
//!

use crate::{
    AnyMessage, Error, Pid,
    actor::Props,
    context::RootContext,
    dead_letter::{DeadLetter, DeadLetterSink, LogDeadLetterSink},
    directory::{Directory, InMemoryDirectory},
    dispatcher::{Dispatcher, TokioDispatcher},
    mailbox::{Envelope, Mailbox},
    request::RequestTable,
    supervision::{LoggingSupervisor, Supervisor},
};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

/// Shared state behind every handle to one actor system.
struct SystemInner {
    /// Resolves identities to mailboxes.
    directory: Arc<dyn Directory>,
    /// Pending requests keyed by correlation token.
    requests: RequestTable,
    /// Worker pool running mailbox drains.
    dispatcher: Arc<dyn Dispatcher>,
    /// Receives handler failures.
    supervisor: Arc<dyn Supervisor>,
    /// Receives undeliverable messages.
    dead_letters: Arc<dyn DeadLetterSink>,
    /// Source of generated actor names.
    next_actor: AtomicU64,
    /// Cancelled when the system shuts down; spawns are refused afterwards.
    token: CancellationToken,
}

/// Handle to one actor system.
///
/// Cloning is cheap; all clones share the same directory, request table and
/// collaborators. Use [`root`](Self::root) to obtain the caller-side context
/// for spawning and messaging.
///
/// # Examples
///
/// ```ignore
/// use actor::{ActorSystem, Props};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = ActorSystem::new();
///     let root = system.root();
///
///     let counter = root.spawn(Props::from_producer(|| Counter { value: 0 })).await?;
///     root.tell(&counter, Increment(5)).await;
///     let value = root.ask(&counter, GetValue).await?;
///
///     system.shutdown().await;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<SystemInner>,
}

impl ActorSystem {
    /// Creates a system with the default collaborators: in-memory directory,
    /// Tokio dispatcher, logging supervisor and logging dead-letter sink.
    pub fn new() -> Self {
        ActorSystemBuilder::default().build()
    }

    /// Starts building a system with custom collaborators.
    pub fn builder() -> ActorSystemBuilder {
        ActorSystemBuilder::default()
    }

    /// The caller-side context for code running outside any actor.
    pub fn root(&self) -> RootContext {
        RootContext::new(self.clone())
    }

    /// Number of requests still waiting for a reply. Diagnostic accessor.
    pub async fn pending_requests(&self) -> usize {
        self.inner.requests.len().await
    }

    /// Stops every registered actor and refuses further spawns.
    ///
    /// Each stop is confirmed before the call returns.
    pub async fn shutdown(&self) {
        debug!("Stopping actor system...");
        self.inner.token.cancel();
        for pid in self.inner.directory.pids().await {
            let _ = self.stop_and_wait(&pid).await;
        }
        debug!("Actor system stopped.");
    }

    pub(crate) fn dispatcher(&self) -> Arc<dyn Dispatcher> {
        Arc::clone(&self.inner.dispatcher)
    }

    pub(crate) fn directory(&self) -> &Arc<dyn Directory> {
        &self.inner.directory
    }

    pub(crate) fn supervisor(&self) -> &Arc<dyn Supervisor> {
        &self.inner.supervisor
    }

    /// Registers a new actor and queues its start hook.
    pub(crate) async fn spawn(
        &self,
        props: &Props,
        name: Option<String>,
    ) -> Result<Pid, Error> {
        if self.inner.token.is_cancelled() {
            return Err(Error::Down);
        }
        let id = match name {
            Some(name) => name,
            None => format!(
                "actor-{}",
                self.inner.next_actor.fetch_add(1, Ordering::Relaxed)
            ),
        };
        let pid = Pid::local(id);
        let mailbox = Mailbox::new(pid.clone(), props.produce());
        self.inner
            .directory
            .register(pid.clone(), Arc::clone(&mailbox))
            .await?;
        mailbox.post(Envelope::Start, self);
        debug!("Spawned actor {}.", pid);
        Ok(pid)
    }

    /// Routes an envelope to its target.
    ///
    /// A reply address resolves the matching pending request; anything else
    /// goes through the directory. Undeliverable messages are handed to the
    /// dead-letter sink.
    ///
    /// # Returns
    ///
    /// Returns true if the message reached a mailbox or a pending request.
    ///
    pub(crate) async fn send(
        &self,
        target: &Pid,
        message: AnyMessage,
        sender: Option<Pid>,
    ) -> bool {
        if target.is_reply() {
            match target.reply_token() {
                Some(token) => {
                    self.inner.requests.resolve(token, message).await;
                    return true;
                }
                None => {
                    self.dead_letter(Some(target.clone()), message, sender).await;
                    return false;
                }
            }
        }
        match self.inner.directory.lookup(target).await {
            Some(mailbox) => {
                mailbox.post(Envelope::Message { message, sender }, self);
                true
            }
            None => {
                self.dead_letter(Some(target.clone()), message, sender).await;
                false
            }
        }
    }

    /// Creates a pending request, sends the message with the matching reply
    /// address as sender and waits for the resolution.
    pub(crate) async fn request(
        &self,
        target: &Pid,
        message: AnyMessage,
        timeout: Option<Duration>,
    ) -> Result<AnyMessage, Error> {
        let (token, receiver) = self.inner.requests.create().await;
        let reply_address = Pid::reply(token);
        if !self.send(target, message, Some(reply_address)).await {
            self.inner.requests.remove(token).await;
            return Err(Error::DeadLetter(target.clone()));
        }
        match timeout {
            Some(deadline) => match tokio::time::timeout(deadline, receiver).await {
                Ok(Ok(reply)) => Ok(reply),
                Ok(Err(err)) => Err(Error::Send(err.to_string())),
                Err(_) => {
                    self.inner.requests.remove(token).await;
                    Err(Error::Timeout(target.clone()))
                }
            },
            None => receiver
                .await
                .map_err(|err| Error::Send(err.to_string())),
        }
    }

    /// Queues a stop control message for an actor.
    ///
    /// # Returns
    ///
    /// Returns false if the identity has no registered mailbox.
    ///
    pub(crate) async fn stop(
        &self,
        target: &Pid,
        done: Option<oneshot::Sender<()>>,
    ) -> bool {
        match self.inner.directory.lookup(target).await {
            Some(mailbox) => {
                mailbox.post(Envelope::Stop { done }, self);
                true
            }
            None => {
                debug!("Stop requested for unknown actor {}.", target);
                false
            }
        }
    }

    /// Queues a stop and waits for the teardown confirmation.
    pub(crate) async fn stop_and_wait(&self, target: &Pid) -> Result<(), Error> {
        let (done, confirmed) = oneshot::channel();
        if !self.stop(target, Some(done)).await {
            // Already gone.
            return Ok(());
        }
        confirmed
            .await
            .map_err(|err| Error::Stop(err.to_string()))
    }

    /// Hands an undeliverable message to the dead-letter sink.
    pub(crate) async fn dead_letter(
        &self,
        target: Option<Pid>,
        message: AnyMessage,
        sender: Option<Pid>,
    ) {
        self.inner
            .dead_letters
            .deliver(DeadLetter {
                target,
                message,
                sender,
            })
            .await;
    }
}

impl Default for ActorSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder assembling an actor system from custom collaborators.
///
/// Every collaborator is optional; missing ones fall back to the defaults.
///
/// # Examples
///
/// ```ignore
/// let system = ActorSystem::builder()
///     .dead_letter_sink(CollectingSink::default())
///     .build();
/// ```
#[derive(Default)]
pub struct ActorSystemBuilder {
    directory: Option<Arc<dyn Directory>>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    supervisor: Option<Arc<dyn Supervisor>>,
    dead_letters: Option<Arc<dyn DeadLetterSink>>,
}

impl ActorSystemBuilder {
    /// Uses a custom directory.
    pub fn directory(mut self, directory: impl Directory) -> Self {
        self.directory = Some(Arc::new(directory));
        self
    }

    /// Uses a custom worker pool.
    pub fn dispatcher(mut self, dispatcher: impl Dispatcher) -> Self {
        self.dispatcher = Some(Arc::new(dispatcher));
        self
    }

    /// Uses a custom supervision hook.
    pub fn supervisor(mut self, supervisor: impl Supervisor) -> Self {
        self.supervisor = Some(Arc::new(supervisor));
        self
    }

    /// Uses a custom dead-letter sink.
    pub fn dead_letter_sink(mut self, sink: impl DeadLetterSink) -> Self {
        self.dead_letters = Some(Arc::new(sink));
        self
    }

    /// Assembles the system.
    pub fn build(self) -> ActorSystem {
        ActorSystem {
            inner: Arc::new(SystemInner {
                directory: self
                    .directory
                    .unwrap_or_else(|| Arc::new(InMemoryDirectory::default())),
                requests: RequestTable::new(),
                dispatcher: self
                    .dispatcher
                    .unwrap_or_else(|| Arc::new(TokioDispatcher)),
                supervisor: self
                    .supervisor
                    .unwrap_or_else(|| Arc::new(LoggingSupervisor)),
                dead_letters: self
                    .dead_letters
                    .unwrap_or_else(|| Arc::new(LogDeadLetterSink)),
                next_actor: AtomicU64::new(1),
                token: CancellationToken::new(),
            }),
        }
    }
}
