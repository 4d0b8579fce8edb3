// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for actor lifecycle, dead letters and the supervision
//! hook.

use actor::{
    Actor, ActorContext, ActorSystem, DeadLetter, DeadLetterSink, Directive,
    Error, Pid, Props, Supervisor,
};
use async_trait::async_trait;
use tracing_test::traced_test;

use std::{
    sync::Arc,
    time::Duration,
};

use tokio::sync::Mutex;

#[derive(Clone, Debug)]
pub struct Ping;

#[derive(Clone, Debug)]
pub struct Boom;

/// Sink that keeps every dead letter for inspection.
#[derive(Clone, Default)]
pub struct CollectingSink {
    letters: Arc<Mutex<Vec<DeadLetter>>>,
}

#[async_trait]
impl DeadLetterSink for CollectingSink {
    async fn deliver(&self, letter: DeadLetter) {
        self.letters.lock().await.push(letter);
    }
}

/// Supervisor that stops the failing actor.
#[derive(Clone, Debug, Default)]
pub struct StopOnFailure;

impl Supervisor for StopOnFailure {
    fn handle_failure(&self, _pid: &Pid, _message_type: &str, _error: &Error) -> Directive {
        Directive::Stop
    }
}

/// Becomes ready in its start hook and reports readiness on request.
pub struct Greeter {
    ready: bool,
}

#[async_trait]
impl Actor for Greeter {
    async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
        if ctx.message().is::<Ping>() {
            ctx.respond(self.ready).await;
        }
        Ok(())
    }

    async fn pre_start(&mut self, _ctx: &mut ActorContext) -> Result<(), Error> {
        self.ready = true;
        Ok(())
    }
}

/// Fails on `Boom`, answers anything else.
pub struct Faulty;

#[async_trait]
impl Actor for Faulty {
    async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
        if ctx.message().is::<Boom>() {
            return Err(Error::Handler("boom".to_owned()));
        }
        ctx.respond("alive".to_string()).await;
        Ok(())
    }
}

#[tokio::test]
async fn test_pre_start_runs_before_the_first_message() {
    let system = ActorSystem::new();
    let root = system.root();
    let greeter = root
        .spawn(Props::from_producer(|| Greeter { ready: false }))
        .await
        .unwrap();

    // The message is queued behind the start hook even though it is sent
    // right after spawn returns.
    let reply = root.ask(&greeter, Ping).await.unwrap();
    assert_eq!(reply.downcast_ref::<bool>(), Some(&true));
}

#[tokio::test]
async fn test_tell_to_unknown_target_goes_to_dead_letters() {
    let sink = CollectingSink::default();
    let system = ActorSystem::builder()
        .dead_letter_sink(sink.clone())
        .build();
    let root = system.root();
    let nobody = Pid::local("nobody");

    // Fire-and-forget sends never surface delivery failures.
    root.tell(&nobody, "hi".to_string()).await;

    let letters = sink.letters.lock().await;
    assert_eq!(letters.len(), 1);
    assert_eq!(letters[0].target.as_ref(), Some(&nobody));
    assert!(letters[0].message.is::<String>());
    assert!(letters[0].sender.is_none());
}

#[tokio::test]
async fn test_messages_after_stop_are_dead_lettered() {
    let sink = CollectingSink::default();
    let system = ActorSystem::builder()
        .dead_letter_sink(sink.clone())
        .build();
    let root = system.root();

    let greeter = root
        .spawn(Props::from_producer(|| Greeter { ready: false }))
        .await
        .unwrap();
    root.ask_stop(&greeter).await.unwrap();

    root.tell(&greeter, Ping).await;

    let letters = sink.letters.lock().await;
    assert_eq!(letters.len(), 1);
    assert_eq!(letters[0].target.as_ref(), Some(&greeter));
}

#[tokio::test]
async fn test_respond_without_sender_goes_to_dead_letters() {
    let sink = CollectingSink::default();
    let system = ActorSystem::builder()
        .dead_letter_sink(sink.clone())
        .build();
    let root = system.root();

    let faulty = root.spawn(Props::from_producer(|| Faulty)).await.unwrap();

    // A tell carries no reply address, so the response has nowhere to go.
    root.tell(&faulty, Ping).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let letters = sink.letters.lock().await;
    assert_eq!(letters.len(), 1);
    assert!(letters[0].target.is_none());
}

#[tokio::test]
#[traced_test]
async fn test_handler_failure_resumes_by_default() {
    let system = ActorSystem::new();
    let root = system.root();
    let faulty = root.spawn(Props::from_producer(|| Faulty)).await.unwrap();

    root.tell(&faulty, Boom).await;

    // The failure is logged and the actor keeps processing its queue.
    let reply = root.ask(&faulty, Ping).await.unwrap();
    assert_eq!(reply.downcast_ref::<String>().unwrap(), "alive");
    assert!(logs_contain("failed while handling"));
}

#[tokio::test]
async fn test_supervisor_stop_directive_tears_the_actor_down() {
    let system = ActorSystem::builder().supervisor(StopOnFailure).build();
    let root = system.root();
    let faulty = root.spawn(Props::from_producer(|| Faulty)).await.unwrap();

    root.tell(&faulty, Boom).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let err = root.ask(&faulty, Ping).await.unwrap_err();
    assert_eq!(err, Error::DeadLetter(faulty));
}
