// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the request/response protocol: timeouts, late
//! replies and unknown targets.

use actor::{Actor, ActorContext, ActorSystem, Error, Pid, Props};
use async_trait::async_trait;

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Ping;

/// Accepts every message and never responds.
pub struct Silent;

#[async_trait]
impl Actor for Silent {
    async fn receive(&mut self, _ctx: &mut ActorContext) -> Result<(), Error> {
        Ok(())
    }
}

/// Responds after a delay longer than the caller is willing to wait.
pub struct SlowResponder;

#[async_trait]
impl Actor for SlowResponder {
    async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
        tokio::time::sleep(Duration::from_millis(300)).await;
        ctx.respond("late".to_string()).await;
        Ok(())
    }
}

#[tokio::test]
async fn test_ask_times_out_against_a_silent_target() {
    let system = ActorSystem::new();
    let root = system.root();
    let silent = root.spawn(Props::from_producer(|| Silent)).await.unwrap();

    let started = Instant::now();
    let err = root
        .ask_with_timeout(&silent, Ping, Duration::from_secs(1))
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err, Error::Timeout(silent));
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_secs(2));
    assert_eq!(system.pending_requests().await, 0);
}

#[tokio::test]
async fn test_repeated_timeouts_do_not_leak_pending_entries() {
    let system = ActorSystem::new();
    let root = system.root();
    let silent = root.spawn(Props::from_producer(|| Silent)).await.unwrap();

    for _ in 0..5 {
        let err = root
            .ask_with_timeout(&silent, Ping, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert_eq!(err, Error::Timeout(silent.clone()));
    }

    assert_eq!(system.pending_requests().await, 0);
}

#[tokio::test]
async fn test_late_reply_after_timeout_is_dropped() {
    let system = ActorSystem::new();
    let root = system.root();
    let slow = root
        .spawn(Props::from_producer(|| SlowResponder))
        .await
        .unwrap();

    let err = root
        .ask_with_timeout(&slow, Ping, Duration::from_millis(100))
        .await
        .unwrap_err();
    assert_eq!(err, Error::Timeout(slow.clone()));

    // Let the delayed response arrive after the pending entry is gone.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(system.pending_requests().await, 0);

    // The actor is still alive and answers the next request.
    let reply = root.ask(&slow, Ping).await.unwrap();
    assert_eq!(reply.downcast_ref::<String>().unwrap(), "late");
}

#[tokio::test]
async fn test_ask_to_unknown_target_fails_fast() {
    let system = ActorSystem::new();
    let root = system.root();
    let ghost = Pid::local("ghost");

    let started = Instant::now();
    let err = root.ask(&ghost, Ping).await.unwrap_err();

    assert_eq!(err, Error::DeadLetter(ghost));
    assert!(started.elapsed() < Duration::from_millis(100));
    assert_eq!(system.pending_requests().await, 0);
}
