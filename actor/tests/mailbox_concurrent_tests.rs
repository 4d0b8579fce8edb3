// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! Concurrency tests for the mailbox dispatch loop: per-sender ordering,
//! single-flight handler execution and queue draining on stop.

use actor::{Actor, ActorContext, ActorSystem, Error, Props};
use async_trait::async_trait;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

#[derive(Clone, Debug)]
pub struct Record(u64);

#[derive(Clone, Debug)]
pub struct Snapshot;

#[derive(Clone, Debug)]
pub struct Work;

#[derive(Clone, Debug)]
pub struct Count;

/// Collects the payloads it was sent, in processing order.
#[derive(Default)]
pub struct Recorder {
    values: Vec<u64>,
}

#[async_trait]
impl Actor for Recorder {
    async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
        if let Some(Record(value)) = ctx.message().downcast_ref() {
            self.values.push(*value);
        } else if ctx.message().is::<Snapshot>() {
            ctx.respond(self.values.clone()).await;
        }
        Ok(())
    }
}

/// Detects overlapping handler invocations through a shared counter.
pub struct Exclusive {
    active: Arc<AtomicUsize>,
    overlapped: Arc<AtomicBool>,
    processed: usize,
}

#[async_trait]
impl Actor for Exclusive {
    async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
        if ctx.message().is::<Work>() {
            if self.active.fetch_add(1, Ordering::SeqCst) > 0 {
                self.overlapped.store(true, Ordering::SeqCst);
            }
            tokio::task::yield_now().await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            self.processed += 1;
        } else if ctx.message().is::<Count>() {
            ctx.respond(self.processed).await;
        }
        Ok(())
    }
}

/// Counts processed messages and records the final tally on teardown.
pub struct Tally {
    processed: usize,
    final_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Actor for Tally {
    async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
        if ctx.message().is::<Work>() {
            self.processed += 1;
        }
        Ok(())
    }

    async fn post_stop(&mut self, _ctx: &mut ActorContext) -> Result<(), Error> {
        self.final_count.store(self.processed, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn test_messages_from_one_sender_arrive_in_order() {
    let system = ActorSystem::new();
    let root = system.root();
    let recorder = root
        .spawn(Props::from_producer(Recorder::default))
        .await
        .unwrap();

    for value in 0..500u64 {
        root.tell(&recorder, Record(value)).await;
    }

    // The snapshot request is queued behind every prior send from this
    // caller, so it observes all of them.
    let reply = root.ask(&recorder, Snapshot).await.unwrap();
    let values = reply.downcast_ref::<Vec<u64>>().unwrap();
    let expected: Vec<u64> = (0..500).collect();
    assert_eq!(values, &expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_overlapping_handler_invocations() {
    let system = ActorSystem::new();
    let root = system.root();

    let active = Arc::new(AtomicUsize::new(0));
    let overlapped = Arc::new(AtomicBool::new(false));
    let active_clone = Arc::clone(&active);
    let overlapped_clone = Arc::clone(&overlapped);

    let exclusive = root
        .spawn(Props::from_producer(move || Exclusive {
            active: Arc::clone(&active_clone),
            overlapped: Arc::clone(&overlapped_clone),
            processed: 0,
        }))
        .await
        .unwrap();

    let producers = 8;
    let per_producer = 100;
    let mut tasks = Vec::new();
    for _ in 0..producers {
        let root = root.clone();
        let pid = exclusive.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..per_producer {
                root.tell(&pid, Work).await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    // Wait until every message was processed.
    let expected = producers * per_producer;
    let mut processed = 0;
    for _ in 0..100 {
        let reply = root.ask(&exclusive, Count).await.unwrap();
        processed = *reply.downcast_ref::<usize>().unwrap();
        if processed == expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(processed, expected);
    assert!(!overlapped.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_stop_drains_prior_messages_before_teardown() {
    let system = ActorSystem::new();
    let root = system.root();

    let final_count = Arc::new(AtomicUsize::new(0));
    let final_count_clone = Arc::clone(&final_count);
    let tally = root
        .spawn(Props::from_producer(move || Tally {
            processed: 0,
            final_count: Arc::clone(&final_count_clone),
        }))
        .await
        .unwrap();

    for _ in 0..200 {
        root.tell(&tally, Work).await;
    }

    // The stop is a control message queued behind the sends above, and the
    // confirmation resolves only after the teardown hook ran.
    root.ask_stop(&tally).await.unwrap();
    assert_eq!(final_count.load(Ordering::SeqCst), 200);

    // Stopping an identity that is already gone resolves immediately.
    root.ask_stop(&tally).await.unwrap();
}
