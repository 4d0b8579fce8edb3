// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Dispatcher
//!
//! The `dispatcher` module provides the worker pool collaborator. The core
//! only requires fire-and-forget scheduling of drain steps, with no ordering
//! guarantee between unrelated jobs.
//!

use futures::future::BoxFuture;

/// Worker pool abstraction that runs mailbox drain steps.
///
/// Implementations must not block the caller; a scheduled job runs to
/// completion on its own, concurrently with jobs of other mailboxes.
pub trait Dispatcher: Send + Sync + 'static {
    /// Schedules a job on the pool.
    fn schedule(&self, job: BoxFuture<'static, ()>);
}

/// Default dispatcher backed by the Tokio runtime.
#[derive(Clone, Debug, Default)]
pub struct TokioDispatcher;

impl Dispatcher for TokioDispatcher {
    fn schedule(&self, job: BoxFuture<'static, ()>) {
        tokio::spawn(job);
    }
}
