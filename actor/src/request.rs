// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Request correlation
//!
//! The `request` module matches asynchronous replies to pending callers. Each
//! request gets a correlation token and a write-once slot; the reply, wherever
//! it is produced, resolves the slot through the token carried by the synthetic
//! reply address.
//!

use crate::AnyMessage;

use tokio::sync::{RwLock, oneshot};
use tracing::debug;

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

/// Pending request entries keyed by correlation token.
///
/// Resolution is idempotent: only the first resolution of a token takes
/// effect, later attempts find no entry and are ignored. Expired entries are
/// actively removed by the timed-out caller, so the table does not grow under
/// repeated timeouts.
pub(crate) struct RequestTable {
    /// Source of correlation tokens.
    next: AtomicU64,
    /// The pending entries.
    pending: RwLock<HashMap<u64, oneshot::Sender<AnyMessage>>>,
}

impl RequestTable {
    pub(crate) fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
            pending: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a pending entry and returns its token and result slot.
    pub(crate) async fn create(&self) -> (u64, oneshot::Receiver<AnyMessage>) {
        let token = self.next.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = oneshot::channel();
        self.pending.write().await.insert(token, sender);
        (token, receiver)
    }

    /// Resolves a pending entry with a reply.
    ///
    /// # Returns
    ///
    /// Returns false if the token is unknown, either because the entry was
    /// already resolved or because it timed out and was removed.
    ///
    pub(crate) async fn resolve(&self, token: u64, message: AnyMessage) -> bool {
        let entry = self.pending.write().await.remove(&token);
        match entry {
            Some(slot) => slot.send(message).is_ok(),
            None => {
                debug!("Late reply for request {} dropped.", token);
                false
            }
        }
    }

    /// Removes a pending entry without resolving it.
    pub(crate) async fn remove(&self, token: u64) -> bool {
        self.pending.write().await.remove(&token).is_some()
    }

    /// Number of requests still waiting for a reply.
    pub(crate) async fn len(&self) -> usize {
        self.pending.read().await.len()
    }
}
