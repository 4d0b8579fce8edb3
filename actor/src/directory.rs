// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Directory
//!
//! The `directory` module provides the registry collaborator that maps
//! identities to mailboxes. The core calls it on spawn, send and stop; it does
//! not implement storage policy itself beyond the in-memory default.
//!

use crate::{Error, Mailbox, Pid};

use async_trait::async_trait;
use tokio::sync::RwLock;

use std::{collections::HashMap, sync::Arc};

/// Maps identities to live mailboxes.
#[async_trait]
pub trait Directory: Send + Sync + 'static {
    /// Registers a mailbox under an identity.
    ///
    /// # Errors
    ///
    /// Returns `Error::Exists` if the identity is already registered.
    ///
    async fn register(&self, pid: Pid, mailbox: Arc<Mailbox>) -> Result<(), Error>;

    /// Resolves an identity to its mailbox, if registered.
    async fn lookup(&self, pid: &Pid) -> Option<Arc<Mailbox>>;

    /// Removes an identity. Unknown identities are ignored.
    async fn unregister(&self, pid: &Pid);

    /// All currently registered identities.
    async fn pids(&self) -> Vec<Pid>;
}

/// Directory keeping every registration in a shared map.
#[derive(Default)]
pub struct InMemoryDirectory {
    /// The registered mailboxes.
    entries: RwLock<HashMap<Pid, Arc<Mailbox>>>,
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn register(&self, pid: Pid, mailbox: Arc<Mailbox>) -> Result<(), Error> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&pid) {
            return Err(Error::Exists(pid));
        }
        entries.insert(pid, mailbox);
        Ok(())
    }

    async fn lookup(&self, pid: &Pid) -> Option<Arc<Mailbox>> {
        let entries = self.entries.read().await;
        entries.get(pid).cloned()
    }

    async fn unregister(&self, pid: &Pid) {
        let mut entries = self.entries.write().await;
        entries.remove(pid);
    }

    async fn pids(&self) -> Vec<Pid> {
        let entries = self.entries.read().await;
        entries.keys().cloned().collect()
    }
}
