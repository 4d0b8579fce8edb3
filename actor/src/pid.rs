// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Process identity
//!
//! The `pid` module provides the `Pid` type. A `Pid` is an opaque, comparable and
//! serializable reference to an actor's mailbox. It carries no resources itself,
//! only a lookup key that the directory resolves to a live mailbox.
//!

use serde::{Deserialize, Serialize};

use std::fmt;

/// Address of every actor spawned in this process.
pub(crate) const LOCAL_ADDRESS: &str = "local";

/// Address reserved for synthetic reply identities created by the ask protocol.
/// A message sent to such an identity resolves a pending request instead of
/// being delivered to a mailbox.
pub(crate) const REPLY_ADDRESS: &str = "reply";

/// Opaque identity of an actor.
///
/// A `Pid` is immutable once created. Two `Pid`s are the same actor exactly when
/// both their `id` and `address` are equal. The `address` distinguishes local
/// actors from identities with other origins (for example the synthetic reply
/// addresses used by requests); the core only requires uniqueness, equality and
/// hashing from it.
///
/// `Pid` implements `Serialize`/`Deserialize` so identities can travel inside
/// messages or be persisted by external collaborators.
///
/// # Examples
///
/// ```ignore
/// use actor::Pid;
///
/// let pid = Pid::local("worker-1");
/// assert_eq!(pid.id(), "worker-1");
/// assert_eq!(pid.to_string(), "local/worker-1");
/// ```
#[derive(
    Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Pid {
    /// Unique identifier within an address.
    id: String,
    /// Origin of the identity.
    address: String,
}

impl Pid {
    /// Creates an identity from explicit parts.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier within the given address.
    /// * `address` - Origin of the identity.
    ///
    pub fn new(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
        }
    }

    /// Creates an identity for an actor living in this process.
    pub fn local(id: impl Into<String>) -> Self {
        Self::new(id, LOCAL_ADDRESS)
    }

    /// Creates the synthetic reply identity bound to a pending request.
    pub(crate) fn reply(token: u64) -> Self {
        Self::new(token.to_string(), REPLY_ADDRESS)
    }

    /// Identifier within the address.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Origin of the identity.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// True if this identity is a synthetic reply address.
    pub fn is_reply(&self) -> bool {
        self.address == REPLY_ADDRESS
    }

    /// Correlation token carried by a synthetic reply address.
    ///
    /// # Returns
    ///
    /// Returns `None` for ordinary identities or malformed reply addresses.
    ///
    pub(crate) fn reply_token(&self) -> Option<u64> {
        if self.is_reply() {
            self.id.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.id)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use std::collections::HashSet;

    #[test]
    fn test_identity_equality() {
        let a = Pid::local("worker");
        let b = Pid::local("worker");
        let c = Pid::local("other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Pid::new("worker", "remote"));

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_display() {
        assert_eq!(Pid::local("worker").to_string(), "local/worker");
        assert_eq!(Pid::reply(7).to_string(), "reply/7");
    }

    #[test]
    fn test_reply_token() {
        let reply = Pid::reply(42);
        assert!(reply.is_reply());
        assert_eq!(reply.reply_token(), Some(42));

        let ordinary = Pid::local("42");
        assert!(!ordinary.is_reply());
        assert_eq!(ordinary.reply_token(), None);

        let malformed = Pid::new("not-a-token", REPLY_ADDRESS);
        assert_eq!(malformed.reply_token(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let pid = Pid::local("worker-9");
        let bytes = bincode::serialize(&pid).unwrap();
        let decoded: Pid = bincode::deserialize(&bytes).unwrap();
        assert_eq!(pid, decoded);
    }
}
