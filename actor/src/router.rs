// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: Apache-2.0

//! # Router
//!
//! The `router` module provides an actor that fans messages out to a mutable
//! set of routee actors through a pluggable distribution policy. Membership is
//! changed by control messages that travel through the router's own mailbox,
//! so a change and a fan-out are never processed concurrently: every fan-out
//! reads one consistent snapshot of the set.
//!

use crate::{
    AnyMessage, Error,
    Pid,
    actor::Actor,
    context::ActorContext,
};

use async_trait::async_trait;
use tracing::debug;

use std::collections::HashSet;

/// Control messages a router intercepts before consulting its policy.
#[derive(Clone, Debug)]
pub enum RouterCommand {
    /// Adds an actor to the routee set. Adding a present routee is a no-op.
    AddRoutee(Pid),
    /// Removes an actor from the routee set. Removing an absent routee is a
    /// no-op. Takes effect for every message processed after it in mailbox
    /// order.
    RemoveRoutee(Pid),
    /// Routes the wrapped payload instead of the command itself.
    Broadcast(AnyMessage),
    /// Replies with the current [`Routees`].
    GetRoutees,
}

/// Reply to [`RouterCommand::GetRoutees`].
#[derive(Clone, Debug, PartialEq)]
pub struct Routees {
    /// The current members, in insertion order.
    pub pids: Vec<Pid>,
}

/// Insertion-ordered set of routee identities with constant-time membership.
#[derive(Clone, Debug, Default)]
pub struct RouteeSet {
    /// Members in insertion order.
    order: Vec<Pid>,
    /// Membership index.
    index: HashSet<Pid>,
}

impl RouteeSet {
    /// Creates a set from initial members, dropping duplicates.
    pub fn new(routees: impl IntoIterator<Item = Pid>) -> Self {
        let mut set = Self::default();
        for pid in routees {
            set.add(pid);
        }
        set
    }

    /// Adds a member. Returns false if it was already present.
    pub fn add(&mut self, pid: Pid) -> bool {
        if !self.index.insert(pid.clone()) {
            return false;
        }
        self.order.push(pid);
        true
    }

    /// Removes a member. Returns false if it was absent.
    pub fn remove(&mut self, pid: &Pid) -> bool {
        if !self.index.remove(pid) {
            return false;
        }
        self.order.retain(|member| member != pid);
        true
    }

    /// True if the identity is a member.
    pub fn contains(&self, pid: &Pid) -> bool {
        self.index.contains(pid)
    }

    /// Members in insertion order.
    pub fn pids(&self) -> &[Pid] {
        &self.order
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Distribution policy of a router.
///
/// The policy receives the routee snapshot taken inside the router's drain
/// step together with the message to distribute. Round-robin or
/// consistent-hash policies have the same shape as [`Broadcast`].
#[async_trait]
pub trait RouterPolicy: Send + 'static {
    /// Distributes one message over the routees.
    async fn route(
        &mut self,
        routees: &[Pid],
        message: AnyMessage,
        ctx: &mut ActorContext,
    ) -> Result<(), Error>;
}

/// Policy that forwards every message to every routee.
///
/// Each forward is an independent fire-and-forget send preserving the
/// original sender, so replies flow back to the caller and a slow routee does
/// not delay delivery to the others.
#[derive(Clone, Debug, Default)]
pub struct Broadcast;

#[async_trait]
impl RouterPolicy for Broadcast {
    async fn route(
        &mut self,
        routees: &[Pid],
        message: AnyMessage,
        ctx: &mut ActorContext,
    ) -> Result<(), Error> {
        for pid in routees {
            ctx.forward(pid, message.clone()).await;
        }
        Ok(())
    }
}

/// Actor distributing messages over a mutable routee set.
///
/// Control messages ([`RouterCommand`]) manage membership and introspection;
/// everything else is handed to the policy with the snapshot current at that
/// point of the mailbox order.
///
/// # Examples
///
/// ```ignore
/// let routees = vec![worker1, worker2, worker3];
/// let router = root
///     .spawn(Props::from_producer(move || Router::broadcast(routees.clone())))
///     .await?;
///
/// root.tell(&router, "work".to_string()).await;
/// root.tell(&router, RouterCommand::RemoveRoutee(worker1)).await;
/// ```
pub struct Router<P: RouterPolicy> {
    /// Current members.
    routees: RouteeSet,
    /// Distribution policy.
    policy: P,
}

impl<P: RouterPolicy> Router<P> {
    /// Creates a router over initial members.
    pub fn new(policy: P, routees: impl IntoIterator<Item = Pid>) -> Self {
        Self {
            routees: RouteeSet::new(routees),
            policy,
        }
    }
}

impl Router<Broadcast> {
    /// Creates a broadcast router over initial members.
    pub fn broadcast(routees: impl IntoIterator<Item = Pid>) -> Self {
        Self::new(Broadcast, routees)
    }
}

#[async_trait]
impl<P: RouterPolicy> Actor for Router<P> {
    async fn receive(&mut self, ctx: &mut ActorContext) -> Result<(), Error> {
        if let Some(command) = ctx.message().downcast_ref::<RouterCommand>().cloned() {
            match command {
                RouterCommand::AddRoutee(pid) => {
                    if !self.routees.add(pid.clone()) {
                        debug!("Routee {} already present.", pid);
                    }
                }
                RouterCommand::RemoveRoutee(pid) => {
                    if !self.routees.remove(&pid) {
                        debug!("Routee {} not present.", pid);
                    }
                }
                RouterCommand::Broadcast(inner) => {
                    return self.policy.route(self.routees.pids(), inner, ctx).await;
                }
                RouterCommand::GetRoutees => {
                    ctx.respond(Routees {
                        pids: self.routees.pids().to_vec(),
                    })
                    .await;
                }
            }
            return Ok(());
        }
        let message = ctx.message().clone();
        self.policy.route(self.routees.pids(), message, ctx).await
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_add_is_idempotent_and_ordered() {
        let a = Pid::local("a");
        let b = Pid::local("b");
        let c = Pid::local("c");

        let mut set = RouteeSet::new(vec![a.clone(), b.clone()]);
        assert!(set.add(c.clone()));
        assert!(!set.add(b.clone()));
        assert_eq!(set.pids(), &[a, b, c]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let a = Pid::local("a");
        let b = Pid::local("b");

        let mut set = RouteeSet::new(vec![a.clone(), b.clone()]);
        assert!(set.remove(&a));
        assert!(!set.remove(&a));
        assert!(!set.contains(&a));
        assert_eq!(set.pids(), &[b]);
    }

    #[test]
    fn test_duplicates_rejected_at_construction() {
        let a = Pid::local("a");
        let set = RouteeSet::new(vec![a.clone(), a.clone(), a]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }
}
