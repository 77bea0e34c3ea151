//! Single-threaded message loop.
//!
//! The runtime owns the domain and every outstanding task. Tasks run
//! concurrently, but their messages are applied one at a time, in completion
//! order, so the domain state never needs locking.

use std::sync::Arc;

use futures::{
    StreamExt,
    future::BoxFuture,
    stream::FuturesUnordered,
};
use log::trace;

use crate::common::DomainUpdateResult;
use crate::domains::user_management::{
    UserManagementDomain,
    messages::{Message, UserManagementEvent},
};
use crate::infra::services::user_management::UserAdminService;

pub struct Runtime {
    domain: UserManagementDomain,
    pending: FuturesUnordered<BoxFuture<'static, Message>>,
    events: Vec<UserManagementEvent>,
}

impl Runtime {
    pub fn new(service: Arc<dyn UserAdminService>) -> Self {
        Self {
            domain: UserManagementDomain::with_service(service),
            pending: FuturesUnordered::new(),
            events: Vec::new(),
        }
    }

    pub fn domain(&self) -> &UserManagementDomain {
        &self.domain
    }

    /// Apply `message` now and queue whatever work it returns.
    pub fn dispatch(&mut self, message: Message) {
        let name = message.name();
        let DomainUpdateResult { task, events } = self.domain.update(message);
        if !task.is_none() {
            trace!("{} queued {} task(s)", name, task.len());
        }
        for future in task.into_futures() {
            self.pending.push(future);
        }
        self.events.extend(events);
    }

    /// Number of calls still in flight
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Wait for the next call to complete and apply its message.
    ///
    /// Returns false if nothing was in flight.
    pub async fn next(&mut self) -> bool {
        match self.pending.next().await {
            Some(message) => {
                trace!("Task completed: {}", message.name());
                self.dispatch(message);
                true
            }
            None => false,
        }
    }

    /// Keep applying completed calls until nothing is in flight.
    pub async fn run_until_idle(&mut self) {
        while self.next().await {}
    }

    pub fn drain_events(&mut self) -> Vec<UserManagementEvent> {
        std::mem::take(&mut self.events)
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("domain", &self.domain)
            .field("in_flight", &self.pending.len())
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::stubs::{StubUserAdminService, demo_users};

    #[tokio::test]
    async fn load_runs_to_completion() {
        let stub = StubUserAdminService::with_demo_users();
        let mut runtime = Runtime::new(Arc::new(stub));

        runtime.dispatch(Message::LoadUsers);
        assert_eq!(runtime.in_flight(), 1);
        runtime.run_until_idle().await;

        assert!(runtime.is_idle());
        assert_eq!(runtime.domain().filtered_users().len(), demo_users().len());
        assert_eq!(
            runtime.drain_events(),
            vec![UserManagementEvent::UsersLoaded(demo_users().len())]
        );
        assert!(runtime.drain_events().is_empty());
    }

    #[tokio::test]
    async fn next_on_idle_runtime_returns_false() {
        let mut runtime =
            Runtime::new(Arc::new(StubUserAdminService::new()));
        assert!(!runtime.next().await);
    }
}
