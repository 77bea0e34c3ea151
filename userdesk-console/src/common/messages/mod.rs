use crate::common::task::Task;
use crate::domains::user_management::messages::{Message, UserManagementEvent};

/// Result of a domain update: follow-up work plus events for the front-end.
#[derive(Debug)]
pub struct DomainUpdateResult {
    /// The task to execute (may produce more messages)
    pub task: Task<Message>,
    /// Events the front-end may report immediately
    pub events: Vec<UserManagementEvent>,
}

impl DomainUpdateResult {
    /// Create a result with just a task
    pub fn task(task: Task<Message>) -> Self {
        Self {
            task,
            events: Vec::new(),
        }
    }

    pub fn none() -> Self {
        Self::task(Task::none())
    }

    /// Create a result with task and events
    pub fn with_events(
        task: Task<Message>,
        events: Vec<UserManagementEvent>,
    ) -> Self {
        Self { task, events }
    }

    /// Add an event to this result
    pub fn add_event(mut self, event: UserManagementEvent) -> Self {
        self.events.push(event);
        self
    }
}
