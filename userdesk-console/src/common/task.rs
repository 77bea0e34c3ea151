//! Deferred work returned from domain updates.
//!
//! A [`Task`] is a bundle of futures that each resolve to the next message.
//! Update functions never await; they hand tasks to the
//! [`Runtime`](crate::runtime::Runtime), which polls them and feeds the
//! resulting messages back in.

use std::future::Future;

use futures::{FutureExt, future::BoxFuture};

#[must_use = "a Task does nothing unless handed to the runtime"]
pub struct Task<M> {
    futures: Vec<BoxFuture<'static, M>>,
}

impl<M: Send + 'static> Task<M> {
    /// A task that produces nothing.
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Run `future` and map its output into a message.
    pub fn perform<T, F, G>(future: F, map: G) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        G: FnOnce(T) -> M + Send + 'static,
    {
        Self {
            futures: vec![future.map(map).boxed()],
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, M>> {
        self.futures
    }
}

impl<M> std::fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("pending", &self.futures.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn perform_maps_output() {
        let task: Task<String> =
            Task::perform(async { 21 * 2 }, |n| format!("n={n}"));
        let mut futures = task.into_futures();
        assert_eq!(futures.len(), 1);
        assert_eq!(futures.remove(0).await, "n=42");
    }

    #[test]
    fn none_is_empty() {
        let task = Task::<u8>::none();
        assert!(task.is_none());
        assert_eq!(task.len(), 0);
    }
}
