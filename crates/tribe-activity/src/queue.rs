//! Queue abstraction between mutation handlers and the activity worker.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

use crate::event::ActivityEvent;

/// Error type for queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue full")]
    Full,
    #[error("backend error: {0}")]
    Backend(String),
}

/// Stream of dequeued activity events
pub type ActivityStream = Pin<Box<dyn Stream<Item = ActivityEvent> + Send>>;

/// Transport seam for activity events.
///
/// Implementations can be in-process (bounded tokio channel) or external
/// (a durable broker); producers and the worker only ever see this trait.
#[async_trait]
pub trait ActivityQueue: Send + Sync {
    /// Accept an event into the queue.
    ///
    /// Acceptance only: this must return as soon as the event is handed to
    /// the transport, never waiting for processing. Implementations must not
    /// block the caller when the queue is full or unreachable; they fail
    /// fast instead and the event is lost.
    async fn enqueue(&self, event: ActivityEvent) -> Result<(), QueueError>;

    /// Open the consumer side of the queue.
    ///
    /// Events are yielded one at a time; the stream ends when the transport
    /// shuts down.
    async fn consume(&self) -> Result<ActivityStream, QueueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_error_display() {
        assert_eq!(QueueError::Full.to_string(), "queue full");
        let backend = QueueError::Backend("connection refused".to_string());
        assert!(backend.to_string().contains("backend error"));
        assert!(backend.to_string().contains("connection refused"));
    }
}
