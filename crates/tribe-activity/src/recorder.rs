//! Producer side of the activity pipeline.

use std::sync::Arc;

use crate::event::{ActivityAction, ActivityEvent, ActivityKind, ActivityMeta};
use crate::queue::ActivityQueue;

/// Hands activity events to the queue on behalf of mutation handlers.
///
/// Fire-and-forget: a queue failure is logged and swallowed. The mutation
/// that produced the event has already succeeded and must not be failed or
/// delayed by the audit path.
#[derive(Clone)]
pub struct ActivityRecorder {
    queue: Arc<dyn ActivityQueue>,
}

impl ActivityRecorder {
    pub fn new(queue: Arc<dyn ActivityQueue>) -> Self {
        Self { queue }
    }

    /// Record a mutation. Returns once the event is accepted (or dropped).
    pub async fn record(&self, kind: ActivityKind, action: ActivityAction, meta: ActivityMeta) {
        let event = ActivityEvent::new(kind, action, meta);
        if let Err(error) = self.queue.enqueue(event).await {
            tracing::warn!(%kind, %action, %error, "dropping activity event: enqueue failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::{ActivityStream, QueueError};
    use async_trait::async_trait;

    struct UnavailableQueue;

    #[async_trait]
    impl ActivityQueue for UnavailableQueue {
        async fn enqueue(&self, _event: ActivityEvent) -> Result<(), QueueError> {
            Err(QueueError::Backend("transport down".to_string()))
        }

        async fn consume(&self) -> Result<ActivityStream, QueueError> {
            Err(QueueError::Backend("transport down".to_string()))
        }
    }

    #[tokio::test]
    async fn enqueue_failure_never_reaches_the_caller() {
        let recorder = ActivityRecorder::new(Arc::new(UnavailableQueue));

        // Must return () and not panic even with the queue unavailable.
        recorder
            .record(
                ActivityKind::Member,
                ActivityAction::New,
                ActivityMeta::with_full_name("Jane"),
            )
            .await;
    }
}
