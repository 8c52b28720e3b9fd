//! Consumer side of the activity pipeline.

use chrono::Utc;
use futures::StreamExt;
use std::sync::Arc;
use tribe_storage::ActivityId;

use crate::event::ActivityEvent;
use crate::log::{ActivityLog, ActivityRecord};
use crate::message::render_message;
use crate::queue::{ActivityQueue, QueueError};

/// Drains the activity queue and appends rendered records to the log.
///
/// One event in flight per worker instance. A failure while handling a
/// single event is logged and the loop moves on; the worker only stops when
/// the queue's stream ends. Replayed events are appended again (no
/// deduplication).
pub struct ActivityWorker {
    queue: Arc<dyn ActivityQueue>,
    log: Arc<dyn ActivityLog>,
}

impl ActivityWorker {
    pub fn new(queue: Arc<dyn ActivityQueue>, log: Arc<dyn ActivityLog>) -> Self {
        Self { queue, log }
    }

    /// Run until the queue shuts down.
    pub async fn run(self) -> Result<(), QueueError> {
        let mut events = self.queue.consume().await?;
        tracing::info!("activity worker started");

        while let Some(event) = events.next().await {
            self.process(event).await;
        }

        tracing::info!("activity worker stopped: queue closed");
        Ok(())
    }

    /// Handle one dequeued event: render, then append.
    pub async fn process(&self, event: ActivityEvent) {
        let ActivityEvent { kind, action, meta } = event;
        let message = render_message(kind, action, &meta);

        let record = ActivityRecord {
            id: ActivityId::new(),
            kind,
            action,
            message: message.clone(),
            meta,
            created_at: Utc::now(),
        };

        match self.log.append(record).await {
            Ok(()) => tracing::info!(%kind, %action, %message, "activity logged"),
            Err(error) => {
                tracing::error!(%kind, %action, %error, "failed to persist activity record");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ActivityAction, ActivityKind, ActivityMeta};
    use crate::log::{ActivityFilter, ActivityLogError};
    use crate::queue::ActivityStream;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Log stub that stores records in memory and can fail on demand.
    #[derive(Default)]
    struct TestLog {
        records: Mutex<Vec<ActivityRecord>>,
        fail_next: AtomicBool,
    }

    #[async_trait]
    impl ActivityLog for TestLog {
        async fn append(&self, record: ActivityRecord) -> Result<(), ActivityLogError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(ActivityLogError::Database("disk full".to_string()));
            }
            self.records.lock().unwrap().push(record);
            Ok(())
        }

        async fn query(
            &self,
            _filter: ActivityFilter,
        ) -> Result<Vec<ActivityRecord>, ActivityLogError> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn count(&self, _filter: ActivityFilter) -> Result<u64, ActivityLogError> {
            Ok(self.records.lock().unwrap().len() as u64)
        }
    }

    struct NoQueue;

    #[async_trait]
    impl ActivityQueue for NoQueue {
        async fn enqueue(&self, _event: ActivityEvent) -> Result<(), QueueError> {
            Ok(())
        }

        async fn consume(&self) -> Result<ActivityStream, QueueError> {
            Ok(Box::pin(futures::stream::empty()))
        }
    }

    fn worker_with_log(log: Arc<TestLog>) -> ActivityWorker {
        ActivityWorker::new(Arc::new(NoQueue), log)
    }

    #[tokio::test]
    async fn process_renders_and_appends() {
        let log = Arc::new(TestLog::default());
        let worker = worker_with_log(log.clone());

        let event = ActivityEvent::new(
            ActivityKind::Member,
            ActivityAction::New,
            ActivityMeta::with_full_name("Jane"),
        );
        worker.process(event).await;

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "Jane just registered");
        assert_eq!(records[0].kind, ActivityKind::Member);
        assert_eq!(records[0].action, ActivityAction::New);
    }

    #[tokio::test]
    async fn replayed_event_appends_a_second_record() {
        let log = Arc::new(TestLog::default());
        let worker = worker_with_log(log.clone());

        let event = ActivityEvent::new(
            ActivityKind::Sermon,
            ActivityAction::Updated,
            ActivityMeta::with_title("Grace"),
        );
        worker.process(event.clone()).await;
        worker.process(event).await;

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 2);
        // Independent records: distinct ids, identical message.
        assert_ne!(records[0].id, records[1].id);
        assert_eq!(records[0].message, records[1].message);
    }

    #[tokio::test]
    async fn append_failure_does_not_stop_later_events() {
        let log = Arc::new(TestLog::default());
        log.fail_next.store(true, Ordering::SeqCst);
        let worker = worker_with_log(log.clone());

        let first = ActivityEvent::new(
            ActivityKind::Event,
            ActivityAction::New,
            ActivityMeta::with_title("Camp"),
        );
        let second = ActivityEvent::new(
            ActivityKind::Event,
            ActivityAction::Deleted,
            ActivityMeta::with_title("Camp"),
        );

        // First append fails; must not panic or poison the worker.
        worker.process(first).await;
        worker.process(second).await;

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "Event deleted: Camp");
    }

    #[tokio::test]
    async fn run_ends_when_stream_ends() {
        let log = Arc::new(TestLog::default());
        let worker = ActivityWorker::new(Arc::new(NoQueue), log);
        worker.run().await.unwrap();
    }
}
