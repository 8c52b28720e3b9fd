//! In-memory activity queue implementation using a bounded tokio channel.
//!
//! This implementation is suitable for:
//! - Single server deployments
//! - Development and testing
//!
//! Events only travel within one process. Deployments with multiple server
//! replicas need an `ActivityQueue` implementation over an external broker.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tribe_activity::{ActivityEvent, ActivityQueue, ActivityStream, QueueError};

const QUEUE_CAPACITY: usize = 1024;

/// Bounded in-process queue.
///
/// `enqueue` never waits: when the channel is full the event is rejected
/// immediately, so a stalled worker degrades to lost feed entries rather
/// than blocked mutations. The consumer side can be attached exactly once.
pub struct MemoryActivityQueue {
    tx: mpsc::Sender<ActivityEvent>,
    rx: Mutex<Option<mpsc::Receiver<ActivityEvent>>>,
}

impl MemoryActivityQueue {
    pub fn new() -> Self {
        Self::with_capacity(QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }
}

impl Default for MemoryActivityQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityQueue for MemoryActivityQueue {
    async fn enqueue(&self, event: ActivityEvent) -> Result<(), QueueError> {
        self.tx.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => {
                QueueError::Backend("queue closed".to_string())
            }
        })
    }

    async fn consume(&self) -> Result<ActivityStream, QueueError> {
        let rx = self
            .rx
            .lock()
            .expect("queue receiver lock poisoned")
            .take()
            .ok_or_else(|| QueueError::Backend("consumer already attached".to_string()))?;

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}
