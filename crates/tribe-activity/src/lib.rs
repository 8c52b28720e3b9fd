//! Activity-audit pipeline for the tribe portal.
//!
//! A domain mutation produces an [`ActivityEvent`] which the
//! [`ActivityRecorder`] hands to an [`ActivityQueue`] without waiting for
//! processing. The [`ActivityWorker`] drains the queue, renders each event
//! into a human-readable sentence and appends an immutable
//! [`ActivityRecord`] through the [`ActivityLog`] trait.
//!
//! Delivery contract: losing an event degrades the activity feed, never the
//! mutation that produced it.

mod event;
mod log;
mod message;
mod queue;
mod recorder;
mod worker;

pub use event::{ActivityAction, ActivityEvent, ActivityKind, ActivityMeta};
pub use log::{ActivityFilter, ActivityLog, ActivityLogError, ActivityRecord};
pub use message::render_message;
pub use queue::{ActivityQueue, ActivityStream, QueueError};
pub use recorder::ActivityRecorder;
pub use worker::ActivityWorker;
