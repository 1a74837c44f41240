//! Interaction tracking with durable retry
//!
//! Captures product interactions on rendered pages and delivers them to the
//! tracking endpoint:
//!
//! - **Fire-and-forget capture**: the interaction path never blocks on or
//!   fails because of tracking
//! - **Durable retry queue**: failed deliveries park in a persisted queue,
//!   bounded in length and attempts, and a sweeper redelivers them
//! - **Process session id**: every event carries one id per process run

#![allow(missing_docs)]

pub mod event;
pub mod queue;
pub mod sink;
pub mod store;

pub use event::{session_id, PendingEvent, TrackedEvent};
pub use queue::{QueueConfig, TrackingQueue};
pub use sink::{EventSink, HttpEventSink, SinkError};
pub use store::{FileQueueStore, QueueStore, QueueStoreError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
