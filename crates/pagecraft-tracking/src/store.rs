//! Durable backing for the retry queue

use crate::event::PendingEvent;
use std::fmt::Debug;
use std::path::PathBuf;

/// Queue persistence failures
#[derive(Debug, thiserror::Error)]
pub enum QueueStoreError {
    /// Underlying storage failed
    #[error("queue storage failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored queue could not be decoded
    #[error("queue payload corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where the pending-event queue is persisted between runs
#[async_trait::async_trait]
pub trait QueueStore: Send + Sync + Debug {
    /// Load the persisted queue; an absent store yields an empty queue
    ///
    /// # Errors
    /// Returns error when storage exists but cannot be read or decoded
    async fn load(&self) -> Result<Vec<PendingEvent>, QueueStoreError>;

    /// Replace the persisted queue with `pending`
    ///
    /// # Errors
    /// Returns error when the queue cannot be written
    async fn persist(&self, pending: &[PendingEvent]) -> Result<(), QueueStoreError>;
}

/// JSON-file queue store
///
/// The whole queue is rewritten on every persist; queues are bounded small
/// so the simplicity wins over an append log.
#[derive(Debug, Clone)]
pub struct FileQueueStore {
    path: PathBuf,
}

impl FileQueueStore {
    /// Store backed by a file at `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl QueueStore for FileQueueStore {
    async fn load(&self) -> Result<Vec<PendingEvent>, QueueStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, pending: &[PendingEvent]) -> Result<(), QueueStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec(pending)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
