//! Delivery queue with bounded retry
//!
//! Tracking must never get in the visitor's way: [`TrackingQueue::track`]
//! cannot fail, it only reports whether delivery happened now. Failed
//! events park in a durable queue and a background sweeper redelivers them;
//! delivery is at-least-once, the endpoint deduplicates by session id and
//! timestamp if it cares.

use crate::event::{PendingEvent, TrackedEvent};
use crate::sink::EventSink;
use crate::store::QueueStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Retry queue tuning
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Delivery attempts before an event is dropped
    pub max_attempts: u32,
    /// Queue length bound; the oldest events drop first
    pub max_queue_len: usize,
    /// Sweeper wake interval (milliseconds)
    pub sweep_interval_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            max_queue_len: 500,
            sweep_interval_ms: 30_000,
        }
    }
}

impl QueueConfig {
    /// With an attempts bound
    #[inline]
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// With a length bound
    #[inline]
    #[must_use]
    pub fn with_max_queue_len(mut self, max_queue_len: usize) -> Self {
        self.max_queue_len = max_queue_len;
        self
    }

    /// With a sweep interval
    #[inline]
    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval_ms = interval.as_millis() as u64;
        self
    }
}

/// Durable tracking queue over a sink and a store
#[derive(Debug)]
pub struct TrackingQueue {
    sink: Arc<dyn EventSink>,
    store: Arc<dyn QueueStore>,
    config: QueueConfig,
    pending: Mutex<Vec<PendingEvent>>,
}

impl TrackingQueue {
    /// Open a queue, recovering any events persisted by a previous run
    ///
    /// # Errors
    /// Returns error when the persisted queue exists but cannot be read
    pub async fn open(
        sink: Arc<dyn EventSink>,
        store: Arc<dyn QueueStore>,
        config: QueueConfig,
    ) -> Result<Self, crate::store::QueueStoreError> {
        let recovered = store.load().await?;
        if !recovered.is_empty() {
            tracing::info!(count = recovered.len(), "recovered pending events");
        }
        Ok(Self {
            sink,
            store,
            config,
            pending: Mutex::new(recovered),
        })
    }

    /// Deliver an event, parking it for retry on failure
    ///
    /// Returns whether delivery succeeded immediately. Never errors: a
    /// failed delivery parks the event and a failed park is logged and
    /// dropped rather than surfaced to the interaction path.
    pub async fn track(&self, event: TrackedEvent) -> bool {
        match self.sink.deliver(&event).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, product = %event.product_name, "delivery failed, parking event");
                let mut pending = self.pending.lock().await;
                pending.push(PendingEvent::new(event));
                self.enforce_bound(&mut pending);
                self.persist(&pending).await;
                false
            }
        }
    }

    /// Retry every parked event once
    ///
    /// Returns how many events were delivered. Events that exhaust their
    /// attempts budget are dropped with a warning.
    pub async fn sweep(&self) -> usize {
        let mut pending = self.pending.lock().await;
        if pending.is_empty() {
            return 0;
        }

        let parked = std::mem::take(&mut *pending);
        let total = parked.len();
        let mut delivered = 0;
        for mut item in parked {
            match self.sink.deliver(&item.event).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    item.attempts += 1;
                    if item.attempts >= self.config.max_attempts {
                        tracing::warn!(
                            product = %item.event.product_name,
                            attempts = item.attempts,
                            "dropping event, attempts exhausted"
                        );
                    } else {
                        tracing::debug!(error = %e, attempts = item.attempts, "redelivery failed");
                        pending.push(item);
                    }
                }
            }
        }

        if delivered > 0 {
            tracing::info!(delivered, remaining = pending.len(), "sweep redelivered events");
        }
        if delivered > 0 || pending.len() != total {
            self.persist(&pending).await;
        }
        delivered
    }

    /// Spawn a background task sweeping on the configured interval
    #[must_use]
    pub fn run_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let queue = Arc::clone(self);
        let interval = Duration::from_millis(queue.config.sweep_interval_ms);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick fires immediately, draining anything recovered
            loop {
                ticker.tick().await;
                queue.sweep().await;
            }
        })
    }

    /// Number of events awaiting redelivery
    pub async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }

    fn enforce_bound(&self, pending: &mut Vec<PendingEvent>) {
        if pending.len() > self.config.max_queue_len {
            let excess = pending.len() - self.config.max_queue_len;
            tracing::warn!(dropped = excess, "queue over bound, dropping oldest events");
            pending.drain(..excess);
        }
    }

    async fn persist(&self, pending: &[PendingEvent]) {
        if let Err(e) = self.store.persist(pending).await {
            tracing::warn!(error = %e, "failed to persist pending queue");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SinkError;
    use crate::store::QueueStoreError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    #[derive(Debug, Default)]
    struct ScriptedSink {
        fail: AtomicBool,
        delivered: StdMutex<Vec<String>>,
        attempts: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl EventSink for ScriptedSink {
        async fn deliver(&self, event: &TrackedEvent) -> Result<(), SinkError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(SinkError::Transport("refused".into()))
            } else {
                self.delivered
                    .lock()
                    .unwrap()
                    .push(event.product_name.clone());
                Ok(())
            }
        }
    }

    #[derive(Debug, Default)]
    struct MemoryStore {
        queue: StdMutex<Vec<PendingEvent>>,
    }

    #[async_trait::async_trait]
    impl QueueStore for MemoryStore {
        async fn load(&self) -> Result<Vec<PendingEvent>, QueueStoreError> {
            Ok(self.queue.lock().unwrap().clone())
        }

        async fn persist(&self, pending: &[PendingEvent]) -> Result<(), QueueStoreError> {
            *self.queue.lock().unwrap() = pending.to_vec();
            Ok(())
        }
    }

    async fn open_queue(
        sink: Arc<ScriptedSink>,
        store: Arc<MemoryStore>,
        config: QueueConfig,
    ) -> TrackingQueue {
        TrackingQueue::open(sink, store, config).await.unwrap()
    }

    #[tokio::test]
    async fn successful_delivery_bypasses_queue() {
        let sink = Arc::new(ScriptedSink::default());
        let queue = open_queue(sink.clone(), Arc::new(MemoryStore::default()), QueueConfig::default()).await;

        assert!(queue.track(TrackedEvent::new("l", "Widget", "Buy")).await);
        assert_eq!(queue.pending_len().await, 0);
        assert_eq!(sink.delivered.lock().unwrap().as_slice(), ["Widget"]);
    }

    #[tokio::test]
    async fn failed_delivery_parks_and_persists() {
        let sink = Arc::new(ScriptedSink::default());
        sink.fail.store(true, Ordering::SeqCst);
        let store = Arc::new(MemoryStore::default());
        let queue = open_queue(sink, store.clone(), QueueConfig::default()).await;

        assert!(!queue.track(TrackedEvent::new("l", "Widget", "Buy")).await);
        assert_eq!(queue.pending_len().await, 1);
        assert_eq!(store.queue.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sweep_redelivers_once_sink_recovers() {
        let sink = Arc::new(ScriptedSink::default());
        sink.fail.store(true, Ordering::SeqCst);
        let store = Arc::new(MemoryStore::default());
        let queue = open_queue(sink.clone(), store.clone(), QueueConfig::default()).await;

        queue.track(TrackedEvent::new("l", "A", "Buy")).await;
        queue.track(TrackedEvent::new("l", "B", "Buy")).await;

        sink.fail.store(false, Ordering::SeqCst);
        assert_eq!(queue.sweep().await, 2);
        assert_eq!(queue.pending_len().await, 0);
        assert!(store.queue.lock().unwrap().is_empty());
        assert_eq!(sink.delivered.lock().unwrap().as_slice(), ["A", "B"]);
    }

    #[tokio::test]
    async fn attempts_budget_drops_events() {
        let sink = Arc::new(ScriptedSink::default());
        sink.fail.store(true, Ordering::SeqCst);
        let queue = open_queue(
            sink,
            Arc::new(MemoryStore::default()),
            QueueConfig::default().with_max_attempts(3),
        )
        .await;

        queue.track(TrackedEvent::new("l", "Doomed", "Buy")).await;
        assert_eq!(queue.sweep().await, 0); // attempts: 2
        assert_eq!(queue.pending_len().await, 1);
        assert_eq!(queue.sweep().await, 0); // attempts: 3, dropped
        assert_eq!(queue.pending_len().await, 0);
    }

    #[tokio::test]
    async fn queue_bound_drops_oldest() {
        let sink = Arc::new(ScriptedSink::default());
        sink.fail.store(true, Ordering::SeqCst);
        let queue = open_queue(
            sink,
            Arc::new(MemoryStore::default()),
            QueueConfig::default().with_max_queue_len(2),
        )
        .await;

        for name in ["first", "second", "third"] {
            queue.track(TrackedEvent::new("l", name, "Buy")).await;
        }

        let pending = queue.pending.lock().await;
        let names: Vec<_> = pending.iter().map(|p| p.event.product_name.as_str()).collect();
        assert_eq!(names, ["second", "third"]);
    }

    #[tokio::test]
    async fn open_recovers_persisted_events() {
        let store = Arc::new(MemoryStore::default());
        store
            .queue
            .lock()
            .unwrap()
            .push(PendingEvent::new(TrackedEvent::new("l", "Stale", "Buy")));

        let sink = Arc::new(ScriptedSink::default());
        let queue = open_queue(sink.clone(), store, QueueConfig::default()).await;
        assert_eq!(queue.pending_len().await, 1);

        assert_eq!(queue.sweep().await, 1);
        assert_eq!(sink.delivered.lock().unwrap().as_slice(), ["Stale"]);
    }
}
