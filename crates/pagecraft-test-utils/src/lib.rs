//! Shared fakes and fixtures for pagecraft tests
//!
//! Scripted, recording implementations of the collaborator seams: a page
//! store with programmable failures, a preview surface that records reload
//! URLs, an event sink with a failure switch, and an in-memory queue store.

#![allow(missing_docs)]

use chrono::Utc;
use pagecraft_schema::ContentDoc;
use pagecraft_session::{
    PageMeta, PageStore, PreviewError, PreviewSurface, SavePayload, SaveReceipt, StoreError,
};
use pagecraft_tracking::{EventSink, PendingEvent, QueueStore, QueueStoreError, SinkError, TrackedEvent};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

/// Install a test tracing subscriber honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Page store recording every save, with programmable failures
#[derive(Debug, Default)]
pub struct ScriptedStore {
    saves: Mutex<Vec<SavePayload>>,
    fail_next: AtomicU32,
    delay_ms: AtomicUsize,
}

impl ScriptedStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` saves fail with `Unavailable`
    pub fn fail_next(&self, n: u32) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    /// Delay every save by `delay` (for timeout scenarios)
    pub fn delay_saves(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as usize, Ordering::SeqCst);
    }

    /// Payloads of every accepted save, in order
    #[must_use]
    pub fn saves(&self) -> Vec<SavePayload> {
        self.saves.lock().clone()
    }

    /// Number of accepted saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.lock().len()
    }
}

#[async_trait::async_trait]
impl PageStore for ScriptedStore {
    async fn save(&self, _resource_id: &str, payload: SavePayload) -> Result<SaveReceipt, StoreError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }
        let remaining = self.fail_next.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_next.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::Unavailable("scripted failure".into()));
        }
        self.saves.lock().push(payload);
        Ok(SaveReceipt {
            saved_at: Utc::now(),
        })
    }
}

/// Preview surface recording every reload URL
#[derive(Debug, Default)]
pub struct RecordingSurface {
    urls: Mutex<Vec<String>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload URLs in the order received
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }

    /// Number of reloads received
    #[must_use]
    pub fn reload_count(&self) -> usize {
        self.urls.lock().len()
    }
}

#[async_trait::async_trait]
impl PreviewSurface for RecordingSurface {
    async fn reload(&self, url: &str) -> Result<(), PreviewError> {
        self.urls.lock().push(url.to_string());
        Ok(())
    }
}

/// Event sink with a failure switch
#[derive(Debug, Default)]
pub struct ScriptedSink {
    failing: Mutex<bool>,
    delivered: Mutex<Vec<TrackedEvent>>,
}

impl ScriptedSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch delivery failures on or off
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    /// Events delivered so far
    #[must_use]
    pub fn delivered(&self) -> Vec<TrackedEvent> {
        self.delivered.lock().clone()
    }
}

#[async_trait::async_trait]
impl EventSink for ScriptedSink {
    async fn deliver(&self, event: &TrackedEvent) -> Result<(), SinkError> {
        if *self.failing.lock() {
            return Err(SinkError::Transport("scripted outage".into()));
        }
        self.delivered.lock().push(event.clone());
        Ok(())
    }
}

/// In-memory queue store
#[derive(Debug, Default)]
pub struct MemoryQueueStore {
    queue: Mutex<Vec<PendingEvent>>,
}

impl MemoryQueueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store as if a previous run left events behind
    pub fn seed(&self, pending: Vec<PendingEvent>) {
        *self.queue.lock() = pending;
    }

    /// Currently persisted events
    #[must_use]
    pub fn persisted(&self) -> Vec<PendingEvent> {
        self.queue.lock().clone()
    }
}

#[async_trait::async_trait]
impl QueueStore for MemoryQueueStore {
    async fn load(&self) -> Result<Vec<PendingEvent>, QueueStoreError> {
        Ok(self.queue.lock().clone())
    }

    async fn persist(&self, pending: &[PendingEvent]) -> Result<(), QueueStoreError> {
        *self.queue.lock() = pending.to_vec();
        Ok(())
    }
}

/// Metadata for a typical test page
#[must_use]
pub fn sample_meta() -> PageMeta {
    PageMeta {
        title: "Spring Launch".into(),
        slug: "spring-launch".into(),
        template_id: "tpl-classic".into(),
        active: false,
    }
}

/// A persisted document with a few sections customized
#[must_use]
pub fn sample_doc() -> ContentDoc {
    ContentDoc::new(json!({
        "hero": {
            "title": "Spring Launch",
            "subtitle": "Everything new this season",
            "cta_text": "Shop now"
        },
        "colors": {
            "primary": "#0f766e"
        },
        "products": {
            "title": "Featured",
            "items": [
                {
                    "id": 1,
                    "name": "Canvas Tote",
                    "price": 24.0,
                    "category": "bags",
                    "button_text": "Add to cart"
                }
            ]
        }
    }))
    .unwrap_or_else(|_| ContentDoc::empty())
}
