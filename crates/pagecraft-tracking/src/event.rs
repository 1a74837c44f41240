//! Tracked interaction events

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Session identifier shared by every event this process emits
///
/// Generated once per process; events from one visit correlate server-side
/// through this id.
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// The process-wide tracking session id
#[inline]
#[must_use]
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// A product interaction captured on a rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEvent {
    /// Slug of the page the interaction happened on
    pub landing_slug: String,
    /// Product name as rendered
    pub product_name: String,
    /// Raw price, when the product carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_price: Option<f64>,
    /// Product category, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
    /// Stock-keeping unit, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Label of the button that was clicked
    pub button_text: String,
    /// Correlating session id
    pub session_id: String,
    /// Capture timestamp (client side)
    pub captured_at: DateTime<Utc>,
    /// Free-form extra fields
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl TrackedEvent {
    /// Build an event stamped with the process session id and current time
    #[must_use]
    pub fn new(
        landing_slug: impl Into<String>,
        product_name: impl Into<String>,
        button_text: impl Into<String>,
    ) -> Self {
        Self {
            landing_slug: landing_slug.into(),
            product_name: product_name.into(),
            product_price: None,
            product_category: None,
            sku: None,
            button_text: button_text.into(),
            session_id: session_id().to_string(),
            captured_at: Utc::now(),
            metadata: Map::new(),
        }
    }

    /// With a price
    #[inline]
    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.product_price = Some(price);
        self
    }

    /// With a category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_category = Some(category.into());
        self
    }

    /// With a SKU
    #[inline]
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// With an extra metadata field
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A delivery-failed event parked in the retry queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEvent {
    /// The event awaiting delivery
    pub event: TrackedEvent,
    /// Delivery attempts so far (including the original)
    pub attempts: u32,
    /// When the first delivery failed
    pub first_failed_at: DateTime<Utc>,
}

impl PendingEvent {
    /// Park an event after its first failed delivery
    #[must_use]
    pub fn new(event: TrackedEvent) -> Self {
        Self {
            event,
            attempts: 1,
            first_failed_at: Utc::now(),
        }
    }
}
