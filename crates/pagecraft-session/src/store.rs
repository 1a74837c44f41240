//! External collaborator seams
//!
//! The session never talks to storage directly; it consumes these traits.
//! Implementations live outside this crate (HTTP client, database layer,
//! in-memory fakes for tests).

use chrono::{DateTime, Utc};
use pagecraft_schema::ContentDoc;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Persistence collaborator for page drafts
///
/// `save` must be idempotent under retry with an identical payload: the
/// session may retry after a timeout whose save actually landed.
#[async_trait::async_trait]
pub trait PageStore: Send + Sync + Debug {
    /// Persist the full draft for a page
    ///
    /// # Errors
    /// Returns error when the store rejects the payload or is unreachable
    async fn save(&self, resource_id: &str, payload: SavePayload) -> Result<SaveReceipt, StoreError>;
}

/// Full-draft save payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    /// Page title
    pub title: String,
    /// Public slug the page is served under
    pub slug: String,
    /// Template the page was created from
    pub template_id: String,
    /// Complete content document
    pub content: ContentDoc,
    /// Whether the page is published
    pub active: bool,
}

/// Acknowledgement of a successful save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    /// Server-side persistence timestamp
    pub saved_at: DateTime<Utc>,
}

/// Store failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Payload rejected (validation, permissions)
    #[error("save rejected: {0}")]
    Rejected(String),

    /// Store unreachable or errored
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Template catalogue collaborator
#[async_trait::async_trait]
pub trait TemplateCatalogue: Send + Sync + Debug {
    /// List available templates with their initial content
    ///
    /// # Errors
    /// Returns error when the catalogue is unreachable
    async fn list_templates(&self) -> Result<Vec<Template>, StoreError>;
}

/// A reusable visual template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial content document
    pub content: ContentDoc,
}

/// Lead submitted through a rendered page's form
///
/// Field keys come from the form's `FormField::name` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    /// Page the lead was captured on
    pub landing_id: String,
    /// Visitor name
    pub name: String,
    /// Visitor email
    pub email: String,
    /// Optional phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional free-text message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of a lead submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadReceipt {
    /// Whether the lead was accepted
    pub success: bool,
    /// Optional user-facing message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Lead intake collaborator (consumed by the rendered form)
#[async_trait::async_trait]
pub trait LeadGateway: Send + Sync + Debug {
    /// Submit a captured lead
    ///
    /// # Errors
    /// Returns error when the gateway is unreachable
    async fn submit_lead(&self, lead: LeadSubmission) -> Result<LeadReceipt, StoreError>;
}
