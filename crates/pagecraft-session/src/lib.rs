//! Customization session engine
//!
//! Coordinates live editing of a page's content document:
//!
//! - **State machine**: Idle, Editing, Saving, Refreshing, SaveFailed with
//!   validated transitions
//! - **Debounced persistence**: rapid edits coalesce into one save, with
//!   volatility-classified delays
//! - **Preview synchronization**: the embedded preview reloads with a fresh
//!   cache-busting token only after a save acknowledges
//! - **Collaborator seams**: persistence, template catalogue, lead intake
//!   and the preview surface are all traits, injected at session open

#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod preview;
pub mod session;
pub mod state;
pub mod store;

pub use config::{SessionConfig, Volatility};
pub use error::{PreviewError, SessionError};
pub use preview::{PreviewSurface, PreviewSynchronizer};
pub use session::{CustomizationSession, Draft, PageMeta};
pub use state::{allowed_transitions, validate_transition, SessionState, SessionStatus};
pub use store::{
    LeadGateway, LeadReceipt, LeadSubmission, PageStore, SavePayload, SaveReceipt, StoreError,
    Template, TemplateCatalogue,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
