//! Pagecraft Schema - page content model
//!
//! The data model behind a landing page:
//! - Loose [`ContentDoc`] trees as drafts are edited
//! - Built-in defaults and key-by-key deep merge
//! - The typed [`ContentSchema`] boundary the renderer consumes
//! - Canonical [`ContentHash`] for change detection and cache keys

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod doc;
pub mod hash;
pub mod schema;

// Re-exports for convenience
pub use doc::{defaults, merge_with_defaults, ContentDoc, DocError};
pub use hash::{ContentHash, HashError};
pub use schema::{
    AnimationPrefs, ColorPalette, ContentSchema, DemoSection, Feature, FormField, FormSection,
    HeroSection, ItemSection, PricingPlan, Product, ProductId, SchemaError, SocialProofItem, Stat,
    Testimonial, VideoSection,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
