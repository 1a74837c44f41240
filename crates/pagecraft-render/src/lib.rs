//! Pagecraft Render - content document to page sections
//!
//! A pure renderer over defaults-merged content:
//! - Fixed section order with per-section render guards
//! - Three-tier style fallback (document → theme → constant)
//! - Closed icon glyph map with a generic fallback
//! - Content-addressed render cache
//!
//! # Example
//!
//! ```rust,ignore
//! use pagecraft_render::{render, Theme};
//! use pagecraft_schema::ContentDoc;
//!
//! let doc = ContentDoc::empty();
//! let page = render(&doc, &Theme::default())?;
//! println!("rendered {} sections", page.sections.len());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cache;
pub mod glyphs;
pub mod page;
pub mod render;
pub mod theme;

// Re-exports for convenience
pub use cache::{RenderCache, RenderCacheStats};
pub use glyphs::{glyph, glyph_or_fallback, FALLBACK_GLYPH};
pub use page::{
    FeatureCard, FormFieldView, PricingCard, ProductCard, RenderedPage, RenderedSection,
    SectionKind, StatCard, TestimonialCard,
};
pub use render::{format_price, render, RenderError};
pub use theme::{StyleSheet, Theme, ThemeColors};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
