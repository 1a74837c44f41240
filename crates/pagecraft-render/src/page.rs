//! Rendered page model
//!
//! The renderer's output: a resolved [`StyleSheet`] plus sections in their
//! fixed display order. Sections with nothing to show are absent from the
//! list, never present-but-empty.

use crate::theme::StyleSheet;
use pagecraft_schema::SocialProofItem;
use serde::{Deserialize, Serialize};

/// A fully rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    /// Resolved page-wide styles
    pub styles: StyleSheet,
    /// Sections in display order
    pub sections: Vec<RenderedSection>,
}

impl RenderedPage {
    /// Find a section by kind
    #[inline]
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.kind() == kind)
    }

    /// Whether a section of this kind was rendered
    #[inline]
    #[must_use]
    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.section(kind).is_some()
    }
}

/// Section discriminator, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Hero,
    Features,
    Stats,
    Products,
    Video,
    Testimonials,
    Pricing,
    Demo,
    Form,
    SocialProof,
}

/// One rendered section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedSection {
    /// Hero banner (always present)
    Hero {
        title: String,
        subtitle: String,
        cta_text: String,
        cta_link: String,
        image: Option<String>,
        badge: Option<String>,
    },
    /// Feature grid
    Features {
        title: Option<String>,
        subtitle: Option<String>,
        items: Vec<FeatureCard>,
    },
    /// Statistic counters
    Stats {
        title: Option<String>,
        items: Vec<StatCard>,
    },
    /// Product cards
    Products {
        title: Option<String>,
        subtitle: Option<String>,
        items: Vec<ProductCard>,
    },
    /// Embedded video
    Video {
        title: Option<String>,
        url: String,
        caption: Option<String>,
    },
    /// Testimonial quotes
    Testimonials {
        title: Option<String>,
        items: Vec<TestimonialCard>,
    },
    /// Pricing table
    Pricing {
        title: Option<String>,
        items: Vec<PricingCard>,
    },
    /// Interactive demo embed
    Demo {
        title: Option<String>,
        embed_url: String,
        instructions: Option<String>,
    },
    /// Lead capture form (always present)
    Form {
        title: String,
        subtitle: Option<String>,
        fields: Vec<FormFieldView>,
        submit_text: String,
        success_message: String,
    },
    /// Social proof logo strip
    SocialProof {
        title: Option<String>,
        items: Vec<SocialProofItem>,
    },
}

impl RenderedSection {
    /// Discriminator for this section
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Hero { .. } => SectionKind::Hero,
            Self::Features { .. } => SectionKind::Features,
            Self::Stats { .. } => SectionKind::Stats,
            Self::Products { .. } => SectionKind::Products,
            Self::Video { .. } => SectionKind::Video,
            Self::Testimonials { .. } => SectionKind::Testimonials,
            Self::Pricing { .. } => SectionKind::Pricing,
            Self::Demo { .. } => SectionKind::Demo,
            Self::Form { .. } => SectionKind::Form,
            Self::SocialProof { .. } => SectionKind::SocialProof,
        }
    }
}

/// Rendered feature entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCard {
    /// Resolved display glyph
    pub glyph: String,
    pub title: String,
    pub description: String,
}

/// Rendered statistic entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub glyph: Option<String>,
    pub value: String,
    pub label: String,
}

/// Rendered product card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    /// Stable id when present, else the positional index as a string
    pub identity: String,
    pub name: String,
    /// Formatted price ("$10", "€10.50")
    pub price_label: String,
    pub description: Option<String>,
    /// Primary image: explicit `image`, else first of `images`
    pub image: Option<String>,
    pub category: Option<String>,
    /// None when the document does not track stock
    pub in_stock: Option<bool>,
    pub cta_text: Option<String>,
    pub features: Vec<String>,
}

/// Rendered testimonial card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestimonialCard {
    pub name: String,
    pub role: Option<String>,
    pub quote: String,
    pub avatar: Option<String>,
    /// Clamped to 1..=5 when present
    pub rating: Option<u8>,
}

/// Rendered pricing plan card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingCard {
    pub name: String,
    pub price_label: String,
    pub period: Option<String>,
    pub features: Vec<String>,
    pub cta_text: Option<String>,
    pub highlighted: bool,
}

/// Rendered form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldView {
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub required: bool,
    pub glyph: Option<String>,
}
