//! Typed content schema
//!
//! The typed boundary between loose edited documents and the renderer.
//! Every field is defaulted so deserializing a merged document can only fail
//! on shape mismatches (e.g. a string where an object is required), never on
//! absence. Unknown keys are ignored.

use crate::doc::ContentDoc;
use serde::{Deserialize, Serialize};

/// Fully-typed page content
///
/// Produced by [`ContentSchema::from_doc`] from a defaults-merged document.
/// Optional sections carry empty `items` when absent; `hero` and `form` are
/// always materialized since they anchor the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSchema {
    /// Color palette (never empty after defaulting)
    #[serde(default)]
    pub colors: ColorPalette,
    /// Font choices
    #[serde(default)]
    pub fonts: FontSet,
    /// Animation preferences
    #[serde(default)]
    pub animations: AnimationPrefs,
    /// Hero banner (always rendered)
    #[serde(default)]
    pub hero: HeroSection,
    /// Feature list
    #[serde(default)]
    pub features: ItemSection<Feature>,
    /// Statistic counters
    #[serde(default)]
    pub stats: ItemSection<Stat>,
    /// Product catalogue
    #[serde(default)]
    pub products: ItemSection<Product>,
    /// Embedded video
    #[serde(default)]
    pub video: Option<VideoSection>,
    /// Customer testimonials
    #[serde(default)]
    pub testimonials: ItemSection<Testimonial>,
    /// Pricing plans
    #[serde(default)]
    pub pricing: ItemSection<PricingPlan>,
    /// Interactive demo embed
    #[serde(default)]
    pub demo: Option<DemoSection>,
    /// Lead capture form (always rendered)
    #[serde(default)]
    pub form: FormSection,
    /// Social proof logos
    #[serde(default)]
    pub social_proof: ItemSection<SocialProofItem>,
}

impl ContentSchema {
    /// Type a (defaults-merged) document
    ///
    /// # Errors
    /// Returns error on shape mismatches or duplicate form field names
    pub fn from_doc(doc: &ContentDoc) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_value(doc.as_value().clone())?;
        schema.validate()?;
        Ok(schema)
    }

    /// Validate cross-field invariants
    ///
    /// # Errors
    /// Returns error if a form field name repeats; `name` is the key used
    /// when assembling submitted lead data, so it must be unique.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.form.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateFieldName {
                    name: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ContentSchema {
    fn default() -> Self {
        // Typed view of the built-in default document
        Self::from_doc(&crate::doc::defaults()).expect("built-in defaults are well-formed")
    }
}

/// Theme-level color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Primary brand color
    #[serde(default = "default_primary")]
    pub primary: String,
    /// Secondary brand color
    #[serde(default = "default_secondary")]
    pub secondary: String,
    /// Accent / call-to-action color
    #[serde(default = "default_accent")]
    pub accent: String,
    /// Page background color
    #[serde(default = "default_background")]
    pub background: String,
    /// Body text color
    #[serde(default = "default_text")]
    pub text: String,
}

fn default_primary() -> String {
    "#2563eb".to_string()
}
fn default_secondary() -> String {
    "#1e40af".to_string()
}
fn default_accent() -> String {
    "#f59e0b".to_string()
}
fn default_background() -> String {
    "#ffffff".to_string()
}
fn default_text() -> String {
    "#111827".to_string()
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            accent: default_accent(),
            background: default_background(),
            text: default_text(),
        }
    }
}

/// Font choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSet {
    /// Heading font family
    #[serde(default = "default_font")]
    pub heading: String,
    /// Body font family
    #[serde(default = "default_font")]
    pub body: String,
}

fn default_font() -> String {
    "Inter".to_string()
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            heading: default_font(),
            body: default_font(),
        }
    }
}

/// Animation preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationPrefs {
    /// Whether entrance animations run at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Intensity label ("none", "subtle", "lively")
    #[serde(default = "default_intensity")]
    pub intensity: String,
}

fn default_true() -> bool {
    true
}
fn default_intensity() -> String {
    "subtle".to_string()
}

impl Default for AnimationPrefs {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: default_intensity(),
        }
    }
}

/// Hero banner content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HeroSection {
    /// Headline
    #[serde(default)]
    pub title: String,
    /// Supporting line
    #[serde(default)]
    pub subtitle: String,
    /// Call-to-action label
    #[serde(default)]
    pub cta_text: String,
    /// Call-to-action target
    #[serde(default)]
    pub cta_link: String,
    /// Optional background/side image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional badge text above the headline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Generic item-backed section
///
/// The renderer omits the section entirely when `items` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSection<T> {
    /// Section heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Section subheading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Ordered items
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ItemSection<T> {
    /// Whether the section has anything to render
    #[inline]
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !self.items.is_empty()
    }
}

impl<T> Default for ItemSection<T> {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            items: Vec::new(),
        }
    }
}

/// Feature list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Feature {
    /// Symbolic icon name (resolved by the renderer's glyph map)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Feature title
    #[serde(default)]
    pub title: String,
    /// Feature description
    #[serde(default)]
    pub description: String,
}

/// Statistic counter entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stat {
    /// Display value ("1,200+", "98%")
    #[serde(default)]
    pub value: String,
    /// Label under the value
    #[serde(default)]
    pub label: String,
    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Testimonial entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Testimonial {
    /// Author name
    #[serde(default)]
    pub name: String,
    /// Author role/company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Quoted text
    #[serde(default)]
    pub quote: String,
    /// Avatar image address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Star rating, 1..=5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Pricing plan entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PricingPlan {
    /// Plan name
    #[serde(default)]
    pub name: String,
    /// Plan price
    #[serde(default)]
    pub price: f64,
    /// ISO-ish currency code ("USD", "EUR")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Billing period label ("/month")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Included feature lines
    #[serde(default)]
    pub features: Vec<String>,
    /// Call-to-action label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    /// Whether this plan is visually emphasized
    #[serde(default)]
    pub highlighted: bool,
}

/// Stable product identity
///
/// Used for reordering and deletion. When absent, the positional index is
/// the weak fallback identity; it is never used as a persistence key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id
    Num(i64),
    /// String id / SKU
    Str(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Product card entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    /// Stable identity (optional; positional index is the fallback)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Product name
    #[serde(default)]
    pub name: String,
    /// Numeric price
    #[serde(default)]
    pub price: f64,
    /// Currency code; renderer falls back to "$"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Description line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primary image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Gallery images
    #[serde(default)]
    pub images: Vec<String>,
    /// Category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Units in stock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    /// Per-product call-to-action label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_button: Option<String>,
    /// Bullet-point features
    #[serde(default)]
    pub features: Vec<String>,
}

/// Embedded video section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VideoSection {
    /// Section heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Video address; the section is skipped without it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Caption under the player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Interactive demo section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DemoSection {
    /// Section heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Embed address; the section is skipped without it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    /// Usage instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Lead capture form content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FormSection {
    /// Form heading
    #[serde(default)]
    pub title: String,
    /// Form subheading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Input fields, in display order
    #[serde(default)]
    pub fields: Vec<FormField>,
    /// Submit button label
    #[serde(default)]
    pub submit_text: String,
    /// Message shown after successful submission
    #[serde(default)]
    pub success_message: String,
}

/// Single form input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FormField {
    /// Unique key within the form; keys submitted lead data
    #[serde(default)]
    pub name: String,
    /// Visible label
    #[serde(default)]
    pub label: String,
    /// Input type ("text", "email", "tel", "textarea")
    #[serde(rename = "type", default)]
    pub field_type: String,
    /// Whether submission requires a value
    #[serde(default)]
    pub required: bool,
    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Social proof entry (logo strip)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SocialProofItem {
    /// Company/brand name
    #[serde(default)]
    pub name: String,
    /// Logo image address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Schema-level errors
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Shape mismatch while typing a document
    #[error("malformed content: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Duplicate form field name
    #[error("duplicate form field name: {name}")]
    DuplicateFieldName { name: String },
}
