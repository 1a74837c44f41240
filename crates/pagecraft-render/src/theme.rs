//! Themes and style resolution
//!
//! Every style the renderer emits falls through three tiers:
//! explicit document value → theme default → hard-coded constant.
//! The result is a fully-populated [`StyleSheet`]; no style is ever empty.

use pagecraft_schema::ContentDoc;
use serde::{Deserialize, Serialize};

/// Hard-coded final fallbacks (tier three)
pub mod fallback {
    /// Primary brand color
    pub const PRIMARY: &str = "#2563eb";
    /// Secondary brand color
    pub const SECONDARY: &str = "#1e40af";
    /// Accent color
    pub const ACCENT: &str = "#f59e0b";
    /// Page background
    pub const BACKGROUND: &str = "#ffffff";
    /// Body text color
    pub const TEXT: &str = "#111827";
    /// Font family
    pub const FONT: &str = "Inter";
}

/// Visual template theme (tier two of style resolution)
///
/// A theme ships with a template from the catalogue; any slot it leaves
/// unset falls through to the hard-coded constants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name (also part of the render cache key)
    pub name: String,
    /// Optional palette overrides
    #[serde(default)]
    pub colors: ThemeColors,
    /// Heading font family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    /// Body font family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
}

impl Theme {
    /// Create a named theme with no overrides
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Optional per-slot theme palette
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Fully-resolved page styles
///
/// # Invariants
/// Every field is non-empty after [`StyleSheet::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub heading_font: String,
    pub body_font: String,
}

impl StyleSheet {
    /// Resolve styles for a document under a theme
    ///
    /// Reads explicit values from the raw (un-merged) document so the theme
    /// tier stays observable: a document that never set `colors.primary`
    /// takes the theme's primary, not the built-in default.
    #[must_use]
    pub fn resolve(doc: &ContentDoc, theme: &Theme) -> Self {
        let doc_color = |slot: &str| {
            doc.section("colors")
                .and_then(|c| c.get(slot))
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let doc_font = |slot: &str| {
            doc.section("fonts")
                .and_then(|f| f.get(slot))
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let pick = |explicit: Option<String>, theme_val: &Option<String>, constant: &str| {
            explicit
                .or_else(|| theme_val.clone().filter(|s| !s.is_empty()))
                .unwrap_or_else(|| constant.to_string())
        };

        Self {
            primary: pick(doc_color("primary"), &theme.colors.primary, fallback::PRIMARY),
            secondary: pick(
                doc_color("secondary"),
                &theme.colors.secondary,
                fallback::SECONDARY,
            ),
            accent: pick(doc_color("accent"), &theme.colors.accent, fallback::ACCENT),
            background: pick(
                doc_color("background"),
                &theme.colors.background,
                fallback::BACKGROUND,
            ),
            text: pick(doc_color("text"), &theme.colors.text, fallback::TEXT),
            heading_font: pick(doc_font("heading"), &theme.heading_font, fallback::FONT),
            body_font: pick(doc_font("body"), &theme.body_font, fallback::FONT),
        }
    }
}
