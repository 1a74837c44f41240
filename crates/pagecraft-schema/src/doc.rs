//! Loose content documents and defaulting
//!
//! A [`ContentDoc`] is the untyped JSON tree a draft is edited as. Persisted
//! documents are merged over the built-in defaults key-by-key before any
//! typed consumer (the renderer) sees them, so required leaves of the
//! always-rendered sections are never missing.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Untyped page content document
///
/// # Invariants
/// - Root is always a JSON object
/// - The tree contains only objects, arrays and scalars (guaranteed by
///   construction from [`Value`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDoc(Value);

impl ContentDoc {
    /// Create a document from a JSON value
    ///
    /// # Errors
    /// Returns error if the root is not an object
    pub fn new(value: Value) -> Result<Self, DocError> {
        if !value.is_object() {
            return Err(DocError::RootNotObject);
        }
        Ok(Self(value))
    }

    /// Empty document (object root, no sections)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Borrow the underlying JSON value
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the underlying JSON value
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Get a top-level section by name
    #[inline]
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Check whether a top-level section is present
    #[inline]
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.0.get(name).is_some()
    }
}

impl Default for ContentDoc {
    fn default() -> Self {
        Self::empty()
    }
}

/// Errors for document construction
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// Document root must be a JSON object
    #[error("document root is not an object")]
    RootNotObject,
}

/// Built-in default document
///
/// Covers every leaf the renderer unconditionally reads (hero, form, colors,
/// fonts, animations). Optional sections default to empty item lists so the
/// renderer omits them until the editor fills them in.
#[must_use]
pub fn defaults() -> ContentDoc {
    ContentDoc(json!({
        "colors": {
            "primary": "#2563eb",
            "secondary": "#1e40af",
            "accent": "#f59e0b",
            "background": "#ffffff",
            "text": "#111827"
        },
        "fonts": {
            "heading": "Inter",
            "body": "Inter"
        },
        "animations": {
            "enabled": true,
            "intensity": "subtle"
        },
        "hero": {
            "title": "Grow your business today",
            "subtitle": "Everything you need to launch, in one page",
            "cta_text": "Get started",
            "cta_link": "#contact"
        },
        "features": { "title": "Why choose us", "items": [] },
        "stats": { "title": "In numbers", "items": [] },
        "testimonials": { "title": "What customers say", "items": [] },
        "pricing": { "title": "Plans", "items": [] },
        "products": { "title": "Our products", "items": [] },
        "social_proof": { "items": [] },
        "form": {
            "title": "Contact us",
            "subtitle": "We reply within one business day",
            "fields": [
                { "name": "name", "label": "Name", "type": "text", "required": true, "icon": "user" },
                { "name": "email", "label": "Email", "type": "email", "required": true, "icon": "mail" },
                { "name": "phone", "label": "Phone", "type": "tel", "required": false, "icon": "phone" },
                { "name": "message", "label": "Message", "type": "textarea", "required": false }
            ],
            "submit_text": "Send",
            "success_message": "Thanks, we'll be in touch."
        }
    }))
}

/// Merge a persisted document over the built-in defaults
///
/// Key-by-key, not section-by-section: a persisted `hero.title` does not
/// discard the default `hero.cta_text`. Objects merge recursively; arrays
/// and scalars from the persisted side replace wholesale. Idempotent.
#[must_use]
pub fn merge_with_defaults(persisted: &ContentDoc) -> ContentDoc {
    ContentDoc(deep_merge(defaults().as_value(), persisted.as_value()))
}

fn deep_merge(base: &Value, over: &Value) -> Value {
    match (base, over) {
        (Value::Object(base_map), Value::Object(over_map)) => {
            let mut merged = base_map.clone();
            for (key, over_val) in over_map {
                let entry = match merged.get(key) {
                    Some(base_val) => deep_merge(base_val, over_val),
                    None => over_val.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        _ => over.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn doc_requires_object_root() {
        assert!(ContentDoc::new(json!([1, 2])).is_err());
        assert!(ContentDoc::new(json!("text")).is_err());
        assert!(ContentDoc::new(json!({})).is_ok());
    }

    #[test]
    fn merge_key_by_key_not_section_by_section() {
        let persisted = ContentDoc::new(json!({"hero": {"title": "Custom"}})).unwrap();
        let merged = merge_with_defaults(&persisted);

        assert_eq!(merged.as_value()["hero"]["title"], json!("Custom"));
        // Sibling default leaf survives
        assert_eq!(merged.as_value()["hero"]["cta_text"], json!("Get started"));
    }

    #[test]
    fn merge_preserves_unknown_keys() {
        let persisted =
            ContentDoc::new(json!({"hero": {"badge": "New"}, "custom_section": {"x": 1}})).unwrap();
        let merged = merge_with_defaults(&persisted);

        assert_eq!(merged.as_value()["hero"]["badge"], json!("New"));
        assert_eq!(merged.as_value()["custom_section"]["x"], json!(1));
    }

    #[test]
    fn merge_arrays_replace_wholesale() {
        let persisted = ContentDoc::new(json!({
            "form": { "fields": [{ "name": "email", "label": "Email", "type": "email", "required": true }] }
        }))
        .unwrap();
        let merged = merge_with_defaults(&persisted);

        let fields = merged.as_value()["form"]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        // Sibling leaves of the replaced array still come from defaults
        assert_eq!(merged.as_value()["form"]["submit_text"], json!("Send"));
    }

    #[test]
    fn merge_idempotent() {
        let persisted = ContentDoc::new(json!({
            "hero": {"title": "T"},
            "products": {"items": [{"id": 1, "name": "X", "price": 10}]}
        }))
        .unwrap();
        let once = merge_with_defaults(&persisted);
        let twice = merge_with_defaults(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_of_empty_is_defaults() {
        let merged = merge_with_defaults(&ContentDoc::empty());
        assert_eq!(merged, defaults());
    }

    #[test]
    fn defaults_cover_anchored_sections() {
        let d = defaults();
        assert!(d.section("hero").is_some());
        assert!(d.section("form").is_some());
        assert!(d.as_value()["colors"]["primary"].is_string());
    }
}
