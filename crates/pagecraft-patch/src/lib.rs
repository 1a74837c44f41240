//! Pagecraft Patch - path-addressed document edits
//!
//! The editing protocol for content drafts:
//! - [`ContentPath`] dotted paths with key and numeric index segments
//! - [`apply_patch`] clone-based writes that create missing intermediates
//! - [`read_path`], [`remove_path`], [`move_item`] for inspection, deletion
//!   and reordering
//!
//! All operations return a new document; the input is never mutated.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod apply;
pub mod path;

// Re-exports for convenience
pub use apply::{apply_patch, apply_patch_str, move_item, read_path, remove_path, PatchError};
pub use path::{ContentPath, PathError, Segment};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod patch_properties {
    use super::*;
    use pagecraft_schema::ContentDoc;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn arb_path() -> impl Strategy<Value = ContentPath> {
        prop::collection::vec("[a-z]{1,5}", 1..4)
            .prop_map(|keys| ContentPath::new(keys.into_iter().map(Segment::Key).collect()))
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "[a-z]{0,6}".prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn apply_never_mutates_input(path in arb_path(), value in arb_value()) {
            let original = ContentDoc::new(json!({
                "hero": {"title": "T"},
                "products": {"items": [{"id": 1, "price": 10}]}
            })).unwrap();
            let before = original.clone();

            // Key-only paths either succeed or fail cleanly; either way the
            // input is untouched.
            let _ = apply_patch(&original, &path, value);
            prop_assert_eq!(original, before);
        }

        #[test]
        fn apply_then_read_returns_written(path in arb_path(), value in arb_value()) {
            let original = ContentDoc::new(json!({})).unwrap();
            if let Ok(patched) = apply_patch(&original, &path, value.clone()) {
                prop_assert_eq!(read_path(&patched, &path), Some(&value));
            }
        }
    }
}
