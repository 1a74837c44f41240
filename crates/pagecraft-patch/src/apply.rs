//! Clone-based patch application
//!
//! Every operation deep-clones the input document and returns the modified
//! clone; the caller's document is never mutated. This keeps pre/post states
//! safely comparable for change detection.
//!
//! Malformed targets (indexing past an array's end, descending through a
//! scalar) fail loudly and leave the draft untouched; they never corrupt it.

use crate::path::{ContentPath, PathError, Segment};
use pagecraft_schema::ContentDoc;
use serde_json::{Map, Value};

/// Apply a single write at `path`, returning a new document
///
/// Missing intermediate object keys are created as empty objects. The
/// terminal segment assigns: object keys insert-or-replace, array indices
/// replace in place.
///
/// # Errors
/// - `EmptyPath` for a zero-segment path
/// - `IndexOutOfBounds` when an index (terminal or intermediate) is past the
///   array's end; indices are never appended implicitly
/// - `NotAContainer` when the walk hits a scalar or the segment kind does
///   not match the container (key into array, index into object)
pub fn apply_patch(
    doc: &ContentDoc,
    path: &ContentPath,
    value: Value,
) -> Result<ContentDoc, PatchError> {
    let (parent_path, terminal) = split_terminal(path)?;
    let mut root = doc.as_value().clone();

    let parent = descend_creating(&mut root, parent_path)?;
    match (terminal, parent) {
        (Segment::Key(key), Value::Object(map)) => {
            map.insert(key.clone(), value);
        }
        (Segment::Index(index), Value::Array(items)) => {
            if *index >= items.len() {
                return Err(PatchError::IndexOutOfBounds {
                    index: *index,
                    len: items.len(),
                    at: path.to_string(),
                });
            }
            items[*index] = value;
        }
        (_, _) => {
            return Err(PatchError::NotAContainer {
                at: path.to_string(),
            })
        }
    }

    Ok(ContentDoc::new(root).expect("patched root stays an object"))
}

/// Parse `path` and apply, in one call
///
/// # Errors
/// Path parse errors and all [`apply_patch`] errors
pub fn apply_patch_str(
    doc: &ContentDoc,
    path: &str,
    value: Value,
) -> Result<ContentDoc, PatchError> {
    let path: ContentPath = path.parse()?;
    apply_patch(doc, &path, value)
}

/// Read the value at `path`, if present
#[must_use]
pub fn read_path<'a>(doc: &'a ContentDoc, path: &ContentPath) -> Option<&'a Value> {
    let mut current = doc.as_value();
    for seg in path.segments() {
        current = match seg {
            Segment::Key(key) => current.get(key.as_str())?,
            Segment::Index(index) => current.get(index)?,
        };
    }
    Some(current)
}

/// Remove the value at `path`, returning a new document
///
/// Object removal drops the key; array removal shifts later items left.
///
/// # Errors
/// - `NotFound` if the target (or any intermediate) does not exist
/// - `IndexOutOfBounds` / `NotAContainer` as for [`apply_patch`]
pub fn remove_path(doc: &ContentDoc, path: &ContentPath) -> Result<ContentDoc, PatchError> {
    let (parent_path, terminal) = split_terminal(path)?;
    let mut root = doc.as_value().clone();

    let parent = descend_existing(&mut root, parent_path, path)?;
    match (terminal, parent) {
        (Segment::Key(key), Value::Object(map)) => {
            if map.remove(key).is_none() {
                return Err(PatchError::NotFound {
                    at: path.to_string(),
                });
            }
        }
        (Segment::Index(index), Value::Array(items)) => {
            if *index >= items.len() {
                return Err(PatchError::IndexOutOfBounds {
                    index: *index,
                    len: items.len(),
                    at: path.to_string(),
                });
            }
            items.remove(*index);
        }
        (_, _) => {
            return Err(PatchError::NotAContainer {
                at: path.to_string(),
            })
        }
    }

    Ok(ContentDoc::new(root).expect("patched root stays an object"))
}

/// Move an item within the array at `path` from one index to another
///
/// Indices are validated against the array's current length on every call;
/// nothing is assumed stable across calls.
///
/// # Errors
/// - `NotAContainer` if `path` does not address an array
/// - `IndexOutOfBounds` if either index is past the end
pub fn move_item(
    doc: &ContentDoc,
    path: &ContentPath,
    from: usize,
    to: usize,
) -> Result<ContentDoc, PatchError> {
    let mut root = doc.as_value().clone();

    let target = descend_existing(&mut root, path.segments(), path)?;
    let Value::Array(items) = target else {
        return Err(PatchError::NotAContainer {
            at: path.to_string(),
        });
    };

    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(PatchError::IndexOutOfBounds {
                index,
                len,
                at: path.to_string(),
            });
        }
    }

    let item = items.remove(from);
    items.insert(to, item);

    Ok(ContentDoc::new(root).expect("patched root stays an object"))
}

fn split_terminal(path: &ContentPath) -> Result<(&[Segment], &Segment), PatchError> {
    let segments = path.segments();
    match segments.split_last() {
        Some((terminal, parents)) => Ok((parents, terminal)),
        None => Err(PatchError::EmptyPath),
    }
}

/// Walk to the parent container, creating missing object keys along the way
fn descend_creating<'a>(
    root: &'a mut Value,
    segments: &[Segment],
) -> Result<&'a mut Value, PatchError> {
    let mut current = root;
    for (depth, seg) in segments.iter().enumerate() {
        current = match seg {
            Segment::Key(key) => {
                let Value::Object(map) = current else {
                    return Err(PatchError::NotAContainer {
                        at: render_prefix(segments, depth),
                    });
                };
                map.entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()))
            }
            Segment::Index(index) => {
                let Value::Array(items) = current else {
                    return Err(PatchError::NotAContainer {
                        at: render_prefix(segments, depth),
                    });
                };
                let len = items.len();
                items.get_mut(*index).ok_or(PatchError::IndexOutOfBounds {
                    index: *index,
                    len,
                    at: render_prefix(segments, depth),
                })?
            }
        };
    }
    Ok(current)
}

/// Walk to the parent container without creating anything
fn descend_existing<'a>(
    root: &'a mut Value,
    segments: &[Segment],
    full: &ContentPath,
) -> Result<&'a mut Value, PatchError> {
    let mut current = root;
    for seg in segments {
        current = match seg {
            Segment::Key(key) => current.get_mut(key.as_str()).ok_or(PatchError::NotFound {
                at: full.to_string(),
            })?,
            Segment::Index(index) => current.get_mut(*index).ok_or(PatchError::NotFound {
                at: full.to_string(),
            })?,
        };
    }
    Ok(current)
}

fn render_prefix(segments: &[Segment], depth: usize) -> String {
    ContentPath::new(segments[..=depth].to_vec()).to_string()
}

/// Errors for patch operations
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// Path with no segments
    #[error("patch path is empty")]
    EmptyPath,

    /// Path string failed to parse
    #[error("invalid patch path: {0}")]
    Path(#[from] PathError),

    /// Walked into a scalar, or segment kind does not match the container
    #[error("path does not address a container at {at}")]
    NotAContainer { at: String },

    /// Array index past the end; indices are never appended implicitly
    #[error("index {index} out of bounds (len {len}) at {at}")]
    IndexOutOfBounds { index: usize, len: usize, at: String },

    /// Target missing for a read-dependent operation
    #[error("no value at {at}")]
    NotFound { at: String },
}
