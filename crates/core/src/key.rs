//! Key encoding for the ledger
//!
//! Two key spaces share one ordered store:
//!
//! - **Simple keys** address primary records. They must be non-empty and
//!   must not start with the composite namespace marker.
//! - **Composite keys** encode `(object_type, attr1, attr2, ...)` as
//!   `U+0000 object_type U+0000 attr1 U+0000 attr2 U+0000 ...`.
//!
//! Because every composite key starts with `U+0000`, a range scan over simple
//! keys never observes one. Components may not contain `U+0000` (that would
//! collide with a component boundary) or `U+10FFFF` (reserved as the upper
//! bound of a partial-key scan).

use crate::error::{StoreError, StoreResult};

/// Prefix and separator for composite keys
pub const COMPOSITE_KEY_NAMESPACE: char = '\u{0000}';

/// Largest Unicode scalar, used to close partial composite ranges
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Validate a simple (non-composite) key
///
/// # Examples
///
/// ```
/// use waybill_core::key::validate_simple_key;
///
/// assert!(validate_simple_key("PRODUCT1").is_ok());
/// assert!(validate_simple_key("").is_err());
/// assert!(validate_simple_key("\u{0}status~key").is_err());
/// ```
pub fn validate_simple_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::invalid_key(key, "key cannot be empty"));
    }
    if key.starts_with(COMPOSITE_KEY_NAMESPACE) {
        return Err(StoreError::invalid_key(
            key,
            "key cannot start with the composite key namespace U+0000",
        ));
    }
    Ok(())
}

fn validate_component(component: &str) -> StoreResult<()> {
    if component.contains(COMPOSITE_KEY_NAMESPACE) {
        return Err(StoreError::invalid_composite(format!(
            "component {:?} contains U+0000",
            component
        )));
    }
    if component.contains(MAX_UNICODE_RUNE) {
        return Err(StoreError::invalid_composite(format!(
            "component {:?} contains U+10FFFF",
            component
        )));
    }
    Ok(())
}

/// Build a composite key from an object type and its attributes
///
/// # Examples
///
/// ```
/// use waybill_core::key::{create_composite_key, split_composite_key};
///
/// let key = create_composite_key("status~key", &["Produced", "PRODUCT1"]).unwrap();
/// assert_eq!(key, "\u{0}status~key\u{0}Produced\u{0}PRODUCT1\u{0}");
///
/// let (object_type, attrs) = split_composite_key(&key).unwrap();
/// assert_eq!(object_type, "status~key");
/// assert_eq!(attrs, vec!["Produced", "PRODUCT1"]);
/// ```
pub fn create_composite_key(object_type: &str, attributes: &[&str]) -> StoreResult<String> {
    if object_type.is_empty() {
        return Err(StoreError::invalid_composite("object type cannot be empty"));
    }
    validate_component(object_type)?;

    let capacity = 2 + object_type.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>();
    let mut key = String::with_capacity(capacity);
    key.push(COMPOSITE_KEY_NAMESPACE);
    key.push_str(object_type);
    key.push(COMPOSITE_KEY_NAMESPACE);
    for attr in attributes {
        validate_component(attr)?;
        key.push_str(attr);
        key.push(COMPOSITE_KEY_NAMESPACE);
    }
    Ok(key)
}

/// Split a composite key back into its object type and attributes
pub fn split_composite_key(key: &str) -> StoreResult<(String, Vec<String>)> {
    let body = key
        .strip_prefix(COMPOSITE_KEY_NAMESPACE)
        .and_then(|rest| rest.strip_suffix(COMPOSITE_KEY_NAMESPACE))
        .ok_or_else(|| StoreError::invalid_composite(format!("{:?} is not a composite key", key)))?;

    let mut parts = body.split(COMPOSITE_KEY_NAMESPACE);
    let object_type = match parts.next() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            return Err(StoreError::invalid_composite(format!(
                "{:?} has no object type",
                key
            )))
        }
    };
    let attributes = parts.map(str::to_string).collect();
    Ok((object_type, attributes))
}

/// Half-open key range `[start, end)` covering every composite key that
/// starts with the given object type and leading attributes
pub fn partial_composite_range(
    object_type: &str,
    attributes: &[&str],
) -> StoreResult<(String, String)> {
    let start = create_composite_key(object_type, attributes)?;
    let mut end = start.clone();
    end.push(MAX_UNICODE_RUNE);
    Ok((start, end))
}
