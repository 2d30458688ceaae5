//! Field-by-field merging of settings tiers.
//!
//! Tiers are applied in place onto one accumulated value. Arrays and scalars
//! are replaced wholesale, never concatenated.

use serde_json::Value;

/// Apply `overlay` onto `base` in place.
///
/// - Objects merge key by key, recursing into nested objects
/// - A null overlay leaves `base` untouched (null means "not set in this tier")
/// - Any other overlay replaces `base`
///
/// # Example
/// ```
/// use serde_json::json;
/// use qualified_config::config::merge_into;
///
/// let mut settings = json!({ "keys": { "name": "name", "schema": "schema" } });
/// merge_into(&mut settings, json!({ "keys": { "schema": "configCondition" } }));
/// assert_eq!(settings, json!({ "keys": { "name": "name", "schema": "configCondition" } }));
/// ```
pub fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(fields), Value::Object(overlay_fields)) => {
            for (key, value) in overlay_fields {
                match fields.get_mut(&key) {
                    Some(slot) => merge_into(slot, value),
                    None if value.is_null() => {}
                    None => {
                        fields.insert(key, value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}

/// Merge tiers given lowest precedence first.
pub fn merge_tiers(tiers: impl IntoIterator<Item = Value>) -> Value {
    let mut merged = Value::Null;
    for tier in tiers {
        merge_into(&mut merged, tier);
    }
    merged
}
