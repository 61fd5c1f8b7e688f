//! Pure additive merge of projection fragments
//!
//! Every template entry produces its own fragment; the projector folds them
//! together with [`merge`]. Conflict rules:
//!
//! - mapping + mapping: union, shared keys merged recursively
//! - sequence + sequence of mappings: positional merge, shared indices merged
//!   recursively and surplus elements of either side appended
//! - any other sequence + sequence: concatenation
//! - anything else: the fragment wins

use serde_json::Value;

/// Combine `fragment` into `base`, returning the merged value
pub fn merge(base: Value, fragment: Value) -> Value {
    match (base, fragment) {
        (Value::Object(mut base), Value::Object(fragment)) => {
            for (key, value) in fragment {
                match base.get_mut(&key) {
                    Some(slot) => {
                        let existing = std::mem::take(slot);
                        *slot = merge(existing, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (Value::Array(mut base), Value::Array(fragment)) if !all_mappings(&base, &fragment) => {
            base.extend(fragment);
            Value::Array(base)
        }
        (Value::Array(base), Value::Array(fragment)) => {
            let mut merged = Vec::with_capacity(base.len().max(fragment.len()));
            let mut base = base.into_iter();
            let mut fragment = fragment.into_iter();

            loop {
                match (base.next(), fragment.next()) {
                    (Some(left), Some(right)) => merged.push(merge(left, right)),
                    (Some(left), None) => merged.push(left),
                    (None, Some(right)) => merged.push(right),
                    (None, None) => break,
                }
            }

            Value::Array(merged)
        }
        (_, fragment) => fragment,
    }
}

fn all_mappings(base: &[Value], fragment: &[Value]) -> bool {
    base.iter().chain(fragment).all(Value::is_object)
}
