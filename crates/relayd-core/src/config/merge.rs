//! Recursive merging of configuration trees.

use serde_json::Value;

use crate::config::error::{ConfigError, ValueShape};

/// Merge `source` into `target`, returning the combined tree.
///
/// - mapping + mapping: recursive union of keys; keys only in `target` are
///   retained, conflicting leaves are resolved by the rules below (later
///   source wins).
/// - sequence + sequence: concatenation, `target` entries first.
/// - mapping or sequence `target` with a differently-shaped `source`:
///   [`ConfigError::MergeShape`].
/// - any other pairing (scalar or null/absent `target`): `source` overrides.
///
/// The merge is not commutative. Multiple sources are combined by folding
/// left-to-right in program order.
pub fn merge(target: Value, source: Value) -> Result<Value, ConfigError> {
    merge_at("", target, source)
}

fn merge_at(key_path: &str, target: Value, source: Value) -> Result<Value, ConfigError> {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                let child_path = if key_path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", key_path, key)
                };
                // An absent target key merges as null, so the source value
                // lands unchanged.
                let target_value = target_map.remove(&key).unwrap_or(Value::Null);
                let merged = merge_at(&child_path, target_value, source_value)?;
                target_map.insert(key, merged);
            }
            Ok(Value::Object(target_map))
        }
        (Value::Array(mut target_seq), Value::Array(source_seq)) => {
            target_seq.extend(source_seq);
            Ok(Value::Array(target_seq))
        }
        (target @ Value::Object(_), source) | (target @ Value::Array(_), source) => {
            Err(ConfigError::MergeShape {
                key_path: display_path(key_path),
                target_shape: ValueShape::of(&target),
                source_shape: ValueShape::of(&source),
            })
        }
        (_, source) => Ok(source),
    }
}

fn display_path(key_path: &str) -> String {
    if key_path.is_empty() {
        "<root>".to_string()
    } else {
        key_path.to_string()
    }
}
