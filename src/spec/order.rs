//! Key-order alignment between the input document and the transformed one.
//!
//! Typed structs serialize their known fields first and their flattened extras
//! afterwards, which would reshuffle a user's Yarnfile. We re-align the output
//! against the raw input: keys the input had keep their original position,
//! keys the transformer introduced follow in insertion order.

use serde_json::{Map, Value};

/// Reorder `value`'s object keys to follow `template`, recursively.
///
/// Arrays are aligned element by element; elements beyond the template's
/// length are left as they are.
pub fn align_key_order(template: &Value, value: Value) -> Value {
    match (template, value) {
        (Value::Object(tpl), Value::Object(obj)) => Value::Object(align_object(tpl, obj)),
        (Value::Array(tpl), Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match tpl.get(i) {
                    Some(t) => align_key_order(t, item),
                    None => item,
                })
                .collect(),
        ),
        (_, value) => value,
    }
}

fn align_object(tpl: &Map<String, Value>, mut obj: Map<String, Value>) -> Map<String, Value> {
    // Capture new keys before removals touch `obj`'s internal order.
    let added: Vec<String> = obj
        .keys()
        .filter(|k| !tpl.contains_key(k.as_str()))
        .cloned()
        .collect();

    let mut out = Map::new();
    for (key, t) in tpl {
        if let Some(v) = obj.remove(key) {
            out.insert(key.clone(), align_key_order(t, v));
        }
    }
    for key in added {
        if let Some(v) = obj.remove(&key) {
            out.insert(key, v);
        }
    }
    out
}
