//! JSON snapshots of observable state.

use emu_core::{Observable, Value};
use serde_json::{Map, Value as JsonValue, json};

/// Every query path of `component` with its current value.
#[must_use]
pub fn state_json(component: &dyn Observable) -> JsonValue {
    let mut map = Map::new();
    for &path in component.query_paths() {
        let value = match component.query(path) {
            Some(Value::Bool(v)) => json!(v),
            Some(Value::U8(v)) => json!(v),
            Some(Value::U16(v)) => json!(v),
            Some(Value::U32(v)) => json!(v),
            Some(Value::String(v)) => json!(v),
            Some(Value::Unset) | None => JsonValue::Null,
        };
        map.insert(path.to_string(), value);
    }
    JsonValue::Object(map)
}
