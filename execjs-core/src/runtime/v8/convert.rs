//! V8 values to JSON values

use deno_core::v8;
use serde_json::{Map, Number, Value};

/// Nesting deeper than this converts to null
const MAX_DEPTH: usize = 128;

/// Convert a V8 value recursively.
///
/// Functions and cycles become null; object entries whose value converts to null are
/// dropped.
pub fn to_value<'s>(scope: &mut v8::HandleScope<'s>, value: v8::Local<'s, v8::Value>) -> Value {
    let mut parents = Vec::new();
    convert(scope, value, &mut parents, 0)
}

/// Push `value` onto the parent chain unless it is already on it.
fn enter<'s>(
    parents: &mut Vec<v8::Local<'s, v8::Value>>,
    value: v8::Local<'s, v8::Value>,
) -> bool {
    if parents.iter().any(|parent| parent.strict_equals(value)) {
        return false;
    }
    parents.push(value);
    true
}

fn convert<'s>(
    scope: &mut v8::HandleScope<'s>,
    value: v8::Local<'s, v8::Value>,
    parents: &mut Vec<v8::Local<'s, v8::Value>>,
    depth: usize,
) -> Value {
    if depth > MAX_DEPTH || value.is_null_or_undefined() || value.is_function() {
        Value::Null
    } else if value.is_boolean() {
        Value::Bool(value.boolean_value(scope))
    } else if value.is_number() {
        value.number_value(scope).map(number).unwrap_or(Value::Null)
    } else if value.is_string() {
        Value::String(value.to_rust_string_lossy(scope))
    } else if value.is_array_buffer_view() {
        let Ok(view) = v8::Local::<v8::ArrayBufferView>::try_from(value) else {
            return Value::Null;
        };
        let mut bytes = vec![0u8; view.byte_length()];
        let copied = view.copy_contents(&mut bytes);
        bytes.truncate(copied);
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    } else if value.is_array() {
        let Ok(array) = v8::Local::<v8::Array>::try_from(value) else {
            return Value::Null;
        };
        if !enter(parents, value) {
            return Value::Null;
        }

        let mut items = Vec::with_capacity(array.length() as usize);
        for i in 0..array.length() {
            let item = match array.get_index(scope, i) {
                Some(item) => convert(scope, item, parents, depth + 1),
                None => Value::Null,
            };
            items.push(item);
        }

        parents.pop();
        Value::Array(items)
    } else if value.is_object() {
        let Ok(object) = v8::Local::<v8::Object>::try_from(value) else {
            return Value::Null;
        };
        if !enter(parents, value) {
            return Value::Null;
        }

        let mut map = Map::new();
        if let Some(names) =
            object.get_own_property_names(scope, v8::GetPropertyNamesArgs::default())
        {
            for i in 0..names.length() {
                let Some(key) = names.get_index(scope, i) else {
                    continue;
                };
                let Some(item) = object.get(scope, key) else {
                    continue;
                };
                let item = convert(scope, item, parents, depth + 1);
                if item.is_null() {
                    continue;
                }
                let key = match convert(scope, key, parents, depth + 1) {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                map.insert(key, item);
            }
        }

        parents.pop();
        Value::Object(map)
    } else {
        Value::String(value.to_rust_string_lossy(scope))
    }
}

fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}
