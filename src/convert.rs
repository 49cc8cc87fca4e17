use serde::Serialize;

use crate::error::{ErrorKind, JsonError};
use crate::model::{Array, Object, Value};

/// Deep-copies a `serde_json` tree into a [`Value`] tree.
///
/// Numbers that fit 64-bit signed become the Integer kind; everything else
/// numeric becomes Float. `recursion_limit` bounds the walk so an
/// unexpectedly deep source fails with `DepthExceeded` instead of exhausting
/// the stack.
pub fn from_serde_value(element: &serde_json::Value, recursion_limit: usize) -> Result<Value, JsonError> {
    if recursion_limit == 0 {
        return Err(JsonError::simple(
            ErrorKind::DepthExceeded,
            "Depth limit exceeded while converting value",
        ));
    }

    let converted = match element {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(val) => Value::Boolean(*val),
        serde_json::Value::Number(num) => {
            if let Some(n) = num.as_i64() {
                Value::Integer(n)
            } else if let Some(x) = num.as_f64() {
                Value::Float(x)
            } else {
                return Err(JsonError::simple(
                    ErrorKind::InvalidNumber,
                    format!("Number {} fits neither numeric kind", num),
                ));
            }
        }
        serde_json::Value::String(val) => Value::String(val.clone()),
        serde_json::Value::Array(elements) => {
            let mut array = Array::with_capacity(elements.len());
            for child in elements {
                array.push_back(from_serde_value(child, recursion_limit - 1)?);
            }
            Value::Array(array)
        }
        serde_json::Value::Object(map) => {
            let mut object = Object::new();
            for (key, value) in map.iter() {
                object.insert(key.clone(), from_serde_value(value, recursion_limit - 1)?);
            }
            Value::Object(object)
        }
    };

    Ok(converted)
}

/// Deep-copies a [`Value`] tree into a `serde_json` tree. Non-finite floats
/// have no JSON representation and fail with `InvalidNumber`.
pub fn to_serde_value(value: &Value) -> Result<serde_json::Value, JsonError> {
    let converted = match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => serde_json::Value::Number((*n).into()),
        Value::Float(x) => serde_json::Number::from_f64(*x)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                JsonError::simple(
                    ErrorKind::InvalidNumber,
                    "Non-finite float cannot be represented in JSON",
                )
            })?,
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(array) => {
            let mut elements = Vec::with_capacity(array.size());
            for child in array {
                elements.push(to_serde_value(child)?);
            }
            serde_json::Value::Array(elements)
        }
        Value::Object(object) => {
            let mut map = serde_json::Map::new();
            for (key, child) in object {
                map.insert(key.clone(), to_serde_value(child)?);
            }
            serde_json::Value::Object(map)
        }
    };

    Ok(converted)
}

/// Builds a [`Value`] tree from any [`serde::Serialize`] type.
///
/// This replaces the hand-written "walk your own struct" conversion: the
/// caller's structure is deep-copied node by node into an owned tree. The
/// walk neither detects nor tolerates cycles in the source; avoiding them
/// remains the caller's obligation.
pub fn from_serialize<T: Serialize>(source: &T, recursion_limit: usize) -> Result<Value, JsonError> {
    let interim = serde_json::to_value(source).map_err(|err| {
        JsonError::simple(ErrorKind::TypeMismatch, format!("Value cannot be serialized: {}", err))
    })?;
    from_serde_value(&interim, recursion_limit)
}
