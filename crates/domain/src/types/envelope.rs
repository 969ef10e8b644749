//! Response envelope parsing
//!
//! The backend wraps payloads as `{ code, message, data }` or returns bare
//! payloads. An envelope code other than 200 is an application failure even
//! when the transport status is 2xx.

use serde_json::{Map, Value};

use crate::constants::{
    DEFAULT_FAILURE_MESSAGE, ENVELOPE_CODE_FIELD, ENVELOPE_DATA_FIELD, ENVELOPE_ERROR_FIELD,
    ENVELOPE_MESSAGE_FIELD, SUCCESS_CODE,
};
use crate::errors::{ErpError, Result};

/// Unwrap a 2xx response body into its payload.
///
/// - no `code` field (or `code: null`): the whole body is the payload
/// - `code == 200`: the `data` field, or the body without envelope keys
/// - any other `code`: [`ErpError::Application`]
pub fn unwrap_envelope(body: Value) -> Result<Value> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };

    let code = match map.get(ENVELOPE_CODE_FIELD) {
        None | Some(Value::Null) => return Ok(Value::Object(map)),
        Some(raw) => envelope_code(raw),
    };

    if code != Some(SUCCESS_CODE) {
        return Err(ErpError::Application {
            code: code.unwrap_or_default(),
            message: error_detail(&map).unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        });
    }

    if let Some(data) = map.remove(ENVELOPE_DATA_FIELD) {
        return Ok(data);
    }
    map.remove(ENVELOPE_CODE_FIELD);
    map.remove(ENVELOPE_MESSAGE_FIELD);
    Ok(Value::Object(map))
}

/// `error` field, else `message` field, of an error body.
pub fn error_detail(map: &Map<String, Value>) -> Option<String> {
    [ENVELOPE_ERROR_FIELD, ENVELOPE_MESSAGE_FIELD]
        .iter()
        .filter_map(|field| map.get(*field))
        .find_map(|value| match value {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        })
}

fn envelope_code(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|raw| raw.is_finite() && raw.fract() == 0.0)
                .and_then(|raw| i64::try_from(raw as i128).ok())
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
