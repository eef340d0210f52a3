use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

pub const REDACTED: &str = "<redacted>";

/// JSON form of a directive or response for logging, with every bearer token replaced.
pub fn redacted<T: Serialize>(message: &T) -> String {
    match serde_json::to_value(message) {
        Ok(mut value) => {
            redact_tokens(&mut value);
            value.to_string()
        }
        Err(e) => format!("<unserializable message: {}>", e),
    }
}

/// JSON form of an error for logging, or just its message if it cannot be serialized.
pub fn loggable<E: Serialize + Display>(error: &E) -> String {
    serde_json::to_string(error).unwrap_or_else(|_| error.to_string())
}

fn redact_tokens(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields.iter_mut() {
                if key == "token" {
                    *field = Value::String(REDACTED.to_string());
                } else {
                    redact_tokens(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_tokens),
        _ => {}
    }
}
