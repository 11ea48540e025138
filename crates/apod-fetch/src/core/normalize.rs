use serde_json::{Map, Value};

use crate::data::ImageRecord;
use crate::error::{FetchError, Result};

/// Map a decoded payload onto an ordered list of records.
///
/// Payload-level error markers are checked first. Recognized shapes, in
/// order: a bare array, an object with an `items` array, an object with a
/// `results` array, and a single record object carrying a `url`. Anything
/// else is rejected rather than guessed at.
pub fn normalize(payload: Value) -> Result<Vec<ImageRecord>> {
    if let Some(message) = api_error_message(&payload) {
        return Err(FetchError::Api(message));
    }

    let elements = match payload {
        Value::Array(elements) => elements,
        Value::Object(mut object) => {
            if let Some(Value::Array(items)) = object.remove("items") {
                items
            } else if let Some(Value::Array(results)) = object.remove("results") {
                results
            } else if has_url(&object) {
                vec![Value::Object(object)]
            } else {
                return Err(FetchError::MalformedResponse(describe_object(&object)));
            }
        }
        other => {
            return Err(FetchError::MalformedResponse(format!(
                "expected an array or object, got {}",
                type_name(&other)
            )));
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter(|(_, element)| !element.is_null())
        .map(|(index, element)| to_record(index, element))
        .collect()
}

fn api_error_message(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;
    let nested = object
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str);
    let flat = object.get("msg").and_then(Value::as_str);

    nested
        .or(flat)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn has_url(object: &Map<String, Value>) -> bool {
    object
        .get("url")
        .and_then(Value::as_str)
        .is_some_and(|u| !u.trim().is_empty())
}

fn to_record(index: usize, element: Value) -> Result<ImageRecord> {
    if !element.is_object() {
        return Err(FetchError::MalformedResponse(format!(
            "element {index} is {}, not a record",
            type_name(&element)
        )));
    }
    serde_json::from_value(element)
        .map_err(|e| FetchError::MalformedResponse(format!("element {index}: {e}")))
}

fn describe_object(object: &Map<String, Value>) -> String {
    let keys: Vec<&str> = object.keys().map(String::as_str).take(8).collect();
    format!("object without items, results or url (keys: [{}])", keys.join(", "))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
