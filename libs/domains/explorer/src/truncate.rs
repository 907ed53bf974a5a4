use serde_json::Value;

/// Strings longer than this many UTF-16 code units are cut
pub const MAX_STRING_UNITS: usize = 100;

/// Arrays keep at most this many leading elements
pub const MAX_ARRAY_ITEMS: usize = 2;

pub const ELLIPSIS: &str = "...";

/// Size-bounded copy of `value` suitable for storing as a response preview.
///
/// Object keys are never dropped. Array elements past [`MAX_ARRAY_ITEMS`] are
/// dropped without a marker.
pub fn truncate(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(truncate_str(text)),
        Value::Array(items) => Value::Array(items.iter().take(MAX_ARRAY_ITEMS).map(truncate).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), truncate(value)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

/// Lengths are UTF-16 code units, as in the JSON the API serves. A character
/// that would straddle the limit is dropped whole.
fn truncate_str(text: &str) -> String {
    if text.encode_utf16().count() <= MAX_STRING_UNITS {
        return text.to_string();
    }

    let mut units = 0;
    let mut cut = text.len();
    for (index, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > MAX_STRING_UNITS {
            cut = index;
            break;
        }
    }
    format!("{}{}", &text[..cut], ELLIPSIS)
}
