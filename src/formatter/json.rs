//! JSON pretty-printing with 2-space indentation.

use crate::formatter::FormatError;
use serde::Serialize;
use serde_json::Value;

/// Formats a JSON value with 2-space indentation.
///
/// # Examples
///
/// ```
/// use webpost::formatter::json::format_json_pretty;
/// use serde_json::json;
///
/// let formatted = format_json_pretty(&json!({"id": 1})).unwrap();
/// assert_eq!(formatted, "{\n  \"id\": 1\n}");
/// ```
pub fn format_json_pretty(value: &Value) -> Result<String, FormatError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| FormatError::JsonError(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| FormatError::EncodingError(e.to_string()))
}
