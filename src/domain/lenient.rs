//! Forgiving decoders for loosely typed form fields on server records.
//!
//! Intake forms send numbers as strings, blank strings for unset choices, and
//! the occasional free-text range where a number was expected. One such value
//! must not fail decoding of a whole list, so these fields decode through
//! [`from_str_opt`], which turns anything it cannot read into `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Decodes an optional field by parsing its textual form.
///
/// Strings are trimmed; numbers and booleans are parsed from their JSON text.
/// Blank, null, or unparseable values decode as `None`.
pub(crate) fn from_str_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(Value::Number(n)) => n.to_string().parse().ok(),
        Some(Value::Bool(b)) => b.to_string().parse().ok(),
        _ => None,
    };
    Ok(parsed)
}
