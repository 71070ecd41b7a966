//! HTML form payloads posted to the web front end.

use serde::{Deserialize, Deserializer};

pub mod hurricane_alerts;
pub mod products;

/// Treats blank form fields as absent.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.trim().is_empty()))
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn sanitize_inline_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
