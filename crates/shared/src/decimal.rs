//! Lenient decimal deserialization.
//!
//! Django REST Framework renders `DecimalField` values as JSON strings
//! (`"8.94830000"`), while mock data and hand-written payloads use plain
//! numbers. These helpers accept either form.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn parse_text<E: de::Error>(text: &str) -> Result<Option<f64>, E> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| E::custom(format!("invalid decimal value: {trimmed}")))
}

/// Deserializes a required decimal from a number or a numeric string.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => {
            parse_text::<D::Error>(&s)?.ok_or_else(|| de::Error::custom("empty decimal value"))
        }
    }
}

/// Deserializes an optional decimal; `null` and empty strings become `None`.
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => parse_text::<D::Error>(&s),
    }
}
