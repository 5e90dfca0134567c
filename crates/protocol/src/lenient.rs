//! Tolerant deserializers for CMS fields that arrive in more than one shape.
//!
//! Select fields are stored either as a bare string or as a (usually
//! single-element) array depending on how the field was configured when the
//! entry was written. Both shapes collapse into a `Vec<T>` here, once, so
//! nothing downstream has to ask "is this an array?" again.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `null`, `"Label"` or `["Label", ...]` into `Vec<T>`.
///
/// Blank strings are treated as absent. Labels that do not parse are dropped
/// with a warning; any other JSON shape yields an empty vector.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(normalize_labels(value.unwrap_or(Value::Null)))
}

/// Normalize an already-parsed JSON value the same way [`one_or_many`] does.
pub fn normalize_labels<T>(value: Value) -> Vec<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: Vec<String> = match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => {
                    log::warn!("Ignoring non-string select value: {other}");
                    None
                }
            })
            .collect(),
        other => {
            log::warn!("Ignoring malformed select field: {other}");
            Vec::new()
        }
    };

    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::warn!("Dropping unrecognized select value: {err}");
                None
            }
        })
        .collect()
}

/// Accept a JSON number or a numeric string ("1 200 000", "1,200,000.50").
/// Anything else becomes `None`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Treat `null`, missing and whitespace-only strings alike.
pub fn non_blank_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProjectStatus;
    use serde_json::json;

    #[test]
    fn bare_string_and_single_element_array_agree() {
        let bare: Vec<ProjectStatus> = normalize_labels(json!("Operational"));
        let wrapped: Vec<ProjectStatus> = normalize_labels(json!(["Operational"]));
        assert_eq!(bare, wrapped);
        assert_eq!(bare, vec![ProjectStatus::Operational]);
    }

    #[test]
    fn blank_null_and_garbage_collapse_to_empty() {
        assert!(normalize_labels::<ProjectStatus>(json!(null)).is_empty());
        assert!(normalize_labels::<ProjectStatus>(json!("  ")).is_empty());
        assert!(normalize_labels::<ProjectStatus>(json!({"value": "Design"})).is_empty());
        assert!(normalize_labels::<ProjectStatus>(json!(42)).is_empty());
    }

    #[test]
    fn unknown_labels_are_dropped_but_known_ones_kept() {
        let parsed: Vec<ProjectStatus> = normalize_labels(json!(["Dormant", "Design", null]));
        assert_eq!(parsed, vec![ProjectStatus::Design]);
    }

    #[test]
    fn numbers_accept_strings_with_separators() {
        assert_eq!(number_from_value(&json!(12.5)), Some(12.5));
        assert_eq!(number_from_value(&json!("1,200,000")), Some(1_200_000.0));
        assert_eq!(number_from_value(&json!("3 500")), Some(3500.0));
        assert_eq!(number_from_value(&json!("n/a")), None);
        assert_eq!(number_from_value(&json!("")), None);
        assert_eq!(number_from_value(&json!(true)), None);
    }
}
