//! Lenient coercion of catalog JSON values.
//!
//! The remote catalog is not validated: booleans arrive as `true`, `"true"`
//! or `"1"`, prices as numbers or numeric strings, and arrays may be missing
//! or null. These helpers coerce such values at the point of use instead of
//! rejecting the whole payload.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::ids::ProductId;
use crate::product::Feedback;

/// Coerce a JSON value to a boolean.
///
/// Strings are true only for `"true"` (any case) or `"1"`. Numbers are true
/// when non-zero. Arrays and objects are always true, null is false.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a JSON value to a finite number.
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Coerce a JSON value to text. Numbers are rendered, everything else is empty.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Parse a feedback timestamp: RFC 3339, a plain `YYYY-MM-DD` date, or epoch
/// milliseconds.
pub fn to_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| Utc.from_utc_datetime(&naive))
            }),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

pub(crate) fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(to_bool).unwrap_or(false))
}

pub(crate) fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(to_number)
        .map(|p| p.max(0.0))
        .unwrap_or(0.0))
}

pub(crate) fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_number))
}

pub(crate) fn rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_number).unwrap_or(0.0))
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(to_text).unwrap_or_default())
}

pub(crate) fn product_id<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(ProductId::new(s)),
        Value::Number(n) => Ok(ProductId::new(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "product id must be a string or number, got {other}"
        ))),
    }
}

pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_timestamp))
}

/// Feedback arrays are optional; entries that fail to parse are skipped.
pub(crate) fn feedbacks<'de, D>(deserializer: D) -> Result<Vec<Feedback>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    let total = items.len();
    let parsed: Vec<Feedback> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if parsed.len() < total {
        tracing::debug!(skipped = total - parsed.len(), "skipped malformed feedback entries");
    }
    Ok(parsed)
}

/// Serialize integral values without a fractional part so persisted
/// snapshots keep the catalog's `5` rather than `5.0`.
pub(crate) fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub(crate) fn serialize_optional_number<S>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serialize_number(v, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_bool_variants() {
        assert!(to_bool(&json!(true)));
        assert!(!to_bool(&json!(false)));
        assert!(to_bool(&json!("true")));
        assert!(to_bool(&json!("TRUE")));
        assert!(to_bool(&json!("1")));
        assert!(!to_bool(&json!("yes")));
        assert!(!to_bool(&json!("false")));
        assert!(!to_bool(&json!("0")));
        assert!(to_bool(&json!(1)));
        assert!(!to_bool(&json!(0)));
        assert!(!to_bool(&json!(null)));
    }

    #[test]
    fn test_to_number_accepts_numeric_strings() {
        assert_eq!(to_number(&json!(12.5)), Some(12.5));
        assert_eq!(to_number(&json!(" 0.25 ")), Some(0.25));
        assert_eq!(to_number(&json!("abc")), None);
        assert_eq!(to_number(&json!(null)), None);
        assert_eq!(to_number(&json!("NaN")), None);
    }

    #[test]
    fn test_to_timestamp_formats() {
        let rfc = to_timestamp(&json!("2024-03-01T10:30:00.000Z")).unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-03-01T10:30:00+00:00");

        let plain = to_timestamp(&json!("2024-03-01")).unwrap();
        assert_eq!(plain.format("%Y-%m-%d").to_string(), "2024-03-01");

        let millis = to_timestamp(&json!(0)).unwrap();
        assert_eq!(millis.timestamp(), 0);

        assert!(to_timestamp(&json!("yesterday")).is_none());
    }
}
