//! Typed parameter values

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A bound parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    /// Canonical spelling of an allowed enum value
    Enum(String),
    Timestamp(DateTime<Utc>),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// Convert an arbitrary JSON value, dropping `null` members
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Boolean(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Double)),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(items) => Some(Self::List(items.iter().filter_map(Self::from_json).collect())),
            Value::Object(members) => Some(Self::Map(
                members
                    .iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k.clone(), v)))
                    .collect(),
            )),
        }
    }

    /// Wire representation; timestamps become epoch seconds
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) | Self::Enum(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::Number((*i).into()),
            Self::Double(d) => Number::from_f64(*d).map_or(Value::Null, Value::Number),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Timestamp(ts) => epoch_seconds(ts),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(members) => Value::Object(
                members
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Enum(s) => Some(s),
            _ => None,
        }
    }
}

fn epoch_seconds(ts: &DateTime<Utc>) -> Value {
    if ts.timestamp_subsec_nanos() == 0 {
        Value::Number(ts.timestamp().into())
    } else {
        let secs = ts.timestamp() as f64 + f64::from(ts.timestamp_subsec_nanos()) / 1e9;
        Number::from_f64(secs).map_or(Value::Null, Value::Number)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Enum(s) => write!(f, "{}", s),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_drops_nulls() {
        let value = ParamValue::from_json(&json!({"key": "env", "value": null})).unwrap();
        let ParamValue::Map(members) = value else {
            panic!("expected map");
        };
        assert_eq!(members.len(), 1);
        assert_eq!(members["key"], ParamValue::String("env".into()));
    }

    #[test]
    fn test_numbers_keep_their_type() {
        assert_eq!(ParamValue::from_json(&json!(5)), Some(ParamValue::Integer(5)));
        assert_eq!(ParamValue::from_json(&json!(0.75)), Some(ParamValue::Double(0.75)));
    }

    #[test]
    fn test_timestamp_serializes_as_epoch_seconds() {
        let ts = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(ParamValue::Timestamp(ts).to_json(), json!(1704164645));

        let ts = DateTime::parse_from_rfc3339("2024-01-02T03:04:05.5Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(ParamValue::Timestamp(ts).to_json(), json!(1704164645.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::Enum("PROVISIONED".into()).to_string(), "PROVISIONED");
        assert_eq!(ParamValue::Integer(7).to_string(), "7");
        assert_eq!(
            ParamValue::List(vec![ParamValue::String("a".into())]).to_string(),
            r#"["a"]"#
        );
    }
}
