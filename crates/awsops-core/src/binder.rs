//! Parameter binding
//!
//! Maps caller-supplied `(name, value)` pairs onto an operation's parameter
//! table. Names resolve case-insensitively through aliases to a canonical
//! key; values are parsed into the declared [`ParamKind`]. Parameters the
//! caller leaves unset are absent from the result, never zero-filled: the
//! request builder relies on that to omit empty groups.

use crate::descriptor::{OperationDescriptor, ParamKind, ParamSpec};
use crate::error::{CoreError, Result};
use crate::value::ParamValue;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Parameters bound for a single invocation, keyed by canonical name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParameters {
    values: BTreeMap<&'static str, ParamValue>,
}

impl BoundParameters {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

/// Bind caller input against `op`'s parameter table
///
/// A JSON `null` counts as "not supplied".
pub fn bind<I, K>(op: &OperationDescriptor, inputs: I) -> Result<BoundParameters>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let mut bound = BoundParameters::default();

    for (name, value) in inputs {
        let name = name.as_ref();
        let spec = op.param(name).ok_or_else(|| CoreError::UnknownParameter {
            operation: op.qualified_name(),
            name: name.to_string(),
        })?;

        if value.is_null() {
            continue;
        }
        if bound.contains(spec.name) {
            return Err(CoreError::DuplicateParameter {
                name: spec.name.to_string(),
            });
        }

        let parsed = coerce(spec, &value)?;
        bound.values.insert(spec.name, parsed);
    }

    for spec in op.params {
        if bound.contains(spec.name) {
            continue;
        }
        if let Some(default) = spec.default {
            let parsed = coerce(spec, &default.to_json())?;
            bound.values.insert(spec.name, parsed);
        } else if spec.required {
            return Err(CoreError::MissingRequiredParameter {
                operation: op.qualified_name(),
                name: spec.name.to_string(),
            });
        }
    }

    debug!(
        operation = %op.qualified_name(),
        bound = bound.len(),
        "bound parameters"
    );

    Ok(bound)
}

/// Parse one value into the spec's declared kind
fn coerce(spec: &ParamSpec, value: &Value) -> Result<ParamValue> {
    let mismatch = || CoreError::InvalidParameterType {
        name: spec.name.to_string(),
        expected: spec.kind.label(),
        found: describe(value),
    };

    match spec.kind {
        ParamKind::String => scalar_text(value).map(ParamValue::String).ok_or_else(mismatch),
        ParamKind::Integer => match value {
            Value::Number(n) => n.as_i64().map(ParamValue::Integer).ok_or_else(mismatch),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(ParamValue::Integer)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        },
        ParamKind::Double => match value {
            Value::Number(n) => n.as_f64().map(ParamValue::Double).ok_or_else(mismatch),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .map(ParamValue::Double)
                .ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
        ParamKind::Boolean => match value {
            Value::Bool(b) => Ok(ParamValue::Boolean(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(ParamValue::Boolean(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(ParamValue::Boolean(false)),
            _ => Err(mismatch()),
        },
        ParamKind::Timestamp => match value {
            Value::String(s) => match DateTime::parse_from_rfc3339(s.trim()) {
                Ok(ts) => Ok(ParamValue::Timestamp(ts.with_timezone(&Utc))),
                Err(_) => s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(from_epoch_seconds)
                    .ok_or_else(mismatch),
            },
            Value::Number(n) => n.as_f64().and_then(from_epoch_seconds).ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
        ParamKind::Enum(allowed) => match value {
            Value::String(s) => enum_member(spec, allowed, s),
            _ => Err(mismatch()),
        },
        ParamKind::StringList => match value {
            Value::Array(items) => items
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| scalar_text(v).map(ParamValue::String).ok_or_else(mismatch))
                .collect::<Result<Vec<_>>>()
                .map(ParamValue::List),
            other => scalar_text(other)
                .map(|s| ParamValue::List(vec![ParamValue::String(s)]))
                .ok_or_else(mismatch),
        },
        ParamKind::EnumList(allowed) => match value {
            Value::Array(items) => items
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| match v {
                    Value::String(s) => enum_member(spec, allowed, s),
                    _ => Err(mismatch()),
                })
                .collect::<Result<Vec<_>>>()
                .map(ParamValue::List),
            Value::String(s) => Ok(ParamValue::List(vec![enum_member(spec, allowed, s)?])),
            _ => Err(mismatch()),
        },
        ParamKind::Map => match value {
            Value::Object(_) => ParamValue::from_json(value).ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
        ParamKind::StructureList => match value {
            Value::Array(items) if items.iter().all(|v| v.is_object() || v.is_null()) => {
                ParamValue::from_json(value).ok_or_else(mismatch)
            }
            Value::Object(_) => ParamValue::from_json(value)
                .map(|v| ParamValue::List(vec![v]))
                .ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
    }
}

fn from_epoch_seconds(secs: f64) -> Option<ParamValue> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999)).map(ParamValue::Timestamp)
}

/// Textual form of a scalar; numbers and booleans keep their literal spelling
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn enum_member(spec: &ParamSpec, allowed: &[&'static str], raw: &str) -> Result<ParamValue> {
    allowed
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(raw.trim()))
        .map(|canonical| ParamValue::Enum((*canonical).to_string()))
        .ok_or_else(|| CoreError::InvalidEnumValue {
            name: spec.name.to_string(),
            value: raw.to_string(),
            allowed: allowed.join(", "),
        })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string '{}'", s),
        Value::Array(_) => "a list".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DefaultValue, FieldKind, OutputField, Protocol, ServiceDescriptor};
    use serde_json::json;

    static SERVICE: ServiceDescriptor = ServiceDescriptor {
        name: "keyspaces",
        title: "Keyspaces",
        signing_name: "cassandra",
        endpoint_prefix: "cassandra",
        protocol: Protocol::AwsJson1_0 {
            target_prefix: "KeyspacesService",
        },
    };

    const PARAMS: &[ParamSpec] = &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TableName", "tableName").required(),
        ParamSpec::enumeration(
            "CapacitySpecification_ThroughputMode",
            "capacitySpecification.throughputMode",
            &["PAY_PER_REQUEST", "PROVISIONED"],
        )
        .aliases(&["ThroughputMode"]),
        ParamSpec::integer(
            "CapacitySpecification_ReadCapacityUnit",
            "capacitySpecification.readCapacityUnits",
        )
        .aliases(&["ReadCapacityUnits"]),
        ParamSpec::double("TargetValue", "autoScaling.targetValue"),
        ParamSpec::boolean("DisableScaleIn", "autoScaling.disableScaleIn"),
        ParamSpec::timestamp("RestoreTimestamp", "restoreTimestamp"),
        ParamSpec::string_list("RegionList", "replicationSpecification.regionList"),
        ParamSpec::structure_list("SchemaDefinition_AllColumn", "schemaDefinition.allColumns"),
        ParamSpec::integer("DefaultTimeToLive", "defaultTimeToLive")
            .default_value(DefaultValue::Integer(0)),
    ];

    static CREATE_TABLE: OperationDescriptor = OperationDescriptor {
        service: &SERVICE,
        name: "CreateTable",
        default_selector: "ResourceArn",
        pagination: None,
        params: PARAMS,
        outputs: &[OutputField::new("ResourceArn", "resourceArn", FieldKind::String)],
    };

    #[test]
    fn test_missing_required_parameter_named() {
        let err = bind(&CREATE_TABLE, vec![("KeyspaceName", json!("ks1"))]).unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingRequiredParameter {
                operation: "keyspaces:CreateTable".into(),
                name: "TableName".into(),
            }
        );
    }

    #[test]
    fn test_alias_resolves_to_canonical_key() {
        let bound = bind(
            &CREATE_TABLE,
            vec![
                ("keyspacename", json!("ks1")),
                ("TableName", json!("t1")),
                ("ReadCapacityUnits", json!(5)),
            ],
        )
        .unwrap();
        assert_eq!(
            bound.get("CapacitySpecification_ReadCapacityUnit"),
            Some(&ParamValue::Integer(5))
        );
        assert!(bound.get("ReadCapacityUnits").is_none());
    }

    #[test]
    fn test_unset_optionals_are_absent_and_defaults_apply() {
        let bound = bind(
            &CREATE_TABLE,
            vec![("KeyspaceName", json!("ks1")), ("TableName", json!("t1"))],
        )
        .unwrap();
        assert!(!bound.contains("CapacitySpecification_ThroughputMode"));
        assert!(!bound.contains("CapacitySpecification_ReadCapacityUnit"));
        assert_eq!(bound.get("DefaultTimeToLive"), Some(&ParamValue::Integer(0)));
        assert_eq!(bound.len(), 3);
    }

    #[test]
    fn test_null_counts_as_unset() {
        let err = bind(
            &CREATE_TABLE,
            vec![("KeyspaceName", json!("ks1")), ("TableName", Value::Null)],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "MissingRequiredParameter");
    }

    #[test]
    fn test_string_parsing() {
        let bound = bind(
            &CREATE_TABLE,
            vec![
                ("KeyspaceName", json!("ks1")),
                ("TableName", json!(42)),
                ("ReadCapacityUnits", json!(" 10 ")),
                ("ThroughputMode", json!("provisioned")),
                ("TargetValue", json!("70.5")),
                ("DisableScaleIn", json!("TRUE")),
                ("RestoreTimestamp", json!("2024-01-02T03:04:05+01:00")),
            ],
        )
        .unwrap();
        assert_eq!(bound.get("TableName"), Some(&ParamValue::String("42".into())));
        assert_eq!(
            bound.get("CapacitySpecification_ReadCapacityUnit"),
            Some(&ParamValue::Integer(10))
        );
        assert_eq!(
            bound.get("CapacitySpecification_ThroughputMode"),
            Some(&ParamValue::Enum("PROVISIONED".into()))
        );
        assert_eq!(bound.get("TargetValue"), Some(&ParamValue::Double(70.5)));
        assert_eq!(bound.get("DisableScaleIn"), Some(&ParamValue::Boolean(true)));
        assert_eq!(
            bound.get("RestoreTimestamp").map(ParamValue::to_json),
            Some(json!(1704161045))
        );
    }

    #[test]
    fn test_numeric_text_keeps_its_spelling() {
        let bound = bind(
            &CREATE_TABLE,
            vec![
                ("KeyspaceName", json!("007")),
                ("TableName", json!("1.50")),
                ("RestoreTimestamp", json!("1714521600")),
            ],
        )
        .unwrap();
        assert_eq!(bound.get("KeyspaceName"), Some(&ParamValue::String("007".into())));
        assert_eq!(bound.get("TableName"), Some(&ParamValue::String("1.50".into())));
        assert_eq!(
            bound.get("RestoreTimestamp").map(ParamValue::to_json),
            Some(json!(1714521600))
        );
    }

    #[test]
    fn test_invalid_enum_names_allowed_set() {
        let err = bind(
            &CREATE_TABLE,
            vec![
                ("KeyspaceName", json!("ks1")),
                ("TableName", json!("t1")),
                ("ThroughputMode", json!("FAST")),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidEnumValue {
                name: "CapacitySpecification_ThroughputMode".into(),
                value: "FAST".into(),
                allowed: "PAY_PER_REQUEST, PROVISIONED".into(),
            }
        );
    }

    #[test]
    fn test_invalid_integer() {
        let err = bind(
            &CREATE_TABLE,
            vec![
                ("KeyspaceName", json!("ks1")),
                ("TableName", json!("t1")),
                ("ReadCapacityUnits", json!("five")),
            ],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "InvalidParameterType");
        assert!(err.to_string().contains("integer"));
    }

    #[test]
    fn test_unknown_and_duplicate_parameters() {
        let err = bind(&CREATE_TABLE, vec![("Bogus", json!("x"))]).unwrap_err();
        assert_eq!(err.error_code(), "UnknownParameter");

        let err = bind(
            &CREATE_TABLE,
            vec![
                ("CapacitySpecification_ReadCapacityUnit", json!(1)),
                ("ReadCapacityUnits", json!(2)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::DuplicateParameter {
                name: "CapacitySpecification_ReadCapacityUnit".into()
            }
        );
    }

    #[test]
    fn test_lists_accept_single_values() {
        let bound = bind(
            &CREATE_TABLE,
            vec![
                ("KeyspaceName", json!("ks1")),
                ("TableName", json!("t1")),
                ("RegionList", json!("us-east-1")),
                ("SchemaDefinition_AllColumn", json!({"name": "id", "type": "text"})),
            ],
        )
        .unwrap();
        assert_eq!(
            bound.get("RegionList").map(ParamValue::to_json),
            Some(json!(["us-east-1"]))
        );
        assert_eq!(
            bound.get("SchemaDefinition_AllColumn").map(ParamValue::to_json),
            Some(json!([{"name": "id", "type": "text"}]))
        );
    }

    #[test]
    fn test_structure_list_rejects_scalars() {
        let err = bind(
            &CREATE_TABLE,
            vec![("SchemaDefinition_AllColumn", json!(["id"]))],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "InvalidParameterType");
    }
}
