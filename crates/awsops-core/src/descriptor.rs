//! Static operation metadata
//!
//! Every remote operation is described by an [`OperationDescriptor`]: which
//! service it belongs to, the parameters it accepts and where each one lands
//! in the request envelope, the response members a selector may project, and
//! whether it pages with a continuation token. Descriptors are `static` data
//! registered once and never mutated.

use crate::error::CoreError;
use crate::selector::Selector;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;

/// Wire protocol used by a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Protocol {
    /// `POST /` with the operation named in `X-Amz-Target: <prefix>.<Operation>`
    AwsJson1_0 { target_prefix: &'static str },
    /// `POST /<Operation>` with a JSON body
    RestJson1,
}

/// A remote service and how to reach it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// Short name used on the command line (`keyspaces`)
    pub name: &'static str,
    /// Human readable title
    pub title: &'static str,
    /// SigV4 signing name
    pub signing_name: &'static str,
    /// Host prefix for `https://<prefix>.<region>.amazonaws.com`
    pub endpoint_prefix: &'static str,
    pub protocol: Protocol,
}

/// Type of a caller-supplied parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "allowed", rename_all = "kebab-case")]
pub enum ParamKind {
    String,
    Integer,
    Double,
    Boolean,
    /// Serialized as epoch seconds
    Timestamp,
    Enum(&'static [&'static str]),
    StringList,
    EnumList(&'static [&'static str]),
    /// Free-form JSON object (tag maps, nested structures)
    Map,
    /// List of JSON objects (column definitions, replica specs)
    StructureList,
}

impl ParamKind {
    /// Short label used in error messages and `describe` output
    pub fn label(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Enum(_) => "enum",
            Self::StringList => "string list",
            Self::EnumList(_) => "enum list",
            Self::Map => "object",
            Self::StructureList => "object list",
        }
    }
}

/// Value applied by the binder when the caller leaves a parameter unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    String(&'static str),
}

impl DefaultValue {
    pub fn to_json(self) -> Value {
        match self {
            Self::Boolean(b) => Value::Bool(b),
            Self::Integer(i) => json!(i),
            Self::String(s) => Value::String(s.to_string()),
        }
    }
}

/// One entry in an operation's parameter table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// Canonical parameter name
    pub name: &'static str,
    /// Alternate names that bind to the same parameter
    pub aliases: &'static [&'static str],
    pub kind: ParamKind,
    /// Dotted path of the member inside the request envelope
    pub path: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl ParamSpec {
    pub const fn new(name: &'static str, path: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            aliases: &[],
            kind,
            path,
            required: false,
            default: None,
        }
    }

    pub const fn string(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, ParamKind::String)
    }

    pub const fn integer(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, ParamKind::Integer)
    }

    pub const fn double(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, ParamKind::Double)
    }

    pub const fn boolean(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, ParamKind::Boolean)
    }

    pub const fn timestamp(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, ParamKind::Timestamp)
    }

    pub const fn enumeration(
        name: &'static str,
        path: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self::new(name, path, ParamKind::Enum(allowed))
    }

    pub const fn string_list(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, ParamKind::StringList)
    }

    pub const fn enum_list(
        name: &'static str,
        path: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self::new(name, path, ParamKind::EnumList(allowed))
    }

    pub const fn map(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, ParamKind::Map)
    }

    pub const fn structure_list(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, ParamKind::StructureList)
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    pub const fn default_value(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// Case-insensitive match against the canonical name and every alias
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Declared type of a response member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Timestamp,
    List,
    Map,
    Structure,
}

impl FieldKind {
    /// Value returned when the response omits the member
    pub fn zero_value(&self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Integer => json!(0),
            Self::Boolean => Value::Bool(false),
            Self::List => Value::Array(Vec::new()),
            Self::Map => Value::Object(serde_json::Map::new()),
            Self::Timestamp | Self::Structure => Value::Null,
        }
    }
}

/// A response member a selector may project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputField {
    /// Caller-facing name (`Keyspaces`)
    pub name: &'static str,
    /// Member name on the wire (`keyspaces`)
    pub wire: &'static str,
    pub kind: FieldKind,
}

impl OutputField {
    pub const fn new(name: &'static str, wire: &'static str, kind: FieldKind) -> Self {
        Self { name, wire, kind }
    }
}

/// Continuation-token wiring for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Canonical name of the parameter that carries the token into the request
    pub token_param: &'static str,
    /// Wire name of the response member holding the next token
    pub output_token: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OperationDescriptor {
    pub service: &'static ServiceDescriptor,
    pub name: &'static str,
    /// Selector used when the caller does not supply one
    pub default_selector: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    pub params: &'static [ParamSpec],
    pub outputs: &'static [OutputField],
}

impl OperationDescriptor {
    /// `service:Operation`
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.service.name, self.name)
    }

    pub fn is_paginated(&self) -> bool {
        self.pagination.is_some()
    }

    /// Find a parameter by canonical name or alias
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.matches(name))
    }

    /// Find an output field by its caller-facing name
    pub fn output(&self, name: &str) -> Option<&'static OutputField> {
        self.outputs
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// The parameter that carries the continuation token, if the operation pages
    pub fn token_param(&self) -> Option<&'static ParamSpec> {
        self.pagination.and_then(|p| self.param(p.token_param))
    }

    /// Check the descriptor's internal consistency
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |reason: String| CoreError::InvalidDescriptor {
            operation: self.qualified_name(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("operation name is empty".to_string()));
        }

        let mut names = HashSet::new();
        for spec in self.params {
            for name in std::iter::once(spec.name).chain(spec.aliases.iter().copied()) {
                if !names.insert(name.to_ascii_lowercase()) {
                    return Err(invalid(format!("parameter name '{}' is bound twice", name)));
                }
            }
            if spec.path.is_empty() || spec.path.split('.').any(str::is_empty) {
                return Err(invalid(format!(
                    "parameter '{}' has malformed path '{}'",
                    spec.name, spec.path
                )));
            }
            if spec.required && spec.default.is_some() {
                return Err(invalid(format!(
                    "parameter '{}' is required and also has a default",
                    spec.name
                )));
            }
        }

        for (i, a) in self.params.iter().enumerate() {
            for b in &self.params[i + 1..] {
                if paths_conflict(a.path, b.path) {
                    return Err(invalid(format!(
                        "paths '{}' and '{}' overlap",
                        a.path, b.path
                    )));
                }
            }
        }

        let mut outputs = HashSet::new();
        for field in self.outputs {
            if !outputs.insert(field.name.to_ascii_lowercase()) {
                return Err(invalid(format!("output field '{}' declared twice", field.name)));
            }
        }

        if let Some(pagination) = self.pagination {
            let token = self.token_param().ok_or_else(|| {
                invalid(format!(
                    "pagination token parameter '{}' is not declared",
                    pagination.token_param
                ))
            })?;
            if token.kind != ParamKind::String {
                return Err(invalid(format!(
                    "pagination token parameter '{}' must be a string",
                    token.name
                )));
            }
            if !self.outputs.iter().any(|f| f.wire == pagination.output_token) {
                return Err(invalid(format!(
                    "pagination output token '{}' is not an output field",
                    pagination.output_token
                )));
            }
        }

        Selector::resolve(self, Some(self.default_selector)).map_err(|e| {
            invalid(format!(
                "default selector '{}' does not resolve: {}",
                self.default_selector, e
            ))
        })?;

        Ok(())
    }
}

/// Two paths conflict when they are equal or one is a group prefix of the other
fn paths_conflict(a: &str, b: &str) -> bool {
    let is_prefix = |short: &str, long: &str| {
        long.len() > short.len()
            && long.starts_with(short)
            && long.as_bytes()[short.len()] == b'.'
    };
    a == b || is_prefix(a, b) || is_prefix(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_SERVICE: ServiceDescriptor = ServiceDescriptor {
        name: "test",
        title: "Test Service",
        signing_name: "test",
        endpoint_prefix: "test",
        protocol: Protocol::RestJson1,
    };

    const OUTPUTS: &[OutputField] = &[
        OutputField::new("Items", "items", FieldKind::List),
        OutputField::new("NextToken", "nextToken", FieldKind::String),
    ];

    fn descriptor(params: &'static [ParamSpec]) -> OperationDescriptor {
        OperationDescriptor {
            service: &TEST_SERVICE,
            name: "ListItems",
            default_selector: "Items",
            pagination: Some(Pagination {
                token_param: "NextToken",
                output_token: "nextToken",
            }),
            params,
            outputs: OUTPUTS,
        }
    }

    #[test]
    fn test_paths_conflict() {
        assert!(paths_conflict("a", "a"));
        assert!(paths_conflict("a", "a.b"));
        assert!(paths_conflict("a.b.c", "a.b"));
        assert!(!paths_conflict("a", "ab"));
        assert!(!paths_conflict("a.b", "a.c"));
    }

    #[test]
    fn test_valid_descriptor() {
        const PARAMS: &[ParamSpec] = &[
            ParamSpec::string("Name", "name").required(),
            ParamSpec::string("NextToken", "nextToken"),
        ];
        assert!(descriptor(PARAMS).validate().is_ok());
    }

    #[test]
    fn test_alias_collision_rejected() {
        const PARAMS: &[ParamSpec] = &[
            ParamSpec::string("Name", "name").aliases(&["Id"]),
            ParamSpec::string("id", "identifier"),
            ParamSpec::string("NextToken", "nextToken"),
        ];
        let err = descriptor(PARAMS).validate().unwrap_err();
        assert!(err.to_string().contains("bound twice"));
    }

    #[test]
    fn test_leaf_and_group_overlap_rejected() {
        const PARAMS: &[ParamSpec] = &[
            ParamSpec::map("Spec", "spec"),
            ParamSpec::string("Spec_Mode", "spec.mode"),
            ParamSpec::string("NextToken", "nextToken"),
        ];
        let err = descriptor(PARAMS).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_missing_token_param_rejected() {
        const PARAMS: &[ParamSpec] = &[ParamSpec::string("Name", "name")];
        let err = descriptor(PARAMS).validate().unwrap_err();
        assert!(err.to_string().contains("NextToken"));
    }

    #[test]
    fn test_param_lookup_is_case_insensitive() {
        const PARAMS: &[ParamSpec] = &[
            ParamSpec::integer("MaxResult", "maxResults").aliases(&["MaxResults"]),
            ParamSpec::string("NextToken", "nextToken"),
        ];
        let op = descriptor(PARAMS);
        assert_eq!(op.param("maxresults").unwrap().name, "MaxResult");
        assert_eq!(op.param("MAXRESULT").unwrap().name, "MaxResult");
        assert!(op.param("Limit").is_none());
        assert_eq!(op.qualified_name(), "test:ListItems");
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(FieldKind::List.zero_value(), json!([]));
        assert_eq!(FieldKind::String.zero_value(), json!(""));
        assert_eq!(FieldKind::Structure.zero_value(), Value::Null);
    }
}
