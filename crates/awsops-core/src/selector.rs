//! Response projection
//!
//! A selector string is resolved against the operation's output table once,
//! before any call is made:
//!
//! - `*` returns the whole response
//! - `^Name` echoes a bound input parameter (by name or alias)
//! - anything else names a top-level response member

use crate::binder::BoundParameters;
use crate::descriptor::{FieldKind, OperationDescriptor, OutputField, ParamSpec};
use crate::envelope::ResponseEnvelope;
use crate::error::{CoreError, Result};
use serde_json::Value;
use std::fmt;

const IDENTITY: &str = "*";
const ECHO_PREFIX: char = '^';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Identity,
    Field(&'static OutputField),
    Echo(&'static ParamSpec),
}

impl Selector {
    /// Resolve `raw` (or the operation's default when `None`) to a selector
    pub fn resolve(op: &OperationDescriptor, raw: Option<&str>) -> Result<Self> {
        let raw = raw.map(str::trim).unwrap_or(op.default_selector);
        let invalid = || CoreError::InvalidSelector {
            selector: raw.to_string(),
            operation: op.qualified_name(),
            available: available(op),
        };

        if raw == IDENTITY {
            return Ok(Self::Identity);
        }
        if let Some(param) = raw.strip_prefix(ECHO_PREFIX) {
            return op.param(param).map(Self::Echo).ok_or_else(invalid);
        }
        op.output(raw).map(Self::Field).ok_or_else(invalid)
    }

    /// Produce the caller-facing value for one response
    pub fn project(&self, response: &ResponseEnvelope, input: &BoundParameters) -> Value {
        match self {
            Self::Identity => response.body().clone(),
            Self::Field(field) => response
                .field(field.wire)
                .cloned()
                .unwrap_or_else(|| field.kind.zero_value()),
            Self::Echo(spec) => input
                .get(spec.name)
                .map_or(Value::Null, |value| value.to_json()),
        }
    }

    /// Whether projections are lists whose items are emitted one by one
    pub fn yields_list(&self) -> bool {
        matches!(self, Self::Field(field) if field.kind == FieldKind::List)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "{}", IDENTITY),
            Self::Field(field) => write!(f, "{}", field.name),
            Self::Echo(spec) => write!(f, "{}{}", ECHO_PREFIX, spec.name),
        }
    }
}

fn available(op: &OperationDescriptor) -> String {
    std::iter::once(IDENTITY.to_string())
        .chain(op.outputs.iter().map(|f| f.name.to_string()))
        .chain(op.params.iter().map(|p| format!("{}{}", ECHO_PREFIX, p.name)))
        .collect::<Vec<_>>()
        .join(", ")
}
