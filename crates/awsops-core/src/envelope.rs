//! Request and response envelopes
//!
//! The request builder walks an operation's parameter table and places every
//! bound value at its dotted path. Groups are created only when a member is
//! inserted beneath them and a group that ends up with no members converts to
//! "absent", so an optional group whose every leaf is unset never reaches the
//! wire, at any nesting depth.

use crate::binder::BoundParameters;
use crate::descriptor::OperationDescriptor;
use crate::error::{CoreError, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Nested request body for one API call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestEnvelope {
    body: Map<String, Value>,
}

impl RequestEnvelope {
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.body)
    }

    /// Look up a member by dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.body.get(first)?, |node, segment| node.get(segment))
    }

    /// Set the continuation token member, replacing any previous token
    pub fn set_token(&mut self, path: &str, token: &str) {
        let mut node = &mut self.body;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                node.insert(segment.to_string(), Value::String(token.to_string()));
                return;
            }
            let child = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Value::Object(next) = child else {
                return;
            };
            node = next;
        }
    }
}

#[derive(Debug)]
enum Node {
    Leaf(Value),
    Group(Group),
}

impl Node {
    fn into_value(self) -> Option<Value> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Group(group) => group.into_value(),
        }
    }
}

/// Members in declaration order
#[derive(Debug, Default)]
struct Group {
    members: Vec<(String, Node)>,
}

impl Group {
    fn insert(&mut self, segments: &[&str], value: Value) -> std::result::Result<(), ()> {
        let Some((head, rest)) = segments.split_first() else {
            return Err(());
        };
        let existing = self.members.iter().position(|(name, _)| name == head);

        match (existing, rest.is_empty()) {
            (None, true) => {
                self.members.push((head.to_string(), Node::Leaf(value)));
                Ok(())
            }
            (None, false) => {
                let mut group = Group::default();
                group.insert(rest, value)?;
                self.members.push((head.to_string(), Node::Group(group)));
                Ok(())
            }
            (Some(index), false) => match &mut self.members[index].1 {
                Node::Group(group) => group.insert(rest, value),
                Node::Leaf(_) => Err(()),
            },
            (Some(_), true) => Err(()),
        }
    }

    /// `None` when no member below produced a value
    fn into_value(self) -> Option<Value> {
        let members: Map<String, Value> = self
            .members
            .into_iter()
            .filter_map(|(name, node)| node.into_value().map(|v| (name, v)))
            .collect();
        (!members.is_empty()).then_some(Value::Object(members))
    }
}

/// Build the request envelope for `op` from bound parameters
pub fn build_request(op: &OperationDescriptor, bound: &BoundParameters) -> Result<RequestEnvelope> {
    let mut root = Group::default();

    for spec in op.params {
        let Some(value) = bound.get(spec.name) else {
            continue;
        };
        let segments: Vec<&str> = spec.path.split('.').collect();
        root.insert(&segments, value.to_json())
            .map_err(|()| CoreError::PathConflict {
                operation: op.qualified_name(),
                path: spec.path.to_string(),
            })?;
    }

    let body = match root.into_value() {
        Some(Value::Object(body)) => body,
        _ => Map::new(),
    };

    debug!(
        operation = %op.qualified_name(),
        members = body.len(),
        "built request envelope"
    );

    Ok(RequestEnvelope { body })
}

/// Raw response returned by a remote call; read-only once received
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
    body: Value,
    request_id: Option<String>,
}

impl ResponseEnvelope {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Top-level member by wire name; `null` counts as absent
    pub fn field(&self, wire: &str) -> Option<&Value> {
        self.body.get(wire).filter(|v| !v.is_null())
    }

    /// Continuation token, if present and non-empty
    pub fn next_token(&self, wire: &str) -> Option<&str> {
        self.field(wire)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }
}
