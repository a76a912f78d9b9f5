// `awsops operations` and `awsops describe`

use anyhow::{Context, Result};
use awsops_core::{FieldKind, OperationDescriptor, ParamKind, Registry};
use std::io::Write;

/// One line per operation: qualified name, default selector, pagination marker
pub fn write_operations<W: Write>(
    registry: &Registry,
    service: Option<&str>,
    mut out: W,
) -> Result<usize> {
    let mut count = 0;
    for op in registry.operations() {
        if let Some(service) = service {
            if !op.service.name.eq_ignore_ascii_case(service) {
                continue;
            }
        }
        let paginated = if op.is_paginated() { "\tpaginated" } else { "" };
        writeln!(out, "{}\t{}{}", op.qualified_name(), op.default_selector, paginated)?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

/// Human-readable summary of one operation
pub fn write_description<W: Write>(op: &OperationDescriptor, mut out: W) -> Result<()> {
    writeln!(out, "{} ({})", op.qualified_name(), op.service.title)?;
    writeln!(out, "Default selector: {}", op.default_selector)?;
    match op.pagination {
        Some(p) => writeln!(out, "Paginated: yes (token parameter {})", p.token_param)?,
        None => writeln!(out, "Paginated: no")?,
    }

    writeln!(out, "\nParameters:")?;
    if op.params.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for spec in op.params {
        write!(out, "  {} <{}>", spec.name, spec.kind.label())?;
        if spec.required {
            write!(out, " required")?;
        }
        if let Some(default) = spec.default {
            write!(out, " default={}", default.to_json())?;
        }
        if !spec.aliases.is_empty() {
            write!(out, " aliases: {}", spec.aliases.join(", "))?;
        }
        if let ParamKind::Enum(allowed) | ParamKind::EnumList(allowed) = spec.kind {
            write!(out, " values: {}", allowed.join("|"))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "\nOutputs:")?;
    if op.outputs.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for field in op.outputs {
        writeln!(out, "  {} <{}>", field.name, field_label(field.kind))?;
    }
    out.flush()?;
    Ok(())
}

/// Machine-readable form of the descriptor
pub fn describe_json(op: &OperationDescriptor) -> Result<String> {
    serde_json::to_string_pretty(op).context("Failed to serialize operation descriptor")
}

fn field_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::String => "string",
        FieldKind::Integer => "integer",
        FieldKind::Boolean => "boolean",
        FieldKind::Timestamp => "timestamp",
        FieldKind::List => "list",
        FieldKind::Map => "map",
        FieldKind::Structure => "structure",
    }
}
