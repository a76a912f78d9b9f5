// `awsops call`: bind, resolve the selector, invoke, emit
//
// Everything that can be checked locally is checked before the client is
// built, so a bad parameter never costs a credential lookup or a request.

use crate::output::Emitter;
use anyhow::{anyhow, bail, Context, Result};
use awsops_client::{CancelSignal, ClientOptions, InvokeOptions, InvokeSummary, Invoker, ServiceClient};
use awsops_config::RuntimeConfig;
use awsops_core::{bind, Selector};
use serde_json::Value;
use std::io::Write;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct CallRequest {
    /// `service:Operation` or a bare operation name
    pub operation: String,
    pub params: Vec<(String, Value)>,
    pub select: Option<String>,
    /// Overrides `invoke.auto_iterate` when set
    pub auto_iterate: Option<bool>,
    pub pretty: bool,
}

/// Parse `Name=Value`
///
/// A value starting with `[` or `{` is read as JSON. Anything else stays the
/// literal text and is converted by the parameter's declared kind at bind
/// time, so `-p RuleNamePrefix=007` keeps its leading zeros.
pub fn parse_param(raw: &str) -> Result<(String, Value)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("parameter '{}' must have the form Name=Value", raw))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("parameter '{}' has an empty name", raw);
    }
    let value = if value.trim_start().starts_with(['[', '{']) {
        serde_json::from_str(value)
            .with_context(|| format!("parameter '{}' is not valid JSON", name))?
    } else {
        Value::String(value.to_string())
    };
    Ok((name.to_string(), value))
}

/// Run one operation and write its projected output to `out`
///
/// Pages already written stay written when a later page fails or the call
/// is cancelled.
pub async fn run_call<W: Write + Send>(
    config: &RuntimeConfig,
    request: &CallRequest,
    cancel: CancelSignal,
    out: W,
) -> Result<InvokeSummary> {
    let registry = awsops_services::registry()?;
    let op = registry.lookup(&request.operation)?;
    let bound = bind(
        op,
        request
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), value.clone())),
    )?;
    let selector = Selector::resolve(op, request.select.as_deref())?;
    debug!(operation = %op.qualified_name(), selector = %selector, "request bound");

    config.validate().context("Invalid configuration")?;
    let region = config
        .region()
        .ok_or_else(|| anyhow!("aws.region is required"))?;

    let options = ClientOptions {
        region: region.to_string(),
        endpoint_url: config.aws.endpoint_url.clone(),
        sign_requests: config.aws.sign_requests,
        timeout: config.http.timeout(),
        user_agent: config.http.user_agent.clone(),
    };
    let client = ServiceClient::from_options(&options)
        .await
        .context("Failed to create service client")?;
    let invoker = Invoker::new(client);

    let invoke_options = InvokeOptions {
        auto_iterate: request.auto_iterate.unwrap_or(config.invoke.auto_iterate),
        cancel,
    };

    let mut emitter = Emitter::new(out, selector.yields_list(), request.pretty);
    let result = invoker
        .run(op, &bound, invoke_options, |page| {
            emitter.emit(&selector.project(&page, &bound))
        })
        .await;

    let written = emitter.finish();
    let summary = result?;
    let documents = written.context("Failed to write output")?;
    info!(pages = summary.pages, documents, "call finished");

    if let Some(token) = &summary.next_token {
        info!(next_token = %token, "more results available; pass it back as NextToken");
    }
    Ok(summary)
}
