//! Wire protocol encoding
//!
//! Both supported protocols carry the request envelope as a JSON body and
//! differ only in how the operation is addressed.

use crate::http::HttpResponse;
use awsops_core::{OperationDescriptor, Protocol, RequestEnvelope};
use serde_json::Value;

const AWS_JSON_1_0: &str = "application/x-amz-json-1.0";
const REST_JSON: &str = "application/json";

/// Request as it goes on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub method: &'static str,
    /// Path relative to the endpoint, always starting with `/`
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

pub fn encode_request(
    op: &OperationDescriptor,
    envelope: &RequestEnvelope,
) -> serde_json::Result<WireRequest> {
    let body = envelope.to_vec()?;

    let request = match op.service.protocol {
        Protocol::AwsJson1_0 { target_prefix } => WireRequest {
            method: "POST",
            path: "/".to_string(),
            headers: vec![
                ("Content-Type".to_string(), AWS_JSON_1_0.to_string()),
                (
                    "X-Amz-Target".to_string(),
                    format!("{}.{}", target_prefix, op.name),
                ),
            ],
            body,
        },
        Protocol::RestJson1 => WireRequest {
            method: "POST",
            path: format!("/{}", op.name),
            headers: vec![("Content-Type".to_string(), REST_JSON.to_string())],
            body,
        },
    };

    Ok(request)
}

/// Parse a successful response body; an empty body is an empty object
pub fn decode_body(response: &HttpResponse) -> serde_json::Result<Value> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(&response.body)
}

/// Error details extracted from a non-2xx response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFault {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

pub fn decode_error(response: &HttpResponse) -> ServiceFault {
    let body: Option<Value> = serde_json::from_slice(&response.body).ok();
    let member = |name: &str| {
        body.as_ref()
            .and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let code = response
        .header("x-amzn-ErrorType")
        .map(str::to_string)
        .or_else(|| member("__type"))
        .or_else(|| member("code"))
        .map(|raw| sanitize_error_code(&raw))
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| format!("Http{}", response.status));

    let message = member("message")
        .or_else(|| member("Message"))
        .unwrap_or_else(|| {
            let text = response.body_string();
            if text.trim().is_empty() {
                format!("HTTP {} with empty body", response.status)
            } else {
                text
            }
        });

    ServiceFault {
        code,
        message,
        request_id: response.header("x-amzn-RequestId").map(str::to_string),
    }
}

/// `aws.keyspaces#ValidationException:http://...` becomes `ValidationException`
fn sanitize_error_code(raw: &str) -> String {
    let without_suffix = raw.split(':').next().unwrap_or(raw);
    let without_namespace = without_suffix
        .rsplit('#')
        .next()
        .unwrap_or(without_suffix);
    without_namespace.trim().to_string()
}
