//! Remote API client
//!
//! [`ApiClient`] is the single seam the invoker depends on. [`ServiceClient`]
//! implements it over any [`HttpClient`], resolving the endpoint, encoding the
//! envelope for the service's protocol, and signing when a signer is present.

use crate::error::{is_name_resolution_failure, InvokeError};
use crate::http::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT};
use crate::protocol::{decode_body, decode_error, encode_request};
use crate::sign::SigV4Signer;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use awsops_core::{OperationDescriptor, RequestEnvelope, ResponseEnvelope, ServiceDescriptor};
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Perform one remote call
    async fn call(
        &self,
        op: &'static OperationDescriptor,
        request: &RequestEnvelope,
    ) -> std::result::Result<ResponseEnvelope, InvokeError>;
}

#[async_trait]
impl<T: ApiClient + ?Sized> ApiClient for std::sync::Arc<T> {
    async fn call(
        &self,
        op: &'static OperationDescriptor,
        request: &RequestEnvelope,
    ) -> std::result::Result<ResponseEnvelope, InvokeError> {
        (**self).call(op, request).await
    }
}

/// Settings for building a [`ServiceClient`] over reqwest
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub region: String,
    /// Overrides `https://<prefix>.<region>.amazonaws.com` for every service
    pub endpoint_url: Option<String>,
    pub sign_requests: bool,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl ClientOptions {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            sign_requests: true,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

pub struct ServiceClient<H: HttpClient = ReqwestHttpClient> {
    http: H,
    region: String,
    endpoint_override: Option<url::Url>,
    signer: Option<SigV4Signer>,
}

impl ServiceClient<ReqwestHttpClient> {
    /// Build a reqwest-backed client, loading credentials when signing is on
    pub async fn from_options(options: &ClientOptions) -> Result<Self> {
        let http = ReqwestHttpClient::new(options.timeout, options.user_agent.as_deref())?;
        let mut client = Self::new(http, &options.region, options.endpoint_url.as_deref())?;

        if options.sign_requests {
            let signer = SigV4Signer::from_env(&options.region)
                .await
                .context("Failed to load AWS credentials")?;
            client = client.with_signer(signer);
        } else {
            warn!("request signing disabled; requests are sent without credentials");
        }

        Ok(client)
    }
}

impl<H: HttpClient> ServiceClient<H> {
    pub fn new(http: H, region: &str, endpoint_url: Option<&str>) -> Result<Self> {
        let endpoint_override = endpoint_url
            .map(|raw| {
                raw.parse::<url::Url>()
                    .with_context(|| format!("Invalid endpoint URL '{}'", raw))
            })
            .transpose()?;

        if let Some(url) = &endpoint_override {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(anyhow!(
                    "Endpoint URL '{}' must use http or https",
                    url.as_str()
                ));
            }
        }

        Ok(Self {
            http,
            region: region.to_string(),
            endpoint_override,
            signer: None,
        })
    }

    pub fn with_signer(mut self, signer: SigV4Signer) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Base endpoint for a service, without a trailing slash
    pub fn endpoint(&self, service: &ServiceDescriptor) -> String {
        match &self.endpoint_override {
            Some(url) => url.as_str().trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.{}.amazonaws.com",
                service.endpoint_prefix, self.region
            ),
        }
    }

    fn transport_error(
        &self,
        op: &OperationDescriptor,
        endpoint: &str,
        source: anyhow::Error,
    ) -> InvokeError {
        let message = if is_name_resolution_failure(&source) {
            format!(
                "could not resolve host for {}; check that region '{}' is correct and offers the {} service, or set an explicit endpoint URL",
                endpoint, self.region, op.service.title
            )
        } else {
            format!("{:#}", source)
        };

        InvokeError::Transport {
            operation: op.qualified_name(),
            endpoint: endpoint.to_string(),
            message,
            source,
        }
    }
}

#[async_trait]
impl<H: HttpClient> ApiClient for ServiceClient<H> {
    #[instrument(
        name = "service_call",
        skip_all,
        fields(service = op.service.name, operation = op.name)
    )]
    async fn call(
        &self,
        op: &'static OperationDescriptor,
        request: &RequestEnvelope,
    ) -> std::result::Result<ResponseEnvelope, InvokeError> {
        let operation = op.qualified_name();
        let wire = encode_request(op, request).map_err(|e| InvokeError::Decode {
            operation: operation.clone(),
            message: format!("could not encode request: {}", e),
        })?;

        let endpoint = self.endpoint(op.service);
        let mut http_request = HttpRequest {
            method: wire.method,
            url: format!("{}{}", endpoint, wire.path),
            headers: wire.headers,
            body: wire.body,
        };

        if let Some(signer) = &self.signer {
            signer
                .sign(op.service.signing_name, &mut http_request)
                .await
                .map_err(|e| InvokeError::Signing {
                    operation: operation.clone(),
                    message: format!("{:#}", e),
                })?;
        }

        debug!(url = %http_request.url, bytes = http_request.body.len(), "sending request");

        let response = self
            .http
            .send(http_request)
            .await
            .map_err(|e| self.transport_error(op, &endpoint, e))?;

        let request_id = response.header("x-amzn-RequestId").map(str::to_string);

        if !response.is_success() {
            let fault = decode_error(&response);
            debug!(
                status = response.status,
                code = %fault.code,
                request_id = ?fault.request_id,
                "service returned error"
            );
            return Err(InvokeError::Service {
                operation,
                status: response.status,
                code: fault.code,
                message: fault.message,
                request_id: fault.request_id,
            });
        }

        let body = decode_body(&response).map_err(|e| InvokeError::Decode {
            operation,
            message: e.to_string(),
        })?;

        debug!(status = response.status, request_id = ?request_id, "received response");

        Ok(ResponseEnvelope::new(body).with_request_id(request_id))
    }
}
