//! Transport seam
//!
//! [`ServiceClient`](crate::ServiceClient) reaches the network only through
//! [`HttpClient::send`], so tests can replay canned exchanges.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("awsops/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A fully addressed request, ready to sign and send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            method: "POST",
            url: url.into(),
            headers,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Add `name` unless a header of that name is already present
    pub fn header_or(&mut self, name: &str, value: &str) {
        if self.header(name).is_none() {
            self.headers.push((name.to_string(), value.to_string()));
        }
    }
}

/// Status, headers and raw body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text; invalid UTF-8 is replaced
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send one request; only a transport failure is an `Err`, any HTTP
    /// status comes back as a response
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// reqwest over rustls
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    user_agent: String,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            user_agent: user_agent.unwrap_or(DEFAULT_USER_AGENT).to_string(),
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        request.header_or("User-Agent", &self.user_agent);

        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .with_context(|| format!("Unsupported HTTP method '{}'", request.method))?;
        let builder = request
            .headers
            .iter()
            .fold(self.client.request(method, &request.url), |builder, (name, value)| {
                builder.header(name, value)
            });

        let response = builder
            .body(request.body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", request.url))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response from {}", request.url))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
