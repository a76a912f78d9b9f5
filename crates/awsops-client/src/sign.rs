//! AWS SigV4 request signing

use anyhow::{anyhow, Context, Result};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use std::time::SystemTime;

use crate::http::HttpRequest;

/// Signs requests with credentials from the standard AWS provider chain
#[derive(Debug, Clone)]
pub struct SigV4Signer {
    credentials_provider: SharedCredentialsProvider,
    region: String,
}

impl SigV4Signer {
    pub fn new(credentials_provider: SharedCredentialsProvider, region: impl Into<String>) -> Self {
        Self {
            credentials_provider,
            region: region.into(),
        }
    }

    /// Load credentials from the environment (profile, SSO, instance role, ...)
    pub async fn from_env(region: &str) -> Result<Self> {
        let config = aws_config::from_env()
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        let credentials_provider = config
            .credentials_provider()
            .ok_or_else(|| anyhow!("No AWS credentials provider available"))?;

        Ok(Self::new(credentials_provider, region))
    }

    /// Add SigV4 headers to `request` for the service `signing_name`
    pub async fn sign(&self, signing_name: &str, request: &mut HttpRequest) -> Result<()> {
        let url = request
            .url
            .parse::<url::Url>()
            .with_context(|| format!("Cannot sign request to '{}'", request.url))?;

        let credentials = self
            .credentials_provider
            .provide_credentials()
            .await
            .map_err(|e| anyhow!("Failed to resolve AWS credentials: {}", e))?;
        let identity = credentials.into();

        let params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(signing_name)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| anyhow!("Invalid signing parameters: {}", e))?
            .into();

        let signable = SignableRequest::new(
            request.method,
            url.as_str(),
            request
                .headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
            SignableBody::Bytes(&request.body),
        )
        .map_err(|e| anyhow!("Request cannot be signed: {}", e))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| anyhow!("Signing failed: {}", e))?
            .into_parts();

        let added: Vec<(String, String)> = instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        request.headers.extend(added);

        Ok(())
    }
}
