// Configuration validation
//
// Checks what a remote call needs: a region, a usable endpoint and a sane
// timeout. Listing or describing operations needs none of this.

use crate::*;
use anyhow::{bail, Result};
use tracing::warn;

pub fn validate_config(config: &RuntimeConfig) -> Result<()> {
    validate_aws_config(&config.aws)?;
    validate_http_config(&config.http)?;
    validate_log_config(&config.log)?;
    Ok(())
}

fn validate_aws_config(config: &AwsConfig) -> Result<()> {
    match config.region.as_deref().map(str::trim) {
        None | Some("") => bail!(
            "aws.region is required; set it in the config file, AWSOPS_REGION, AWS_REGION, or --region"
        ),
        Some(region) if region.contains(|c: char| c.is_whitespace() || c == '/') => {
            bail!("aws.region '{}' is not a valid region name", region)
        }
        Some(_) => {}
    }

    if let Some(endpoint) = &config.endpoint_url {
        let url = url::Url::parse(endpoint)
            .map_err(|e| anyhow::anyhow!("aws.endpoint_url '{}' is not a valid URL: {}", endpoint, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "aws.endpoint_url must use http or https, got '{}'",
                url.scheme()
            );
        }
        if url.scheme() == "http" && config.sign_requests {
            warn!(endpoint = %endpoint, "signed requests will be sent over plain http");
        }
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<()> {
    if config.timeout_secs == 0 {
        bail!("http.timeout_secs must be greater than 0");
    }

    if config.timeout_secs > 3600 {
        warn!(
            timeout_secs = config.timeout_secs,
            "http.timeout_secs is very large; a stuck call will hang for a long time"
        );
    }

    if let Some(agent) = &config.user_agent {
        if agent.trim().is_empty() {
            bail!("http.user_agent must not be empty when set");
        }
    }

    Ok(())
}

fn validate_log_config(config: &LogConfig) -> Result<()> {
    if config.level.trim().is_empty() {
        bail!("log.level must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.aws.region = Some("us-east-1".to_string());
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_region_required() {
        let mut config = valid();
        config.aws.region = None;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("aws.region is required"));

        config.aws.region = Some("  ".to_string());
        assert!(validate_config(&config).is_err());

        config.aws.region = Some("us east".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_endpoint_url_checked() {
        let mut config = valid();
        config.aws.endpoint_url = Some("http://localhost:4566".to_string());
        assert!(validate_config(&config).is_ok());

        config.aws.endpoint_url = Some("localhost:4566/path".to_string());
        assert!(validate_config(&config).is_err());

        config.aws.endpoint_url = Some("ftp://example.com".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_timeout_must_be_positive() {
        let mut config = valid();
        config.http.timeout_secs = 0;
        assert!(validate_config(&config).is_err());

        config.http.timeout_secs = 7200;
        assert!(validate_config(&config).is_ok());
    }
}
