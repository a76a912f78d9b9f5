// awsops-config - Runtime configuration for the awsops CLI
//
// Sources, lowest priority first:
// 1. Built-in defaults
// 2. Config file: AWSOPS_CONFIG path, AWSOPS_CONFIG_CONTENT inline TOML,
//    or ./awsops.toml / ./.awsops.toml
// 3. Environment variables (AWSOPS_* prefix)
// 4. Command-line flags (applied by the binary)
//
// AWS_REGION, AWS_DEFAULT_REGION and AWS_ENDPOINT_URL fill region and
// endpoint only when nothing above set them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{EnvSource, ENV_PREFIX};
pub use sources::StdEnvSource;

/// Main runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub invoke: InvokeConfig,
}

/// Target region and endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AwsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Replaces `https://<service>.<region>.amazonaws.com` for every service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    pub sign_requests: bool,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            sign_requests: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub timeout_secs: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive (`warn`, `awsops_client=debug`, ...)
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Unsupported log format: {}. Supported: text, json", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvokeConfig {
    /// Follow continuation tokens on list operations
    pub auto_iterate: bool,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self { auto_iterate: true }
    }
}

impl RuntimeConfig {
    /// Load from the default file locations and the process environment
    pub fn load() -> Result<Self> {
        sources::load_with_env(&StdEnvSource)
    }

    /// Load from an explicit file (the `--config` flag), then the environment
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        sources::load_from_file_path(path, &StdEnvSource)
    }

    /// Load using a custom environment source
    pub fn load_with_env<E: EnvSource>(env: &E) -> Result<Self> {
        sources::load_with_env(env)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        sources::parse(content, "inline config")
    }

    /// Apply environment overrides from a custom source
    pub fn apply_env_overrides_from<E: EnvSource>(&mut self, env: &E) -> Result<()> {
        env_overrides::apply_env_overrides(self, env)
    }

    /// Validate everything needed to make a remote call
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Region, once validated
    pub fn region(&self) -> Option<&str> {
        self.aws.region.as_deref().filter(|r| !r.trim().is_empty())
    }
}
