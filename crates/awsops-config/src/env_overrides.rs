use crate::{LogFormat, RuntimeConfig};
use anyhow::{anyhow, Result};

pub const ENV_PREFIX: &str = "AWSOPS_";

/// Abstraction over environment-variable lookups so tests can inject values
pub trait EnvSource {
    /// Get a variable by its name without the `AWSOPS_` prefix
    fn get(&self, key: &str) -> Option<String>;

    /// Get a variable by its full name (`AWS_REGION`, ...)
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Apply `AWSOPS_*` overrides, then fill gaps from the standard AWS variables
pub fn apply_env_overrides<E: EnvSource>(config: &mut RuntimeConfig, env: &E) -> Result<()> {
    // AWS target
    if let Some(region) = get_env_string(env, "REGION") {
        config.aws.region = Some(region);
    }
    if let Some(endpoint) = get_env_string(env, "ENDPOINT_URL") {
        config.aws.endpoint_url = Some(endpoint);
    }
    if let Some(sign) = get_env_bool(env, "SIGN_REQUESTS")? {
        config.aws.sign_requests = sign;
    }

    // HTTP
    if let Some(timeout) = get_env_u64(env, "TIMEOUT_SECS")? {
        config.http.timeout_secs = timeout;
    }
    if let Some(agent) = get_env_string(env, "USER_AGENT") {
        config.http.user_agent = Some(agent);
    }

    // Logging
    if let Some(level) = get_env_string(env, "LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = get_env_string(env, "LOG_FORMAT") {
        config.log.format = format
            .parse::<LogFormat>()
            .map_err(|e| anyhow!("Invalid {}LOG_FORMAT value: {}", ENV_PREFIX, e))?;
    }

    // Invocation
    if let Some(auto) = get_env_bool(env, "AUTO_ITERATE")? {
        config.invoke.auto_iterate = auto;
    }

    // Standard AWS variables fill what is still unset
    if config.aws.region.is_none() {
        config.aws.region =
            get_raw_env_string(env, "AWS_REGION").or_else(|| get_raw_env_string(env, "AWS_DEFAULT_REGION"));
    }
    if config.aws.endpoint_url.is_none() {
        config.aws.endpoint_url = get_raw_env_string(env, "AWS_ENDPOINT_URL");
    }

    Ok(())
}

/// Empty values count as unset
fn get_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|v| !v.trim().is_empty())
}

fn get_raw_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get_raw(key).filter(|v| !v.trim().is_empty())
}

fn get_env_u64<E: EnvSource>(env: &E, key: &str) -> Result<Option<u64>> {
    match get_env_string(env, key) {
        Some(val) => {
            let parsed = val
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow!("Failed to parse {}{}: {}", ENV_PREFIX, key, e))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

fn get_env_bool<E: EnvSource>(env: &E, key: &str) -> Result<Option<bool>> {
    match get_env_string(env, key) {
        Some(val) => {
            let parsed = match val.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(anyhow!(
                        "Failed to parse {}{} (expected bool): {}",
                        ENV_PREFIX,
                        key,
                        val
                    ))
                }
            };
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}
