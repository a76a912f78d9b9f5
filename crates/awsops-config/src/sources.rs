// Configuration source loading.
//
// File lookup order (first hit wins):
// 1. Path from AWSOPS_CONFIG
// 2. Inline TOML from AWSOPS_CONFIG_CONTENT
// 3. ./awsops.toml, then ./.awsops.toml
//
// Environment overrides are applied on top of whichever file was found.

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::RuntimeConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_FILES: &[&str] = &["./awsops.toml", "./.awsops.toml"];

/// Defaults, then the first config file found, then environment overrides
pub fn load_with_env<E: EnvSource>(env: &E) -> Result<RuntimeConfig> {
    let mut config = load_from_file(env)?.unwrap_or_default();
    env_overrides::apply_env_overrides(&mut config, env)?;
    Ok(config)
}

/// Explicit file (the `--config` flag); a missing file is an error
pub fn load_from_file_path<E: EnvSource>(path: impl AsRef<Path>, env: &E) -> Result<RuntimeConfig> {
    let mut config = read_file(path.as_ref())?;
    env_overrides::apply_env_overrides(&mut config, env)?;
    Ok(config)
}

pub(crate) fn parse(content: &str, origin: &str) -> Result<RuntimeConfig> {
    toml::from_str(content).with_context(|| format!("Failed to parse {}", origin))
}

fn read_file(path: &Path) -> Result<RuntimeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse(&content, &format!("config file: {}", path.display()))?;
    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

fn load_from_file<E: EnvSource>(env: &E) -> Result<Option<RuntimeConfig>> {
    if let Some(path) = env.get("CONFIG") {
        return read_file(Path::new(&path)).map(Some);
    }

    if let Some(content) = env.get("CONFIG_CONTENT") {
        let origin = format!("inline config from {}CONFIG_CONTENT", ENV_PREFIX);
        return parse(&content, &origin).map(Some);
    }

    for path in DEFAULT_FILES {
        let path = Path::new(path);
        if path.exists() {
            return read_file(path).map(Some);
        }
    }

    Ok(None)
}

/// Process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}
