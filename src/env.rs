//! Container environment merging: docker mounts, `TF_CONFIG` and user
//! overrides, in that order.

use crate::error::{Result, TransformError};
use crate::mounts::DOCKER_MOUNTS_ENV;
use crate::topology::TF_CONFIG;

use serde_json::{Map, Value};
use tracing::debug;

/// One `key=value` override from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    pub key: String,
    pub value: String,
}

impl EnvOverride {
    /// Split on the first `=`; the value may itself contain `=`. The key is
    /// taken verbatim.
    pub fn parse(entry: &str) -> Result<Self> {
        match entry.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Self {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(TransformError::MalformedEnvEntry {
                entry: entry.to_string(),
            }),
        }
    }
}

/// Parse a comma-separated override list. Empty segments are skipped.
pub fn parse_env_overrides(raw: &str) -> Result<Vec<EnvOverride>> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(EnvOverride::parse)
        .collect()
}

/// Merge computed values and user overrides into `env`.
///
/// 1) append `docker_mounts` to the runtime mount list, after any value the
///    spec already carried
/// 2) store the topology descriptor under `TF_CONFIG`, if given
/// 3) apply overrides last so they win over everything computed
pub fn merge_env(
    env: &mut Map<String, Value>,
    overrides: &[EnvOverride],
    docker_mounts: &[String],
    topology: Option<&str>,
) {
    let mut mounts: Vec<String> = Vec::with_capacity(docker_mounts.len() + 1);
    match env.get(DOCKER_MOUNTS_ENV) {
        Some(Value::String(s)) if !s.is_empty() => mounts.push(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => {}
        Some(other) => mounts.push(other.to_string()),
    }
    mounts.extend(docker_mounts.iter().cloned());
    env.insert(DOCKER_MOUNTS_ENV.to_string(), Value::String(mounts.join(",")));

    if let Some(tf_config) = topology {
        env.insert(TF_CONFIG.to_string(), Value::String(tf_config.to_string()));
    }

    for o in overrides {
        debug!(key = %o.key, value = %o.value, "setting env");
        env.insert(o.key.clone(), Value::String(o.value.clone()));
    }
}
