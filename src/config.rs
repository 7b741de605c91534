//! Operator-supplied charm configuration
//!
//! A flat key/value mapping fetched through `config-get` at the start of
//! every hook. It is immutable within a single invocation and replaced
//! wholesale by the next one; nothing here is interpreted beyond strings.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw charm configuration as declared in `config.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharmConfig {
    /// Container image reference for the workload
    pub image: String,

    /// YAML list literal of container ports
    pub ports: String,

    /// YAML mapping literal of extra environment configuration, or empty
    pub container_config: String,

    /// YAML mapping literal of sensitive environment configuration, or
    /// empty; merged over `container_config`
    pub container_secrets: String,

    /// SA account password, validated before use
    pub sa_password: String,
}

impl CharmConfig {
    /// Parse the JSON object `config-get --format=json` prints
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
