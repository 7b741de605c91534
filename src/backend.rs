//! Juju hook-tool backend
//!
//! The charm talks to Juju exclusively through hook tools on PATH:
//! `config-get`, `is-leader`, `status-set`, `pod-spec-set`,
//! `relation-get`, and `juju-log`. The `HookTools` trait is the seam the
//! handlers are written against; tests substitute a recording double.

use std::collections::BTreeMap;
use std::io::Write;
use std::process::Command;

use tracing::debug;

use crate::config::CharmConfig;
use crate::error::{CharmError, Result};
use crate::podspec::PodSpec;
use crate::status::UnitStatus;

/// Longest single argument the kernel accepts (PAGE_SIZE * 32)
pub const MAX_ARG_STRLEN: usize = 131_072;

/// The Juju surface a handler needs
pub trait HookTools {
    /// Application name (unit name before the `/`)
    fn app_name(&self) -> &str;

    /// Operator configuration for this invocation
    fn config(&self) -> Result<CharmConfig>;

    /// Whether this unit is the application leader
    fn is_leader(&self) -> Result<bool>;

    /// Report unit status
    fn set_status(&self, status: &UnitStatus) -> Result<()>;

    /// Submit the pod spec, fire-and-forget
    fn set_pod_spec(&self, spec: &PodSpec) -> Result<()>;

    /// Remote unit's relation data for the running relation hook;
    /// empty when no relation context is available
    fn relation_snapshot(&self) -> Result<BTreeMap<String, String>>;
}

/// Hook-tool backend shelling out to the Juju agent
pub struct CliBackend {
    app_name: String,
}

impl CliBackend {
    pub fn from_env() -> Result<Self> {
        let unit = std::env::var("JUJU_UNIT_NAME")
            .map_err(|_| CharmError::MissingEnv("JUJU_UNIT_NAME"))?;

        Ok(Self {
            app_name: app_from_unit(&unit),
        })
    }

    fn run(tool: &str, args: &[&str]) -> Result<String> {
        debug!("running hook tool {} {:?}", tool, args);

        let output = Command::new(tool)
            .args(args)
            .output()
            .map_err(|e| CharmError::HookTool {
                tool: tool.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CharmError::HookTool {
                tool: tool.to_string(),
                message: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl HookTools for CliBackend {
    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn config(&self) -> Result<CharmConfig> {
        let raw = Self::run("config-get", &["--format=json"])?;
        CharmConfig::from_json(raw.trim())
    }

    fn is_leader(&self) -> Result<bool> {
        let raw = Self::run("is-leader", &["--format=json"])?;
        Ok(serde_json::from_str(raw.trim())?)
    }

    fn set_status(&self, status: &UnitStatus) -> Result<()> {
        debug!("status-set {}", status);
        match status.message() {
            "" => Self::run("status-set", &[status.name()])?,
            msg => Self::run("status-set", &[status.name(), msg])?,
        };
        Ok(())
    }

    fn set_pod_spec(&self, spec: &PodSpec) -> Result<()> {
        let yaml = spec.to_yaml()?;

        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(yaml.as_bytes())?;
        file.flush()?;

        let path = file.path().to_string_lossy().into_owned();
        Self::run("pod-spec-set", &["--file", &path])?;
        Ok(())
    }

    fn relation_snapshot(&self) -> Result<BTreeMap<String, String>> {
        let Ok(remote_unit) = std::env::var("JUJU_REMOTE_UNIT") else {
            return Ok(BTreeMap::new());
        };

        let raw = Self::run("relation-get", &["--format=json", "-", &remote_unit])?;
        let raw = raw.trim();
        if raw.is_empty() || raw == "null" {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(raw)?)
    }
}

/// Application name from a unit name like `mssql/0`
pub fn app_from_unit(unit: &str) -> String {
    unit.split('/').next().unwrap_or(unit).to_string()
}

/// Write a message to the Juju log, best-effort.
///
/// A missing or failing `juju-log` binary must never abort the calling
/// handler, so every error is swallowed.
pub fn juju_log(level: Option<&str>, message: &str) {
    let mut command = Command::new("juju-log");
    if let Some(level) = level {
        command.args(["-l", level]);
    }

    let truncated: String = message.chars().take(MAX_ARG_STRLEN).collect();
    if let Err(e) = command.arg(&truncated).output() {
        debug!("juju-log unavailable: {}", e);
    }
}
