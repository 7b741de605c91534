//! Lifecycle handlers
//!
//! Each handler is a function from (configuration, prior state) to
//! (new status, optional spec submission). Handlers never mutate anything
//! outside the passed-in stored state and the Juju surface behind
//! `HookTools`.

use std::collections::BTreeMap;

use serde_yaml::Value;
use tracing::info;

use crate::backend::{juju_log, HookTools};
use crate::config::CharmConfig;
use crate::error::{CharmError, Result};
use crate::podspec;
use crate::state::StoredState;
use crate::status::UnitStatus;
use crate::validation;

/// What a handler did with its event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The unit was not ready for the event; replay it next invocation
    Deferred,
}

pub fn on_install(tools: &dyn HookTools, state: &mut StoredState) -> Result<Outcome> {
    set_pod_spec(tools, state)
}

pub fn on_config_changed(tools: &dyn HookTools, state: &mut StoredState) -> Result<Outcome> {
    juju_log(None, "Ran on_config_changed hook");
    set_pod_spec(tools, state)
}

pub fn on_stop(_tools: &dyn HookTools, _state: &mut StoredState) -> Result<Outcome> {
    juju_log(None, "Ran on_stop");
    Ok(Outcome::Completed)
}

pub fn on_db_relation_joined(tools: &dyn HookTools, state: &mut StoredState) -> Result<Outcome> {
    let snapshot = tools.relation_snapshot()?;
    info!("db relation joined with {} settings", snapshot.len());
    state.db_relation = Some(snapshot);
    Ok(Outcome::Completed)
}

pub fn on_db_relation_changed(_tools: &dyn HookTools, state: &mut StoredState) -> Result<Outcome> {
    if !state.ready {
        return Ok(Outcome::Deferred);
    }
    Ok(Outcome::Completed)
}

pub fn on_mssql_ready(_tools: &dyn HookTools, _state: &mut StoredState) -> Result<Outcome> {
    Ok(Outcome::Completed)
}

/// Validate operator configuration and submit the pod spec.
///
/// Non-leaders report Active and skip submission. Validation failures end
/// in a Blocked status naming the reason; they are not hook errors.
pub fn set_pod_spec(tools: &dyn HookTools, state: &mut StoredState) -> Result<Outcome> {
    if !tools.is_leader()? {
        info!("not the leader, skipping pod spec submission");
        tools.set_status(&UnitStatus::Active)?;
        return Ok(Outcome::Completed);
    }

    tools.set_status(&UnitStatus::Maintenance("Setting pod spec".to_string()))?;

    let config = tools.config()?;
    let (ports, env_config) = match validate(&config) {
        Ok(parts) => parts,
        Err(CharmError::Validation(reason)) => {
            juju_log(Some("WARNING"), &reason);
            tools.set_status(&UnitStatus::Blocked(reason))?;
            return Ok(Outcome::Completed);
        }
        Err(e) => return Err(e),
    };

    let spec = podspec::build(
        tools.app_name(),
        &config.image,
        ports,
        env_config,
        &config.sa_password,
    );
    tools.set_pod_spec(&spec)?;
    tools.set_status(&UnitStatus::Active)?;
    state.ready = true;

    info!("pod spec submitted for {}", tools.app_name());
    Ok(Outcome::Completed)
}

/// Checks in order: ports is a YAML list, the SA password meets the
/// policy, container_config and container_secrets are YAML mappings.
fn validate(config: &CharmConfig) -> Result<(Vec<Value>, BTreeMap<String, Value>)> {
    let ports = validation::parse_ports(&config.ports)?;
    validation::validate_sa_password(&config.sa_password)?;
    let env_config = validation::full_container_config(config)?;
    Ok((ports, env_config))
}
