//! Unit-local stored state
//!
//! A small JSON-persisted container owned exclusively by the charm
//! process. It carries the readiness flag, the last db-relation snapshot,
//! and the hooks deferred by earlier invocations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const STATE_FILE_NAME: &str = ".unit-state.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredState {
    /// Whether a pod spec has been submitted successfully
    pub ready: bool,

    /// Last relation-data snapshot from `db-relation-joined`
    pub db_relation: Option<BTreeMap<String, String>>,

    /// Hook names deferred by a previous invocation, replayed next time
    pub deferred: Vec<String>,
}

impl StoredState {
    /// Load stored state; a missing or empty file is the default state
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// State file location: `CHARM_STATE_PATH` if set, else the charm
    /// directory Juju exports, else the working directory
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("CHARM_STATE_PATH") {
            return PathBuf::from(path);
        }

        match std::env::var("JUJU_CHARM_DIR") {
            Ok(dir) => PathBuf::from(dir).join(STATE_FILE_NAME),
            Err(_) => PathBuf::from(STATE_FILE_NAME),
        }
    }

    /// Record a deferred hook, at most once per hook name
    pub fn defer(&mut self, hook: &str) {
        if !self.deferred.iter().any(|h| h == hook) {
            self.deferred.push(hook.to_string());
        }
    }

    /// Drain the deferred hooks for replay
    pub fn take_deferred(&mut self) -> Vec<String> {
        std::mem::take(&mut self.deferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = StoredState::load(&dir.path().join("absent.json")).unwrap();
        assert!(!state.ready);
        assert!(state.db_relation.is_none());
        assert!(state.deferred.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE_NAME);

        let mut state = StoredState::default();
        state.ready = true;
        state.defer("db-relation-changed");
        state.save(&path).unwrap();

        let loaded = StoredState::load(&path).unwrap();
        assert!(loaded.ready);
        assert_eq!(loaded.deferred, vec!["db-relation-changed"]);
    }

    #[test]
    fn test_defer_is_idempotent() {
        let mut state = StoredState::default();
        state.defer("db-relation-changed");
        state.defer("db-relation-changed");
        assert_eq!(state.deferred.len(), 1);

        assert_eq!(state.take_deferred(), vec!["db-relation-changed"]);
        assert!(state.deferred.is_empty());
    }
}
