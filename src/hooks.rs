//! Hook kinds and dispatch
//!
//! Juju invokes the charm with a hook name; each recognized name maps to
//! exactly one handler. Unrecognized hooks are the caller's problem: the
//! entrypoint logs them and exits cleanly.

use crate::backend::HookTools;
use crate::charm::{self, Outcome};
use crate::error::Result;
use crate::state::StoredState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Install,
    ConfigChanged,
    Stop,
    DbRelationJoined,
    DbRelationChanged,
    MssqlReady,
}

impl HookKind {
    pub const ALL: [HookKind; 6] = [
        HookKind::Install,
        HookKind::ConfigChanged,
        HookKind::Stop,
        HookKind::DbRelationJoined,
        HookKind::DbRelationChanged,
        HookKind::MssqlReady,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::ConfigChanged => "config-changed",
            Self::Stop => "stop",
            Self::DbRelationJoined => "db-relation-joined",
            Self::DbRelationChanged => "db-relation-changed",
            Self::MssqlReady => "mssql-ready",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route a hook to its handler
pub fn dispatch(
    kind: HookKind,
    tools: &dyn HookTools,
    state: &mut StoredState,
) -> Result<Outcome> {
    match kind {
        HookKind::Install => charm::on_install(tools, state),
        HookKind::ConfigChanged => charm::on_config_changed(tools, state),
        HookKind::Stop => charm::on_stop(tools, state),
        HookKind::DbRelationJoined => charm::on_db_relation_joined(tools, state),
        HookKind::DbRelationChanged => charm::on_db_relation_changed(tools, state),
        HookKind::MssqlReady => charm::on_mssql_ready(tools, state),
    }
}
