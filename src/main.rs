//! Charm entrypoint
//!
//! Juju invokes this binary once per lifecycle hook. The hook name comes
//! from `JUJU_HOOK_NAME`, the first argument, or the executable name, in
//! that order. Hooks deferred by earlier invocations are replayed before
//! the current one.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mssql_charm::backend::{juju_log, CliBackend};
use mssql_charm::charm::Outcome;
use mssql_charm::hooks::{dispatch, HookKind};
use mssql_charm::state::StoredState;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(hook_name) = hook_name() else {
        warn!("could not determine hook name, exiting");
        return Ok(());
    };

    let Some(kind) = HookKind::from_name(&hook_name) else {
        info!("no handler for hook '{}', exiting", hook_name);
        return Ok(());
    };

    let tools = CliBackend::from_env()?;
    let state_path = StoredState::default_path();
    let mut state = StoredState::load(&state_path)?;

    // Replay hooks deferred by earlier invocations first.
    for name in state.take_deferred() {
        if let Some(deferred) = HookKind::from_name(&name) {
            run_hook(deferred, &tools, &mut state)?;
        }
    }

    run_hook(kind, &tools, &mut state)?;

    state.save(&state_path)?;
    Ok(())
}

fn run_hook(kind: HookKind, tools: &CliBackend, state: &mut StoredState) -> Result<()> {
    juju_log(None, &format!("Running {} hook", kind));

    match dispatch(kind, tools, state) {
        Ok(Outcome::Completed) => info!("{} hook complete", kind),
        Ok(Outcome::Deferred) => {
            info!("{} hook deferred", kind);
            state.defer(kind.as_str());
        }
        Err(e) => {
            juju_log(Some("ERROR"), &format!("{} hook failed: {}", kind, e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn hook_name() -> Option<String> {
    if let Ok(name) = std::env::var("JUJU_HOOK_NAME") {
        if !name.is_empty() {
            return Some(name);
        }
    }

    if let Some(arg) = std::env::args().nth(1) {
        return Some(arg);
    }

    std::env::current_exe()
        .ok()?
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}
