//! Batch planning and execution.
//!
//! Converts a validated [`PackageRequest`] plus an action into the
//! smallest sequence of choco invocations that achieves the action, then
//! runs them in order. Pinned packages cannot share an invocation (choco
//! applies `-version` to every name given), so each pinned pair runs
//! alone and all unpinned names are joined into one call.

use std::collections::HashSet;
use std::path::Path;

use colored::Colorize;

use super::error::ChocoError;
use super::request::PackageRequest;
use super::runner::{render_command, CommandRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Upgrade,
    Remove,
    /// Legacy alias of [`Action::Remove`], kept for older callers only.
    Uninstall,
    /// Chocolatey makes no purge/remove distinction.
    Purge,
}

impl Action {
    /// The action whose planning rules actually apply.
    pub fn canonical(self) -> Action {
        match self {
            Action::Uninstall | Action::Purge => Action::Remove,
            other => other,
        }
    }

    pub fn is_legacy_alias(self) -> bool {
        matches!(self, Action::Uninstall)
    }
}

/// One planned external invocation: the arguments after the tool path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
}

/// Partition the request into the minimal invocation sequence for the
/// action. No command is issued here; constraint violations surface
/// before anything runs.
pub fn plan(action: Action, request: &PackageRequest) -> Result<Vec<Invocation>, ChocoError> {
    match action.canonical() {
        Action::Install => Ok(plan_install(request)),
        Action::Upgrade => plan_upgrade(request),
        _ => Ok(plan_remove(request)),
    }
}

/// (name, pin) pairs with duplicate names (case-insensitive) collapsed to
/// their first occurrence, so every name lands in exactly one partition.
fn dedup_entries(request: &PackageRequest) -> Vec<(&String, &Option<String>)> {
    let mut seen = HashSet::new();
    request
        .entries()
        .filter(|(name, _)| seen.insert(name.to_lowercase()))
        .collect()
}

fn plan_install(request: &PackageRequest) -> Vec<Invocation> {
    let mut invocations = Vec::new();
    let mut unpinned: Vec<&String> = Vec::new();

    for (name, pin) in dedup_entries(request) {
        match pin {
            Some(version) => {
                let mut args = vec![
                    "install".to_string(),
                    "-y".to_string(),
                    "-version".to_string(),
                    version.clone(),
                ];
                args.extend(request.options().iter().cloned());
                args.push(name.clone());
                invocations.push(Invocation { args });
            }
            None => unpinned.push(name),
        }
    }

    // Skipped entirely when every package carried a pin.
    if !unpinned.is_empty() {
        let mut args = vec!["install".to_string(), "-y".to_string()];
        args.extend(request.options().iter().cloned());
        args.extend(unpinned.into_iter().cloned());
        invocations.push(Invocation { args });
    }

    invocations
}

fn plan_upgrade(request: &PackageRequest) -> Result<Vec<Invocation>, ChocoError> {
    for (name, pin) in request.entries() {
        if let Some(version) = pin {
            return Err(ChocoError::PinnedUpgrade {
                name: name.clone(),
                version: version.clone(),
            });
        }
    }

    let mut args = vec!["upgrade".to_string(), "-y".to_string()];
    args.extend(request.options().iter().cloned());
    args.extend(dedup_entries(request).into_iter().map(|(name, _)| name.clone()));
    Ok(vec![Invocation { args }])
}

fn plan_remove(request: &PackageRequest) -> Vec<Invocation> {
    // Removal is not versioned; pins are ignored outright.
    let mut args = vec!["uninstall".to_string(), "-y".to_string()];
    args.extend(request.options().iter().cloned());
    args.extend(dedup_entries(request).into_iter().map(|(name, _)| name.clone()));
    vec![Invocation { args }]
}

/// Run the planned invocations in order. The first failure aborts the
/// remainder; already-applied invocations are not rolled back.
pub fn execute(
    runner: &dyn CommandRunner,
    tool: &Path,
    invocations: &[Invocation],
) -> Result<(), ChocoError> {
    for invocation in invocations {
        let output = runner.run(tool, &invocation.args)?;
        if !output.success {
            return Err(ChocoError::CommandFailed {
                command: render_command(tool, &invocation.args),
                status: output.status_label(),
            });
        }
    }
    Ok(())
}

/// Plan and execute one action, emitting the deprecation notice for the
/// legacy `uninstall` alias first.
pub fn converge(
    action: Action,
    request: &PackageRequest,
    tool: &Path,
    runner: &dyn CommandRunner,
) -> Result<(), ChocoError> {
    if action.is_legacy_alias() {
        eprintln!(
            "{} the `uninstall` action is deprecated; use `remove` instead",
            "warning:".bold().yellow()
        );
    }

    let invocations = plan(action, request)?;
    execute(runner, tool, &invocations)
}
