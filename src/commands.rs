//! CLI command handlers.

use anyhow::Result;
use colored::Colorize;

use crate::choco::{
    converge, locate_choco, Action, ChocoError, ChocoRunner, PackageRequest, StateQuery,
};
use crate::manifest::Manifest;

/// Show installed and candidate versions, either for the names given or
/// for everything the manifest declares.
pub fn status(names: &[String], manifest_path: Option<&str>, runner: &ChocoRunner) -> Result<()> {
    let request = if names.is_empty() {
        let path = Manifest::resolve_path(manifest_path)?;
        let manifest = Manifest::load(&path)?;
        if manifest.packages.is_empty() {
            println!("No packages declared in {}", path.display());
            return Ok(());
        }
        manifest.to_request()?
    } else {
        PackageRequest::from_specs(names)?
    };

    let tool = locate_choco()?;
    let mut query = StateQuery::new(tool, runner);
    let current = query.resolve_current(request.names())?;
    let candidate = query.resolve_candidate(request.names())?;

    println!(
        "{}",
        format!("{:<30} {:<18} {}", "PACKAGE", "INSTALLED", "CANDIDATE").bold()
    );
    for (index, name) in request.names().iter().enumerate() {
        let installed = current[index]
            .clone()
            .unwrap_or_else(|| "absent".to_string());
        let available = candidate[index].clone().unwrap_or_else(|| "-".to_string());
        println!("{:<30} {:<18} {}", name, installed, available);
    }

    Ok(())
}

/// Run one action against the packages named on the command line.
pub fn run_action(
    action: Action,
    specs: &[String],
    options: Option<&str>,
    source: Option<String>,
    runner: &ChocoRunner,
) -> Result<()> {
    if let Some(value) = source {
        return Err(ChocoError::UnsupportedParameter {
            parameter: "source",
            value,
        }
        .into());
    }

    let mut request = PackageRequest::from_specs(specs)?;
    if let Some(options) = options {
        request = request.with_options(options)?;
    }

    let tool = locate_choco()?;
    converge(action, &request, &tool, runner)?;
    Ok(())
}

/// What one reconciliation cycle decided to do, before anything runs.
#[derive(Debug, Default, PartialEq, Eq)]
struct ApplyPlan {
    install_names: Vec<String>,
    install_pins: Vec<Option<String>>,
    upgrade_names: Vec<String>,
    /// (name, pinned, installed) for pins that drifted from the installed
    /// version. Reported, not converged.
    pin_drift: Vec<(String, String, String)>,
}

fn plan_apply(
    request: &PackageRequest,
    current: &[Option<String>],
    candidate: &[Option<String>],
) -> ApplyPlan {
    let mut plan = ApplyPlan::default();

    for (index, name) in request.names().iter().enumerate() {
        let pin = &request.pins()[index];
        match (&current[index], pin) {
            (None, _) => {
                plan.install_names.push(name.clone());
                plan.install_pins.push(pin.clone());
            }
            (Some(installed), Some(pinned)) if installed != pinned => {
                plan.pin_drift
                    .push((name.clone(), pinned.clone(), installed.clone()));
            }
            (Some(installed), None) => {
                if let Some(available) = &candidate[index]
                    && available != installed
                {
                    plan.upgrade_names.push(name.clone());
                }
            }
            _ => {}
        }
    }

    plan
}

/// One reconciliation cycle from the manifest: install what is missing,
/// upgrade installed unpinned packages whose candidate version differs.
pub fn apply(manifest_path: Option<&str>, runner: &ChocoRunner) -> Result<()> {
    let path = Manifest::resolve_path(manifest_path)?;
    let manifest = Manifest::load(&path)?;
    if manifest.packages.is_empty() {
        println!(
            "Nothing to reconcile: no packages declared in {}",
            path.display()
        );
        return Ok(());
    }

    let request = manifest.to_request()?;
    let tool = locate_choco()?;
    let mut query = StateQuery::new(tool.clone(), runner);
    let current = query.resolve_current(request.names())?;
    let candidate = query.resolve_candidate(request.names())?;

    let plan = plan_apply(&request, &current, &candidate);

    for (name, pinned, installed) in &plan.pin_drift {
        eprintln!(
            "{} {} is pinned to {} but {} is installed; leaving it in place",
            "warning:".bold().yellow(),
            name,
            pinned,
            installed
        );
    }

    if plan.install_names.is_empty() && plan.upgrade_names.is_empty() {
        println!("Everything up to date");
        return Ok(());
    }

    if !plan.install_names.is_empty() {
        println!(
            "Installing {} package{}",
            plan.install_names.len(),
            if plan.install_names.len() == 1 { "" } else { "s" }
        );
        let install_request = PackageRequest::new(plan.install_names, plan.install_pins)?
            .with_option_args(request.options());
        converge(Action::Install, &install_request, &tool, runner)?;
    }

    if !plan.upgrade_names.is_empty() {
        println!(
            "Upgrading {} package{}",
            plan.upgrade_names.len(),
            if plan.upgrade_names.len() == 1 { "" } else { "s" }
        );
        let pins = vec![None; plan.upgrade_names.len()];
        let upgrade_request =
            PackageRequest::new(plan.upgrade_names, pins)?.with_option_args(request.options());
        converge(Action::Upgrade, &upgrade_request, &tool, runner)?;
    }

    Ok(())
}
