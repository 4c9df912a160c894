//! Cycle-scoped package state queries.

use std::path::PathBuf;

use super::error::ChocoError;
use super::listing::Listing;
use super::runner::{render_command, CommandRunner};

const INSTALLED_QUERY: [&str; 3] = ["list", "-l", "-r"];
const AVAILABLE_QUERY: [&str; 2] = ["list", "-r"];

/// Lazily queried installed/available state for one reconciliation cycle.
///
/// Each listing is fetched at most once, on first access, and held for the
/// lifetime of this value. Drop the value when the cycle ends; nothing is
/// shared across cycles.
pub struct StateQuery<'a> {
    tool: PathBuf,
    runner: &'a dyn CommandRunner,
    installed: Option<Listing>,
    available: Option<Listing>,
}

impl<'a> StateQuery<'a> {
    pub fn new(tool: PathBuf, runner: &'a dyn CommandRunner) -> Self {
        Self {
            tool,
            runner,
            installed: None,
            available: None,
        }
    }

    /// Locally installed packages (`choco list -l -r`).
    pub fn installed(&mut self) -> Result<&Listing, ChocoError> {
        let listing = match self.installed.take() {
            Some(listing) => listing,
            None => self.fetch(&INSTALLED_QUERY)?,
        };
        Ok(self.installed.insert(listing))
    }

    /// Best available packages (`choco list -r`).
    pub fn available(&mut self) -> Result<&Listing, ChocoError> {
        let listing = match self.available.take() {
            Some(listing) => listing,
            None => self.fetch(&AVAILABLE_QUERY)?,
        };
        Ok(self.available.insert(listing))
    }

    /// Installed versions for `names`, positionally aligned with the
    /// input. An uninstalled name resolves to `None`.
    pub fn resolve_current(&mut self, names: &[String]) -> Result<Vec<Option<String>>, ChocoError> {
        let listing = self.installed()?;
        Ok(names.iter().map(|name| listing.version_of(name)).collect())
    }

    /// Candidate versions for `names`, positionally aligned with the
    /// input. A name unknown to the repository resolves to `None`.
    pub fn resolve_candidate(
        &mut self,
        names: &[String],
    ) -> Result<Vec<Option<String>>, ChocoError> {
        let listing = self.available()?;
        Ok(names.iter().map(|name| listing.version_of(name)).collect())
    }

    fn fetch(&self, query: &[&str]) -> Result<Listing, ChocoError> {
        let args: Vec<String> = query.iter().map(|arg| arg.to_string()).collect();
        let output = self.runner.run(&self.tool, &args)?;
        if !output.success {
            return Err(ChocoError::CommandFailed {
                command: render_command(&self.tool, &args),
                status: output.status_label(),
            });
        }
        Ok(Listing::parse(&output.stdout))
    }
}
