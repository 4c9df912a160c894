//! Chocolatey state reconciliation core.
//!
//! One reconciliation cycle flows in a single direction: a validated
//! [`PackageRequest`] → lazily memoized installed/available listings
//! ([`StateQuery`]) → positionally resolved current/candidate versions →
//! a planned invocation batch ([`plan`]) → sequential execution through a
//! [`CommandRunner`]. Nothing is retained across cycles.

mod error;
mod listing;
mod plan;
mod request;
mod runner;
mod state;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::ChocoError;
pub use listing::Listing;
pub use plan::{converge, execute, plan, Action, Invocation};
pub use request::PackageRequest;
pub use runner::{locate_choco, render_command, ChocoRunner, CommandOutput, CommandRunner, CHOCO_ENV};
pub use state::StateQuery;
