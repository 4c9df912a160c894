mod choco;
mod commands;
mod completions;
mod manifest;

use clap::{Parser, Subcommand};

use crate::choco::{Action, ChocoRunner};
use crate::completions::SupportedShell;

/// Declarative package state reconciliation for Chocolatey
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print external commands instead of executing them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show installed and candidate versions for packages
    Status {
        /// Package names (defaults to the manifest contents)
        names: Vec<String>,
        /// Manifest path override
        #[arg(short, long)]
        manifest: Option<String>,
    },

    /// Install packages (pin a version with name=version)
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
        /// Extra options passed through to choco
        #[arg(short, long, allow_hyphen_values = true)]
        options: Option<String>,
        /// Not supported by chocolatey; rejected if supplied
        #[arg(long, hide = true)]
        source: Option<String>,
    },

    /// Upgrade packages to the latest available version
    Upgrade {
        #[arg(required = true)]
        packages: Vec<String>,
        /// Extra options passed through to choco
        #[arg(short, long, allow_hyphen_values = true)]
        options: Option<String>,
        /// Not supported by chocolatey; rejected if supplied
        #[arg(long, hide = true)]
        source: Option<String>,
    },

    /// Remove packages
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
        /// Extra options passed through to choco
        #[arg(short, long, allow_hyphen_values = true)]
        options: Option<String>,
        /// Not supported by chocolatey; rejected if supplied
        #[arg(long, hide = true)]
        source: Option<String>,
    },

    /// Legacy alias of remove
    #[command(hide = true)]
    Uninstall {
        #[arg(required = true)]
        packages: Vec<String>,
        /// Extra options passed through to choco
        #[arg(short, long, allow_hyphen_values = true)]
        options: Option<String>,
        /// Not supported by chocolatey; rejected if supplied
        #[arg(long, hide = true)]
        source: Option<String>,
    },

    /// Remove packages (chocolatey makes no purge/remove distinction)
    Purge {
        #[arg(required = true)]
        packages: Vec<String>,
        /// Extra options passed through to choco
        #[arg(short, long, allow_hyphen_values = true)]
        options: Option<String>,
        /// Not supported by chocolatey; rejected if supplied
        #[arg(long, hide = true)]
        source: Option<String>,
    },

    /// Reconcile the system against the manifest
    Apply {
        /// Manifest path override
        #[arg(short, long)]
        manifest: Option<String>,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: SupportedShell,
    },
}

fn main() {
    let cli = Cli::parse();
    let runner = ChocoRunner::new(cli.dry_run);

    let result = match &cli.command {
        Commands::Status { names, manifest } => {
            commands::status(names, manifest.as_deref(), &runner)
        }
        Commands::Install {
            packages,
            options,
            source,
        } => commands::run_action(
            Action::Install,
            packages,
            options.as_deref(),
            source.clone(),
            &runner,
        ),
        Commands::Upgrade {
            packages,
            options,
            source,
        } => commands::run_action(
            Action::Upgrade,
            packages,
            options.as_deref(),
            source.clone(),
            &runner,
        ),
        Commands::Remove {
            packages,
            options,
            source,
        } => commands::run_action(
            Action::Remove,
            packages,
            options.as_deref(),
            source.clone(),
            &runner,
        ),
        Commands::Uninstall {
            packages,
            options,
            source,
        } => commands::run_action(
            Action::Uninstall,
            packages,
            options.as_deref(),
            source.clone(),
            &runner,
        ),
        Commands::Purge {
            packages,
            options,
            source,
        } => commands::run_action(
            Action::Purge,
            packages,
            options.as_deref(),
            source.clone(),
            &runner,
        ),
        Commands::Apply { manifest } => commands::apply(manifest.as_deref(), &runner),
        Commands::Completions { shell } => completions::generate_completions(*shell),
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
