//! Command execution and choco discovery.

use std::env;
use std::path::{Path, PathBuf};

use duct::cmd;

use super::error::ChocoError;

/// Environment variable overriding where the choco executable lives.
pub const CHOCO_ENV: &str = "CHOCSYNC_CHOCO";

/// Captured result of one external invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "termination by signal".to_string(),
        }
    }
}

/// Synchronous, blocking execution of a single external command.
///
/// Production code goes through [`ChocoRunner`]; tests script this trait
/// instead of spawning processes.
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ChocoError>;
}

/// Runs choco via duct, capturing stdout. A non-zero exit is reported in
/// the returned [`CommandOutput`], not as an error; callers decide whether
/// it is fatal.
pub struct ChocoRunner {
    pub dry_run: bool,
}

impl ChocoRunner {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

impl CommandRunner for ChocoRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ChocoError> {
        if self.dry_run {
            println!("[DRY RUN] {}", render_command(program, args));
            return Ok(CommandOutput {
                stdout: String::new(),
                success: true,
                code: Some(0),
            });
        }

        let output = cmd(program, args)
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|source| ChocoError::Exec {
                command: render_command(program, args),
                source,
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Resolve the choco executable: explicit override first, PATH second.
///
/// An override set via `CHOCSYNC_CHOCO` is taken as-is without checking the
/// filesystem, so dry runs work on machines without chocolatey.
pub fn locate_choco() -> Result<PathBuf, ChocoError> {
    if let Ok(path) = env::var(CHOCO_ENV)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(which::which("choco")?)
}

/// Render a command line for diagnostics and dry-run output.
pub fn render_command(program: &Path, args: &[String]) -> String {
    let mut parts = vec![program.display().to_string()];
    parts.extend(args.iter().cloned());
    shell_words::join(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn render_command_joins_args() {
        let args = vec!["install".to_string(), "-y".to_string(), "git".to_string()];
        assert_eq!(
            render_command(Path::new("/opt/choco/choco"), &args),
            "/opt/choco/choco install -y git"
        );
    }

    #[test]
    fn render_command_quotes_when_needed() {
        let args = vec!["has space".to_string()];
        assert_eq!(
            render_command(Path::new("choco"), &args),
            "choco 'has space'"
        );
    }

    #[test]
    fn render_command_without_args() {
        assert_eq!(render_command(Path::new("choco"), &[]), "choco");
    }

    #[test]
    #[serial]
    fn locate_prefers_env_override() {
        unsafe { env::set_var(CHOCO_ENV, "/opt/chocolatey/choco.exe") };
        let located = locate_choco().unwrap();
        unsafe { env::remove_var(CHOCO_ENV) };
        assert_eq!(located, PathBuf::from("/opt/chocolatey/choco.exe"));
    }

    #[test]
    #[serial]
    fn locate_ignores_blank_override() {
        unsafe { env::set_var(CHOCO_ENV, "  ") };
        let located = locate_choco();
        unsafe { env::remove_var(CHOCO_ENV) };
        // Falls through to PATH lookup; either outcome is fine as long as
        // the blank override itself was not used.
        if let Ok(path) = located {
            assert_ne!(path, PathBuf::from("  "));
        }
    }
}
