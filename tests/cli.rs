//! End-to-end tests driving the compiled binary in dry-run mode.
//!
//! `CHOCSYNC_CHOCO` points at a fixed fake path so no chocolatey install
//! is needed; `--dry-run` makes the planned invocations observable on
//! stdout without executing anything.

use std::process::{Command, Output};

const FAKE_CHOCO: &str = "/opt/chocolatey/choco";

fn chocsync(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chocsync"))
        .env("CHOCSYNC_CHOCO", FAKE_CHOCO)
        .args(args)
        .output()
        .expect("failed to spawn chocsync")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn install_plans_pinned_before_batched() {
    let output = chocsync(&["install", "git=2.6.2", "vim", "--dry-run"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let printed = stdout(&output);
    let pinned = printed
        .find("/opt/chocolatey/choco install -y -version 2.6.2 git")
        .expect("pinned invocation not printed");
    let batched = printed
        .find("/opt/chocolatey/choco install -y vim")
        .expect("batched invocation not printed");
    assert!(pinned < batched, "pinned invocation must come first");
}

#[test]
fn install_passes_options_through() {
    let output = chocsync(&[
        "install",
        "git",
        "--options",
        "--execution-timeout 2700",
        "--dry-run",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        stdout(&output)
            .contains("/opt/chocolatey/choco install -y --execution-timeout 2700 git")
    );
}

#[test]
fn upgrade_with_pin_fails_before_any_invocation() {
    let output = chocsync(&["upgrade", "git=2.6.2", "--dry-run"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("version pins are not supported for upgrade"));
    assert!(
        !stdout(&output).contains("[DRY RUN]"),
        "no command may be issued for a pinned upgrade"
    );
}

#[test]
fn remove_batches_into_one_invocation() {
    let output = chocsync(&["remove", "git", "vim", "--dry-run"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let printed = stdout(&output);
    assert!(printed.contains("/opt/chocolatey/choco uninstall -y git vim"));
    assert_eq!(printed.matches("[DRY RUN]").count(), 1);
}

#[test]
fn uninstall_matches_remove_and_warns() {
    let removed = chocsync(&["remove", "git", "vim", "--dry-run"]);
    let uninstalled = chocsync(&["uninstall", "git", "vim", "--dry-run"]);

    assert!(uninstalled.status.success());
    assert_eq!(stdout(&removed), stdout(&uninstalled));
    assert!(stderr(&uninstalled).contains("deprecated; use `remove` instead"));
    assert!(!stderr(&removed).contains("deprecated"));
}

#[test]
fn purge_matches_remove() {
    let removed = chocsync(&["remove", "git", "--dry-run"]);
    let purged = chocsync(&["purge", "git", "--dry-run"]);

    assert!(purged.status.success());
    assert_eq!(stdout(&removed), stdout(&purged));
}

#[test]
fn source_flag_is_rejected_before_running() {
    let output = chocsync(&[
        "install",
        "git",
        "--source",
        "https://internal.example/feed",
        "--dry-run",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not support a package source"));
    assert!(!stdout(&output).contains("[DRY RUN]"));
}

#[test]
fn missing_tool_is_a_clear_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_chocsync"))
        .env_remove("CHOCSYNC_CHOCO")
        .env("PATH", "")
        .args(["install", "git", "--dry-run"])
        .output()
        .expect("failed to spawn chocsync");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("could not locate the choco executable"));
}

#[test]
fn completions_generate() {
    let output = chocsync(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("chocsync"));
}
