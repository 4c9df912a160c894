use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChocoError {
    #[error("could not locate the choco executable (set CHOCSYNC_CHOCO or add choco to PATH)")]
    ToolNotFound(#[from] which::Error),

    #[error("chocolatey does not support a package {parameter} here: {value}")]
    UnsupportedParameter {
        parameter: &'static str,
        value: String,
    },

    #[error("version pins are not supported for upgrade: {name} = {version}")]
    PinnedUpgrade { name: String, version: String },

    #[error("invalid package request: {0}")]
    InvalidRequest(String),

    #[error("command failed with {status}: {command}")]
    CommandFailed { command: String, status: String },

    #[error("failed to run `{command}`: {source}")]
    Exec {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
