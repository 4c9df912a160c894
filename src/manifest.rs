//! Desired-state manifest.
//!
//! The manifest declares which packages the machine should have, with
//! optional version pins, and is the input to `chocsync apply`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::choco::{ChocoError, PackageRequest};

pub const MANIFEST_FILE: &str = "chocsync.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Extra command-line options passed through to every choco invocation.
    #[serde(default)]
    pub options: Option<String>,

    #[serde(default, rename = "package")]
    pub packages: Vec<PackageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageEntry {
    pub name: String,

    /// Pin to an exact version; omit to track the latest available.
    #[serde(default)]
    pub version: Option<String>,

    /// Parsed for older manifests but always rejected when building a
    /// request: chocolatey has no per-package source concept here.
    #[serde(default)]
    pub source: Option<String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Unable to determine user config directory")?;
        Ok(config_dir.join("chocsync").join(MANIFEST_FILE))
    }

    /// Manifest location, honoring a user-supplied override (tilde
    /// expanded) over the default config-dir path.
    pub fn resolve_path(override_path: Option<&str>) -> Result<PathBuf> {
        match override_path {
            Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).into_owned())),
            None => Self::default_path(),
        }
    }

    /// Build the reconciliation request covering every declared package.
    pub fn to_request(&self) -> Result<PackageRequest, ChocoError> {
        let mut names = Vec::with_capacity(self.packages.len());
        let mut pins = Vec::with_capacity(self.packages.len());

        for entry in &self.packages {
            if let Some(source) = &entry.source {
                return Err(ChocoError::UnsupportedParameter {
                    parameter: "source",
                    value: source.clone(),
                });
            }
            names.push(entry.name.clone());
            pins.push(entry.version.clone());
        }

        let request = PackageRequest::new(names, pins)?;
        match &self.options {
            Some(options) => request.with_options(options),
            None => Ok(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_builds_request() {
        let file = write_manifest(
            r#"
options = "--execution-timeout 2700"

[[package]]
name = "git"
version = "2.6.2"

[[package]]
name = "vim"
"#,
        );

        let manifest = Manifest::load(file.path()).unwrap();
        let request = manifest.to_request().unwrap();

        assert_eq!(request.names(), ["git".to_string(), "vim".to_string()]);
        assert_eq!(request.pins(), [Some("2.6.2".to_string()), None]);
        assert_eq!(
            request.options(),
            ["--execution-timeout".to_string(), "2700".to_string()]
        );
    }

    #[test]
    fn source_attribute_is_rejected() {
        let file = write_manifest(
            r#"
[[package]]
name = "git"
source = "https://internal.example/feed"
"#,
        );

        let manifest = Manifest::load(file.path()).unwrap();
        match manifest.to_request() {
            Err(ChocoError::UnsupportedParameter { parameter, value }) => {
                assert_eq!(parameter, "source");
                assert_eq!(value, "https://internal.example/feed");
            }
            other => panic!("expected UnsupportedParameter, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_manifest_reports_path() {
        let error = Manifest::load(Path::new("/nonexistent/chocsync.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/chocsync.toml"));
    }

    #[test]
    fn resolve_path_prefers_override() {
        let path = Manifest::resolve_path(Some("/etc/chocsync.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/etc/chocsync.toml"));
    }
}
