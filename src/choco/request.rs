//! The validated package request for one reconciliation cycle.

use super::error::ChocoError;

/// Desired packages for a single action: parallel name/pin vectors of
/// equal length (at least one entry), plus free-form extra options passed
/// through to every choco invocation.
///
/// A missing pin is `None`, never an empty string. Single-package
/// construction goes through [`PackageRequest::single`]; there is no
/// scalar/sequence branching anywhere downstream.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    names: Vec<String>,
    pins: Vec<Option<String>>,
    options: Vec<String>,
}

impl PackageRequest {
    pub fn new(names: Vec<String>, pins: Vec<Option<String>>) -> Result<Self, ChocoError> {
        if names.is_empty() {
            return Err(ChocoError::InvalidRequest(
                "no package names given".to_string(),
            ));
        }
        if names.len() != pins.len() {
            return Err(ChocoError::InvalidRequest(format!(
                "{} names but {} version pins",
                names.len(),
                pins.len()
            )));
        }
        for (name, pin) in names.iter().zip(&pins) {
            if name.trim().is_empty() {
                return Err(ChocoError::InvalidRequest(
                    "empty package name".to_string(),
                ));
            }
            if let Some(version) = pin
                && version.trim().is_empty()
            {
                return Err(ChocoError::InvalidRequest(format!(
                    "empty version pin for '{}'",
                    name
                )));
            }
        }

        Ok(Self {
            names,
            pins,
            options: Vec::new(),
        })
    }

    /// One-package convenience constructor.
    pub fn single(name: &str, pin: Option<&str>) -> Result<Self, ChocoError> {
        Self::new(vec![name.to_string()], vec![pin.map(str::to_string)])
    }

    /// Build a request from CLI-style specs, where `name=version` pins a
    /// package and a bare `name` does not.
    pub fn from_specs(specs: &[String]) -> Result<Self, ChocoError> {
        let mut names = Vec::with_capacity(specs.len());
        let mut pins = Vec::with_capacity(specs.len());

        for spec in specs {
            match spec.split_once('=') {
                Some((name, version)) => {
                    names.push(name.to_string());
                    pins.push(Some(version.to_string()));
                }
                None => {
                    names.push(spec.clone());
                    pins.push(None);
                }
            }
        }

        Self::new(names, pins)
    }

    /// Attach free-form extra options, tokenized shell-style.
    pub fn with_options(mut self, options: &str) -> Result<Self, ChocoError> {
        self.options = shell_words::split(options)
            .map_err(|err| ChocoError::InvalidRequest(format!("bad options string: {}", err)))?;
        Ok(self)
    }

    /// Attach already-tokenized options (used when deriving a sub-request
    /// from an existing one).
    pub fn with_option_args(mut self, options: &[String]) -> Self {
        self.options = options.to_vec();
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn pins(&self) -> &[Option<String>] {
        &self.pins
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// (name, pin) pairs in request order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Option<String>)> {
        self.names.iter().zip(self.pins.iter())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
