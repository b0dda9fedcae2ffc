//! Provides the `Config` type, which represents an `sfsymbols.json` file found
//! in the working directory or one of its ancestors.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{Context, ErrorKind, Fallible};
use crate::request::GenerateRequest;

pub const CONFIG_FILE: &str = "sfsymbols.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    catalog: Option<PathBuf>,
    access_level: Option<String>,
    names: Option<Vec<Value>>,
    output: Option<PathBuf>,
}

/// A parsed `sfsymbols.json`. Relative paths in the file are resolved against
/// the directory containing it.
#[derive(Debug)]
pub struct Config {
    file: PathBuf,
    raw: RawConfig,
}

impl Config {
    /// Finds the closest `sfsymbols.json` at or above `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is found but cannot be read or parsed.
    pub fn find(start: &Path) -> Fallible<Option<Self>> {
        match start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|file| file.is_file())
        {
            Some(file) => Self::load(&file).map(Some),
            None => {
                debug!("No {CONFIG_FILE} found at or above {}", start.display());
                Ok(None)
            }
        }
    }

    /// Reads the config file at `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn load(file: &Path) -> Fallible<Self> {
        debug!("Loading configuration from {}", file.display());
        let contents = fs::read_to_string(file).with_context(|| ErrorKind::ConfigReadError {
            file: file.to_owned(),
        })?;
        let raw = serde_json::from_str(&contents).with_context(|| ErrorKind::ConfigParseError {
            file: file.to_owned(),
        })?;

        Ok(Self {
            file: dunce::simplified(file).to_owned(),
            raw,
        })
    }

    /// The path of the config file itself.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.file
            .parent()
            .map_or_else(|| path.to_owned(), |dir| dir.join(path))
    }

    /// The configured name catalog, resolved against the config directory.
    #[must_use]
    pub fn catalog(&self) -> Option<PathBuf> {
        self.raw.catalog.as_deref().map(|path| self.resolve(path))
    }

    /// The configured output file for `generate`, resolved against the config
    /// directory.
    #[must_use]
    pub fn output(&self) -> Option<PathBuf> {
        self.raw.output.as_deref().map(|path| self.resolve(path))
    }

    #[must_use]
    pub fn access_level(&self) -> Option<&str> {
        self.raw.access_level.as_deref()
    }

    /// Whether the config lists any names at all (an empty list counts).
    #[must_use]
    pub const fn has_names(&self) -> bool {
        self.raw.names.is_some()
    }

    /// Lowers the configured names and access level to a request.
    ///
    /// # Errors
    ///
    /// Returns an `UnparseableNames` diagnostic if a name is not a string.
    pub fn request(&self) -> Result<GenerateRequest, Diagnostic> {
        let names = self
            .raw
            .names
            .iter()
            .flatten()
            .map(|value| {
                value
                    .as_str()
                    .ok_or_else(|| Diagnostic::new(DiagnosticKind::UnparseableNames, None))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request = GenerateRequest::new(names);
        Ok(match self.access_level() {
            Some(tag) => request.with_access_level(tag),
            None => request,
        })
    }
}
