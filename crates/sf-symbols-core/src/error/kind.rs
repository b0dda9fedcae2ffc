use std::fmt;
use std::path::PathBuf;

use super::ExitCode;
use crate::config::CONFIG_FILE;
use crate::session::CATALOG_ENV;

const PERMISSIONS_CTA: &str = "Please ensure you have correct permissions to the file.";

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum ErrorKind {
    /// Thrown when the name catalog could not be read
    CatalogReadError {
        file: PathBuf,
    },

    /// Thrown when the name catalog is not a name list or a JSON catalog
    CatalogParseError {
        file: PathBuf,
    },

    /// Thrown when the completions file already exists and `--force` was not given
    CompletionsOutFileError {
        path: PathBuf,
    },

    /// Thrown when `sfsymbols.json` could not be read
    ConfigReadError {
        file: PathBuf,
    },

    /// Thrown when `sfsymbols.json` is not valid
    ConfigParseError {
        file: PathBuf,
    },

    /// Thrown when the current directory could not be determined
    CurrentDirError,

    /// Thrown when one or more invocations failed validation
    GenerationFailed {
        count: usize,
    },

    /// Thrown when `generate` has no names from the command line or the config
    NoNamesSpecified,

    /// Thrown when `check` is given a directory without any Swift sources
    NoSwiftSources {
        path: PathBuf,
    },

    /// Thrown when generated source could not be written
    OutputWriteError {
        file: PathBuf,
    },

    /// Thrown when a Swift source could not be read
    SourceReadError {
        file: PathBuf,
    },
}

impl fmt::Display for ErrorKind {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatalogReadError { file } => write!(
                f,
                "Could not read name catalog {}

Please ensure the path given with `--catalog`, {CATALOG_ENV} or `{CONFIG_FILE}` exists.",
                file.display()
            ),
            Self::CatalogParseError { file } => write!(
                f,
                "Could not parse name catalog {}

A catalog is either a text file with one symbol name per line, or a JSON
array or object of symbol names.",
                file.display()
            ),
            Self::CompletionsOutFileError { path } => write!(
                f,
                "Completions file `{}` already exists.

Please remove the file or pass `-f` or `--force` to override.",
                path.display()
            ),
            Self::ConfigReadError { file } => write!(
                f,
                "Could not read configuration {}

{PERMISSIONS_CTA}",
                file.display()
            ),
            Self::ConfigParseError { file } => write!(
                f,
                "Could not parse configuration {}

Please ensure the file is correctly formatted.",
                file.display()
            ),
            Self::CurrentDirError => write!(
                f,
                "Could not determine current directory

Please ensure that you have the correct permissions."
            ),
            Self::GenerationFailed { count } => {
                let noun = if *count == 1 { "error" } else { "errors" };
                write!(f, "Could not generate SF Symbols due to {count} previous {noun}")
            }
            Self::NoNamesSpecified => write!(
                f,
                "No SF Symbol names specified.

Pass names as arguments, or add a `names` list to `{CONFIG_FILE}`."
            ),
            Self::NoSwiftSources { path } => write!(
                f,
                "No Swift sources found in {}",
                path.display()
            ),
            Self::OutputWriteError { file } => write!(
                f,
                "Could not write generated source to {}

{PERMISSIONS_CTA}",
                file.display()
            ),
            Self::SourceReadError { file } => write!(
                f,
                "Could not read Swift source {}

{PERMISSIONS_CTA}",
                file.display()
            ),
        }
    }
}

impl ErrorKind {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::CatalogReadError { .. }
            | Self::CatalogParseError { .. }
            | Self::ConfigParseError { .. } => ExitCode::ConfigurationError,
            Self::CompletionsOutFileError { .. }
            | Self::NoNamesSpecified
            | Self::NoSwiftSources { .. } => ExitCode::InvalidArguments,
            Self::ConfigReadError { .. }
            | Self::OutputWriteError { .. }
            | Self::SourceReadError { .. } => ExitCode::FileSystemError,
            Self::CurrentDirError => ExitCode::UnknownError,
            Self::GenerationFailed { .. } => ExitCode::GenerationFailure,
        }
    }
}
