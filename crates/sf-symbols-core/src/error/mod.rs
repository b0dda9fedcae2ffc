use std::error::Error;
use std::fmt;
use std::process::exit;

mod kind;
mod reporter;

#[allow(clippy::module_name_repetitions)]
pub use kind::ErrorKind;
#[allow(clippy::module_name_repetitions)]
pub use reporter::report_error;

pub type Fallible<T> = Result<T, SymbolsError>;

/// Error type for sfsymbols
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SymbolsError {
    inner: Box<Inner>,
}

#[derive(Debug)]
struct Inner {
    kind: ErrorKind,
    source: Option<Box<dyn Error>>,
}

impl SymbolsError {
    /// The exit code sfsymbols should use when this error stops execution
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.inner.kind.exit_code()
    }

    /// Create a new `SymbolsError` instance including a source error
    pub fn from_source<E>(source: E, kind: ErrorKind) -> Self
    where
        E: Into<Box<dyn Error>>,
    {
        Self {
            inner: Box::new(Inner {
                kind,
                source: Some(source.into()),
            }),
        }
    }

    /// Get a reference to the `ErrorKind` for this error
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl fmt::Display for SymbolsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.kind.fmt(f)
    }
}

impl Error for SymbolsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source.as_ref().map(std::convert::AsRef::as_ref)
    }
}

impl From<ErrorKind> for SymbolsError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }
}

/// Trait providing the `with_context` method to easily convert any Result error into a `SymbolsError`
pub trait Context<T> {
    /// # Errors
    ///
    /// Returns a `SymbolsError` if the underlying result is an error.
    fn with_context<F>(self, f: F) -> Fallible<T>
    where
        F: FnOnce() -> ErrorKind;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: Error + 'static,
{
    fn with_context<F>(self, f: F) -> Fallible<T>
    where
        F: FnOnce() -> ErrorKind,
    {
        self.map_err(|e| SymbolsError::from_source(e, f()))
    }
}

/// Exit codes supported by sfsymbols errors
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitCode {
    /// No error occurred.
    Success = 0,

    /// An unknown error occurred.
    UnknownError = 1,

    /// An invalid combination of command-line arguments was supplied.
    InvalidArguments = 3,

    /// A file could not be read or written.
    FileSystemError = 7,

    /// The configuration file or name catalog is missing or incorrect.
    ConfigurationError = 8,

    /// One or more invocations failed validation.
    GenerationFailure = 10,
}

impl ExitCode {
    pub fn exit(self) -> ! {
        exit(self as i32);
    }
}
