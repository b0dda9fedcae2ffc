//! Source-mapped generation diagnostics.

use std::fmt;

use proc_macro2::LineColumn;
use thiserror::Error;

/// A region of a source file. Lines are 1-based, columns are 0-based
/// character offsets, matching `proc_macro2::LineColumn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: LineColumn, end: LineColumn) -> Self {
        Self {
            line: start.line,
            column: start.column,
            end_line: end.line,
            end_column: end.column,
        }
    }

    /// A span covering one character.
    #[must_use]
    pub const fn point(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            end_line: line,
            end_column: column + 1,
        }
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        let start = (self.line, self.column).min((other.line, other.column));
        let end = (self.end_line, self.end_column).max((other.end_line, other.end_column));
        Self {
            line: start.0,
            column: start.1,
            end_line: end.0,
            end_column: end.1,
        }
    }
}

impl From<proc_macro2::Span> for Span {
    fn from(span: proc_macro2::Span) -> Self {
        Self::new(span.start(), span.end())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column + 1)
    }
}

/// Every way a generation request can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("Empty SF Symbol names")]
    EmptyNames,

    #[error("Cannot parse SF Symbol names")]
    UnparseableNames,

    #[error("`{name}` is not a valid SF Symbol name")]
    InvalidName { name: String },

    #[error("Redundant SF Symbol names: {}", quoted(.names))]
    RedundantNames { names: Vec<String> },

    #[error("Cannot parse access level")]
    UnparseableAccessLevel { found: String },

    #[error("Malformed #SFSymbol invocation: {message}")]
    MalformedInvocation { message: String },
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A rejected generation, pointing at the input fragment responsible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Where the problem is, when the input came from source text.
    pub span: Option<Span>,
    /// Further locations involved, e.g. every repeated occurrence of a
    /// redundant name.
    pub related: Vec<Span>,
}

impl Diagnostic {
    #[must_use]
    pub const fn new(kind: DiagnosticKind, span: Option<Span>) -> Self {
        Self {
            kind,
            span,
            related: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_related(mut self, related: Vec<Span>) -> Self {
        self.related = related;
        self
    }

    pub(crate) fn malformed(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::new(
            DiagnosticKind::MalformedInvocation {
                message: message.into(),
            },
            span,
        )
    }
}
