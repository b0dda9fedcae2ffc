//! The single input schema for generation.
//!
//! However names were written (a JSON config, command-line arguments, an
//! array literal or a builder block inside a Swift `#SFSymbol` invocation),
//! they are lowered to a [`GenerateRequest`] before validation.

use crate::diagnostic::Span;

/// One raw symbol name as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub span: Option<Span>,
}

impl SymbolEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: None,
        }
    }

    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// The access level argument exactly as written, before it is checked
/// against the four Swift levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessArgument {
    pub tag: String,
    pub span: Option<Span>,
}

/// Ordered symbol names plus an optional access level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    pub names: Vec<SymbolEntry>,
    pub access_level: Option<AccessArgument>,
    /// Location of the names argument as a whole.
    pub names_span: Option<Span>,
    /// Location of the whole invocation, used when nothing narrower applies.
    pub site: Option<Span>,
}

impl GenerateRequest {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(SymbolEntry::new).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_access_level(mut self, tag: impl Into<String>) -> Self {
        self.access_level = Some(AccessArgument {
            tag: tag.into(),
            span: None,
        });
        self
    }

    /// The span to report when a problem has no narrower location.
    #[must_use]
    pub fn names_or_site(&self) -> Option<Span> {
        self.names_span.or(self.site)
    }
}
