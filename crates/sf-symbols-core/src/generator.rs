//! Validation of a [`GenerateRequest`] and construction of the declaration.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};
use sf_symbol_catalog::Catalog;

use crate::access::AccessLevel;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Span};
use crate::ident::Identifier;
use crate::request::GenerateRequest;

/// One case of the generated enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseEntry {
    identifier: Identifier,
    raw: String,
}

impl CaseEntry {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            identifier: Identifier::for_symbol(raw),
            raw: raw.to_string(),
        }
    }

    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The raw symbol name, which is what the generated `name` accessor
    /// returns.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.raw
    }

    /// The explicit raw value written after `=`, needed only when the case
    /// name differs from the symbol name.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        (self.identifier.as_str() != self.raw).then_some(self.raw.as_str())
    }
}

/// A validated `SFSymbol` enum, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDeclaration {
    access_level: AccessLevel,
    cases: Vec<CaseEntry>,
}

impl GeneratedDeclaration {
    #[must_use]
    pub const fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    #[must_use]
    pub fn cases(&self) -> &[CaseEntry] {
        &self.cases
    }
}

/// Validates `request` against `catalog` and builds the declaration.
///
/// Checks run in order and the first failure aborts generation: the access
/// level, then emptiness, then each name against the catalog and the shape of
/// its case name, then duplicates (all of them are reported at once).
///
/// # Errors
///
/// Returns a [`Diagnostic`] describing the first failed check.
pub fn generate<C>(request: &GenerateRequest, catalog: &C) -> Result<GeneratedDeclaration, Diagnostic>
where
    C: Catalog + ?Sized,
{
    let access_level = access_level(request)?;
    debug!(
        "Generating {} SF Symbol cases with {access_level} access",
        request.names.len()
    );

    if request.names.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticKind::EmptyNames,
            request.names_or_site(),
        ));
    }

    if let Some(invalid) = request
        .names
        .iter()
        .find(|entry| {
            !catalog.contains(&entry.name) || !Identifier::for_symbol(&entry.name).is_valid()
        })
    {
        return Err(Diagnostic::new(
            DiagnosticKind::InvalidName {
                name: invalid.name.clone(),
            },
            invalid.span.or(request.site),
        ));
    }

    check_redundant(request)?;

    let cases = request
        .names
        .iter()
        .map(|entry| {
            let case = CaseEntry::new(&entry.name);
            trace!("{} => {}", case.name(), case.identifier());
            case
        })
        .collect();

    Ok(GeneratedDeclaration {
        access_level,
        cases,
    })
}

fn access_level(request: &GenerateRequest) -> Result<AccessLevel, Diagnostic> {
    match &request.access_level {
        None => Ok(AccessLevel::default()),
        Some(argument) => argument.tag.parse().map_err(|_| {
            Diagnostic::new(
                DiagnosticKind::UnparseableAccessLevel {
                    found: argument.tag.clone(),
                },
                argument.span.or(request.site),
            )
        }),
    }
}

fn check_redundant(request: &GenerateRequest) -> Result<(), Diagnostic> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    let mut seen = HashSet::new();
    let mut repeats: Vec<Span> = Vec::new();

    for entry in &request.names {
        *counts.entry(entry.name.as_str()).or_default() += 1;
        if !seen.insert(entry.name.as_str()) {
            repeats.extend(entry.span);
        }
    }

    let names: Vec<String> = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(name, _)| name.to_string())
        .collect();

    if names.is_empty() {
        return Ok(());
    }

    let span = repeats.first().copied().or(request.site);
    Err(Diagnostic::new(DiagnosticKind::RedundantNames { names }, span).with_related(repeats))
}
