//! Expansion of `#SFSymbol` invocations written in Swift sources.
//!
//! A Swift file may invoke the generator the way the original compiler macro
//! was invoked:
//!
//! ```text
//! #SFSymbol {
//!     "star"
//!     "star.fill"
//! }
//!
//! #SFSymbol(accessLevel: .public, names: ["drop.fill", "flame.fill"])
//! ```
//!
//! [`scan`] finds the invocations, [`ast`] parses each one into a
//! [`GenerateRequest`](crate::request::GenerateRequest), and
//! [`expand_source`] replaces them with the generated declarations.

pub mod ast;
pub mod scan;

use log::debug;
use sf_symbol_catalog::Catalog;

use crate::diagnostic::Diagnostic;
use crate::generator::generate;

/// A source file with every invocation expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// Number of invocations that were expanded.
    pub count: usize,
}

/// Expands every invocation in `source`.
///
/// Invocations are independent: each one is validated, and the diagnostics of
/// all failing invocations are returned together.
///
/// # Errors
///
/// Returns every diagnostic produced; any diagnostic means no output.
pub fn expand_source<C>(source: &str, catalog: &C) -> Result<Expansion, Vec<Diagnostic>>
where
    C: Catalog + ?Sized,
{
    let mut text = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut count = 0;
    let mut diagnostics = Vec::new();

    for found in scan::invocations(source) {
        let expanded = found.and_then(|occurrence| {
            let request = ast::parse(&occurrence)?;
            let declaration = generate(&request, catalog)?;
            Ok((occurrence, declaration))
        });

        match expanded {
            Ok((occurrence, declaration)) => {
                text.push_str(&source[cursor..occurrence.start]);
                text.push_str(&declaration.render_indented(occurrence.indent));
                cursor = occurrence.end;
                count += 1;
            }
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    if !diagnostics.is_empty() {
        debug!("{} invocations failed to expand", diagnostics.len());
        return Err(diagnostics);
    }

    text.push_str(&source[cursor..]);
    debug!("Expanded {count} invocations");
    Ok(Expansion { text, count })
}

/// Validates every invocation in `source` without producing output.
#[must_use]
pub fn check_source<C>(source: &str, catalog: &C) -> Vec<Diagnostic>
where
    C: Catalog + ?Sized,
{
    expand_source(source, catalog).err().unwrap_or_default()
}
