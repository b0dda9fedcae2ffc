//! Name-validity oracles for SF Symbols.
//!
//! The generator never owns the list of symbols Apple ships; it asks a
//! [`Catalog`] whether a name exists. This crate provides the catalogs used in
//! practice: a [`NameList`] loaded from an exported symbol list, a
//! [`WellFormed`] fallback that only checks the shape of a name, and
//! [`AcceptAll`] for tests.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

static SYMBOL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:\.[a-z0-9]+)*$").expect("regex is valid"));

/// Answers whether a raw name is a recognized SF Symbol.
pub trait Catalog {
    fn contains(&self, name: &str) -> bool;
}

impl<F> Catalog for F
where
    F: Fn(&str) -> bool,
{
    fn contains(&self, name: &str) -> bool {
        self(name)
    }
}

/// Returns true if `name` is shaped like an SF Symbol name: lowercase ASCII
/// letters and digits in dot-separated segments.
#[must_use]
pub fn is_well_formed(name: &str) -> bool {
    SYMBOL_NAME.is_match(name)
}

/// Accepts every syntactically valid symbol name.
#[derive(Debug, Default, Clone, Copy)]
pub struct WellFormed;

impl Catalog for WellFormed {
    fn contains(&self, name: &str) -> bool {
        is_well_formed(name)
    }
}

/// Accepts everything, including names that could never be symbols.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl Catalog for AcceptAll {
    fn contains(&self, _name: &str) -> bool {
        true
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read the symbol catalog")]
    Io(#[from] io::Error),

    #[error("could not parse the symbol catalog as JSON")]
    Json(#[from] serde_json::Error),

    #[error("the symbol catalog has an unsupported layout: {0}")]
    Layout(&'static str),
}

/// A fixed set of known symbol names.
#[derive(Debug, Default, Clone)]
pub struct NameList {
    names: HashSet<String>,
}

impl NameList {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a plain-text export: one name per line. Blank lines and lines
    /// starting with `#` are skipped.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_names(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Parses a JSON export.
    ///
    /// Three layouts are understood: an array of names, an object with a
    /// `symbols` member (itself an array of names or an object keyed by name),
    /// or an object keyed by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or has none of those layouts.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(text)?;
        let value = match value {
            Value::Object(mut map) if map.contains_key("symbols") => map
                .remove("symbols")
                .ok_or(Error::Layout("missing `symbols` member"))?,
            other => other,
        };

        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(name) => Ok(name),
                    _ => Err(Error::Layout("array entries must be strings")),
                })
                .collect::<Result<HashSet<_>, _>>()
                .map(|names| Self { names }),
            Value::Object(map) => Ok(Self::from_names(map.into_iter().map(|(name, _)| name))),
            _ => Err(Error::Layout("expected an array or an object of names")),
        }
    }

    /// Loads a catalog file, choosing the parser by extension: `.json` files
    /// are parsed as JSON, anything else as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&contents)
        } else {
            Ok(Self::from_text(&contents))
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Catalog for NameList {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn well_formed() {
        assert!(is_well_formed("star"));
        assert!(is_well_formed("star.fill"));
        assert!(is_well_formed("1.circle"));
        assert!(is_well_formed("star.square.on.square"));

        assert!(!is_well_formed(""));
        assert!(!is_well_formed("Star"));
        assert!(!is_well_formed(".star"));
        assert!(!is_well_formed("star."));
        assert!(!is_well_formed("star..fill"));
        assert!(!is_well_formed("star fill"));
    }

    #[test]
    fn closures_are_catalogs() {
        let only_star = |name: &str| name == "star";
        assert!(only_star.contains("star"));
        assert!(!only_star.contains("star.fill"));
    }

    #[test]
    fn text_export() {
        let list = NameList::from_text("# exported\nstar\n\n  star.fill  \n# trailing\n");
        assert_eq!(list.len(), 2);
        assert!(list.contains("star"));
        assert!(list.contains("star.fill"));
        assert!(!list.contains("# exported"));
    }

    #[test]
    fn json_layouts() {
        let array = NameList::from_json(r#"["star", "star.fill"]"#).unwrap();
        assert!(array.contains("star.fill"));

        let nested = NameList::from_json(r#"{"symbols": {"drop.fill": "2019", "flame.fill": "2019"}}"#)
            .unwrap();
        assert!(nested.contains("drop.fill"));
        assert!(nested.contains("flame.fill"));

        let keyed = NameList::from_json(r#"{"case": "2019"}"#).unwrap();
        assert!(keyed.contains("case"));
    }

    #[test]
    fn json_rejects_other_layouts() {
        assert!(matches!(
            NameList::from_json(r#"["star", 3]"#),
            Err(Error::Layout(_))
        ));
        assert!(matches!(NameList::from_json("42"), Err(Error::Layout(_))));
        assert!(matches!(NameList::from_json("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("symbols.JSON");
        fs::write(&json_path, r#"["star"]"#).unwrap();
        assert!(NameList::load(&json_path).unwrap().contains("star"));

        let text_path = dir.path().join("symbols.txt");
        let mut file = fs::File::create(&text_path).unwrap();
        writeln!(file, "star.fill").unwrap();
        assert!(NameList::load(&text_path).unwrap().contains("star.fill"));

        assert!(matches!(
            NameList::load(&dir.path().join("missing.txt")),
            Err(Error::Io(_))
        ));
    }
}
