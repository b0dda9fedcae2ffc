//! Swift identifiers derived from symbol names.

use std::fmt;

/// Swift reserved words that must be written in backticks when used as a case
/// name. Sorted, for binary search.
const KEYWORDS: &[&str] = &[
    "Any",
    "Protocol",
    "Self",
    "Type",
    "any",
    "as",
    "associatedtype",
    "associativity",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "continue",
    "convenience",
    "default",
    "defer",
    "deinit",
    "didSet",
    "do",
    "dynamic",
    "else",
    "enum",
    "extension",
    "fallthrough",
    "false",
    "fileprivate",
    "final",
    "for",
    "func",
    "get",
    "guard",
    "if",
    "import",
    "in",
    "indirect",
    "infix",
    "init",
    "inout",
    "internal",
    "is",
    "lazy",
    "left",
    "let",
    "mutating",
    "nil",
    "none",
    "nonmutating",
    "open",
    "operator",
    "optional",
    "override",
    "postfix",
    "precedence",
    "precedencegroup",
    "prefix",
    "private",
    "protocol",
    "public",
    "repeat",
    "required",
    "rethrows",
    "return",
    "right",
    "self",
    "set",
    "some",
    "static",
    "struct",
    "subscript",
    "super",
    "switch",
    "throw",
    "throws",
    "true",
    "try",
    "typealias",
    "unowned",
    "var",
    "weak",
    "where",
    "while",
    "willSet",
];

/// Returns true if `word` is a Swift reserved word.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word).is_ok()
}

/// Converts a dot-separated symbol name to lower camel case: each `.` is
/// dropped and the character after it uppercased.
///
/// `"star.square.on.square"` becomes `"starSquareOnSquare"`. A trailing dot has
/// nothing to attach to and is kept.
#[must_use]
pub fn camel_case(name: &str) -> String {
    name.chars()
        .fold(String::with_capacity(name.len()), |mut camel, ch| {
            if camel.ends_with('.') {
                camel.pop();
                camel.extend(ch.to_uppercase());
            } else {
                camel.push(ch);
            }
            camel
        })
}

/// A case name for the generated enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    text: String,
    escaped: bool,
}

impl Identifier {
    /// Derives the case name for a raw symbol name.
    ///
    /// Reserved words and names starting with a digit (`1.circle` →
    /// `1Circle`) are marked for backtick escaping.
    #[must_use]
    pub fn for_symbol(name: &str) -> Self {
        let text = camel_case(name);
        let escaped = is_keyword(&text) || text.starts_with(|ch: char| ch.is_ascii_digit());
        Self { text, escaped }
    }

    /// The bare identifier, without escaping.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_escaped(&self) -> bool {
        self.escaped
    }

    /// Whether the identifier can be written as a Swift case name: non-empty
    /// and made only of letters, digits and underscores. Empty names,
    /// trailing dots and spaces all fail this.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.text.is_empty()
            && self
                .text
                .chars()
                .all(|ch| ch.is_alphanumeric() || ch == '_')
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.escaped {
            write!(f, "`{}`", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}
