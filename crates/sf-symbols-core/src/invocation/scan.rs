//! Locates `#SFSymbol` invocations in Swift source text.
//!
//! The scanner does not tokenize Swift. It only knows enough to step over
//! comments and string literals (including raw, multi-line and interpolated
//! strings) so that `#SFSymbol` inside them is ignored, and to find the end of
//! an invocation by matching its parentheses and trailing braces.

use std::ops::Range;

use crate::MACRO_NAME;
use crate::diagnostic::{Diagnostic, Span};

/// One invocation found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    /// The invocation text, from `#` through its closing delimiter.
    pub text: &'a str,
    /// Byte offset of the `#`.
    pub start: usize,
    /// Byte offset just past the invocation.
    pub end: usize,
    /// 1-based line of the `#`.
    pub line: usize,
    /// 0-based character column of the `#`.
    pub column: usize,
    /// Leading whitespace of the line the invocation starts on.
    pub indent: &'a str,
}

impl Occurrence<'_> {
    /// Span of the whole invocation.
    #[must_use]
    pub fn span(&self) -> Span {
        let last_line = self.text.lines().count().max(1);
        let end_column = if last_line == 1 {
            self.column + self.text.chars().count()
        } else {
            self.text
                .rsplit('\n')
                .next()
                .map_or(0, |tail| tail.chars().count())
        };
        Span {
            line: self.line,
            column: self.column,
            end_line: self.line + last_line - 1,
            end_column,
        }
    }
}

impl Occurrence<'_> {
    /// Splits the invocation text into its top-level arguments and trailing
    /// block, without tokenizing them.
    #[must_use]
    pub fn layout(&self) -> Layout {
        let mut scanner = Scanner::new(self.text.as_bytes());
        scanner.pos = (1 + MACRO_NAME.len()).min(self.text.len());

        let mut layout = Layout::default();
        if scanner.skip_blanks_to(b'(') {
            scanner.pos += 1;
            layout.arguments = scanner.split_arguments();
        }
        if scanner.skip_blanks_to(b'{') {
            layout.trailing = Some(scanner.pos..self.text.len());
        }
        layout
    }

    /// File position of a byte offset within the invocation text.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let (line, column) = position(self.text, offset);
        if line == 1 {
            (self.line, self.column + column)
        } else {
            (self.line + line - 1, column)
        }
    }

    /// Byte offset within the invocation text of a file position, if the
    /// position falls inside it.
    #[must_use]
    pub fn offset(&self, line: usize, column: usize) -> Option<usize> {
        let relative = line.checked_sub(self.line)?;
        let column = if relative == 0 {
            column.checked_sub(self.column)?
        } else {
            column
        };

        let mut line_start = 0;
        for _ in 0..relative {
            line_start += self.text[line_start..].find('\n')? + 1;
        }
        let rest = &self.text[line_start..];
        let within = rest
            .char_indices()
            .nth(column)
            .map_or(rest.len(), |(index, _)| index);
        Some(line_start + within)
    }

    /// Span of a byte range within the invocation text.
    #[must_use]
    pub fn span_of(&self, range: Range<usize>) -> Span {
        let (line, column) = self.position(range.start);
        let (end_line, end_column) = self.position(range.end);
        Span {
            line,
            column,
            end_line,
            end_column,
        }
    }
}

/// Byte ranges, within an invocation's text, of its arguments and its
/// trailing block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Layout {
    pub arguments: Vec<Range<usize>>,
    pub trailing: Option<Range<usize>>,
}

/// Finds every invocation in `source`, in order.
///
/// An invocation whose parentheses or braces are never closed yields a
/// diagnostic and ends the scan, since nothing after it can be delimited
/// reliably.
#[must_use]
pub fn invocations(source: &str) -> Vec<Result<Occurrence<'_>, Diagnostic>> {
    let mut scanner = Scanner::new(source.as_bytes());
    let mut found = Vec::new();

    while scanner.pos < scanner.src.len() {
        if scanner.skip_literal() {
            continue;
        }

        if scanner.at_macro() {
            let start = scanner.pos;
            scanner.pos += MACRO_NAME.len() + 1;
            match scanner.skip_arguments() {
                Ok(()) => found.push(Ok(occurrence(source, start, scanner.pos))),
                Err(open) => {
                    let (line, column) = position(source, open);
                    let delimiter = char::from(scanner.src[open]);
                    found.push(Err(Diagnostic::malformed(
                        format!("unclosed `{delimiter}`"),
                        Some(Span::point(line, column)),
                    )));
                    break;
                }
            }
            continue;
        }

        scanner.pos += 1;
    }

    found
}

fn occurrence(source: &str, start: usize, end: usize) -> Occurrence<'_> {
    let (line, column) = position(source, start);
    let line_start = source[..start].rfind('\n').map_or(0, |newline| newline + 1);
    let indent_len = source[line_start..start]
        .bytes()
        .take_while(|b| matches!(b, b' ' | b'\t'))
        .count();

    Occurrence {
        text: &source[start..end],
        start,
        end,
        line,
        column,
        indent: &source[line_start..line_start + indent_len],
    }
}

/// 1-based line and 0-based character column of a byte offset.
fn position(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    (line, before[line_start..].chars().count())
}

const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn at(&self, pattern: &[u8]) -> bool {
        self.src
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(pattern))
    }

    fn count_hashes(&self, offset: usize) -> usize {
        self.src[(self.pos + offset).min(self.src.len())..]
            .iter()
            .take_while(|&&b| b == b'#')
            .count()
    }

    fn at_macro(&self) -> bool {
        self.peek(0) == Some(b'#')
            && self.src[self.pos + 1..].starts_with(MACRO_NAME.as_bytes())
            && !self
                .peek(1 + MACRO_NAME.len())
                .is_some_and(is_ident_byte)
    }

    fn at_string(&self) -> bool {
        let hashes = self.count_hashes(0);
        self.peek(hashes) == Some(b'"')
    }

    /// Steps over a comment or string literal at the cursor, returning false
    /// if there is none.
    fn skip_literal(&mut self) -> bool {
        if self.at(b"//") {
            self.skip_line_comment();
        } else if self.at(b"/*") {
            self.skip_block_comment();
        } else if self.at_string() {
            self.skip_string();
        } else {
            return false;
        }
        true
    }

    fn skip_line_comment(&mut self) {
        while self.peek(0).is_some_and(|b| b != b'\n') {
            self.pos += 1;
        }
    }

    /// Swift block comments nest.
    fn skip_block_comment(&mut self) {
        self.pos += 2;
        let mut depth = 1;
        while depth > 0 && self.pos < self.src.len() {
            if self.at(b"/*") {
                depth += 1;
                self.pos += 2;
            } else if self.at(b"*/") {
                depth -= 1;
                self.pos += 2;
            } else {
                self.pos += 1;
            }
        }
    }

    fn skip_string(&mut self) {
        let hashes = self.count_hashes(0);
        self.pos += hashes;
        let multiline = self.at(br#"""""#);
        let quote_len = if multiline { 3 } else { 1 };
        self.pos += quote_len;

        loop {
            match self.peek(0) {
                None => return,
                Some(b'\\') if (0..hashes).all(|k| self.peek(1 + k) == Some(b'#')) => {
                    self.pos += 1 + hashes;
                    if self.peek(0) == Some(b'(') {
                        // Interpolated expressions may contain their own strings.
                        if self.skip_balanced(b'(', b')').is_err() {
                            return;
                        }
                    } else {
                        self.pos += 1;
                    }
                }
                Some(b'"') => {
                    let closes = !multiline || self.at(br#"""""#);
                    if closes && (0..hashes).all(|k| self.peek(quote_len + k) == Some(b'#')) {
                        self.pos += quote_len + hashes;
                        return;
                    }
                    self.pos += 1;
                }
                // Unterminated single-line string.
                Some(b'\n') if !multiline => return,
                Some(_) => self.pos += 1,
            }
        }
    }

    /// With the cursor on `open`, moves past the matching `close`. On failure
    /// returns the offset of the unmatched `open`.
    fn skip_balanced(&mut self, open: u8, close: u8) -> Result<(), usize> {
        let start = self.pos;
        let mut depth = 0usize;
        while self.pos < self.src.len() {
            if self.skip_literal() {
                continue;
            }
            let b = self.src[self.pos];
            self.pos += 1;
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
        Err(start)
    }

    /// Moves past an optional argument list and an optional trailing block on
    /// the same line.
    fn skip_arguments(&mut self) -> Result<(), usize> {
        if self.skip_blanks_to(b'(') {
            self.skip_balanced(b'(', b')')?;
        }
        if self.skip_blanks_to(b'{') {
            self.skip_balanced(b'{', b'}')?;
        }
        Ok(())
    }

    /// With the cursor just inside an argument list, collects the ranges of
    /// its comma-separated arguments and moves past the closing `)`.
    fn split_arguments(&mut self) -> Vec<Range<usize>> {
        let mut arguments = Vec::new();
        let mut start = self.pos;
        let mut depth = 0usize;

        while self.pos < self.src.len() {
            if self.skip_literal() {
                continue;
            }
            let b = self.src[self.pos];
            self.pos += 1;
            match b {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' if depth > 0 => depth -= 1,
                b',' | b')' if depth == 0 => {
                    let end = self.pos - 1;
                    if !self.src[start..end].trim_ascii().is_empty() {
                        arguments.push(start..end);
                    }
                    start = self.pos;
                    if b == b')' {
                        break;
                    }
                }
                _ => {}
            }
        }

        arguments
    }

    /// If `target` follows after spaces and tabs, moves onto it.
    fn skip_blanks_to(&mut self, target: u8) -> bool {
        let blanks = self.src[self.pos..]
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        if self.peek(blanks) == Some(target) {
            self.pos += blanks;
            true
        } else {
            false
        }
    }
}
