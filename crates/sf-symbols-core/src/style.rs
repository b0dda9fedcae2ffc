//! The view layer of sfsymbols, with utilities for styling command-line output.

use std::error::Error;
use std::path::Path;

use console::style;
use terminal_size::{Width, terminal_size};

use crate::diagnostic::{Diagnostic, Span};

pub const MAX_WIDTH: usize = 100;

/// Get the display width. If it is unavailable, supply a normal default.
#[must_use]
pub fn text_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| usize::from(w).min(MAX_WIDTH))
}

/// Format the underlying cause of an error
pub fn format_error_cause(inner: &dyn Error) -> String {
    format!(
        "{}{} {}",
        style("Error cause").underlined().bold(),
        style(":").underlined().bold(),
        inner
    )
}

/// Format a diagnostic as a report against the source it was found in.
///
/// ```text
/// error: `star.filled` is not a valid SF Symbol name
///  --> Sources/Symbols.swift:4:9
///   |
/// 4 |         "star.filled"
///   |         ^^^^^^^^^^^^^
/// ```
///
/// Further related locations follow as `note:` reports of their own.
#[must_use]
pub fn format_diagnostic(path: &Path, source: &str, diagnostic: &Diagnostic) -> String {
    let mut out = format!(
        "{}{} {}",
        style("error").red().bold(),
        style(":").bold(),
        style(&diagnostic.kind).bold()
    );

    match diagnostic.span {
        Some(span) => push_snippet(&mut out, path, source, span),
        None => push_location(&mut out, &path.display().to_string()),
    }

    for related in &diagnostic.related {
        if Some(*related) == diagnostic.span {
            continue;
        }
        out.push_str(&format!(
            "\n{}{} also here",
            style("note").cyan().bold(),
            style(":").bold()
        ));
        push_snippet(&mut out, path, source, *related);
    }

    out
}

fn push_location(out: &mut String, location: &str) {
    out.push_str(&format!("\n {} {location}", style("-->").blue().bold()));
}

fn push_snippet(out: &mut String, path: &Path, source: &str, span: Span) {
    push_location(out, &format!("{}:{span}", path.display()));

    let Some(line) = span.line.checked_sub(1).and_then(|index| source.lines().nth(index)) else {
        return;
    };

    let number = span.line.to_string();
    let gutter = " ".repeat(number.len());
    let bar = style("|").blue().bold();

    // Tabs are kept so the carets line up with the source text.
    let lead: String = line
        .chars()
        .take(span.column)
        .map(|ch| if ch == '\t' { '\t' } else { ' ' })
        .collect();
    let line_len = line.chars().count();
    let end = if span.end_line == span.line {
        span.end_column.min(line_len)
    } else {
        line_len
    };
    let carets = "^".repeat(end.saturating_sub(span.column).max(1));

    out.push_str(&format!(
        "\n{gutter} {bar}\n{} {bar} {line}\n{gutter} {bar} {lead}{}",
        style(&number).blue().bold(),
        style(carets).red().bold()
    ));
}
