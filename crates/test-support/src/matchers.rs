use std::fmt;
use std::process::Output;
use std::str;

use crate::process::Builder;

use hamcrest2::core::{MatchResult, Matcher};

#[derive(Clone)]
pub struct Execs {
    stdout: Option<String>,
    stderr: Option<String>,
    exit_code: Option<i32>,
    stdout_contains: Vec<String>,
    stderr_contains: Vec<String>,
    stdout_contains_n: Vec<(String, usize)>,
    stdout_not_contains: Vec<String>,
    stderr_not_contains: Vec<String>,
}

impl Execs {
    /// Verify that stdout is equal to the given lines.
    ///
    /// See `lines_match` for supported patterns.
    #[must_use]
    pub fn with_stdout(mut self, expected: &str) -> Self {
        self.stdout = Some(expected.to_string());
        self
    }

    /// Verify that stderr is equal to the given lines.
    ///
    /// See `lines_match` for supported patterns.
    #[must_use]
    pub fn with_stderr(mut self, expected: &str) -> Self {
        self.stderr = Some(expected.to_string());
        self
    }

    /// Verify the exit code from the process.
    #[must_use]
    pub const fn with_status(mut self, expected: i32) -> Self {
        self.exit_code = Some(expected);
        self
    }

    /// Verify that stdout contains the given contiguous lines somewhere in
    /// its output.
    ///
    /// See `lines_match` for supported patterns.
    #[must_use]
    pub fn with_stdout_contains(mut self, expected: &str) -> Self {
        self.stdout_contains.push(expected.to_string());
        self
    }

    /// Verify that stderr contains the given contiguous lines somewhere in
    /// its output.
    ///
    /// See `lines_match` for supported patterns.
    #[must_use]
    pub fn with_stderr_contains(mut self, expected: &str) -> Self {
        self.stderr_contains.push(expected.to_string());
        self
    }

    /// Verify that stdout contains the given contiguous lines exactly `number`
    /// times, e.g. one `case` line per generated symbol.
    ///
    /// See `lines_match` for supported patterns.
    #[must_use]
    pub fn with_stdout_contains_n(mut self, expected: &str, number: usize) -> Self {
        self.stdout_contains_n.push((expected.to_string(), number));
        self
    }

    /// Verify that stdout does not contain the given contiguous lines.
    ///
    /// See `lines_match` for supported patterns.
    /// See note on `with_stderr_does_not_contain`.
    #[must_use]
    pub fn with_stdout_does_not_contain(mut self, expected: &str) -> Self {
        self.stdout_not_contains.push(expected.to_string());
        self
    }

    /// Verify that stderr does not contain the given contiguous lines.
    ///
    /// See `lines_match` for supported patterns.
    ///
    /// A typo in `expected` makes this pass without checking anything, so
    /// prefer pairing it with a positive check on the same output.
    #[must_use]
    pub fn with_stderr_does_not_contain(mut self, expected: &str) -> Self {
        self.stderr_not_contains.push(expected.to_string());
        self
    }

    fn match_output(&self, actual: &Output) -> MatchResult {
        self.match_status(actual)
            .and_then(|()| self.match_stdout(actual))
            .and_then(|()| self.match_stderr(actual))
    }

    fn match_status(&self, actual: &Output) -> MatchResult {
        match self.exit_code {
            None => Ok(()),
            Some(code) if actual.status.code() == Some(code) => Ok(()),
            Some(_) => Err(format!(
                "exited with {}\n--- stdout\n{}\n--- stderr\n{}",
                actual.status,
                String::from_utf8_lossy(&actual.stdout),
                String::from_utf8_lossy(&actual.stderr)
            )),
        }
    }

    fn match_stdout(&self, actual: &Output) -> MatchResult {
        match_std(
            self.stdout.as_ref(),
            &actual.stdout,
            "stdout",
            &actual.stderr,
            MatchKind::Exact,
        )?;
        for expect in &self.stdout_contains {
            match_std(
                Some(expect),
                &actual.stdout,
                "stdout",
                &actual.stderr,
                MatchKind::Partial,
            )?;
        }
        for (expect, number) in &self.stdout_contains_n {
            match_std(
                Some(expect),
                &actual.stdout,
                "stdout",
                &actual.stderr,
                MatchKind::PartialN(*number),
            )?;
        }
        for expect in &self.stdout_not_contains {
            match_std(
                Some(expect),
                &actual.stdout,
                "stdout",
                &actual.stderr,
                MatchKind::NotPresent,
            )?;
        }
        Ok(())
    }

    fn match_stderr(&self, actual: &Output) -> MatchResult {
        match_std(
            self.stderr.as_ref(),
            &actual.stderr,
            "stderr",
            &actual.stdout,
            MatchKind::Exact,
        )?;
        for expect in &self.stderr_contains {
            match_std(
                Some(expect),
                &actual.stderr,
                "stderr",
                &actual.stdout,
                MatchKind::Partial,
            )?;
        }
        for expect in &self.stderr_not_contains {
            match_std(
                Some(expect),
                &actual.stderr,
                "stderr",
                &actual.stdout,
                MatchKind::NotPresent,
            )?;
        }
        Ok(())
    }
}

fn match_std(
    expected: Option<&String>,
    actual: &[u8],
    description: &str,
    extra: &[u8],
    kind: MatchKind,
) -> MatchResult {
    let Some(out) = expected else {
        return Ok(());
    };
    let Ok(actual) = str::from_utf8(actual) else {
        return Err(format!("{description} was not utf8 encoded"));
    };
    // Let's not deal with \r\n vs \n on windows...
    let actual = actual.replace('\r', "");

    match kind {
        MatchKind::Exact => match_exact(out, &actual, extra),
        MatchKind::Partial => match_partial(out, &actual),
        MatchKind::PartialN(number) => match_partial_n(out, &actual, number),
        MatchKind::NotPresent => match_not_present(out, &actual),
    }
}

fn match_exact(out: &str, actual: &str, extra: &[u8]) -> MatchResult {
    let diffs = diff_lines(actual.lines(), out.lines(), false);
    if diffs.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "differences:\n\
             {}\n\n\
             other output:\n\
             `{}`",
            diffs.join("\n"),
            String::from_utf8_lossy(extra)
        ))
    }
}

/// Number of positions in `actual` where the lines of `out` start.
fn count_matches(out: &str, actual: &str) -> usize {
    let mut a = actual.lines();
    let mut matches = 0;
    loop {
        if diff_lines(a.clone(), out.lines(), true).is_empty() {
            matches += 1;
        }
        if a.next().is_none() {
            break matches;
        }
    }
}

fn match_partial(out: &str, actual: &str) -> MatchResult {
    if count_matches(out, actual) > 0 {
        Ok(())
    } else {
        Err(format!(
            "expected to find:\n\
             {out}\n\n\
             did not find in output:\n\
             {actual}"
        ))
    }
}

fn match_partial_n(out: &str, actual: &str, number: usize) -> MatchResult {
    let found = count_matches(out, actual);
    if found == number {
        Ok(())
    } else {
        Err(format!(
            "expected to find {number} occurrences (found {found}):\n\
             {out}\n\n\
             in output:\n\
             {actual}"
        ))
    }
}

fn match_not_present(out: &str, actual: &str) -> MatchResult {
    if count_matches(out, actual) == 0 {
        Ok(())
    } else {
        Err(format!(
            "expected not to find:\n\
             {out}\n\n\
             but found in output:\n\
             {actual}"
        ))
    }
}

fn diff_lines<'a>(actual: str::Lines<'a>, expected: str::Lines<'a>, partial: bool) -> Vec<String> {
    let actual = actual.take(if partial {
        expected.clone().count()
    } else {
        usize::MAX
    });
    zip_all(actual, expected)
        .enumerate()
        .filter_map(|(i, (a, e))| match (a, e) {
            (Some(a), Some(e)) => {
                if lines_match(e, a) {
                    None
                } else {
                    Some(format!("{i:3} - |{e}|\n    + |{a}|\n"))
                }
            }
            (Some(a), None) => Some(format!("{i:3} -\n    + |{a}|\n")),
            (None, Some(e)) => Some(format!("{i:3} - |{e}|\n    +\n")),
            (None, None) => None,
        })
        .collect()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum MatchKind {
    Exact,
    Partial,
    PartialN(usize),
    NotPresent,
}

/// Compare a line with an expected pattern.
/// - Use `[..]` as a wildcard to match 0 or more characters on the same line
///   (similar to `.*` in a regex).
/// - Use `[EXE]` to optionally add `.exe` on Windows (empty string on other
///   platforms).
/// - `[ERROR]`, `[WARNING]` and `[NOTE]` stand for the prefixes sfsymbols
///   puts on diagnostics, and `[ARROW]` for the location marker.
#[must_use]
pub fn lines_match(expected: &str, actual: &str) -> bool {
    // Let's not deal with / vs \ (windows...)
    let expected = expected.replace('\\', "/");
    let mut actual: &str = &actual.replace('\\', "/");
    let expected = substitute_macros(&expected);
    for (i, part) in expected.split("[..]").enumerate() {
        match actual.find(part) {
            Some(j) => {
                if i == 0 && j != 0 {
                    return false;
                }
                actual = &actual[j + part.len()..];
            }
            None => return false,
        }
    }
    actual.is_empty() || expected.ends_with("[..]")
}

#[test]
fn lines_match_works() {
    assert!(lines_match("a b", "a b"));
    assert!(lines_match("a[..]b", "a b"));
    assert!(lines_match("a[..]", "a b"));
    assert!(lines_match("[..]", "a b"));
    assert!(lines_match("[..]b", "a b"));
    assert!(lines_match("[ERROR] [..]", "error: Empty SF Symbol names"));
    assert!(lines_match("[ARROW] Sources/A.swift:2:5", " --> Sources/A.swift:2:5"));

    assert!(!lines_match("[..]b", "c"));
    assert!(!lines_match("b", "c"));
    assert!(!lines_match("b", "cb"));
}

#[test]
fn counts_every_occurrence() {
    let output = "enum SFSymbol: String {\n    case star\n    case heart\n}\n";
    assert!(match_partial_n("    case [..]", output, 2).is_ok());
    assert!(match_partial_n("    case [..]", output, 3).is_err());
    assert!(match_not_present("    case moon", output).is_ok());
}

struct ZipAll<I1: Iterator, I2: Iterator> {
    first: I1,
    second: I2,
}

impl<T, I1: Iterator<Item = T>, I2: Iterator<Item = T>> Iterator for ZipAll<I1, I2> {
    type Item = (Option<T>, Option<T>);
    fn next(&mut self) -> Option<(Option<T>, Option<T>)> {
        let first = self.first.next();
        let second = self.second.next();

        match (first, second) {
            (None, None) => None,
            (a, b) => Some((a, b)),
        }
    }
}

const fn zip_all<T, I1: Iterator<Item = T>, I2: Iterator<Item = T>>(
    a: I1,
    b: I2,
) -> ZipAll<I1, I2> {
    ZipAll {
        first: a,
        second: b,
    }
}

impl fmt::Display for Execs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execs")
    }
}

impl fmt::Debug for Execs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execs")
    }
}

impl Matcher<Builder> for Execs {
    fn matches(&self, mut process: Builder) -> MatchResult {
        self.matches(&mut process)
    }
}

impl<'a> Matcher<&'a mut Builder> for Execs {
    fn matches(&self, process: &'a mut Builder) -> MatchResult {
        println!("running {process}");
        let res = process.exec_with_output();

        match res {
            Ok(out) => self.match_output(&out),
            Err(err) => {
                if let Some(out) = &err.output {
                    return self.match_output(out);
                }
                Err(format!("could not exec process {process}: {err}"))
            }
        }
    }
}

impl Matcher<Output> for Execs {
    fn matches(&self, output: Output) -> MatchResult {
        self.match_output(&output)
    }
}

#[must_use]
pub const fn execs() -> Execs {
    Execs {
        stdout: None,
        stderr: None,
        exit_code: Some(0),
        stdout_contains: Vec::new(),
        stderr_contains: Vec::new(),
        stdout_contains_n: Vec::new(),
        stdout_not_contains: Vec::new(),
        stderr_not_contains: Vec::new(),
    }
}

fn substitute_macros(input: &str) -> String {
    let macros = [
        ("[ERROR]", "error:"),
        ("[WARNING]", "warning:"),
        ("[NOTE]", "note:"),
        ("[ARROW]", " -->"),
        ("[EXE]", if cfg!(windows) { ".exe" } else { "" }),
    ];
    let mut result = input.to_owned();
    for &(pat, subst) in &macros {
        result = result.replace(pat, subst);
    }
    result
}
