use crate::support::{CATALOG, sfsymbols};
use hamcrest2::assert_that;
use hamcrest2::prelude::*;
use test_support::matchers::execs;
use test_support::sandbox;

const GOOD: &str = r#"import SwiftUI

#SFSymbol(.private, ["star", "heart"])
"#;

const BAD: &str = r#"import SwiftUI

#SFSymbol(["star", "heart", "star"])

enum Other {
    #SFSymbol(.open) {
        "heart"
    }
}
"#;

#[test]
fn valid_sources_pass() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file("Sources/App/Good.swift", GOOD)
        .build();

    assert_that!(
        sfsymbols(&s, &["check", "--catalog", "symbols.txt", "Sources"]),
        execs().with_status(0).with_stdout("").with_stderr("")
    );
}

#[test]
fn every_failure_is_reported() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file("Sources/App/Good.swift", GOOD)
        .file("Sources/Bad.swift", BAD)
        .build();

    assert_that!(
        sfsymbols(&s, &["check", "--catalog", "symbols.txt", "Sources"]),
        execs()
            .with_status(10)
            .with_stderr_contains(
                "[ERROR] Redundant SF Symbol names: 'star'
[ARROW] Sources/Bad.swift:3:29
  |
3 | #SFSymbol([\"star\", \"heart\", \"star\"])
  |                             ^^^^^^"
            )
            .with_stderr_contains(
                "[ERROR] Cannot parse access level
[ARROW] Sources/Bad.swift:6:15"
            )
            .with_stderr_contains("[ERROR] Could not generate SF Symbols due to 2 previous errors")
            .with_stderr_does_not_contain("[..]Good.swift[..]")
    );
}

#[test]
fn hidden_directories_are_skipped() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file("Sources/Good.swift", GOOD)
        .file(".build/checkouts/Bad.swift", BAD)
        .build();

    assert_that!(
        sfsymbols(&s, &["check", "--catalog", "symbols.txt", "."]),
        execs().with_status(0)
    );
}

#[test]
fn directories_without_swift_sources() {
    let s = sandbox().file("Docs/README.md", "# Docs\n").build();

    assert_that!(
        sfsymbols(&s, &["check", "Docs"]),
        execs()
            .with_status(3)
            .with_stderr_contains("[ERROR] No Swift sources found in Docs")
    );
}

#[test]
fn paths_are_required() {
    let s = sandbox().build();

    assert_that!(sfsymbols(&s, &["check"]), execs().with_status(2));
}
