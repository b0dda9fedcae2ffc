use crate::support::{CATALOG, sfsymbols};
use hamcrest2::assert_that;
use hamcrest2::prelude::*;
use test_support::matchers::execs;
use test_support::sandbox;

#[test]
fn prints_an_enum_for_the_given_names() {
    let s = sandbox().file("symbols.txt", CATALOG).build();

    assert_that!(
        sfsymbols(&s, &["generate", "--catalog", "symbols.txt", "star", "star.fill", "case"]),
        execs()
            .with_status(0)
            .with_stdout_contains(
                "enum SFSymbol: String {
    case star
    case starFill = \"star.fill\"
    case `case`

    var name: String {
        self.rawValue
    }"
            )
            .with_stdout_contains_n("    case [..]", 3)
            .with_stdout_contains("    func image() -> Image {")
            .with_stdout_contains("    #elseif canImport(AppKit)")
    );
}

#[test]
fn public_access_reaches_the_members() {
    let s = sandbox().file("symbols.txt", CATALOG).build();

    assert_that!(
        sfsymbols(&s, &["generate", "--catalog", "symbols.txt", "--access", "public", "heart"]),
        execs()
            .with_status(0)
            .with_stdout_contains("public enum SFSymbol: String {")
            .with_stdout_contains("    public func uiImage() -> UIImage {")
            .with_stdout_does_not_contain("    func image() -> Image {")
    );
}

#[test]
fn unknown_names_are_rejected() {
    let s = sandbox().file("symbols.txt", CATALOG).build();

    assert_that!(
        sfsymbols(&s, &["generate", "--catalog", "symbols.txt", "star", "star.filled"]),
        execs()
            .with_status(10)
            .with_stdout("")
            .with_stderr_contains("[ERROR] `star.filled` is not a valid SF Symbol name")
            .with_stderr_contains("[ERROR] Could not generate SF Symbols due to 1 previous error")
    );
}

#[test]
fn every_duplicate_is_named() {
    let s = sandbox().file("symbols.txt", CATALOG).build();

    assert_that!(
        sfsymbols(
            &s,
            &["generate", "--catalog", "symbols.txt", "heart", "star", "heart", "star"]
        ),
        execs()
            .with_status(10)
            .with_stderr_contains("[ERROR] Redundant SF Symbol names: 'heart', 'star'")
    );
}

#[test]
fn unknown_access_levels_are_rejected() {
    let s = sandbox().file("symbols.txt", CATALOG).build();

    assert_that!(
        sfsymbols(&s, &["generate", "--catalog", "symbols.txt", "--access", "open", "star"]),
        execs()
            .with_status(10)
            .with_stderr_contains("[ERROR] Cannot parse access level")
    );
}

#[test]
fn well_formed_names_pass_without_a_catalog() {
    let s = sandbox().build();

    assert_that!(
        sfsymbols(&s, &["generate", "custom.symbol"]),
        execs()
            .with_status(0)
            .with_stdout_contains("    case customSymbol = \"custom.symbol\"")
    );
    assert_that!(
        sfsymbols(&s, &["generate", "Not A Symbol"]),
        execs()
            .with_status(10)
            .with_stderr_contains("[ERROR] `Not A Symbol` is not a valid SF Symbol name")
    );
}

#[test]
fn catalog_from_the_environment() {
    let s = sandbox()
        .file("catalog/symbols.txt", "heart\n")
        .env("SFSYMBOLS_CATALOG", "catalog/symbols.txt")
        .build();

    assert_that!(
        sfsymbols(&s, &["generate", "heart"]),
        execs().with_status(0).with_stdout_contains("    case heart")
    );
    assert_that!(
        sfsymbols(&s, &["generate", "star"]),
        execs()
            .with_status(10)
            .with_stderr_contains("[ERROR] `star` is not a valid SF Symbol name")
    );
}

#[test]
fn missing_catalog_is_a_configuration_error() {
    let s = sandbox().build();

    assert_that!(
        sfsymbols(&s, &["generate", "--catalog", "missing.txt", "star"]),
        execs()
            .with_status(8)
            .with_stderr_contains("[ERROR] Could not read name catalog missing.txt")
    );
}

#[test]
fn names_from_the_config_file() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file(
            "sfsymbols.json",
            r#"{
  "catalog": "symbols.txt",
  "accessLevel": "fileprivate",
  "names": ["drop.fill", "flame.fill"]
}"#,
        )
        .build();

    assert_that!(
        sfsymbols(&s, &["generate"]),
        execs()
            .with_status(0)
            .with_stdout_contains(
                "fileprivate enum SFSymbol: String {
    case dropFill = \"drop.fill\"
    case flameFill = \"flame.fill\""
            )
    );
}

#[test]
fn output_from_the_config_file() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file(
            "sfsymbols.json",
            r#"{ "catalog": "symbols.txt", "names": ["star"], "output": "Sources/SFSymbol.swift" }"#,
        )
        .file("Sources/.keep", "")
        .build();

    assert_that!(
        sfsymbols(&s, &["generate"]),
        execs().with_status(0).with_stdout("")
    );
    assert!(
        s.read("Sources/SFSymbol.swift")
            .starts_with("enum SFSymbol: String {\n    case star\n\n")
    );
}

#[test]
fn non_string_config_names_are_unparseable() {
    let s = sandbox()
        .file("sfsymbols.json", r#"{ "names": ["star", 7] }"#)
        .build();

    assert_that!(
        sfsymbols(&s, &["generate"]),
        execs()
            .with_status(10)
            .with_stderr_contains("[ERROR] Cannot parse SF Symbol names")
    );
}

#[test]
fn no_names_anywhere() {
    let s = sandbox().build();

    assert_that!(
        sfsymbols(&s, &["generate"]),
        execs()
            .with_status(3)
            .with_stderr_contains("[ERROR] No SF Symbol names specified.")
    );
}

#[test]
fn empty_config_names_are_rejected() {
    let s = sandbox().file("sfsymbols.json", r#"{ "names": [] }"#).build();

    assert_that!(
        sfsymbols(&s, &["generate"]),
        execs()
            .with_status(10)
            .with_stderr_contains("[ERROR] Empty SF Symbol names")
    );
}
