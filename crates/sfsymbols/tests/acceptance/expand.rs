use crate::support::{CATALOG, sfsymbols};
use hamcrest2::assert_that;
use hamcrest2::prelude::*;
use test_support::matchers::execs;
use test_support::sandbox;

const CONTENT_VIEW: &str = r#"import SwiftUI

struct ContentView: View {
    #SFSymbol(accessLevel: .public, names: ["drop.fill", "flame.fill"])

    var body: some View {
        SFSymbol.dropFill.image()
    }
}
"#;

const BUILDER: &str = r#"import SwiftUI

#SFSymbol {
    "star"
    "case"
    "star.square.on.square"
}
"#;

#[test]
fn prints_the_expanded_source() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file("ContentView.swift", CONTENT_VIEW)
        .build();

    assert_that!(
        sfsymbols(&s, &["expand", "--catalog", "symbols.txt", "ContentView.swift"]),
        execs()
            .with_status(0)
            .with_stdout_contains(
                "struct ContentView: View {
    public enum SFSymbol: String {
        case dropFill = \"drop.fill\"
        case flameFill = \"flame.fill\"

        public var name: String {
            self.rawValue
        }"
            )
            .with_stdout_contains(
                "        #endif
    }

    var body: some View {"
            )
            .with_stdout_does_not_contain("[..]#SFSymbol[..]")
    );
}

#[test]
fn builder_blocks_expand_in_place() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file("Sources/Symbols.swift", BUILDER)
        .build();

    assert_that!(
        sfsymbols(
            &s,
            &["expand", "--catalog", "symbols.txt", "--in-place", "Sources/Symbols.swift"]
        ),
        execs().with_status(0).with_stdout("")
    );

    let expanded = s.read("Sources/Symbols.swift");
    assert!(expanded.starts_with(
        "import SwiftUI

enum SFSymbol: String {
    case star
    case `case`
    case starSquareOnSquare = \"star.square.on.square\"
"
    ));
    assert!(expanded.ends_with("    #endif\n}\n"));
}

#[test]
fn output_file() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file("Symbols.swift", BUILDER)
        .build();

    assert_that!(
        sfsymbols(
            &s,
            &["expand", "--catalog", "symbols.txt", "Symbols.swift", "-o", "Generated.swift"]
        ),
        execs().with_status(0)
    );

    assert_eq!(s.read("Symbols.swift"), BUILDER);
    assert!(s.read("Generated.swift").contains("    case `case`\n"));
}

#[test]
fn failures_point_into_the_source() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file(
            "Symbols.swift",
            "import SwiftUI\n\n#SFSymbol {\n    \"star\"\n    \"nope\"\n}\n",
        )
        .build();

    assert_that!(
        sfsymbols(&s, &["expand", "--catalog", "symbols.txt", "--in-place", "Symbols.swift"]),
        execs()
            .with_status(10)
            .with_stdout("")
            .with_stderr_contains(
                "[ERROR] `nope` is not a valid SF Symbol name
[ARROW] Symbols.swift:5:5
  |
5 |     \"nope\"
  |     ^^^^^^"
            )
            .with_stderr_contains("[ERROR] Could not generate SF Symbols due to 1 previous error")
    );

    assert!(s.read("Symbols.swift").contains("#SFSymbol {"));
}

#[test]
fn doc_comments_and_raw_strings() {
    let s = sandbox()
        .file("symbols.txt", CATALOG)
        .file(
            "Symbols.swift",
            r##"#SFSymbol(accessLevel: AccessLevel.public) {
    /// The favourite.
    #"star"#
    "heart"
}
"##,
        )
        .build();

    assert_that!(
        sfsymbols(&s, &["expand", "--catalog", "symbols.txt", "Symbols.swift"]),
        execs()
            .with_status(0)
            .with_stdout_contains(
                "public enum SFSymbol: String {
    case star
    case heart
"
            )
    );
}

#[test]
fn interpolated_names_are_unparseable() {
    let s = sandbox()
        .file(
            "Symbols.swift",
            "let style = \"fill\"\n#SFSymbol([\"star.\\(style)\"])\n",
        )
        .build();

    assert_that!(
        sfsymbols(&s, &["expand", "Symbols.swift"]),
        execs()
            .with_status(10)
            .with_stderr_contains("[ERROR] Cannot parse SF Symbol names")
            .with_stderr_contains("[ARROW] Symbols.swift:2:[..]")
    );
}

#[test]
fn missing_input() {
    let s = sandbox().build();

    assert_that!(
        sfsymbols(&s, &["expand", "Missing.swift"]),
        execs()
            .with_status(7)
            .with_stderr_contains("[ERROR] Could not read Swift source Missing.swift")
    );
}

#[test]
fn in_place_conflicts_with_output() {
    let s = sandbox().file("Symbols.swift", BUILDER).build();

    assert_that!(
        sfsymbols(&s, &["expand", "Symbols.swift", "--in-place", "-o", "Out.swift"]),
        execs().with_status(2)
    );
}
