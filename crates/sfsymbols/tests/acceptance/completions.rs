use crate::support::sfsymbols;
use hamcrest2::assert_that;
use hamcrest2::prelude::*;
use test_support::matchers::execs;
use test_support::sandbox;

#[test]
fn prints_to_stdout() {
    let s = sandbox().build();

    assert_that!(
        sfsymbols(&s, &["completions", "bash"]),
        execs()
            .with_status(0)
            .with_stdout_contains("[..]_sfsymbols()[..]")
    );
}

#[test]
fn writes_to_a_new_directory() {
    let s = sandbox().build();

    assert_that!(
        sfsymbols(&s, &["completions", "zsh", "-o", "completions/_sfsymbols"]),
        execs().with_status(0)
    );
    assert!(s.read("completions/_sfsymbols").contains("#compdef sfsymbols"));
}

#[test]
fn existing_files_need_force() {
    let s = sandbox().file("sfsymbols.bash", "# old\n").build();

    assert_that!(
        sfsymbols(&s, &["completions", "bash", "-o", "sfsymbols.bash"]),
        execs()
            .with_status(3)
            .with_stderr_contains("[ERROR] Completions file `sfsymbols.bash` already exists.")
    );
    assert_eq!(s.read("sfsymbols.bash"), "# old\n");

    assert_that!(
        sfsymbols(&s, &["completions", "bash", "-o", "sfsymbols.bash", "--force"]),
        execs().with_status(0)
    );
    assert!(s.exists("sfsymbols.bash"));
    assert!(s.read("sfsymbols.bash").contains("_sfsymbols()"));
}
