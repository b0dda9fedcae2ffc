use test_support::{ProcessBuilder, Sandbox};

/// A catalog holding every name the acceptance tests treat as valid.
pub const CATALOG: &str = "# SF Symbols used by the acceptance tests
star
star.fill
star.square.on.square
case
heart
drop.fill
flame.fill
";

/// Runs the sfsymbols binary under test inside `sandbox`.
pub fn sfsymbols(sandbox: &Sandbox, args: &[&str]) -> ProcessBuilder {
    let mut process = sandbox.process(env!("CARGO_BIN_EXE_sfsymbols"));
    process.args(args);
    process
}
