pub mod check;
pub mod completions;
pub mod expand;
pub mod generate;

pub use check::Check;
pub use completions::Completions;
pub use expand::Expand;
pub use generate::Generate;

use std::fs;
use std::path::Path;

use sf_symbols_core::diagnostic::Diagnostic;
use sf_symbols_core::error::{Context, ErrorKind, ExitCode, Fallible};
use sf_symbols_core::session::Session;
use sf_symbols_core::style::format_diagnostic;

/// An sfsymbols command.
pub trait Command: Sized {
    /// Executes the command. Returns `Ok(ExitCode::Success)` if the process
    /// should return 0, and `Err(e)` if the process should return
    /// `e.exit_code()`.
    fn run(self, session: &mut Session) -> Fallible<ExitCode>;
}

/// Prints each diagnostic against the source it came from.
fn print_diagnostics(path: &Path, source: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}\n", format_diagnostic(path, source, diagnostic));
    }
}

fn write_output(file: &Path, contents: &str) -> Fallible<()> {
    fs::write(file, contents).with_context(|| ErrorKind::OutputWriteError {
        file: file.to_owned(),
    })
}
