use std::path::PathBuf;

use log::{debug, info};
use sf_symbols_core::error::{ErrorKind, ExitCode, Fallible};
use sf_symbols_core::invocation::check_source;
use sf_symbols_core::session::Session;
use sf_symbols_core::sources::{SourceFile, swift_files};

use crate::command::{Command, print_diagnostics};

#[derive(clap::Args)]
pub struct Check {
    /// Swift files, or directories to search for `*.swift` files
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Name catalog to validate against
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
}

impl Command for Check {
    fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        let files = swift_files(&self.paths)?;
        let catalog = session.catalog(self.catalog.as_deref())?;
        let mut failures = 0;

        for file in &files {
            let source = SourceFile::read(file)?;
            let diagnostics = check_source(&source.text, catalog);
            debug!(
                "{}: {} problems",
                source.path.display(),
                diagnostics.len()
            );
            print_diagnostics(&source.path, &source.text, &diagnostics);
            failures += diagnostics.len();
        }

        if failures > 0 {
            return Err(ErrorKind::GenerationFailed { count: failures }.into());
        }

        info!("Checked {} Swift sources", files.len());
        Ok(ExitCode::Success)
    }
}
