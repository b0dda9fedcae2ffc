use std::path::PathBuf;

use log::{info, warn};
use sf_symbols_core::error::{ErrorKind, ExitCode, Fallible};
use sf_symbols_core::invocation::expand_source;
use sf_symbols_core::session::Session;
use sf_symbols_core::sources::SourceFile;

use crate::command::{Command, print_diagnostics, write_output};

#[derive(clap::Args)]
pub struct Expand {
    /// Swift source containing #SFSymbol invocations
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// File to write the expanded source to, instead of stdout
    #[arg(long, short, value_name = "PATH", conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite the input file with the expanded source
    #[arg(long, short)]
    in_place: bool,

    /// Name catalog to validate against
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
}

impl Command for Expand {
    fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        let source = SourceFile::read(&self.input)?;
        let catalog = session.catalog(self.catalog.as_deref())?;

        let expansion = match expand_source(&source.text, catalog) {
            Ok(expansion) => expansion,
            Err(diagnostics) => {
                print_diagnostics(&source.path, &source.text, &diagnostics);
                return Err(ErrorKind::GenerationFailed {
                    count: diagnostics.len(),
                }
                .into());
            }
        };

        if expansion.count == 0 {
            warn!(
                "No #SFSymbol invocations found in {}",
                source.path.display()
            );
        }

        let target = if self.in_place {
            Some(self.input)
        } else {
            self.output
        };

        match target {
            Some(file) => {
                write_output(&file, &expansion.text)?;
                info!(
                    "Expanded {} invocations into {}",
                    expansion.count,
                    file.display()
                );
            }
            None => print!("{}", expansion.text),
        }

        Ok(ExitCode::Success)
    }
}
