use std::path::PathBuf;

use log::{error, info};
use sf_symbols_core::error::{ErrorKind, ExitCode, Fallible};
use sf_symbols_core::generator::generate;
use sf_symbols_core::request::GenerateRequest;
use sf_symbols_core::session::Session;

use crate::command::{Command, write_output};

#[derive(clap::Args)]
pub struct Generate {
    /// Symbol names, like `star` or `star.square.on.square`
    #[arg(value_name = "NAME")]
    names: Vec<String>,

    /// Access level of the generated enum: private, fileprivate, internal or public
    #[arg(long, short, value_name = "LEVEL")]
    access: Option<String>,

    /// Name catalog to validate against
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// File to write the enum to, instead of stdout
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl Command for Generate {
    fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        let config = session.config()?;

        let request = if self.names.is_empty() {
            match config.filter(|config| config.has_names()) {
                Some(config) => config.request(),
                None => return Err(ErrorKind::NoNamesSpecified.into()),
            }
        } else {
            let request = GenerateRequest::new(self.names);
            Ok(match config.and_then(|config| config.access_level()) {
                Some(tag) => request.with_access_level(tag),
                None => request,
            })
        };

        let catalog = session.catalog(self.catalog.as_deref())?;
        let declaration = request.and_then(|request| {
            let request = match self.access {
                Some(tag) => request.with_access_level(tag),
                None => request,
            };
            generate(&request, catalog)
        });

        let declaration = match declaration {
            Ok(declaration) => declaration,
            Err(diagnostic) => {
                error!("{diagnostic}");
                return Err(ErrorKind::GenerationFailed { count: 1 }.into());
            }
        };

        match self.output.or_else(|| config.and_then(|config| config.output())) {
            Some(file) => {
                write_output(&file, &declaration.render())?;
                info!(
                    "Wrote {} SF Symbol cases to {}",
                    declaration.cases().len(),
                    file.display()
                );
            }
            None => print!("{declaration}"),
        }

        Ok(ExitCode::Success)
    }
}
