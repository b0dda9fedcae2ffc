use std::fs::{File, create_dir_all};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::Shell;
use log::info;

use sf_symbols_core::error::{Context, ErrorKind, ExitCode, Fallible};
use sf_symbols_core::session::Session;

use crate::command::Command;

#[derive(clap::Args)]
pub struct Completions {
    /// Shell to generate completions for
    #[arg(index = 1, ignore_case = true, required = true)]
    shell: Shell,

    /// File to write generated completions to
    #[arg(short, long = "output")]
    out_file: Option<PathBuf>,

    /// Write over an existing file, if any.
    #[arg(short, long)]
    force: bool,
}

impl Command for Completions {
    fn run(self, _session: &mut Session) -> Fallible<ExitCode> {
        let mut app = crate::cli::SfSymbols::command();
        let app_name = app.get_name().to_owned();

        match self.out_file {
            Some(path) => {
                if path.is_file() && !self.force {
                    return Err(ErrorKind::CompletionsOutFileError { path }.into());
                }

                // The user may have passed a path that does not yet exist. If
                // so, we create it, informing the user we have done so.
                if let Some(parent) = path.parent().filter(|parent| {
                    !parent.as_os_str().is_empty() && !parent.is_dir()
                }) {
                    info!("{} does not exist, creating it", parent.display());
                    create_dir_all(parent).with_context(|| ErrorKind::OutputWriteError {
                        file: path.clone(),
                    })?;
                }

                let mut file = File::create(&path).with_context(|| {
                    ErrorKind::OutputWriteError { file: path.clone() }
                })?;
                clap_complete::generate(self.shell, &mut app, app_name, &mut file);
            }
            None => clap_complete::generate(self.shell, &mut app, app_name, &mut std::io::stdout()),
        }

        Ok(ExitCode::Success)
    }
}
