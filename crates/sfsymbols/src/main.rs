mod cli;
mod command;

use clap::Parser;
use sf_symbols_core::error::report_error;
use sf_symbols_core::log::{LogVerbosity, Logger};
use sf_symbols_core::session::Session;

pub fn main() {
    let sfsymbols = cli::SfSymbols::parse();
    let verbosity = match (sfsymbols.verbose, sfsymbols.very_verbose, sfsymbols.quiet) {
        (_, true, _) => LogVerbosity::VeryVerbose,
        (true, false, _) => LogVerbosity::Verbose,
        (false, false, true) => LogVerbosity::Quiet,
        (false, false, false) => LogVerbosity::Default,
    };

    if Logger::init(verbosity).is_err() {
        eprintln!("sfsymbols: a logger was already installed");
    }

    let mut session = Session::init();
    let exit_code = sfsymbols.run(&mut session).unwrap_or_else(|err| {
        report_error(&err);
        err.exit_code()
    });
    exit_code.exit();
}
