use clap::{Parser, builder::styling};

use crate::command::{self, Command};
use sf_symbols_core::error::{ExitCode, Fallible};
use sf_symbols_core::session::Session;
use sf_symbols_core::style::{MAX_WIDTH, text_width};

#[derive(Parser)]
#[command(
    name = "sfsymbols",
    about = "Type-safe SF Symbol enums for Swift",
    long_about = "Type-safe SF Symbol enums for Swift

    To print an enum for a few symbols, use `sfsymbols generate star star.fill`.
    To expand the #SFSymbol invocations in a Swift file, use `sfsymbols expand`.",
    version,
    disable_version_flag = true,
    styles = styles(),
    term_width = text_width().unwrap_or(MAX_WIDTH),
)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally bools
pub struct SfSymbols {
    #[command(subcommand)]
    pub(crate) command: Option<Subcommand>,

    /// Enables verbose diagnostics
    #[arg(long, global = true)]
    pub(crate) verbose: bool,

    /// Enables trace-level diagnostics.
    #[arg(long, global = true, requires = "verbose")]
    pub(crate) very_verbose: bool,

    /// Prevents unnecessary output
    #[arg(
        long,
        global = true,
        conflicts_with = "verbose",
        aliases = &["silent"]
    )]
    pub(crate) quiet: bool,

    /// Prints the current version of sfsymbols
    #[arg(short, long)]
    pub(crate) version: bool,
}

impl SfSymbols {
    pub(crate) fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        if self.version {
            // suffix indicator for dev build
            if cfg!(debug_assertions) {
                println!("{}-dev", env!("CARGO_PKG_VERSION"));
            } else {
                println!("{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(ExitCode::Success)
        } else if let Some(command) = self.command {
            command.run(session)
        } else {
            Self::parse_from(["sfsymbols", "help"].iter()).run(session)
        }
    }
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Prints the SFSymbol enum for the given symbol names
    ///
    /// Names are taken from the command line, or else from the `names` list in
    /// the closest `sfsymbols.json`.
    Generate(command::Generate),

    /// Expands the #SFSymbol invocations in a Swift source file
    Expand(command::Expand),

    /// Validates the #SFSymbol invocations in Swift sources without expanding them
    Check(command::Check),

    /// Generates sfsymbols completions
    ///
    /// If you specify a file, the completions will be written there;
    /// otherwise, they will be written to `stdout`.
    #[command(arg_required_else_help = true)]
    Completions(command::Completions),
}

impl Subcommand {
    pub(crate) fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        match self {
            Self::Generate(generate) => generate.run(session),
            Self::Expand(expand) => expand.run(session),
            Self::Check(check) => check.run(session),
            Self::Completions(completions) => completions.run(session),
        }
    }
}

fn styles() -> styling::Styles {
    styling::Styles::plain()
        .header(
            styling::AnsiColor::Yellow.on_default()
                | styling::Effects::BOLD
                | styling::Effects::ITALIC,
        )
        .usage(
            styling::AnsiColor::Yellow.on_default()
                | styling::Effects::BOLD
                | styling::Effects::ITALIC,
        )
        .literal(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::BrightBlue.on_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        SfSymbols::command().debug_assert();
    }

    #[test]
    fn very_verbose_requires_verbose() {
        assert!(SfSymbols::try_parse_from(["sfsymbols", "--very-verbose", "check", "."]).is_err());
        assert!(
            SfSymbols::try_parse_from(["sfsymbols", "--verbose", "--very-verbose", "check", "."])
                .is_ok()
        );
    }
}
