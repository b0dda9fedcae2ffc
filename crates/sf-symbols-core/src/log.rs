//! This module provides a custom Logger implementation for use with the `log` crate
use std::env;
use std::fmt::Display;
use std::io::IsTerminal;

use console::style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use textwrap::{Options, WordSplitter, fill};

use crate::style::{MAX_WIDTH, text_width};

const ERROR_PREFIX: &str = "error:";
const WARNING_PREFIX: &str = "warning:";
const SFSYMBOLS_LOGLEVEL: &str = "SFSYMBOLS_LOGLEVEL";
const ALLOWED_TARGETS: [&str; 3] = ["sfsymbols", "sf_symbols_core", "sf_symbol_catalog"];
const WRAP_INDENT: &str = "    ";

/// Represents the level of verbosity that was requested by the user
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogVerbosity {
    Quiet,
    Default,
    Verbose,
    VeryVerbose,
}

pub struct Logger {
    level: LevelFilter,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        let level_allowed = self.enabled(record.metadata());
        let is_valid_target = ALLOWED_TARGETS
            .iter()
            .any(|target| record.target().starts_with(target));

        if level_allowed && is_valid_target {
            match record.level() {
                Level::Error => eprintln!(
                    "{} {}",
                    style(ERROR_PREFIX).red().bold(),
                    record.args()
                ),
                Level::Warn => eprintln!(
                    "{} {}",
                    style(WARNING_PREFIX).yellow().bold(),
                    wrap_content(WARNING_PREFIX, record.args())
                ),
                // all info-level messages go to stdout
                Level::Info => println!("{}", record.args()),
                // all debug- and trace-level messages go to stderr
                Level::Debug => eprintln!("[verbose] {}", record.args()),
                Level::Trace => eprintln!("[trace] {}", record.args()),
            }
        }
    }

    fn flush(&self) {}
}

impl Logger {
    /// Initialize the global logger with a Logger instance
    /// Will use the requested level of Verbosity
    /// If set to Default, will use the environment to determine the level of verbosity
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger was already installed.
    pub fn init(verbosity: LogVerbosity) -> Result<(), SetLoggerError> {
        let logger = Self::new(verbosity);
        log::set_max_level(logger.level);
        log::set_boxed_logger(Box::new(logger))?;
        Ok(())
    }

    fn new(verbosity: LogVerbosity) -> Self {
        let level = match verbosity {
            LogVerbosity::Quiet => LevelFilter::Error,
            LogVerbosity::Default => level_from_env(),
            LogVerbosity::Verbose => LevelFilter::Debug,
            LogVerbosity::VeryVerbose => LevelFilter::Trace,
        };

        Self { level }
    }
}

/// Wraps the supplied content to the terminal width, if we are in a terminal.
/// If not, returns the content as a String
///
/// Note: Uses the supplied prefix to calculate the terminal width, but then removes
/// it so that it can be styled (style characters are counted against the wrapped width)
fn wrap_content<D>(prefix: &str, content: &D) -> String
where
    D: Display + ?Sized,
{
    text_width().map_or_else(
        || content.to_string(),
        |width| wrap_to(width, prefix, content),
    )
}

fn wrap_to<D>(width: usize, prefix: &str, content: &D) -> String
where
    D: Display + ?Sized,
{
    let options = Options::new(width.min(MAX_WIDTH))
        .word_splitter(WordSplitter::NoHyphenation)
        .subsequent_indent(WRAP_INDENT);

    fill(&format!("{prefix} {content}"), options)
        .chars()
        .skip(prefix.len() + 1)
        .collect()
}

/// Determines the correct logging level based on the environment
/// If `SFSYMBOLS_LOGLEVEL` is set to a valid level, we use that
/// If not, we check the current stdout to determine whether it is a TTY or not
///     If it is a TTY, we use Info
///     If it is NOT a TTY, we use Error as we don't want to show warnings when running as a script
fn level_from_env() -> LevelFilter {
    env::var(SFSYMBOLS_LOGLEVEL)
        .ok()
        .and_then(|level| level.to_uppercase().parse().ok())
        .unwrap_or_else(|| {
            if std::io::stdout().is_terminal() {
                LevelFilter::Info
            } else {
                LevelFilter::Error
            }
        })
}
