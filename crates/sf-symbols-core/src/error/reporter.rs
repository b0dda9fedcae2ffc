use std::error::Error;

use super::SymbolsError;
use crate::style::format_error_cause;
use log::{debug, error};

/// Report an error to the console, with its causes as verbose details
pub fn report_error(err: &SymbolsError) {
    error!("{err}");

    if let Some(details) = compose_error_details(err) {
        debug!("{details}");
    }
}

fn compose_error_details(err: &SymbolsError) -> Option<String> {
    // Only compose details if there is an underlying cause for the error
    let mut current = err.source()?;
    let mut details = String::new();

    // Walk up the tree of causes and include all of them
    loop {
        details.push_str(&format_error_cause(current));

        match current.source() {
            Some(cause) => {
                details.push_str("\n\n");
                current = cause;
            }
            None => {
                break;
            }
        }
    }

    Some(details)
}
