//! Utilities to use with acceptance tests of the sfsymbols command line.

#[macro_export]
macro_rules! ok_or_panic {
    { $e:expr } => {
        match $e {
            Ok(x) => x,
            Err(err) => panic!("{} failed with {}", stringify!($e), err),
        }
    };
}

pub mod matchers;
pub mod process;
pub mod sandbox;

pub use process::Builder as ProcessBuilder;
pub use process::Error as ProcessError;
pub use sandbox::{Sandbox, sandbox};
