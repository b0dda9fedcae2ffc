//! The main implementation crate for sfsymbols.
//!
//! The heart of the crate is [`generator::generate`], a pure function from a
//! [`request::GenerateRequest`] and a name catalog to a
//! [`generator::GeneratedDeclaration`], the Swift `enum SFSymbol`. Everything
//! else is plumbing for the command-line tool: reading `#SFSymbol`
//! invocations out of Swift sources, configuration, logging and error
//! reporting.

pub mod access;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod generator;
pub mod ident;
pub mod invocation;
pub mod log;
pub mod render;
pub mod request;
pub mod session;
pub mod sources;
pub mod style;

pub use sf_symbol_catalog as catalog;

/// Name of the generated Swift type.
pub const TYPE_NAME: &str = "SFSymbol";

/// Name of the Swift macro whose invocations are expanded.
pub const MACRO_NAME: &str = "SFSymbol";
