//! Command-line front end for `highway-lib`.
//!
//! Reads a whitespace-delimited command script, applies it to a [`Session`]
//! and writes one acknowledgement per command.

pub mod logging;
pub mod output;
pub mod protocol;
pub mod session;

pub use output::{Dialect, OutputFormat, Response, ResponseWriter};
pub use protocol::{Command, CommandReader, ProtocolError};
pub use session::Session;
