//! Command-interpretation core of the `ish` shell.
//!
//! [`parser::parse_line`] turns one line into a [`Pipeline`]; [`eval::eval`] runs it in
//! a child process with the requested redirections and waits for it.

pub mod builtin;
pub mod eval;
pub mod job;
pub mod parser;
pub mod types;

pub use eval::{eval, run, ExecError};
pub use parser::{parse_line, ParseError};
pub use types::{Command, Pipeline, RedirectType};
