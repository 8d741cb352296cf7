//! A small shell front end.
//!
//! [`shell::parser`] turns one line of input into a typed [`Command`] tree;
//! the binary wraps it in an interactive prompt.

pub mod shell;
pub mod utils;

pub use shell::parser::{parse, tokenize, Command, ParseError, Token};
