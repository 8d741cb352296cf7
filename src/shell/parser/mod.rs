//! Front end of the shell: text is scanned into [`Token`]s by the [`Lexer`],
//! and the [`Parser`] turns them into a single [`Command`] tree.

pub mod ast;
pub mod error;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;

pub use ast::{Command, CommandKind, RedirectKind, Redirection, SimpleCommand};
pub use error::ParseError;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

/// Scans `text` into tokens, ending with a single `EndOfInput`.
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}

/// Parses one line into a command tree.
pub fn parse(text: &str) -> Result<Command, ParseError> {
    Parser::new(text).parse()
}
