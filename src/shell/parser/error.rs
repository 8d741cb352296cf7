use thiserror::Error;

use super::ast::RedirectKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Parse error: Expected a command")]
    ExpectedCommand,

    #[error("Parse error: Expected filename after {0}")]
    ExpectedFilename(RedirectKind),

    #[error("Parse error: Unexpected tokens at end of input")]
    UnexpectedTrailingTokens,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ParseError::ExpectedCommand.to_string(),
            "Parse error: Expected a command"
        );
        assert_eq!(
            ParseError::ExpectedFilename(RedirectKind::Append).to_string(),
            "Parse error: Expected filename after >>"
        );
        assert_eq!(
            ParseError::UnexpectedTrailingTokens.to_string(),
            "Parse error: Unexpected tokens at end of input"
        );
    }
}
