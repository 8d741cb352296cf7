use log::debug;

use super::ast::{Command, RedirectKind, Redirection, SimpleCommand};
use super::error::ParseError;
use super::lexer::{Lexer, Token, TokenKind};

/// 基于完整 token 序列的递归下降解析器
///
/// 优先级从低到高：`;`（末尾可带 `&`）、`||`、`&&`、`|`，均为左结合
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Self::from_tokens(Lexer::new(input).tokenize())
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    pub fn parse(mut self) -> Result<Command, ParseError> {
        let result = self.parse_complete();
        match &result {
            Ok(command) => debug!("解析成功: {:?}", command),
            Err(e) => debug!("解析失败 (token {}): {}", self.current, e),
        }
        result
    }

    fn parse_complete(&mut self) -> Result<Command, ParseError> {
        let command = self.parse_command()?;
        if !self.is_at_end() {
            return Err(ParseError::UnexpectedTrailingTokens);
        }
        Ok(command)
    }

    // command := logicalOr (';' logicalOr)* ['&']
    fn parse_command(&mut self) -> Result<Command, ParseError> {
        let mut command = self.parse_logical_or()?;

        while self.eat(TokenKind::Semicolon) {
            let right = self.parse_logical_or()?;
            command = Command::sequence(command, right);
        }

        // 只标记最外层节点，不标记 `;` 分隔的各个子命令
        if self.eat(TokenKind::Background) {
            command.set_background();
        }

        Ok(command)
    }

    fn parse_logical_or(&mut self) -> Result<Command, ParseError> {
        let mut command = self.parse_logical_and()?;

        while self.eat(TokenKind::OrOperator) {
            let right = self.parse_logical_and()?;
            command = Command::logical_or(command, right);
        }

        Ok(command)
    }

    fn parse_logical_and(&mut self) -> Result<Command, ParseError> {
        let mut command = self.parse_pipeline()?;

        while self.eat(TokenKind::AndOperator) {
            let right = self.parse_pipeline()?;
            command = Command::logical_and(command, right);
        }

        Ok(command)
    }

    fn parse_pipeline(&mut self) -> Result<Command, ParseError> {
        let mut command = self.parse_simple_command()?;

        while self.eat(TokenKind::Pipe) {
            let right = self.parse_simple_command()?;
            command = Command::pipeline(command, right);
        }

        Ok(command)
    }

    fn parse_simple_command(&mut self) -> Result<Command, ParseError> {
        // 解析命令名
        let has_name = self
            .peek()
            .is_some_and(|token| token.is_word() && !token.value().is_empty());
        if !has_name {
            return Err(ParseError::ExpectedCommand);
        }
        let mut command = SimpleCommand::new(self.advance().into_value());

        // 解析参数和重定向
        loop {
            match self.peek_kind() {
                Some(TokenKind::Word) => {
                    command.arguments.push(self.advance().into_value());
                }
                Some(TokenKind::RedirectIn) => {
                    let redirection = self.parse_redirection(RedirectKind::Input)?;
                    command.redirections.push(redirection);
                }
                Some(TokenKind::RedirectOut) => {
                    let redirection = self.parse_redirection(RedirectKind::Output)?;
                    command.redirections.push(redirection);
                }
                Some(TokenKind::RedirectAppend) => {
                    let redirection = self.parse_redirection(RedirectKind::Append)?;
                    command.redirections.push(redirection);
                }
                _ => break,
            }
        }

        Ok(Command::simple(command))
    }

    fn parse_redirection(&mut self, kind: RedirectKind) -> Result<Redirection, ParseError> {
        self.advance(); // 跳过重定向操作符

        match self.peek_kind() {
            Some(TokenKind::Word) => Ok(Redirection::new(kind, self.advance().into_value())),
            _ => Err(ParseError::ExpectedFilename(kind)),
        }
    }

    /// 当前 token，只剩 `EndOfInput` 时返回 `None`
    fn peek(&self) -> Option<&Token> {
        self.tokens
            .get(self.current)
            .filter(|token| token.kind() != TokenKind::EndOfInput)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(Token::kind)
    }

    /// 取出当前 token，调用前应先 `peek`；到达末尾时返回 `EndOfInput` 占位
    fn advance(&mut self) -> Token {
        if self.is_at_end() {
            return Token::new(TokenKind::EndOfInput);
        }
        let token = std::mem::replace(
            &mut self.tokens[self.current],
            Token::new(TokenKind::EndOfInput),
        );
        self.current += 1;
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }
}
