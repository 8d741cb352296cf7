use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Word,
    Pipe,           // |
    RedirectIn,     // <
    RedirectOut,    // >
    RedirectAppend, // >>
    Background,     // &
    Semicolon,      // ;
    AndOperator,    // &&
    OrOperator,     // ||
    Newline,
    EndOfInput,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Word => "WORD",
            TokenKind::Pipe => "PIPE",
            TokenKind::RedirectIn => "REDIRECT_IN",
            TokenKind::RedirectOut => "REDIRECT_OUT",
            TokenKind::RedirectAppend => "REDIRECT_APPEND",
            TokenKind::Background => "BACKGROUND",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::AndOperator => "AND_OPERATOR",
            TokenKind::OrOperator => "OR_OPERATOR",
            TokenKind::Newline => "NEWLINE",
            TokenKind::EndOfInput => "END_OF_INPUT",
        }
    }

    /// 操作符对应的源文本，单词和输入结束没有
    pub fn lexeme(self) -> Option<&'static str> {
        match self {
            TokenKind::Pipe => Some("|"),
            TokenKind::RedirectIn => Some("<"),
            TokenKind::RedirectOut => Some(">"),
            TokenKind::RedirectAppend => Some(">>"),
            TokenKind::Background => Some("&"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::AndOperator => Some("&&"),
            TokenKind::OrOperator => Some("||"),
            TokenKind::Newline => Some("\n"),
            TokenKind::Word | TokenKind::EndOfInput => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    kind: TokenKind,
    value: String,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            value: String::new(),
        }
    }

    pub fn word(value: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Word,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn is_redirect(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::RedirectIn | TokenKind::RedirectOut | TokenKind::RedirectAppend
        )
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Pipe | TokenKind::Semicolon | TokenKind::AndOperator | TokenKind::OrOperator
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token{{type={}, value='{}'}}", self.kind, self.value)
    }
}

/// 除空白外，会结束未加引号单词的字符
const OPERATOR_CHARS: &str = "|&;<>";

/// 与 C 的 `isspace` 一致：ASCII 空白加上垂直制表符
fn is_blank(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars().peekable(),
        }
    }

    /// 返回下一个 token，输入耗尽后每次调用都返回 `EndOfInput`
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.peek_char() {
            None => Token::new(TokenKind::EndOfInput),
            Some(c) => match c {
                '|' => {
                    self.read_char();
                    if self.eat_char('|') {
                        Token::new(TokenKind::OrOperator)
                    } else {
                        Token::new(TokenKind::Pipe)
                    }
                }
                '&' => {
                    self.read_char();
                    if self.eat_char('&') {
                        Token::new(TokenKind::AndOperator)
                    } else {
                        Token::new(TokenKind::Background)
                    }
                }
                '>' => {
                    self.read_char();
                    if self.eat_char('>') {
                        Token::new(TokenKind::RedirectAppend)
                    } else {
                        Token::new(TokenKind::RedirectOut)
                    }
                }
                '<' => {
                    self.read_char();
                    Token::new(TokenKind::RedirectIn)
                }
                ';' => {
                    self.read_char();
                    Token::new(TokenKind::Semicolon)
                }
                '\n' => {
                    self.read_char();
                    Token::new(TokenKind::Newline)
                }
                '"' | '\'' => self.read_quoted_string(),
                _ => self.read_word(),
            },
        }
    }

    /// 扫描全部输入，结果总是以唯一一个 `EndOfInput` 结尾
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind() == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn read_char(&mut self) -> Option<char> {
        self.input.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    fn eat_char(&mut self, expected: char) -> bool {
        self.input.next_if_eq(&expected).is_some()
    }

    // 换行是 token，其余空白直接跳过
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' || !is_blank(c) {
                break;
            }
            self.read_char();
        }
    }

    fn read_word(&mut self) -> Token {
        let mut word = String::new();

        while let Some(c) = self.peek_char() {
            if is_blank(c) || OPERATOR_CHARS.contains(c) {
                break;
            }
            self.read_char();
            if c == '\\' {
                // 结尾的反斜杠没有可转义的字符，直接丢弃
                if let Some(escaped) = self.read_char() {
                    word.push(escaped);
                }
            } else {
                word.push(c);
            }
        }

        Token::word(word)
    }

    fn read_quoted_string(&mut self) -> Token {
        let quote = self.read_char().unwrap_or_default();
        let mut string = String::new();
        let mut escaped = false;

        // 未闭合的引号一直读到输入结束
        while let Some(c) = self.read_char() {
            match (escaped, c) {
                (true, _) => {
                    string.push(c);
                    escaped = false;
                }
                (false, '\\') => escaped = true,
                (false, c) if c == quote => break,
                (false, c) => string.push(c),
            }
        }

        Token::word(string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .iter()
            .map(Token::kind)
            .collect()
    }

    #[test]
    fn test_simple_command() {
        let mut lexer = Lexer::new("ls -l");
        assert_eq!(lexer.next_token(), Token::word("ls"));
        assert_eq!(lexer.next_token(), Token::word("-l"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::EndOfInput));
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut lexer = Lexer::new("ls");
        assert_eq!(lexer.next_token(), Token::word("ls"));
        for _ in 0..3 {
            assert_eq!(lexer.next_token().kind(), TokenKind::EndOfInput);
        }
    }

    #[test]
    fn test_pipe_without_spaces() {
        assert_eq!(
            Lexer::new("a|b").tokenize(),
            vec![
                Token::word("a"),
                Token::new(TokenKind::Pipe),
                Token::word("b"),
                Token::new(TokenKind::EndOfInput),
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("a || b && c >> d"),
            vec![
                TokenKind::Word,
                TokenKind::OrOperator,
                TokenKind::Word,
                TokenKind::AndOperator,
                TokenKind::Word,
                TokenKind::RedirectAppend,
                TokenKind::Word,
                TokenKind::EndOfInput,
            ]
        );
        // 先匹配最长的操作符，再匹配单个
        assert_eq!(
            kinds("|||&&&>>>"),
            vec![
                TokenKind::OrOperator,
                TokenKind::Pipe,
                TokenKind::AndOperator,
                TokenKind::Background,
                TokenKind::RedirectAppend,
                TokenKind::RedirectOut,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_redirections() {
        let mut lexer = Lexer::new("sort < in.txt > out.txt");
        assert_eq!(lexer.next_token(), Token::word("sort"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::RedirectIn));
        assert_eq!(lexer.next_token(), Token::word("in.txt"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::RedirectOut));
        assert_eq!(lexer.next_token(), Token::word("out.txt"));
        assert_eq!(lexer.next_token().kind(), TokenKind::EndOfInput);
    }

    #[test]
    fn test_operators_carry_no_value() {
        for token in Lexer::new("; & | < >").tokenize() {
            assert!(token.value().is_empty(), "{}", token);
        }
    }

    #[test]
    fn test_quoted_strings() {
        let mut lexer = Lexer::new(r#"echo "hello world" 'foo bar'"#);
        assert_eq!(lexer.next_token(), Token::word("echo"));
        assert_eq!(lexer.next_token(), Token::word("hello world"));
        assert_eq!(lexer.next_token(), Token::word("foo bar"));
        assert_eq!(lexer.next_token().kind(), TokenKind::EndOfInput);
    }

    #[test]
    fn test_quotes_hide_operators() {
        assert_eq!(
            Lexer::new("echo 'a | b; c'").tokenize(),
            vec![
                Token::word("echo"),
                Token::word("a | b; c"),
                Token::new(TokenKind::EndOfInput),
            ]
        );
    }

    #[test]
    fn test_escapes() {
        let tokens = Lexer::new(r#"a\ b c\|d "x\"y" 'it\'s'"#).tokenize();
        let values: Vec<&str> = tokens.iter().map(Token::value).collect();
        assert_eq!(values, vec!["a b", "c|d", "x\"y", "it's", ""]);
    }

    #[test]
    fn test_trailing_backslash_is_dropped() {
        assert_eq!(Lexer::new("abc\\").tokenize()[0], Token::word("abc"));
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(
            Lexer::new("echo \"abc | def").tokenize(),
            vec![
                Token::word("echo"),
                Token::word("abc | def"),
                Token::new(TokenKind::EndOfInput),
            ]
        );
    }

    #[test]
    fn test_quote_inside_word_is_literal() {
        assert_eq!(Lexer::new("it's").tokenize()[0], Token::word("it's"));
    }

    #[test]
    fn test_newline_and_blanks() {
        assert_eq!(
            kinds(" a\t\r\nb "),
            vec![
                TokenKind::Word,
                TokenKind::Newline,
                TokenKind::Word,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_single_end_of_input() {
        for input in ["", "   ", "a b", "'", "\\", ";;", "\n"] {
            let tokens = Lexer::new(input).tokenize();
            let ends = tokens
                .iter()
                .filter(|t| t.kind() == TokenKind::EndOfInput)
                .count();
            assert_eq!(ends, 1, "input {:?}", input);
            assert_eq!(tokens.last().map(Token::kind), Some(TokenKind::EndOfInput));
        }
    }

    #[test]
    fn test_only_ascii_whitespace_separates_words() {
        assert_eq!(
            Lexer::new("a\u{a0}b").tokenize(),
            vec![Token::word("a\u{a0}b"), Token::new(TokenKind::EndOfInput)]
        );
        assert_eq!(
            kinds("a\x0bb\x0cc"),
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_token_helpers_and_display() {
        let word = Token::word("ls");
        assert!(word.is_word());
        assert_eq!(word.to_string(), "Token{type=WORD, value='ls'}");

        let append = Token::new(TokenKind::RedirectAppend);
        assert!(append.is_redirect());
        assert!(!append.is_operator());
        assert_eq!(append.kind().lexeme(), Some(">>"));

        assert!(Token::new(TokenKind::OrOperator).is_operator());
        assert!(!Token::new(TokenKind::Background).is_operator());
    }
}
