//! Lexer (tokenizer) for C source code
//!
//! Turns raw source text into [`Token`]s, one per [`Lexer::next_token`] call.
//! The scanner looks at most one character past the cursor. Whitespace and
//! comments are skipped; newlines are reported as their own token so that a
//! consumer can see line structure if it wants to.
//!
//! Multi-character operators use longest match: `<=` is one token, never `<`
//! followed by `=`.

use super::ast::SourceLocation;
use super::token::{Token, TokenKind};
use thiserror::Error;

/// Lexical errors. Each carries the location of the offending construct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("lexical error at {location}: unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, location: SourceLocation },

    #[error("lexical error at {location}: unterminated string literal")]
    UnterminatedString { location: SourceLocation },

    #[error("lexical error at {location}: unterminated character literal")]
    UnterminatedChar { location: SourceLocation },

    #[error("lexical error at {location}: unterminated block comment")]
    UnterminatedComment { location: SourceLocation },

    #[error("lexical error at {location}: malformed number '{text}' (more than one decimal point)")]
    MultipleDecimalPoints { text: String, location: SourceLocation },

    #[error("lexical error at {location}: malformed number '{text}' (expected a digit after '.')")]
    MissingFractionDigits { text: String, location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. }
            | LexError::UnterminatedString { location }
            | LexError::UnterminatedChar { location }
            | LexError::UnterminatedComment { location }
            | LexError::MultipleDecimalPoints { location, .. }
            | LexError::MissingFractionDigits { location, .. } => *location,
        }
    }
}

/// Character-level scanner over an owned copy of the source.
///
/// A trailing newline is appended to the input so every line is terminated.
/// Once the cursor runs off the end, `current` stays `None` and every further
/// call to [`Lexer::next_token`] yields an end-of-input token.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current: Option<char>,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(source: &str) -> Self {
        let mut input: Vec<char> = source.chars().collect();
        input.push('\n');
        let current = input.first().copied();
        Self {
            input,
            position: 0,
            current,
            line: 1,
            column: 1,
        }
    }

    /// Produce the next token.
    ///
    /// After an error the cursor has moved past the offending input, so the
    /// caller may keep calling to collect further diagnostics.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let result = self.scan_token();
        match &result {
            Ok(token) => {
                tracing::trace!(kind = ?token.kind, text = %token.text.escape_debug(), line = token.location.line, col = token.location.column, "token");
            }
            Err(err) => {
                tracing::debug!(line = err.location().line, col = err.location().column, "lexer error: {}", err);
            }
        }
        result
    }

    /// Tokenize the entire input, stopping at the first error.
    ///
    /// The returned vector always ends with an [`TokenKind::Eof`] token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scan to the end of input, collecting every token and every error.
    pub fn scan_all(&mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        loop {
            match self.next_token() {
                Ok(token) => {
                    let done = token.is(TokenKind::Eof);
                    tokens.push(token);
                    if done {
                        break;
                    }
                }
                Err(err) => errors.push(err),
            }
        }
        (tokens, errors)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let location = self.current_location();
        let Some(ch) = self.current else {
            return Ok(Token::new(TokenKind::Eof, "", location));
        };
        let start = self.position;

        let kind = match ch {
            '\n' => TokenKind::Newline,

            '"' => {
                let text = self.quoted('"', location)?;
                self.advance(); // closing quote
                return Ok(Token::new(TokenKind::String, text, location));
            }
            // Character literals share the string category
            '\'' => {
                let text = self.quoted('\'', location)?;
                self.advance();
                return Ok(Token::new(TokenKind::String, text, location));
            }

            '0'..='9' => self.number(start, location)?,
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(start),

            // Longest match, alternatives in priority order
            '-' => self.longest_match(
                &[
                    ('-', TokenKind::MinusMinus),
                    ('=', TokenKind::MinusEq),
                    ('>', TokenKind::Arrow),
                ],
                TokenKind::Minus,
            ),
            '+' => self.longest_match(
                &[('+', TokenKind::PlusPlus), ('=', TokenKind::PlusEq)],
                TokenKind::Plus,
            ),
            '*' => self.longest_match(&[('=', TokenKind::StarEq)], TokenKind::Star),
            '/' => self.longest_match(&[('=', TokenKind::SlashEq)], TokenKind::Slash),
            '%' => self.longest_match(&[('=', TokenKind::PercentEq)], TokenKind::Percent),
            '&' => self.longest_match(&[('&', TokenKind::AndAnd)], TokenKind::Amp),
            '|' => self.longest_match(&[('|', TokenKind::OrOr)], TokenKind::Pipe),
            '=' => self.longest_match(&[('=', TokenKind::EqEq)], TokenKind::Eq),
            '!' => self.longest_match(&[('=', TokenKind::NotEq)], TokenKind::Bang),
            '<' => self.longest_match(
                &[('=', TokenKind::Le), ('<', TokenKind::LtLt)],
                TokenKind::Lt,
            ),
            '>' => self.longest_match(
                &[('=', TokenKind::Ge), ('>', TokenKind::GtGt)],
                TokenKind::Gt,
            ),

            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '.' => TokenKind::Dot,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '^' => TokenKind::Caret,
            '~' => TokenKind::Tilde,

            _ => {
                self.advance();
                return Err(LexError::UnexpectedCharacter { ch, location });
            }
        };

        // The cursor sits on the last character of the lexeme.
        let text = self.lexeme(start);
        self.advance();
        Ok(Token::new(kind, text, location))
    }

    /// Pick a two-character operator when the next character completes one.
    fn longest_match(&mut self, alternatives: &[(char, TokenKind)], single: TokenKind) -> TokenKind {
        let next = self.peek();
        for &(second, kind) in alternatives {
            if next == Some(second) {
                self.advance();
                return kind;
            }
        }
        single
    }

    /// Scan a quoted literal, decoding escapes. Starts on the opening quote
    /// and stops on the closing one.
    fn quoted(&mut self, quote: char, location: SourceLocation) -> Result<String, LexError> {
        let unterminated = || {
            if quote == '"' {
                LexError::UnterminatedString { location }
            } else {
                LexError::UnterminatedChar { location }
            }
        };

        let mut text = String::new();
        self.advance();
        loop {
            match self.current {
                None => return Err(unterminated()),
                Some(c) if c == quote => return Ok(text),
                Some('\\') => {
                    self.advance();
                    let escaped = self.current.ok_or_else(unterminated)?;
                    text.push(unescape(escaped));
                    self.advance();
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Digits with at most one interior decimal point. The raw text is kept;
    /// interpreting it is left to the parser.
    fn number(&mut self, start: usize, location: SourceLocation) -> Result<TokenKind, LexError> {
        let mut seen_dot = false;
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => self.advance(),
                Some('.') => {
                    self.advance();
                    if seen_dot {
                        let text = self.lexeme(start);
                        self.advance();
                        return Err(LexError::MultipleDecimalPoints { text, location });
                    }
                    if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        let text = self.lexeme(start);
                        self.advance();
                        return Err(LexError::MissingFractionDigits { text, location });
                    }
                    seen_dot = true;
                }
                _ => return Ok(TokenKind::Number),
            }
        }
    }

    fn identifier_or_keyword(&mut self, start: usize) -> TokenKind {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        TokenKind::keyword(&self.lexeme(start)).unwrap_or(TokenKind::Identifier)
    }

    /// Comments may be followed by more whitespace and more comments, so
    /// keep going until neither applies.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            self.skip_whitespace();
            if !self.skip_comment()? {
                return Ok(());
            }
        }
    }

    /// Spaces, tabs and carriage returns. Newlines are significant.
    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(' ' | '\t' | '\r')) {
            self.advance();
        }
    }

    /// Skip one comment if the cursor is on one. Returns whether it did.
    fn skip_comment(&mut self) -> Result<bool, LexError> {
        if self.current != Some('/') {
            return Ok(false);
        }
        match self.peek() {
            Some('/') => {
                // Line comment; the newline itself is left for the next token
                while !matches!(self.current, Some('\n') | None) {
                    self.advance();
                }
                Ok(true)
            }
            Some('*') => {
                let start = self.current_location();
                self.advance(); // skip '/'
                self.advance(); // skip '*'
                loop {
                    match self.current {
                        None => return Err(LexError::UnterminatedComment { location: start }),
                        Some('*') if self.peek() == Some('/') => {
                            self.advance(); // skip '*'
                            self.advance(); // skip '/'
                            return Ok(true);
                        }
                        Some(_) => self.advance(),
                    }
                }
            }
            _ => Ok(false),
        }
    }

    fn lexeme(&self, start: usize) -> String {
        let end = (self.position + 1).min(self.input.len());
        self.input[start..end].iter().collect()
    }

    /// Character one position past the cursor.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Move the cursor one character forward.
    fn advance(&mut self) {
        let Some(ch) = self.current else {
            return;
        };

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        self.position += 1;
        self.current = self.input.get(self.position).copied();
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Decode the character following a backslash. Unknown escapes stand for
/// the escaped character itself.
fn unescape(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("int main() { return 0; }");
        let tokens = lexer.tokenize().unwrap();

        assert!(tokens[0].is(TokenKind::Int));
        assert!(tokens[1].is(TokenKind::Identifier) && tokens[1].text == "main");
        assert!(tokens[2].is(TokenKind::LParen));
        assert!(tokens[3].is(TokenKind::RParen));
        assert!(tokens[4].is(TokenKind::LBrace));
        assert!(tokens[5].is(TokenKind::Return));
        assert!(tokens[6].is(TokenKind::Number) && tokens[6].text == "0");
        assert!(tokens[7].is(TokenKind::Semicolon));
        assert!(tokens[8].is(TokenKind::RBrace));
        assert!(tokens[9].is(TokenKind::Newline));
        assert!(tokens[10].is(TokenKind::Eof));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("++ -- += -= == != && || -> <= >= << >>"),
            vec![
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Arrow,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::LtLt,
                TokenKind::GtGt,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_match_without_spaces() {
        // "a--b" is a, --, b
        assert_eq!(
            kinds("a--b<=c"),
            vec![
                TokenKind::Identifier,
                TokenKind::MinusMinus,
                TokenKind::Identifier,
                TokenKind::Le,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let mut lexer = Lexer::new("int x; // comment\nint y; /* block\ncomment */ int z;");
        let tokens: Vec<_> = lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .filter(|t| !t.is(TokenKind::Newline))
            .collect();

        assert!(tokens[0].is(TokenKind::Int));
        assert_eq!(tokens[1].text, "x");
        assert!(tokens[2].is(TokenKind::Semicolon));
        assert!(tokens[3].is(TokenKind::Int));
        assert_eq!(tokens[4].text, "y");
        assert!(tokens[5].is(TokenKind::Semicolon));
        assert!(tokens[6].is(TokenKind::Int));
        assert_eq!(tokens[7].text, "z");
    }

    #[test]
    fn test_consecutive_comments() {
        assert_eq!(
            kinds("/* a */ /* b */ // c"),
            vec![TokenKind::Newline, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("x /* never closed").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedComment {
                location: SourceLocation::new(1, 3)
            }
        );
    }

    #[test]
    fn test_string_literal() {
        let mut lexer = Lexer::new(r#""hello\nworld\t\"q\"\\""#);
        let tokens = lexer.tokenize().unwrap();

        assert!(tokens[0].is(TokenKind::String));
        assert_eq!(tokens[0].text, "hello\nworld\t\"q\"\\");
    }

    #[test]
    fn test_unknown_escape_keeps_character() {
        let tokens = Lexer::new(r#""\q\0""#).tokenize().unwrap();
        assert_eq!(tokens[0].text, "q0");
    }

    #[test]
    fn test_char_literal_is_string_token() {
        let tokens = Lexer::new(r"'a' '\n' '\''").tokenize().unwrap();
        assert!(tokens[0].is(TokenKind::String));
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1].text, "\n");
        assert_eq!(tokens[2].text, "'");
    }

    #[test]
    fn test_unterminated_literals() {
        assert!(matches!(
            Lexer::new("\"abc").tokenize(),
            Err(LexError::UnterminatedString { .. })
        ));
        assert!(matches!(
            Lexer::new("'a").tokenize(),
            Err(LexError::UnterminatedChar { .. })
        ));
    }

    #[test]
    fn test_numbers() {
        let tokens = Lexer::new("123 9.865").tokenize().unwrap();
        assert_eq!(tokens[0].text, "123");
        assert_eq!(tokens[1].text, "9.865");
        assert!(tokens[1].is(TokenKind::Number));
    }

    #[test]
    fn test_malformed_numbers() {
        assert_eq!(
            Lexer::new("9.8.6").tokenize().unwrap_err(),
            LexError::MultipleDecimalPoints {
                text: "9.8.".to_string(),
                location: SourceLocation::new(1, 1)
            }
        );
        assert!(matches!(
            Lexer::new("x = 1.;").tokenize(),
            Err(LexError::MissingFractionDigits { ref text, .. }) if text == "1."
        ));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next_token().unwrap().is(TokenKind::Newline));
        for _ in 0..3 {
            assert!(lexer.next_token().unwrap().is(TokenKind::Eof));
        }
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("int\n  x;").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 4));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 4));
    }

    #[test]
    fn test_scan_all_recovers() {
        let (tokens, errors) = Lexer::new("a @ b $ 1.2.3").scan_all();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], LexError::UnexpectedCharacter { ch: '@', .. }));
        assert!(matches!(errors[1], LexError::UnexpectedCharacter { ch: '$', .. }));
        assert!(matches!(errors[2], LexError::MultipleDecimalPoints { .. }));
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "3", "\n", ""]);
    }
}
