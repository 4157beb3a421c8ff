//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a predictive recursive descent parser with one token of
//! lookahead. It pulls tokens from its [`Lexer`] on demand; it never sees
//! the source text directly.
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: function and variable declarations, type specifiers
//! - `statements`: statements (if, while, for, etc.)
//! - `expressions`: expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::token::{Token, TokenKind};
use thiserror::Error;

/// Nesting limit used when no [`ParseOptions`] are given.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parser error type
///
/// Lexical errors are wrapped unchanged so a caller can tell the two
/// classes apart with [`ParseError::is_lexical`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("syntax error at {location}: expected {expected}, found {}", describe(.found, .text))]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        location: SourceLocation,
    },

    #[error("syntax error at {location}: expected expression, found {}", describe(.found, .text))]
    ExpectedExpression {
        found: TokenKind,
        text: String,
        location: SourceLocation,
    },

    #[error("syntax error at {location}: expected type specifier, found {}", describe(.found, .text))]
    ExpectedTypeSpecifier {
        found: TokenKind,
        text: String,
        location: SourceLocation,
    },

    #[error("syntax error at {location}: expected {what}, found {}", describe(.found, .text))]
    ExpectedIdentifier {
        what: &'static str,
        found: TokenKind,
        text: String,
        location: SourceLocation,
    },

    #[error("syntax error at {location}: number '{text}' is out of range")]
    InvalidNumber {
        text: String,
        location: SourceLocation,
    },

    #[error("syntax error at {location}: nesting exceeds the limit of {limit} levels")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

fn describe(kind: &TokenKind, text: &str) -> String {
    Token::new(*kind, text, SourceLocation::default()).to_string()
}

impl ParseError {
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lex(_))
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::UnexpectedToken { location, .. }
            | ParseError::ExpectedExpression { location, .. }
            | ParseError::ExpectedTypeSpecifier { location, .. }
            | ParseError::ExpectedIdentifier { location, .. }
            | ParseError::InvalidNumber { location, .. }
            | ParseError::NestingTooDeep { location, .. } => *location,
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of statements and expressions. Deeper input is
    /// rejected with [`ParseError::NestingTooDeep`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Recursive descent parser for the C subset
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
    options: ParseOptions,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &str, options: ParseOptions) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = Self::pull(&mut lexer)?;
        Ok(Self {
            lexer,
            current,
            options,
            depth: 0,
        })
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let result = self.parse_declarations();
        match &result {
            Ok(program) => {
                tracing::debug!(
                    declarations = program.declarations.len(),
                    "parsed program"
                );
            }
            Err(err) if !err.is_lexical() => {
                tracing::debug!(line = err.location().line, col = err.location().column, "parse error: {}", err);
            }
            Err(_) => {}
        }
        result
    }

    fn parse_declarations(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.check(TokenKind::Eof) {
            let decl = self.parse_declaration()?;
            program.declarations.push(decl);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    /// Next token from the lexer, passing over newlines. Line breaks carry
    /// no meaning in the grammar.
    fn pull(lexer: &mut Lexer) -> Result<Token, LexError> {
        loop {
            let token = lexer.next_token()?;
            if !token.is(TokenKind::Newline) {
                return Ok(token);
            }
        }
    }

    /// Replace the lookahead with the next token and return the old one.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = Self::pull(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consume a token of the expected kind or fail.
    pub(crate) fn eat(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        if self.check(expected) {
            self.advance()
        } else {
            Err(ParseError::UnexpectedToken {
                expected,
                found: self.current.kind,
                text: self.current.text.clone(),
                location: self.current.location,
            })
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Whether the lookahead is a built-in type keyword.
    pub(crate) fn is_type(&self) -> bool {
        self.current.kind.is_type_specifier()
    }

    /// Map the lookahead through an operator table.
    pub(crate) fn operator_at<T: Copy>(&self, table: &[(TokenKind, T)]) -> Option<T> {
        table
            .iter()
            .find(|(kind, _)| self.check(*kind))
            .map(|&(_, op)| op)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    pub(crate) fn expect_identifier(&mut self, what: &'static str) -> Result<Token, ParseError> {
        if self.check(TokenKind::Identifier) {
            self.advance()
        } else {
            Err(ParseError::ExpectedIdentifier {
                what,
                found: self.current.kind,
                text: self.current.text.clone(),
                location: self.current.location,
            })
        }
    }

    /// Run one level of recursion under the nesting limit.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                location: self.current_location(),
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}
