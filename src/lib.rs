//! # Introduction
//!
//! `cfront` is the front half of a compiler for a small subset of C: a
//! character-level lexer and a predictive recursive-descent parser that turn
//! source text into an abstract syntax tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → (one token at a time) → Parser → Program (AST)
//! ```
//!
//! The parser pulls tokens on demand with a single token of lookahead; the
//! whole run is single-pass and synchronous. Every failure is reported as a
//! [`ParseError`], which wraps a [`LexError`] for lexical problems, and no
//! partial tree is ever returned.
//!
//! ```
//! let program = cfront::parse("int x = 1 + 2 * 3;").unwrap();
//! assert_eq!(program.declarations.len(), 1);
//! ```
//!
//! Preprocessing, type checking, name resolution and code generation are out
//! of scope; the crate stops at a syntactically valid tree.

pub mod parser;

pub use parser::ast::{Declaration, Expr, Program, SourceLocation, Stmt};
pub use parser::lexer::{LexError, Lexer};
pub use parser::parse::{ParseError, ParseOptions, Parser};
pub use parser::token::{Token, TokenKind};

/// Tokenize `source` completely, stopping at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Parse `source` into a [`Program`] with default options.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse_program()
}

/// Parse `source` into a [`Program`] with the given options.
pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<Program, ParseError> {
    Parser::with_options(source, options)?.parse_program()
}
