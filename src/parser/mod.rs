//! C source code parser
//!
//! This module transforms C source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token vocabulary (categories and lexemes)
//! - [`lexer`]: Tokenization (source text → tokens), one token per call
//! - [`parse`]: The [`parse::Parser`], its primitives and error type
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! - Declarations: functions with a body, and variables with an optional
//!   initializer, at top level or inside a block
//! - Types: built-in type keywords, including multi-word forms such as
//!   `unsigned long`, and `struct`/`union`/`enum` tags
//! - Statements: `if`/`else`, `while`, `for`, `return`, `break`, `continue`,
//!   blocks and expression statements
//! - Expressions: assignment, ternary, logical, bitwise, comparison, shift,
//!   arithmetic, prefix/postfix increment, calls, indexing, member access
//! - No preprocessor, no pointers or casts, no type checking
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;
