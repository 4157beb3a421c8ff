//! Statement parsing implementation
//!
//! This module handles parsing of all C statement types:
//!
//! - Local variable declarations: `int x = 42;`
//! - Control flow: `if`, `while`, `for`
//! - Jump statements: `return`, `break`, `continue`
//! - Compound statements: `{ ... }`
//! - Expression statements, including the empty statement `;`
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl | if_stmt | while_stmt | for_stmt
//!             | return_stmt | break_stmt | continue_stmt
//!             | compound_stmt | expr_stmt
//! ```
//!
//! An `else` binds to the nearest unmatched `if`: the then-branch is parsed
//! completely before `else` is looked for.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse `{ statements }`
    pub(crate) fn parse_compound_statement(&mut self) -> Result<Block, ParseError> {
        let location = self.eat(TokenKind::LBrace)?.location;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }

        self.eat(TokenKind::RBrace)?;

        Ok(Block {
            statements,
            location,
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();

        match self.current.kind {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => {
                self.advance()?;
                self.eat(TokenKind::Semicolon)?;
                Ok(Stmt::Break { location })
            }
            TokenKind::Continue => {
                self.advance()?;
                self.eat(TokenKind::Semicolon)?;
                Ok(Stmt::Continue { location })
            }
            TokenKind::LBrace => Ok(Stmt::Compound(self.parse_compound_statement()?)),
            TokenKind::Semicolon => {
                self.advance()?;
                Ok(Stmt::Expression {
                    expr: None,
                    location,
                })
            }
            kind if kind.is_type_specifier() => {
                Ok(Stmt::Declaration(self.parse_local_declaration()?))
            }
            _ => {
                let expr = self.parse_expression()?;
                self.eat(TokenKind::Semicolon)?;
                Ok(Stmt::Expression {
                    expr: Some(expr),
                    location,
                })
            }
        }
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.eat(TokenKind::If)?.location;

        self.eat(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.eat(TokenKind::RParen)?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.eat(TokenKind::While)?.location;

        self.eat(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.eat(TokenKind::RParen)?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse for statement; all three clauses are optional
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.eat(TokenKind::For)?.location;

        self.eat(TokenKind::LParen)?;

        // Init (optional)
        let init = if self.match_token(TokenKind::Semicolon)? {
            None
        } else if self.is_type() {
            // Declaration includes semicolon, so don't expect another
            Some(Box::new(Stmt::Declaration(self.parse_local_declaration()?)))
        } else {
            let init_location = self.current_location();
            let expr = self.parse_expression()?;
            self.eat(TokenKind::Semicolon)?;
            Some(Box::new(Stmt::Expression {
                expr: Some(expr),
                location: init_location,
            }))
        };

        // Condition (optional)
        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.eat(TokenKind::Semicolon)?;

        // Update (optional)
        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.eat(TokenKind::RParen)?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            location,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.eat(TokenKind::Return)?.location;

        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.eat(TokenKind::Semicolon)?;

        Ok(Stmt::Return { expr, location })
    }
}
