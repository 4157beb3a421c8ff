//! Expression parsing implementation
//!
//! This module handles parsing of C expressions using precedence climbing:
//! one method per precedence tier, each calling the next tighter tier and
//! looping while the lookahead is one of its own operators.
//!
//! # Precedence (loosest first)
//!
//! | Tier | Operators                 | Associativity |
//! |------|---------------------------|---------------|
//! | 1    | `= += -= *= /= %=`        | right         |
//! | 2    | `? :`                     | right         |
//! | 3    | `\|\|`                    | left          |
//! | 4    | `&&`                      | left          |
//! | 5    | `\|`                      | left          |
//! | 6    | `^`                       | left          |
//! | 7    | `&`                       | left          |
//! | 8    | `== !=`                   | left          |
//! | 9    | `< <= > >=`               | left          |
//! | 10   | `<< >>`                   | left          |
//! | 11   | `+ -`                     | left          |
//! | 12   | `* / %`                   | left          |
//! | 13   | prefix `+ - ! ~ ++ --`    | right         |
//! | 14   | `()` `[]` `.` `->` `++` `--` postfix | left |
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

const ASSIGNMENT_OPS: &[(TokenKind, AssignOp)] = &[
    (TokenKind::Eq, AssignOp::Assign),
    (TokenKind::PlusEq, AssignOp::AddAssign),
    (TokenKind::MinusEq, AssignOp::SubAssign),
    (TokenKind::StarEq, AssignOp::MulAssign),
    (TokenKind::SlashEq, AssignOp::DivAssign),
    (TokenKind::PercentEq, AssignOp::ModAssign),
];

const EQUALITY_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::EqEq, BinaryOp::Eq),
    (TokenKind::NotEq, BinaryOp::Ne),
];

const RELATIONAL_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Lt, BinaryOp::Lt),
    (TokenKind::Le, BinaryOp::Le),
    (TokenKind::Gt, BinaryOp::Gt),
    (TokenKind::Ge, BinaryOp::Ge),
];

const SHIFT_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::LtLt, BinaryOp::Shl),
    (TokenKind::GtGt, BinaryOp::Shr),
];

const ADDITIVE_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];

const MULTIPLICATIVE_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Star, BinaryOp::Mul),
    (TokenKind::Slash, BinaryOp::Div),
    (TokenKind::Percent, BinaryOp::Mod),
];

const PREFIX_OPS: &[(TokenKind, UnaryOp)] = &[
    (TokenKind::Plus, UnaryOp::Plus),
    (TokenKind::Minus, UnaryOp::Neg),
    (TokenKind::Bang, UnaryOp::Not),
    (TokenKind::Tilde, UnaryOp::BitNot),
    (TokenKind::PlusPlus, UnaryOp::PreInc),
    (TokenKind::MinusMinus, UnaryOp::PreDec),
];

fn binary(op: BinaryOp, left: Expr, right: Expr, location: SourceLocation) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        location,
    }
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_assignment)
    }

    /// Parse assignment or ternary (right-associative)
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_ternary()?;

        if let Some(op) = self.operator_at(ASSIGNMENT_OPS) {
            let location = self.advance()?.location;
            let value = self.nested(Self::parse_assignment)?;
            return Ok(Expr::Assignment {
                op,
                target: Box::new(target),
                value: Box::new(value),
                location,
            });
        }

        Ok(target)
    }

    /// Parse ternary: condition ? then_expr : else_expr
    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_logical_or()?;

        if self.check(TokenKind::Question) {
            let location = self.advance()?.location;
            let then_expr = self.parse_expression()?;
            self.eat(TokenKind::Colon)?;
            let else_expr = self.nested(Self::parse_ternary)?;

            return Ok(Expr::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                location,
            });
        }

        Ok(condition)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.check(TokenKind::OrOr) {
            let location = self.advance()?.location;
            let right = self.parse_logical_and()?;
            left = binary(BinaryOp::Or, left, right, location);
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bitwise_or()?;

        while self.check(TokenKind::AndAnd) {
            let location = self.advance()?.location;
            let right = self.parse_bitwise_or()?;
            left = binary(BinaryOp::And, left, right, location);
        }

        Ok(left)
    }

    /// Parse bitwise OR (|)
    fn parse_bitwise_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bitwise_xor()?;

        while self.check(TokenKind::Pipe) {
            let location = self.advance()?.location;
            let right = self.parse_bitwise_xor()?;
            left = binary(BinaryOp::BitOr, left, right, location);
        }

        Ok(left)
    }

    /// Parse bitwise XOR (^)
    fn parse_bitwise_xor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bitwise_and()?;

        while self.check(TokenKind::Caret) {
            let location = self.advance()?.location;
            let right = self.parse_bitwise_and()?;
            left = binary(BinaryOp::BitXor, left, right, location);
        }

        Ok(left)
    }

    /// Parse bitwise AND (&)
    fn parse_bitwise_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while self.check(TokenKind::Amp) {
            let location = self.advance()?.location;
            let right = self.parse_equality()?;
            left = binary(BinaryOp::BitAnd, left, right, location);
        }

        Ok(left)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;

        while let Some(op) = self.operator_at(EQUALITY_OPS) {
            let location = self.advance()?.location;
            let right = self.parse_relational()?;
            left = binary(op, left, right, location);
        }

        Ok(left)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_shift()?;

        while let Some(op) = self.operator_at(RELATIONAL_OPS) {
            let location = self.advance()?.location;
            let right = self.parse_shift()?;
            left = binary(op, left, right, location);
        }

        Ok(left)
    }

    /// Parse shift (<< >>)
    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        while let Some(op) = self.operator_at(SHIFT_OPS) {
            let location = self.advance()?.location;
            let right = self.parse_additive()?;
            left = binary(op, left, right, location);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self.operator_at(ADDITIVE_OPS) {
            let location = self.advance()?.location;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right, location);
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.operator_at(MULTIPLICATIVE_OPS) {
            let location = self.advance()?.location;
            let right = self.parse_unary()?;
            left = binary(op, left, right, location);
        }

        Ok(left)
    }

    /// Parse unary (+ - ! ~ ++ --)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.operator_at(PREFIX_OPS) {
            let location = self.advance()?.location;
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                location,
            });
        }

        self.parse_postfix()
    }

    /// Parse postfix (() [] . -> ++ --)
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let location = self.current_location();

            expr = match self.current.kind {
                TokenKind::LParen => {
                    self.advance()?;
                    let args = self.parse_argument_list()?;
                    self.eat(TokenKind::RParen)?;
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                        location,
                    }
                }
                TokenKind::LBracket => {
                    self.advance()?;
                    let index = self.parse_expression()?;
                    self.eat(TokenKind::RBracket)?;
                    Expr::ArrayAccess {
                        array: Box::new(expr),
                        index: Box::new(index),
                        location,
                    }
                }
                TokenKind::Dot | TokenKind::Arrow => {
                    let through_pointer = self.advance()?.is(TokenKind::Arrow);
                    let member = self.expect_identifier("member name")?.text;
                    Expr::MemberAccess {
                        object: Box::new(expr),
                        member,
                        through_pointer,
                        location,
                    }
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.advance()?.is(TokenKind::PlusPlus) {
                        UnaryOp::PostInc
                    } else {
                        UnaryOp::PostDec
                    };
                    Expr::Unary {
                        op,
                        operand: Box::new(expr),
                        location,
                    }
                }
                _ => break,
            };
        }

        Ok(expr)
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }

        Ok(args)
    }

    /// Parse primary (literals, identifiers, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current.kind {
            TokenKind::Number => {
                let token = self.advance()?;
                let value =
                    number_literal(&token.text).ok_or_else(|| ParseError::InvalidNumber {
                        text: token.text.clone(),
                        location: token.location,
                    })?;
                Ok(Expr::Literal(value, token.location))
            }
            TokenKind::String => {
                let token = self.advance()?;
                Ok(Expr::Literal(Literal::Str(token.text), token.location))
            }
            TokenKind::Identifier => {
                let token = self.advance()?;
                Ok(Expr::Identifier(token.text, token.location))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.eat(TokenKind::RParen)?;
                Ok(expr)
            }
            found => Err(ParseError::ExpectedExpression {
                found,
                text: self.current.text.clone(),
                location: self.current_location(),
            }),
        }
    }
}

/// Interpret the raw digits of a number token: a `.` makes it a float.
fn number_literal(text: &str) -> Option<Literal> {
    if text.contains('.') {
        text.parse::<f64>().ok().map(Literal::Float)
    } else {
        text.parse::<i64>().ok().map(Literal::Int)
    }
}
