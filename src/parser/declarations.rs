//! Declaration parsing implementation
//!
//! This module handles parsing of declarations:
//!
//! - Function definitions: `type name(params) { ... }`
//! - Variable declarations: `type name [= expr];`, global or local
//! - Type specifiers: one or more type keywords, with a tag name after
//!   `struct`, `union` and `enum`
//!
//! # Grammar
//!
//! ```text
//! declaration  ::= type identifier ( function_rest | variable_rest )
//! function_rest ::= "(" params ")" compound_stmt
//! variable_rest ::= [ "=" expression ] ";"
//! params       ::= "" | "void" | param { "," param }
//! param        ::= type identifier
//! type         ::= type_word { type_word }
//! type_word    ::= builtin_type | ("struct" | "union" | "enum") identifier
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse a top-level declaration. The token after the name decides
    /// between a function and a variable.
    pub(crate) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let location = self.current_location();
        let type_name = self.parse_type_specifier()?;
        let name = self.expect_identifier("declaration name")?.text;

        if self.check(TokenKind::LParen) {
            let function = self.parse_function_declaration(type_name, name, location)?;
            Ok(Declaration::Function(function))
        } else {
            let variable = self.parse_variable_declaration(type_name, name, location)?;
            Ok(Declaration::Variable(variable))
        }
    }

    /// Parse function definition after its return type and name
    fn parse_function_declaration(
        &mut self,
        return_type: String,
        name: String,
        location: SourceLocation,
    ) -> Result<FunctionDecl, ParseError> {
        self.eat(TokenKind::LParen)?;
        let params = self.parse_parameter_list()?;
        self.eat(TokenKind::RParen)?;

        let body = self.parse_compound_statement()?;

        Ok(FunctionDecl {
            return_type,
            name,
            params,
            body,
            location,
        })
    }

    /// Parse parameter list: (type name, type name, ...)
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let location = self.current_location();
            let type_name = self.parse_type_specifier()?;

            // Special case: (void) means no parameters in C
            if params.is_empty() && type_name == "void" && self.check(TokenKind::RParen) {
                return Ok(params);
            }

            let name = self.expect_identifier("parameter name")?.text;
            params.push(Param {
                type_name,
                name,
                location,
            });

            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }

        Ok(params)
    }

    /// Parse a type specifier into its canonical spelling, e.g.
    /// `unsigned long` or `struct Point`.
    pub(crate) fn parse_type_specifier(&mut self) -> Result<String, ParseError> {
        if !self.is_type() {
            return Err(ParseError::ExpectedTypeSpecifier {
                found: self.current.kind,
                text: self.current.text.clone(),
                location: self.current_location(),
            });
        }

        let mut words: Vec<String> = Vec::new();
        while self.is_type() {
            let keyword = self.advance()?.kind;
            words.push(keyword.as_str().to_string());

            if matches!(keyword, TokenKind::Struct | TokenKind::Union | TokenKind::Enum) {
                let tag = self.expect_identifier("tag name")?;
                words.push(tag.text);
            }
        }

        Ok(words.join(" "))
    }

    /// Parse the rest of a variable declaration: `[= init];`
    pub(crate) fn parse_variable_declaration(
        &mut self,
        type_name: String,
        name: String,
        location: SourceLocation,
    ) -> Result<VariableDecl, ParseError> {
        let init = if self.match_token(TokenKind::Eq)? {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.eat(TokenKind::Semicolon)?;

        Ok(VariableDecl {
            type_name,
            name,
            init,
            location,
        })
    }

    /// Parse a complete local declaration, starting at its type
    pub(crate) fn parse_local_declaration(&mut self) -> Result<VariableDecl, ParseError> {
        let location = self.current_location();
        let type_name = self.parse_type_specifier()?;
        let name = self.expect_identifier("variable name")?.text;
        self.parse_variable_declaration(type_name, name, location)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};
    use crate::parser::token::TokenKind;

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::new(source)?.parse_program()
    }

    #[test]
    fn test_function_parameters() {
        let program = parse("int add(int a, float b) { return a; }").unwrap();
        let f = program.functions().next().unwrap();
        let params: Vec<_> = f
            .params
            .iter()
            .map(|p| (p.type_name.as_str(), p.name.as_str()))
            .collect();
        assert_eq!(params, vec![("int", "a"), ("float", "b")]);
    }

    #[test]
    fn test_void_parameter_list() {
        let program = parse("int main(void) { }").unwrap();
        let f = program.functions().next().unwrap();
        assert!(f.params.is_empty());
        assert!(f.body.statements.is_empty());
    }

    #[test]
    fn test_multi_word_types() {
        let program = parse("unsigned long n = 1;\nstruct Point origin;\nvoid f(struct Node n) {}").unwrap();
        match &program.declarations[..] {
            [Declaration::Variable(n), Declaration::Variable(origin), Declaration::Function(f)] => {
                assert_eq!(n.type_name, "unsigned long");
                assert_eq!(origin.type_name, "struct Point");
                assert!(origin.init.is_none());
                assert_eq!(f.params[0].type_name, "struct Node");
            }
            other => panic!("Unexpected declarations: {:?}", other),
        }
    }

    #[test]
    fn test_keywords_ignore_case() {
        let program = parse("INT x;").unwrap();
        match &program.declarations[0] {
            Declaration::Variable(v) => assert_eq!(v.type_name, "int"),
            _ => panic!("Expected variable declaration"),
        }
    }

    #[test]
    fn test_missing_type_specifier() {
        let err = parse("x = 1;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ExpectedTypeSpecifier {
                found: TokenKind::Identifier,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_declaration_name() {
        let err = parse("int = 1;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ExpectedIdentifier {
                what: "declaration name",
                found: TokenKind::Eq,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_parameter_name() {
        assert!(matches!(
            parse("int f(int, int b) {}"),
            Err(ParseError::ExpectedIdentifier {
                what: "parameter name",
                ..
            })
        ));
    }

    #[test]
    fn test_function_requires_body() {
        assert!(matches!(
            parse("int f(int a);"),
            Err(ParseError::UnexpectedToken {
                expected: TokenKind::LBrace,
                found: TokenKind::Semicolon,
                ..
            })
        ));
    }
}
