// Integration tests for the parser

use cfront::parser::ast::*;
use cfront::{parse, parse_with_options, LexError, ParseError, ParseOptions, TokenKind};
use pretty_assertions::assert_eq;

fn at(line: usize, column: usize) -> SourceLocation {
    SourceLocation::new(line, column)
}

#[test]
fn test_global_variable_declaration() {
    let program = parse("int x = 5;").expect("Parsing failed");

    assert_eq!(
        program,
        Program {
            declarations: vec![Declaration::Variable(VariableDecl {
                type_name: "int".to_string(),
                name: "x".to_string(),
                init: Some(Expr::Literal(Literal::Int(5), at(1, 9))),
                location: at(1, 1),
            })]
        }
    );
}

#[test]
fn test_precedence_tree() {
    let program = parse("int v = 1+2*3;").expect("Parsing failed");
    let init = match &program.declarations[0] {
        Declaration::Variable(v) => v.init.clone().expect("Missing initializer"),
        other => panic!("Expected variable, got {:?}", other),
    };

    assert_eq!(
        init,
        Expr::Binary {
            op: BinaryOp::Add,
            left: Box::new(Expr::Literal(Literal::Int(1), at(1, 9))),
            right: Box::new(Expr::Binary {
                op: BinaryOp::Mul,
                left: Box::new(Expr::Literal(Literal::Int(2), at(1, 11))),
                right: Box::new(Expr::Literal(Literal::Int(3), at(1, 13))),
                location: at(1, 12),
            }),
            location: at(1, 10),
        }
    );
}

#[test]
fn test_full_program() {
    let source = r#"
        int counter = 0;

        int add(int a, int b) {
            return a + b;
        }

        /* entry point */
        int main() {
            int x = 10;
            int y = 20;
            if (x < y) {
                return add(x, y);
            } else
                counter += 1;
            while (counter < 10) counter++;
            for (int i = 0; i < 3; i = i + 1) {
                if (i == 1) continue;
                if (i == 2) break;
            }
            printf("%d\n", x > y ? x : y);
            return 0;
        }
    "#;

    let program = parse(source).expect("Parsing failed");

    let names: Vec<_> = program.declarations.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["counter", "add", "main"]);

    let main = program
        .functions()
        .find(|f| f.name == "main")
        .expect("main not found");
    assert_eq!(main.return_type, "int");
    assert_eq!(main.body.statements.len(), 7);
    assert!(matches!(main.body.statements[2], Stmt::If { else_branch: Some(_), .. }));
    assert!(matches!(main.body.statements[3], Stmt::While { .. }));
    assert!(matches!(main.body.statements[4], Stmt::For { .. }));

    match &main.body.statements[5] {
        Stmt::Expression {
            expr: Some(Expr::Call { callee, args, .. }),
            ..
        } => {
            assert_eq!(callee.to_string(), "printf");
            assert_eq!(args.len(), 2);
            assert!(matches!(&args[0], Expr::Literal(Literal::Str(s), _) if s == "%d\n"));
            assert_eq!(args[1].to_string(), "((x > y) ? x : y)");
        }
        other => panic!("Expected printf call, got {:?}", other),
    }
}

#[test]
fn test_ternary_has_its_own_node() {
    let program = parse("int m = a > b ? a : b;").unwrap();
    match &program.declarations[0] {
        Declaration::Variable(VariableDecl {
            init: Some(Expr::Conditional {
                condition,
                then_expr,
                else_expr,
                ..
            }),
            ..
        }) => {
            assert_eq!(condition.to_string(), "(a > b)");
            assert_eq!(then_expr.to_string(), "a");
            assert_eq!(else_expr.to_string(), "b");
        }
        other => panic!("Expected conditional initializer, got {:?}", other),
    }
}

#[test]
fn test_locations_survive_newlines() {
    let program = parse("\n\nint\nmain()\n{\n  return 0;\n}\n").unwrap();
    let main = program.functions().next().unwrap();
    assert_eq!(main.location, at(3, 1));
    assert_eq!(main.body.location, at(5, 1));
    assert_eq!(main.body.statements[0].location(), at(6, 3));
}

#[test]
fn test_syntax_error_reports_expected_and_found() {
    let err = parse("int main() {\n  int x = (1 + 2;\n}").unwrap_err();
    assert!(!err.is_lexical());
    assert_eq!(err.location(), at(2, 17));
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: TokenKind::RParen,
            found: TokenKind::Semicolon,
            text: ";".to_string(),
            location: at(2, 17),
        }
    );
}

#[test]
fn test_unexpected_primary() {
    let err = parse("int main() { return ); }").unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error at line 1, column 21: expected expression, found ')'"
    );
}

#[test]
fn test_lexical_errors_abort_the_parse() {
    let err = parse("int s = \"abc").unwrap_err();
    assert!(err.is_lexical());
    assert_eq!(
        err,
        ParseError::Lex(LexError::UnterminatedString { location: at(1, 9) })
    );

    assert!(matches!(
        parse("int x = 1; /* open"),
        Err(ParseError::Lex(LexError::UnterminatedComment { .. }))
    ));
}

#[test]
fn test_statements_outside_functions_are_rejected() {
    assert!(matches!(
        parse("return 0;"),
        Err(ParseError::ExpectedTypeSpecifier {
            found: TokenKind::Return,
            ..
        })
    ));
}

#[test]
fn test_nesting_limit_is_configurable() {
    let source = format!(
        "int main() {{ return {}x{}; }}",
        "(".repeat(30),
        ")".repeat(30)
    );
    assert!(parse(&source).is_ok());
    assert!(matches!(
        parse_with_options(&source, ParseOptions { max_depth: 10 }),
        Err(ParseError::NestingTooDeep { limit: 10, .. })
    ));
}

#[test]
fn test_deep_input_fails_cleanly() {
    let source = format!("int v = {}0;", "!".repeat(10_000));
    assert!(matches!(
        parse(&source),
        Err(ParseError::NestingTooDeep { .. })
    ));
}
