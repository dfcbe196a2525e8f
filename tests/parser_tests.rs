mod common;

use common::fixtures::{INVALID_EXPRESSIONS, VALID_EXPRESSIONS};
use common::{TestResult, assert_no_pending_strings, init_logging};
use quire::xpath1::{
    Axis, BinaryOperator, ComparisonOp, Expression, LocationPath, NodeTest, NumericOp, Step,
    Token,
};
use quire::{ErrorKind, Parser, ParserOptions, parse_expression, tokenize};

fn name(s: &str) -> Token<String> {
    Token::NameTest(s.to_string())
}

fn child(local: &str) -> Step {
    Step::new(
        Axis::Child,
        NodeTest::Name {
            local_name: local.to_string(),
            namespace_uri: None,
        },
    )
}

#[test]
fn test_valid_expressions_parse_and_leave_no_strings() -> TestResult {
    init_logging();
    let mut parser = Parser::new();
    for input in VALID_EXPRESSIONS {
        parser
            .parse(input, None)
            .map_err(|e| format!("{input:?} failed: {e} ({})", e.reason()))?;
        assert_no_pending_strings(&parser);
    }
    Ok(())
}

#[test]
fn test_invalid_expressions_are_syntax_errors() {
    init_logging();
    let mut parser = Parser::new();
    for input in INVALID_EXPRESSIONS {
        match parser.parse(input, None) {
            Ok(expr) => panic!("{input:?} unexpectedly parsed as {expr:?}"),
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::Syntax, "{input:?}: {err}");
                assert_eq!(err.statement(), *input);
            }
        }
        assert_no_pending_strings(&parser);
    }
}

#[test]
fn test_and_between_names_is_an_operator() -> TestResult {
    assert_eq!(tokenize("a and b"), vec![name("a"), Token::And, name("b"), Token::End]);

    let expr = parse_expression("a and b")?;
    assert_eq!(
        expr,
        Expression::BinaryOp {
            left: Box::new(Expression::LocationPath(LocationPath {
                start_point: None,
                is_absolute: false,
                steps: vec![child("a")],
            })),
            op: BinaryOperator::And,
            right: Box::new(Expression::LocationPath(LocationPath {
                start_point: None,
                is_absolute: false,
                steps: vec![child("b")],
            })),
        }
    );
    Ok(())
}

#[test]
fn test_star_disambiguation() -> TestResult {
    assert_eq!(tokenize("*"), vec![name("*"), Token::End]);
    assert_eq!(
        tokenize("a * b"),
        vec![name("a"), Token::MulOp(NumericOp::Multiply), name("b"), Token::End]
    );

    let Expression::BinaryOp { op, .. } = parse_expression("a * b")? else {
        panic!("expected a multiplication");
    };
    assert_eq!(op, BinaryOperator::Multiply);

    let Expression::LocationPath(path) = parse_expression("*")? else {
        panic!("expected a wildcard step");
    };
    assert_eq!(path.steps, vec![Step::new(Axis::Child, NodeTest::Wildcard)]);
    Ok(())
}

#[test]
fn test_axis_tokens() {
    assert_eq!(
        tokenize("child::para"),
        vec![Token::AxisName(Axis::Child), name("para"), Token::End]
    );
}

#[test]
fn test_unterminated_literal() {
    assert!(matches!(tokenize("'abc").as_slice(), [Token::Error(_)]));
    let err = parse_expression("'abc").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_number_with_two_dots() {
    assert_eq!(
        tokenize("3.14.5"),
        vec![
            Token::Number("3.14".to_string()),
            Token::Number(".5".to_string()),
            Token::End
        ]
    );
    assert_eq!(
        parse_expression("3.14.5").unwrap_err().kind(),
        ErrorKind::Syntax
    );
    // Separated by an operator the leftover is an ordinary operand.
    assert_eq!(
        tokenize("3.14 = .5"),
        vec![
            Token::Number("3.14".to_string()),
            Token::EqOp(ComparisonOp::Equal),
            Token::Number(".5".to_string()),
            Token::End
        ]
    );
}

#[test]
fn test_reparse_gives_equal_trees() -> TestResult {
    let mut parser = Parser::new();
    for input in VALID_EXPRESSIONS {
        let first = parser.parse(input, None)?;
        let second = parser.parse(input, None)?;
        assert_eq!(first, second, "{input:?}");
    }
    Ok(())
}

#[test]
fn test_options_from_json() -> TestResult {
    let options: ParserOptions =
        serde_json::from_str(r#"{ "max-depth": 3, "validate-functions": false }"#)?;
    let mut parser = Parser::with_options(options);

    assert!(parser.parse("my-extension(1, 2)", None).is_ok());
    assert!(parser.parse("(((1)))", None).is_err());
    assert_no_pending_strings(&parser);
    Ok(())
}

#[test]
fn test_deep_nesting_is_rejected_not_overflowed() {
    let mut parser = Parser::new();
    let deep = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    let err = parser.parse(&deep, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_no_pending_strings(&parser);
}
