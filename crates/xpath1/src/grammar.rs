//! The grammar side of the parser: the [`GrammarEngine`] seam, the
//! [`ParseContext`] it pulls tokens from, and the default recursive-descent
//! grammar for XPath 1.0.
//!
//! A grammar engine never touches the lexer or the string arena directly. It
//! asks the context for the next token, takes string payloads out of the arena
//! as it builds the tree, and expands qualified names through the context so
//! that namespace failures are recorded for error classification.

use crate::arena::{StrHandle, StringArena};
use crate::ast::{
    Axis, BinaryOperator, Expression, LocationPath, NodeTest, NodeTypeTest, Step, UnaryOperator,
};
use crate::error::Rejection;
use crate::functions::{FunctionCheck, FunctionRegistry};
use crate::lexer::Lexer;
use crate::options::ParserOptions;
use crate::resolver::{ExpandedName, NameResolver};
use crate::token::{Token, TokenKind};
use nom::Parser as _;
use nom::combinator::all_consuming;
use nom::number::complete::double;

/// A parser that consumes tokens from a [`ParseContext`] and reduces them to
/// an expression tree.
pub trait GrammarEngine {
    fn parse(&mut self, ctx: &mut ParseContext<'_>) -> Result<Expression, Rejection>;
}

/// Per-parse state shared between the driver and the grammar engine.
pub struct ParseContext<'p> {
    lexer: &'p mut Lexer,
    arena: &'p mut StringArena,
    names: NameResolver<'p>,
    functions: &'p FunctionRegistry,
    options: &'p ParserOptions,
    namespace_error_seen: bool,
}

impl<'p> ParseContext<'p> {
    pub fn new(
        lexer: &'p mut Lexer,
        arena: &'p mut StringArena,
        names: NameResolver<'p>,
        functions: &'p FunctionRegistry,
        options: &'p ParserOptions,
    ) -> Self {
        Self {
            lexer,
            arena,
            names,
            functions,
            options,
            namespace_error_seen: false,
        }
    }

    /// Pulls the next token, registering its string payload in the arena.
    pub fn next_token(&mut self) -> Token {
        let arena = &mut *self.arena;
        self.lexer.next_token().map_str(|s| arena.register(s))
    }

    /// Moves a token string out of the arena and into the caller's hands.
    pub fn take_string(&mut self, handle: StrHandle) -> Result<String, Rejection> {
        Ok(self.arena.release(handle)?)
    }

    /// Resolves a QName. A failure raises the namespace flag for the driver.
    pub fn expand_qname(&mut self, qname: &str) -> Result<ExpandedName, Rejection> {
        self.names.expand(qname).map_err(|err| {
            log::debug!("{}", err);
            self.namespace_error_seen = true;
            Rejection::from(err)
        })
    }

    /// Records a namespace failure detected outside [`Self::expand_qname`].
    pub fn flag_namespace_error(&mut self) {
        self.namespace_error_seen = true;
    }

    pub fn namespace_error_seen(&self) -> bool {
        self.namespace_error_seen
    }

    /// Validates a call against the function registry when enabled.
    pub fn check_function(&self, name: &str, arg_count: usize) -> Result<(), Rejection> {
        if !self.options.validate_functions {
            return Ok(());
        }
        self.functions
            .check(name, arg_count)
            .map_err(|check| match check {
                FunctionCheck::Unknown => Rejection::UnknownFunction {
                    name: name.to_string(),
                },
                FunctionCheck::WrongArity(expected) => Rejection::WrongArity {
                    name: name.to_string(),
                    found: arg_count,
                    expected,
                },
            })
    }

    pub fn options(&self) -> &ParserOptions {
        self.options
    }

    /// Lexer cursor, in characters.
    pub fn position(&self) -> usize {
        self.lexer.position()
    }
}

/// Hand-written recursive descent over the XPath 1.0 expression grammar.
///
/// Precedence from loosest to tightest: `or`, `and`, equality, relational,
/// additive, multiplicative, unary minus, union, path.
#[derive(Debug, Default, Clone, Copy)]
pub struct DescentGrammar;

impl GrammarEngine for DescentGrammar {
    fn parse(&mut self, ctx: &mut ParseContext<'_>) -> Result<Expression, Rejection> {
        let mut descent = Descent::new(ctx);
        let expr = descent.expr()?;
        descent.expect(TokenKind::End)?;
        Ok(expr)
    }
}

struct Descent<'c, 'p> {
    ctx: &'c mut ParseContext<'p>,
    current: Token,
    depth: usize,
}

impl<'c, 'p> Descent<'c, 'p> {
    fn new(ctx: &'c mut ParseContext<'p>) -> Self {
        let current = ctx.next_token();
        Self {
            ctx,
            current,
            depth: 0,
        }
    }

    fn advance(&mut self) -> Token {
        let next = self.ctx.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind() == kind
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), Rejection> {
        if !self.at(kind) {
            return Err(self.unexpected());
        }
        self.advance();
        Ok(())
    }

    fn unexpected(&self) -> Rejection {
        match &self.current {
            Token::Error(err) => Rejection::Lex(err.clone()),
            other => Rejection::UnexpectedToken {
                found: other.kind(),
                position: self.ctx.position(),
            },
        }
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Rejection>,
    ) -> Result<T, Rejection> {
        let limit = self.ctx.options().max_depth;
        if self.depth >= limit {
            return Err(Rejection::TooDeep { limit });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<Expression, Rejection> {
        self.nested(Self::or_expr)
    }

    fn or_expr(&mut self) -> Result<Expression, Rejection> {
        let mut left = self.and_expr()?;
        while self.at(TokenKind::Or) {
            self.advance();
            let right = self.and_expr()?;
            left = binary(left, BinaryOperator::Or, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expression, Rejection> {
        let mut left = self.equality_expr()?;
        while self.at(TokenKind::And) {
            self.advance();
            let right = self.equality_expr()?;
            left = binary(left, BinaryOperator::And, right);
        }
        Ok(left)
    }

    fn equality_expr(&mut self) -> Result<Expression, Rejection> {
        let mut left = self.relational_expr()?;
        while let Token::EqOp(op) = self.current {
            self.advance();
            let right = self.relational_expr()?;
            left = binary(left, op.into(), right);
        }
        Ok(left)
    }

    fn relational_expr(&mut self) -> Result<Expression, Rejection> {
        let mut left = self.additive_expr()?;
        while let Token::RelOp(op) = self.current {
            self.advance();
            let right = self.additive_expr()?;
            left = binary(left, op.into(), right);
        }
        Ok(left)
    }

    fn additive_expr(&mut self) -> Result<Expression, Rejection> {
        let mut left = self.multiplicative_expr()?;
        loop {
            let op = match self.current {
                Token::Plus => BinaryOperator::Plus,
                Token::Minus => BinaryOperator::Minus,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.multiplicative_expr()?;
            left = binary(left, op, right);
        }
    }

    fn multiplicative_expr(&mut self) -> Result<Expression, Rejection> {
        let mut left = self.unary_expr()?;
        while let Token::MulOp(op) = self.current {
            self.advance();
            let right = self.unary_expr()?;
            left = binary(left, op.into(), right);
        }
        Ok(left)
    }

    fn unary_expr(&mut self) -> Result<Expression, Rejection> {
        if !self.at(TokenKind::Minus) {
            return self.union_expr();
        }
        self.advance();
        let expr = self.nested(Self::unary_expr)?;
        Ok(Expression::UnaryOp {
            op: UnaryOperator::Minus,
            expr: Box::new(expr),
        })
    }

    fn union_expr(&mut self) -> Result<Expression, Rejection> {
        let mut left = self.path_expr()?;
        while self.at(TokenKind::Pipe) {
            self.advance();
            let right = self.path_expr()?;
            left = binary(left, BinaryOperator::Union, right);
        }
        Ok(left)
    }

    fn path_expr(&mut self) -> Result<Expression, Rejection> {
        match self.current.kind() {
            TokenKind::VariableReference
            | TokenKind::LParen
            | TokenKind::Literal
            | TokenKind::Number
            | TokenKind::FunctionName => {
                let filter = self.filter_expr()?;
                if !self.at(TokenKind::Slash) && !self.at(TokenKind::SlashSlash) {
                    return Ok(filter);
                }
                let mut steps = Vec::new();
                self.following_steps(&mut steps)?;
                Ok(Expression::LocationPath(LocationPath {
                    start_point: Some(Box::new(filter)),
                    is_absolute: false,
                    steps,
                }))
            }
            _ => self.location_path().map(Expression::LocationPath),
        }
    }

    fn filter_expr(&mut self) -> Result<Expression, Rejection> {
        let primary = self.primary_expr()?;
        let predicates = self.predicates()?;
        if predicates.is_empty() {
            return Ok(primary);
        }
        Ok(Expression::Filter {
            primary: Box::new(primary),
            predicates,
        })
    }

    fn primary_expr(&mut self) -> Result<Expression, Rejection> {
        match self.current {
            Token::VariableReference(handle) => {
                self.advance();
                Ok(Expression::Variable(self.ctx.take_string(handle)?))
            }
            Token::Literal(handle) => {
                self.advance();
                Ok(Expression::Literal(self.ctx.take_string(handle)?))
            }
            Token::Number(handle) => {
                self.advance();
                let raw = self.ctx.take_string(handle)?;
                match number_value(&raw) {
                    Some(value) => Ok(Expression::Number(value)),
                    None => Err(Rejection::InvalidNumber { raw }),
                }
            }
            Token::LParen => {
                self.advance();
                let expr = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            Token::FunctionName(handle) => {
                self.advance();
                let name = self.ctx.take_string(handle)?;
                self.function_call(name)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn function_call(&mut self, name: String) -> Result<Expression, Rejection> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.at(TokenKind::RParen) {
            args.push(self.expr()?);
            while self.at(TokenKind::Comma) {
                self.advance();
                args.push(self.expr()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        self.ctx.check_function(&name, args.len())?;
        Ok(Expression::FunctionCall { name, args })
    }

    fn location_path(&mut self) -> Result<LocationPath, Rejection> {
        let mut steps = Vec::new();
        let is_absolute = match self.current {
            Token::Slash => {
                self.advance();
                if !self.at_step_start() {
                    // A lone `/` selects the root.
                    return Ok(LocationPath {
                        start_point: None,
                        is_absolute: true,
                        steps,
                    });
                }
                true
            }
            Token::SlashSlash => {
                self.advance();
                steps.push(Step::descendant_or_self_node());
                true
            }
            _ => false,
        };

        steps.push(self.step()?);
        self.following_steps(&mut steps)?;
        Ok(LocationPath {
            start_point: None,
            is_absolute,
            steps,
        })
    }

    /// `(('/' | '//') Step)*`
    fn following_steps(&mut self, steps: &mut Vec<Step>) -> Result<(), Rejection> {
        loop {
            match self.current {
                Token::Slash => {}
                Token::SlashSlash => steps.push(Step::descendant_or_self_node()),
                _ => return Ok(()),
            }
            self.advance();
            steps.push(self.step()?);
        }
    }

    fn at_step_start(&self) -> bool {
        matches!(
            self.current.kind(),
            TokenKind::AxisName
                | TokenKind::At
                | TokenKind::NameTest
                | TokenKind::NodeType
                | TokenKind::ProcessingInstruction
                | TokenKind::Dot
                | TokenKind::DotDot
        )
    }

    fn step(&mut self) -> Result<Step, Rejection> {
        let axis = match self.current {
            Token::Dot => {
                self.advance();
                return Ok(Step::new(Axis::SelfAxis, NodeTest::NodeType(NodeTypeTest::Node)));
            }
            Token::DotDot => {
                self.advance();
                return Ok(Step::new(Axis::Parent, NodeTest::NodeType(NodeTypeTest::Node)));
            }
            Token::AxisName(axis) => {
                self.advance();
                axis
            }
            Token::At => {
                self.advance();
                Axis::Attribute
            }
            _ => Axis::Child,
        };

        let node_test = self.node_test()?;
        let predicates = self.predicates()?;
        Ok(Step {
            axis,
            node_test,
            predicates,
        })
    }

    fn node_test(&mut self) -> Result<NodeTest, Rejection> {
        match self.current {
            Token::NameTest(handle) => {
                self.advance();
                let qname = self.ctx.take_string(handle)?;
                self.name_test(&qname)
            }
            Token::NodeType(handle) => {
                self.advance();
                let name = self.ctx.take_string(handle)?;
                self.expect(TokenKind::LParen)?;
                self.expect(TokenKind::RParen)?;
                let node_type = match name.as_str() {
                    "comment" => NodeTypeTest::Comment,
                    "text" => NodeTypeTest::Text,
                    _ => NodeTypeTest::Node,
                };
                Ok(NodeTest::NodeType(node_type))
            }
            Token::ProcessingInstruction(handle) => {
                self.advance();
                self.ctx.take_string(handle)?;
                self.expect(TokenKind::LParen)?;
                let target = match self.current {
                    Token::Literal(literal) => {
                        self.advance();
                        Some(self.ctx.take_string(literal)?)
                    }
                    _ => None,
                };
                self.expect(TokenKind::RParen)?;
                Ok(NodeTest::ProcessingInstruction(target))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn name_test(&mut self, qname: &str) -> Result<NodeTest, Rejection> {
        let ExpandedName {
            local_name,
            namespace_uri,
        } = self.ctx.expand_qname(qname)?;

        if local_name != "*" {
            return Ok(NodeTest::Name {
                local_name,
                namespace_uri,
            });
        }
        Ok(match namespace_uri {
            Some(namespace_uri) => NodeTest::NamespaceWildcard { namespace_uri },
            None => NodeTest::Wildcard,
        })
    }

    fn predicates(&mut self) -> Result<Vec<Expression>, Rejection> {
        let mut predicates = Vec::new();
        while self.at(TokenKind::LBracket) {
            self.advance();
            predicates.push(self.expr()?);
            self.expect(TokenKind::RBracket)?;
        }
        Ok(predicates)
    }
}

fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Expression {
    Expression::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

/// Converts a number lexeme (digits with at most one `.`) to its value.
fn number_value(raw: &str) -> Option<f64> {
    all_consuming(double::<&str, nom::error::Error<&str>>)
        .parse(raw)
        .ok()
        .map(|(_, value)| value)
}
