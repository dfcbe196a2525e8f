//! Token model shared by the lexer and the grammar.

use crate::arena::StrHandle;
use crate::ast::{Axis, BinaryOperator};
use thiserror::Error;

/// Operator carried by a multiplicative token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    Multiply,
    Divide,
    Modulo,
}

impl From<NumericOp> for BinaryOperator {
    fn from(op: NumericOp) -> Self {
        match op {
            NumericOp::Multiply => BinaryOperator::Multiply,
            NumericOp::Divide => BinaryOperator::Divide,
            NumericOp::Modulo => BinaryOperator::Modulo,
        }
    }
}

/// Operator carried by equality and relational tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl From<ComparisonOp> for BinaryOperator {
    fn from(op: ComparisonOp) -> Self {
        match op {
            ComparisonOp::Equal => BinaryOperator::Equals,
            ComparisonOp::NotEqual => BinaryOperator::NotEquals,
            ComparisonOp::LessThan => BinaryOperator::LessThan,
            ComparisonOp::LessOrEqual => BinaryOperator::LessThanOrEqual,
            ComparisonOp::GreaterThan => BinaryOperator::GreaterThan,
            ComparisonOp::GreaterOrEqual => BinaryOperator::GreaterThanOrEqual,
        }
    }
}

/// Why the lexer produced an error token. Never surfaced on its own: the
/// grammar rejects the token and the driver reports a syntax error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at {start}")]
    UnterminatedLiteral { start: usize },

    #[error("unexpected character at {position}")]
    InvalidNameStart { position: usize },

    #[error("'!' not followed by '=' at {position}")]
    LoneBang { position: usize },

    #[error("malformed qualified name at {position}")]
    MalformedQName { position: usize },

    #[error("'{name}' is not an axis name")]
    UnknownAxis { name: String },
}

/// A lexical token. `S` is the string payload: owned text as it leaves the
/// lexer, an arena handle once the driver has registered it.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<S = StrHandle> {
    End,
    Error(LexError),
    LParen,
    RParen,
    LBracket,
    RBracket,
    At,
    Comma,
    Pipe,
    Dot,
    DotDot,
    Slash,
    SlashSlash,
    Plus,
    Minus,
    EqOp(ComparisonOp),
    RelOp(ComparisonOp),
    MulOp(NumericOp),
    And,
    Or,
    AxisName(Axis),
    Literal(S),
    Number(S),
    NameTest(S),
    FunctionName(S),
    NodeType(S),
    ProcessingInstruction(S),
    VariableReference(S),
}

/// The payload-free tag of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    End,
    Error,
    LParen,
    RParen,
    LBracket,
    RBracket,
    At,
    Comma,
    Pipe,
    Dot,
    DotDot,
    Slash,
    SlashSlash,
    Plus,
    Minus,
    EqOp,
    RelOp,
    MulOp,
    And,
    Or,
    AxisName,
    Literal,
    Number,
    NameTest,
    FunctionName,
    NodeType,
    ProcessingInstruction,
    VariableReference,
}

impl<S> Token<S> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::End => TokenKind::End,
            Token::Error(_) => TokenKind::Error,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::LBracket => TokenKind::LBracket,
            Token::RBracket => TokenKind::RBracket,
            Token::At => TokenKind::At,
            Token::Comma => TokenKind::Comma,
            Token::Pipe => TokenKind::Pipe,
            Token::Dot => TokenKind::Dot,
            Token::DotDot => TokenKind::DotDot,
            Token::Slash => TokenKind::Slash,
            Token::SlashSlash => TokenKind::SlashSlash,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::EqOp(_) => TokenKind::EqOp,
            Token::RelOp(_) => TokenKind::RelOp,
            Token::MulOp(_) => TokenKind::MulOp,
            Token::And => TokenKind::And,
            Token::Or => TokenKind::Or,
            Token::AxisName(_) => TokenKind::AxisName,
            Token::Literal(_) => TokenKind::Literal,
            Token::Number(_) => TokenKind::Number,
            Token::NameTest(_) => TokenKind::NameTest,
            Token::FunctionName(_) => TokenKind::FunctionName,
            Token::NodeType(_) => TokenKind::NodeType,
            Token::ProcessingInstruction(_) => TokenKind::ProcessingInstruction,
            Token::VariableReference(_) => TokenKind::VariableReference,
        }
    }

    /// Converts the string payload, if any, leaving every other variant untouched.
    pub fn map_str<T>(self, f: impl FnOnce(S) -> T) -> Token<T> {
        match self {
            Token::End => Token::End,
            Token::Error(e) => Token::Error(e),
            Token::LParen => Token::LParen,
            Token::RParen => Token::RParen,
            Token::LBracket => Token::LBracket,
            Token::RBracket => Token::RBracket,
            Token::At => Token::At,
            Token::Comma => Token::Comma,
            Token::Pipe => Token::Pipe,
            Token::Dot => Token::Dot,
            Token::DotDot => Token::DotDot,
            Token::Slash => Token::Slash,
            Token::SlashSlash => Token::SlashSlash,
            Token::Plus => Token::Plus,
            Token::Minus => Token::Minus,
            Token::EqOp(op) => Token::EqOp(op),
            Token::RelOp(op) => Token::RelOp(op),
            Token::MulOp(op) => Token::MulOp(op),
            Token::And => Token::And,
            Token::Or => Token::Or,
            Token::AxisName(axis) => Token::AxisName(axis),
            Token::Literal(s) => Token::Literal(f(s)),
            Token::Number(s) => Token::Number(f(s)),
            Token::NameTest(s) => Token::NameTest(f(s)),
            Token::FunctionName(s) => Token::FunctionName(f(s)),
            Token::NodeType(s) => Token::NodeType(f(s)),
            Token::ProcessingInstruction(s) => Token::ProcessingInstruction(f(s)),
            Token::VariableReference(s) => Token::VariableReference(f(s)),
        }
    }
}

/// Remembers the kind of the last emitted token to decide whether the next
/// `*`, `and`, `or`, `mod` or `div` is an operator or part of an operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatorContext {
    last: Option<TokenKind>,
}

impl OperatorContext {
    /// Back to start-of-input.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn record(&mut self, kind: TokenKind) {
        self.last = Some(kind);
    }

    pub fn last(&self) -> Option<TokenKind> {
        self.last
    }

    /// True when the previous token ends an operand, so a binary operator may follow.
    pub fn expects_operator(&self) -> bool {
        match self.last {
            None => false,
            Some(kind) => !matches!(
                kind,
                TokenKind::At
                    | TokenKind::AxisName
                    | TokenKind::LParen
                    | TokenKind::LBracket
                    | TokenKind::Comma
                    | TokenKind::And
                    | TokenKind::Or
                    | TokenKind::MulOp
                    | TokenKind::Slash
                    | TokenKind::SlashSlash
                    | TokenKind::Pipe
                    | TokenKind::Plus
                    | TokenKind::Minus
                    | TokenKind::EqOp
                    | TokenKind::RelOp
            ),
        }
    }
}
