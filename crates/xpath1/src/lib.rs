pub mod arena;
pub mod ast;
pub mod chars;
pub mod error;
pub mod functions;
pub mod grammar;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod resolver;
pub mod token;

pub use arena::{ArenaError, StrHandle, StringArena};
pub use ast::{
    Axis, BinaryOperator, Expression, LocationPath, NodeTest, NodeTypeTest, Step, UnaryOperator,
};
pub use error::{ErrorKind, Rejection, XPathError};
pub use functions::{Arity, FunctionRegistry};
pub use grammar::{DescentGrammar, GrammarEngine, ParseContext};
pub use lexer::{Lexer, tokenize};
pub use options::ParserOptions;
pub use parser::{Parser, parse_expression, parse_expression_with};
pub use resolver::{ExpandedName, NameResolver, NamespaceResolver, UnresolvedPrefix};
pub use token::{ComparisonOp, LexError, NumericOp, OperatorContext, Token, TokenKind};
