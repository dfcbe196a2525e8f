use crate::arena::ArenaError;
use crate::functions::Arity;
use crate::resolver::UnresolvedPrefix;
use crate::token::{LexError, TokenKind};
use thiserror::Error;

/// Why the grammar gave up on a token stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("unexpected {found:?} at {position}")]
    UnexpectedToken { found: TokenKind, position: usize },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Namespace(#[from] UnresolvedPrefix),

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("function '{name}' does not take {found} argument(s) (expects {expected:?})")]
    WrongArity {
        name: String,
        found: usize,
        expected: Arity,
    },

    #[error("'{raw}' is not a number")]
    InvalidNumber { raw: String },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error(transparent)]
    Arena(#[from] ArenaError),
}

/// The two failure classes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Namespace,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum XPathError {
    #[error("The string '{statement}' is not a valid XPath expression.")]
    Syntax {
        statement: String,
        #[source]
        reason: Rejection,
    },

    #[error("The string '{statement}' contains unresolvable namespaces.")]
    Namespace {
        statement: String,
        #[source]
        reason: Rejection,
    },
}

impl XPathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            XPathError::Syntax { .. } => ErrorKind::Syntax,
            XPathError::Namespace { .. } => ErrorKind::Namespace,
        }
    }

    /// The expression that failed to parse, exactly as given.
    pub fn statement(&self) -> &str {
        match self {
            XPathError::Syntax { statement, .. } | XPathError::Namespace { statement, .. } => {
                statement
            }
        }
    }

    pub fn reason(&self) -> &Rejection {
        match self {
            XPathError::Syntax { reason, .. } | XPathError::Namespace { reason, .. } => reason,
        }
    }
}
