//! Configuration for an XPath [`Parser`](crate::Parser).

use serde::{Deserialize, Serialize};

/// Default limit on nested sub-expressions.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserOptions {
    /// How deeply expressions may nest (parentheses, predicates, function
    /// arguments, unary minus) before the input is rejected.
    pub max_depth: usize,
    /// Reject calls to functions that are not registered, or that are called
    /// with the wrong number of arguments.
    pub validate_functions: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            validate_functions: true,
        }
    }
}

impl ParserOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_function_validation(mut self, enabled: bool) -> Self {
        self.validate_functions = enabled;
        self
    }
}
