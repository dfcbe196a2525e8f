//! Defines the registry of function names and arities accepted at parse time.

use std::collections::HashMap;

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` means unbounded, as for `concat`.
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

const CORE_FUNCTIONS: [(&str, Arity); 27] = [
    // Node-set
    ("last", Arity::exactly(0)),
    ("position", Arity::exactly(0)),
    ("count", Arity::exactly(1)),
    ("id", Arity::exactly(1)),
    ("local-name", Arity::between(0, 1)),
    ("namespace-uri", Arity::between(0, 1)),
    ("name", Arity::between(0, 1)),
    // String
    ("string", Arity::between(0, 1)),
    ("concat", Arity::at_least(2)),
    ("starts-with", Arity::exactly(2)),
    ("contains", Arity::exactly(2)),
    ("substring-before", Arity::exactly(2)),
    ("substring-after", Arity::exactly(2)),
    ("substring", Arity::between(2, 3)),
    ("string-length", Arity::between(0, 1)),
    ("normalize-space", Arity::between(0, 1)),
    ("translate", Arity::exactly(3)),
    // Boolean
    ("boolean", Arity::exactly(1)),
    ("not", Arity::exactly(1)),
    ("true", Arity::exactly(0)),
    ("false", Arity::exactly(0)),
    ("lang", Arity::exactly(1)),
    // Number
    ("number", Arity::between(0, 1)),
    ("sum", Arity::exactly(1)),
    ("floor", Arity::exactly(1)),
    ("ceiling", Arity::exactly(1)),
    ("round", Arity::exactly(1)),
];

/// Why a function call was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionCheck {
    Unknown,
    WrongArity(Arity),
}

// Function names are matched exactly as written, prefix included.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arity>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// The XPath 1.0 core function library.
    pub fn core() -> Self {
        let mut registry = Self::new();
        for (name, arity) in CORE_FUNCTIONS {
            registry.register(name, arity);
        }
        registry
    }

    /// Adds or replaces a function.
    pub fn register(&mut self, name: impl Into<String>, arity: Arity) {
        self.functions.insert(name.into(), arity);
    }

    pub fn get(&self, name: &str) -> Option<Arity> {
        self.functions.get(name).copied()
    }

    pub fn check(&self, name: &str, arg_count: usize) -> Result<(), FunctionCheck> {
        match self.get(name) {
            None => Err(FunctionCheck::Unknown),
            Some(arity) if !arity.accepts(arg_count) => Err(FunctionCheck::WrongArity(arity)),
            Some(_) => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::core()
    }
}
