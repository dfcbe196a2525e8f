//! The parser driver: one reusable object that runs a parse from a fresh
//! lexer state to either an expression tree or a classified error.

use crate::arena::StringArena;
use crate::ast::Expression;
use crate::error::XPathError;
use crate::functions::{Arity, FunctionRegistry};
use crate::grammar::{DescentGrammar, GrammarEngine, ParseContext};
use crate::lexer::Lexer;
use crate::options::ParserOptions;
use crate::resolver::{NameResolver, NamespaceResolver};

// --- Main Public Parser ---

/// Parses `input` with a default parser and no namespace resolver.
pub fn parse_expression(input: &str) -> Result<Expression, XPathError> {
    Parser::new().parse(input, None)
}

/// Parses `input` with a default parser, resolving prefixes through `resolver`.
pub fn parse_expression_with(
    input: &str,
    resolver: &dyn NamespaceResolver,
) -> Result<Expression, XPathError> {
    Parser::new().parse(input, Some(resolver))
}

/// Reusable XPath parser.
///
/// Each call to [`Parser::parse`] starts from a clean cursor, operator context
/// and string arena, and leaves the arena empty again whether it succeeds or
/// fails. Because `parse` takes `&mut self`, one parser can never run two
/// parses at once; use one parser per thread.
#[derive(Debug)]
pub struct Parser<G = DescentGrammar> {
    lexer: Lexer,
    arena: StringArena,
    functions: FunctionRegistry,
    options: ParserOptions,
    grammar: G,
}

impl Parser<DescentGrammar> {
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self::with_grammar(DescentGrammar, options)
    }
}

impl Default for Parser<DescentGrammar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GrammarEngine> Parser<G> {
    /// Builds a parser around a custom grammar engine.
    pub fn with_grammar(grammar: G, options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::default(),
            arena: StringArena::new(),
            functions: FunctionRegistry::core(),
            options,
            grammar,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Allows calls to an extension function, in addition to the core library.
    pub fn register_function(&mut self, name: impl Into<String>, arity: Arity) {
        self.functions.register(name, arity);
    }

    /// Strings currently owned by the arena. Zero whenever no parse is running.
    pub fn pending_strings(&self) -> usize {
        self.arena.len()
    }

    /// Parses one expression.
    ///
    /// # Errors
    ///
    /// Returns [`XPathError::Namespace`] if any qualified name used a prefix
    /// that `resolver` could not map (or if there is no resolver), and
    /// [`XPathError::Syntax`] for every other failure.
    pub fn parse(
        &mut self,
        statement: &str,
        resolver: Option<&dyn NamespaceResolver>,
    ) -> Result<Expression, XPathError> {
        log::debug!("Parsing XPath expression '{}'", statement);
        self.lexer.reset(statement);
        self.arena.release_all();

        let mut ctx = ParseContext::new(
            &mut self.lexer,
            &mut self.arena,
            NameResolver::new(resolver),
            &self.functions,
            &self.options,
        );
        let outcome = self.grammar.parse(&mut ctx);
        let namespace_error_seen = ctx.namespace_error_seen();

        match outcome {
            Ok(expr) => {
                if !self.arena.is_empty() {
                    let leaked = self.arena.release_all();
                    log::warn!(
                        "{} token string(s) were not consumed by the grammar for '{}'",
                        leaked,
                        statement
                    );
                    debug_assert_eq!(leaked, 0, "grammar left strings in the arena");
                }
                Ok(expr)
            }
            Err(reason) => {
                let released = self.arena.release_all();
                log::debug!(
                    "XPath '{}' rejected ({}); released {} pending string(s)",
                    statement,
                    reason,
                    released
                );
                let statement = statement.to_string();
                if namespace_error_seen {
                    Err(XPathError::Namespace { statement, reason })
                } else {
                    Err(XPathError::Syntax { statement, reason })
                }
            }
        }
    }
}
