//! Quire: the XPath 1.0 front end of the document engine.
//!
//! The parsing machinery lives in the `quire-xpath1` crate and is re-exported
//! here. This crate adds namespace resolution backed by a parsed XML document.

pub mod namespaces;

pub use namespaces::ElementNamespaces;
pub use quire_xpath1 as xpath1;
pub use quire_xpath1::{
    ErrorKind, Expression, NamespaceResolver, Parser, ParserOptions, XPathError,
    parse_expression, parse_expression_with, tokenize,
};
