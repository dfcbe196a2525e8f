//! Prints the token stream and expression tree of an XPath expression.
//!
//! Run with:
//! ```
//! cargo run --example xpath_tokens -- "fo:block[@id = 'x']" --ns fo=http://www.w3.org/1999/XSL/Format
//! ```

use clap::Parser as ClapParser;
use quire::xpath1::{Token, tokenize};
use quire::{Parser, XPathError};
use std::collections::HashMap;
use std::env;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The XPath expression to inspect
    expression: String,

    /// Namespace binding in the form `prefix=uri` (repeatable)
    #[arg(long = "ns", value_parser = parse_binding)]
    bindings: Vec<(String, String)>,

    /// Only print the token stream
    #[arg(long, default_value_t = false)]
    tokens_only: bool,
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    let (prefix, uri) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected prefix=uri, got '{raw}'"))?;
    Ok((prefix.to_string(), uri.to_string()))
}

fn main() -> Result<(), XPathError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "quire_xpath1=debug");
        }
    }
    env_logger::init();

    let args = Args::parse();

    println!("Tokens:");
    for token in tokenize(&args.expression) {
        match token {
            Token::Error(reason) => println!("  error: {reason}"),
            other => println!("  {other:?}"),
        }
    }

    if args.tokens_only {
        return Ok(());
    }

    let namespaces: HashMap<String, String> = args.bindings.into_iter().collect();
    let mut parser = Parser::new();
    let expression = parser.parse(&args.expression, Some(&namespaces))?;
    println!("\nTree:\n{expression:#?}");
    Ok(())
}
