//! Single-pass XPath 1.0 tokenizer.
//!
//! The lexer never backtracks. Whether `*`, `and`, `or`, `mod` and `div` are
//! operators depends only on the kind of the previously emitted token, tracked
//! by [`OperatorContext`]. Names are resolved into axis names, node types,
//! function names or name tests with at most one character of lookahead after
//! skipping whitespace.

use crate::ast::Axis;
use crate::chars::{CharClass, classify, is_space_or_newline};
use crate::token::{ComparisonOp, LexError, NumericOp, OperatorContext, Token};

/// Characters at or above this value never trigger punctuation dispatch.
const INTERESTING_LIMIT: char = '\u{FF}';

const NODE_TYPE_NAMES: [&str; 3] = ["comment", "text", "node"];
const PROCESSING_INSTRUCTION: &str = "processing-instruction";

/// Pull-based tokenizer over one expression string.
#[derive(Debug, Default)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    context: OperatorContext,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut lexer = Self::default();
        lexer.reset(input);
        lexer
    }

    /// Loads a new input, rewinding the cursor and the operator context.
    pub fn reset(&mut self, input: &str) {
        self.chars.clear();
        self.chars.extend(input.chars());
        self.pos = 0;
        self.context.reset();
    }

    /// The cursor, counted in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Input length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn context(&self) -> OperatorContext {
        self.context
    }

    /// Produces the next token and records its kind as the new operator context.
    pub fn next_token(&mut self) -> Token<String> {
        let token = self.scan();
        self.context.record(token.kind());
        log::trace!("xpath token at {}: {:?}", self.pos, token);
        token
    }

    fn scan(&mut self) -> Token<String> {
        self.skip_whitespace();

        if self.pos >= self.chars.len() {
            return Token::End;
        }

        if let Some(code) = self.peek_current() {
            match code {
                '(' => return self.advance_with(Token::LParen, 1),
                ')' => return self.advance_with(Token::RParen, 1),
                '[' => return self.advance_with(Token::LBracket, 1),
                ']' => return self.advance_with(Token::RBracket, 1),
                '@' => return self.advance_with(Token::At, 1),
                ',' => return self.advance_with(Token::Comma, 1),
                '|' => return self.advance_with(Token::Pipe, 1),
                '\'' | '"' => return self.lex_literal(),
                '0'..='9' => return self.lex_number(),
                '.' => {
                    return match self.peek_ahead() {
                        Some('.') => self.advance_with(Token::DotDot, 2),
                        Some('0'..='9') => self.lex_number(),
                        _ => self.advance_with(Token::Dot, 1),
                    };
                }
                '/' => {
                    return match self.peek_ahead() {
                        Some('/') => self.advance_with(Token::SlashSlash, 2),
                        _ => self.advance_with(Token::Slash, 1),
                    };
                }
                '+' => return self.advance_with(Token::Plus, 1),
                '-' => return self.advance_with(Token::Minus, 1),
                '=' => return self.advance_with(Token::EqOp(ComparisonOp::Equal), 1),
                '!' => {
                    return match self.peek_ahead() {
                        Some('=') => self.advance_with(Token::EqOp(ComparisonOp::NotEqual), 2),
                        _ => Token::Error(LexError::LoneBang { position: self.pos }),
                    };
                }
                '<' => {
                    return match self.peek_ahead() {
                        Some('=') => self.advance_with(Token::RelOp(ComparisonOp::LessOrEqual), 2),
                        _ => self.advance_with(Token::RelOp(ComparisonOp::LessThan), 1),
                    };
                }
                '>' => {
                    return match self.peek_ahead() {
                        Some('=') => {
                            self.advance_with(Token::RelOp(ComparisonOp::GreaterOrEqual), 2)
                        }
                        _ => self.advance_with(Token::RelOp(ComparisonOp::GreaterThan), 1),
                    };
                }
                '*' => {
                    if self.context.expects_operator() {
                        return self.advance_with(Token::MulOp(NumericOp::Multiply), 1);
                    }
                    return self.advance_with(Token::NameTest("*".to_string()), 1);
                }
                '$' => {
                    self.pos += 1;
                    let start = self.pos;
                    return match self.lex_qname() {
                        Some(name) => Token::VariableReference(name),
                        None => Token::Error(LexError::MalformedQName { position: start }),
                    };
                }
                _ => {}
            }
        }

        self.lex_name()
    }

    fn lex_name(&mut self) -> Token<String> {
        let start = self.pos;
        let Some(mut name) = self.lex_ncname() else {
            return Token::Error(LexError::InvalidNameStart { position: start });
        };

        self.skip_whitespace();

        if self.context.expects_operator() {
            match name.as_str() {
                "and" => return Token::And,
                "or" => return Token::Or,
                "mod" => return Token::MulOp(NumericOp::Modulo),
                "div" => return Token::MulOp(NumericOp::Divide),
                _ => {}
            }
        }

        if self.peek_current() == Some(':') {
            self.pos += 1;
            if self.peek_current() == Some(':') {
                self.pos += 1;
                return match Axis::from_name(&name) {
                    Some(axis) => Token::AxisName(axis),
                    None => Token::Error(LexError::UnknownAxis { name }),
                };
            }

            self.skip_whitespace();
            if self.peek_current() == Some('*') {
                self.pos += 1;
                name.push_str(":*");
                return Token::NameTest(name);
            }

            let local_start = self.pos;
            let Some(local) = self.lex_ncname() else {
                return Token::Error(LexError::MalformedQName {
                    position: local_start,
                });
            };
            name.push(':');
            name.push_str(&local);
        }

        self.skip_whitespace();
        if self.peek_current() == Some('(') {
            // The parenthesis stays in the input for the grammar.
            if name == PROCESSING_INSTRUCTION {
                return Token::ProcessingInstruction(name);
            }
            if NODE_TYPE_NAMES.contains(&name.as_str()) {
                return Token::NodeType(name);
            }
            return Token::FunctionName(name);
        }

        Token::NameTest(name)
    }

    fn lex_literal(&mut self) -> Token<String> {
        let delimiter = self.chars[self.pos];
        let start = self.pos + 1;

        match self.chars[start..].iter().position(|&c| c == delimiter) {
            Some(offset) => {
                let value: String = self.chars[start..start + offset].iter().collect();
                self.pos = start + offset + 1;
                Token::Literal(value)
            }
            None => {
                self.pos = self.chars.len();
                Token::Error(LexError::UnterminatedLiteral { start: start - 1 })
            }
        }
    }

    /// Digits with at most one `.`; stops at the first character that does not fit.
    fn lex_number(&mut self) -> Token<String> {
        let start = self.pos;
        let mut seen_dot = false;

        while let Some(&c) = self.chars.get(self.pos) {
            if c >= INTERESTING_LIMIT {
                break;
            }
            if !c.is_ascii_digit() {
                if c == '.' && !seen_dot {
                    seen_dot = true;
                } else {
                    break;
                }
            }
            self.pos += 1;
        }

        Token::Number(self.chars[start..self.pos].iter().collect())
    }

    fn lex_ncname(&mut self) -> Option<String> {
        let start = self.pos;
        let first = *self.chars.get(self.pos)?;
        if classify(first) != CharClass::NameStart {
            return None;
        }

        self.pos += 1;
        while let Some(&c) = self.chars.get(self.pos) {
            if classify(c) == CharClass::NotPartOfName {
                break;
            }
            self.pos += 1;
        }

        Some(self.chars[start..self.pos].iter().collect())
    }

    /// `NCName` or `NCName ':' NCName`, whitespace allowed around the colon.
    fn lex_qname(&mut self) -> Option<String> {
        let mut name = self.lex_ncname()?;

        self.skip_whitespace();
        if self.peek_current() != Some(':') || self.peek_ahead() == Some(':') {
            return Some(name);
        }

        self.pos += 1;
        self.skip_whitespace();
        let local = self.lex_ncname()?;
        name.push(':');
        name.push_str(&local);
        Some(name)
    }

    fn skip_whitespace(&mut self) {
        while self
            .chars
            .get(self.pos)
            .is_some_and(|&c| is_space_or_newline(c))
        {
            self.pos += 1;
        }
    }

    fn peek_current(&self) -> Option<char> {
        self.chars
            .get(self.pos)
            .copied()
            .filter(|&c| c < INTERESTING_LIMIT)
    }

    fn peek_ahead(&self) -> Option<char> {
        self.chars
            .get(self.pos + 1)
            .copied()
            .filter(|&c| c < INTERESTING_LIMIT)
    }

    fn advance_with(&mut self, token: Token<String>, advance: usize) -> Token<String> {
        self.pos += advance;
        token
    }
}

/// Tokenizes a whole expression, stopping after the first end or error token.
pub fn tokenize(input: &str) -> Vec<Token<String>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = matches!(token, Token::End | Token::Error(_));
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
