//! Tokenizer for range expressions

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::range::{Operator, RangeOperator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Anything that is not an operator or separator
    Version(String),
    Operator(RangeOperator),
    /// `&` or `&&`
    And,
    /// `|` or `||`
    Or,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Version(text) => write!(f, "version \"{}\"", text),
            TokenKind::Operator(op) => write!(f, "\"{}\"", op),
            TokenKind::And => f.write_str("\"&\""),
            TokenKind::Or => f.write_str("\"|\""),
            TokenKind::Comma => f.write_str("\",\""),
            TokenKind::LParen => f.write_str("\"(\""),
            TokenKind::RParen => f.write_str("\")\""),
            TokenKind::LBracket => f.write_str("\"[\""),
            TokenKind::RBracket => f.write_str("\"]\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset in the input
    pub position: usize,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '<' | '>' | '=' | '&' | '|' | ',' | '(' | ')' | '[' | ']')
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Consume the next character when it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if matches!(self.chars.peek(), Some(&(_, c)) if c == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn literal(&mut self, start: usize) -> TokenKind {
        let mut end = self.input.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if is_delimiter(c) {
                end = i;
                break;
            }
            self.chars.next();
        }
        TokenKind::Version(self.input[start..end].to_string())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (position, c) = loop {
            let (i, c) = self.chars.next()?;
            if !c.is_whitespace() {
                break (i, c);
            }
        };

        let kind = match c {
            '<' if self.eat('=') => TokenKind::Operator(RangeOperator::Compare(Operator::LessThanOrEqual)),
            '<' => TokenKind::Operator(RangeOperator::Compare(Operator::LessThan)),
            '>' if self.eat('=') => TokenKind::Operator(RangeOperator::Compare(Operator::GreaterThanOrEqual)),
            '>' => TokenKind::Operator(RangeOperator::Compare(Operator::GreaterThan)),
            '=' => {
                self.eat('=');
                TokenKind::Operator(RangeOperator::Exact)
            }
            '~' if self.eat('>') => TokenKind::Operator(RangeOperator::Pessimistic),
            '~' => TokenKind::Operator(RangeOperator::Tilde),
            '^' => TokenKind::Operator(RangeOperator::Caret),
            '&' => {
                self.eat('&');
                TokenKind::And
            }
            '|' => {
                self.eat('|');
                TokenKind::Or
            }
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            _ => self.literal(position),
        };

        Some(Token { kind, position })
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}
