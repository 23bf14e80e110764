//! Default front-end: a recursive descent parser over [`lexer`] tokens.
//!
//! The parser never builds ranges itself. It reports each recognized
//! construct as a [`Production`] to a [`ProductionSink`], normally the
//! [`RangeBuilder`](crate::bridge::RangeBuilder).
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! range        := maven_ranges | union
//! maven_ranges := maven_range (',' maven_range)*
//! maven_range  := ('[' | '(') version? (',' version?)? (']' | ')')
//! union        := logical (('|' | '||') logical)*
//! logical      := term (('&' | '&&' | ',')? term)*
//! term         := '(' union ')' | operator version | wildcard | version (',' version)*
//! ```

pub mod lexer;

use thiserror::Error;

use crate::bridge::{Logical, MavenBound, Production, ProductionSink};
use crate::range::{expand, RangeError};
use lexer::{Token, TokenKind};

/// Syntax error reported by the parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct SyntaxError {
    pub position: usize,
    pub message: String,
}

enum Interrupt {
    Syntax(SyntaxError),
    Reduce(RangeError),
}

impl From<RangeError> for Interrupt {
    fn from(err: RangeError) -> Self {
        Interrupt::Reduce(err)
    }
}

type Step = Result<(), Interrupt>;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    end: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Parser {
            tokens: lexer::tokenize(input),
            pos: 0,
            end: input.len(),
        }
    }

    /// Parse `input`, feeding productions to `sink`.
    ///
    /// Stops at the first syntax error and returns it; everything reduced
    /// before that point stays in the sink. Errors raised by the sink
    /// itself abort the parse.
    pub fn parse<S: ProductionSink>(input: &str, sink: &mut S) -> Result<Option<SyntaxError>, RangeError> {
        let mut parser = Parser::new(input);
        match parser.range(sink) {
            Ok(()) => Ok(None),
            Err(Interrupt::Syntax(err)) => Ok(Some(err)),
            Err(Interrupt::Reduce(err)) => Err(err),
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map(|t| t.position).unwrap_or(self.end)
    }

    fn error<T>(&self, message: String) -> Result<T, Interrupt> {
        Err(Interrupt::Syntax(SyntaxError {
            position: self.position(),
            message,
        }))
    }

    fn unexpected<T>(&self, expected: &str) -> Result<T, Interrupt> {
        match self.peek() {
            Some(kind) => self.error(format!("expected {}, found {}", expected, kind)),
            None => self.error(format!("expected {}, found end of input", expected)),
        }
    }

    fn starts_term(&self) -> bool {
        matches!(
            self.peek(),
            Some(TokenKind::LParen) | Some(TokenKind::Operator(_)) | Some(TokenKind::Version(_))
        )
    }

    /// Bracket ranges start with `[`, or with a `(` group that holds a
    /// comma and no operators.
    fn is_maven(&self) -> bool {
        match self.tokens.first().map(|t| &t.kind) {
            Some(TokenKind::LBracket) => true,
            Some(TokenKind::LParen) => {
                let mut comma = false;
                for token in &self.tokens[1..] {
                    match token.kind {
                        TokenKind::RParen | TokenKind::RBracket => return comma,
                        TokenKind::Comma => comma = true,
                        TokenKind::Version(_) => {}
                        _ => return false,
                    }
                }
                false
            }
            _ => false,
        }
    }

    fn range<S: ProductionSink>(&mut self, sink: &mut S) -> Step {
        if self.tokens.is_empty() {
            return self.error("empty range".to_string());
        }
        if self.is_maven() {
            self.maven_ranges(sink)?;
        } else {
            self.union(sink)?;
        }
        if self.peek().is_some() {
            return self.unexpected("end of input");
        }
        sink.reduce(Production::Range)?;
        Ok(())
    }

    fn union<S: ProductionSink>(&mut self, sink: &mut S) -> Step {
        self.logical(sink)?;
        while let Some(TokenKind::Or) = self.peek() {
            self.bump();
            self.logical(sink)?;
            sink.reduce(Production::UnionRange)?;
        }
        Ok(())
    }

    fn logical<S: ProductionSink>(&mut self, sink: &mut S) -> Step {
        self.term(sink)?;
        loop {
            match self.peek() {
                Some(TokenKind::And) | Some(TokenKind::Comma) => {
                    self.bump();
                    if !self.starts_term() {
                        return self.unexpected("a range");
                    }
                    self.term(sink)?;
                    sink.reduce(Production::LogicalRange(Logical::And))?;
                }
                _ if self.starts_term() => {
                    self.term(sink)?;
                    sink.reduce(Production::LogicalRange(Logical::Implicit))?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn term<S: ProductionSink>(&mut self, sink: &mut S) -> Step {
        match self.peek().cloned() {
            Some(TokenKind::LParen) => {
                self.bump();
                self.union(sink)?;
                if self.peek() != Some(&TokenKind::RParen) {
                    return self.unexpected("\")\"");
                }
                self.bump();
                sink.reduce(Production::LogicalRange(Logical::Grouped))?;
                Ok(())
            }
            Some(TokenKind::Operator(op)) => {
                self.bump();
                match self.peek().cloned() {
                    Some(TokenKind::Version(text)) => {
                        self.version(sink, &text)?;
                        sink.reduce(Production::SimpleRange(op))?;
                        Ok(())
                    }
                    _ => self.unexpected("a version"),
                }
            }
            Some(TokenKind::Version(text)) if expand::is_wildcard(&text) => {
                self.bump();
                sink.reduce(Production::WildcardRange(text))?;
                Ok(())
            }
            Some(TokenKind::Version(text)) => {
                self.version(sink, &text)?;
                let mut len = 1;
                while let (Some(TokenKind::Comma), Some(TokenKind::Version(next))) = (self.peek(), self.peek_at(1)) {
                    if expand::is_wildcard(next) {
                        break;
                    }
                    let next = next.clone();
                    self.bump();
                    self.version(sink, &next)?;
                    len += 1;
                }
                sink.reduce(Production::VersionSet(len))?;
                Ok(())
            }
            _ => self.unexpected("a range"),
        }
    }

    /// Consume the version literal under the cursor.
    fn version<S: ProductionSink>(&mut self, sink: &mut S, text: &str) -> Step {
        let production = Production::version(text);
        if let Production::NamedVersion(_) = production {
            if self.tokens.len() != 1 {
                return self.error(format!("named version \"{}\" must be the whole range", text));
            }
        }
        self.bump();
        sink.reduce(production)?;
        Ok(())
    }

    fn maven_ranges<S: ProductionSink>(&mut self, sink: &mut S) -> Step {
        self.maven_range(sink)?;
        let mut len = 1;
        while let Some(TokenKind::Comma) = self.peek() {
            self.bump();
            self.maven_range(sink)?;
            len += 1;
        }
        sink.reduce(Production::MavenRanges(len))?;
        Ok(())
    }

    /// Optional version inside brackets; a lone `-` counts as absent.
    fn maven_version<S: ProductionSink>(&mut self, sink: &mut S) -> Result<bool, Interrupt> {
        match self.peek().cloned() {
            Some(TokenKind::Version(text)) if text == "-" => {
                self.bump();
                Ok(false)
            }
            Some(TokenKind::Version(text)) => {
                self.version(sink, &text)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn maven_range<S: ProductionSink>(&mut self, sink: &mut S) -> Step {
        let lower_inclusive = match self.peek() {
            Some(TokenKind::LBracket) => true,
            Some(TokenKind::LParen) => false,
            _ => return self.unexpected("\"[\" or \"(\""),
        };
        self.bump();

        let lower_present = self.maven_version(sink)?;
        let mut interval = false;
        let mut upper_present = false;
        if let Some(TokenKind::Comma) = self.peek() {
            self.bump();
            interval = true;
            upper_present = self.maven_version(sink)?;
        }

        let upper_inclusive = match self.peek() {
            Some(TokenKind::RBracket) => true,
            Some(TokenKind::RParen) => false,
            _ => return self.unexpected("\"]\" or \")\""),
        };
        self.bump();

        sink.reduce(Production::MavenRange {
            lower: MavenBound {
                inclusive: lower_inclusive,
                present: lower_present,
            },
            upper: MavenBound {
                inclusive: upper_inclusive,
                present: upper_present,
            },
            interval,
        })?;
        Ok(())
    }
}
