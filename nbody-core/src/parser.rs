//! Initial-condition reader
//!
//! A universe file is a stream of whitespace-separated tokens:
//!
//! ```text
//! N
//! radius
//! px py vx vy mass image     (N rows)
//! ```
//!
//! Line breaks carry no meaning. Anything after the last body is ignored,
//! which lets data files end with free-form notes.

use crate::diagnostics::Span;
use crate::universe::{Body, Universe, UniverseError};
use glam::DVec2;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("expected {expected}, found '{token}'")]
    InvalidNumber {
        expected: String,
        token: String,
        span: Span,
    },
    #[error("body count must be a non-negative integer, found '{token}'")]
    InvalidCount { token: String, span: Span },
    #[error("invalid body: {source}")]
    InvalidBody {
        #[source]
        source: UniverseError,
        span: Option<Span>,
    },
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedEof { .. } => None,
            Self::InvalidNumber { span, .. } | Self::InvalidCount { span, .. } => Some(*span),
            Self::InvalidBody { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    span: Span,
}

/// Splits on whitespace while keeping byte offsets and line numbers
struct Tokens<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0, line: 0 }
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let rest = &self.source[self.pos..];
        let mut start = None;
        for (offset, ch) in rest.char_indices() {
            match (start, ch.is_whitespace()) {
                (None, true) => {
                    if ch == '\n' {
                        self.line += 1;
                    }
                }
                (None, false) => start = Some(offset),
                (Some(s), true) => {
                    let token = self.token(s, offset);
                    self.pos += offset;
                    return Some(token);
                }
                (Some(_), false) => {}
            }
        }
        let s = start?;
        let token = self.token(s, rest.len());
        self.pos = self.source.len();
        Some(token)
    }

    fn token(&self, start: usize, end: usize) -> Token<'a> {
        Token {
            text: &self.source[self.pos + start..self.pos + end],
            span: Span::new(self.pos + start, self.pos + end, self.line),
        }
    }

    fn expect(&mut self, expected: &str) -> Result<Token<'a>, ParseError> {
        self.next_token().ok_or_else(|| ParseError::UnexpectedEof {
            expected: expected.to_string(),
        })
    }

    fn expect_f64(&mut self, expected: &str) -> Result<(f64, Span), ParseError> {
        let token = self.expect(expected)?;
        let value = token
            .text
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber {
                expected: expected.to_string(),
                token: token.text.to_string(),
                span: token.span,
            })?;
        Ok((value, token.span))
    }
}

/// Parse a universe file into its validated initial state
pub fn parse_universe(source: &str) -> Result<Universe, ParseError> {
    let mut tokens = Tokens::new(source);

    let count_token = tokens.expect("body count")?;
    let count = count_token
        .text
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidCount {
            token: count_token.text.to_string(),
            span: count_token.span,
        })?;
    let (radius, radius_span) = tokens.expect_f64("universe radius")?;

    // Each body needs at least six tokens, so the count cannot outrun the text
    let capacity = count.min(source.len() / 12 + 1);
    let mut bodies = Vec::with_capacity(capacity);
    let mut body_spans = Vec::with_capacity(capacity);
    for index in 0..count {
        let (px, span) = tokens.expect_f64(&format!("x position of body {}", index))?;
        let (py, _) = tokens.expect_f64(&format!("y position of body {}", index))?;
        let (vx, _) = tokens.expect_f64(&format!("x velocity of body {}", index))?;
        let (vy, _) = tokens.expect_f64(&format!("y velocity of body {}", index))?;
        let (mass, _) = tokens.expect_f64(&format!("mass of body {}", index))?;
        let image = tokens.expect(&format!("image name of body {}", index))?;

        bodies.push(Body::new(
            DVec2::new(px, py),
            DVec2::new(vx, vy),
            mass,
            image.text,
        ));
        body_spans.push(span);
    }

    if let Some(extra) = tokens.next_token() {
        debug!(line = extra.span.line + 1, "ignoring text after last body");
    }

    Universe::new(radius, bodies).map_err(|source| {
        let span = match &source {
            UniverseError::NonPositiveMass { index, .. } | UniverseError::NonFinite { index, .. } => {
                body_spans.get(*index).copied()
            }
            UniverseError::InvalidRadius(_) => Some(radius_span),
        };
        ParseError::InvalidBody { source, span }
    })
}
