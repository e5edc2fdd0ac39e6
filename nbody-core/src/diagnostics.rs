//! Diagnostics and error reporting for universe files
//!
//! This module provides source locations for parse errors and renders
//! errors with the offending line for the user.

use crate::parser::ParseError;

/// Byte range of a token in the source, plus its 0-indexed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }
}

/// Format a parse error with context from the source text
pub fn format_parse_error(error: &ParseError, source: &str) -> String {
    let mut msg = format!("Parse error: {}", error);

    if let Some(span) = error.span() {
        if let Some(text) = source.lines().nth(span.line) {
            msg.push_str(&format!("\n  at line {}: {}", span.line + 1, text.trim_end()));
        }
    }

    msg
}

/// Format a runtime error
pub fn format_runtime_error(error: &dyn std::error::Error) -> String {
    format!("Runtime error: {}", error)
}
