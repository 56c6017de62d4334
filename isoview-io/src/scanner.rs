//! Whitespace token scanner shared by the text readers

use crate::error::{LoadError, Result};
use std::str::SplitWhitespace;

/// Forward-only cursor over the whitespace-separated tokens of a text file
pub(crate) struct Scanner<'a> {
    tokens: std::iter::Peekable<SplitWhitespace<'a>>,
    format: &'static str,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, format: &'static str) -> Self {
        Self {
            tokens: text.split_whitespace().peekable(),
            format,
        }
    }

    pub fn has_next(&mut self) -> bool {
        self.tokens.peek().is_some()
    }

    /// Whether the next token parses as a number
    pub fn has_next_number(&mut self) -> bool {
        self.tokens
            .peek()
            .is_some_and(|token| token.parse::<f64>().is_ok())
    }

    pub fn peek(&mut self) -> Option<&'a str> {
        self.tokens.peek().copied()
    }

    pub fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    /// Consume tokens up to and including the first one matching `marker`.
    /// Returns false when the input ran out first.
    pub fn skip_past(&mut self, marker: impl Fn(&str) -> bool) -> bool {
        self.tokens.by_ref().any(|token| marker(token))
    }

    /// Next token as a number; a missing or non-numeric token is a parse error
    pub fn next_number(&mut self, what: &str) -> Result<f64> {
        let token = self.tokens.next().ok_or_else(|| {
            LoadError::parse(self.format, format!("unexpected end of file reading {what}"))
        })?;
        token.parse::<f64>().map_err(|_| {
            LoadError::parse(self.format, format!("expected {what}, found '{token}'"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_and_read() {
        let mut scanner = Scanner::new("header junk ... 1.5 -2e3 word", "TEST");
        assert!(scanner.skip_past(|t| t == "..."));
        assert!(scanner.has_next_number());
        assert_eq!(scanner.next_number("x").unwrap(), 1.5);
        assert_eq!(scanner.next_number("y").unwrap(), -2000.0);
        assert!(!scanner.has_next_number());
        assert!(matches!(
            scanner.next_number("z"),
            Err(LoadError::Parse { .. })
        ));
        assert!(!scanner.has_next());
    }

    #[test]
    fn test_missing_marker() {
        let mut scanner = Scanner::new("no marker here", "TEST");
        assert!(!scanner.skip_past(|t| t == "..."));
        assert!(!scanner.has_next());
    }
}
