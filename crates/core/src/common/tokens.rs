//! Whitespace token reader for the test-vector text format.
//!
//! The format is a flat stream of whitespace-separated tokens; line breaks carry no
//! meaning. Hex numbers may carry an optional `0x`/`0X` prefix.

use std::str::SplitAsciiWhitespace;

use super::error::{Error, Result};

/// Sequential reader over the tokens of a test-vector text.
#[derive(Debug)]
pub struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    /// Creates a reader positioned at the first token of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_ascii_whitespace(),
            consumed: 0,
        }
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_opt(&mut self) -> Option<&'a str> {
        let token = self.inner.next()?;
        self.consumed += 1;
        Some(token)
    }

    /// Returns the next token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] naming `what` if the input is exhausted.
    pub fn next_token(&mut self, what: &str) -> Result<&'a str> {
        self.next_opt().ok_or_else(|| {
            Error::MalformedInput(format!(
                "input ended after {} tokens while reading {what}",
                self.consumed
            ))
        })
    }

    /// Reads the next token as a hexadecimal `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the input is exhausted or the token is not a
    /// hex number that fits in 64 bits.
    pub fn next_hex(&mut self, what: &str) -> Result<u64> {
        let token = self.next_token(what)?;
        parse_hex(token).ok_or_else(|| {
            Error::MalformedInput(format!("expected hex value for {what}, found `{token}`"))
        })
    }

    /// Reads the next token as a decimal count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the input is exhausted or the token is not a
    /// decimal number.
    pub fn next_dec(&mut self, what: &str) -> Result<usize> {
        let token = self.next_token(what)?;
        token.parse().map_err(|_| {
            Error::MalformedInput(format!("expected decimal value for {what}, found `{token}`"))
        })
    }

    /// Number of tokens read so far.
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Counts the tokens left unread, consuming the reader.
    pub fn remaining(self) -> usize {
        self.inner.count()
    }
}

/// Parses a hex token with an optional `0x`/`0X` prefix.
pub fn parse_hex(token: &str) -> Option<u64> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || digits.starts_with('+') {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}
