//! Shell-like splitting of a command line into tokens.
//!
//! Two quoting policies exist. [`Policy::Strict`] behaves like a POSIX shell
//! without escapes: quoted spans join with adjacent text and an unterminated
//! quote is an error. [`Policy::Lenient`] never fails: a quote that is never
//! closed is dropped and the rest of the line is split normally.

use crate::error::CommandError;
use serde::Deserialize;

/// Quoting policy for [`tokenize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Unterminated quotes fail with [`CommandError::MissingQuote`].
    #[default]
    Strict,
    /// Unterminated quotes are dropped; never fails.
    Lenient,
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Split `input` (command text without the prefix) into tokens.
pub fn tokenize(input: &str, policy: Policy) -> Result<Vec<String>, CommandError> {
    match policy {
        Policy::Strict => split_strict(input),
        Policy::Lenient => Ok(split_lenient(input)),
    }
}

fn split_strict(input: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // An empty quoted span still starts a token.
    let mut started = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if started {
                tokens.push(std::mem::take(&mut current));
                started = false;
            }
        } else if is_quote(c) {
            let mut closed = false;
            for inner in chars.by_ref() {
                if inner == c {
                    closed = true;
                    break;
                }
                current.push(inner);
            }
            if !closed {
                return Err(CommandError::MissingQuote);
            }
            started = true;
        } else {
            current.push(c);
            started = true;
        }
    }

    if started {
        tokens.push(current);
    }
    Ok(tokens)
}

fn split_lenient(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        let width = c.len_utf8();
        if c.is_whitespace() {
            rest = &rest[width..];
        } else if is_quote(c) {
            let body = &rest[width..];
            match body.find(c) {
                Some(end) => {
                    tokens.push(body[..end].to_string());
                    rest = &body[end + width..];
                }
                None => rest = body,
            }
        } else {
            let end = rest
                .find(|ch: char| ch.is_whitespace() || is_quote(ch))
                .unwrap_or(rest.len());
            tokens.push(rest[..end].to_string());
            rest = &rest[end..];
        }
    }

    tokens
}
