//! Filling flat token arrays.
//!
//! [`count`] sizes the array a document needs; [`load`] fills a
//! caller-supplied slice in document order by reading the document root and
//! recursively enumerating the members of every container token. The
//! recursion depth equals the document's nesting depth, so it is bounded by
//! [`LoadLimits::max_depth`] to keep adversarial inputs from exhausting the
//! stack.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, ParseError};
use crate::reader::TokenReader;
use crate::token::Token;

/// Bounds for [`load_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadLimits {
    /// Maximum container nesting depth (default: 1024).
    pub max_depth: usize,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self { max_depth: 1024 }
    }
}

/// Counts the tokens needed to load `json`.
///
/// Runs the tokenizer over the document and accumulates `1 + sub` for each
/// top-level value. Returns `Ok(0)` for empty input.
///
/// # Example
///
/// ```
/// let n = flatjson::count(br#"{"x":1,"y":2}"#).unwrap();
/// assert_eq!(n, 5); // root object, two names, two values
/// ```
pub fn count(json: &[u8]) -> Result<usize, ParseError> {
    let mut reader = TokenReader::new(json);
    let mut total = 0usize;
    while let Some(tok) = reader.read()? {
        total += 1 + tok.sub as usize;
    }
    Ok(total)
}

/// Loads `json` into `toks` in document order with default limits.
///
/// Returns the number of tokens written. On
/// [`OutOfTokens`](LoadError::OutOfTokens) the filled prefix is left in
/// place and the error reports how many tokens it holds.
pub fn load<'a>(toks: &mut [Token<'a>], json: &'a [u8]) -> Result<usize, LoadError> {
    load_with(toks, json, &LoadLimits::default())
}

/// Loads `json` into `toks` with explicit limits.
pub fn load_with<'a>(
    toks: &mut [Token<'a>],
    json: &'a [u8],
    limits: &LoadLimits,
) -> Result<usize, LoadError> {
    if json.is_empty() {
        return Err(LoadError::EmptyInput);
    }
    let mut written = 0usize;
    let mut reader = TokenReader::new(json);
    while let Some(tok) = reader.read()? {
        place(toks, &mut written, tok, 0, limits)?;
    }
    Ok(written)
}

/// Writes one token, then recursively writes its members.
fn place<'a>(
    toks: &mut [Token<'a>],
    written: &mut usize,
    tok: Token<'a>,
    depth: usize,
    limits: &LoadLimits,
) -> Result<(), LoadError> {
    if depth >= limits.max_depth {
        return Err(LoadError::TooDeep { depth });
    }
    if *written >= toks.len() {
        return Err(LoadError::OutOfTokens { written: *written });
    }
    let index = *written;
    toks[index] = tok;
    *written += 1;
    if tok.is_container() {
        let mut members = TokenReader::members(tok.text);
        while let Some(member) = members.read()? {
            place(toks, written, member, depth + 1, limits)?;
        }
        // The members must add up to the descendant count the container
        // token was read with.
        debug_assert_eq!(*written - index, 1 + tok.sub as usize);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_count_matches_load() {
        let json = br#"{"a":[10,20,30],"b":{"c":true}}"#;
        let n = count(json).unwrap();
        let mut toks = vec![Token::default(); n];
        assert_eq!(load(&mut toks, json).unwrap(), n);
    }

    #[test]
    fn test_load_prefix_order() {
        let json = br#"{"a":[10,20]}"#;
        let mut toks = vec![Token::default(); 8];
        let written = load(&mut toks, json).unwrap();
        assert_eq!(written, 5);
        assert_eq!(toks[0].kind, TokenKind::Object);
        assert_eq!(toks[1].text, b"a");
        assert_eq!(toks[2].kind, TokenKind::Array);
        assert_eq!(toks[2].children, 2);
        assert_eq!(toks[2].sub, 2);
        assert_eq!(toks[3].text, b"10");
        assert_eq!(toks[4].text, b"20");
    }

    #[test]
    fn test_out_of_tokens_keeps_prefix() {
        let json = br#"{"a":1,"b":2}"#;
        let mut toks = vec![Token::default(); 2];
        let err = load(&mut toks, json).unwrap_err();
        assert_eq!(err, LoadError::OutOfTokens { written: 2 });
        assert_eq!(toks[0].kind, TokenKind::Object);
        assert_eq!(toks[1].text, b"a");
    }

    #[test]
    fn test_depth_limit() {
        let json = br#"{"a":{"b":{"c":1}}}"#;
        let mut toks = vec![Token::default(); 16];
        let limits = LoadLimits { max_depth: 2 };
        let err = load_with(&mut toks, json, &limits).unwrap_err();
        assert_eq!(err, LoadError::TooDeep { depth: 2 });

        let limits = LoadLimits { max_depth: 8 };
        assert!(load_with(&mut toks, json, &limits).is_ok());
    }

    #[test]
    fn test_empty_input() {
        let mut toks = vec![Token::default(); 4];
        assert_eq!(load(&mut toks, b"").unwrap_err(), LoadError::EmptyInput);
        assert_eq!(count(b"").unwrap(), 0);
    }
}
