//! Flat JSON tokens.
//!
//! A [`Token`] describes one JSON value as a borrowed span of the input
//! buffer plus two structural counters:
//!
//! - `children` - direct pair count for objects, element count for arrays
//! - `sub` - total transitive descendant tokens, excluding the token itself
//!
//! The counters are what make a flat token array navigable as a tree: the
//! descendants of the token at index `i` occupy indices `i+1 ..= i+sub`,
//! so a sibling is reached by a single jump and no parent pointers are
//! needed.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The eight JSON value kinds a token can carry.
///
/// `None` marks an unwritten or missing token; it never appears in a
/// successfully loaded array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    /// Invalid or missing token
    #[default]
    None,
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// Numeric literal
    Number,
    /// Quoted string
    String,
    /// `true` constant
    True,
    /// `false` constant
    False,
    /// `null` constant
    Null,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::None => "none",
            TokenKind::Object => "object",
            TokenKind::Array => "array",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// One JSON value, borrowing its text from the caller's input buffer.
///
/// For `String` tokens the span excludes the surrounding quotes; for
/// `Object` and `Array` tokens it includes the braces/brackets. The input
/// buffer must outlive every token read from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token<'a> {
    /// Value kind, classified from the first byte of the span.
    pub kind: TokenKind,
    /// Borrowed span of the input buffer.
    pub text: &'a [u8],
    /// Direct pair count (objects) or element count (arrays); 0 for scalars.
    pub children: u32,
    /// Total descendant tokens, excluding this one; 0 for scalars.
    pub sub: u32,
}

impl<'a> Token<'a> {
    /// True for `Object` and `Array` tokens.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.kind, TokenKind::Object | TokenKind::Array)
    }

    /// Compares the token text against `s`, byte for byte.
    ///
    /// The comparison is exact: lengths must match as well as content.
    #[inline]
    pub fn text_eq(&self, s: &str) -> bool {
        self.text == s.as_bytes()
    }

    /// Copies the token text into `dst`, truncating to `dst.len()`.
    ///
    /// Returns the number of bytes written.
    pub fn copy_to(&self, dst: &mut [u8]) -> usize {
        let n = self.text.len().min(dst.len());
        dst[..n].copy_from_slice(&self.text[..n]);
        n
    }

    /// Converts a numeric token to a floating point value.
    ///
    /// Uses a simple decimal model: the integer, fraction, and exponent
    /// subfields are folded separately and combined as
    /// `(int + frac) * 10^exp`. Returns `None` when the text is not a
    /// well-formed numeric lexeme.
    #[inline]
    pub fn number(&self) -> Option<f64> {
        crate::number::convert(self.text)
    }

    /// Returns the token text as a `&str` when it is valid UTF-8.
    ///
    /// Escape sequences are not decoded; the bytes are exactly the span of
    /// the input buffer.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.text).ok()
    }
}

/// A name/value pair read from an object body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<'a> {
    pub name: Token<'a>,
    pub value: Token<'a>,
}

/// Classifies a token span by its first byte.
pub(crate) fn classify(text: &[u8]) -> TokenKind {
    match text.first() {
        None => TokenKind::None,
        Some(b'{') => TokenKind::Object,
        Some(b'[') => TokenKind::Array,
        Some(b'"') => TokenKind::String,
        Some(b't') => TokenKind::True,
        Some(b'f') => TokenKind::False,
        Some(b'n') => TokenKind::Null,
        Some(_) => TokenKind::Number,
    }
}
