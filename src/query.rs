//! Path queries over loaded token arrays.
//!
//! The walker interprets a flat token array as a tree using only the
//! `children` and `sub` counters. Inside an object it steps name to name,
//! jumping `sub + 2` tokens when a value is a container and 2 when it is a
//! scalar; inside an array it steps element to element the same way. One
//! path segment therefore costs at most one pass over a single container's
//! direct members, never a scan of the whole array.
//!
//! A successful query returns the addressed value's subtree slice: the
//! value token followed by its `sub` descendants. That slice has the same
//! shape as a loaded array, so query results can be queried again:
//!
//! ```
//! use flatjson::{count, load, query, Token};
//!
//! let json = br#"{"m":{"e":7}}"#;
//! let mut toks = vec![Token::default(); count(json).unwrap()];
//! load(&mut toks, json).unwrap();
//!
//! let m = query(&toks, "m").unwrap();
//! assert_eq!(query(m, "e").unwrap()[0].text, b"7");
//! assert_eq!(query(&toks, "m.e").unwrap()[0].text, b"7");
//! ```

use crate::error::QueryError;
use crate::number;
use crate::path::{PathSyntax, Segment, Segments};
use crate::token::{Token, TokenKind};

/// Addresses a value with the default `.` delimiter.
///
/// Returns the value token and its descendants, or `None` when the path
/// does not lex or no such node exists. An empty path addresses the root.
pub fn query<'t, 'a>(toks: &'t [Token<'a>], path: &str) -> Option<&'t [Token<'a>]> {
    query_with(toks, path, &PathSyntax::default())
}

/// Addresses a value with an explicit path syntax.
pub fn query_with<'t, 'a>(
    toks: &'t [Token<'a>],
    path: &str,
    syntax: &PathSyntax,
) -> Option<&'t [Token<'a>]> {
    if toks.is_empty() {
        return None;
    }
    let mut segments = Segments::new(path, syntax.delimiter);
    let mut seg = match segments.next() {
        None => return Some(subtree(toks, 0)),
        Some(Ok(seg)) => seg,
        Some(Err(_)) => return None,
    };

    let mut i = 0usize;
    let mut begin = true;
    loop {
        let cur = *toks.get(i)?;
        if !begin && !cur.is_container() {
            // Scalar reached with path segments left over.
            return None;
        }

        // An array is entered through a bracket segment; only the shape-blind
        // initial descent may treat a root array like an object body.
        let array_descent =
            cur.kind == TokenKind::Array && (!begin || matches!(seg, Segment::Index(_)));
        if array_descent {
            let Segment::Index(n) = seg else {
                return None;
            };
            if n >= cur.children as usize {
                return None;
            }
            i += 1;
            for _ in 0..n {
                let element = toks.get(i)?;
                i += 1 + if element.is_container() {
                    element.sub as usize
                } else {
                    0
                };
            }
            toks.get(i)?;
            begin = false;
            seg = match segments.next() {
                None => return Some(subtree(toks, i)),
                Some(Ok(next)) => next,
                Some(Err(_)) => return None,
            };
            continue;
        }

        // Object descent: step over the container header, then compare
        // names pair by pair.
        let size = if begin {
            toks.len()
        } else {
            cur.children as usize
        };
        begin = false;
        i += 1;
        let mut pair = 0usize;
        loop {
            if pair >= size {
                return None;
            }
            let name = toks.get(i)?;
            let matched = matches!(seg, Segment::Name(want) if name.text == want);
            if matched {
                let value_at = i + 1;
                let value = toks.get(value_at)?;
                match segments.next() {
                    None => return Some(subtree(toks, value_at)),
                    Some(Ok(next)) => {
                        if !value.is_container() {
                            return None;
                        }
                        seg = next;
                        i = value_at;
                        break;
                    }
                    Some(Err(_)) => return None,
                }
            } else {
                let value = toks.get(i + 1)?;
                i += 2 + if value.is_container() {
                    value.sub as usize
                } else {
                    0
                };
                pair += 1;
            }
        }
    }
}

/// The kind of the value at `path`, or [`TokenKind::None`] when missing.
pub fn query_kind(toks: &[Token<'_>], path: &str) -> TokenKind {
    match query(toks, path) {
        Some(sub) => sub[0].kind,
        None => TokenKind::None,
    }
}

/// The numeric value at `path`.
pub fn query_number(toks: &[Token<'_>], path: &str) -> Result<f64, QueryError> {
    let found = query(toks, path).ok_or(QueryError::NotFound)?;
    let tok = found[0];
    if tok.kind != TokenKind::Number {
        return Err(QueryError::KindMismatch { found: tok.kind });
    }
    number::convert(tok.text).ok_or(QueryError::MalformedNumber)
}

/// The string bytes at `path`, borrowed from the input buffer.
///
/// Escape sequences are not decoded.
pub fn query_str<'a>(toks: &[Token<'a>], path: &str) -> Result<&'a [u8], QueryError> {
    let found = query(toks, path).ok_or(QueryError::NotFound)?;
    let tok = found[0];
    if tok.kind != TokenKind::String {
        return Err(QueryError::KindMismatch { found: tok.kind });
    }
    Ok(tok.text)
}

/// Copies the string at `path` into `dst`, truncating to `dst.len()`.
///
/// Returns the number of bytes written.
pub fn query_string(dst: &mut [u8], toks: &[Token<'_>], path: &str) -> Result<usize, QueryError> {
    let found = query(toks, path).ok_or(QueryError::NotFound)?;
    let tok = found[0];
    if tok.kind != TokenKind::String {
        return Err(QueryError::KindMismatch { found: tok.kind });
    }
    Ok(tok.copy_to(dst))
}

/// The slice holding the token at `i` and all its descendants.
fn subtree<'t, 'a>(toks: &'t [Token<'a>], i: usize) -> &'t [Token<'a>] {
    let end = (i + 1 + toks[i].sub as usize).min(toks.len());
    &toks[i..end]
}
