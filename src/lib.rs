//! # flatjson
//!
//! Zero-allocation JSON tokenizing and path queries over caller-owned buffers.
//!
//! This crate lexes a JSON document held in a contiguous byte buffer into a
//! flat array of [`Token`]s. Each token borrows its text from the input
//! buffer; nothing is copied, decoded, or heap-allocated. The flat array is
//! laid out in document order, and every container token records how many
//! descendant tokens follow it, so a dotted path like `soldier.position.x`
//! can be resolved by skipping whole subtrees without re-parsing.
//!
//! ## Quick Start
//!
//! ```
//! use flatjson::{count, load, query_number, Token};
//!
//! let json = br#"{"soldier":{"position":{"x":17.5,"y":3.0}}}"#;
//!
//! // Size the token array, then fill it.
//! let needed = count(json).unwrap();
//! let mut toks = vec![Token::default(); needed];
//! let written = load(&mut toks, json).unwrap();
//! assert_eq!(written, needed);
//!
//! // Address values by path.
//! let x = query_number(&toks, "soldier.position.x").unwrap();
//! assert_eq!(x, 17.5);
//! ```
//!
//! ## Flat token arrays
//!
//! A loaded array starts with the document root and continues depth-first.
//! For `{"x":1,"y":2}` the five tokens are:
//!
//! ```text
//! Index:    0               1    2    3    4
//! Token:    Object          "x"  1    "y"  2
//! children: 2 (pairs)       0    0    0    0
//! sub:      4 (descendants) 0    0    0    0
//! ```
//!
//! A token at index `i` with `sub = s` owns exactly the tokens at
//! `i+1 ..= i+s`; its right sibling, if any, starts at `i+s+1`. Queries
//! return the addressed value's subtree slice, so the result of one query
//! can be queried again.
//!
//! ## Accepted grammar
//!
//! The grammar is deliberately looser than RFC 8259: `=` works as a
//! key/value separator, items may be separated by whitespace instead of
//! commas, and unquoted values are lexed as bare runs of printable ASCII
//! typed by their first byte. Strings are validated for escape prefixes and
//! UTF-8 lead/continuation structure but never decoded.
//!
//! ## Features
//!
//! - `std` (default) - implements `std::error::Error` for the error types
//! - `serde` - `Serialize`/`Deserialize` for the plain config and kind types

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod error;
mod loader;
mod number;
mod path;
mod query;
mod reader;
mod tables;
mod token;

pub use error::{LoadError, ParseError, QueryError};
pub use loader::{LoadLimits, count, load, load_with};
pub use path::PathSyntax;
pub use query::{query, query_kind, query_number, query_str, query_string, query_with};
pub use reader::TokenReader;
pub use token::{Pair, Token, TokenKind};
