//! Tests for path queries and the typed wrappers.

use flatjson::{
    PathSyntax, QueryError, Token, TokenKind, count, load, query, query_kind, query_number,
    query_str, query_string, query_with,
};

// ============================================================================
// Helper functions
// ============================================================================

fn load_doc(json: &[u8]) -> Vec<Token<'_>> {
    let n = count(json).unwrap();
    let mut toks = vec![Token::default(); n];
    assert_eq!(load(&mut toks, json).unwrap(), n);
    toks
}

// ============================================================================
// Scalar lookups
// ============================================================================

#[test]
fn test_number_by_key() {
    let toks = load_doc(br#"{"x":1,"y":2}"#);
    assert_eq!(query_number(&toks, "y").unwrap(), 2.0);
    assert_eq!(query_number(&toks, "x").unwrap(), 1.0);
}

#[test]
fn test_number_by_array_index() {
    let toks = load_doc(br#"{"a":[10,20,30]}"#);
    assert_eq!(query_number(&toks, "a[0]").unwrap(), 10.0);
    assert_eq!(query_number(&toks, "a[1]").unwrap(), 20.0);
    assert_eq!(query_number(&toks, "a[2]").unwrap(), 30.0);
}

#[test]
fn test_number_through_nested_path() {
    let toks = load_doc(br#"{"m":{"e":[{"p":{"x":3.5}}]}}"#);
    assert_eq!(query_number(&toks, "m.e[0].p.x").unwrap(), 3.5);
}

#[test]
fn test_string_copy() {
    let toks = load_doc(br#"{"s":"hi"}"#);
    let mut buf = [0u8; 8];
    let written = query_string(&mut buf, &toks, "s").unwrap();
    assert_eq!(written, 2);
    assert_eq!(&buf[..written], b"hi");
}

#[test]
fn test_string_copy_truncates() {
    let toks = load_doc(br#"{"s":"abcdef"}"#);
    let mut buf = [0u8; 4];
    let written = query_string(&mut buf, &toks, "s").unwrap();
    assert_eq!(written, 4);
    assert_eq!(&buf, b"abcd");
}

#[test]
fn test_borrowed_string_bytes() {
    let json = br#"{"s":"hi there"}"#;
    let toks = load_doc(json);
    let s = query_str(&toks, "s").unwrap();
    assert_eq!(s, b"hi there");
    // The bytes point into the caller's buffer.
    let json_range = json.as_ptr() as usize..json.as_ptr() as usize + json.len();
    assert!(json_range.contains(&(s.as_ptr() as usize)));
}

#[test]
fn test_literal_kinds() {
    let toks = load_doc(br#"{"b":true,"n":null}"#);
    assert_eq!(query_kind(&toks, "b"), TokenKind::True);
    assert_eq!(query_kind(&toks, "n"), TokenKind::Null);
    assert_eq!(query_kind(&toks, "missing"), TokenKind::None);
}

// ============================================================================
// Container results and sub-queries
// ============================================================================

#[test]
fn test_query_returns_subtree() {
    let toks = load_doc(br#"{"a":[10,20],"b":1}"#);
    let a = query(&toks, "a").unwrap();
    assert_eq!(a.len(), 3);
    assert_eq!(a[0].kind, TokenKind::Array);
    assert_eq!(a[1].text, b"10");
    assert_eq!(a[2].text, b"20");
}

#[test]
fn test_subquery_equals_full_path() {
    let json = br#"{"map":{"entity":[{"pos":{"x":4.5,"y":9.0}}]}}"#;
    let toks = load_doc(json);

    let entity = query(&toks, "map.entity[0]").unwrap();
    let via_sub = query(entity, "pos.x").unwrap();
    let via_full = query(&toks, "map.entity[0].pos.x").unwrap();
    assert_eq!(via_sub[0], via_full[0]);
    assert_eq!(query_number(entity, "pos.y").unwrap(), 9.0);
}

#[test]
fn test_kind_matches_query_result() {
    let json = br#"{"a":[1],"s":"x","t":true,"o":{"k":null}}"#;
    let toks = load_doc(json);
    for path in ["a", "a[0]", "s", "t", "o", "o.k"] {
        let found = query(&toks, path).unwrap();
        assert_eq!(query_kind(&toks, path), found[0].kind, "path {path}");
    }
}

#[test]
fn test_empty_path_addresses_root() {
    let toks = load_doc(br#"{"a":1}"#);
    let root = query(&toks, "").unwrap();
    assert_eq!(root[0].kind, TokenKind::Object);
    assert_eq!(root.len(), toks.len());
}

// ============================================================================
// Misses and type mismatches
// ============================================================================

#[test]
fn test_missing_paths() {
    let toks = load_doc(br#"{"a":{"b":[1,2]}}"#);
    assert_eq!(query(&toks, "z"), None);
    assert_eq!(query(&toks, "a.z"), None);
    assert_eq!(query(&toks, "a.b[2]"), None);
    assert_eq!(query(&toks, "a.b[0].z"), None);
    assert_eq!(query(&toks, "a.b.z"), None);
}

#[test]
fn test_prefix_of_key_does_not_match() {
    let toks = load_doc(br#"{"foobar":1}"#);
    assert_eq!(query(&toks, "foo"), None);
    assert!(query(&toks, "foobar").is_some());
}

#[test]
fn test_wrong_kind_reports_actual() {
    let toks = load_doc(br#"{"s":"hi","n":5}"#);
    assert_eq!(
        query_number(&toks, "s").unwrap_err(),
        QueryError::KindMismatch {
            found: TokenKind::String
        }
    );
    assert_eq!(
        query_str(&toks, "n").unwrap_err(),
        QueryError::KindMismatch {
            found: TokenKind::Number
        }
    );
    assert_eq!(
        query_number(&toks, "zz").unwrap_err(),
        QueryError::NotFound
    );
}

#[test]
fn test_malformed_paths_miss() {
    let toks = load_doc(br#"{"a":[1,2]}"#);
    assert_eq!(query(&toks, "a["), None);
    assert_eq!(query(&toks, "a[x]"), None);
    assert_eq!(query(&toks, "a[-1]"), None);
    assert_eq!(query(&toks, "a[0]junk"), None);
}

// ============================================================================
// Path syntax configuration
// ============================================================================

#[test]
fn test_custom_delimiter() {
    let toks = load_doc(br#"{"a":{"b":[5,6]}}"#);
    let syntax = PathSyntax { delimiter: b'/' };
    let found = query_with(&toks, "a/b[1]", &syntax).unwrap();
    assert_eq!(found[0].text, b"6");
    // Dots are plain key bytes under a different delimiter.
    assert_eq!(query_with(&toks, "a.b", &syntax), None);
}

#[test]
fn test_key_containing_delimiter_char() {
    let toks = load_doc(br#"{"a.b":1,"a":{"b":2}}"#);
    // With '.' the path splits; with '/' the dotted key is addressable.
    assert_eq!(query_number(&toks, "a.b").unwrap(), 2.0);
    let syntax = PathSyntax { delimiter: b'/' };
    let found = query_with(&toks, "a.b", &syntax).unwrap();
    assert_eq!(found[0].text, b"1");
}
