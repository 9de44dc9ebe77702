//! Integration tests for character reference decoding.

use std::borrow::Cow;

use sift_html::entities::{lookup_entity, unescape};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp"), Some('&'));
    assert_eq!(lookup_entity("lt"), Some('<'));
    assert_eq!(lookup_entity("nbsp"), Some('\u{00A0}'));
    assert_eq!(lookup_entity("eacute"), Some('é'));
    assert_eq!(lookup_entity("yuml"), Some('ÿ'));
    assert_eq!(lookup_entity("Omega"), Some('Ω'));
    assert_eq!(lookup_entity("sigmaf"), Some('ς'));
    assert_eq!(lookup_entity("hellip"), Some('…'));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_unescape_without_references_borrows() {
    assert!(matches!(unescape("plain text"), Cow::Borrowed("plain text")));
}

#[test]
fn test_unescape_named() {
    assert_eq!(unescape("S&amp;P &copy; &mdash; &Agrave;"), "S&P © — À");
}

#[test]
fn test_unescape_numeric() {
    assert_eq!(unescape("&#65;&#x42;&#X43;&#100"), "ABCd");
    assert_eq!(unescape("&#0;&#xD800;&#99999999;"), "\u{FFFD}\u{FFFD}\u{FFFD}");
}

#[test]
fn test_unescape_legacy_without_semicolon() {
    assert_eq!(unescape("a &amp b &lt c"), "a & b < c");
    // Only the legacy names work without the semicolon.
    assert_eq!(unescape("&copy 2024"), "&copy 2024");
}

#[test]
fn test_unescape_leaves_unknown_and_malformed() {
    assert_eq!(unescape("&bogus; & &; &#; &#x;"), "&bogus; & &; &#; &#x;");
    assert_eq!(unescape("?a=1&ltd=2"), "?a=1&ltd=2");
    assert_eq!(unescape("trailing &"), "trailing &");
}
