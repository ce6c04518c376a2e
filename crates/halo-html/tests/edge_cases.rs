//! Edge case tests for halo-html
//!
//! Empty input, stray whitespace and markup html5ever has to repair.

use halo_dom::Document;
use halo_html::parse_fragment;

#[test]
fn test_empty_markup() {
    let mut doc = Document::default();
    let nodes = parse_fragment(&mut doc, "").unwrap();
    assert!(nodes.is_empty());
}

#[test]
fn test_whitespace_only_markup() {
    let mut doc = Document::default();
    let nodes = parse_fragment(&mut doc, "   \n\t  ").unwrap();
    assert!(nodes.is_empty());
}

#[test]
fn test_comments_are_dropped() {
    let mut doc = Document::default();
    let nodes = parse_fragment(&mut doc, "<!-- only a comment --><span>kept</span>").unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(doc.tag_name(nodes[0]), Some("span"));
}

#[test]
fn test_unclosed_tags_are_repaired() {
    let mut doc = Document::default();
    let nodes = parse_fragment(&mut doc, "<div><p>one<p>two").unwrap();
    assert_eq!(nodes.len(), 1);
    let paragraphs = doc.query_selector_all(nodes[0], "p");
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(doc.text_content(paragraphs[1]), "two");
}

#[test]
fn test_attribute_names_are_lowercased() {
    let mut doc = Document::default();
    let nodes = parse_fragment(&mut doc, r#"<BUTTON ARIA-LABEL="Close" Disabled>x</BUTTON>"#).unwrap();
    assert_eq!(doc.tag_name(nodes[0]), Some("button"));
    assert_eq!(doc.get_attribute(nodes[0], "aria-label"), Some("Close"));
    assert!(doc.has_attribute(nodes[0], "disabled"));
}

#[test]
fn test_unicode_text() {
    let mut doc = Document::default();
    let nodes = parse_fragment(&mut doc, "<span>こんにちは 🚀</span>").unwrap();
    assert_eq!(doc.text_content(nodes[0]), "こんにちは 🚀");
}
