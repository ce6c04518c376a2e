//! Integration tests for halo-html
//!
//! Templates and pages converted into a live document.

use halo_dom::{Document, ShadowRootMode};
use halo_html::{parse_fragment, parse_into, HtmlParser};

#[test]
fn test_parse_form_page() {
    let mut doc = Document::default();
    let body = doc.body();
    parse_into(
        &mut doc,
        body,
        r#"
        <form id="signup">
            <input name="name" required>
            <input name="email" type="email" value="john@example.com">
            <input type="checkbox" name="newsletter" value="yes" checked>
            <textarea name="bio">Hello</textarea>
        </form>
        "#,
    )
    .unwrap();

    let form = doc.get_element_by_id("signup").unwrap();
    let controls = doc.query_selector_all(form, "input, textarea");
    assert_eq!(controls.len(), 4);
    assert!(doc.has_attribute(controls[0], "required"));
    assert_eq!(doc.value(controls[1]).as_deref(), Some("john@example.com"));
    assert_eq!(doc.checked(controls[2]), Some(true));
    assert_eq!(doc.value(controls[3]).as_deref(), Some("Hello"));
}

#[test]
fn test_template_into_shadow_root() {
    let mut doc = Document::default();
    let host = doc.create_element("div").unwrap();
    doc.append_child(doc.body(), host).unwrap();
    let root = doc.attach_shadow(host, ShadowRootMode::Open).unwrap();

    HtmlParser::new()
        .parse_into(&mut doc, root, r#"<label part="label"><slot></slot></label><input part="control">"#)
        .unwrap();

    let control = doc.query_selector(root, "[part=control]").unwrap();
    assert!(doc.is_connected(control));
    assert_eq!(doc.query_selector(doc.body(), "input"), None);
}

#[test]
fn test_entities_and_text() {
    let mut doc = Document::default();
    let nodes = parse_fragment(&mut doc, "<p>Fish &amp; chips</p>").unwrap();
    assert_eq!(doc.text_content(nodes[0]), "Fish & chips");
}
