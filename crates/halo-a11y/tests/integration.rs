//! Integration tests for halo-a11y
//!
//! Policies evaluated against documents built from markup.

use halo_a11y::{AriaDiagnostic, AriaEngine, AriaPolicy, ChangeMode, ValidationContext, require_accessible_name};
use halo_dom::{Document, NodeId};
use halo_html::parse_into;

fn page(markup: &str) -> (Document, NodeId, NodeId) {
    let mut doc = Document::default();
    let body = doc.body();
    parse_into(&mut doc, body, markup).unwrap();
    let host = doc.get_element_by_id("host").unwrap();
    let target = doc.query_selector(host, "[part=control]").unwrap();
    (doc, host, target)
}

fn field_engine() -> AriaEngine {
    AriaEngine::new(
        "HaloInput",
        AriaPolicy::new()
            .with_dynamic("aria-label")
            .with_dynamic("aria-describedby")
            .with_references("aria-describedby"),
    )
    .with_hook(Some(require_accessible_name))
}

#[test]
fn test_dangling_reference_clears_once_target_exists() {
    let (mut doc, host, target) = page(r#"<div id="host" aria-describedby="hint"><input part="control"></div>"#);
    let engine = field_engine();
    engine
        .handle_change(&mut doc, target, "aria-describedby", Some("hint"), ChangeMode::Replay)
        .unwrap();

    let ctx = ValidationContext { doc: &doc, host, target, component: "HaloInput" };
    let messages: Vec<String> = engine.validate(&ctx).iter().map(ToString::to_string).collect();
    assert!(messages.iter().any(|m| m.contains("does not exist in the document")));

    let body = doc.body();
    parse_into(&mut doc, body, r#"<p id="hint">We never share it.</p>"#).unwrap();
    let ctx = ValidationContext { doc: &doc, host, target, component: "HaloInput" };
    let diagnostics = engine.validate(&ctx);
    assert!(!diagnostics.iter().any(|d| matches!(d, AriaDiagnostic::DanglingReference { .. })));
}

#[test]
fn test_labelledby_provides_accessible_name() {
    let (doc, host, target) = page(
        r#"<span id="lbl">Email address</span>
           <div id="host" aria-labelledby="lbl"><input part="control"></div>"#,
    );
    let engine = field_engine();
    let ctx = ValidationContext { doc: &doc, host, target, component: "HaloInput" };
    assert!(engine.validate(&ctx).is_empty());
}

#[test]
fn test_unnamed_control_reports_role() {
    let (doc, host, target) = page(r#"<div id="host"><input part="control" type="checkbox"></div>"#);
    let engine = field_engine();
    let ctx = ValidationContext { doc: &doc, host, target, component: "HaloInput" };
    assert_eq!(
        engine.validate(&ctx),
        vec![AriaDiagnostic::MissingAccessibleName { role: "checkbox".into() }]
    );
}

#[test]
fn test_multiple_references_each_checked() {
    let (mut doc, host, target) = page(
        r#"<p id="a">A</p><div id="host"><input part="control" aria-label="x"></div>"#,
    );
    let engine = field_engine();
    engine
        .handle_change(&mut doc, target, "aria-describedby", Some("a b  c"), ChangeMode::Change)
        .unwrap();
    let ctx = ValidationContext { doc: &doc, host, target, component: "HaloInput" };
    let missing: Vec<String> = engine
        .validate(&ctx)
        .into_iter()
        .filter_map(|d| match d {
            AriaDiagnostic::DanglingReference { id, .. } => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(missing, vec!["b", "c"]);
}
