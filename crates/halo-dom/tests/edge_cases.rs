//! Edge case tests for halo-dom
//!
//! Boundary conditions for tree mutation, attributes, selectors, native
//! controls and the virtual clock.

use std::time::Duration;

use halo_dom::{Document, DomError, InputType, NodeId, ShadowRootMode};

fn element(doc: &mut Document, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = doc.create_element(tag).unwrap();
    for (name, value) in attrs {
        doc.set_attribute(id, name, value).unwrap();
    }
    id
}

// ============================================================================
// TREE
// ============================================================================

#[test]
fn test_cannot_append_ancestor_into_descendant() {
    let mut doc = Document::default();
    let outer = element(&mut doc, "div", &[]);
    let inner = element(&mut doc, "span", &[]);
    doc.append_child(outer, inner).unwrap();
    assert!(matches!(
        doc.append_child(inner, outer),
        Err(DomError::HierarchyRequest { .. })
    ));
    assert!(matches!(
        doc.append_child(outer, outer),
        Err(DomError::HierarchyRequest { .. })
    ));
}

#[test]
fn test_text_nodes_cannot_have_children() {
    let mut doc = Document::default();
    let text = doc.create_text("hello");
    let span = element(&mut doc, "span", &[]);
    assert!(doc.append_child(text, span).is_err());
}

#[test]
fn test_remove_non_child_fails() {
    let mut doc = Document::default();
    let a = element(&mut doc, "div", &[]);
    let b = element(&mut doc, "div", &[]);
    assert!(matches!(doc.remove_child(a, b), Err(DomError::NotAChild { .. })));
}

#[test]
fn test_append_moves_existing_child() {
    let mut doc = Document::default();
    let a = element(&mut doc, "div", &[]);
    let b = element(&mut doc, "div", &[]);
    let child = element(&mut doc, "p", &[]);
    doc.append_child(a, child).unwrap();
    doc.append_child(b, child).unwrap();
    assert!(doc.children(a).is_empty());
    assert_eq!(doc.children(b), &[child]);
    assert_eq!(doc.parent(child), Some(b));
}

#[test]
fn test_second_shadow_root_is_rejected() {
    let mut doc = Document::default();
    let host = element(&mut doc, "div", &[]);
    doc.attach_shadow(host, ShadowRootMode::Open).unwrap();
    assert!(matches!(
        doc.attach_shadow(host, ShadowRootMode::Open),
        Err(DomError::ShadowRootExists(_))
    ));
}

#[test]
fn test_closed_root_is_hidden_but_connected() {
    let mut doc = Document::default();
    let host = element(&mut doc, "div", &[]);
    doc.append_child(doc.body(), host).unwrap();
    let root = doc.attach_shadow(host, ShadowRootMode::Closed).unwrap();
    let inner = element(&mut doc, "span", &[("id", "inside")]);
    doc.append_child(root, inner).unwrap();

    assert_eq!(doc.shadow_root(host), None);
    assert!(doc.is_connected(inner));
    assert_eq!(doc.get_element_by_id("inside"), None);
}

#[test]
fn test_set_text_content_replaces_children() {
    let mut doc = Document::default();
    let p = element(&mut doc, "p", &[]);
    let span = element(&mut doc, "span", &[]);
    doc.append_child(p, span).unwrap();
    doc.set_text_content(p, "plain").unwrap();
    assert_eq!(doc.children(p).len(), 1);
    assert_eq!(doc.text_content(p), "plain");
    assert_eq!(doc.parent(span), None);
}

// ============================================================================
// ATTRIBUTES AND SELECTORS
// ============================================================================

#[test]
fn test_toggle_attribute_force() {
    let mut doc = Document::default();
    let button = element(&mut doc, "button", &[]);
    doc.toggle_attribute(button, "disabled", true).unwrap();
    assert_eq!(doc.get_attribute(button, "disabled"), Some(""));
    doc.toggle_attribute(button, "disabled", true).unwrap();
    assert!(doc.has_attribute(button, "disabled"));
    doc.toggle_attribute(button, "disabled", false).unwrap();
    assert!(!doc.has_attribute(button, "disabled"));
}

#[test]
fn test_attributes_on_text_node_fail() {
    let mut doc = Document::default();
    let text = doc.create_text("x");
    assert!(matches!(
        doc.set_attribute(text, "id", "a"),
        Err(DomError::NotAnElement(_))
    ));
    assert_eq!(doc.get_attribute(text, "id"), None);
}

#[test]
fn test_selector_lists_and_attribute_values() {
    let mut doc = Document::default();
    let form = element(&mut doc, "form", &[]);
    doc.append_child(doc.body(), form).unwrap();
    let name = element(&mut doc, "input", &[("name", "name"), ("class", "field wide")]);
    let email = element(&mut doc, "input", &[("type", "email"), ("name", "email")]);
    let area = element(&mut doc, "textarea", &[]);
    for id in [name, email, area] {
        doc.append_child(form, id).unwrap();
    }

    assert_eq!(doc.query_selector_all(form, "[type=email], textarea"), vec![email, area]);
    assert_eq!(doc.query_selector(form, "input.wide"), Some(name));
    assert_eq!(doc.query_selector(form, "[name=\"email\"]"), Some(email));
    assert_eq!(doc.query_selector(form, "select"), None);
}

#[test]
fn test_query_does_not_enter_shadow_trees() {
    let mut doc = Document::default();
    let host = element(&mut doc, "div", &[]);
    doc.append_child(doc.body(), host).unwrap();
    let root = doc.attach_shadow(host, ShadowRootMode::Open).unwrap();
    let hidden = element(&mut doc, "input", &[]);
    doc.append_child(root, hidden).unwrap();

    assert_eq!(doc.query_selector(doc.body(), "input"), None);
    assert_eq!(doc.query_selector(root, "input"), Some(hidden));
}

// ============================================================================
// NATIVE CONTROLS
// ============================================================================

#[test]
fn test_unknown_input_type_is_text() {
    let mut doc = Document::default();
    let input = element(&mut doc, "input", &[("type", "hologram")]);
    assert_eq!(doc.input_type(input), Some(InputType::Text));
    assert_eq!(doc.input_type(doc.body()), None);
}

#[test]
fn test_checkbox_value_defaults_to_on() {
    let mut doc = Document::default();
    let checkbox = element(&mut doc, "input", &[("type", "checkbox")]);
    assert_eq!(doc.value(checkbox).as_deref(), Some("on"));
    doc.set_value(checkbox, "yes").unwrap();
    assert_eq!(doc.get_attribute(checkbox, "value"), Some("yes"));
}

#[test]
fn test_select_value_falls_back_to_first_option_text() {
    let mut doc = Document::default();
    let select = element(&mut doc, "select", &[]);
    for label in ["  Small ", "Large"] {
        let option = element(&mut doc, "option", &[]);
        doc.set_text_content(option, label).unwrap();
        doc.append_child(select, option).unwrap();
    }
    assert_eq!(doc.value(select).as_deref(), Some("Small"));
}

#[test]
fn test_radio_group_is_scoped_to_tree() {
    let mut doc = Document::default();
    let outside = element(&mut doc, "input", &[("type", "radio"), ("name", "plan")]);
    doc.append_child(doc.body(), outside).unwrap();
    let host = element(&mut doc, "div", &[]);
    doc.append_child(doc.body(), host).unwrap();
    let root = doc.attach_shadow(host, ShadowRootMode::Open).unwrap();
    let inside = element(&mut doc, "input", &[("type", "radio"), ("name", "plan")]);
    doc.append_child(root, inside).unwrap();

    doc.set_checked(outside, true).unwrap();
    doc.set_checked(inside, true).unwrap();
    assert_eq!(doc.checked(outside), Some(true));
    assert_eq!(doc.checked(inside), Some(true));
}

#[test]
fn test_required_radio_group_satisfied_by_any_member() {
    let mut doc = Document::default();
    let a = element(&mut doc, "input", &[("type", "radio"), ("name", "size"), ("required", "")]);
    let b = element(&mut doc, "input", &[("type", "radio"), ("name", "size")]);
    doc.append_child(doc.body(), a).unwrap();
    doc.append_child(doc.body(), b).unwrap();

    assert!(doc.validity(a).value_missing);
    doc.set_checked(b, true).unwrap();
    assert!(doc.validity(a).is_valid());
}

#[test]
fn test_custom_validity_message_wins() {
    let mut doc = Document::default();
    let input = element(&mut doc, "input", &[("required", "")]);
    doc.set_custom_validity(input, "Pick a username").unwrap();
    assert_eq!(doc.validation_message(input), "Pick a username");
    doc.set_custom_validity(input, "").unwrap();
    assert_eq!(doc.validation_message(input), "Please fill out this field.");
}

#[test]
fn test_readonly_and_hidden_controls_are_barred() {
    let mut doc = Document::default();
    let readonly = element(&mut doc, "input", &[("required", ""), ("readonly", "")]);
    let hidden = element(&mut doc, "input", &[("type", "hidden"), ("required", "")]);
    assert!(!doc.will_validate(readonly));
    assert!(!doc.will_validate(hidden));
    assert!(doc.validity(readonly).is_valid());
}

#[test]
fn test_reset_form_cancelled_keeps_values() {
    let mut doc = Document::default();
    let form = element(&mut doc, "form", &[]);
    let input = element(&mut doc, "input", &[("value", "default")]);
    doc.append_child(doc.body(), form).unwrap();
    doc.append_child(form, input).unwrap();
    doc.set_value(input, "typed").unwrap();
    doc.add_event_listener(form, halo_dom::EventType::Reset, |_doc, event| event.prevent_default());

    assert!(!doc.reset_form(form));
    assert_eq!(doc.value(input).as_deref(), Some("typed"));
}

// ============================================================================
// SCHEDULER
// ============================================================================

#[test]
fn test_timer_due_exactly_at_deadline_fires() {
    let mut doc = Document::default();
    let fired = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = std::rc::Rc::clone(&fired);
    doc.set_timeout(Duration::from_secs(5), move |_doc| flag.set(true));
    doc.advance_time(Duration::from_secs(5));
    assert!(fired.get());
    assert_eq!(doc.pending_timers(), 0);
}

#[test]
fn test_cleared_timer_never_fires() {
    let mut doc = Document::default();
    let id = doc.set_timeout(Duration::from_millis(1), |doc| doc.set_text_content(doc.body(), "late").unwrap());
    assert!(doc.clear_timeout(id));
    assert!(!doc.clear_timeout(id));
    assert_eq!(doc.advance_time(Duration::from_secs(1)), 0);
    assert_eq!(doc.text_content(doc.body()), "");
}

#[test]
fn test_zero_advance_runs_pending_microtasks() {
    let mut doc = Document::default();
    doc.queue_microtask(|doc| doc.set_text_content(doc.body(), "ran").unwrap());
    doc.advance_time(Duration::ZERO);
    assert_eq!(doc.text_content(doc.body()), "ran");
}
