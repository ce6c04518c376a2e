//! Control discovery and single-control validation

use std::collections::HashMap;

use halo_dom::forms::is_simple_email;
use halo_dom::{Document, NodeId, ValidityState};

use super::FormConfig;

/// Native `input`/`select`/`textarea` (excluding button inputs) or a
/// form-associated custom element
pub(crate) fn is_control(doc: &Document, id: NodeId) -> bool {
    if doc.is_form_associated(id) {
        return true;
    }
    doc.is_native_control(id) && !doc.input_type(id).is_some_and(|t| t.is_button())
}

/// Controls among the light descendants of `host`, in document order
pub(crate) fn discover_controls(doc: &Document, host: NodeId) -> Vec<NodeId> {
    doc.descendants(host)
        .into_iter()
        .filter(|&id| is_control(doc, id))
        .collect()
}

/// Checkbox or radio, native or custom
pub(crate) fn is_checkbox_like(doc: &Document, id: NodeId) -> bool {
    doc.is_checkable(id)
        || (doc.is_custom_element(id) && matches!(doc.get_attribute(id, "type"), Some("checkbox" | "radio")))
}

/// Checkedness from the `checked` property, else the presence attribute
pub(crate) fn is_checked(doc: &Document, id: NodeId) -> bool {
    doc.checked(id).unwrap_or_else(|| doc.has_attribute(id, "checked"))
}

fn is_blank(doc: &Document, id: NodeId) -> bool {
    if is_checkbox_like(doc, id) {
        return !is_checked(doc, id);
    }
    doc.value(id).unwrap_or_default().trim().is_empty()
}

/// Error message for `id`, or `None` when it passes
pub(crate) fn control_error(doc: &Document, id: NodeId, config: &FormConfig) -> Option<String> {
    if doc.is_native_control(id) {
        if !doc.will_validate(id) {
            return None;
        }
        let validity = doc.validity(id);
        if !validity.is_valid() {
            return Some(validity.validation_message());
        }
        // Native validation accepts whitespace-only values
        if doc.has_attribute(id, "required") && is_blank(doc, id) {
            let mut missing = ValidityState::default();
            missing.value_missing = true;
            return Some(missing.validation_message());
        }
        return None;
    }

    if doc.has_attribute(id, "disabled") {
        return None;
    }
    if doc.has_attribute(id, "required") && is_blank(doc, id) {
        return Some(config.required_message.clone());
    }
    if doc.get_attribute(id, "type") == Some("email") {
        let value = doc.value(id).unwrap_or_default();
        if !value.is_empty() && !is_simple_email(&value) {
            return Some(config.email_message.clone());
        }
    }
    None
}

/// Human label for a control in the error summary
pub(crate) fn control_label(doc: &Document, id: NodeId) -> String {
    ["aria-label", "name"]
        .into_iter()
        .filter_map(|name| doc.get_attribute(id, name))
        .map(str::trim)
        .find(|label| !label.is_empty())
        .unwrap_or("Field")
        .to_string()
}

/// "Please correct N error(s): label: message; ..." in control order
pub(crate) fn error_summary(doc: &Document, controls: &[NodeId], errors: &HashMap<NodeId, String>) -> String {
    let details: Vec<String> = controls
        .iter()
        .filter_map(|id| errors.get(id).map(|message| format!("{}: {}", control_label(doc, *id), message)))
        .collect();
    format!("Please correct {} error(s): {}", details.len(), details.join("; "))
}
