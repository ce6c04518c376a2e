//! Accessible Name
//!
//! Simplified text alternative computation for component hosts.

use halo_dom::{Document, NodeId};

use crate::{AriaDiagnostic, AriaRole, ValidationContext};

/// Accessible name of `host`: its text content, then `aria-label`, then the
/// text of the elements named by `aria-labelledby`. Whitespace-only
/// candidates are skipped.
pub fn accessible_name(doc: &Document, host: NodeId) -> Option<String> {
    let text = doc.text_content(host);
    let text = text.trim();
    if !text.is_empty() {
        return Some(text.to_string());
    }

    if let Some(label) = doc.get_attribute(host, "aria-label").map(str::trim) {
        if !label.is_empty() {
            return Some(label.to_string());
        }
    }

    let labelledby = doc.get_attribute(host, "aria-labelledby")?;
    let parts: Vec<String> = labelledby
        .split_whitespace()
        .filter_map(|id| doc.get_element_by_id(id))
        .map(|el| doc.text_content(el).trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if parts.is_empty() { None } else { Some(parts.join(" ")) }
}

/// Role of a component: explicit `role` on the target or host, else the
/// target's implicit role
pub fn component_role(doc: &Document, host: NodeId, target: NodeId) -> AriaRole {
    doc.get_attribute(target, "role")
        .or_else(|| doc.get_attribute(host, "role"))
        .and_then(AriaRole::parse)
        .unwrap_or_else(|| {
            let tag = doc.tag_name(target).unwrap_or_default();
            AriaRole::implicit(tag, doc.get_attribute(target, "type"))
        })
}

/// Validation hook reporting widgets without an accessible name
pub fn require_accessible_name(ctx: &ValidationContext<'_>, diagnostics: &mut Vec<AriaDiagnostic>) {
    let role = component_role(ctx.doc, ctx.host, ctx.target);
    if !role.is_widget() || accessible_name(ctx.doc, ctx.host).is_some() {
        return;
    }
    diagnostics.push(AriaDiagnostic::MissingAccessibleName {
        role: role.to_string(),
    });
}
