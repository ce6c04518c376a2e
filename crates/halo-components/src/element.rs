//! Field Elements
//!
//! `CustomElement` behaviour shared by every descriptor-built component.
//! The control kind decides which form-control accessors are exposed and
//! what activation does.

use std::any::Any;
use std::cell::Cell;

use halo_dom::{CustomElement, Document, DomError, Event, EventType, InputType, ListenerOptions, NodeId};

use crate::{Component, ComponentDescriptor, ComponentError, ControlKind};

pub(crate) struct HaloElement {
    component: Component,
    kind: ControlKind,
    options_copied: Cell<bool>,
}

impl HaloElement {
    pub(crate) fn new(doc: &mut Document, host: NodeId, descriptor: &ComponentDescriptor) -> Result<Self, ComponentError> {
        let component = Component::new(doc, host, &descriptor.class_name, descriptor.config.clone())?;
        if descriptor.kind == ControlKind::Action {
            // Runs after the click was relayed to the host
            let on_click = move |doc: &mut Document, event: &mut Event| {
                if !event.is_default_prevented() {
                    run_form_action(doc, host);
                }
            };
            component.listen(doc, component.target(), EventType::Click, ListenerOptions::default(), on_click);
        }
        Ok(Self {
            component,
            kind: descriptor.kind,
            options_copied: Cell::new(false),
        })
    }

    pub(crate) fn component(&self) -> &Component {
        &self.component
    }

    /// Copy the host's light `<option>` children into the inner select
    fn copy_options(&self, doc: &mut Document) -> Result<(), DomError> {
        let host = self.component.host();
        let target = self.component.target();
        let options: Vec<NodeId> = doc
            .descendants(host)
            .into_iter()
            .filter(|&id| doc.tag_name(id) == Some("option"))
            .collect();

        for option in options {
            let copy = doc.create_element("option")?;
            for name in ["value", "selected", "disabled"] {
                if let Some(value) = doc.get_attribute(option, name).map(str::to_string) {
                    doc.set_attribute(copy, name, &value)?;
                }
            }
            let text = doc.text_content(option);
            doc.set_text_content(copy, text.trim())?;
            doc.append_child(target, copy)?;
        }
        Ok(())
    }

    fn toggle(&self, doc: &mut Document) -> Result<(), DomError> {
        let target = self.component.target();
        let before = doc.checked(target).unwrap_or(false);
        let next = doc.input_type(target) == Some(InputType::Radio) || !before;
        doc.set_checked(target, next)?;
        if next != before {
            doc.fire(target, EventType::Input);
            doc.fire(target, EventType::Change);
        }
        Ok(())
    }
}

/// Submit or reset the form owner of an action host, per its `type`
fn run_form_action(doc: &mut Document, host: NodeId) {
    let action = doc.get_attribute(host, "type").map(str::to_ascii_lowercase);
    let Some(form) = doc.closest_form(host) else {
        tracing::trace!("Action {:?} has no form owner", host);
        return;
    };
    match action.as_deref() {
        Some("submit") => {
            doc.request_submit(form);
        }
        Some("reset") => {
            doc.reset_form(form);
        }
        _ => {}
    }
}

impl CustomElement for HaloElement {
    fn connected(&self, doc: &mut Document) {
        if self.kind == ControlKind::Choice && !self.options_copied.replace(true) {
            if let Err(err) = self.copy_options(doc) {
                tracing::warn!("[{}] failed to copy options: {}", self.component.name(), err);
            }
        }
        self.component.connected(doc);
    }

    fn disconnected(&self, doc: &mut Document) {
        self.component.disconnected(doc);
    }

    fn attribute_changed(&self, doc: &mut Document, name: &str, old: Option<&str>, new: Option<&str>) {
        self.component.attribute_changed(doc, name, old, new);
    }

    fn form_reset(&self, doc: &mut Document) {
        if !self.kind.has_value() {
            return;
        }
        doc.reset_control(self.component.target());
        for name in ["value", "checked"] {
            if self.component.config().handler(name).is_some() {
                self.component.replay_attribute(doc, name);
            }
        }
    }

    fn value(&self, doc: &Document) -> Option<String> {
        if !self.kind.has_value() {
            return None;
        }
        self.component.value(doc)
    }

    fn set_value(&self, doc: &mut Document, value: &str) -> bool {
        self.kind.has_value() && matches!(self.component.set_value(doc, value), Ok(true))
    }

    fn checked(&self, doc: &Document) -> Option<bool> {
        if self.kind != ControlKind::Toggle {
            return None;
        }
        self.component.checked(doc)
    }

    fn set_checked(&self, doc: &mut Document, checked: bool) -> bool {
        self.kind == ControlKind::Toggle && matches!(self.component.set_checked(doc, checked), Ok(true))
    }

    fn activation_behavior(&self, doc: &mut Document) {
        match self.kind {
            ControlKind::Toggle => {
                if let Err(err) = self.toggle(doc) {
                    tracing::warn!("[{}] toggle failed: {}", self.component.name(), err);
                }
            }
            ControlKind::Action => run_form_action(doc, self.component.host()),
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
