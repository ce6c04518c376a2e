//! User Interaction
//!
//! Activation behaviour for clicks, typed input, focus changes and form
//! submission/reset, expressed as event sequences on the document.

use crate::{Document, DomError, Event, EventType, InputType, NodeId};

/// What a click on a button does to its form owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonAction {
    Submit,
    Reset,
}

impl Document {
    /// Click `target`; returns `false` if the click was cancelled
    pub fn click(&mut self, target: NodeId) -> bool {
        if self.has_attribute(target, "disabled") {
            tracing::trace!("Ignoring click on disabled {:?}", target);
            return false;
        }

        // Checkable inputs flip before dispatch and roll back on cancel
        let toggled = self.pre_activate(target);
        let mut event = Event::new(EventType::Click);
        let accepted = self.dispatch_event(target, &mut event);

        if let Some(previous) = toggled {
            if accepted {
                let was_checked = previous.iter().any(|&(id, checked)| id == target && checked);
                if self.checked(target) != Some(was_checked) {
                    self.fire(target, EventType::Input);
                    self.fire(target, EventType::Change);
                }
            } else {
                for (id, checked) in previous {
                    if let Some(element) = self.element_mut(id) {
                        element.control.checked = Some(checked);
                    }
                }
            }
            return accepted;
        }

        if !accepted {
            return false;
        }
        if let Some(instance) = self.custom_element(target) {
            instance.activation_behavior(self);
        } else if let Some(action) = self.button_action(target) {
            match self.closest_form(target) {
                Some(form) => match action {
                    ButtonAction::Submit => {
                        self.request_submit(form);
                    }
                    ButtonAction::Reset => {
                        self.reset_form(form);
                    }
                },
                None => tracing::trace!("Button {:?} has no form owner", target),
            }
        }
        true
    }

    /// Toggle a native checkbox/radio, returning the prior checkedness to restore
    fn pre_activate(&mut self, target: NodeId) -> Option<Vec<(NodeId, bool)>> {
        let kind = self.input_type(target).filter(|t| t.is_checkable())?;
        let group = match kind {
            InputType::Radio => self.radio_group(target),
            _ => vec![target],
        };
        let previous: Vec<(NodeId, bool)> = group
            .into_iter()
            .map(|id| (id, self.checked(id).unwrap_or(false)))
            .collect();
        let next = match kind {
            InputType::Radio => true,
            _ => !self.checked(target).unwrap_or(false),
        };
        // Cannot fail: `target` is a checkable input
        let _ = self.set_checked(target, next);
        Some(previous)
    }

    fn button_action(&self, id: NodeId) -> Option<ButtonAction> {
        match self.tag_name(id)? {
            "button" => match self.get_attribute(id, "type").map(str::to_ascii_lowercase).as_deref() {
                None | Some("submit") => Some(ButtonAction::Submit),
                Some("reset") => Some(ButtonAction::Reset),
                _ => None,
            },
            "input" => match self.input_type(id)? {
                InputType::Submit | InputType::Image => Some(ButtonAction::Submit),
                InputType::Reset => Some(ButtonAction::Reset),
                _ => None,
            },
            _ => None,
        }
    }

    /// Nearest `<form>` ancestor in the flattened tree.
    ///
    /// Custom elements that wrap an inner form are followed to that form.
    pub fn closest_form(&self, node: NodeId) -> Option<NodeId> {
        let mut current = self.flat_parent(node);
        while let Some(id) = current {
            if self.tag_name(id) == Some("form") {
                return Some(id);
            }
            let inner = self.custom_element(id).and_then(|c| c.form_target());
            if let Some(inner) = inner.filter(|&f| self.tag_name(f) == Some("form")) {
                return Some(inner);
            }
            current = self.flat_parent(id);
        }
        None
    }

    /// Type into a control: set the value, then fire `input` and `change`
    pub fn simulate_input(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        self.set_value(node, value)?;
        self.fire(node, EventType::Input);
        self.fire(node, EventType::Change);
        Ok(())
    }

    pub fn focus(&mut self, node: NodeId) {
        self.fire(node, EventType::Focus);
    }

    pub fn blur(&mut self, node: NodeId) {
        self.fire(node, EventType::Blur);
    }

    /// Submit a form the way a submit button would.
    ///
    /// Runs native constraint validation unless the form carries
    /// `novalidate`, then dispatches a cancelable `submit`. Returns whether
    /// the submission went through.
    pub fn request_submit(&mut self, form: NodeId) -> bool {
        let form = self.resolve_form(form);
        if !self.has_attribute(form, "novalidate") {
            let mut valid = true;
            for control in self.native_controls(form) {
                valid &= self.check_validity(control);
            }
            if !valid {
                tracing::debug!("Submission of {:?} blocked by constraint validation", form);
                return false;
            }
        }

        if !self.fire(form, EventType::Submit) {
            tracing::debug!("Submission of {:?} cancelled", form);
            return false;
        }
        tracing::info!("Form {:?} submitted", form);
        self.submissions.push(form);
        true
    }

    /// Reset a form; controls return to their defaults unless `reset` is cancelled
    pub fn reset_form(&mut self, form: NodeId) -> bool {
        let form = self.resolve_form(form);
        if !self.fire(form, EventType::Reset) {
            return false;
        }
        for control in self.native_controls(form) {
            self.reset_control(control);
        }
        true
    }

    fn resolve_form(&self, form: NodeId) -> NodeId {
        self.custom_element(form)
            .and_then(|c| c.form_target())
            .unwrap_or(form)
    }

    fn native_controls(&self, form: NodeId) -> Vec<NodeId> {
        self.descendants(form)
            .into_iter()
            .filter(|&id| self.is_native_control(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShadowRootMode;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn log_events(doc: &mut Document, node: NodeId, types: &[EventType]) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for ty in types {
            let log = Rc::clone(&log);
            doc.add_event_listener(node, ty.clone(), move |_doc: &mut Document, event: &mut Event| {
                log.borrow_mut().push(event.event_type.to_string());
            });
        }
        log
    }

    #[test]
    fn test_click_checkbox_fires_input_and_change() {
        let mut doc = Document::default();
        let checkbox = doc.create_element("input").unwrap();
        doc.set_attribute(checkbox, "type", "checkbox").unwrap();
        doc.append_child(doc.body(), checkbox).unwrap();
        let body = doc.body();
        let log = log_events(&mut doc, body, &[EventType::Click, EventType::Input, EventType::Change]);

        assert!(doc.click(checkbox));
        assert_eq!(doc.checked(checkbox), Some(true));
        assert_eq!(*log.borrow(), vec!["click", "input", "change"]);
    }

    #[test]
    fn test_cancelled_click_rolls_back() {
        let mut doc = Document::default();
        let a = doc.create_element("input").unwrap();
        let b = doc.create_element("input").unwrap();
        for id in [a, b] {
            doc.set_attribute(id, "type", "radio").unwrap();
            doc.set_attribute(id, "name", "choice").unwrap();
            doc.append_child(doc.body(), id).unwrap();
        }
        doc.set_checked(a, true).unwrap();
        doc.add_event_listener(b, EventType::Click, |_doc: &mut Document, event: &mut Event| {
            event.prevent_default();
        });

        assert!(!doc.click(b));
        assert_eq!(doc.checked(a), Some(true));
        assert_eq!(doc.checked(b), Some(false));
    }

    #[test]
    fn test_submit_button_submits_form() {
        let mut doc = Document::default();
        let form = doc.create_element("form").unwrap();
        let button = doc.create_element("button").unwrap();
        doc.append_child(doc.body(), form).unwrap();
        doc.append_child(form, button).unwrap();

        assert!(doc.click(button));
        assert_eq!(doc.submissions(), &[form]);
    }

    #[test]
    fn test_constraint_validation_blocks_submit() {
        let mut doc = Document::default();
        let form = doc.create_element("form").unwrap();
        let input = doc.create_element("input").unwrap();
        doc.set_attribute(input, "required", "").unwrap();
        doc.append_child(doc.body(), form).unwrap();
        doc.append_child(form, input).unwrap();
        let log = log_events(&mut doc, input, &[EventType::Invalid]);

        assert!(!doc.request_submit(form));
        assert_eq!(*log.borrow(), vec!["invalid"]);
        assert!(doc.submissions().is_empty());

        doc.set_attribute(form, "novalidate", "").unwrap();
        assert!(doc.request_submit(form));
    }

    #[test]
    fn test_reset_button_restores_defaults() {
        let mut doc = Document::default();
        let form = doc.create_element("form").unwrap();
        let input = doc.create_element("input").unwrap();
        let reset = doc.create_element("input").unwrap();
        doc.set_attribute(input, "value", "default").unwrap();
        doc.set_attribute(reset, "type", "reset").unwrap();
        doc.append_child(doc.body(), form).unwrap();
        doc.append_child(form, input).unwrap();
        doc.append_child(form, reset).unwrap();

        doc.simulate_input(input, "changed").unwrap();
        assert_eq!(doc.value(input).as_deref(), Some("changed"));
        doc.click(reset);
        assert_eq!(doc.value(input).as_deref(), Some("default"));
    }

    #[test]
    fn test_closest_form_crosses_shadow_boundary() {
        let mut doc = Document::default();
        let form = doc.create_element("form").unwrap();
        let host = doc.create_element("div").unwrap();
        doc.append_child(doc.body(), form).unwrap();
        doc.append_child(form, host).unwrap();
        let root = doc.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let button = doc.create_element("button").unwrap();
        doc.append_child(root, button).unwrap();

        assert_eq!(doc.closest_form(button), Some(form));
        assert_eq!(doc.closest_form(form), None);
    }

    #[test]
    fn test_disabled_click_is_ignored() {
        let mut doc = Document::default();
        let button = doc.create_element("button").unwrap();
        doc.set_attribute(button, "disabled", "").unwrap();
        doc.append_child(doc.body(), button).unwrap();
        let log = log_events(&mut doc, button, &[EventType::Click]);
        assert!(!doc.click(button));
        assert!(log.borrow().is_empty());
    }
}
