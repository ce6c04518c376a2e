//! Form Controls
//!
//! Native `input`, `select` and `textarea` semantics on top of the element
//! tree: values with dirty overrides, checkedness, radio groups, reset and
//! constraint validation. Upgraded custom elements answer value and
//! checkedness queries through their `CustomElement` implementation.

mod input;
mod validation;

pub use input::InputType;
pub use validation::{is_simple_email, ValidationConstraints, ValidityState};

use crate::{Document, DomError, EventType, NodeId};

impl Document {
    /// `input`, `select` or `textarea`
    pub fn is_native_control(&self, id: NodeId) -> bool {
        matches!(self.tag_name(id), Some("input" | "select" | "textarea"))
    }

    /// Type of an `<input>`; `None` for other elements
    pub fn input_type(&self, id: NodeId) -> Option<InputType> {
        let element = self.element(id)?;
        (element.tag == "input").then(|| element.get_attr("type").map(InputType::parse).unwrap_or_default())
    }

    /// Whether the control has a checked state (native or custom)
    pub fn is_checkable(&self, id: NodeId) -> bool {
        if let Some(instance) = self.custom_element(id) {
            return instance.checked(self).is_some();
        }
        self.input_type(id).is_some_and(|t| t.is_checkable())
    }

    /// Current value of a form control
    pub fn value(&self, id: NodeId) -> Option<String> {
        if let Some(instance) = self.custom_element(id) {
            return instance.value(self);
        }
        let element = self.element(id)?;
        if let Some(dirty) = &element.control.value {
            return Some(dirty.clone());
        }
        match element.tag.as_str() {
            "input" => {
                let default = element.get_attr("value");
                if self.is_checkable(id) {
                    Some(default.unwrap_or("on").to_string())
                } else {
                    Some(default.unwrap_or_default().to_string())
                }
            }
            "textarea" => Some(self.text_content(id)),
            "select" => Some(self.selected_option(id).map(|o| self.option_value(o)).unwrap_or_default()),
            _ => None,
        }
    }

    /// Set the value of a form control; returns `false` if it has none
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<bool, DomError> {
        if let Some(instance) = self.custom_element(id) {
            return Ok(instance.set_value(self, value));
        }
        if self.is_checkable(id) {
            self.set_attribute(id, "value", value)?;
            return Ok(true);
        }
        if !self.is_native_control(id) {
            return Ok(false);
        }
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        element.control.value = Some(value.to_string());
        Ok(true)
    }

    /// Checkedness of a checkbox or radio (native or custom)
    pub fn checked(&self, id: NodeId) -> Option<bool> {
        if let Some(instance) = self.custom_element(id) {
            return instance.checked(self);
        }
        if !self.is_checkable(id) {
            return None;
        }
        let element = self.element(id)?;
        Some(element.control.checked.unwrap_or_else(|| element.has_attr("checked")))
    }

    /// Set checkedness; checking a radio unchecks the rest of its group
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<bool, DomError> {
        if let Some(instance) = self.custom_element(id) {
            return Ok(instance.set_checked(self, checked));
        }
        if !self.is_checkable(id) {
            return Ok(false);
        }
        if checked && self.input_type(id) == Some(InputType::Radio) {
            for other in self.radio_group(id) {
                if other == id {
                    continue;
                }
                if let Some(element) = self.element_mut(other) {
                    element.control.checked = Some(false);
                }
            }
        }
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        element.control.checked = Some(checked);
        Ok(true)
    }

    /// Radios sharing `id`'s name within the same tree, including `id`
    pub fn radio_group(&self, id: NodeId) -> Vec<NodeId> {
        let name = match self.get_attribute(id, "name") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return vec![id],
        };
        let root = self.tree_root(id);
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|&other| {
                self.input_type(other) == Some(InputType::Radio)
                    && self.get_attribute(other, "name") == Some(name.as_str())
            })
            .collect()
    }

    /// Return a control to its default value and checkedness
    pub fn reset_control(&mut self, id: NodeId) {
        if let Some(instance) = self.custom_element(id) {
            instance.form_reset(self);
            return;
        }
        if let Some(element) = self.element_mut(id) {
            element.control.value = None;
            element.control.checked = None;
        }
    }

    /// Whether the control takes part in constraint validation
    pub fn will_validate(&self, id: NodeId) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        if !self.is_native_control(id) || element.has_attr("disabled") {
            return false;
        }
        match self.input_type(id) {
            Some(t) if t.is_button() || t == InputType::Hidden => false,
            _ => !(element.has_attr("readonly") && element.tag != "select"),
        }
    }

    /// Current validity of a native control
    pub fn validity(&self, id: NodeId) -> ValidityState {
        let Some(element) = self.element(id) else {
            return ValidityState::default();
        };
        if !self.will_validate(id) {
            return ValidityState::default();
        }

        let constraints = ValidationConstraints::from_element(element);
        let mut state = if self.is_checkable(id) {
            let missing = constraints.required
                && match self.input_type(id) {
                    Some(InputType::Radio) => {
                        !self.radio_group(id).into_iter().any(|r| self.checked(r) == Some(true))
                    }
                    _ => self.checked(id) != Some(true),
                };
            let mut state = ValidityState::default();
            state.value_missing = missing;
            state
        } else {
            constraints.validate_string(&self.value(id).unwrap_or_default())
        };
        state.set_custom_validity(&element.control.custom_validity);
        state
    }

    /// Message for the control's current validity, empty when valid
    pub fn validation_message(&self, id: NodeId) -> String {
        self.validity(id).validation_message()
    }

    /// Check validity, firing `invalid` at the control when it fails
    pub fn check_validity(&mut self, id: NodeId) -> bool {
        if self.validity(id).is_valid() {
            return true;
        }
        self.fire(id, EventType::Invalid);
        false
    }

    /// Set or clear (with an empty message) a custom validation error
    pub fn set_custom_validity(&mut self, id: NodeId, message: &str) -> Result<(), DomError> {
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        element.control.custom_validity = message.to_string();
        Ok(())
    }

    fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        let options: Vec<NodeId> = self
            .descendants(select)
            .into_iter()
            .filter(|&id| self.tag_name(id) == Some("option"))
            .collect();
        options
            .iter()
            .copied()
            .find(|&id| self.has_attribute(id, "selected"))
            .or_else(|| options.first().copied())
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.get_attribute(option, "value") {
            Some(value) => value.to_string(),
            None => self.text_content(option).trim().to_string(),
        }
    }
}
