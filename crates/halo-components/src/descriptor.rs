//! Component Descriptors
//!
//! A descriptor is everything needed to register one component class:
//! its tag, the name used in diagnostics, the kind of control it wraps
//! and its shared configuration.

use std::rc::Rc;

use crate::ComponentConfig;

/// Kind of native control a component wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Free-text value (input, textarea)
    TextLike,
    /// Boolean checkedness (checkbox, radio, switch)
    Toggle,
    /// Value picked from options (select)
    Choice,
    /// Groups other controls; has no value
    Container,
    /// Activates something (button)
    Action,
}

impl ControlKind {
    /// Whether the control carries a value into form data
    pub fn has_value(&self) -> bool {
        matches!(self, Self::TextLike | Self::Toggle | Self::Choice)
    }
}

#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    pub tag: String,
    /// Name used to prefix diagnostics, e.g. `HaloButton`
    pub class_name: String,
    pub kind: ControlKind,
    pub config: Rc<ComponentConfig>,
    pub form_associated: bool,
}

impl ComponentDescriptor {
    /// Value-carrying kinds are form-associated by default
    pub fn new(tag: &str, class_name: &str, kind: ControlKind, config: ComponentConfig) -> Self {
        Self {
            tag: tag.to_string(),
            class_name: class_name.to_string(),
            kind,
            config: Rc::new(config),
            form_associated: kind.has_value(),
        }
    }

    pub fn with_form_associated(mut self, form_associated: bool) -> Self {
        self.form_associated = form_associated;
        self
    }
}
