//! Custom Elements
//!
//! Custom element registry, upgrades and lifecycle reactions.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{Document, DomError, NodeId};

/// Behaviour attached to an upgraded element.
///
/// Reactions receive the document mutably so they can touch their own
/// subtree; implementations keep their state behind interior mutability.
pub trait CustomElement {
    /// Element became connected to the document
    fn connected(&self, doc: &mut Document);

    /// Element was removed from the document
    fn disconnected(&self, doc: &mut Document);

    /// An observed attribute was set or removed
    fn attribute_changed(&self, doc: &mut Document, name: &str, old: Option<&str>, new: Option<&str>);

    /// Owning form was reset
    fn form_reset(&self, _doc: &mut Document) {}

    /// Current value, if the element exposes one
    fn value(&self, _doc: &Document) -> Option<String> {
        None
    }

    /// Set the value; returns `false` if the element has no value
    fn set_value(&self, _doc: &mut Document, _value: &str) -> bool {
        false
    }

    /// Checkedness, if the element is checkable
    fn checked(&self, _doc: &Document) -> Option<bool> {
        None
    }

    /// Set checkedness; returns `false` if the element is not checkable
    fn set_checked(&self, _doc: &mut Document, _checked: bool) -> bool {
        false
    }

    /// Run after a click on the element that was not cancelled
    fn activation_behavior(&self, _doc: &mut Document) {}

    /// Inner `<form>` that native submission should act on
    fn form_target(&self) -> Option<NodeId> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Builds the behaviour for a freshly created element
pub type Constructor = Rc<dyn Fn(&mut Document, NodeId) -> Result<Rc<dyn CustomElement>, DomError>>;

/// Custom element definition
#[derive(Clone)]
pub struct CustomElementDefinition {
    pub name: String,
    /// Attributes whose changes are delivered to `attribute_changed`
    pub observed_attributes: Vec<String>,
    /// Whether instances take part in form validation and submission
    pub form_associated: bool,
    pub constructor: Constructor,
}

impl CustomElementDefinition {
    pub fn new(name: impl Into<String>, constructor: Constructor) -> Self {
        Self {
            name: name.into(),
            observed_attributes: Vec::new(),
            form_associated: false,
            constructor,
        }
    }

    pub fn with_observed_attributes(mut self, names: Vec<String>) -> Self {
        self.observed_attributes = names;
        self
    }

    pub fn with_form_associated(mut self, form_associated: bool) -> Self {
        self.form_associated = form_associated;
        self
    }

    pub fn observes(&self, name: &str) -> bool {
        self.observed_attributes.iter().any(|a| a == name)
    }
}

impl fmt::Debug for CustomElementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomElementDefinition")
            .field("name", &self.name)
            .field("observed_attributes", &self.observed_attributes)
            .field("form_associated", &self.form_associated)
            .finish_non_exhaustive()
    }
}

/// Custom element lifecycle callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCallback {
    Connected,
    Disconnected,
}

/// Custom elements registry
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, CustomElementDefinition>,
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom element
    pub fn define(&mut self, definition: CustomElementDefinition) -> Result<(), DomError> {
        if !Self::is_valid_name(&definition.name) {
            return Err(DomError::InvalidName(definition.name));
        }
        if self.definitions.contains_key(&definition.name) {
            return Err(DomError::AlreadyDefined(definition.name));
        }
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Get element definition
    pub fn get(&self, name: &str) -> Option<&CustomElementDefinition> {
        self.definitions.get(name)
    }

    /// Check if element is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Validate custom element name
    pub fn is_valid_name(name: &str) -> bool {
        // Must contain hyphen
        if !name.contains('-') {
            return false;
        }

        // Must start with lowercase letter
        if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            return false;
        }

        if name.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace()) {
            return false;
        }

        // Reserved names
        let reserved = [
            "annotation-xml", "color-profile", "font-face",
            "font-face-src", "font-face-uri", "font-face-format",
            "font-face-name", "missing-glyph",
        ];
        !reserved.contains(&name)
    }
}

impl Document {
    /// Register a custom element and upgrade existing elements with that tag
    pub fn define(&mut self, definition: CustomElementDefinition) -> Result<(), DomError> {
        let name = definition.name.clone();
        self.registry.define(definition)?;
        tracing::debug!("Defined custom element <{}>", name);

        let candidates: Vec<NodeId> = (0..self.len() as u32)
            .map(NodeId)
            .filter(|&id| self.tag_name(id) == Some(name.as_str()))
            .collect();
        for id in candidates {
            if self.upgrade(id)? {
                self.replay_attributes(id);
                if self.is_connected(id) {
                    self.run_reactions_for(id, LifecycleCallback::Connected);
                }
            }
        }
        Ok(())
    }

    /// Check if a tag is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.registry.is_defined(name)
    }

    /// Definition for a tag
    pub fn custom_element_definition(&self, name: &str) -> Option<&CustomElementDefinition> {
        self.registry.get(name)
    }

    /// Behaviour of an upgraded element
    pub fn custom_element(&self, id: NodeId) -> Option<Rc<dyn CustomElement>> {
        self.instances.get(&id).cloned()
    }

    /// Whether `id` is an upgraded custom element
    pub fn is_custom_element(&self, id: NodeId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Whether `id` is an upgraded, form-associated custom element
    pub fn is_form_associated(&self, id: NodeId) -> bool {
        self.is_custom_element(id)
            && self
                .tag_name(id)
                .and_then(|tag| self.registry.get(tag))
                .is_some_and(|d| d.form_associated)
    }

    /// Upgrade `id` if its tag is defined and it is not upgraded yet
    pub(crate) fn upgrade(&mut self, id: NodeId) -> Result<bool, DomError> {
        if self.instances.contains_key(&id) {
            return Ok(false);
        }
        let constructor = match self.tag_name(id).and_then(|tag| self.registry.get(tag)) {
            Some(definition) => Rc::clone(&definition.constructor),
            None => return Ok(false),
        };
        let instance = constructor(self, id)?;
        self.instances.insert(id, instance);
        tracing::trace!("Upgraded {:?} as <{}>", id, self.tag_name(id).unwrap_or_default());
        Ok(true)
    }

    /// Deliver pre-existing observed attributes after a late upgrade
    fn replay_attributes(&mut self, id: NodeId) {
        let attrs: Vec<(String, String)> = self
            .element(id)
            .map(|e| e.attrs.iter().map(|a| (a.name.clone(), a.value.clone())).collect())
            .unwrap_or_default();
        for (name, value) in attrs {
            self.notify_attribute_changed(id, &name, None, Some(&value));
        }
    }

    pub(crate) fn notify_attribute_changed(
        &mut self,
        id: NodeId,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        let Some(instance) = self.instances.get(&id).cloned() else {
            return;
        };
        let observed = self
            .tag_name(id)
            .and_then(|tag| self.registry.get(tag))
            .is_some_and(|d| d.observes(name));
        if observed {
            instance.attribute_changed(self, name, old, new);
        }
    }

    /// Run connected/disconnected reactions for a subtree in shadow-including order
    pub(crate) fn run_reactions(&mut self, subtree: NodeId, callback: LifecycleCallback) {
        let queue: Vec<NodeId> = self
            .shadow_including_inclusive_descendants(subtree)
            .into_iter()
            .filter(|id| self.instances.contains_key(id))
            .collect();
        for id in queue {
            self.run_reactions_for(id, callback);
        }
    }

    fn run_reactions_for(&mut self, id: NodeId, callback: LifecycleCallback) {
        let Some(instance) = self.instances.get(&id).cloned() else {
            return;
        };
        match callback {
            LifecycleCallback::Connected => instance.connected(self),
            LifecycleCallback::Disconnected => instance.disconnected(self),
        }
    }
}
