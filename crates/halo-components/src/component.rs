//! Component Base
//!
//! Builds a component's encapsulated subtree from its configuration and
//! drives the attach/attribute-change/detach lifecycle through the
//! attribute reflector and the ARIA engine.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use halo_a11y::{AriaDiagnostic, AriaEngine, ChangeMode, ChangeOutcome, ValidationContext};
use halo_dom::{Document, DomError, Event, EventType, ListenerId, ListenerOptions, NodeId, ShadowRootMode};

use crate::element::HaloElement;
use crate::form::FormController;
use crate::reflector::redispatch;
use crate::{ComponentConfig, ComponentError};

/// Component lifecycle state; `Detached` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unattached,
    Attached,
    Detached,
}

struct ComponentInner {
    name: String,
    host: NodeId,
    shadow: NodeId,
    target: NodeId,
    config: Rc<ComponentConfig>,
    lifecycle: Cell<Lifecycle>,
    /// Listeners released on detach
    listeners: RefCell<Vec<(NodeId, ListenerId)>>,
    aria: AriaEngine,
}

/// One component instance bound to its host element.
///
/// Cheap to clone; clones share the same instance.
#[derive(Clone)]
pub struct Component {
    inner: Rc<ComponentInner>,
}

impl Component {
    /// Build the subtree and install event re-dispatch
    pub fn new(
        doc: &mut Document,
        host: NodeId,
        name: &str,
        config: Rc<ComponentConfig>,
    ) -> Result<Self, ComponentError> {
        let component = Self::build(doc, host, name, config)?;
        component.install_redispatch(doc);
        Ok(component)
    }

    /// Build the subtree without re-dispatch, so callers can put their own
    /// target listeners ahead of it
    pub(crate) fn build(
        doc: &mut Document,
        host: NodeId,
        name: &str,
        config: Rc<ComponentConfig>,
    ) -> Result<Self, ComponentError> {
        let shadow = doc.attach_shadow(host, ShadowRootMode::Open)?;
        let markup = format!(
            "<style>:host {{ display: {}; }}</style>{}",
            config.display.as_str(),
            config.template
        );
        halo_html::parse_into(doc, shadow, &markup)?;

        let target = doc
            .query_selector(shadow, &config.target_selector)
            .ok_or_else(|| ComponentError::TargetNotFound {
                component: name.to_string(),
                selector: config.target_selector.clone(),
            })?;

        let aria = AriaEngine::new(name, config.aria.clone()).with_hook(config.validation_hook);
        aria.apply_static(doc, target)?;

        tracing::debug!("Built <{}> {:?} as {}", doc.tag_name(host).unwrap_or_default(), host, name);
        Ok(Self {
            inner: Rc::new(ComponentInner {
                name: name.to_string(),
                host,
                shadow,
                target,
                config,
                lifecycle: Cell::new(Lifecycle::Unattached),
                listeners: RefCell::new(Vec::new()),
                aria,
            }),
        })
    }

    /// Relay every configured event from the target to the host
    pub(crate) fn install_redispatch(&self, doc: &mut Document) {
        let (target, host) = (self.inner.target, self.inner.host);
        for event_type in &self.inner.config.redispatched_events {
            let id = redispatch(doc, target, host, event_type.clone());
            self.inner.listeners.borrow_mut().push((target, id));
        }
    }

    /// Register a listener that is released when the component detaches
    pub fn listen(
        &self,
        doc: &mut Document,
        node: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        callback: impl Fn(&mut Document, &mut Event) + 'static,
    ) -> ListenerId {
        let id = doc.add_event_listener_with(node, event_type, options, callback);
        self.inner.listeners.borrow_mut().push((node, id));
        id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn host(&self) -> NodeId {
        self.inner.host
    }

    pub fn shadow_root(&self) -> NodeId {
        self.inner.shadow
    }

    /// Inner element most attributes and events apply to
    pub fn target(&self) -> NodeId {
        self.inner.target
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.inner.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.lifecycle.get()
    }

    pub fn aria_engine(&self) -> &AriaEngine {
        &self.inner.aria
    }

    /// Every diagnostic this instance has reported
    pub fn diagnostics(&self) -> Vec<AriaDiagnostic> {
        self.inner.aria.history()
    }

    /// Number of listeners currently held by the instance
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Host was inserted: replay observed attributes, then validate once
    /// slotted content is in place
    pub fn connected(&self, doc: &mut Document) {
        if self.lifecycle() != Lifecycle::Unattached {
            return;
        }
        self.inner.lifecycle.set(Lifecycle::Attached);
        tracing::debug!("{} {:?} attached", self.inner.name, self.inner.host);

        for name in self.inner.config.observed_attributes() {
            self.replay_attribute(doc, &name);
        }

        let component = self.clone();
        doc.queue_microtask(move |doc: &mut Document| {
            if component.lifecycle() == Lifecycle::Attached {
                component.validate(doc);
            }
        });
    }

    /// Host was removed: release every listener
    pub fn disconnected(&self, doc: &mut Document) {
        if self.lifecycle() == Lifecycle::Detached {
            return;
        }
        self.inner.lifecycle.set(Lifecycle::Detached);
        let listeners = self.inner.listeners.take();
        for (node, id) in &listeners {
            doc.remove_event_listener(*node, *id);
        }
        tracing::debug!(
            "{} {:?} detached, released {} listeners",
            self.inner.name,
            self.inner.host,
            listeners.len()
        );
    }

    /// Observed host attribute changed
    pub fn attribute_changed(&self, doc: &mut Document, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new || self.lifecycle() == Lifecycle::Detached {
            return;
        }
        self.apply_attribute(doc, name, new, ChangeMode::Change);
    }

    /// Push the host's current value of `name` through the change path
    pub(crate) fn replay_attribute(&self, doc: &mut Document, name: &str) {
        let value = doc.get_attribute(self.inner.host, name).map(str::to_string);
        self.apply_attribute(doc, name, value.as_deref(), ChangeMode::Replay);
    }

    fn apply_attribute(&self, doc: &mut Document, name: &str, value: Option<&str>, mode: ChangeMode) {
        let target = self.inner.target;
        let outcome = match self.inner.aria.handle_change(doc, target, name, value, mode) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("[{}] failed to apply {}: {}", self.inner.name, name, err);
                ChangeOutcome::Unmanaged
            }
        };
        match outcome {
            ChangeOutcome::StaticKept => return,
            ChangeOutcome::Mirrored if mode == ChangeMode::Change && self.lifecycle() == Lifecycle::Attached => {
                self.validate(doc);
            }
            _ => {}
        }

        if let Some(handler) = self.inner.config.handler(name) {
            if let Err(err) = handler.apply(doc, self, name, value) {
                tracing::warn!("[{}] {} handler failed: {}", self.inner.name, name, err);
            }
        }
    }

    /// Run the ARIA checks against the current document and report them
    pub fn validate(&self, doc: &Document) -> Vec<AriaDiagnostic> {
        let ctx = ValidationContext {
            doc,
            host: self.inner.host,
            target: self.inner.target,
            component: &self.inner.name,
        };
        self.inner.aria.validate_and_report(&ctx)
    }

    // ------------------------------------------------------------------
    // Property surface
    // ------------------------------------------------------------------

    /// Host attribute value
    pub fn attribute(&self, doc: &Document, name: &str) -> Option<String> {
        doc.get_attribute(self.inner.host, name).map(str::to_string)
    }

    /// Set or (with `None`) remove a host attribute
    pub fn set_attribute(&self, doc: &mut Document, name: &str, value: Option<&str>) -> Result<(), DomError> {
        match value {
            Some(value) => doc.set_attribute(self.inner.host, name, value),
            None => doc.remove_attribute(self.inner.host, name),
        }
    }

    pub fn bool_property(&self, doc: &Document, name: &str) -> bool {
        doc.has_attribute(self.inner.host, name)
    }

    pub fn set_bool_property(&self, doc: &mut Document, name: &str, value: bool) -> Result<(), DomError> {
        doc.toggle_attribute(self.inner.host, name, value)
    }

    /// ARIA attribute on the host; `label` and `aria-label` are equivalent
    pub fn aria(&self, doc: &Document, name: &str) -> Option<String> {
        self.attribute(doc, &aria_name(name))
    }

    pub fn set_aria(&self, doc: &mut Document, name: &str, value: Option<&str>) -> Result<(), DomError> {
        self.set_attribute(doc, &aria_name(name), value)
    }

    /// Live value of the target control
    pub fn value(&self, doc: &Document) -> Option<String> {
        doc.value(self.inner.target)
    }

    pub fn set_value(&self, doc: &mut Document, value: &str) -> Result<bool, DomError> {
        doc.set_value(self.inner.target, value)
    }

    /// Live checkedness of the target control
    pub fn checked(&self, doc: &Document) -> Option<bool> {
        doc.checked(self.inner.target)
    }

    pub fn set_checked(&self, doc: &mut Document, checked: bool) -> Result<bool, DomError> {
        doc.set_checked(self.inner.target, checked)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.inner.name)
            .field("host", &self.inner.host)
            .field("target", &self.inner.target)
            .field("lifecycle", &self.inner.lifecycle.get())
            .finish_non_exhaustive()
    }
}

fn aria_name(name: &str) -> String {
    let name = name.to_ascii_lowercase();
    if name.starts_with("aria-") { name } else { format!("aria-{name}") }
}

/// Component behind an upgraded Halo element
pub fn component_for(doc: &Document, node: NodeId) -> Option<Component> {
    let instance = doc.custom_element(node)?;
    let any = instance.as_any();
    if let Some(element) = any.downcast_ref::<HaloElement>() {
        return Some(element.component().clone());
    }
    any.downcast_ref::<FormController>().map(|form| form.component().clone())
}
