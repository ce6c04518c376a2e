//! Attribute Reflector
//!
//! Projects host attributes onto the inner target element and relays
//! target events back out through the host.

use std::fmt;
use std::rc::Rc;

use halo_dom::{Document, DomError, Event, EventType, ListenerId, NodeId};

use crate::Component;

/// Handler for attributes that need more than a plain projection
pub type HandlerFn = Rc<dyn Fn(&mut Document, &Component, Option<&str>) -> Result<(), DomError>>;

/// How a host attribute reaches the target
#[derive(Clone)]
pub enum AttributeHandler {
    /// Present on the target exactly when present on the host
    Boolean,
    /// Copied verbatim, falling back to `default` when the host has none
    Text { default: Option<String> },
    /// Copied verbatim; removed from the target when removed from the host
    Mirror,
    /// Default value of the target control
    Value,
    /// Default checkedness of the target control
    Checked,
    Custom(HandlerFn),
}

impl AttributeHandler {
    pub fn text(default: &str) -> Self {
        Self::Text {
            default: Some(default.to_string()),
        }
    }

    pub fn custom(f: impl Fn(&mut Document, &Component, Option<&str>) -> Result<(), DomError> + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    /// Apply the host value of `name` to the component's target
    pub fn apply(
        &self,
        doc: &mut Document,
        component: &Component,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), DomError> {
        let target = component.target();
        match self {
            Self::Boolean => doc.toggle_attribute(target, name, value.is_some()),
            Self::Text { default } => match value.or(default.as_deref()) {
                Some(value) => doc.set_attribute(target, name, value),
                None => doc.remove_attribute(target, name),
            },
            Self::Mirror => match value {
                Some(value) => doc.set_attribute(target, name, value),
                None => doc.remove_attribute(target, name),
            },
            Self::Value => match value {
                Some(value) => doc.set_value(target, value).map(|_| ()),
                None => {
                    doc.reset_control(target);
                    Ok(())
                }
            },
            Self::Checked => doc.set_checked(target, value.is_some()).map(|_| ()),
            Self::Custom(f) => f(doc, component, value),
        }
    }
}

impl fmt::Debug for AttributeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("Boolean"),
            Self::Text { default } => f.debug_struct("Text").field("default", default).finish(),
            Self::Mirror => f.write_str("Mirror"),
            Self::Value => f.write_str("Value"),
            Self::Checked => f.write_str("Checked"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Relay `event_type` from `target` to `host`.
///
/// The original event stops at the target; a fresh event with the same
/// flags is dispatched at the host, and cancelling the fresh event cancels
/// the original.
pub(crate) fn redispatch(doc: &mut Document, target: NodeId, host: NodeId, event_type: EventType) -> ListenerId {
    doc.add_event_listener(target, event_type, move |doc: &mut Document, event: &mut Event| {
        event.stop_propagation();
        let mut relayed = Event::with_init(event.event_type.clone(), event.init());
        if !doc.dispatch_event(host, &mut relayed) {
            event.prevent_default();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use halo_dom::ShadowRootMode;
    use std::cell::RefCell;

    #[test]
    fn test_redispatch_relays_and_propagates_cancel() {
        let mut doc = Document::default();
        let host = doc.create_element("x-host").unwrap();
        doc.append_child(doc.body(), host).unwrap();
        let shadow = doc.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let target = doc.create_element("button").unwrap();
        doc.append_child(shadow, target).unwrap();

        redispatch(&mut doc, target, host, EventType::Click);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        doc.add_event_listener(doc.body(), EventType::Click, move |_doc: &mut Document, event: &mut Event| {
            log.borrow_mut().push(event.target);
            event.prevent_default();
        });

        assert!(!doc.fire(target, EventType::Click));
        // The body saw only the relayed event, targeted at the host
        assert_eq!(*seen.borrow(), vec![host]);
    }

    #[test]
    fn test_handler_debug() {
        assert_eq!(format!("{:?}", AttributeHandler::Boolean), "Boolean");
        assert_eq!(
            format!("{:?}", AttributeHandler::text("text")),
            "Text { default: Some(\"text\") }"
        );
        let custom = AttributeHandler::custom(|_doc: &mut Document, _c: &Component, _v: Option<&str>| Ok(()));
        assert_eq!(format!("{:?}", custom), "Custom(..)");
    }
}
