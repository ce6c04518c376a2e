//! Component Configuration
//!
//! Construction-time policy for a component class. A configuration is
//! built once per definition and shared by every instance.

use std::fmt;

use halo_a11y::{AriaPolicy, ValidationHook};
use halo_dom::EventType;

use crate::AttributeHandler;

/// Outer display mode injected as the `:host` rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    InlineBlock,
    Inline,
    Block,
    Flex,
    InlineFlex,
    Grid,
    Contents,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InlineBlock => "inline-block",
            Self::Inline => "inline",
            Self::Block => "block",
            Self::Flex => "flex",
            Self::InlineFlex => "inline-flex",
            Self::Grid => "grid",
            Self::Contents => "contents",
        }
    }
}

/// Configuration for one component class
#[derive(Clone, Default)]
pub struct ComponentConfig {
    /// Markup for the shadow root
    pub template: String,
    pub display: DisplayMode,
    /// Observed attributes in declaration order, each with an optional handler
    pub attributes: Vec<(String, Option<AttributeHandler>)>,
    /// Events relayed from the target to the host
    pub redispatched_events: Vec<EventType>,
    /// Locates the target element inside the shadow root
    pub target_selector: String,
    pub aria: AriaPolicy,
    /// Component-specific checks run after the policy checks
    pub validation_hook: Option<ValidationHook>,
}

impl ComponentConfig {
    pub fn new(template: &str, target_selector: &str) -> Self {
        Self {
            template: template.to_string(),
            target_selector: target_selector.to_string(),
            ..Default::default()
        }
    }

    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Observe `name` and project it with `handler`
    pub fn with_attribute(mut self, name: &str, handler: AttributeHandler) -> Self {
        let name = name.to_ascii_lowercase();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = Some(handler),
            None => self.attributes.push((name, Some(handler))),
        }
        self
    }

    /// Observe `name` without a handler
    pub fn with_observed(mut self, name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if !self.attributes.iter().any(|(n, _)| *n == name) {
            self.attributes.push((name, None));
        }
        self
    }

    pub fn with_redispatch(mut self, events: &[EventType]) -> Self {
        for event in events {
            if !self.redispatched_events.contains(event) {
                self.redispatched_events.push(event.clone());
            }
        }
        self
    }

    pub fn with_aria(mut self, policy: AriaPolicy) -> Self {
        self.aria = policy;
        self
    }

    pub fn with_validation_hook(mut self, hook: ValidationHook) -> Self {
        self.validation_hook = Some(hook);
        self
    }

    /// Declared attributes followed by the ARIA-managed ones, deduplicated
    pub fn observed_attributes(&self) -> Vec<String> {
        let mut observed: Vec<String> = Vec::new();
        let names = self
            .attributes
            .iter()
            .map(|(n, _)| n.clone())
            .chain(self.aria.observed_attributes());
        for name in names {
            if !observed.contains(&name) {
                observed.push(name);
            }
        }
        observed
    }

    /// Handler registered for `name`
    pub fn handler(&self, name: &str) -> Option<&AttributeHandler> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, h)| h.as_ref())
    }
}

impl fmt::Debug for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("display", &self.display)
            .field("observed", &self.observed_attributes())
            .field("redispatched_events", &self.redispatched_events)
            .field("target_selector", &self.target_selector)
            .field("aria", &self.aria)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_includes_aria_attributes_once() {
        let config = ComponentConfig::new("<input part=\"control\">", "[part=control]")
            .with_attribute("disabled", AttributeHandler::Boolean)
            .with_observed("aria-label")
            .with_aria(
                AriaPolicy::new()
                    .with_static("role", "switch")
                    .with_dynamic("aria-label")
                    .with_required("aria-label"),
            );

        assert_eq!(config.observed_attributes(), vec!["disabled", "aria-label", "role"]);
        assert!(config.handler("disabled").is_some());
        assert!(config.handler("aria-label").is_none());
    }

    #[test]
    fn test_handler_replaced_not_duplicated() {
        let config = ComponentConfig::default()
            .with_observed("value")
            .with_attribute("VALUE", AttributeHandler::Value)
            .with_redispatch(&[EventType::Input, EventType::Input, EventType::Change]);

        assert_eq!(config.attributes.len(), 1);
        assert!(matches!(config.handler("value"), Some(AttributeHandler::Value)));
        assert_eq!(config.redispatched_events, vec![EventType::Input, EventType::Change]);
        assert_eq!(DisplayMode::default().as_str(), "inline-block");
    }
}
