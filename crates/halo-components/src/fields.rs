//! Standard Fields
//!
//! Descriptors for the shipped field wrappers. Each one is only a
//! template, an attribute table and an ARIA policy; the behaviour lives in
//! the component base.

use halo_a11y::{AriaPolicy, require_accessible_name};
use halo_dom::{Document, DomError, EventType};

use crate::{AttributeHandler, Component, ComponentConfig, ComponentDescriptor, ControlKind, DisplayMode};

const INVALID_TOKENS: &[&str] = &["true", "false", "grammar", "spelling"];
const TRISTATE_TOKENS: &[&str] = &["true", "false", "mixed"];
const BOOLEAN_TOKENS: &[&str] = &["true", "false"];

fn field_events() -> [EventType; 4] {
    [EventType::Input, EventType::Change, EventType::Focus, EventType::Blur]
}

/// ARIA policy shared by value-carrying fields
fn field_policy() -> AriaPolicy {
    AriaPolicy::new()
        .with_dynamic("aria-label")
        .with_dynamic("aria-labelledby")
        .with_dynamic("aria-describedby")
        .with_dynamic("aria-invalid")
        .with_tokens("aria-invalid", INVALID_TOKENS)
        .with_references("aria-describedby")
        .with_references("aria-labelledby")
}

pub fn button() -> ComponentDescriptor {
    let config = ComponentConfig::new(
        "<button part=\"control\" type=\"button\"><slot></slot></button>",
        "[part=control]",
    )
    .with_attribute("disabled", AttributeHandler::Boolean)
    .with_redispatch(&[EventType::Click, EventType::Focus, EventType::Blur])
    .with_aria(
        AriaPolicy::new()
            .with_dynamic("aria-label")
            .with_dynamic("aria-describedby")
            .with_dynamic("aria-pressed")
            .with_dynamic("aria-expanded")
            .with_tokens("aria-pressed", TRISTATE_TOKENS)
            .with_tokens("aria-expanded", BOOLEAN_TOKENS)
            .with_references("aria-describedby"),
    )
    .with_validation_hook(require_accessible_name);
    ComponentDescriptor::new("halo-button", "HaloButton", ControlKind::Action, config)
}

/// Text-like attribute table shared by input and textarea
fn text_attributes(config: ComponentConfig) -> ComponentConfig {
    ["name", "placeholder", "minlength", "maxlength", "autocomplete"]
        .into_iter()
        .fold(config, |config, name| config.with_attribute(name, AttributeHandler::Mirror))
        .with_attribute("value", AttributeHandler::Value)
        .with_attribute("disabled", AttributeHandler::Boolean)
        .with_attribute("readonly", AttributeHandler::Boolean)
        .with_attribute("required", AttributeHandler::Boolean)
}

pub fn input() -> ComponentDescriptor {
    let config = ComponentConfig::new(
        "<label part=\"label\"><slot></slot></label><input part=\"control\">",
        "[part=control]",
    )
    .with_display(DisplayMode::Block)
    .with_attribute("type", AttributeHandler::text("text"))
    .with_attribute("min", AttributeHandler::Mirror)
    .with_attribute("max", AttributeHandler::Mirror);
    let config = text_attributes(config)
        .with_redispatch(&field_events())
        .with_aria(field_policy())
        .with_validation_hook(require_accessible_name);
    ComponentDescriptor::new("halo-input", "HaloInput", ControlKind::TextLike, config)
}

pub fn textarea() -> ComponentDescriptor {
    let config = ComponentConfig::new(
        "<label part=\"label\"><slot></slot></label><textarea part=\"control\"></textarea>",
        "[part=control]",
    )
    .with_display(DisplayMode::Block)
    .with_attribute("rows", AttributeHandler::text("3"));
    let config = text_attributes(config)
        .with_redispatch(&field_events())
        .with_aria(field_policy())
        .with_validation_hook(require_accessible_name);
    ComponentDescriptor::new("halo-textarea", "HaloTextarea", ControlKind::TextLike, config)
}

pub fn select() -> ComponentDescriptor {
    let config = ComponentConfig::new(
        "<label part=\"label\"><slot name=\"label\"></slot></label><select part=\"control\"></select>",
        "[part=control]",
    )
    .with_display(DisplayMode::Block)
    .with_attribute("name", AttributeHandler::Mirror)
    .with_attribute("value", AttributeHandler::Value)
    .with_attribute("disabled", AttributeHandler::Boolean)
    .with_attribute("required", AttributeHandler::Boolean)
    .with_attribute("multiple", AttributeHandler::Boolean)
    .with_redispatch(&field_events())
    .with_aria(field_policy());
    ComponentDescriptor::new("halo-select", "HaloSelect", ControlKind::Choice, config)
}

fn toggle_config(input_type: &str) -> ComponentConfig {
    let template = format!(
        "<label part=\"label\"><input part=\"control\" type=\"{input_type}\"><span part=\"text\"><slot></slot></span></label>"
    );
    ComponentConfig::new(&template, "[part=control]")
        .with_attribute("name", AttributeHandler::Mirror)
        .with_attribute("value", AttributeHandler::Value)
        .with_attribute("checked", AttributeHandler::Checked)
        .with_attribute("disabled", AttributeHandler::Boolean)
        .with_attribute("required", AttributeHandler::Boolean)
        .with_redispatch(&field_events())
        .with_validation_hook(require_accessible_name)
}

fn toggle_policy() -> AriaPolicy {
    AriaPolicy::new()
        .with_dynamic("aria-label")
        .with_dynamic("aria-describedby")
        .with_dynamic("aria-invalid")
        .with_tokens("aria-invalid", INVALID_TOKENS)
        .with_references("aria-describedby")
}

pub fn checkbox() -> ComponentDescriptor {
    let config = toggle_config("checkbox").with_aria(toggle_policy());
    ComponentDescriptor::new("halo-checkbox", "HaloCheckbox", ControlKind::Toggle, config)
}

pub fn radio() -> ComponentDescriptor {
    let config = toggle_config("radio").with_aria(toggle_policy());
    ComponentDescriptor::new("halo-radio", "HaloRadio", ControlKind::Toggle, config)
}

pub fn switch() -> ComponentDescriptor {
    let config = toggle_config("checkbox").with_aria(toggle_policy().with_static("role", "switch"));
    ComponentDescriptor::new("halo-switch", "HaloSwitch", ControlKind::Toggle, config)
}

pub fn fieldset() -> ComponentDescriptor {
    let config = ComponentConfig::new(
        "<fieldset part=\"control\"><legend part=\"legend\"></legend><slot></slot></fieldset>",
        "[part=control]",
    )
    .with_display(DisplayMode::Block)
    .with_attribute("legend", AttributeHandler::custom(set_legend))
    .with_attribute("disabled", AttributeHandler::Boolean)
    .with_aria(
        AriaPolicy::new()
            .with_dynamic("aria-describedby")
            .with_references("aria-describedby"),
    );
    ComponentDescriptor::new("halo-fieldset", "HaloFieldset", ControlKind::Container, config)
}

fn set_legend(doc: &mut Document, component: &Component, value: Option<&str>) -> Result<(), DomError> {
    match doc.query_selector(component.shadow_root(), "[part=legend]") {
        Some(legend) => doc.set_text_content(legend, value.unwrap_or_default()),
        None => Ok(()),
    }
}

/// Every shipped field wrapper, in registration order
pub fn standard_descriptors() -> Vec<ComponentDescriptor> {
    vec![
        button(),
        input(),
        textarea(),
        select(),
        checkbox(),
        radio(),
        switch(),
        fieldset(),
    ]
}
