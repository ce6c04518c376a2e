//! Form Validation
//!
//! `halo-form` wraps a native `<form>` and validates the controls slotted
//! into it. State moves `Pristine -> SubmittedValid | SubmittedInvalid`,
//! and reset always returns it to `Pristine`. Results are announced
//! through a polite live region inside the form's shadow root.

mod data;
mod state;
mod validation;

pub use data::FormData;
pub use state::{FormPhase, FormState};

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use halo_a11y::{AnnouncementKind, AriaPolicy, LiveRegion, LiveRegionConfig};
use halo_dom::{CustomElement, Document, Event, EventType, ListenerOptions, NodeId};

use crate::{AttributeHandler, Component, ComponentConfig, ComponentError, DisplayMode};

pub(crate) const TAG: &str = "halo-form";

/// Messages and live region settings for a form
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub live_region: LiveRegionConfig,
    pub success_message: String,
    pub reset_message: String,
    pub corrected_message: String,
    /// Custom controls that are required but empty
    pub required_message: String,
    /// Custom email controls failing the address pattern
    pub email_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            live_region: LiveRegionConfig::polite(),
            success_message: "Form submitted successfully.".to_string(),
            reset_message: "Form has been reset.".to_string(),
            corrected_message: "All errors have been corrected.".to_string(),
            required_message: "This field is required".to_string(),
            email_message: "Please enter a valid email address".to_string(),
        }
    }
}

impl FormConfig {
    pub fn with_live_region(mut self, config: LiveRegionConfig) -> Self {
        self.live_region = config;
        self
    }

    /// Delay before transient announcements clear
    pub fn with_announcement_timeout(mut self, delay: Duration) -> Self {
        self.live_region.clear_after = delay;
        self
    }

    pub fn with_success_message(mut self, message: &str) -> Self {
        self.success_message = message.to_string();
        self
    }

    pub fn with_reset_message(mut self, message: &str) -> Self {
        self.reset_message = message.to_string();
        self
    }

    pub fn with_corrected_message(mut self, message: &str) -> Self {
        self.corrected_message = message.to_string();
        self
    }
}

/// Component configuration of `halo-form`
pub(crate) fn component_config() -> ComponentConfig {
    ComponentConfig::new("<form part=\"form\" novalidate><slot></slot></form>", "form")
        .with_display(DisplayMode::Block)
        .with_attribute("name", AttributeHandler::Mirror)
        .with_attribute("action", AttributeHandler::Mirror)
        .with_redispatch(&[EventType::Submit, EventType::Reset])
        .with_aria(
            AriaPolicy::new()
                .with_dynamic("aria-label")
                .with_dynamic("aria-labelledby")
                .with_dynamic("aria-describedby")
                .with_references("aria-labelledby")
                .with_references("aria-describedby"),
        )
}

struct FormInner {
    component: Component,
    live_region: LiveRegion,
    state: RefCell<FormState>,
    config: Rc<FormConfig>,
}

/// Validation controller behind a `halo-form` element.
///
/// Clones share the same form.
#[derive(Clone)]
pub struct FormController {
    inner: Rc<FormInner>,
}

impl FormController {
    pub(crate) fn new(
        doc: &mut Document,
        host: NodeId,
        component_config: Rc<ComponentConfig>,
        config: Rc<FormConfig>,
    ) -> Result<Self, ComponentError> {
        let component = Component::build(doc, host, "HaloForm", component_config)?;
        let live_region = LiveRegion::attach(doc, component.shadow_root(), config.live_region.clone())?;
        let controller = Self {
            inner: Rc::new(FormInner {
                component,
                live_region,
                state: RefCell::new(FormState::default()),
                config,
            }),
        };
        controller.install_listeners(doc);
        // Submit validation must run before the event is relayed to the host
        controller.inner.component.install_redispatch(doc);
        controller.install_reset_defaults(doc);
        Ok(controller)
    }

    fn install_listeners(&self, doc: &mut Document) {
        let component = &self.inner.component;
        let (host, form) = (component.host(), component.target());

        let this = self.clone();
        let on_submit = move |doc: &mut Document, event: &mut Event| {
            if !this.handle_submit(doc) {
                event.prevent_default();
                event.stop_immediate_propagation();
            }
        };
        component.listen(doc, form, EventType::Submit, ListenerOptions::default(), on_submit);

        let this = self.clone();
        let on_reset = move |doc: &mut Document, _event: &mut Event| this.handle_reset(doc);
        component.listen(doc, form, EventType::Reset, ListenerOptions::default(), on_reset);

        let this = self.clone();
        let on_input = move |doc: &mut Document, event: &mut Event| this.handle_input(doc, event.target);
        component.listen(doc, host, EventType::Input, ListenerOptions::default(), on_input);

        // `input` already re-validated; `change` only clears before the first submit
        let this = self.clone();
        let on_change = move |doc: &mut Document, event: &mut Event| {
            if !this.is_submitted() {
                this.handle_input(doc, event.target);
            }
        };
        component.listen(doc, host, EventType::Change, ListenerOptions::default(), on_change);

        // `invalid` does not bubble; catch it on the way down
        let this = self.clone();
        let on_invalid = move |doc: &mut Document, event: &mut Event| {
            event.prevent_default();
            this.validate_input(doc, event.target);
        };
        component.listen(doc, host, EventType::Invalid, ListenerOptions::capture(), on_invalid);
    }

    /// Restore control defaults once the relayed `reset` went uncancelled
    fn install_reset_defaults(&self, doc: &mut Document) {
        let component = &self.inner.component;
        let this = self.clone();
        let on_reset = move |doc: &mut Document, event: &mut Event| {
            if event.is_default_prevented() {
                tracing::debug!("[HaloForm] {:?} reset cancelled", this.inner.component.host());
                return;
            }
            this.restore_defaults(doc);
        };
        component.listen(doc, component.target(), EventType::Reset, ListenerOptions::default(), on_reset);
    }

    pub fn component(&self) -> &Component {
        &self.inner.component
    }

    pub fn config(&self) -> &FormConfig {
        &self.inner.config
    }

    pub fn live_region(&self) -> &LiveRegion {
        &self.inner.live_region
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn state(&self) -> FormState {
        self.inner.state.borrow().clone()
    }

    pub fn phase(&self) -> FormPhase {
        self.inner.state.borrow().phase()
    }

    pub fn is_submitted(&self) -> bool {
        self.inner.state.borrow().submitted
    }

    pub fn is_valid(&self) -> bool {
        self.inner.state.borrow().valid
    }

    pub fn has_errors(&self) -> bool {
        self.inner.state.borrow().has_errors()
    }

    pub fn errors(&self) -> HashMap<NodeId, String> {
        self.inner.state.borrow().errors.clone()
    }

    pub fn error_for(&self, control: NodeId) -> Option<String> {
        self.inner.state.borrow().errors.get(&control).cloned()
    }

    /// Form controls slotted into the form, in document order
    pub fn controls(&self, doc: &Document) -> Vec<NodeId> {
        validation::discover_controls(doc, self.inner.component.host())
    }

    pub fn live_region_text(&self, doc: &Document) -> String {
        self.inner.live_region.text(doc)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Validate one control, update its error entry and refresh the region.
    ///
    /// Returns whether the control passed.
    pub fn validate_input(&self, doc: &mut Document, control: NodeId) -> bool {
        let had_errors = self.has_errors();
        self.validate_control(doc, control, had_errors)
    }

    fn validate_control(&self, doc: &mut Document, control: NodeId, had_errors: bool) -> bool {
        let error = validation::control_error(doc, control, &self.inner.config);
        let passed = error.is_none();
        {
            let mut state = self.inner.state.borrow_mut();
            match error {
                Some(message) => {
                    state.errors.insert(control, message);
                }
                None => {
                    state.errors.remove(&control);
                }
            }
            state.valid = state.errors.is_empty();
        }
        set_invalid(doc, control, !passed);
        self.refresh_region(doc, had_errors);
        passed
    }

    /// Validate every control; returns whether all passed
    pub fn check_validity(&self, doc: &mut Document) -> bool {
        let had_errors = self.has_errors();
        let controls = self.validate_all(doc);
        let valid = self.is_valid();
        if valid && had_errors {
            self.announce(doc, &self.inner.config.corrected_message, AnnouncementKind::Info);
        } else if !valid {
            self.announce_errors(doc, &controls);
        }
        valid
    }

    fn validate_all(&self, doc: &mut Document) -> Vec<NodeId> {
        let controls = self.controls(doc);
        let errors: HashMap<NodeId, String> = controls
            .iter()
            .filter_map(|&id| validation::control_error(doc, id, &self.inner.config).map(|m| (id, m)))
            .collect();
        for &control in &controls {
            set_invalid(doc, control, errors.contains_key(&control));
        }
        let mut state = self.inner.state.borrow_mut();
        state.valid = errors.is_empty();
        state.errors = errors;
        drop(state);
        controls
    }

    fn refresh_region(&self, doc: &mut Document, had_errors: bool) {
        if self.has_errors() {
            let controls = self.controls(doc);
            self.announce_errors(doc, &controls);
        } else if had_errors {
            self.announce(doc, &self.inner.config.corrected_message, AnnouncementKind::Info);
        }
    }

    fn announce_errors(&self, doc: &mut Document, controls: &[NodeId]) {
        let summary = {
            let state = self.inner.state.borrow();
            validation::error_summary(doc, controls, &state.errors)
        };
        self.announce(doc, &summary, AnnouncementKind::Error);
    }

    fn announce(&self, doc: &mut Document, text: &str, kind: AnnouncementKind) {
        if let Err(err) = self.inner.live_region.announce(doc, text, kind) {
            tracing::warn!("[HaloForm] announcement failed: {}", err);
        }
    }

    fn clear_region(&self, doc: &mut Document) {
        if let Err(err) = self.inner.live_region.clear(doc) {
            tracing::warn!("[HaloForm] failed to clear live region: {}", err);
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Submit attempt; returns whether the submission may proceed
    fn handle_submit(&self, doc: &mut Document) -> bool {
        self.inner.state.borrow_mut().submitted = true;
        let controls = self.validate_all(doc);
        let valid = self.is_valid();
        if valid {
            self.clear_region(doc);
            self.announce(doc, &self.inner.config.success_message, AnnouncementKind::Success);
            tracing::debug!("[HaloForm] {:?} passed validation", self.inner.component.host());
        } else {
            self.announce_errors(doc, &controls);
            tracing::debug!(
                "[HaloForm] {:?} blocked with {} error(s)",
                self.inner.component.host(),
                self.inner.state.borrow().errors.len()
            );
        }
        valid
    }

    /// A control's value changed
    fn handle_input(&self, doc: &mut Document, control: NodeId) {
        if !validation::is_control(doc, control) {
            return;
        }
        let (had_errors, cleared, submitted) = {
            let mut state = self.inner.state.borrow_mut();
            let had_errors = state.has_errors();
            let cleared = state.errors.remove(&control).is_some();
            state.valid = state.errors.is_empty();
            (had_errors, cleared, state.submitted)
        };
        if cleared {
            set_invalid(doc, control, false);
        }
        if submitted {
            self.validate_control(doc, control, had_errors);
        } else if cleared {
            self.refresh_region(doc, had_errors);
        }
    }

    /// Reset attempt; the state returns to pristine even if the reset is cancelled
    fn handle_reset(&self, doc: &mut Document) {
        *self.inner.state.borrow_mut() = FormState::default();
        for control in self.controls(doc) {
            set_invalid(doc, control, false);
        }
        self.clear_region(doc);
    }

    fn restore_defaults(&self, doc: &mut Document) {
        for control in self.controls(doc) {
            doc.reset_control(control);
        }
        self.announce(doc, &self.inner.config.reset_message, AnnouncementKind::Info);
        tracing::debug!("[HaloForm] {:?} reset", self.inner.component.host());
    }

    // ------------------------------------------------------------------
    // Submission and data
    // ------------------------------------------------------------------

    /// Submit through the inner form, as a submit button would
    pub fn request_submit(&self, doc: &mut Document) -> bool {
        doc.request_submit(self.inner.component.target())
    }

    /// Reset through the inner form
    pub fn reset(&self, doc: &mut Document) {
        doc.reset_form(self.inner.component.target());
    }

    /// Name/value pairs of the named controls, in document order.
    ///
    /// Checkboxes and radios contribute only when checked.
    pub fn form_data(&self, doc: &Document) -> FormData {
        let mut data = FormData::new();
        for control in self.controls(doc) {
            let Some(name) = doc.get_attribute(control, "name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if validation::is_checkbox_like(doc, control) {
                if validation::is_checked(doc, control) {
                    data.append(name, &doc.value(control).unwrap_or_else(|| "on".to_string()));
                }
            } else {
                data.append(name, &doc.value(control).unwrap_or_default());
            }
        }
        data
    }

    /// Form data as a plain mapping; the last value for a name wins
    pub fn form_data_as_object(&self, doc: &Document) -> HashMap<String, String> {
        self.form_data(doc).to_map()
    }
}

fn set_invalid(doc: &mut Document, control: NodeId, invalid: bool) {
    let result = if invalid {
        doc.set_attribute(control, "aria-invalid", "true")
    } else {
        doc.remove_attribute(control, "aria-invalid")
    };
    if let Err(err) = result {
        tracing::warn!("[HaloForm] failed to update aria-invalid on {:?}: {}", control, err);
    }
}

impl CustomElement for FormController {
    fn connected(&self, doc: &mut Document) {
        self.inner.component.connected(doc);
    }

    fn disconnected(&self, doc: &mut Document) {
        self.inner.component.disconnected(doc);
    }

    fn attribute_changed(&self, doc: &mut Document, name: &str, old: Option<&str>, new: Option<&str>) {
        self.inner.component.attribute_changed(doc, name, old, new);
    }

    fn form_target(&self) -> Option<NodeId> {
        Some(self.inner.component.target())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Controller behind a `halo-form` element
pub fn form_for(doc: &Document, node: NodeId) -> Option<FormController> {
    let instance = doc.custom_element(node)?;
    instance.as_any().downcast_ref::<FormController>().cloned()
}
