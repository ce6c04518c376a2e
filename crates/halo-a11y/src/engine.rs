//! ARIA Engine
//!
//! Applies an `AriaPolicy` to one component instance and reports
//! misconfigurations. Diagnostics are advisory: they are logged and kept
//! for inspection, and never stop an attribute from being applied.

use std::cell::RefCell;
use std::fmt;

use halo_dom::{Document, DomError, NodeId};

use crate::AriaPolicy;

/// A single accessibility diagnostic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AriaDiagnostic {
    #[error("Missing required ARIA attribute: {attribute}")]
    MissingRequired { attribute: String },

    #[error("Invalid value '{value}' for {attribute}. Allowed: {}", .allowed.join(", "))]
    InvalidToken {
        attribute: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Element referenced by {attribute} ('{id}') does not exist in the document.")]
    DanglingReference { attribute: String, id: String },

    #[error("Cannot override static ARIA attribute {attribute} with '{attempted}'; keeping '{kept}'.")]
    StaticOverride {
        attribute: String,
        attempted: String,
        kept: String,
    },

    #[error("Control with role '{role}' has no accessible name.")]
    MissingAccessibleName { role: String },
}

/// Whether an attribute value arrives from a real change or an insertion replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeMode {
    Change,
    Replay,
}

/// What `handle_change` did with an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The policy does not manage this attribute
    Unmanaged,
    /// The value was written to (or removed from) the target
    Mirrored,
    /// A static attribute kept its fixed value
    StaticKept,
}

/// Everything a validation pass may inspect
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub doc: &'a Document,
    pub host: NodeId,
    pub target: NodeId,
    pub component: &'a str,
}

impl ValidationContext<'_> {
    /// Attribute value as the target exposes it, falling back to the host
    pub fn effective_attribute(&self, name: &str) -> Option<&str> {
        self.doc
            .get_attribute(self.target, name)
            .or_else(|| self.doc.get_attribute(self.host, name))
    }
}

/// Component-specific checks appended after the policy checks
pub type ValidationHook = fn(&ValidationContext<'_>, &mut Vec<AriaDiagnostic>);

/// Per-instance ARIA policy enforcement
pub struct AriaEngine {
    component: String,
    policy: AriaPolicy,
    hook: Option<ValidationHook>,
    history: RefCell<Vec<AriaDiagnostic>>,
}

impl AriaEngine {
    pub fn new(component: impl Into<String>, policy: AriaPolicy) -> Self {
        Self {
            component: component.into(),
            policy,
            hook: None,
            history: RefCell::new(Vec::new()),
        }
    }

    pub fn with_hook(mut self, hook: Option<ValidationHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn policy(&self) -> &AriaPolicy {
        &self.policy
    }

    /// Write every static attribute onto the target
    pub fn apply_static(&self, doc: &mut Document, target: NodeId) -> Result<(), DomError> {
        for (name, value) in self.policy.static_attributes() {
            doc.set_attribute(target, name, value)?;
        }
        Ok(())
    }

    /// Route a host attribute value through the policy.
    ///
    /// Static attributes keep their value; a differing value arriving as a
    /// change is reported once, replays are silent. Mirrored attributes are
    /// set on the target, or removed when `value` is `None`.
    pub fn handle_change(
        &self,
        doc: &mut Document,
        target: NodeId,
        name: &str,
        value: Option<&str>,
        mode: ChangeMode,
    ) -> Result<ChangeOutcome, DomError> {
        if let Some(kept) = self.policy.static_value(name) {
            let attempted = value.filter(|v| mode == ChangeMode::Change && *v != kept);
            if let Some(attempted) = attempted {
                self.report(&[AriaDiagnostic::StaticOverride {
                    attribute: name.to_string(),
                    attempted: attempted.to_string(),
                    kept: kept.to_string(),
                }]);
            }
            return Ok(ChangeOutcome::StaticKept);
        }

        if !self.policy.is_mirrored(name) {
            return Ok(ChangeOutcome::Unmanaged);
        }
        match value {
            Some(value) => doc.set_attribute(target, name, value)?,
            None => doc.remove_attribute(target, name)?,
        }
        Ok(ChangeOutcome::Mirrored)
    }

    /// Run the policy checks, then the component hook
    pub fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<AriaDiagnostic> {
        let mut diagnostics = Vec::new();

        for attribute in self.policy.required_attributes() {
            if !ctx.doc.has_attribute(ctx.host, attribute) && !ctx.doc.has_attribute(ctx.target, attribute) {
                diagnostics.push(AriaDiagnostic::MissingRequired {
                    attribute: attribute.clone(),
                });
            }
        }

        for (attribute, allowed) in self.policy.token_validation() {
            let Some(value) = ctx.effective_attribute(attribute) else {
                continue;
            };
            if !allowed.iter().any(|token| token == value) {
                diagnostics.push(AriaDiagnostic::InvalidToken {
                    attribute: attribute.clone(),
                    value: value.to_string(),
                    allowed: allowed.clone(),
                });
            }
        }

        for attribute in self.policy.reference_attributes() {
            let Some(value) = ctx.effective_attribute(attribute) else {
                continue;
            };
            for id in value.split_whitespace() {
                if ctx.doc.get_element_by_id(id).is_none() {
                    diagnostics.push(AriaDiagnostic::DanglingReference {
                        attribute: attribute.clone(),
                        id: id.to_string(),
                    });
                }
            }
        }

        if let Some(hook) = self.hook {
            hook(ctx, &mut diagnostics);
        }
        diagnostics
    }

    /// Log diagnostics under the component name and keep them in the history
    pub fn report(&self, diagnostics: &[AriaDiagnostic]) {
        for diagnostic in diagnostics {
            tracing::warn!("[{}] ARIA validation: {}", self.component, diagnostic);
        }
        self.history.borrow_mut().extend_from_slice(diagnostics);
    }

    /// Validate and report in one step
    pub fn validate_and_report(&self, ctx: &ValidationContext<'_>) -> Vec<AriaDiagnostic> {
        let diagnostics = self.validate(ctx);
        self.report(&diagnostics);
        diagnostics
    }

    /// Every diagnostic reported so far, oldest first
    pub fn history(&self) -> Vec<AriaDiagnostic> {
        self.history.borrow().clone()
    }

    pub fn clear_history(&self) {
        self.history.borrow_mut().clear();
    }
}

impl fmt::Debug for AriaEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AriaEngine")
            .field("component", &self.component)
            .field("policy", &self.policy)
            .field("has_hook", &self.hook.is_some())
            .field("reported", &self.history.borrow().len())
            .finish()
    }
}
