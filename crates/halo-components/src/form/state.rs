//! Form validation state

use std::collections::HashMap;

use halo_dom::NodeId;

/// Where a form is in its submit/reset cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Pristine,
    SubmittedValid,
    SubmittedInvalid,
}

/// Validation state of one form.
///
/// Replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Set by the first submit attempt, cleared only by reset
    pub submitted: bool,
    pub valid: bool,
    /// Current message per failing control
    pub errors: HashMap<NodeId, String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            submitted: false,
            valid: true,
            errors: HashMap::new(),
        }
    }
}

impl FormState {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn phase(&self) -> FormPhase {
        match (self.submitted, self.valid && !self.has_errors()) {
            (false, _) => FormPhase::Pristine,
            (true, true) => FormPhase::SubmittedValid,
            (true, false) => FormPhase::SubmittedInvalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pristine() {
        let state = FormState::default();
        assert!(state.valid);
        assert!(!state.has_errors());
        assert_eq!(state.phase(), FormPhase::Pristine);
    }

    #[test]
    fn test_phase_follows_errors() {
        let mut state = FormState {
            submitted: true,
            ..Default::default()
        };
        assert_eq!(state.phase(), FormPhase::SubmittedValid);
        state.errors.insert(NodeId::ROOT, "Please fill out this field.".into());
        state.valid = false;
        assert_eq!(state.phase(), FormPhase::SubmittedInvalid);
    }
}
