//! Form Validation
//!
//! Constraint validation: which constraints a control carries and how a
//! value measures up against them.

use super::InputType;
use crate::ElementData;

/// Validity state for form controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityState {
    /// The element's value is missing (for required)
    pub value_missing: bool,
    /// The element's value doesn't match the type
    pub type_mismatch: bool,
    /// The element's value is too long
    pub too_long: bool,
    /// The element's value is too short
    pub too_short: bool,
    /// The element's value is below the minimum
    pub range_underflow: bool,
    /// The element's value is above the maximum
    pub range_overflow: bool,
    /// The element has a bad input format
    pub bad_input: bool,
    /// Custom validity message set
    pub custom_error: bool,
    custom_message: String,
}

impl ValidityState {
    /// Check if the element is valid
    pub fn is_valid(&self) -> bool {
        !self.value_missing
            && !self.type_mismatch
            && !self.too_long
            && !self.too_short
            && !self.range_underflow
            && !self.range_overflow
            && !self.bad_input
            && !self.custom_error
    }

    pub(crate) fn set_custom_validity(&mut self, message: &str) {
        self.custom_message = message.to_string();
        self.custom_error = !message.is_empty();
    }

    /// Built-in message for the first failing constraint, custom message first
    pub fn validation_message(&self) -> String {
        if self.custom_error {
            return self.custom_message.clone();
        }
        let message = if self.value_missing {
            "Please fill out this field."
        } else if self.type_mismatch {
            "Please enter a valid value."
        } else if self.too_long {
            "Please shorten this text."
        } else if self.too_short {
            "Please lengthen this text."
        } else if self.range_underflow {
            "Value must be greater or equal to minimum."
        } else if self.range_overflow {
            "Value must be less or equal to maximum."
        } else if self.bad_input {
            "Please enter a number."
        } else {
            ""
        };
        message.to_string()
    }
}

/// Constraints read from a control's attributes
#[derive(Debug, Clone, Default)]
pub struct ValidationConstraints {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub input_type: InputType,
}

impl ValidationConstraints {
    /// Collect constraints from element attributes; unparseable numbers are ignored
    pub fn from_element(element: &ElementData) -> Self {
        let number = |name: &str| element.get_attr(name).and_then(|v| v.trim().parse::<f64>().ok());
        let length = |name: &str| element.get_attr(name).and_then(|v| v.trim().parse::<usize>().ok());
        Self {
            required: element.has_attr("required"),
            min: number("min"),
            max: number("max"),
            min_length: length("minlength"),
            max_length: length("maxlength"),
            input_type: if element.tag == "input" {
                element.get_attr("type").map(InputType::parse).unwrap_or_default()
            } else {
                InputType::Text
            },
        }
    }

    /// Validate a string value
    pub fn validate_string(&self, value: &str) -> ValidityState {
        let mut state = ValidityState::default();

        if self.required && value.is_empty() {
            state.value_missing = true;
        }
        if value.is_empty() {
            return state;
        }

        let chars = value.chars().count();
        if self.max_length.is_some_and(|max| chars > max) {
            state.too_long = true;
        }
        if self.min_length.is_some_and(|min| chars < min) {
            state.too_short = true;
        }

        match self.input_type {
            InputType::Email => state.type_mismatch = !is_simple_email(value),
            InputType::Url => state.type_mismatch = !is_absolute_url(value),
            InputType::Number => match value.trim().parse::<f64>() {
                Ok(number) => {
                    state.range_underflow = self.min.is_some_and(|min| number < min);
                    state.range_overflow = self.max.is_some_and(|max| number > max);
                }
                Err(_) => state.bad_input = true,
            },
            _ => {}
        }

        state
    }
}

/// `local@domain.tld` with no whitespace and a single `@`
pub fn is_simple_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn is_absolute_url(value: &str) -> bool {
    match value.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}
