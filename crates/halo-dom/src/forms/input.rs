//! Input Types
//!
//! The `type` attribute of `<input>` and the behaviour groups it selects.

/// HTML input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Url,
    Search,
    Hidden,
    Checkbox,
    Radio,
    Submit,
    Reset,
    Button,
    Image,
}

impl InputType {
    /// Parse from string; unknown types fall back to text
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "search" => Self::Search,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "button" => Self::Button,
            "image" => Self::Image,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Search => "search",
            Self::Hidden => "hidden",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::Button => "button",
            Self::Image => "image",
        }
    }

    /// Check if this is a text-like input
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Password | Self::Email | Self::Number | Self::Tel | Self::Url | Self::Search
        )
    }

    /// Check if this is a button type
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Submit | Self::Reset | Self::Button | Self::Image)
    }

    /// Checkbox or radio
    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_type() {
        assert_eq!(InputType::parse("EMAIL"), InputType::Email);
        assert_eq!(InputType::parse("checkbox"), InputType::Checkbox);
        assert_eq!(InputType::parse("datetime-local"), InputType::Text);
        assert_eq!(InputType::parse(""), InputType::Text);
    }

    #[test]
    fn test_input_type_groups() {
        assert!(InputType::Search.is_text_like());
        assert!(!InputType::Checkbox.is_text_like());
        assert!(InputType::Image.is_button());
        assert!(InputType::Radio.is_checkable());
        assert_eq!(InputType::parse(InputType::Url.as_str()), InputType::Url);
    }
}
