//! ARIA Support
//!
//! ARIA roles and live region politeness.

use std::fmt;

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // Widget roles
    Alert,
    Button,
    Checkbox,
    ComboBox,
    Link,
    ListBox,
    MenuItem,
    Option,
    Radio,
    RadioGroup,
    Slider,
    SpinButton,
    Status,
    Switch,
    Tab,
    TextBox,

    // Document structure
    Group,
    Heading,
    Img,
    List,
    ListItem,
    Presentation,
    Generic,
}

impl AriaRole {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,
            "alert" => Self::Alert,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "combobox" => Self::ComboBox,
            "link" => Self::Link,
            "listbox" => Self::ListBox,
            "menuitem" => Self::MenuItem,
            "option" => Self::Option,
            "radio" => Self::Radio,
            "radiogroup" => Self::RadioGroup,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "status" => Self::Status,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "textbox" => Self::TextBox,
            "group" => Self::Group,
            "heading" => Self::Heading,
            "img" => Self::Img,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "none" | "presentation" => Self::Presentation,
            "generic" => Self::Generic,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Form => "form",
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Region => "region",
            Self::Search => "search",
            Self::Alert => "alert",
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::ComboBox => "combobox",
            Self::Link => "link",
            Self::ListBox => "listbox",
            Self::MenuItem => "menuitem",
            Self::Option => "option",
            Self::Radio => "radio",
            Self::RadioGroup => "radiogroup",
            Self::Slider => "slider",
            Self::SpinButton => "spinbutton",
            Self::Status => "status",
            Self::Switch => "switch",
            Self::Tab => "tab",
            Self::TextBox => "textbox",
            Self::Group => "group",
            Self::Heading => "heading",
            Self::Img => "img",
            Self::List => "list",
            Self::ListItem => "listitem",
            Self::Presentation => "presentation",
            Self::Generic => "generic",
        }
    }

    /// Role an element carries without an explicit `role` attribute
    pub fn implicit(tag: &str, input_type: Option<&str>) -> Self {
        match tag {
            "button" => Self::Button,
            "a" => Self::Link,
            "textarea" => Self::TextBox,
            "select" => Self::ComboBox,
            "fieldset" => Self::Group,
            "form" => Self::Form,
            "input" => match input_type.map(str::to_ascii_lowercase).as_deref() {
                Some("checkbox") => Self::Checkbox,
                Some("radio") => Self::Radio,
                Some("number") => Self::SpinButton,
                Some("range") => Self::Slider,
                Some("submit" | "reset" | "button" | "image") => Self::Button,
                _ => Self::TextBox,
            },
            _ => Self::Generic,
        }
    }

    /// Check if role is widget
    pub fn is_widget(&self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Checkbox
                | Self::ComboBox
                | Self::Link
                | Self::ListBox
                | Self::MenuItem
                | Self::Radio
                | Self::Slider
                | Self::SpinButton
                | Self::Switch
                | Self::Tab
                | Self::TextBox
        )
    }
}

impl fmt::Display for AriaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live region mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveRegionMode {
    Off,
    #[default]
    Polite,
    Assertive,
}

impl LiveRegionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}
