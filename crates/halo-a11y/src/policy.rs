//! ARIA Policy
//!
//! Per-component accessibility configuration, fixed when a component is
//! defined: static attributes, host-mirrored attributes, required
//! attributes, token sets and ID-reference attributes.

/// Declarative ARIA configuration for one component class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AriaPolicy {
    static_attributes: Vec<(String, String)>,
    dynamic_attributes: Vec<String>,
    required_attributes: Vec<String>,
    token_validation: Vec<(String, Vec<String>)>,
    reference_attributes: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    let name = name.to_ascii_lowercase();
    if !list.contains(&name) {
        list.push(name);
    }
}

impl AriaPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed value written to the target at construction; never overridden
    pub fn with_static(mut self, name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();
        match self.static_attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.static_attributes.push((name, value.to_string())),
        }
        self
    }

    /// Host attribute mirrored onto the target
    pub fn with_dynamic(mut self, name: &str) -> Self {
        push_unique(&mut self.dynamic_attributes, name);
        self
    }

    /// Attribute whose absence on both host and target is reported
    pub fn with_required(mut self, name: &str) -> Self {
        push_unique(&mut self.required_attributes, name);
        self
    }

    /// Restrict an attribute to a set of legal tokens
    pub fn with_tokens(mut self, name: &str, tokens: &[&str]) -> Self {
        let name = name.to_ascii_lowercase();
        let tokens = tokens.iter().map(|t| t.to_string()).collect();
        match self.token_validation.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = tokens,
            None => self.token_validation.push((name, tokens)),
        }
        self
    }

    /// Attribute holding space-separated element IDs that must exist
    pub fn with_references(mut self, name: &str) -> Self {
        push_unique(&mut self.reference_attributes, name);
        self
    }

    pub fn static_attributes(&self) -> &[(String, String)] {
        &self.static_attributes
    }

    pub fn static_value(&self, name: &str) -> Option<&str> {
        self.static_attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn dynamic_attributes(&self) -> &[String] {
        &self.dynamic_attributes
    }

    pub fn required_attributes(&self) -> &[String] {
        &self.required_attributes
    }

    pub fn token_validation(&self) -> &[(String, Vec<String>)] {
        &self.token_validation
    }

    pub fn reference_attributes(&self) -> &[String] {
        &self.reference_attributes
    }

    /// Whether the attribute is mirrored from host to target
    pub fn is_mirrored(&self, name: &str) -> bool {
        self.dynamic_attributes.iter().any(|n| n == name) || self.required_attributes.iter().any(|n| n == name)
    }

    /// Whether the engine handles changes to this attribute
    pub fn manages(&self, name: &str) -> bool {
        self.static_value(name).is_some() || self.is_mirrored(name)
    }

    /// Attributes a component must observe: static, dynamic and required, deduplicated
    pub fn observed_attributes(&self) -> Vec<String> {
        let mut observed = Vec::new();
        let names = self
            .static_attributes
            .iter()
            .map(|(n, _)| n)
            .chain(&self.dynamic_attributes)
            .chain(&self.required_attributes);
        for name in names {
            push_unique(&mut observed, name);
        }
        observed
    }
}
