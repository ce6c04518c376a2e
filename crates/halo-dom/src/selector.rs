//! Element Query Selectors
//!
//! Compound selectors (`tag#id.class[attr=value]`) and comma-separated lists.
//! Combinators are not supported.

use crate::ElementData;

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Attribute { name: String, value: Option<String> },
    Universal,
}

impl SimpleSelector {
    /// Check a single element against this selector
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            SimpleSelector::Id(id) => element.id() == Some(id.as_str()),
            SimpleSelector::Class(class) => element.classes().any(|c| c == class),
            SimpleSelector::Attribute { name, value } => match value {
                Some(expected) => element.get_attr(name) == Some(expected.as_str()),
                None => element.has_attr(name),
            },
        }
    }
}

/// A selector list; an element matches if any compound matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Vec<SimpleSelector>>,
}

impl Selector {
    /// Parse a selector list, returning `None` for empty or malformed input
    pub fn parse(s: &str) -> Option<Self> {
        let compounds = s
            .split(',')
            .map(Self::parse_compound)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { compounds })
    }

    fn parse_compound(s: &str) -> Option<Vec<SimpleSelector>> {
        let s = s.trim();
        if s.is_empty() || s.contains(char::is_whitespace) && !s.contains('[') {
            return None;
        }

        let mut parts = Vec::new();
        let mut rest = s;

        if let Some(stripped) = rest.strip_prefix('*') {
            parts.push(SimpleSelector::Universal);
            rest = stripped;
        } else {
            let end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
            if end > 0 {
                parts.push(SimpleSelector::Tag(rest[..end].to_ascii_lowercase()));
            }
            rest = &rest[end..];
        }

        while !rest.is_empty() {
            if let Some(attr) = rest.strip_prefix('[') {
                let close = attr.find(']')?;
                parts.push(Self::parse_attribute(&attr[..close])?);
                rest = &attr[close + 1..];
                continue;
            }

            let (is_id, body) = if let Some(body) = rest.strip_prefix('#') {
                (true, body)
            } else if let Some(body) = rest.strip_prefix('.') {
                (false, body)
            } else {
                return None;
            };
            let end = body.find(['#', '.', '[']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            if is_id {
                parts.push(SimpleSelector::Id(name.to_string()));
            } else {
                parts.push(SimpleSelector::Class(name.to_string()));
            }
            rest = &body[end..];
        }

        if parts.is_empty() { None } else { Some(parts) }
    }

    fn parse_attribute(inner: &str) -> Option<SimpleSelector> {
        let (name, value) = match inner.split_once('=') {
            Some((name, value)) => {
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                (name.trim(), Some(value.to_string()))
            }
            None => (inner.trim(), None),
        };
        if name.is_empty() {
            return None;
        }
        Some(SimpleSelector::Attribute {
            name: name.to_ascii_lowercase(),
            value,
        })
    }

    /// Check if element matches selector
    pub fn matches(&self, element: &ElementData) -> bool {
        self.compounds
            .iter()
            .any(|compound| compound.iter().all(|s| s.matches(element)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
        let mut e = ElementData::new(tag);
        for (name, value) in attrs {
            e.set_attr(name, value);
        }
        e
    }

    #[test]
    fn test_simple_selector_parse() {
        let sel = Selector::parse("div").unwrap();
        assert_eq!(sel.compounds, vec![vec![SimpleSelector::Tag("div".into())]]);
        assert!(Selector::parse(".class").is_some());
        assert!(Selector::parse("#id").is_some());
        assert!(Selector::parse("*").is_some());
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("div span").is_none());
        assert!(Selector::parse("[name").is_none());
    }

    #[test]
    fn test_element_matches() {
        let e = element("div", &[("id", "main"), ("class", "container active")]);
        assert!(Selector::parse("div").unwrap().matches(&e));
        assert!(Selector::parse("#main").unwrap().matches(&e));
        assert!(Selector::parse("div.container.active").unwrap().matches(&e));
        assert!(!Selector::parse("div.missing").unwrap().matches(&e));
        assert!(Selector::parse("*").unwrap().matches(&e));
    }

    #[test]
    fn test_attribute_selectors() {
        let e = element("input", &[("type", "email"), ("part", "control")]);
        assert!(Selector::parse("[part=control]").unwrap().matches(&e));
        assert!(Selector::parse("input[type=\"email\"]").unwrap().matches(&e));
        assert!(Selector::parse("[type]").unwrap().matches(&e));
        assert!(!Selector::parse("[type=text]").unwrap().matches(&e));
    }

    #[test]
    fn test_selector_list() {
        let e = element("textarea", &[]);
        assert!(Selector::parse("input, select, textarea").unwrap().matches(&e));
        assert!(!Selector::parse("input, select").unwrap().matches(&e));
    }
}
