//! Form data

use std::collections::HashMap;

/// Name/value pairs in control order; repeated names are kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain mapping; the last value for a name wins
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_kept_and_last_wins_in_map() {
        let mut data = FormData::new();
        data.append("topic", "rust");
        data.append("name", "Ada");
        data.append("topic", "dom");

        assert_eq!(data.len(), 3);
        assert_eq!(data.get("topic"), Some("rust"));
        assert_eq!(data.get_all("topic"), vec!["rust", "dom"]);
        assert!(!data.has("email"));

        let map = data.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["topic"], "dom");
    }
}
