//! Field-name header of a table segment

use std::collections::HashMap;

/// Ordered field names of one table segment, with name lookup.
///
/// Names are kept verbatim, surrounding whitespace included. When a name
/// occurs more than once, lookups resolve to its last column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    /// Build a header from the fields of a row
    pub fn from_row(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Header { names, index }
    }

    /// Zero-based column of `name`, or `None` if the header has no such field
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name of the field at `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// All field names in column order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Header {
        Header::from_row(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_lookup() {
        let header = header(&["name", "age", "city"]);
        assert_eq!(header.index_of("name"), Some(0));
        assert_eq!(header.index_of("city"), Some(2));
        assert_eq!(header.index_of("zip"), None);
        assert_eq!(header.name(1), Some("age"));
        assert_eq!(header.name(3), None);
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn test_names_are_verbatim() {
        let header = header(&[" name", "age "]);
        assert_eq!(header.index_of("name"), None);
        assert_eq!(header.index_of(" name"), Some(0));
        assert_eq!(header.index_of("age "), Some(1));
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let header = header(&["id", "value", "id"]);
        assert_eq!(header.index_of("id"), Some(2));
        assert_eq!(header.len(), 3);
        assert_eq!(header.iter().collect::<Vec<_>>(), vec!["id", "value", "id"]);
    }
}
