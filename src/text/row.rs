//! Rows and cells produced by the reader

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::header::Header;

/// A single field value and its position within the row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    index: usize,
    value: String,
}

impl Cell {
    /// Create a new cell
    pub fn new(index: usize, value: impl Into<String>) -> Self {
        Cell {
            index,
            value: value.into(),
        }
    }

    /// Zero-based column of this cell
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl AsRef<str> for Cell {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// One record of a table segment.
///
/// A row may be shorter or longer than its header; name lookups past the end
/// of either simply return `None`.
#[derive(Debug, Clone)]
pub struct Row {
    cells: Vec<Cell>,
    header: Option<Arc<Header>>,
    delimiter: Arc<str>,
    line: u64,
    table: usize,
}

impl Row {
    pub(crate) fn new(
        values: Vec<String>,
        header: Option<Arc<Header>>,
        delimiter: Arc<str>,
        line: u64,
        table: usize,
    ) -> Self {
        let cells = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Cell::new(i, value))
            .collect();
        Row {
            cells,
            header,
            delimiter,
            line,
            table,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(Cell::value)
    }

    /// Cell at a zero-based column
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Cell under the header field `name`.
    ///
    /// Returns `None` when there is no header, the header has no such field,
    /// or this row is too short to reach that column.
    pub fn get_by_name(&self, name: &str) -> Option<&Cell> {
        let index = self.header.as_ref()?.index_of(name)?;
        self.cells.get(index)
    }

    /// Pairs every cell with its header name, if the header reaches that far
    pub fn fields(&self) -> impl Iterator<Item = (Option<&str>, &Cell)> {
        self.cells.iter().map(move |cell| {
            let name = self.header.as_ref().and_then(|h| h.name(cell.index));
            (name, cell)
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Header of the segment this row belongs to
    pub fn header(&self) -> Option<&Arc<Header>> {
        self.header.as_ref()
    }

    /// Delimiter the row was split on
    pub fn delim(&self) -> &str {
        &self.delimiter
    }

    /// 1-based physical line where this record started
    pub fn line_number(&self) -> u64 {
        self.line
    }

    /// Zero-based ordinal of the table segment within the stream
    pub fn table_index(&self) -> usize {
        self.table
    }

    pub fn into_values(self) -> Vec<String> {
        self.cells.into_iter().map(Cell::into_value).collect()
    }
}

/// With a header a row serializes as an object keyed by field name, and cells
/// past the end of the header are keyed by their column index. A key that was
/// already used (a duplicate header name, or a name that looks like a column
/// index) gets `_<index>` appended until it is unique, so no value is lost.
/// Without a header a row is a plain sequence of values.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.header {
            Some(_) => {
                let mut map = serializer.serialize_map(Some(self.cells.len()))?;
                let mut used = HashSet::with_capacity(self.cells.len());
                for (name, cell) in self.fields() {
                    let mut key = match name {
                        Some(name) => name.to_string(),
                        None => cell.index.to_string(),
                    };
                    while used.contains(&key) {
                        key = format!("{key}_{}", cell.index);
                    }
                    map.serialize_entry(&key, cell.value())?;
                    used.insert(key);
                }
                map.end()
            },
            None => {
                let mut seq = serializer.serialize_seq(Some(self.cells.len()))?;
                for cell in &self.cells {
                    seq.serialize_element(cell.value())?;
                }
                seq.end()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Arc<Header> {
        Arc::new(Header::from_row(names.iter().map(|s| s.to_string()).collect()))
    }

    fn row(values: &[&str], header: Option<Arc<Header>>) -> Row {
        let values = values.iter().map(|s| s.to_string()).collect();
        Row::new(values, header, Arc::from(","), 2, 0)
    }

    #[test]
    fn test_access_by_name_and_index() {
        let row = row(&["alice", "30"], Some(header(&["name", "age"])));
        assert_eq!(row.get_by_name("name").map(Cell::value), Some("alice"));
        assert_eq!(row.get_by_name("age").map(Cell::index), Some(1));
        assert_eq!(row.get(1).map(|c| c.to_string()), Some("30".to_string()));
        assert_eq!(row.delim(), ",");
        assert_eq!(row.line_number(), 2);
    }

    #[test]
    fn test_short_row_tolerated() {
        let row = row(&["bob"], Some(header(&["name", "age", "city"])));
        assert_eq!(row.len(), 1);
        assert!(row.get_by_name("age").is_none());
        assert!(row.get_by_name("missing").is_none());
    }

    #[test]
    fn test_long_row_fields() {
        let row = row(&["a", "b", "c"], Some(header(&["x"])));
        let names: Vec<_> = row.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec![Some("x"), None, None]);
    }

    #[test]
    fn test_no_header() {
        let row = row(&["a", "b"], None);
        assert!(row.header().is_none());
        assert!(row.get_by_name("a").is_none());
        assert_eq!(row.into_values(), vec!["a", "b"]);
    }

    #[test]
    fn test_serialize() {
        let with_header = row(&["alice", "30", "extra"], Some(header(&["name", "age"])));
        assert_eq!(
            serde_json::to_string(&with_header).unwrap(),
            r#"{"name":"alice","age":"30","2":"extra"}"#
        );

        let without = row(&["a", "b"], None);
        assert_eq!(serde_json::to_string(&without).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_serialize_keeps_colliding_keys() {
        let duplicated = row(&["1", "2"], Some(header(&["id", "id"])));
        assert_eq!(
            serde_json::to_string(&duplicated).unwrap(),
            r#"{"id":"1","id_1":"2"}"#
        );

        // A header named like a column index does not hide the extra cell
        let numeric = row(&["a", "b", "c"], Some(header(&["2", "x"])));
        let value = serde_json::to_value(&numeric).unwrap();
        assert_eq!(value["2"], "a");
        assert_eq!(value["2_2"], "c");
        assert_eq!(value.as_object().map(|o| o.len()), Some(3));
    }
}
