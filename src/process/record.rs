use serde::Serialize;
use std::{fmt, sync::Arc};

/// A single typed CSV cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Number(_) => None,
            Cell::Text(s) => Some(s),
        }
    }

    /// Compare against a key as the producer wrote it. Numbers match their
    /// display form so that e.g. a decile column can be looked up by "3".
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Cell::Text(s) => s == key,
            Cell::Number(n) => key.trim().parse::<f64>().map_or(false, |k| k == *n),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// One data row. Every record of a dataset shares the header's column list.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    cells: Vec<Cell>,
}

impl Record {
    /// `cells` is padded or truncated to the header width.
    pub fn new(columns: Arc<[String]>, mut cells: Vec<Cell>) -> Self {
        cells.resize(columns.len(), Cell::Text(String::new()));
        Self { columns, cells }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.cells[i])
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Cell::as_f64)
    }

    /// Text view of a column; numbers are rendered back to text.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).map(Cell::to_string)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.columns.iter().map(String::as_str).zip(self.cells.iter())
    }
}

impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Rows of one CSV document, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// First record whose `column` equals `key`.
    pub fn find(&self, column: &str, key: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.get(column).map_or(false, |c| c.matches(key)))
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn record_pads_and_truncates_to_header() {
        let short = Record::new(cols(&["a", "b", "c"]), vec![Cell::Number(1.0)]);
        assert_eq!(short.get("c"), Some(&Cell::Text(String::new())));

        let long = Record::new(
            cols(&["a"]),
            vec![Cell::Number(1.0), Cell::Text("extra".into())],
        );
        assert_eq!(long.iter().count(), 1);
    }

    #[test]
    fn numeric_cells_match_textual_keys() {
        assert!(Cell::Number(3.0).matches("3"));
        assert!(!Cell::Number(3.0).matches("three"));
        assert!(Cell::Text("Total".into()).matches("Total"));
    }

    #[test]
    fn find_returns_first_match() {
        let c = cols(&["metric", "pe"]);
        let ds = Dataset {
            headers: c.to_vec(),
            records: vec![
                Record::new(c.clone(), vec![Cell::Text("x".into()), Cell::Number(1.0)]),
                Record::new(c.clone(), vec![Cell::Text("x".into()), Cell::Number(2.0)]),
            ],
        };
        assert_eq!(ds.find("metric", "x").and_then(|r| r.number("pe")), Some(1.0));
        assert!(ds.find("metric", "y").is_none());
        assert!(ds.find("missing", "x").is_none());
    }
}
