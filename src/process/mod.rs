// src/process/mod.rs
pub mod map;
pub mod record;
pub mod utils;

use std::sync::Arc;
use tracing::trace;

pub use map::DatasetMap;
pub use record::{Cell, Dataset, Record};
use utils::{infer_cell, split_fields};

/// Parse a whole CSV document into a [`Dataset`].
///
/// The document is trimmed, the first line is the header and every further
/// line is a row. Ragged rows never fail: missing trailing cells become empty
/// text and extra cells are dropped.
pub fn parse_csv(text: &str) -> Dataset {
    let mut lines = text.trim().split('\n');

    let headers: Vec<String> = split_fields(lines.next().unwrap_or_default())
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns: Arc<[String]> = headers.iter().cloned().collect();

    let records: Vec<Record> = lines
        .enumerate()
        .map(|(idx, line)| {
            let cells: Vec<Cell> = split_fields(line).iter().map(|c| infer_cell(c)).collect();
            if cells.len() != columns.len() {
                trace!(
                    row = idx + 1,
                    expected = columns.len(),
                    found = cells.len(),
                    "ragged row"
                );
            }
            Record::new(columns.clone(), cells)
        })
        .collect();

    Dataset { headers, records }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_producer_document() {
        let content = "metric,pe,obr,unit,ratio
SS tax base above £2k cap,10.30,14.3,£bn,0.720
Workers above cap,3400000,3300000,count,1.030
\"Avg excess, per worker\",2800,4333,£,0.646
";
        let ds = parse_csv(content);

        assert_eq!(ds.headers, vec!["metric", "pe", "obr", "unit", "ratio"]);
        assert_eq!(ds.len(), 3);

        let first = ds.get(0).unwrap();
        assert_eq!(first.text("metric").as_deref(), Some("SS tax base above £2k cap"));
        assert_eq!(first.number("pe"), Some(10.3));
        assert_eq!(first.get("unit"), Some(&Cell::Text("£bn".into())));

        let third = ds.get(2).unwrap();
        assert_eq!(third.text("metric").as_deref(), Some("Avg excess, per worker"));
        assert_eq!(third.number("ratio"), Some(0.646));
    }

    #[test]
    fn test_ragged_rows() {
        let ds = parse_csv("a,b,c\n1,2\n4,5,6,7");
        let first = ds.get(0).unwrap();
        assert_eq!(first.get("a"), Some(&Cell::Number(1.0)));
        assert_eq!(first.get("b"), Some(&Cell::Number(2.0)));
        assert_eq!(first.get("c"), Some(&Cell::Text(String::new())));

        let second = ds.get(1).unwrap();
        assert_eq!(second.iter().count(), 3);
        assert_eq!(second.get("c"), Some(&Cell::Number(6.0)));
    }

    #[test]
    fn test_quoted_cells_keep_type_rules() {
        let ds = parse_csv("x,y,z\n\"1,200\",\"42.5\",\"\"");
        let row = ds.get(0).unwrap();
        assert_eq!(row.get("x"), Some(&Cell::Text("1,200".into())));
        assert_eq!(row.get("y"), Some(&Cell::Number(42.5)));
        assert_eq!(row.get("z"), Some(&Cell::Text(String::new())));
    }

    #[test]
    fn test_headers_are_trimmed_and_surrounding_whitespace_ignored() {
        let ds = parse_csv("\n\n  decile , pct_losers \n1, 3.5\n2,4.0\n\n");
        assert_eq!(ds.headers, vec!["decile", "pct_losers"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(0).unwrap().number("pct_losers"), Some(3.5));
    }

    #[test]
    fn test_plain_document_reconstructs() {
        let content = "name,code,value\nAlpha,A1,one\nBeta,B2,two";
        let ds = parse_csv(content);
        let rebuilt: Vec<String> = std::iter::once(ds.headers.join(","))
            .chain(ds.iter().map(|r| {
                r.iter()
                    .map(|(_, c)| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            }))
            .collect();
        assert_eq!(rebuilt.join("\n"), content);
    }

    #[test]
    fn test_header_only_and_empty_documents() {
        let header_only = parse_csv("a,b\n");
        assert_eq!(header_only.headers, vec!["a", "b"]);
        assert!(header_only.is_empty());

        let empty = parse_csv("");
        assert_eq!(empty.headers, vec![""]);
        assert!(empty.is_empty());
    }
}
