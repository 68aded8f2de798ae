//! Worksheet store - the ordered table of canonical rows
//!
//! The worksheet is replaced wholesale on load and mutated one cell at a
//! time through `set_cell`. Row identity is positional for the lifetime of
//! a single load.

use crate::model::row::{CanonicalRow, Field};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Indicates the caller's row math and the store disagree. This is a
    /// bug in UI wiring, not a user-facing condition.
    #[error("row index {index} out of range (worksheet has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered, index-stable table of canonical rows
#[derive(Debug, Default, Clone)]
pub struct Worksheet {
    rows: Vec<CanonicalRow>,
}

impl Worksheet {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Replace the table wholesale. Callers reset pagination to page 1.
    pub fn load(&mut self, rows: Vec<CanonicalRow>) {
        self.rows = rows;
    }

    /// Mutate a single cell. The sole mutation path.
    pub fn set_cell(&mut self, index: usize, field: Field, value: String) -> Result<(), TableError> {
        let len = self.rows.len();
        match self.rows.get_mut(index) {
            Some(row) => {
                row.set(field, value);
                Ok(())
            }
            None => Err(TableError::IndexOutOfRange { index, len }),
        }
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize to CSV text in canonical field order. The output parses
    /// back through the round-trip tier of `services::normalize`.
    pub fn serialize(&self) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        // Writer errors can only come from the underlying sink, which is an
        // in-memory Vec here, so they are unreachable in practice.
        let _ = writer.write_record(Field::ALL.iter().map(|f| f.header()));
        for row in &self.rows {
            let _ = writer.write_record(row.values());
        }
        let bytes = writer.into_inner().unwrap_or_default();
        String::from_utf8(bytes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(description: &str) -> CanonicalRow {
        CanonicalRow {
            date: "2025-04-28".to_string(),
            author_name: "Jane Doe".to_string(),
            commit_type: "feat".to_string(),
            scope: "api".to_string(),
            description: description.to_string(),
            time_stamp: String::new(),
        }
    }

    #[test]
    fn test_load_replaces_rows() {
        let mut ws = Worksheet::new();
        ws.load(vec![sample_row("one"), sample_row("two")]);
        assert_eq!(ws.len(), 2);

        ws.load(vec![sample_row("three")]);
        assert_eq!(ws.len(), 1);
        assert_eq!(ws.rows()[0].description, "three");
    }

    #[test]
    fn test_set_cell_mutates_only_target_field() {
        let mut ws = Worksheet::new();
        ws.load(vec![sample_row("one"), sample_row("two")]);

        ws.set_cell(1, Field::TimeStamp, "8h".to_string())
            .expect("index in range");

        assert_eq!(ws.rows()[1].time_stamp, "8h");
        assert_eq!(ws.rows()[1].description, "two");
        assert_eq!(ws.rows()[0].time_stamp, "");
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut ws = Worksheet::new();
        ws.load(vec![sample_row("one")]);

        let err = ws
            .set_cell(1, Field::Date, "x".to_string())
            .expect_err("index past end");
        assert_eq!(err, TableError::IndexOutOfRange { index: 1, len: 1 });

        let err = Worksheet::new()
            .set_cell(0, Field::Date, "x".to_string())
            .expect_err("empty worksheet");
        assert_eq!(err, TableError::IndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn test_serialize_header_and_order() {
        let mut ws = Worksheet::new();
        ws.load(vec![sample_row("fix pagination")]);

        let csv_text = ws.serialize();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next(),
            Some("Date,Author Name,Commit Type,Scope,Description,TimeStamp")
        );
        assert_eq!(
            lines.next(),
            Some("2025-04-28,Jane Doe,feat,api,fix pagination,")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_serialize_quotes_embedded_commas() {
        let mut ws = Worksheet::new();
        ws.load(vec![sample_row("fix a, b and c")]);

        let csv_text = ws.serialize();
        assert!(csv_text.contains("\"fix a, b and c\""));
    }

    #[test]
    fn test_serialize_empty_worksheet_is_header_only() {
        let ws = Worksheet::new();
        assert_eq!(
            ws.serialize(),
            "Date,Author Name,Commit Type,Scope,Description,TimeStamp\n"
        );
    }
}
