//! CSV normalization - raw CSV text to canonical worksheet rows
//!
//! Source files arrive in three shapes: the git-log export, a previous
//! round-trip export of the worksheet itself, or a foreign CSV. The source
//! schema is resolved from the header row once, then every record is
//! mapped through the same column map.

use crate::model::row::{CanonicalRow, Field};
use csv::StringRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV input is empty")]
    EmptyInput,
    #[error("failed to read CSV header: {0}")]
    Header(#[from] csv::Error),
}

/// The five fields resolvable from source columns, in map order.
/// `TimeStamp` is deliberately absent: only a round-trip export carries it.
const MAPPED_FIELDS: [Field; 5] = [
    Field::Date,
    Field::AuthorName,
    Field::CommitType,
    Field::Scope,
    Field::Description,
];

/// Substring hints for foreign schemas, one list per mapped field.
/// The first header containing any of the field's hints wins.
const FUZZY_HINTS: [&[&str]; 5] = [
    &["date", "time"],
    &["author", "name"],
    &["commit type", "type"],
    &["scope"],
    &["message", "description", "log"],
];

/// Recognized source schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceSchema {
    /// Git-log export, identified by its `Commit Hash` column
    GitLog,
    /// A previous worksheet export, identified by `Date` (and no `Commit Hash`)
    RoundTrip,
    /// Anything else; columns are resolved by substring hints
    Foreign,
}

impl SourceSchema {
    fn detect(headers: &[String]) -> SourceSchema {
        if headers.iter().any(|h| h == "Commit Hash") {
            SourceSchema::GitLog
        } else if headers.iter().any(|h| h == "Date") {
            SourceSchema::RoundTrip
        } else {
            SourceSchema::Foreign
        }
    }
}

/// Source column index per mapped field, plus the round-trip `TimeStamp`
#[derive(Debug)]
struct ColumnMap {
    mapped: [Option<usize>; 5],
    time_stamp: Option<usize>,
}

fn exact(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn fuzzy(headers: &[String], hints: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let lower = h.to_lowercase();
        hints.iter().any(|hint| lower.contains(hint))
    })
}

fn resolve_columns(schema: SourceSchema, headers: &[String]) -> ColumnMap {
    match schema {
        SourceSchema::GitLog => ColumnMap {
            mapped: [
                exact(headers, "Date"),
                exact(headers, "Author"),
                exact(headers, "Commit Type"),
                exact(headers, "Scope"),
                exact(headers, "Message"),
            ],
            time_stamp: None,
        },
        SourceSchema::RoundTrip => ColumnMap {
            mapped: [
                exact(headers, "Date"),
                exact(headers, "Author Name"),
                exact(headers, "Commit Type"),
                exact(headers, "Scope"),
                exact(headers, "Description"),
            ],
            time_stamp: exact(headers, "TimeStamp"),
        },
        SourceSchema::Foreign => {
            let mut mapped = [None; 5];
            for (slot, hints) in mapped.iter_mut().zip(FUZZY_HINTS) {
                *slot = fuzzy(headers, hints);
            }
            ColumnMap {
                mapped,
                time_stamp: None,
            }
        }
    }
}

fn map_record(record: &StringRecord, columns: &ColumnMap) -> CanonicalRow {
    let cell = |index: Option<usize>| {
        index
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_string()
    };

    let mut row = CanonicalRow::default();
    for (field, index) in MAPPED_FIELDS.into_iter().zip(columns.mapped) {
        row.set(field, cell(index));
    }
    row.time_stamp = cell(columns.time_stamp);
    row
}

/// Parse raw CSV text into canonical rows.
///
/// Pure and deterministic; the only error is an unreadable header row.
/// Records that fail to parse mid-file are skipped, and records that map
/// entirely empty from a degenerate source line (at most one field) are
/// dropped.
pub fn normalize(raw_text: &str) -> Result<Vec<CanonicalRow>, ParseError> {
    if raw_text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(raw_text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let schema = SourceSchema::detect(&headers);
    let columns = resolve_columns(schema, &headers);

    let mut rows = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        let row = map_record(&record, &columns);
        if row.is_blank() && record.len() <= 1 {
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}
