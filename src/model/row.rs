//! Canonical worksheet row - the fixed six-column schema
//!
//! Every row in a worksheet has exactly these fields regardless of the
//! source CSV's schema. Missing source columns are coerced to empty
//! strings at normalization time, never omitted.

/// The six canonical worksheet columns, in serialization order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    AuthorName,
    CommitType,
    Scope,
    Description,
    TimeStamp,
}

impl Field {
    /// All fields in canonical column order
    pub const ALL: [Field; 6] = [
        Field::Date,
        Field::AuthorName,
        Field::CommitType,
        Field::Scope,
        Field::Description,
        Field::TimeStamp,
    ];

    /// CSV header name used when serializing a worksheet
    pub fn header(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::AuthorName => "Author Name",
            Field::CommitType => "Commit Type",
            Field::Scope => "Scope",
            Field::Description => "Description",
            Field::TimeStamp => "TimeStamp",
        }
    }

    /// Column title shown in the worksheet table
    pub fn title(&self) -> &'static str {
        match self {
            Field::Date => "Time",
            Field::AuthorName => "Name",
            Field::CommitType => "Commit Type",
            Field::Scope => "Scope",
            Field::Description => "Description/Log",
            Field::TimeStamp => "Time Stamp",
        }
    }

    /// Next field in column order, wrapping around
    pub fn next(&self) -> Field {
        let idx = Field::ALL.iter().position(|f| f == self).unwrap_or(0);
        Field::ALL[(idx + 1) % Field::ALL.len()]
    }

    /// Previous field in column order, wrapping around
    pub fn prev(&self) -> Field {
        let idx = Field::ALL.iter().position(|f| f == self).unwrap_or(0);
        Field::ALL[(idx + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// A single worksheet row. Empty string means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalRow {
    pub date: String,
    pub author_name: String,
    pub commit_type: String,
    pub scope: String,
    pub description: String,
    pub time_stamp: String,
}

impl CanonicalRow {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::AuthorName => &self.author_name,
            Field::CommitType => &self.commit_type,
            Field::Scope => &self.scope,
            Field::Description => &self.description,
            Field::TimeStamp => &self.time_stamp,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Date => self.date = value,
            Field::AuthorName => self.author_name = value,
            Field::CommitType => self.commit_type = value,
            Field::Scope => self.scope = value,
            Field::Description => self.description = value,
            Field::TimeStamp => self.time_stamp = value,
        }
    }

    /// Values in canonical column order
    pub fn values(&self) -> [&str; 6] {
        [
            &self.date,
            &self.author_name,
            &self.commit_type,
            &self.scope,
            &self.description,
            &self.time_stamp,
        ]
    }

    /// True when every field is the empty string
    pub fn is_blank(&self) -> bool {
        self.values().iter().all(|v| v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_distinct() {
        let mut headers: Vec<&str> = Field::ALL.iter().map(|f| f.header()).collect();
        headers.sort_unstable();
        headers.dedup();
        assert_eq!(headers.len(), Field::ALL.len());
    }

    #[test]
    fn test_get_set_cover_all_fields() {
        let mut row = CanonicalRow::default();
        for (i, field) in Field::ALL.into_iter().enumerate() {
            row.set(field, format!("v{}", i));
        }
        assert_eq!(row.values(), ["v0", "v1", "v2", "v3", "v4", "v5"]);
        assert_eq!(row.get(Field::Scope), "v3");
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(Field::TimeStamp.next(), Field::Date);
        assert_eq!(Field::Date.prev(), Field::TimeStamp);
        assert_eq!(Field::Scope.next(), Field::Description);
    }

    #[test]
    fn test_is_blank() {
        let mut row = CanonicalRow::default();
        assert!(row.is_blank());
        row.set(Field::Scope, "api".to_string());
        assert!(!row.is_blank());
    }
}
