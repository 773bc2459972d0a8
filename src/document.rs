//! The converted document and the builder that accumulates it.
//!
//! [`DocumentBuilder`] exposes one operation per mutating directive. Each
//! either applies its change or fails with a fatal [`Error`](crate::Error);
//! nothing is ever removed once added. [`DocumentBuilder::finalize`] freezes
//! the state into a [`Document`].
//!
//! ```rust
//! use rdb_json::{DocumentBuilder, Scalar};
//!
//! let mut builder = DocumentBuilder::new();
//! builder.set_format(Some(4));
//! builder.set_pair("solver".to_string(), Scalar::from("astar"));
//! builder.define_table("incumbent", &["num".to_string(), "cost".to_string()], 3).unwrap();
//! builder.append_row("incumbent", &["1".to_string(), "10.5".to_string()], 4, "#altrow incumbent 1 10.5").unwrap();
//!
//! let doc = builder.finalize();
//! assert_eq!(doc.format(), Some(4));
//! assert_eq!(doc.tables()[0].row_count(), 1);
//! ```

use crate::table::{first_duplicate, Table};
use crate::{Error, PairMap, Result, Scalar};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A fully converted RDB file.
///
/// Serializes as `{"format": ..., "pairs": {...}, "tables": [...]}` with pairs in
/// first-insertion order and tables in first-definition order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    format: Option<i64>,
    pairs: PairMap,
    tables: Vec<Table>,
}

impl Document {
    /// Returns the format version from `#start`, if one was given.
    #[must_use]
    pub fn format(&self) -> Option<i64> {
        self.format
    }

    #[must_use]
    pub fn pairs(&self) -> &PairMap {
        &self.pairs
    }

    /// Looks up a single pair value.
    #[must_use]
    pub fn pair(&self, key: &str) -> Option<&Scalar> {
        self.pairs.get(key)
    }

    /// Returns the tables in the order they were first defined.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name() == name)
    }
}

/// Mutable state accumulated while an RDB stream is being read.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    format: Option<i64>,
    pairs: PairMap,
    tables: IndexMap<String, Table>,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the format version set so far.
    #[must_use]
    pub fn format(&self) -> Option<i64> {
        self.format
    }

    /// Sets or clears the format version.
    pub fn set_format(&mut self, format: Option<i64>) {
        self.format = format;
    }

    /// Inserts or overwrites a pair, returning the value it replaced.
    pub fn set_pair(&mut self, key: String, value: Scalar) -> Option<Scalar> {
        self.pairs.insert(key, value)
    }

    /// Defines a table, or checks a repeated definition against the first one.
    ///
    /// Returns `true` when the table was created and `false` when an identical
    /// definition already existed.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateColumn`] if `columns` names a column twice
    /// - [`Error::ConflictingColumns`] if the table exists with different columns
    pub fn define_table(&mut self, name: &str, columns: &[String], line: usize) -> Result<bool> {
        if let Some(existing) = self.tables.get(name) {
            if existing.columns() != columns {
                return Err(Error::conflicting_columns(
                    name,
                    existing.columns(),
                    columns,
                    line,
                ));
            }
            return Ok(false);
        }

        if let Some(column) = first_duplicate(columns) {
            return Err(Error::duplicate_column(name, column, line));
        }

        self.tables.insert(
            name.to_string(),
            Table::new(name.to_string(), columns.to_vec()),
        );
        Ok(true)
    }

    /// Coerces one row of raw tokens and appends it to an existing table.
    ///
    /// `raw` is the original input line, quoted in the error message when the
    /// value count is wrong.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownTable`] if no `#altcols` defined `name`
    /// - [`Error::RowLength`] if `values.len()` differs from the column count
    pub fn append_row(&mut self, name: &str, values: &[String], line: usize, raw: &str) -> Result<()> {
        let table = self
            .tables
            .get_mut(name)
            .ok_or_else(|| Error::unknown_table(name, line))?;

        if values.len() != table.width() {
            return Err(Error::row_length(
                name,
                table.width(),
                values.len(),
                line,
                raw,
            ));
        }

        table.push_row(values.iter().map(|token| Scalar::coerce(token)).collect());
        Ok(())
    }

    /// Freezes the accumulated state into a [`Document`].
    #[must_use]
    pub fn finalize(self) -> Document {
        debug!(
            format = ?self.format,
            pairs = self.pairs.len(),
            tables = self.tables.len(),
            "document finalized"
        );
        Document {
            format: self.format,
            pairs: self.pairs,
            tables: self.tables.into_values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_builder() {
        let doc = DocumentBuilder::new().finalize();
        assert_eq!(doc, Document::default());
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"format":null,"pairs":{},"tables":[]}"#
        );
    }

    #[test]
    fn test_redefinition_with_same_columns_is_accepted() {
        let mut builder = DocumentBuilder::new();
        assert!(builder.define_table("t", &strings(&["a", "b"]), 1).unwrap());
        builder.append_row("t", &strings(&["1", "2"]), 2, "").unwrap();
        assert!(!builder.define_table("t", &strings(&["a", "b"]), 3).unwrap());

        let doc = builder.finalize();
        assert_eq!(doc.tables().len(), 1);
        assert_eq!(doc.tables()[0].row_count(), 1);
    }

    #[test]
    fn test_conflicting_redefinition() {
        let mut builder = DocumentBuilder::new();
        builder.define_table("t", &strings(&["a", "b"]), 1).unwrap();

        let err = builder.define_table("t", &strings(&["b", "a"]), 5).unwrap_err();
        assert_eq!(
            err,
            Error::ConflictingColumns {
                table: "t".to_string(),
                existing: strings(&["a", "b"]),
                found: strings(&["b", "a"]),
                line: 5,
            }
        );
    }

    #[test]
    fn test_duplicate_column() {
        let mut builder = DocumentBuilder::new();
        let err = builder.define_table("t", &strings(&["a", "a"]), 1).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn { ref column, .. } if column == "a"));
    }

    #[test]
    fn test_row_for_unknown_table() {
        let mut builder = DocumentBuilder::new();
        let err = builder
            .append_row("x", &strings(&["1", "2"]), 1, "#altrow x 1 2")
            .unwrap_err();
        assert_eq!(err, Error::unknown_table("x", 1));
    }

    #[test]
    fn test_row_length_mismatch_leaves_table_untouched() {
        let mut builder = DocumentBuilder::new();
        builder.define_table("t", &strings(&["a", "b"]), 1).unwrap();
        let err = builder
            .append_row("t", &strings(&["1"]), 2, "#altrow \"t\" 1")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RowLength {
                expected: 2,
                found: 1,
                ..
            }
        ));

        let doc = builder.finalize();
        assert_eq!(doc.table("t").map(Table::row_count), Some(0));
    }

    #[test]
    fn test_tables_keep_definition_order() {
        let mut builder = DocumentBuilder::new();
        builder.define_table("zeta", &strings(&["a"]), 1).unwrap();
        builder.define_table("alpha", &strings(&["a"]), 2).unwrap();
        builder.define_table("zeta", &strings(&["a"]), 3).unwrap();

        let names: Vec<_> = builder
            .finalize()
            .tables()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }
}
