//! Error types for RDB conversion.
//!
//! Only structurally inconsistent input is an [`Error`]. Lines that merely
//! fail to tokenize, or directives with too few tokens, are dropped by the
//! [`Parser`](crate::Parser) and reported as a
//! [`LineOutcome::Skipped`](crate::LineOutcome::Skipped) instead.
//!
//! ## Error Categories
//!
//! - **Table definition errors**: an `#altcols` that contradicts an earlier one,
//!   or names the same column twice
//! - **Row errors**: an `#altrow` for an undefined table, or with the wrong
//!   number of values
//! - **I/O and output errors**: reading input, writing output, encoding JSON
//!
//! Every parse error carries the 1-based line number of the offending line.
//!
//! ## Examples
//!
//! ```rust
//! use rdb_json::{from_str, Error};
//!
//! let result = from_str("#altrow \"x\" 1 2");
//! assert!(matches!(result, Err(Error::UnknownTable { .. })));
//!
//! if let Err(err) = result {
//!     assert!(err.to_string().contains("'x'"));
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Fatal conditions that abort a whole conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A repeated `#altcols` disagrees with the columns already known for the table.
    #[error(
        "line {line}: conflicting #altcols for table '{table}': {} vs {}",
        ColumnList(.existing),
        ColumnList(.found)
    )]
    ConflictingColumns {
        table: String,
        existing: Vec<String>,
        found: Vec<String>,
        line: usize,
    },

    /// An `#altcols` lists the same column name more than once.
    #[error("line {line}: #altcols for table '{table}' repeats column '{column}'")]
    DuplicateColumn {
        table: String,
        column: String,
        line: usize,
    },

    /// An `#altrow` names a table that no `#altcols` has defined.
    #[error("line {line}: encountered #altrow for unknown table '{table}' before any #altcols definition")]
    UnknownTable { table: String, line: usize },

    /// An `#altrow` carries a different number of values than the table has columns.
    #[error("line {line}: row for table '{table}' has {found} values, expected {expected}. Line: {raw}")]
    RowLength {
        table: String,
        expected: usize,
        found: usize,
        line: usize,
        raw: String,
    },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Encoding the document as JSON failed
    #[error("JSON error: {0}")]
    Json(String),
}

impl Error {
    /// Creates a conflicting-columns error for a redefined table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdb_json::Error;
    ///
    /// let err = Error::conflicting_columns("t", &["a", "b"], &["a", "c"], 7);
    /// assert!(err.to_string().contains("['a', 'b'] vs ['a', 'c']"));
    /// ```
    pub fn conflicting_columns<S: AsRef<str>>(
        table: &str,
        existing: &[S],
        found: &[S],
        line: usize,
    ) -> Self {
        Error::ConflictingColumns {
            table: table.to_string(),
            existing: existing.iter().map(|s| s.as_ref().to_string()).collect(),
            found: found.iter().map(|s| s.as_ref().to_string()).collect(),
            line,
        }
    }

    /// Creates a duplicate-column error.
    pub fn duplicate_column(table: &str, column: &str, line: usize) -> Self {
        Error::DuplicateColumn {
            table: table.to_string(),
            column: column.to_string(),
            line,
        }
    }

    /// Creates an unknown-table error for a row that precedes its table definition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdb_json::Error;
    ///
    /// let err = Error::unknown_table("x", 3);
    /// assert!(err.to_string().starts_with("line 3:"));
    /// ```
    pub fn unknown_table(table: &str, line: usize) -> Self {
        Error::UnknownTable {
            table: table.to_string(),
            line,
        }
    }

    /// Creates a row-length error. `raw` is stored without trailing whitespace.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdb_json::Error;
    ///
    /// let err = Error::row_length("t", 2, 1, 4, "#altrow \"t\" 1\n");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "line 4: row for table 't' has 1 values, expected 2. Line: #altrow \"t\" 1"
    /// );
    /// ```
    pub fn row_length(table: &str, expected: usize, found: usize, line: usize, raw: &str) -> Self {
        Error::RowLength {
            table: table.to_string(),
            expected,
            found,
            line,
            raw: raw.trim_end().to_string(),
        }
    }

    /// Creates an I/O error for reading or writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the input line number for parse errors, `None` for I/O and JSON errors.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::ConflictingColumns { line, .. }
            | Error::DuplicateColumn { line, .. }
            | Error::UnknownTable { line, .. }
            | Error::RowLength { line, .. } => Some(*line),
            Error::Io(_) | Error::Json(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

/// Renders a column list as `['a', 'b']` in error messages.
struct ColumnList<'a>(&'a [String]);

impl fmt::Display for ColumnList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, column) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", column)?;
        }
        f.write_str("]")
    }
}

pub type Result<T> = std::result::Result<T, Error>;
