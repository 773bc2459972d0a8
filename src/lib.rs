//! # rdb_json
//!
//! Converts RDB files, the line-oriented, directive-tagged text format used to
//! record search experiments, into JSON documents.
//!
//! ## What is RDB?
//!
//! An RDB file mixes scalar metadata with column-oriented result tables:
//!
//! ```text
//! #start data file format 4
//! #pair "wall start date" "2024-01-01"
//! #altcols "incumbent" "incumbent num" "cost"
//! #altrow "incumbent" 1 10.5
//! #altrow "incumbent" 2 9.25
//! #end data file format 4
//! ```
//!
//! which converts to
//!
//! ```json
//! {
//!   "format": 4,
//!   "pairs": { "wall start date": "2024-01-01" },
//!   "tables": [
//!     {
//!       "name": "incumbent",
//!       "columns": ["incumbent num", "cost"],
//!       "data": { "incumbent num": [1, 2], "cost": [10.5, 9.25] }
//!     }
//!   ]
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Streaming**: input is consumed one line at a time through [`Parser`]
//! - **Typed cells**: every value is coerced to an integer, float or string ([`Scalar`])
//! - **Ordered output**: pairs, tables and columns keep their input order
//! - **Forward compatible**: unknown directives and unparsable lines are skipped
//! - **Strict tables**: inconsistent table definitions and ragged rows are fatal
//!
//! ## Quick Start
//!
//! ```rust
//! use rdb_json::{from_str, to_string, Scalar};
//!
//! let rdb = "#start data file format 4\n\
//!            #pair \"wall start date\" \"2024-01-01\"\n\
//!            #altcols \"incumbent\" \"incumbent num\" \"cost\"\n\
//!            #altrow \"incumbent\" 1 10.5\n\
//!            #altrow \"incumbent\" 2 9.25\n\
//!            #end data file format 4";
//!
//! let doc = from_str(rdb).unwrap();
//! assert_eq!(doc.format(), Some(4));
//! assert_eq!(doc.pair("wall start date"), Some(&Scalar::from("2024-01-01")));
//!
//! let table = doc.table("incumbent").unwrap();
//! assert_eq!(table.columns(), ["incumbent num", "cost"]);
//! assert_eq!(table.column("cost"), Some(&[Scalar::Float(10.5), Scalar::Float(9.25)][..]));
//!
//! let json = to_string(&doc).unwrap();
//! assert!(json.starts_with(r#"{"format":4,"pairs":{"wall start date":"2024-01-01"}"#));
//! ```
//!
//! ## Errors
//!
//! Conversion stops at the first table inconsistency and no document is
//! returned. See [`Error`] for the conditions.

pub mod directive;
pub mod document;
pub mod error;
pub mod map;
pub mod options;
pub mod scalar;
pub mod table;
pub mod token;

pub use directive::{DirectiveKind, LineOutcome, ParseStats, Parser, SkipReason};
pub use document::{Document, DocumentBuilder};
pub use error::{Error, Result};
pub use map::PairMap;
pub use options::JsonOptions;
pub use scalar::Scalar;
pub use table::Table;
pub use token::{tokenize, TokenizeError};

use serde::Serialize;
use std::io;

/// Parses RDB text held in memory.
///
/// # Errors
///
/// Returns the first fatal table error; see [`Error`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<Document> {
    from_lines(input.lines())
}

/// Parses RDB text from any sequence of lines.
///
/// # Examples
///
/// ```rust
/// use rdb_json::from_lines;
///
/// let lines = vec!["#altcols t a".to_string(), "#altrow t 1".to_string()];
/// let doc = from_lines(lines).unwrap();
/// assert_eq!(doc.table("t").unwrap().row_count(), 1);
/// ```
///
/// # Errors
///
/// Returns the first fatal table error; see [`Error`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_lines<I, S>(lines: I) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = Parser::new();
    for line in lines {
        parser.feed_line(line.as_ref())?;
    }
    Ok(parser.finish())
}

/// Parses RDB text from a buffered reader, one line at a time.
///
/// # Examples
///
/// ```rust
/// use rdb_json::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new("#pair seed 17\n")).unwrap();
/// assert_eq!(doc.pair("seed").and_then(|v| v.as_i64()), Some(17));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not UTF-8, and
/// otherwise the first fatal table error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Document>
where
    R: io::BufRead,
{
    let mut parser = Parser::new();
    for line in reader.lines() {
        parser.feed_line(&line?)?;
    }
    Ok(parser.finish())
}

/// Serializes a value as compact JSON.
///
/// # Errors
///
/// Returns [`Error::Json`] if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &JsonOptions::default())
}

/// Serializes a value as JSON indented by two spaces.
///
/// # Errors
///
/// Returns [`Error::Json`] if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &JsonOptions::pretty())
}

/// Serializes a value as JSON with custom options.
///
/// # Errors
///
/// Returns [`Error::Json`] if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &JsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(128);
    to_writer_with_options(&mut buffer, value, options)?;
    String::from_utf8(buffer).map_err(|e| Error::Json(e.to_string()))
}

/// Serializes a value as compact JSON into a writer.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &JsonOptions::default())
}

/// Serializes a value as JSON into a writer with custom options.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: &JsonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    if options.pretty {
        let indent = options.indent_bytes();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        value.serialize(&mut serializer)?;
    } else {
        let mut serializer = serde_json::Serializer::new(writer);
        value.serialize(&mut serializer)?;
    }
    Ok(())
}

/// Converts RDB text straight to JSON text.
///
/// # Examples
///
/// ```rust
/// use rdb_json::{convert, JsonOptions};
///
/// let json = convert("#altcols t a\n#altrow t 007", &JsonOptions::new()).unwrap();
/// assert_eq!(
///     json,
///     r#"{"format":null,"pairs":{},"tables":[{"name":"t","columns":["a"],"data":{"a":[7]}}]}"#
/// );
/// ```
///
/// # Errors
///
/// Returns the first fatal table error; no JSON is produced in that case.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert(input: &str, options: &JsonOptions) -> Result<String> {
    let document = from_str(input)?;
    to_string_with_options(&document, options)
}
