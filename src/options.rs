//! Configuration options for JSON output.
//!
//! ## Examples
//!
//! ```rust
//! use rdb_json::{from_str, to_string_with_options, JsonOptions};
//!
//! let doc = from_str("#pair seed 7").unwrap();
//!
//! // Compact, the default
//! let json = to_string_with_options(&doc, &JsonOptions::new()).unwrap();
//! assert_eq!(json, r#"{"format":null,"pairs":{"seed":7},"tables":[]}"#);
//!
//! // Indented with four spaces
//! let json = to_string_with_options(&doc, &JsonOptions::pretty().with_indent(4)).unwrap();
//! assert!(json.contains("\n    \"format\": null"));
//! ```

/// Controls how a [`Document`](crate::Document) is rendered as JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonOptions {
    pub indent: usize,
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            indent: 2,
            pretty: false,
        }
    }
}

impl JsonOptions {
    /// Creates default options (compact output, 2-space indent when pretty).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdb_json::JsonOptions;
    ///
    /// let options = JsonOptions::pretty();
    /// assert!(options.pretty);
    /// assert_eq!(options.indent, 2);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        JsonOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the number of spaces per nesting level. Only affects pretty output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Turns indentation on or off.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub(crate) fn indent_bytes(&self) -> Vec<u8> {
        vec![b' '; self.indent]
    }
}
