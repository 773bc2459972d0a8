//! Column-oriented tables built from `#altcols` / `#altrow` directives.
//!
//! A [`Table`] stores one value sequence per column. Rows are only ever
//! appended whole, so every column always holds exactly
//! [`row_count`](Table::row_count) values.

use crate::Scalar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named table with ordered, unique columns.
///
/// Serializes as `{"name": ..., "columns": [...], "data": {column: [...]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    name: String,
    columns: Vec<String>,
    data: IndexMap<String, Vec<Scalar>>,
    #[serde(skip)]
    rows: usize,
}

impl Table {
    /// Creates an empty table. `columns` must not contain duplicates.
    pub(crate) fn new(name: String, columns: Vec<String>) -> Self {
        debug_assert!(first_duplicate(&columns).is_none());
        let data = columns
            .iter()
            .map(|column| (column.clone(), Vec::new()))
            .collect();
        Table {
            name,
            columns,
            data,
            rows: 0,
        }
    }

    /// Appends one row. `row` must hold one value per column, in column order.
    pub(crate) fn push_row(&mut self, row: Vec<Scalar>) {
        debug_assert_eq!(row.len(), self.columns.len());
        for (values, value) in self.data.values_mut().zip(row) {
            values.push(value);
        }
        self.rows += 1;
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column names in definition order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of accepted rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns the values of one column, oldest row first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdb_json::{from_str, Scalar};
    ///
    /// let doc = from_str("#altcols t a b\n#altrow t 1 x\n#altrow t 2 y").unwrap();
    /// let table = doc.table("t").unwrap();
    /// assert_eq!(
    ///     table.column("a"),
    ///     Some(&[Scalar::Integer(1), Scalar::Integer(2)][..])
    /// );
    /// assert_eq!(table.column("missing"), None);
    /// ```
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Scalar]> {
        self.data.get(name).map(Vec::as_slice)
    }

    /// Returns the values of row `index` in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<&Scalar>> {
        if index >= self.rows {
            return None;
        }
        Some(self.data.values().map(|values| &values[index]).collect())
    }

    /// Returns the per-column value sequences in column order.
    #[must_use]
    pub fn data(&self) -> &IndexMap<String, Vec<Scalar>> {
        &self.data
    }
}

/// Returns the first column name that appears twice in `columns`.
pub(crate) fn first_duplicate(columns: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(columns.len());
    columns
        .iter()
        .find(|column| !seen.insert(column.as_str()))
        .map(String::as_str)
}

/// Unvalidated table shape read from JSON.
#[derive(Deserialize)]
struct RawTable {
    name: String,
    columns: Vec<String>,
    data: IndexMap<String, Vec<Scalar>>,
}

impl TryFrom<RawTable> for Table {
    type Error = String;

    fn try_from(raw: RawTable) -> Result<Self, String> {
        if let Some(column) = first_duplicate(&raw.columns) {
            return Err(format!("table '{}' repeats column '{}'", raw.name, column));
        }

        let mut table = Table::new(raw.name, raw.columns);
        let mut data = raw.data;
        let mut rows = None;
        for column in &table.columns {
            let values = data
                .swap_remove(column)
                .ok_or_else(|| format!("table '{}' has no data for column '{}'", table.name, column))?;
            match rows {
                None => rows = Some(values.len()),
                Some(n) if n != values.len() => {
                    return Err(format!(
                        "table '{}' column '{}' has {} values, expected {}",
                        table.name,
                        column,
                        values.len(),
                        n
                    ))
                }
                Some(_) => {}
            }
            if let Some(slot) = table.data.get_mut(column) {
                *slot = values;
            }
        }
        if let Some(extra) = data.keys().next() {
            return Err(format!(
                "table '{}' has data for undeclared column '{}'",
                table.name, extra
            ));
        }
        table.rows = rows.unwrap_or(0);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new("t".to_string(), columns(&["a", "b"]));
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.width(), 2);
        assert_eq!(table.column("a"), Some(&[][..]));
        assert_eq!(table.row(0), None);
    }

    #[test]
    fn test_push_row_keeps_columns_in_lockstep() {
        let mut table = Table::new("t".to_string(), columns(&["a", "b"]));
        table.push_row(vec![Scalar::Integer(1), Scalar::Float(10.5)]);
        table.push_row(vec![Scalar::Integer(2), Scalar::Float(9.25)]);

        assert_eq!(table.row_count(), 2);
        for values in table.data().values() {
            assert_eq!(values.len(), 2);
        }
        assert_eq!(
            table.row(1),
            Some(vec![&Scalar::Integer(2), &Scalar::Float(9.25)])
        );
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(first_duplicate(&columns(&["a", "b", "c"])), None);
        assert_eq!(first_duplicate(&columns(&["a", "b", "a"])), Some("a"));
    }

    #[test]
    fn test_json_round_trip_validates_shape() {
        let mut table = Table::new("t".to_string(), columns(&["b", "a"]));
        table.push_row(vec![Scalar::from("x"), Scalar::Integer(1)]);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"name":"t","columns":["b","a"],"data":{"b":["x"],"a":[1]}}"#
        );
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        assert_eq!(back.row_count(), 1);

        let ragged = r#"{"name":"t","columns":["a","b"],"data":{"a":[1,2],"b":[1]}}"#;
        assert!(serde_json::from_str::<Table>(ragged).is_err());

        let missing = r#"{"name":"t","columns":["a","b"],"data":{"a":[1]}}"#;
        assert!(serde_json::from_str::<Table>(missing).is_err());
    }
}
