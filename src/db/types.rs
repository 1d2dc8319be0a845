//! Query result types for boltbench.

use std::fmt;

/// Result of executing a single SQL statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Rows of data, in the order the backend returned them.
    pub data: Vec<Row>,

    /// Number of rows in `data`.
    pub row_count: usize,

    /// Column names in result order.
    pub columns: Vec<String>,

    /// Wall-clock dispatch time in milliseconds.
    pub execution_time_ms: f64,

    /// Rows scanned by the engine, when the backend reports it.
    pub rows_scanned: Option<u64>,

    /// Bytes read by the engine, when the backend reports it.
    pub bytes_read: Option<u64>,
}

impl QueryResult {
    /// Creates a result from columns and rows with no timing or scan statistics.
    pub fn with_data(columns: Vec<String>, data: Vec<Row>) -> Self {
        let row_count = data.len();
        Self {
            data,
            row_count,
            columns,
            execution_time_ms: 0.0,
            rows_scanned: None,
            bytes_read: None,
        }
    }

    /// Sets the execution time.
    pub fn with_execution_time(mut self, execution_time_ms: f64) -> Self {
        self.execution_time_ms = execution_time_ms;
        self
    }

    /// Sets engine scan statistics.
    pub fn with_scan_stats(mut self, rows_scanned: Option<u64>, bytes_read: Option<u64>) -> Self {
        self.rows_scanned = rows_scanned;
        self.bytes_read = bytes_read;
        self
    }

    /// Returns true if the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QueryResult(rows={}, time={:.1}ms)",
            self.row_count, self.execution_time_ms
        )
    }
}

/// One result row: column names paired with their textual values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    entries: Vec<(String, String)>,
}

impl Row {
    /// Pairs column names with values positionally.
    ///
    /// Values past the last column are dropped; columns past the last value
    /// are left out of the row.
    pub fn zip<C, V>(columns: &[C], values: impl IntoIterator<Item = V>) -> Self
    where
        C: AsRef<str>,
        V: Into<String>,
    {
        let entries = columns
            .iter()
            .zip(values)
            .map(|(c, v)| (c.as_ref().to_string(), v.into()))
            .collect();
        Self { entries }
    }

    /// Returns the value for a column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of entries in the row.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the row has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
