/// Driver-agnostic raw result from a database query.
/// All values are converted to strings by the driver; SQL NULL arrives as
/// the empty string, matching the text accessor of the wrapped library.
#[derive(Debug, Clone)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of string values in column order
    pub rows: Vec<Vec<String>>,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// The tuple set of one completed query.
/// Values are text, addressed by zero-based (row, column) coordinates.
#[derive(Debug)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl QueryResult {
    /// Creates a QueryResult from a RawQueryResult.
    pub fn from_raw(raw: RawQueryResult) -> Self {
        Self {
            columns: raw.columns,
            rows: raw.rows,
        }
    }

    /// Returns the column names from this result.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of tuples in this result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns in this result.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the field value at the given coordinates, or None when either
    /// coordinate is out of range.
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|values| values.get(col))
            .map(|value| value.as_str())
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
