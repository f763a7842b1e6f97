use std::collections::HashMap;

/// One raw input row, mapping column names to cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    row: usize,
    cells: HashMap<String, String>,
}

impl Record {
    /// `row` is the 1-based position of the record in its input, used in error messages.
    pub fn new<K, V>(row: usize, cells: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            row,
            cells: cells
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Empty or whitespace-only cells count as absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}
