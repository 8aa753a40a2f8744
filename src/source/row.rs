use std::collections::HashMap;

/// A single value read from a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Text rendering of the cell; numbers are stringified, null is `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Integer(n) => Some(n.to_string()),
            Cell::Real(f) => Some(f.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }

    /// Integer reading with cursor semantics: null and unparseable text read as 0.
    pub fn to_int(&self) -> i64 {
        match self {
            Cell::Null => 0,
            Cell::Integer(n) => *n,
            Cell::Real(f) => *f as i64,
            Cell::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

/// One row of a query result, limited to the projected columns.
///
/// A column that was not projected is absent, which is different from a
/// projected column holding null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    cells: HashMap<String, Cell>,
}

impl DataRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, cell: Cell) -> Self {
        self.insert(column, cell);
        self
    }

    pub fn insert(&mut self, column: &str, cell: Cell) {
        self.cells.insert(column.to_string(), cell);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Text value of a column. Absent columns and nulls both read as `None`.
    pub fn text(&self, column: &str) -> Option<String> {
        self.cell(column).and_then(Cell::to_text)
    }

    /// Integer value of a column. Absent columns and nulls both read as 0.
    pub fn int(&self, column: &str) -> i64 {
        self.cell(column).map(Cell::to_int).unwrap_or(0)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Integer(n)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Null)
    }
}
