//! In-memory table and column models
//!
//! The table is the container every cleaning strategy operates against:
//! an ordered sequence of uniquely named, row-aligned columns. All
//! transformations are non-mutating; they consume `&Table` and produce a
//! structurally new `Table`, leaving untouched columns identical to the
//! input.

use crate::domain::{CleanError, Result, Value};
use serde::{Deserialize, Serialize};

/// A named, ordered sequence of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name, unique within its owning table
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column's values in row order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered collection of uniquely named, row-aligned columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Build a table from columns, validating name uniqueness and row alignment
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Configuration`] if two columns share a name or
    /// columns have differing lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Append a column, validating name uniqueness and row alignment
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.columns.iter().any(|c| c.name == column.name) {
            return Err(CleanError::Configuration(format!(
                "Duplicate column name: {}",
                column.name
            )));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(CleanError::Configuration(format!(
                    "Column '{}' has {} rows, expected {}",
                    column.name,
                    column.len(),
                    first.len()
                )));
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column by name, failing with [`CleanError::ColumnNotFound`]
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| CleanError::ColumnNotFound(name.to_string()))
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows (zero for an empty table)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Produce a new table with the named column's values replaced
    ///
    /// The input table is untouched; untouched columns are carried over
    /// structurally unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::ColumnNotFound`] if the column does not exist,
    /// or [`CleanError::Configuration`] if the replacement length differs
    /// from the table's row count.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Table> {
        self.require_column(name)?;
        if values.len() != self.row_count() {
            return Err(CleanError::Configuration(format!(
                "Replacement for column '{}' has {} rows, expected {}",
                name,
                values.len(),
                self.row_count()
            )));
        }
        let columns = self
            .columns
            .iter()
            .map(|c| {
                if c.name == name {
                    Column::new(name, values.clone())
                } else {
                    c.clone()
                }
            })
            .collect();
        Ok(Table { columns })
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
