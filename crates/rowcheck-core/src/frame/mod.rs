mod bundle;

// re-exports
pub use bundle::{CodelistEntry, FrameBundle, RelationshipNode, RowPredicate, ValueLevelMetadata};

use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// FrameError
///
/// Structural violations raised while building or extending a frame.
///

#[derive(Debug, ThisError)]
pub enum FrameError {
    #[error("column {column} has {found} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column: {column}")]
    DuplicateColumn { column: String },
}

///
/// Column
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
pub struct Column(Vec<Value>);

impl Column {
    #[must_use]
    pub const fn new(cells: Vec<Value>) -> Self {
        Self(cells)
    }

    #[must_use]
    pub fn cells(&self) -> &[Value] {
        &self.0
    }
}

impl<T: Into<Value>> FromIterator<T> for Column {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

///
/// Frame
///
/// A columnar table: named columns in insertion order, every column
/// holding exactly `rows` cells. Missing cells are `Value::Null`.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Frame {
    columns: IndexMap<String, Column>,
    rows: usize,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from `(name, cells)` pairs. The first column
    /// fixes the row count; later columns must agree with it.
    pub fn from_columns<I, N, C, T>(columns: I) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut frame = Self::new();
        for (name, cells) in columns {
            let cells: Vec<Value> = cells.into_iter().map(Into::into).collect();
            frame.insert_column(name, cells)?;
        }
        Ok(frame)
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    #[must_use]
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Append a column. The first column of an empty frame sets the
    /// row count.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<Value>,
    ) -> Result<(), FrameError> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(FrameError::DuplicateColumn { column: name });
        }
        if self.columns.is_empty() {
            self.rows = cells.len();
        } else if cells.len() != self.rows {
            return Err(FrameError::ColumnLengthMismatch {
                column: name,
                expected: self.rows,
                found: cells.len(),
            });
        }
        self.columns.insert(name, Column::new(cells));
        Ok(())
    }

    #[must_use]
    pub fn cell(&self, name: &str, row: usize) -> Option<&Value> {
        self.columns.get(name).and_then(|column| column.get(row))
    }

    #[must_use]
    pub const fn row(&self, index: usize) -> RowView<'_> {
        RowView { frame: self, index }
    }
}

///
/// RowView
///
/// Borrowed view of a single row, keyed by column name. This is the
/// shape value-level-metadata predicates receive.
///

#[derive(Clone, Copy, Debug)]
pub struct RowView<'a> {
    frame: &'a Frame,
    index: usize,
}

impl RowView<'_> {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.frame.cell(column, self.index)
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}
