use derive_more::{Deref, IntoIterator};
use serde::Serialize;

///
/// MatchSpan
///
/// Byte range of a regex hit inside the receiver text.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

///
/// BoolColumn
///
/// Nullable per-row boolean results. A `None` cell marks a row where
/// the predicate is not applicable (e.g. the last row of a group in
/// inter-row sequencing); complementing preserves those nulls.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
pub struct BoolColumn(Vec<Option<bool>>);

impl BoolColumn {
    #[must_use]
    pub const fn new(cells: Vec<Option<bool>>) -> Self {
        Self(cells)
    }

    #[must_use]
    pub fn repeat(value: bool, len: usize) -> Self {
        Self(vec![Some(value); len])
    }

    pub fn push(&mut self, cell: Option<bool>) {
        self.0.push(cell);
    }

    /// Element-wise complement; nulls stay null.
    #[must_use]
    pub fn not(&self) -> Self {
        Self(self.0.iter().map(|cell| cell.map(|b| !b)).collect())
    }

    /// True if any cell is true.
    #[must_use]
    pub fn any(&self) -> bool {
        self.0.contains(&Some(true))
    }

    /// True if every non-null cell is true.
    #[must_use]
    pub fn all(&self) -> bool {
        !self.0.contains(&Some(false))
    }
}

impl FromIterator<bool> for BoolColumn {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().map(Some).collect())
    }
}

impl FromIterator<Option<bool>> for BoolColumn {
    fn from_iter<I: IntoIterator<Item = Option<bool>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// Output
///
/// What an operator returns: a scalar verdict, a per-row column, or
/// a regex match. Callers reduce with `truthy` when they only need
/// a boolean.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Output {
    Bool(bool),
    Column(BoolColumn),
    Match(Option<MatchSpan>),
}

impl Output {
    /// Reduce to a scalar boolean: columns are true when any row is.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Column(column) => column.any(),
            Self::Match(m) => m.is_some(),
        }
    }

    /// Logical complement. Columns complement element-wise with nulls
    /// preserved; a match complements into its truthiness.
    #[must_use]
    pub fn complement(&self) -> Self {
        match self {
            Self::Bool(b) => Self::Bool(!b),
            Self::Column(column) => Self::Column(column.not()),
            Self::Match(m) => Self::Bool(m.is_none()),
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_column(&self) -> Option<&BoolColumn> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_preserves_column_nulls() {
        let column = BoolColumn::new(vec![Some(true), None, Some(false)]);
        let output = Output::Column(column).complement();
        assert_eq!(
            output,
            Output::Column(BoolColumn::new(vec![Some(false), None, Some(true)]))
        );
    }

    #[test]
    fn truthiness_reduces_each_shape() {
        assert!(Output::Bool(true).truthy());
        assert!(Output::Column(BoolColumn::new(vec![None, Some(true)])).truthy());
        assert!(!Output::Column(BoolColumn::new(vec![None, Some(false)])).truthy());
        assert!(Output::Match(Some(MatchSpan { start: 0, end: 1 })).truthy());
        assert!(!Output::Match(None).truthy());
    }
}
