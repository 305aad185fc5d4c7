//! Set-shaped predicates: uniqueness of grouped keys, one-to-one
//! relationship integrity, ordering within groups, distinct-value
//! coverage and column uniformity.

use crate::{
    error::OperatorError,
    ops::{
        BoolColumn, Output,
        frame::{
            FrameArgs, FrameOps,
            helpers::{NULL_CELL, all_false, bool_column, group_rows, sorted_row_order},
        },
    },
    value::{Value, canonical_cmp},
};
use std::{cmp::Ordering, collections::BTreeSet};

impl FrameOps {
    // ---- unique set ---------------------------------------------------

    /// Group by the combined key of target plus comparator column(s);
    /// a row is unique when its group has a single member.
    pub fn is_unique_set(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let mut keys = vec![self.target_name(args)?];
        match self.comparator_value(args)? {
            Value::Text(name) => keys.push(self.bundle().replace_prefix(name)),
            Value::List(items) => {
                for item in items {
                    let name = item.as_text().ok_or_else(|| {
                        OperatorError::invalid_argument("comparator list must name columns")
                    })?;
                    keys.push(self.bundle().replace_prefix(name));
                }
            }
            other => {
                return Err(OperatorError::invalid_argument(format!(
                    "comparator must name one or more columns, got {other:?}"
                )));
            }
        }

        let frame = self.bundle().frame();
        let mut cells = vec![false; frame.rows()];
        for group in group_rows(&frame, &keys).values() {
            let unique = group.len() <= 1;
            for &row in group {
                cells[row] = unique;
            }
        }

        Ok(bool_column(cells))
    }

    pub fn is_not_unique_set(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.is_unique_set(args)?.complement())
    }

    // ---- unique relationship ------------------------------------------

    /// One-to-one integrity across the (target, comparator) pair:
    /// duplicate pairs are allowed, but once duplicates are removed
    /// neither side may repeat. Rows carrying a repeating value on
    /// either side are flagged.
    pub fn is_not_unique_relationship(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let comparator = match self.comparator_value(args)? {
            Value::Text(name) => self.bundle().replace_prefix(name),
            other => {
                return Err(OperatorError::invalid_argument(format!(
                    "comparator must be a single column name, got {other:?}"
                )));
            }
        };

        let frame = self.bundle().frame();
        let rows = frame.rows();
        let (Some(target_column), Some(comparator_column)) =
            (frame.column(&target), frame.column(&comparator))
        else {
            return Ok(all_false(rows));
        };

        let distinct_pairs: BTreeSet<(&Value, &Value)> = (0..rows)
            .map(|row| (&target_column[row], &comparator_column[row]))
            .collect();

        let repeated_targets = repeated_side(distinct_pairs.iter().map(|(t, _)| *t));
        let repeated_comparators = repeated_side(distinct_pairs.iter().map(|(_, c)| *c));

        Ok(bool_column((0..rows).map(|row| {
            repeated_comparators.contains(&comparator_column[row])
                || repeated_targets.contains(&target_column[row])
        })))
    }

    pub fn is_unique_relationship(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.is_not_unique_relationship(args)?.complement())
    }

    // ---- ordered set --------------------------------------------------

    /// Aggregate: every comparator group's target values are already
    /// in non-decreasing listing order.
    pub fn is_ordered_set(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(Output::Bool(self.ordered_set_verdict(args)?))
    }

    pub fn is_not_ordered_set(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(Output::Bool(!self.ordered_set_verdict(args)?))
    }

    fn ordered_set_verdict(&self, args: &FrameArgs) -> Result<bool, OperatorError> {
        let target = self.target_name(args)?;
        let group_key = self.comparator_column_name(args)?.to_string();

        let frame = self.bundle().frame();
        let ordered = group_rows(&frame, &[group_key]).values().all(|group| {
            group.windows(2).all(|pair| {
                let previous = frame.cell(&target, pair[0]).unwrap_or(&NULL_CELL);
                let next = frame.cell(&target, pair[1]).unwrap_or(&NULL_CELL);
                canonical_cmp(previous, next) != Ordering::Greater
            })
        });

        Ok(ordered)
    }

    /// Per-row: the column equals its own stable ascending reordering.
    pub fn is_ordered_by(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };

        let order = sorted_row_order(column);
        Ok(bool_column(
            (0..rows).map(|row| column[row] == column[order[row]]),
        ))
    }

    // ---- distinct coverage --------------------------------------------

    /// Aggregate: every distinct comparator value appears among the
    /// target column's distinct values.
    pub fn contains_all(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(Output::Bool(self.contains_all_verdict(args)?))
    }

    pub fn not_contains_all(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(Output::Bool(!self.contains_all_verdict(args)?))
    }

    fn contains_all_verdict(&self, args: &FrameArgs) -> Result<bool, OperatorError> {
        let target = self.target_name(args)?;
        let comparator = self.comparator_value(args)?;
        let frame = self.bundle().frame();

        let needed: BTreeSet<Value> = match comparator {
            Value::List(items) => items.iter().cloned().collect(),
            Value::Text(name) => {
                let resolved = self.bundle().replace_prefix(name);
                frame.column(&resolved).map_or_else(
                    || BTreeSet::from([Value::Text(resolved.clone())]),
                    |column| column.iter().cloned().collect(),
                )
            }
            other => BTreeSet::from([other.clone()]),
        };

        let present: BTreeSet<Value> = frame
            .column(&target)
            .map(|column| column.iter().cloned().collect())
            .unwrap_or_default();

        Ok(needed.is_subset(&present))
    }

    // ---- uniformity ---------------------------------------------------

    /// Aggregate broadcast per-row: the column holds more than one
    /// distinct value.
    pub fn has_different_values(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();

        let distinct: BTreeSet<&Value> = frame
            .column(&target)
            .map(|column| column.iter().collect())
            .unwrap_or_default();

        Ok(Output::Column(BoolColumn::repeat(distinct.len() > 1, rows)))
    }

    pub fn has_same_values(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.has_different_values(args)?.complement())
    }
}

/// Values appearing in more than one of the deduplicated pairs.
fn repeated_side<'a>(values: impl Iterator<Item = &'a Value>) -> BTreeSet<&'a Value> {
    let mut seen: BTreeSet<&Value> = BTreeSet::new();
    let mut repeated: BTreeSet<&Value> = BTreeSet::new();
    for value in values {
        if !seen.insert(value) {
            repeated.insert(value);
        }
    }
    repeated
}
