//! Grouped and inter-row operators: per-group emptiness with the
//! auxiliary-column side channel, next-record sequencing, group
//! multiplicity and additional-column continuity.

use crate::{
    error::OperatorError,
    obs::{self, EngineEvent},
    ops::{
        BoolColumn, Output,
        frame::{
            FrameArgs, FrameOps,
            helpers::{NULL_CELL, bool_column},
        },
    },
    types::Decimal,
    value::{Value, canonical_cmp},
};
use std::collections::BTreeMap;
use uuid::Uuid;

impl FrameOps {
    // ---- grouped emptiness --------------------------------------------

    /// Aggregate: true iff any target cell is empty on a non-final row
    /// of its comparator group. The per-row verdicts are persisted
    /// into the frame under a fresh `result_<uuid>` column, with
    /// group-final rows left null.
    pub fn empty_within_except_last_row(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.grouped_emptiness(args, true)
    }

    /// Aggregate: true iff every target cell is non-empty on the
    /// non-final rows of its comparator group. Same side channel as
    /// its companion, with the polarity flipped.
    pub fn non_empty_within_except_last_row(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        self.grouped_emptiness(args, false)
    }

    fn grouped_emptiness(
        &self,
        args: &FrameArgs,
        check_empty: bool,
    ) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let group_key = self.comparator_column_name(args)?.to_string();

        let (verdict, aux) = {
            let frame = self.bundle().frame();
            let mut aux: Vec<Value> = vec![Value::Null; frame.rows()];
            let mut any_empty = false;
            let mut all_non_empty = true;

            for group in super::helpers::group_rows(&frame, &[group_key]).values() {
                for &row in &group[..group.len().saturating_sub(1)] {
                    let empty = frame.cell(&target, row).unwrap_or(&NULL_CELL).is_empty_cell();
                    any_empty |= empty;
                    all_non_empty &= !empty;
                    aux[row] = Value::Bool(if check_empty { empty } else { !empty });
                }
            }

            let verdict = if check_empty { any_empty } else { all_non_empty };
            (verdict, aux)
        };

        let column = format!("result_{}", Uuid::new_v4());
        self.bundle()
            .frame_mut()
            .insert_column(column.clone(), aux)
            .map_err(|err| OperatorError::invalid_argument(err.to_string()))?;
        obs::record(&EngineEvent::AuxColumnWritten { column });

        Ok(Output::Bool(verdict))
    }

    // ---- next-record sequencing ---------------------------------------

    /// Sort by `ordering`, group by `within`; within each group, row
    /// i's target must equal row i+1's comparator. Group-final rows
    /// have no successor and yield null. The result column follows
    /// grouped order: groups ascending by key, rows in ordering-sorted
    /// sequence.
    pub fn has_next_corresponding_record(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(Output::Column(self.next_record_column(args)?))
    }

    pub fn does_not_have_next_corresponding_record(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(Output::Column(self.next_record_column(args)?.not()))
    }

    fn next_record_column(&self, args: &FrameArgs) -> Result<BoolColumn, OperatorError> {
        let target = self.target_name(args)?;
        let comparator = match self.comparator_value(args)? {
            Value::Text(name) => self.bundle().replace_prefix(name),
            other => {
                return Err(OperatorError::invalid_argument(format!(
                    "comparator must be a single column name, got {other:?}"
                )));
            }
        };
        let within = self.required_column_arg(args.within.as_deref(), "within")?;
        let ordering = self.required_column_arg(args.ordering.as_deref(), "ordering")?;

        let frame = self.bundle().frame();
        let rows = frame.rows();

        let mut sorted: Vec<usize> = (0..rows).collect();
        sorted.sort_by(|&a, &b| {
            let left = frame.cell(&ordering, a).unwrap_or(&NULL_CELL);
            let right = frame.cell(&ordering, b).unwrap_or(&NULL_CELL);
            canonical_cmp(left, right)
        });

        let mut groups: BTreeMap<Value, Vec<usize>> = BTreeMap::new();
        for &row in &sorted {
            let key = frame.cell(&within, row).unwrap_or(&NULL_CELL).clone();
            groups.entry(key).or_default().push(row);
        }

        let mut cells = BoolColumn::default();
        for group in groups.values() {
            for (position, &row) in group.iter().enumerate() {
                match group.get(position + 1) {
                    Some(&next_row) => {
                        let current = frame.cell(&target, row).unwrap_or(&NULL_CELL);
                        let next = frame.cell(&comparator, next_row).unwrap_or(&NULL_CELL);
                        cells.push(Some(current == next));
                    }
                    None => cells.push(None),
                }
            }
        }

        Ok(cells)
    }

    // ---- group multiplicity -------------------------------------------

    /// Rows of `within` groups larger than `min_count` (the
    /// comparator, defaulting to 1) are true; every other row false.
    /// Output follows grouped order.
    pub fn present_on_multiple_rows_within(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(Output::Column(self.multiplicity_column(args)?))
    }

    pub fn not_present_on_multiple_rows_within(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(Output::Column(self.multiplicity_column(args)?.not()))
    }

    fn multiplicity_column(&self, args: &FrameArgs) -> Result<BoolColumn, OperatorError> {
        // target participates for parity with the calling convention
        let _ = self.target_name(args)?;
        let within = self.required_column_arg(args.within.as_deref(), "within")?;

        let min_count = match &args.comparator {
            None | Some(Value::Null) => Decimal::from(1),
            Some(value) => {
                let number = value.as_number().ok_or_else(|| {
                    OperatorError::invalid_argument("comparator must be a minimum row count")
                })?;
                if number == Decimal::ZERO {
                    Decimal::from(1)
                } else {
                    number
                }
            }
        };

        let frame = self.bundle().frame();
        let mut cells = BoolColumn::default();
        for group in super::helpers::group_rows(&frame, &[within]).values() {
            let size = Decimal::from(i64::try_from(group.len()).unwrap_or(i64::MAX));
            let qualifies = size > min_count;
            for _ in group {
                cells.push(Some(qualifies));
            }
        }

        Ok(cells)
    }

    // ---- additional-column continuity ---------------------------------

    /// Columns named `<target><digits>` carry continuation values; a
    /// row is flagged when an empty cell is followed by a non-empty
    /// one in the next additional column.
    pub fn additional_columns_empty(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();

        let extras: Vec<&str> = frame
            .column_names()
            .filter(|name| {
                name.strip_prefix(target.as_str())
                    .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            })
            .collect();

        Ok(bool_column((0..rows).map(|row| {
            extras.windows(2).any(|pair| {
                let current = frame.cell(pair[0], row).unwrap_or(&NULL_CELL);
                let next = frame.cell(pair[1], row).unwrap_or(&NULL_CELL);
                current.is_blank_cell() && !next.is_blank_cell()
            })
        })))
    }

    pub fn additional_columns_not_empty(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.additional_columns_empty(args)?.complement())
    }

    // ---- shared -------------------------------------------------------

    fn required_column_arg(
        &self,
        name: Option<&str>,
        key: &str,
    ) -> Result<String, OperatorError> {
        name.map(|n| self.bundle().replace_prefix(n))
            .ok_or_else(|| OperatorError::invalid_argument(format!("operator requires a {key} column")))
    }
}
