//! Date operators: validity, completeness and component-wise
//! comparison of partial ISO-8601 date-times.

use crate::{
    error::OperatorError,
    ops::{
        Output,
        frame::{
            FrameArgs, FrameOps,
            helpers::{all_false, bool_column, comparand_column, operand_cell, parse_date_cell},
        },
    },
};
use std::cmp::Ordering;

impl FrameOps {
    /// A cell that does not parse as a (partial) date.
    pub fn invalid_date(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        Ok(bool_column(
            (0..rows).map(|row| parse_date_cell(&column[row]).is_none()),
        ))
    }

    /// Year, month and day all present.
    pub fn is_complete_date(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        Ok(bool_column((0..rows).map(|row| {
            parse_date_cell(&column[row]).is_some_and(|date| date.is_complete())
        })))
    }

    pub fn is_incomplete_date(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.is_complete_date(args)?.complement())
    }

    pub fn date_equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.date_compare(args, |ord| ord == Ordering::Equal)
    }

    pub fn date_not_equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.date_compare(args, |ord| ord != Ordering::Equal)
    }

    pub fn date_less_than(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.date_compare(args, |ord| ord == Ordering::Less)
    }

    pub fn date_less_than_or_equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.date_compare(args, |ord| ord != Ordering::Greater)
    }

    pub fn date_greater_than(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.date_compare(args, |ord| ord == Ordering::Greater)
    }

    pub fn date_greater_than_or_equal_to(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        self.date_compare(args, |ord| ord != Ordering::Less)
    }

    /// Compare exactly one named component of the two sides. A side
    /// that fails to parse, or a component absent on either side,
    /// makes the row false.
    fn date_compare(
        &self,
        args: &FrameArgs,
        pred: fn(Ordering) -> bool,
    ) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let component = args
            .date_component
            .ok_or_else(|| OperatorError::invalid_argument("operator requires a date component"))?;
        let comparand = self.resolve_comparand(args)?;

        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        let comp_column = comparand_column(&frame, &comparand);

        Ok(bool_column((0..rows).map(|row| {
            let left = parse_date_cell(&column[row]).and_then(|date| date.component(component));
            let right = parse_date_cell(operand_cell(&comparand, comp_column, row))
                .and_then(|date| date.component(component));
            match (left, right) {
                (Some(left), Some(right)) => pred(left.cmp(&right)),
                _ => false,
            }
        })))
    }
}
