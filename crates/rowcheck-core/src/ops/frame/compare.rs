//! Per-row comparison operators: existence, equality, ordering,
//! substring and membership, affixes, regexes, lengths and emptiness.

use crate::{
    error::OperatorError,
    ops::{
        Output,
        frame::{
            Comparand, FrameArgs, FrameOps,
            helpers::{
                all_false, bool_column, comparand_column, compile_anchored, is_column_of_iterables,
                list_contains, operand_cell, take_prefix, take_suffix,
            },
        },
    },
    types::Decimal,
    value::{TextMode, Value, strict_order_cmp},
};
use regex::Regex;
use std::{cmp::Ordering, collections::BTreeSet};

impl FrameOps {
    // ---- existence ----------------------------------------------------

    pub fn exists(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        Ok(Output::Bool(self.bundle().frame().contains_column(&target)))
    }

    pub fn not_exists(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.exists(args)?.complement())
    }

    // ---- equality -----------------------------------------------------

    /// Empty-string and missing cells never count as equal, even to an
    /// equally empty comparator.
    pub fn equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.equality(args, TextMode::Cs)
    }

    pub fn not_equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.equal_to(args)?.complement())
    }

    pub fn equal_to_case_insensitive(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.equality(args, TextMode::Ci)
    }

    pub fn not_equal_to_case_insensitive(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(self.equal_to_case_insensitive(args)?.complement())
    }

    fn equality(&self, args: &FrameArgs, mode: TextMode) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let comparand = self.resolve_comparand(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        let comp_column = comparand_column(&frame, &comparand);

        Ok(bool_column((0..rows).map(|row| {
            let cell = &column[row];
            if cell.is_empty_cell() {
                return false;
            }
            let other = operand_cell(&comparand, comp_column, row);
            match mode {
                TextMode::Cs => cell == other,
                // the case-folded comparison is text-only
                TextMode::Ci => cell.text_eq(other, TextMode::Ci).unwrap_or(false),
            }
        })))
    }

    // ---- ordering -----------------------------------------------------

    pub fn less_than(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.ordering_compare(args, |ord| ord == Ordering::Less)
    }

    pub fn less_than_or_equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.ordering_compare(args, |ord| ord != Ordering::Greater)
    }

    pub fn greater_than(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.ordering_compare(args, |ord| ord == Ordering::Greater)
    }

    pub fn greater_than_or_equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.ordering_compare(args, |ord| ord != Ordering::Less)
    }

    /// Cells that do not order against the comparison operand (mixed
    /// kinds, missing values) are false rather than errors.
    fn ordering_compare(
        &self,
        args: &FrameArgs,
        pred: fn(Ordering) -> bool,
    ) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let comparand = self.resolve_comparand(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        let comp_column = comparand_column(&frame, &comparand);

        Ok(bool_column((0..rows).map(|row| {
            let other = operand_cell(&comparand, comp_column, row);
            strict_order_cmp(&column[row], other).is_some_and(pred)
        })))
    }

    // ---- substring / membership ---------------------------------------

    /// Collection-valued target cells test membership element-wise; a
    /// column comparator tests its cells against the target column's
    /// value set; otherwise the rows compare for equality.
    pub fn contains(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.contains_impl(args, TextMode::Cs)
    }

    pub fn does_not_contain(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.contains(args)?.complement())
    }

    pub fn contains_case_insensitive(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.contains_impl(args, TextMode::Ci)
    }

    pub fn does_not_contain_case_insensitive(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(self.contains_case_insensitive(args)?.complement())
    }

    fn contains_impl(&self, args: &FrameArgs, mode: TextMode) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let comparand = self.resolve_comparand(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        let comp_column = comparand_column(&frame, &comparand);
        let fold = |value: &Value| match mode {
            TextMode::Cs => value.clone(),
            TextMode::Ci => value.fold_case(),
        };

        if is_column_of_iterables(column) {
            return Ok(bool_column((0..rows).map(|row| {
                let needle = fold(operand_cell(&comparand, comp_column, row));
                list_contains(&fold(&column[row]), &needle)
            })));
        }

        if let Some(comp_column) = comp_column {
            let haystack: BTreeSet<Value> = column.iter().map(fold).collect();
            return Ok(bool_column(
                (0..rows).map(|row| haystack.contains(&fold(&comp_column[row]))),
            ));
        }

        Ok(bool_column((0..rows).map(|row| {
            let other = operand_cell(&comparand, None, row);
            match mode {
                TextMode::Cs => &column[row] == other,
                TextMode::Ci => column[row].text_eq(other, TextMode::Ci).unwrap_or(false),
            }
        })))
    }

    /// Membership of each target cell in the comparator: a literal
    /// list, a column's value set, or row-wise in a column of
    /// collections.
    pub fn is_contained_by(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.contained_by_impl(args, TextMode::Cs)
    }

    pub fn is_not_contained_by(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.is_contained_by(args)?.complement())
    }

    pub fn is_contained_by_case_insensitive(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        self.contained_by_impl(args, TextMode::Ci)
    }

    pub fn is_not_contained_by_case_insensitive(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(self.is_contained_by_case_insensitive(args)?.complement())
    }

    fn contained_by_impl(&self, args: &FrameArgs, mode: TextMode) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let comparand = self.resolve_comparand(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        let fold = |value: &Value| match mode {
            TextMode::Cs => value.clone(),
            TextMode::Ci => value.fold_case(),
        };

        match &comparand {
            Comparand::Column(name) => {
                let Some(comp_column) = frame.column(name) else {
                    return Ok(all_false(rows));
                };
                if is_column_of_iterables(comp_column) {
                    Ok(bool_column((0..rows).map(|row| {
                        list_contains(&fold(&comp_column[row]), &fold(&column[row]))
                    })))
                } else {
                    let candidates: BTreeSet<Value> = comp_column.iter().map(fold).collect();
                    Ok(bool_column(
                        (0..rows).map(|row| candidates.contains(&fold(&column[row]))),
                    ))
                }
            }
            Comparand::Literal(Value::List(items)) => {
                let candidates: Vec<Value> = items.iter().map(fold).collect();
                Ok(bool_column(
                    (0..rows).map(|row| candidates.contains(&fold(&column[row]))),
                ))
            }
            Comparand::Literal(_) => Err(OperatorError::invalid_argument(
                "is_contained_by requires a collection or column comparator",
            )),
        }
    }

    // ---- affixes ------------------------------------------------------

    pub fn starts_with(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let needle = self.literal_text(args)?.to_string();
        self.per_row_text(args, move |text| text.starts_with(&needle))
    }

    pub fn ends_with(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let needle = self.literal_text(args)?.to_string();
        self.per_row_text(args, move |text| text.ends_with(&needle))
    }

    // ---- regexes ------------------------------------------------------

    /// Anchored at the cell start.
    pub fn matches_regex(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let regex = compile_anchored(self.literal_text(args)?)?;
        self.per_row_text(args, move |text| regex.is_match(text))
    }

    pub fn not_matches_regex(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.matches_regex(args)?.complement())
    }

    /// Search within the first `prefix` code points of each cell.
    pub fn prefix_matches_regex(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let regex = Regex::new(self.literal_text(args)?)?;
        let length = args.prefix;
        self.per_row_text(args, move |text| regex.is_match(&take_prefix(text, length)))
    }

    pub fn not_prefix_matches_regex(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.prefix_matches_regex(args)?.complement())
    }

    /// Search within the last `suffix` code points of each cell.
    pub fn suffix_matches_regex(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let regex = Regex::new(self.literal_text(args)?)?;
        let length = args.suffix;
        self.per_row_text(args, move |text| regex.is_match(&take_suffix(text, length)))
    }

    pub fn not_suffix_matches_regex(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.suffix_matches_regex(args)?.complement())
    }

    // ---- lengths ------------------------------------------------------

    pub fn has_equal_length(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.length_compare(args, |ord| ord == Ordering::Equal)
    }

    pub fn has_not_equal_length(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.has_equal_length(args)?.complement())
    }

    pub fn longer_than(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.length_compare(args, |ord| ord == Ordering::Greater)
    }

    pub fn longer_than_or_equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        self.length_compare(args, |ord| ord != Ordering::Less)
    }

    pub fn shorter_than(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.longer_than_or_equal_to(args)?.complement())
    }

    pub fn shorter_than_or_equal_to(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.longer_than(args)?.complement())
    }

    fn length_compare(
        &self,
        args: &FrameArgs,
        pred: fn(Ordering) -> bool,
    ) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let expected = self
            .comparator_value(args)?
            .as_number()
            .ok_or_else(|| OperatorError::invalid_argument("comparator must be a number"))?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };

        Ok(bool_column((0..rows).map(|row| {
            column[row].cell_len().is_some_and(|len| {
                let len = i64::try_from(len).unwrap_or(i64::MAX);
                pred(Decimal::from(len).cmp(&expected))
            })
        })))
    }

    // ---- emptiness ----------------------------------------------------

    pub fn empty(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        Ok(bool_column((0..rows).map(|row| column[row].is_empty_cell())))
    }

    pub fn non_empty(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.empty(args)?.complement())
    }

    // ---- shared -------------------------------------------------------

    /// Comparator taken verbatim as literal text (affix and regex
    /// operators never resolve it to a column).
    fn literal_text<'a>(&self, args: &'a FrameArgs) -> Result<&'a str, OperatorError> {
        self.comparator_value(args)?
            .as_text()
            .ok_or_else(|| OperatorError::invalid_argument("comparator must be text"))
    }

    /// Apply a text predicate row-wise; non-text cells are false.
    fn per_row_text(
        &self,
        args: &FrameArgs,
        pred: impl Fn(&str) -> bool,
    ) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        Ok(bool_column(
            (0..rows).map(|row| column[row].as_text().is_some_and(&pred)),
        ))
    }
}
