//! Element-wise helpers shared by the frame operators: case-folded
//! membership, grouping, stable argsort, date-cell parsing and the
//! integer/text coercion ladder of relationship checks.

use crate::{
    error::OperatorError,
    frame::{Column, Frame},
    ops::{BoolColumn, Output},
    types::{Decimal, PartialDate},
    value::{Value, canonical_cmp},
};
use regex::Regex;
use std::collections::BTreeMap;

pub(super) static NULL_CELL: Value = Value::Null;

/// Per-row all-false result for a target that does not resolve.
pub(super) fn all_false(rows: usize) -> Output {
    Output::Column(BoolColumn::repeat(false, rows))
}

pub(super) fn bool_column<I: IntoIterator<Item = bool>>(cells: I) -> Output {
    Output::Column(cells.into_iter().collect())
}

/// A column whose cells are themselves collections, judged by its
/// first cell.
pub(super) fn is_column_of_iterables(column: &Column) -> bool {
    matches!(column.first(), Some(Value::List(_)))
}

/// Membership of `needle` in a collection cell; non-collection cells
/// hold nothing. Case folding is the caller's job.
pub(super) fn list_contains(cell: &Value, needle: &Value) -> bool {
    cell.as_list().is_some_and(|items| items.contains(needle))
}

/// Group row indices by the tuple of key-column cells. Groups come
/// out in ascending key order; rows inside a group keep listing
/// order. A key column absent from the frame contributes nulls.
pub(super) fn group_rows(frame: &Frame, keys: &[String]) -> BTreeMap<Vec<Value>, Vec<usize>> {
    let key_columns: Vec<Option<&Column>> = keys.iter().map(|key| frame.column(key)).collect();

    let mut groups: BTreeMap<Vec<Value>, Vec<usize>> = BTreeMap::new();
    for row in 0..frame.rows() {
        let key: Vec<Value> = key_columns
            .iter()
            .map(|column| column.map_or(Value::Null, |c| c[row].clone()))
            .collect();
        groups.entry(key).or_default().push(row);
    }

    groups
}

/// Stable ascending argsort of a column under canonical order.
pub(super) fn sorted_row_order(column: &Column) -> Vec<usize> {
    let mut order: Vec<usize> = (0..column.len()).collect();
    order.sort_by(|&a, &b| canonical_cmp(&column[a], &column[b]));
    order
}

/// Parse a text cell as a partial date. Non-text and empty cells are
/// not dates.
pub(super) fn parse_date_cell(cell: &Value) -> Option<PartialDate> {
    let text = cell.as_text()?;
    if text.is_empty() {
        return None;
    }
    PartialDate::parse(text)
}

/// Compile a pattern anchored at the cell start, the frame-side
/// `matches_regex` semantics.
pub(super) fn compile_anchored(pattern: &str) -> Result<Regex, OperatorError> {
    Ok(Regex::new(&format!("^(?:{pattern})"))?)
}

/// The first `length` code points of a cell's text; `None` length
/// keeps the whole text.
pub(super) fn take_prefix(text: &str, length: Option<usize>) -> String {
    match length {
        Some(n) => text.chars().take(n).collect(),
        None => text.to_string(),
    }
}

/// The last `length` code points of a cell's text.
pub(super) fn take_suffix(text: &str, length: Option<usize>) -> String {
    match length {
        Some(n) => {
            let total = text.chars().count();
            text.chars().skip(total.saturating_sub(n)).collect()
        }
        None => text.to_string(),
    }
}

/// The comparand's backing column, when it has one.
pub(super) fn comparand_column<'a>(
    frame: &'a Frame,
    comparand: &super::Comparand,
) -> Option<&'a Column> {
    match comparand {
        super::Comparand::Column(name) => frame.column(name),
        super::Comparand::Literal(_) => None,
    }
}

/// The comparison operand for one row: the literal itself, or the
/// comparand column's cell.
pub(super) fn operand_cell<'a>(
    comparand: &'a super::Comparand,
    column: Option<&'a Column>,
    row: usize,
) -> &'a Value {
    match (comparand, column) {
        (super::Comparand::Literal(value), _) => value,
        (super::Comparand::Column(_), Some(column)) => &column[row],
        (super::Comparand::Column(_), None) => &NULL_CELL,
    }
}

/// Integer-truncated text form of a numeric value, the middle rung of
/// the relationship coercion ladder. Numeric text qualifies too.
pub(super) fn int_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => Some(number.trunc().to_string()),
        Value::Text(text) => text
            .parse::<Decimal>()
            .ok()
            .map(|number| number.trunc().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    #[test]
    fn grouping_sorts_keys_and_preserves_row_order() {
        let frame = Frame::from_columns([("g", vec!["b", "a", "b", "a"])]).unwrap();
        let groups = group_rows(&frame, &["g".to_string()]);
        let keys: Vec<&Vec<Value>> = groups.keys().collect();
        assert_eq!(keys[0], &vec![Value::from("a")]);
        assert_eq!(groups[&vec![Value::from("a")]], vec![1, 3]);
        assert_eq!(groups[&vec![Value::from("b")]], vec![0, 2]);
    }

    #[test]
    fn argsort_is_stable() {
        let column: Column = ["b", "a", "b", "a"].into_iter().collect();
        assert_eq!(sorted_row_order(&column), vec![1, 3, 0, 2]);
    }

    #[test]
    fn affix_slices_count_code_points() {
        assert_eq!(take_prefix("héllo", Some(2)), "hé");
        assert_eq!(take_suffix("héllo", Some(3)), "llo");
        assert_eq!(take_prefix("ab", Some(10)), "ab");
        assert_eq!(take_suffix("ab", None), "ab");
    }

    #[test]
    fn int_strings_truncate_toward_zero() {
        assert_eq!(int_string(&Value::from(3.7)), Some("3".to_string()));
        assert_eq!(int_string(&Value::from("2.5")), Some("2".to_string()));
        assert_eq!(int_string(&Value::from("abc")), None);
        assert_eq!(int_string(&Value::Bool(true)), None);
    }
}
