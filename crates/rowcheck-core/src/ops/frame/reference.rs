//! Reference-integrity operators against the bundle's relationship
//! data, plus value-level-metadata conformance.

use crate::{
    error::OperatorError,
    frame::{RelationshipNode, RowPredicate, ValueLevelMetadata},
    ops::{
        Output,
        frame::{
            FrameArgs, FrameOps,
            helpers::{NULL_CELL, all_false, bool_column, int_string},
        },
    },
    value::Value,
};

impl FrameOps {
    // ---- references ---------------------------------------------------

    /// Each target cell must key the relationship data; with a
    /// `context` column, the node under the row's context value is
    /// consulted instead. Unknown contexts and keys are false.
    pub fn is_valid_reference(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let context = args
            .context
            .as_deref()
            .map(|name| self.bundle().replace_prefix(name));

        let frame = self.bundle().frame();
        let rows = frame.rows();
        let Some(column) = frame.column(&target) else {
            return Ok(all_false(rows));
        };
        let data = self.bundle().relationship_data();

        Ok(bool_column((0..rows).map(|row| match &context {
            Some(ctx) => {
                let ctx_cell = frame.cell(ctx, row).unwrap_or(&NULL_CELL);
                data.get(ctx_cell)
                    .is_some_and(|node| node.contains_key(&column[row]))
            }
            None => data.contains_key(&column[row]),
        })))
    }

    pub fn is_not_valid_reference(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.is_valid_reference(args)?.complement())
    }

    /// The target cell resolves to a set of permitted related values;
    /// the row's comparator cell must be a member, with the numeric
    /// and text coercion rungs tried in turn.
    pub fn is_valid_relationship(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        let target = self.target_name(args)?;
        let value_column = match self.comparator_value(args)? {
            Value::Text(name) => self.bundle().replace_prefix(name),
            other => {
                return Err(OperatorError::invalid_argument(format!(
                    "comparator must be a single column name, got {other:?}"
                )));
            }
        };
        let context = args
            .context
            .as_deref()
            .map(|name| self.bundle().replace_prefix(name));

        let frame = self.bundle().frame();
        let rows = frame.rows();
        let data = self.bundle().relationship_data();

        Ok(bool_column((0..rows).map(|row| {
            let key = frame.cell(&target, row).unwrap_or(&NULL_CELL);
            let value = frame.cell(&value_column, row).unwrap_or(&NULL_CELL);

            match &context {
                Some(ctx) => {
                    let ctx_cell = frame.cell(ctx, row).unwrap_or(&NULL_CELL);
                    match data.get(ctx_cell) {
                        Some(RelationshipNode::Scoped(map)) => map
                            .get(key)
                            .is_some_and(|terms| reference_member(value, terms)),
                        _ => false,
                    }
                }
                None => match data.get(key) {
                    Some(RelationshipNode::Terms(terms)) => reference_member(value, terms),
                    Some(RelationshipNode::Scoped(map)) => map.contains_key(value),
                    None => false,
                },
            }
        })))
    }

    pub fn is_not_valid_relationship(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.is_valid_relationship(args)?.complement())
    }

    // ---- value-level metadata -----------------------------------------

    /// OR across records of `filter(row) ∧ ¬type_check(row)`.
    pub fn non_conformant_value_data_type(
        &self,
        _args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(self.vlm_verdicts(|vlm| &vlm.type_check, false))
    }

    /// OR across records of `filter(row) ∧ ¬length_check(row)`.
    pub fn non_conformant_value_length(&self, _args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.vlm_verdicts(|vlm| &vlm.length_check, false))
    }

    /// OR across records of `filter(row) ∧ type_check(row)`.
    ///
    /// Deliberately not the complement of the non-conformant form: a
    /// row matched by several records can satisfy both. This mirrors
    /// the governing conformance rules and is flagged for domain
    /// review rather than silently corrected.
    pub fn conformant_value_data_type(&self, _args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.vlm_verdicts(|vlm| &vlm.type_check, true))
    }

    /// OR across records of `filter(row) ∧ length_check(row)`.
    pub fn conformant_value_length(&self, _args: &FrameArgs) -> Result<Output, OperatorError> {
        Ok(self.vlm_verdicts(|vlm| &vlm.length_check, true))
    }

    fn vlm_verdicts(
        &self,
        select: fn(&ValueLevelMetadata) -> &RowPredicate,
        expect: bool,
    ) -> Output {
        let frame = self.bundle().frame();
        let rows = frame.rows();

        bool_column((0..rows).map(|row| {
            let view = frame.row(row);
            self.bundle()
                .value_level_metadata()
                .iter()
                .any(|vlm| (vlm.filter)(&view) && (select(vlm))(&view) == expect)
        }))
    }
}

/// Membership with the relationship coercion ladder: strict equality,
/// then the permitted value's integer-truncated text, then its plain
/// text form.
fn reference_member(value: &Value, permitted: &[Value]) -> bool {
    if permitted.contains(value) {
        return true;
    }
    let Some(text) = value.as_text() else {
        return false;
    };
    permitted
        .iter()
        .any(|term| int_string(term).is_some_and(|form| form == text))
        || permitted.iter().any(|term| term.to_string() == text)
}
