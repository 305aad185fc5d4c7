//! Codelist validation: column-to-codelist assignment and term-level
//! membership against the bundle's controlled terminology maps.

use crate::{
    error::OperatorError,
    ops::{
        Output,
        frame::{
            FrameArgs, FrameOps,
            helpers::{NULL_CELL, bool_column},
        },
    },
    value::Value,
};

impl FrameOps {
    /// The target cells name columns, the comparator cells carry the
    /// codelist assigned to them; each assignment must be one the
    /// codelist map permits for that column. Columns unknown to the
    /// map pass; a column name starting with a known prefix
    /// replacement is also checked under its generic spelling.
    pub fn references_correct_codelist(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
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

        Ok(bool_column((0..rows).map(|row| {
            let column_name = frame.cell(&target, row).unwrap_or(&NULL_CELL);
            let codelist = frame.cell(&comparator, row).unwrap_or(&NULL_CELL);
            self.codelist_assignment_valid(column_name, codelist)
        })))
    }

    pub fn does_not_reference_correct_codelist(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(self.references_correct_codelist(args)?.complement())
    }

    /// The target cells carry a codelist id, the comparator cells the
    /// terms used under it. Some terminology map must know the
    /// codelist and either mark it extensible or contain every used
    /// term. Rows without a codelist value pass.
    pub fn uses_valid_codelist_terms(&self, args: &FrameArgs) -> Result<Output, OperatorError> {
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

        Ok(bool_column((0..rows).map(|row| {
            let codelist = frame.cell(&target, row).unwrap_or(&NULL_CELL);
            let terms = frame.cell(&comparator, row).unwrap_or(&NULL_CELL);
            self.codelist_terms_valid(codelist, terms)
        })))
    }

    pub fn does_not_use_valid_codelist_terms(
        &self,
        args: &FrameArgs,
    ) -> Result<Output, OperatorError> {
        Ok(self.uses_valid_codelist_terms(args)?.complement())
    }

    // ---- shared -------------------------------------------------------

    fn codelist_assignment_valid(&self, column_name: &Value, codelist: &Value) -> bool {
        let Some(name) = column_name.as_text() else {
            return true;
        };
        let map = self.bundle().column_codelist_map();

        if let Some(permitted) = map.get(name) {
            return codelist
                .as_text()
                .is_some_and(|codelist| permitted.contains(codelist));
        }

        for (token, replacement) in self.bundle().column_prefix_map() {
            if let Some(rest) = name.strip_prefix(replacement.as_str()) {
                let generic = format!("{token}{rest}");
                if let Some(permitted) = map.get(&generic) {
                    return codelist
                        .as_text()
                        .is_some_and(|codelist| permitted.contains(codelist));
                }
            }
        }

        true
    }

    fn codelist_terms_valid(&self, codelist: &Value, terms: &Value) -> bool {
        let Some(codelist) = codelist.as_text() else {
            return true;
        };
        if codelist.is_empty() {
            return true;
        }

        // a scalar terms cell counts as a one-element list
        let term_texts: Vec<&str> = match terms {
            Value::List(items) => items.iter().filter_map(Value::as_text).collect(),
            other => other.as_text().into_iter().collect(),
        };
        let term_count = match terms {
            Value::List(items) => items.len(),
            Value::Null => 0,
            _ => 1,
        };

        self.bundle().codelist_term_maps().iter().any(|map| {
            map.get(codelist).is_some_and(|entry| {
                entry.extensible
                    || (term_texts.len() == term_count
                        && term_texts
                            .iter()
                            .all(|term| entry.allowed_terms.contains(*term)))
            })
        })
    }
}
