mod codelist;
mod compare;
mod dates;
mod groups;
mod helpers;
mod reference;
mod sets;

#[cfg(test)]
mod tests;

use crate::{
    error::OperatorError,
    fields::FieldKind,
    frame::FrameBundle,
    obs::{self, EngineEvent},
    ops::Output,
    registry::{OperatorSpec, pretty_label},
    types::DateComponent,
    value::Value,
};

///
/// FrameArgs
///
/// The single argument record every frame operator receives. Only the
/// keys an operator documents are read; the rest are ignored.
///
/// `comparator` text names a column unless `value_is_literal` is set;
/// list comparators are always literal.
///

#[derive(Clone, Debug, Default)]
pub struct FrameArgs {
    target: Option<String>,
    comparator: Option<Value>,
    value_is_literal: bool,
    context: Option<String>,
    within: Option<String>,
    ordering: Option<String>,
    date_component: Option<DateComponent>,
    prefix: Option<usize>,
    suffix: Option<usize>,
}

impl FrameArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn target(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }

    #[must_use]
    pub fn comparator(mut self, value: impl Into<Value>) -> Self {
        self.comparator = Some(value.into());
        self
    }

    /// Set the comparator and mark it literal in one step.
    #[must_use]
    pub fn literal(mut self, value: impl Into<Value>) -> Self {
        self.comparator = Some(value.into());
        self.value_is_literal = true;
        self
    }

    #[must_use]
    pub const fn value_is_literal(mut self, literal: bool) -> Self {
        self.value_is_literal = literal;
        self
    }

    #[must_use]
    pub fn context(mut self, name: impl Into<String>) -> Self {
        self.context = Some(name.into());
        self
    }

    #[must_use]
    pub fn within(mut self, name: impl Into<String>) -> Self {
        self.within = Some(name.into());
        self
    }

    #[must_use]
    pub fn ordering(mut self, name: impl Into<String>) -> Self {
        self.ordering = Some(name.into());
        self
    }

    #[must_use]
    pub const fn date_component(mut self, component: DateComponent) -> Self {
        self.date_component = Some(component);
        self
    }

    #[must_use]
    pub const fn prefix(mut self, length: usize) -> Self {
        self.prefix = Some(length);
        self
    }

    #[must_use]
    pub const fn suffix(mut self, length: usize) -> Self {
        self.suffix = Some(length);
        self
    }
}

///
/// Comparand
///
/// A resolved comparator: either a column of the frame or a literal
/// value. Resolution already applied the prefix rewrite.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Comparand {
    Column(String),
    Literal(Value),
}

///
/// FrameOps
///
/// The dataframe operator family. Most operators return a boolean
/// column of the bundle's row count; the documented aggregates return
/// a scalar verdict instead.
///

#[derive(Debug)]
pub struct FrameOps {
    bundle: FrameBundle,
}

impl FrameOps {
    pub const FAMILY: &'static str = "dataframe";

    #[must_use]
    pub const fn new(bundle: FrameBundle) -> Self {
        Self { bundle }
    }

    #[must_use]
    pub const fn bundle(&self) -> &FrameBundle {
        &self.bundle
    }

    #[must_use]
    pub fn into_bundle(self) -> FrameBundle {
        self.bundle
    }

    /// Dispatch an operator by registry name.
    pub fn evaluate(&self, name: &str, args: &FrameArgs) -> Result<Output, OperatorError> {
        let entry = OPERATORS
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| OperatorError::unknown_operator(Self::FAMILY, name))?;

        let output = (entry.invoke)(self, args)?;

        obs::record(&EngineEvent::Evaluated {
            family: Self::FAMILY,
            operator: entry.name,
        });

        Ok(output)
    }

    #[must_use]
    pub fn all_operators() -> Vec<OperatorSpec> {
        OPERATORS
            .iter()
            .map(|entry| OperatorSpec {
                name: entry.name,
                label: pretty_label(entry.name),
                input_kind: FieldKind::Dataframe,
            })
            .collect()
    }

    // ---- argument resolution ------------------------------------------

    /// The target column name, prefix-rewritten. Every operator that
    /// reads a column goes through here.
    pub(crate) fn target_name(&self, args: &FrameArgs) -> Result<String, OperatorError> {
        args.target
            .as_deref()
            .map(|name| self.bundle.replace_prefix(name))
            .ok_or_else(|| OperatorError::invalid_argument("operator requires a target column"))
    }

    pub(crate) fn comparator_value<'a>(
        &self,
        args: &'a FrameArgs,
    ) -> Result<&'a Value, OperatorError> {
        args.comparator
            .as_ref()
            .ok_or_else(|| OperatorError::invalid_argument("operator requires a comparator"))
    }

    /// Resolve the comparator per the calling convention: literals
    /// stay literal, text names rewrite and resolve to a column when
    /// present, and fall back to the rewritten text otherwise.
    pub(crate) fn resolve_comparand(&self, args: &FrameArgs) -> Result<Comparand, OperatorError> {
        let raw = self.comparator_value(args)?;
        if args.value_is_literal {
            return Ok(Comparand::Literal(raw.clone()));
        }
        match raw {
            Value::Text(name) => {
                let resolved = self.bundle.replace_prefix(name);
                if self.bundle.frame().contains_column(&resolved) {
                    Ok(Comparand::Column(resolved))
                } else {
                    Ok(Comparand::Literal(Value::Text(resolved)))
                }
            }
            other => Ok(Comparand::Literal(other.clone())),
        }
    }

    /// A single raw column name argument (no prefix rewrite), for the
    /// operators that group by the comparator as given.
    pub(crate) fn comparator_column_name<'a>(
        &self,
        args: &'a FrameArgs,
    ) -> Result<&'a str, OperatorError> {
        match self.comparator_value(args)? {
            Value::Text(name) => Ok(name),
            Value::List(_) => Err(OperatorError::invalid_argument(
                "comparator must be a single column name",
            )),
            other => Err(OperatorError::invalid_argument(format!(
                "comparator must be a column name, got {other:?}"
            ))),
        }
    }
}

///
/// FrameOperator
///
/// One registry entry of the frame family. Labels derive from the
/// name and every argument is the frame record, so only the invoker
/// varies.
///

struct FrameOperator {
    name: &'static str,
    invoke: fn(&FrameOps, &FrameArgs) -> Result<Output, OperatorError>,
}

const OPERATORS: &[FrameOperator] = &[
    // existence
    FrameOperator { name: "exists", invoke: FrameOps::exists },
    FrameOperator { name: "not_exists", invoke: FrameOps::not_exists },
    // equality / ordering
    FrameOperator { name: "equal_to", invoke: FrameOps::equal_to },
    FrameOperator { name: "not_equal_to", invoke: FrameOps::not_equal_to },
    FrameOperator { name: "equal_to_case_insensitive", invoke: FrameOps::equal_to_case_insensitive },
    FrameOperator { name: "not_equal_to_case_insensitive", invoke: FrameOps::not_equal_to_case_insensitive },
    FrameOperator { name: "less_than", invoke: FrameOps::less_than },
    FrameOperator { name: "less_than_or_equal_to", invoke: FrameOps::less_than_or_equal_to },
    FrameOperator { name: "greater_than", invoke: FrameOps::greater_than },
    FrameOperator { name: "greater_than_or_equal_to", invoke: FrameOps::greater_than_or_equal_to },
    // substring / membership
    FrameOperator { name: "contains", invoke: FrameOps::contains },
    FrameOperator { name: "does_not_contain", invoke: FrameOps::does_not_contain },
    FrameOperator { name: "contains_case_insensitive", invoke: FrameOps::contains_case_insensitive },
    FrameOperator { name: "does_not_contain_case_insensitive", invoke: FrameOps::does_not_contain_case_insensitive },
    FrameOperator { name: "is_contained_by", invoke: FrameOps::is_contained_by },
    FrameOperator { name: "is_not_contained_by", invoke: FrameOps::is_not_contained_by },
    FrameOperator { name: "is_contained_by_case_insensitive", invoke: FrameOps::is_contained_by_case_insensitive },
    FrameOperator { name: "is_not_contained_by_case_insensitive", invoke: FrameOps::is_not_contained_by_case_insensitive },
    // affix / regex
    FrameOperator { name: "starts_with", invoke: FrameOps::starts_with },
    FrameOperator { name: "ends_with", invoke: FrameOps::ends_with },
    FrameOperator { name: "matches_regex", invoke: FrameOps::matches_regex },
    FrameOperator { name: "not_matches_regex", invoke: FrameOps::not_matches_regex },
    FrameOperator { name: "prefix_matches_regex", invoke: FrameOps::prefix_matches_regex },
    FrameOperator { name: "not_prefix_matches_regex", invoke: FrameOps::not_prefix_matches_regex },
    FrameOperator { name: "suffix_matches_regex", invoke: FrameOps::suffix_matches_regex },
    FrameOperator { name: "not_suffix_matches_regex", invoke: FrameOps::not_suffix_matches_regex },
    // length
    FrameOperator { name: "has_equal_length", invoke: FrameOps::has_equal_length },
    FrameOperator { name: "has_not_equal_length", invoke: FrameOps::has_not_equal_length },
    FrameOperator { name: "longer_than", invoke: FrameOps::longer_than },
    FrameOperator { name: "longer_than_or_equal_to", invoke: FrameOps::longer_than_or_equal_to },
    FrameOperator { name: "shorter_than", invoke: FrameOps::shorter_than },
    FrameOperator { name: "shorter_than_or_equal_to", invoke: FrameOps::shorter_than_or_equal_to },
    // emptiness
    FrameOperator { name: "empty", invoke: FrameOps::empty },
    FrameOperator { name: "non_empty", invoke: FrameOps::non_empty },
    FrameOperator { name: "empty_within_except_last_row", invoke: FrameOps::empty_within_except_last_row },
    FrameOperator { name: "non_empty_within_except_last_row", invoke: FrameOps::non_empty_within_except_last_row },
    // set coverage / uniqueness / ordering
    FrameOperator { name: "contains_all", invoke: FrameOps::contains_all },
    FrameOperator { name: "not_contains_all", invoke: FrameOps::not_contains_all },
    FrameOperator { name: "is_unique_set", invoke: FrameOps::is_unique_set },
    FrameOperator { name: "is_not_unique_set", invoke: FrameOps::is_not_unique_set },
    FrameOperator { name: "is_unique_relationship", invoke: FrameOps::is_unique_relationship },
    FrameOperator { name: "is_not_unique_relationship", invoke: FrameOps::is_not_unique_relationship },
    FrameOperator { name: "is_ordered_set", invoke: FrameOps::is_ordered_set },
    FrameOperator { name: "is_not_ordered_set", invoke: FrameOps::is_not_ordered_set },
    FrameOperator { name: "is_ordered_by", invoke: FrameOps::is_ordered_by },
    FrameOperator { name: "has_different_values", invoke: FrameOps::has_different_values },
    FrameOperator { name: "has_same_values", invoke: FrameOps::has_same_values },
    // dates
    FrameOperator { name: "invalid_date", invoke: FrameOps::invalid_date },
    FrameOperator { name: "is_complete_date", invoke: FrameOps::is_complete_date },
    FrameOperator { name: "is_incomplete_date", invoke: FrameOps::is_incomplete_date },
    FrameOperator { name: "date_equal_to", invoke: FrameOps::date_equal_to },
    FrameOperator { name: "date_not_equal_to", invoke: FrameOps::date_not_equal_to },
    FrameOperator { name: "date_less_than", invoke: FrameOps::date_less_than },
    FrameOperator { name: "date_less_than_or_equal_to", invoke: FrameOps::date_less_than_or_equal_to },
    FrameOperator { name: "date_greater_than", invoke: FrameOps::date_greater_than },
    FrameOperator { name: "date_greater_than_or_equal_to", invoke: FrameOps::date_greater_than_or_equal_to },
    // reference integrity / conformance
    FrameOperator { name: "is_valid_reference", invoke: FrameOps::is_valid_reference },
    FrameOperator { name: "is_not_valid_reference", invoke: FrameOps::is_not_valid_reference },
    FrameOperator { name: "is_valid_relationship", invoke: FrameOps::is_valid_relationship },
    FrameOperator { name: "is_not_valid_relationship", invoke: FrameOps::is_not_valid_relationship },
    FrameOperator { name: "non_conformant_value_data_type", invoke: FrameOps::non_conformant_value_data_type },
    FrameOperator { name: "non_conformant_value_length", invoke: FrameOps::non_conformant_value_length },
    FrameOperator { name: "conformant_value_data_type", invoke: FrameOps::conformant_value_data_type },
    FrameOperator { name: "conformant_value_length", invoke: FrameOps::conformant_value_length },
    // grouped sequencing / multiplicity
    FrameOperator { name: "has_next_corresponding_record", invoke: FrameOps::has_next_corresponding_record },
    FrameOperator { name: "does_not_have_next_corresponding_record", invoke: FrameOps::does_not_have_next_corresponding_record },
    FrameOperator { name: "present_on_multiple_rows_within", invoke: FrameOps::present_on_multiple_rows_within },
    FrameOperator { name: "not_present_on_multiple_rows_within", invoke: FrameOps::not_present_on_multiple_rows_within },
    // additional-column continuity
    FrameOperator { name: "additional_columns_empty", invoke: FrameOps::additional_columns_empty },
    FrameOperator { name: "additional_columns_not_empty", invoke: FrameOps::additional_columns_not_empty },
    // codelists
    FrameOperator { name: "references_correct_codelist", invoke: FrameOps::references_correct_codelist },
    FrameOperator { name: "does_not_reference_correct_codelist", invoke: FrameOps::does_not_reference_correct_codelist },
    FrameOperator { name: "uses_valid_codelist_terms", invoke: FrameOps::uses_valid_codelist_terms },
    FrameOperator { name: "does_not_use_valid_codelist_terms", invoke: FrameOps::does_not_use_valid_codelist_terms },
];
