use crate::{
    frame::{Frame, RowView},
    value::Value,
};
use std::{
    cell::{Ref, RefCell, RefMut},
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// Row predicate carried by value-level metadata.
pub type RowPredicate = Box<dyn Fn(&RowView<'_>) -> bool>;

///
/// ValueLevelMetadata
///
/// One conformance record: a row filter selecting the rows the record
/// governs, plus the type and length checks those rows must satisfy.
///

pub struct ValueLevelMetadata {
    pub filter: RowPredicate,
    pub type_check: RowPredicate,
    pub length_check: RowPredicate,
}

impl fmt::Debug for ValueLevelMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the predicates are opaque closures
        f.debug_struct("ValueLevelMetadata").finish_non_exhaustive()
    }
}

///
/// RelationshipNode
///
/// Reference data under one key: either the permitted related values
/// directly, or a context-qualified map one level deep.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RelationshipNode {
    Terms(Vec<Value>),
    Scoped(BTreeMap<Value, Vec<Value>>),
}

impl RelationshipNode {
    /// Key membership: scoped nodes expose their keys, term nodes
    /// their values. Mirrors how reference checks walk the data.
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        match self {
            Self::Terms(values) => values.contains(key),
            Self::Scoped(map) => map.contains_key(key),
        }
    }
}

///
/// CodelistEntry
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CodelistEntry {
    pub extensible: bool,
    pub allowed_terms: BTreeSet<String>,
}

///
/// FrameBundle
///
/// A frame plus the reference metadata frame operators consult:
/// prefix rewrites, relationship data, value-level metadata and
/// codelist maps. Bundles are shared across many operator calls;
/// the frame sits behind a `RefCell` so the grouped-emptiness
/// writers can add their uniquely-named result columns without
/// touching anything that existed at entry.
///

#[derive(Debug)]
pub struct FrameBundle {
    frame: RefCell<Frame>,
    column_prefix_map: BTreeMap<String, String>,
    relationship_data: BTreeMap<Value, RelationshipNode>,
    value_level_metadata: Vec<ValueLevelMetadata>,
    column_codelist_map: BTreeMap<String, BTreeSet<String>>,
    codelist_term_maps: Vec<BTreeMap<String, CodelistEntry>>,
}

impl FrameBundle {
    #[must_use]
    pub fn new(frame: Frame) -> Self {
        Self {
            frame: RefCell::new(frame),
            column_prefix_map: BTreeMap::new(),
            relationship_data: BTreeMap::new(),
            value_level_metadata: Vec::new(),
            column_codelist_map: BTreeMap::new(),
            codelist_term_maps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_column_prefix_map(mut self, map: BTreeMap<String, String>) -> Self {
        self.column_prefix_map = map;
        self
    }

    #[must_use]
    pub fn with_relationship_data(mut self, data: BTreeMap<Value, RelationshipNode>) -> Self {
        self.relationship_data = data;
        self
    }

    #[must_use]
    pub fn with_value_level_metadata(mut self, records: Vec<ValueLevelMetadata>) -> Self {
        self.value_level_metadata = records;
        self
    }

    #[must_use]
    pub fn with_column_codelist_map(mut self, map: BTreeMap<String, BTreeSet<String>>) -> Self {
        self.column_codelist_map = map;
        self
    }

    #[must_use]
    pub fn with_codelist_term_maps(mut self, maps: Vec<BTreeMap<String, CodelistEntry>>) -> Self {
        self.codelist_term_maps = maps;
        self
    }

    #[must_use]
    pub fn frame(&self) -> Ref<'_, Frame> {
        self.frame.borrow()
    }

    pub(crate) fn frame_mut(&self) -> RefMut<'_, Frame> {
        self.frame.borrow_mut()
    }

    /// Rewrite a caller-supplied column name: the first prefix of the
    /// map that matches is replaced once, anything else passes
    /// through untouched.
    #[must_use]
    pub fn replace_prefix(&self, name: &str) -> String {
        for (prefix, replacement) in &self.column_prefix_map {
            if let Some(rest) = name.strip_prefix(prefix.as_str()) {
                return format!("{replacement}{rest}");
            }
        }
        name.to_string()
    }

    #[must_use]
    pub const fn column_prefix_map(&self) -> &BTreeMap<String, String> {
        &self.column_prefix_map
    }

    #[must_use]
    pub const fn relationship_data(&self) -> &BTreeMap<Value, RelationshipNode> {
        &self.relationship_data
    }

    #[must_use]
    pub fn value_level_metadata(&self) -> &[ValueLevelMetadata] {
        &self.value_level_metadata
    }

    #[must_use]
    pub const fn column_codelist_map(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.column_codelist_map
    }

    #[must_use]
    pub fn codelist_term_maps(&self) -> &[BTreeMap<String, CodelistEntry>] {
        &self.codelist_term_maps
    }
}

impl From<Frame> for FrameBundle {
    fn from(frame: Frame) -> Self {
        Self::new(frame)
    }
}
