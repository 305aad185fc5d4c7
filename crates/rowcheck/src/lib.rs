//! # rowcheck
//!
//! `rowcheck` is the public facade crate for the rowcheck engine: a
//! typed catalog of rule operators over scalars and tabular clinical
//! data.
//!
//! This crate exposes:
//! - the operator families (`StringOps`, `NumericOps`, `BooleanOps`,
//!   `SelectOps`, `SelectMultipleOps`, `GenericOps`, `FrameOps`),
//! - the canonical `Value` model and `Frame`/`FrameBundle` tables,
//! - and the registry surface a rule-authoring UI enumerates.
//!
//! Engine internals (coercion tables, dispatch plumbing, telemetry
//! sinks) live in `rowcheck-core` and are re-exported module-wise.
//!
//! ## Preludes
//!
//! - `prelude` — opinionated import set for rule-engine callers.

pub use rowcheck_core::{error, fields, frame, obs, ops, registry, types, value};

pub mod prelude {
    pub use rowcheck_core::prelude::*;
}

use rowcheck_core::{
    ops::{BooleanOps, FrameOps, GenericOps, NumericOps, SelectMultipleOps, SelectOps, StringOps},
    registry::OperatorSpec,
};
use serde::Serialize;

///
/// FamilyCatalog
///
/// One operator family's registry enumeration, as exported to rule
/// authoring tools.
///

#[derive(Clone, Debug, Serialize)]
pub struct FamilyCatalog {
    pub family: &'static str,
    pub operators: Vec<OperatorSpec>,
}

/// Enumerate every operator family for rule-authoring UIs.
#[must_use]
pub fn export_catalog() -> Vec<FamilyCatalog> {
    vec![
        FamilyCatalog {
            family: StringOps::FAMILY,
            operators: StringOps::all_operators(),
        },
        FamilyCatalog {
            family: NumericOps::FAMILY,
            operators: NumericOps::all_operators(),
        },
        FamilyCatalog {
            family: BooleanOps::FAMILY,
            operators: BooleanOps::all_operators(),
        },
        FamilyCatalog {
            family: SelectOps::FAMILY,
            operators: SelectOps::all_operators(),
        },
        FamilyCatalog {
            family: SelectMultipleOps::FAMILY,
            operators: SelectMultipleOps::all_operators(),
        },
        FamilyCatalog {
            family: GenericOps::FAMILY,
            operators: GenericOps::all_operators(),
        },
        FamilyCatalog {
            family: FrameOps::FAMILY,
            operators: FrameOps::all_operators(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;

    #[test]
    fn catalog_covers_every_family_once() {
        let catalog = export_catalog();
        let families: Vec<&str> = catalog.iter().map(|entry| entry.family).collect();
        assert_eq!(
            families,
            [
                "string",
                "numeric",
                "boolean",
                "select",
                "select_multiple",
                "generic",
                "dataframe",
            ]
        );
        for entry in &catalog {
            assert!(!entry.operators.is_empty());
        }
    }

    #[test]
    fn frame_operators_all_take_dataframe_input() {
        let catalog = export_catalog();
        let frame = catalog.iter().find(|e| e.family == "dataframe").unwrap();
        assert!(
            frame
                .operators
                .iter()
                .all(|op| op.input_kind == FieldKind::Dataframe)
        );
    }

    #[test]
    fn catalog_serializes_for_ui_consumption() {
        let json = serde_json::to_value(export_catalog()).unwrap();
        let first = &json[0]["operators"][0];
        assert!(first["name"].is_string());
        assert!(first["label"].is_string());
        assert!(first["input_kind"].is_string());
    }
}
