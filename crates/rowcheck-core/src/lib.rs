//! Core engine for rowcheck: canonical values, per-family coercion,
//! the operator registry, scalar operator families and the vectorized
//! frame predicates, with telemetry exported via `obs`.
#![warn(unreachable_pub)]

pub mod error;
pub mod fields;
pub mod frame;
pub mod obs;
pub mod ops;
pub mod registry;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Domain vocabulary only. Errors, sinks and registry internals stay
/// behind their modules.
///

pub mod prelude {
    pub use crate::{
        fields::FieldKind,
        frame::{Frame, FrameBundle},
        ops::{
            BoolColumn, BooleanOps, FrameArgs, FrameOps, GenericOps, NumericOps, Output,
            SelectMultipleOps, SelectOps, StringOps,
        },
        registry::OperatorSpec,
        types::{DateComponent, Decimal},
        value::Value,
    };
}
