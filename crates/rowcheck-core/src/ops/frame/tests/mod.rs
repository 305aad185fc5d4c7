mod property;

use crate::{
    frame::{Frame, FrameBundle},
    ops::{FrameOps, Output},
    value::Value,
};
use std::collections::BTreeMap;

/// Frame ops over plain columns, no reference metadata.
pub(crate) fn frame_ops<I, N, C, T>(columns: I) -> FrameOps
where
    I: IntoIterator<Item = (N, C)>,
    N: Into<String>,
    C: IntoIterator<Item = T>,
    T: Into<Value>,
{
    FrameOps::new(FrameBundle::new(
        Frame::from_columns(columns).expect("test frame"),
    ))
}

/// Frame ops with the `--` token rewriting to the given domain prefix.
pub(crate) fn frame_ops_with_prefix<I, N, C, T>(columns: I, replacement: &str) -> FrameOps
where
    I: IntoIterator<Item = (N, C)>,
    N: Into<String>,
    C: IntoIterator<Item = T>,
    T: Into<Value>,
{
    let bundle = FrameBundle::new(Frame::from_columns(columns).expect("test frame"))
        .with_column_prefix_map(BTreeMap::from([(
            "--".to_string(),
            replacement.to_string(),
        )]));
    FrameOps::new(bundle)
}

/// Unwrap a per-row output into its nullable cells.
pub(crate) fn cells(output: &Output) -> Vec<Option<bool>> {
    output
        .as_column()
        .expect("expected a per-row column")
        .iter()
        .copied()
        .collect()
}

/// Unwrap a per-row output that should carry no nulls.
pub(crate) fn bools(output: &Output) -> Vec<bool> {
    cells(output)
        .into_iter()
        .map(|cell| cell.expect("unexpected null cell"))
        .collect()
}
