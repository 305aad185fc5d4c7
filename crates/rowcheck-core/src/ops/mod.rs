mod boolean;
mod frame;
mod generic;
mod numeric;
mod output;
mod select;
mod string;

// re-exports
pub use boolean::BooleanOps;
pub use frame::{FrameArgs, FrameOps};
pub use generic::GenericOps;
pub use numeric::NumericOps;
pub use output::{BoolColumn, MatchSpan, Output};
pub use select::{SelectMultipleOps, SelectOps};
pub use string::StringOps;
