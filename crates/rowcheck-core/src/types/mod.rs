mod date;
mod decimal;

pub use date::{DateComponent, PartialDate};
pub use decimal::Decimal;
