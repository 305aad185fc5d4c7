use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FieldKind
///
/// Widget taxonomy for operator arguments. A rule-authoring UI uses
/// the kind to decide which input control to render next to an
/// operator picked from the catalog.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Numeric,
    NoInput,
    Select,
    SelectMultiple,
    Dataframe,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::NoInput => "none",
            Self::Select => "select",
            Self::SelectMultiple => "select_multiple",
            Self::Dataframe => "dataframe",
        };
        write!(f, "{label}")
    }
}
