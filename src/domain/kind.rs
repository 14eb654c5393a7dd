use std::fmt;

use serde::{Deserialize, Serialize};

/// Editor flavour of a field, fixed when the record is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Select,
    Checkbox,
    #[serde(alias = "radio")]
    RadioGroup,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Select => write!(f, "select"),
            FieldKind::Checkbox => write!(f, "checkbox"),
            FieldKind::RadioGroup => write!(f, "radio"),
        }
    }
}
