use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of field kinds presentation can dispatch on.
///
/// Marked non-exhaustive so downstream dispatch keeps a fallback arm:
/// an unrecognized kind must degrade to a visible "unsupported field"
/// placeholder, never crash.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    TextArray,
    Boolean,
    OneOf,
    Date,
    Label,
    Action,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextArray => "text-array",
            FieldKind::Boolean => "boolean",
            FieldKind::OneOf => "one-of",
            FieldKind::Date => "date",
            FieldKind::Label => "label",
            FieldKind::Action => "action",
        }
    }

    pub fn all() -> &'static [FieldKind] {
        &[
            FieldKind::Text,
            FieldKind::TextArray,
            FieldKind::Boolean,
            FieldKind::OneOf,
            FieldKind::Date,
            FieldKind::Label,
            FieldKind::Action,
        ]
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(FieldKind::Text),
            "text-array" => Ok(FieldKind::TextArray),
            "boolean" => Ok(FieldKind::Boolean),
            "one-of" => Ok(FieldKind::OneOf),
            "date" => Ok(FieldKind::Date),
            "label" => Ok(FieldKind::Label),
            "action" => Ok(FieldKind::Action),
            other => Err(format!("unknown field kind: {other}")),
        }
    }
}
