//! Searchable field keys.

use std::{fmt, str::FromStr};

use serde::Serialize;

/// A searchable field of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    /// The display name without extension.
    Basename,
    /// One of the document's aliases.
    Aliases,
    /// The document title.
    Title,
    /// One of the document's headings.
    Headings,
}

impl FieldKey {
    /// Every field, in the order the matcher visits them.
    pub const ALL: [Self; 4] = [Self::Basename, Self::Aliases, Self::Title, Self::Headings];

    /// Returns the field's key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basename => "basename",
            Self::Aliases => "aliases",
            Self::Title => "title",
            Self::Headings => "headings",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basename" => Ok(Self::Basename),
            "aliases" | "alias" => Ok(Self::Aliases),
            "title" => Ok(Self::Title),
            "headings" | "heading" => Ok(Self::Headings),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}
