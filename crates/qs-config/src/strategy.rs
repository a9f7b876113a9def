//! Heading jump strategy setting.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// When selecting a heading match should jump to the heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingJumpStrategy {
    /// Never jump; always open the entry at its top.
    Never,
    /// Jump for every heading-content match.
    Always,
    /// Jump for heading-content matches whose confidence clears a query-length threshold.
    #[default]
    Smart,
}

impl HeadingJumpStrategy {
    /// Returns the configuration name of this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Always => "always",
            Self::Smart => "smart",
        }
    }
}

impl fmt::Display for HeadingJumpStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadingJumpStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "smart" => Ok(Self::Smart),
            other => Err(format!(
                "unknown heading jump strategy '{other}' (expected never, always or smart)"
            )),
        }
    }
}
