//! Classification codes

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category assigned to a registration plate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BcCode {
    Bus,
    Coach,
    Minibus,
    Other,
    Unknown,
    /// Not yet judged (`-`)
    #[default]
    Unjudged,
}

impl BcCode {
    /// Codes the operator can pick, in prompt order
    pub const CHOICES: [BcCode; 5] = [
        BcCode::Bus,
        BcCode::Coach,
        BcCode::Minibus,
        BcCode::Other,
        BcCode::Unknown,
    ];

    /// Single-letter code written to files
    pub fn letter(&self) -> char {
        match self {
            BcCode::Bus => 'B',
            BcCode::Coach => 'C',
            BcCode::Minibus => 'M',
            BcCode::Other => 'O',
            BcCode::Unknown => 'U',
            BcCode::Unjudged => '-',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BcCode::Bus => "Bus",
            BcCode::Coach => "Coach",
            BcCode::Minibus => "Minibus",
            BcCode::Other => "Other",
            BcCode::Unknown => "Unknown",
            BcCode::Unjudged => "Unjudged",
        }
    }

    /// Parse an operator keystroke (case-insensitive). `-` is not a choice.
    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_uppercase();
        Self::CHOICES.into_iter().find(|code| code.letter() == key)
    }

    /// Whether a prior decision with this code can be trusted without asking again
    pub fn is_settled(&self) -> bool {
        matches!(self, BcCode::Bus | BcCode::Coach | BcCode::Other)
    }

    /// Whether this code is worth recording in the decision store
    pub fn is_persistable(&self) -> bool {
        matches!(self, BcCode::Bus | BcCode::Coach)
    }
}

impl std::str::FromStr for BcCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some('-'), None) => Ok(BcCode::Unjudged),
            (Some(c), None) => BcCode::from_key(c).ok_or_else(|| Error::InvalidCode(s.to_string())),
            _ => Err(Error::InvalidCode(s.to_string())),
        }
    }
}

impl std::fmt::Display for BcCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
