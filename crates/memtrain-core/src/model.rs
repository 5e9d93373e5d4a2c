//! Core data model types for memtrain.
//!
//! Entities are identified by integer ids assigned in first-seen order while a
//! table is ingested. Ids index directly into the store's entity vectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MemtrainError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a cue (prompt text).
    CueId
);
entity_id!(
    /// Identifier of a canonical response.
    ResponseId
);
entity_id!(
    /// Identifier of a synonym text.
    SynonymId
);
entity_id!(
    /// Identifier of a hint text.
    HintId
);
entity_id!(
    /// Identifier of a filtering tag.
    TagId
);
entity_id!(
    /// Identifier of a mixing-tag used for distractor selection.
    MixingTagId
);

/// A cue paired with one of its responses.
///
/// `placement` is the 1-based ordinal of this link among all links made to
/// the same cue, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueResponseLink {
    pub cue_id: CueId,
    pub response_id: ResponseId,
    pub placement: u32,
}

/// How the learner answers a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    /// Level 1: pick one of four lettered choices.
    MultipleChoice,
    /// Level 2: type the response with hints shown.
    Hinted,
    /// Level 3: type the response unassisted.
    Unassisted,
}

impl Level {
    /// The level's number as shown to the learner.
    pub fn number(self) -> u8 {
        match self {
            Level::MultipleChoice => 1,
            Level::Hinted => 2,
            Level::Unassisted => 3,
        }
    }

    /// Whether the learner types the response rather than picking a letter.
    pub fn is_free_entry(self) -> bool {
        !matches!(self, Level::MultipleChoice)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}", self.number())
    }
}

impl FromStr for Level {
    type Err = MemtrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Level::MultipleChoice),
            "2" => Ok(Level::Hinted),
            "3" => Ok(Level::Unassisted),
            other => Err(MemtrainError::Configuration(format!(
                "'{other}': invalid level specified"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_display_and_parse() {
        assert_eq!(Level::MultipleChoice.to_string(), "Level 1");
        assert_eq!("3".parse::<Level>().unwrap(), Level::Unassisted);
        assert!("0".parse::<Level>().is_err());
        assert!(Level::Hinted.is_free_entry());
        assert!(!Level::MultipleChoice.is_free_entry());
    }
}
