use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TierError {
    #[error("unknown question tier: {0}")]
    Unknown(String),
}

/// Difficulty tier of the question currently shown for a concept.
///
/// Every concept starts at `Standard`. A correct standard answer escalates to
/// `Advanced` (the mastery check), a wrong one drops to `Remedial` (guided
/// practice). Both of those are leaf tiers for the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Remedial,
    #[default]
    Standard,
    Advanced,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Standard, Tier::Remedial, Tier::Advanced];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Remedial => "remedial",
            Tier::Standard => "standard",
            Tier::Advanced => "advanced",
        }
    }

    /// Leaf tiers always grant permission to proceed once answered.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        !matches!(self, Tier::Standard)
    }

    /// Heading shown above the quiz for this tier.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Tier::Remedial => "Let's Try Again",
            Tier::Standard => "Check Understanding",
            Tier::Advanced => "Proving Mastery",
        }
    }

    /// Label of the submit action for this tier.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Tier::Advanced => "Claim Mastery Badge",
            Tier::Remedial | Tier::Standard => "Check Answer",
        }
    }

    /// Badge rendered next to the quiz, if the tier has one.
    #[must_use]
    pub fn badge(self) -> Option<&'static str> {
        match self {
            Tier::Remedial => Some("Guided Practice"),
            Tier::Standard => None,
            Tier::Advanced => Some("Mastery Challenge"),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remedial" => Ok(Tier::Remedial),
            "standard" => Ok(Tier::Standard),
            "advanced" => Ok(Tier::Advanced),
            other => Err(TierError::Unknown(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_tiers() {
        for tier in Tier::ALL {
            assert_eq!(tier.as_str().parse::<Tier>().unwrap(), tier);
        }
        assert_eq!(" Advanced ".parse::<Tier>().unwrap(), Tier::Advanced);
        assert!(matches!("expert".parse::<Tier>(), Err(TierError::Unknown(_))));
    }

    #[test]
    fn only_standard_is_not_a_leaf() {
        assert!(!Tier::Standard.is_leaf());
        assert!(Tier::Remedial.is_leaf());
        assert!(Tier::Advanced.is_leaf());
        assert_eq!(Tier::default(), Tier::Standard);
    }
}
