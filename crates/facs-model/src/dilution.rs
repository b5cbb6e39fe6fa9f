use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Validated dilution ratio of the form `1:N`.
///
/// Parsed once when a reagent table is normalized; downstream arithmetic
/// reads the denominator directly instead of re-splitting cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DilutionRatio(u32);

impl DilutionRatio {
    /// Builds a ratio from a denominator, rejecting zero.
    pub fn new(denominator: u32) -> Option<Self> {
        if denominator == 0 {
            None
        } else {
            Some(DilutionRatio(denominator))
        }
    }

    /// The `N` of `1:N`. Always at least 1.
    pub fn denominator(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DilutionRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1:{}", self.0)
    }
}

/// Error produced when a cell does not hold a `1:N` ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDilutionError;

impl fmt::Display for ParseDilutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a dilution ratio of the form 1:N with N at least 1")
    }
}

impl std::error::Error for ParseDilutionError {}

impl FromStr for DilutionRatio {
    type Err = ParseDilutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (numerator, denominator) = s.trim().split_once(':').ok_or(ParseDilutionError)?;
        if numerator.trim() != "1" {
            return Err(ParseDilutionError);
        }
        let denominator: u32 = denominator.trim().parse().map_err(|_| ParseDilutionError)?;
        DilutionRatio::new(denominator).ok_or(ParseDilutionError)
    }
}

impl Serialize for DilutionRatio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DilutionRatio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
