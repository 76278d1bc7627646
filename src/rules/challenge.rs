//! # Challenge Ratings
//!
//! Exact rational challenge ratings. Rule tables and catalogs write ratings
//! as text ("1/4", "2") or plain JSON numbers; both are normalized here,
//! once, when data is loaded.

use crate::{EncounterError, EncounterResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Finest fraction a decimal rating may express (1/8).
const DECIMAL_DENOMINATOR: u32 = 8;

/// A monster's challenge rating, stored as a reduced fraction.
///
/// # Examples
///
/// ```
/// use encountergen::ChallengeRating;
///
/// let quarter: ChallengeRating = "1/4".parse().unwrap();
/// assert_eq!(quarter, ChallengeRating::new(2, 8).unwrap());
/// assert!(quarter < ChallengeRating::whole(1));
/// assert_eq!(quarter.to_string(), "1/4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RatingText", into = "String")]
pub struct ChallengeRating {
    numerator: u32,
    denominator: u32,
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl ChallengeRating {
    /// Creates a rating from a fraction. Returns None for a zero denominator.
    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let divisor = gcd(numerator, denominator).max(1);
        Some(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    /// Creates a whole-number rating.
    pub fn whole(value: u32) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    /// Returns true for any rating above zero.
    pub fn is_positive(self) -> bool {
        self.numerator > 0
    }

    /// Compares this rating against a whole character level.
    pub fn cmp_level(self, level: u32) -> Ordering {
        (self.numerator as u64).cmp(&(level as u64 * self.denominator as u64))
    }
}

impl Ord for ChallengeRating {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as u64 * other.denominator as u64;
        let rhs = other.numerator as u64 * self.denominator as u64;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for ChallengeRating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

fn unparseable(text: &str) -> EncounterError {
    EncounterError::DataIntegrity(format!("Unparseable challenge rating: '{}'", text))
}

fn from_decimal(value: f64, text: &str) -> EncounterResult<ChallengeRating> {
    if !value.is_finite() || value < 0.0 {
        return Err(unparseable(text));
    }
    let scaled = value * DECIMAL_DENOMINATOR as f64;
    if (scaled - scaled.round()).abs() > 1e-9 || scaled > u32::MAX as f64 {
        return Err(unparseable(text));
    }
    ChallengeRating::new(scaled.round() as u32, DECIMAL_DENOMINATOR).ok_or_else(|| unparseable(text))
}

impl FromStr for ChallengeRating {
    type Err = EncounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Some((numerator, denominator)) = text.split_once('/') {
            let numerator: u32 = numerator.trim().parse().map_err(|_| unparseable(s))?;
            let denominator: u32 = denominator.trim().parse().map_err(|_| unparseable(s))?;
            return ChallengeRating::new(numerator, denominator).ok_or_else(|| unparseable(s));
        }
        if let Ok(value) = text.parse::<u32>() {
            return Ok(ChallengeRating::whole(value));
        }
        let value: f64 = text.parse().map_err(|_| unparseable(s))?;
        from_decimal(value, s)
    }
}

/// A challenge rating as it appears in a data file, before normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RatingText {
    Whole(u32),
    Decimal(f64),
    Text(String),
}

impl RatingText {
    /// Normalizes the raw value into a [`ChallengeRating`].
    pub fn normalize(&self) -> EncounterResult<ChallengeRating> {
        match self {
            RatingText::Whole(value) => Ok(ChallengeRating::whole(*value)),
            RatingText::Decimal(value) => from_decimal(*value, &value.to_string()),
            RatingText::Text(text) => text.parse(),
        }
    }
}

impl fmt::Display for RatingText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingText::Whole(value) => write!(f, "{}", value),
            RatingText::Decimal(value) => write!(f, "{}", value),
            RatingText::Text(text) => f.write_str(text),
        }
    }
}

impl TryFrom<RatingText> for ChallengeRating {
    type Error = EncounterError;

    fn try_from(value: RatingText) -> Result<Self, Self::Error> {
        value.normalize()
    }
}

impl From<ChallengeRating> for String {
    fn from(rating: ChallengeRating) -> Self {
        rating.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cr(text: &str) -> ChallengeRating {
        text.parse().unwrap()
    }

    #[test]
    fn test_fraction_parsing_reduces() {
        assert_eq!(cr("1/4"), ChallengeRating::new(1, 4).unwrap());
        assert_eq!(cr("2/8"), cr("1/4"));
        assert_eq!(cr(" 1 / 2 "), cr("1/2"));
        assert_eq!(cr("4/2"), ChallengeRating::whole(2));
        assert_eq!(cr("0/3"), ChallengeRating::whole(0));
    }

    #[test]
    fn test_whole_and_decimal_parsing() {
        assert_eq!(cr("5"), ChallengeRating::whole(5));
        assert_eq!(cr("0.5"), cr("1/2"));
        assert_eq!(cr("0.125"), cr("1/8"));
        assert_eq!(cr("3.0"), ChallengeRating::whole(3));
    }

    #[test]
    fn test_rejects_garbage() {
        for text in ["", "abc", "1/0", "-1", "0.3", "1/x", "NaN"] {
            let result = text.parse::<ChallengeRating>();
            assert!(
                matches!(result, Err(EncounterError::DataIntegrity(_))),
                "expected '{}' to be rejected",
                text
            );
        }
    }

    #[test]
    fn test_ordering_matches_value() {
        let mut ratings = vec![cr("2"), cr("1/8"), cr("1"), cr("1/2"), cr("0"), cr("1/4")];
        ratings.sort();
        let rendered: Vec<String> = ratings.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["0", "1/8", "1/4", "1/2", "1", "2"]);
    }

    #[test]
    fn test_level_comparison() {
        assert_eq!(cr("1/2").cmp_level(1), Ordering::Less);
        assert_eq!(cr("1").cmp_level(1), Ordering::Equal);
        assert_eq!(cr("3").cmp_level(2), Ordering::Greater);
        assert!(!cr("0").is_positive());
        assert!(cr("1/8").is_positive());
    }

    #[test]
    fn test_serde_accepts_text_and_numbers() {
        let parsed: Vec<ChallengeRating> = serde_json::from_str(r#"["1/4", 3, 0.5]"#).unwrap();
        assert_eq!(parsed, vec![cr("1/4"), cr("3"), cr("1/2")]);
        assert_eq!(serde_json::to_string(&cr("1/8")).unwrap(), "\"1/8\"");
        assert!(serde_json::from_str::<ChallengeRating>("\"one\"").is_err());
    }
}
