//! Time signatures and bar durations

use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::reduction::errors::ReduceError;

/// Time signature such as 4/4 or 6/8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, ReduceError> {
        if numerator == 0 || denominator == 0 || !denominator.is_power_of_two() {
            return Err(ReduceError::InvalidTimeSignature(format!(
                "{}/{}",
                numerator, denominator
            )));
        }
        Ok(TimeSignature {
            numerator,
            denominator,
        })
    }

    /// Exact bar length in quarter notes
    pub fn bar_ratio(&self) -> Ratio<i64> {
        Ratio::new(self.numerator as i64 * 4, self.denominator as i64)
    }

    /// Bar length in quarter lengths
    ///
    /// # Examples
    /// ```
    /// use chord_reducer_wasm::models::TimeSignature;
    ///
    /// assert_eq!(TimeSignature::new(4, 4).unwrap().bar_duration(), 4.0);
    /// assert_eq!(TimeSignature::new(6, 8).unwrap().bar_duration(), 3.0);
    /// ```
    pub fn bar_duration(&self) -> f64 {
        let bar = self.bar_ratio();
        *bar.numer() as f64 / *bar.denom() as f64
    }

    /// Compound metres group beats in threes (6/8, 9/8, 12/8)
    pub fn is_compound(&self) -> bool {
        self.numerator > 3 && self.numerator % 3 == 0
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature {
            numerator: 4,
            denominator: 4,
        }
    }
}

impl FromStr for TimeSignature {
    type Err = ReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReduceError::InvalidTimeSignature(s.to_string());
        let (num, den) = s.split_once('/').ok_or_else(invalid)?;
        let numerator = num.trim().parse().map_err(|_| invalid())?;
        let denominator = den.trim().parse().map_err(|_| invalid())?;
        TimeSignature::new(numerator, denominator)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let ts: TimeSignature = "3/4".parse().unwrap();
        assert_eq!(ts, TimeSignature::new(3, 4).unwrap());
        assert_eq!(ts.to_string(), "3/4");
        assert!(" 6 / 8 ".parse::<TimeSignature>().is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("4".parse::<TimeSignature>().is_err());
        assert!("x/4".parse::<TimeSignature>().is_err());
        assert!("4/0".parse::<TimeSignature>().is_err());
        assert!("3/5".parse::<TimeSignature>().is_err());
    }

    #[test]
    fn test_bar_duration() {
        assert_eq!(TimeSignature::new(3, 4).unwrap().bar_duration(), 3.0);
        assert_eq!(TimeSignature::new(2, 2).unwrap().bar_duration(), 4.0);
        assert_eq!(TimeSignature::new(3, 8).unwrap().bar_duration(), 1.5);
        assert_eq!(TimeSignature::new(5, 16).unwrap().bar_duration(), 1.25);
    }

    #[test]
    fn test_is_compound() {
        assert!(TimeSignature::new(6, 8).unwrap().is_compound());
        assert!(TimeSignature::new(12, 8).unwrap().is_compound());
        assert!(!TimeSignature::new(3, 4).unwrap().is_compound());
        assert!(!TimeSignature::new(4, 4).unwrap().is_compound());
    }
}
