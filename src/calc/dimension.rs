//! Free-form length parsing.
//!
//! Accepted forms, checked against the whole string:
//! - `16'9"` feet and inches
//! - `16ft-9in` / `16ft9in` feet and inches
//! - `16ft` or `16'` feet
//! - `500mm` millimeters
//! - `192"` / `192in` inches
//! - `16` bare numbers are feet

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimeters to inches.
pub const MM_TO_INCHES: f64 = 0.0393701;

/// A physical length, stored in inches.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(f64);

impl Length {
    pub fn from_inches(inches: f64) -> Self {
        Self(inches)
    }

    pub fn from_feet(feet: f64) -> Self {
        Self(feet * 12.0)
    }

    pub fn from_millimeters(mm: f64) -> Self {
        Self(mm * MM_TO_INCHES)
    }

    pub fn inches(self) -> f64 {
        self.0
    }

    pub fn feet(self) -> f64 {
        self.0 / 12.0
    }

    pub fn millimeters(self) -> f64 {
        self.0 / MM_TO_INCHES
    }

    /// Usable as a surface side: positive and finite.
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Feet with two decimals and the `ft` suffix, e.g. `"9.56ft"`.
    pub fn format_feet(self) -> String {
        format!("{:.2}ft", self.feet())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}in", self.0)
    }
}

/// Parse a dimension string into a [`Length`].
pub fn parse_dimension(raw: &str) -> Result<Length, ParseError> {
    let malformed = || ParseError::Malformed(raw.to_string());

    let (number, rest) = split_number(raw).ok_or_else(malformed)?;

    let inches = match rest {
        "" | "'" | "ft" => number * 12.0,
        "mm" => number * MM_TO_INCHES,
        "\"" | "in" => number,
        _ => number * 12.0 + compound_inches(rest).ok_or_else(malformed)?,
    };

    if !inches.is_finite() {
        return Err(malformed());
    }
    Ok(Length(inches))
}

/// Split a leading `digits[.digits]` number from the rest of the string.
fn split_number(s: &str) -> Option<(f64, &str)> {
    let bytes = s.as_bytes();
    let int_end = digit_run(bytes, 0);
    if int_end == 0 {
        return None;
    }

    let mut end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digit_run(bytes, end + 1);
        if frac_end > end + 1 {
            end = frac_end;
        }
    }

    let number = s[..end].parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some((number, &s[end..]))
}

/// Index one past the run of ASCII digits starting at `start`.
fn digit_run(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// Inches part of a compound suffix: `'9"`, `ft-9in` or `ft9in`.
fn compound_inches(suffix: &str) -> Option<f64> {
    let digits = if let Some(rest) = suffix.strip_prefix('\'') {
        rest.strip_suffix('"')?
    } else {
        let rest = suffix.strip_prefix("ft")?;
        let rest = rest.strip_prefix('-').unwrap_or(rest);
        rest.strip_suffix("in")?
    };

    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inches(raw: &str) -> f64 {
        parse_dimension(raw).unwrap().inches()
    }

    #[test]
    fn test_unit_equivalence() {
        assert_eq!(inches("16ft"), 192.0);
        assert_eq!(inches("192in"), 192.0);
        assert_eq!(inches("192\""), 192.0);
        assert_eq!(inches("16"), 192.0);
        assert_eq!(inches("16'"), 192.0);
        assert!((inches("500mm") - 19.6851).abs() < 0.0001);
    }

    #[test]
    fn test_feet_inches_forms() {
        assert_eq!(inches("16'9\""), 201.0);
        assert_eq!(inches("16ft-9in"), 201.0);
        assert_eq!(inches("16ft9in"), 201.0);
        assert_eq!(inches("10'11\""), 131.0);
        assert_eq!(inches("2.5'6\""), 36.0);
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(inches("9.5ft"), 114.0);
        assert_eq!(inches("0.5"), 6.0);
        assert_eq!(inches("12.25in"), 12.25);
    }

    #[test]
    fn test_malformed_inputs() {
        for raw in [
            "", "garbage", "ft", "-5ft", "16 ft", " 16ft", "16ft ", "16.ft", ".5ft", "16m",
            "16'123\"", "16'9", "16ft-in", "16ft-9", "16ft--9in", "1e3", "16'9.5\"", "16cm",
        ] {
            assert_eq!(
                parse_dimension(raw),
                Err(ParseError::Malformed(raw.to_string())),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_overflowing_numbers_rejected() {
        let huge = "9".repeat(400);
        assert_eq!(parse_dimension(&huge), Err(ParseError::Malformed(huge.clone())));

        // Finite as a number, infinite once scaled to inches
        let feet = format!("{}ft", "9".repeat(308));
        assert_eq!(parse_dimension(&feet), Err(ParseError::Malformed(feet.clone())));
        let inches_only = format!("{}in", "9".repeat(308));
        assert!(parse_dimension(&inches_only).is_ok());
    }

    #[test]
    fn test_zero_parses() {
        // Rejecting zero surfaces is the engine's job, not the parser's
        assert_eq!(inches("0"), 0.0);
    }

    #[test]
    fn test_length_conversions() {
        assert_eq!(Length::from_feet(9.5).inches(), 114.0);
        assert_eq!(Length::from_feet(9.5678).format_feet(), "9.57ft");
        assert!((Length::from_inches(192.0).millimeters() - 4876.8).abs() < 0.01);
        assert!(!Length::from_inches(0.0).is_positive());
    }
}
