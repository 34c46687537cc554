//! Aspect ratio reduction.
//!
//! A surface ratio is first matched against the standard table, then reduced
//! with a GCD over the rounded inch values. Integer pairs with a zero term or
//! a term above [`MAX_RATIO_TERM`] are dropped in favour of the decimal form.

use super::dimension::Length;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute tolerance when matching a decimal ratio against the standard table.
pub const STANDARD_RATIO_TOLERANCE: f64 = 0.01;

/// Largest numerator/denominator shown as an integer ratio.
const MAX_RATIO_TERM: u64 = 300;

/// Recognized standard ratios, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandardRatio {
    Ratio16x9,
    Ratio16x10,
    Ratio4x3,
    Ratio2x1,
    Ratio1x1,
}

impl StandardRatio {
    pub const ALL: [StandardRatio; 5] = [
        StandardRatio::Ratio16x9,
        StandardRatio::Ratio16x10,
        StandardRatio::Ratio4x3,
        StandardRatio::Ratio2x1,
        StandardRatio::Ratio1x1,
    ];

    pub fn terms(self) -> (u32, u32) {
        match self {
            StandardRatio::Ratio16x9 => (16, 9),
            StandardRatio::Ratio16x10 => (16, 10),
            StandardRatio::Ratio4x3 => (4, 3),
            StandardRatio::Ratio2x1 => (2, 1),
            StandardRatio::Ratio1x1 => (1, 1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StandardRatio::Ratio16x9 => "16:9",
            StandardRatio::Ratio16x10 => "16:10",
            StandardRatio::Ratio4x3 => "4:3",
            StandardRatio::Ratio2x1 => "2:1",
            StandardRatio::Ratio1x1 => "1:1",
        }
    }

    pub fn decimal(self) -> f64 {
        let (w, h) = self.terms();
        w as f64 / h as f64
    }

    /// First table entry within tolerance of `decimal`.
    pub fn matching(decimal: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ratio| (ratio.decimal() - decimal).abs() < STANDARD_RATIO_TOLERANCE)
    }
}

/// Reduced integer ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerRatio {
    pub numerator: u32,
    pub denominator: u32,
}

/// Derived description of a width/height ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioDescriptor {
    /// Integer form; `None` when either term would be zero or exceed 300.
    pub ratio: Option<IntegerRatio>,
    /// Width divided by height.
    pub decimal: f64,
    /// Label of the matched standard ratio.
    pub standard_label: Option<String>,
}

impl AspectRatioDescriptor {
    pub fn numerator(&self) -> Option<u32> {
        self.ratio.map(|r| r.numerator)
    }

    pub fn denominator(&self) -> Option<u32> {
        self.ratio.map(|r| r.denominator)
    }

    /// Display text for an optional descriptor.
    pub fn describe(descriptor: Option<&Self>) -> String {
        match descriptor {
            Some(d) => d.to_string(),
            None => "Invalid dimensions".to_string(),
        }
    }
}

impl fmt::Display for AspectRatioDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.standard_label, self.ratio) {
            (Some(label), _) => write!(f, "{} ({:.2}:1)", label, self.decimal),
            (None, Some(r)) => write!(f, "{}:{} ({:.2}:1)", r.numerator, r.denominator, self.decimal),
            (None, None) => write!(f, "({:.2}:1)", self.decimal),
        }
    }
}

/// Euclidean greatest common divisor; `gcd(a, 0) == a`.
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Reduces physical and pixel dimensions to aspect ratio descriptors.
pub struct RatioReducer;

impl RatioReducer {
    /// Reduce a surface ratio. Returns `None` unless both sides are positive.
    pub fn reduce(width: Length, height: Length) -> Option<AspectRatioDescriptor> {
        if !width.is_positive() || !height.is_positive() {
            return None;
        }

        let decimal = width.inches() / height.inches();

        if let Some(standard) = StandardRatio::matching(decimal) {
            let (numerator, denominator) = standard.terms();
            return Some(AspectRatioDescriptor {
                ratio: Some(IntegerRatio {
                    numerator,
                    denominator,
                }),
                decimal,
                standard_label: Some(standard.label().to_string()),
            });
        }

        let divisor = gcd(width.inches().round() as u64, height.inches().round() as u64);
        let ratio = if divisor == 0 {
            None
        } else {
            let numerator = (width.inches() / divisor as f64).round() as u64;
            let denominator = (height.inches() / divisor as f64).round() as u64;
            let in_range = |term: u64| (1..=MAX_RATIO_TERM).contains(&term);
            if !in_range(numerator) || !in_range(denominator) {
                None
            } else {
                Some(IntegerRatio {
                    numerator: numerator as u32,
                    denominator: denominator as u32,
                })
            }
        };

        Some(AspectRatioDescriptor {
            ratio,
            decimal,
            standard_label: None,
        })
    }

    /// Plain GCD reduction of a pixel grid, without the standard table.
    pub fn reduce_pixels(pixel_width: u32, pixel_height: u32) -> Option<AspectRatioDescriptor> {
        if pixel_width == 0 || pixel_height == 0 {
            return None;
        }

        let divisor = gcd(pixel_width as u64, pixel_height as u64);
        Some(AspectRatioDescriptor {
            ratio: Some(IntegerRatio {
                numerator: (pixel_width as u64 / divisor) as u32,
                denominator: (pixel_height as u64 / divisor) as u32,
            }),
            decimal: pixel_width as f64 / pixel_height as f64,
            standard_label: None,
        })
    }
}

/// A `<w>:<h>` ratio as entered on preset buttons or produced by the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetRatio {
    pub width: f64,
    pub height: f64,
}

impl PresetRatio {
    pub fn decimal(&self) -> f64 {
        self.width / self.height
    }

    /// Standard table entry with exactly these terms.
    pub fn standard(&self) -> Option<StandardRatio> {
        StandardRatio::ALL.into_iter().find(|ratio| {
            let (w, h) = ratio.terms();
            w as f64 == self.width && h as f64 == self.height
        })
    }
}

impl std::str::FromStr for PresetRatio {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::MalformedRatio(s.to_string());
        let (w, h) = s.split_once(':').ok_or_else(malformed)?;

        let term = |t: &str| -> Result<f64, ParseError> {
            if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
                return Err(malformed());
            }
            match t.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
                _ => Err(malformed()),
            }
        };

        Ok(Self {
            width: term(w)?,
            height: term(h)?,
        })
    }
}
