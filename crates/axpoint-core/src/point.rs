//! Screen points and the `x,y` coordinate string format.
//!
//! Coordinates travel between the automation host and the agent as plain
//! text of the form `"<number>,<number>"`. Each number is a decimal with an
//! optional sign and an optional fractional part. Whitespace around the whole
//! string and around each component is ignored.
//!
//! # Example
//!
//! ```
//! use axpoint_core::point::ScreenPoint;
//!
//! let point: ScreenPoint = " 12.5, -3 ".parse().unwrap();
//! assert_eq!(point, ScreenPoint::new(12.5, -3.0));
//! assert_eq!(point.to_string(), "12.5,-3");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing or storing coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not match the two-number `x,y` format.
    #[error("Malformed coordinates '{0}': expected 'x,y' with two decimal numbers")]
    Malformed(String),

    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinates '{0}'")]
    NonFinite(String),

    /// A screen dimension is non-finite, zero or negative.
    #[error("Invalid screen size {0}: width and height must be positive and finite")]
    InvalidScreenSize(String),
}

/// A point in screen coordinates, with the origin at the top-left corner.
///
/// Both fields are finite. No range check happens here: a point outside the
/// screen is valid and simply resolves to no element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    /// The top-left origin `(0,0)`.
    pub const ORIGIN: ScreenPoint = ScreenPoint { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the point unchanged if both coordinates are finite.
    pub fn checked(self) -> Result<Self, ParseError> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(ParseError::NonFinite(self.to_string()))
        }
    }
}

impl fmt::Display for ScreenPoint {
    /// Formats as `x,y` using the shortest decimal form that parses back to
    /// the same value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for ScreenPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::Malformed(s.to_string());

        let mut parts = s.trim().split(',');
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let x = parse_component(x).ok_or_else(malformed)?;
        let y = parse_component(y).ok_or_else(malformed)?;
        Ok(ScreenPoint { x, y })
    }
}

/// Parses one decimal component: `[+-]digits[.digits]`, where either side of
/// the dot may be empty but not both.
fn parse_component(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let unsigned = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);

    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Dimensions of the screen in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides positive and finite.
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|side| side.is_finite() && *side > 0.0)
    }

    pub fn checked(self) -> Result<Self, ParseError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ParseError::InvalidScreenSize(format!("{}x{}", self.width, self.height)))
        }
    }

    /// The shorter of the two sides.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}
