//! Reserved screen-position keywords.
//!
//! Test steps may name a relative screen position instead of explicit
//! coordinates. The vocabulary is fixed, case-sensitive and hyphenated:
//!
//! | keyword        | x       | y       |
//! |----------------|---------|---------|
//! | `left-top`     | m       | m       |
//! | `top`          | w/2     | m       |
//! | `right-top`    | w - m   | m       |
//! | `center`       | w/2     | h/2     |
//! | `left-bottom`  | m       | h - m   |
//! | `bottom`       | w/2     | h - m   |
//! | `right-bottom` | w - m   | h - m   |
//!
//! where `m = min(w, h) * margin_ratio` and the default ratio is `0.2`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::point::{ParseError, ScreenPoint, ScreenSize};

/// Default fraction of the shorter screen side used as the edge margin.
pub const DEFAULT_MARGIN_RATIO: f64 = 0.2;

/// Largest accepted margin ratio; at `0.5` the margin reaches the middle of
/// the shorter side.
pub const MAX_MARGIN_RATIO: f64 = 0.5;

/// One of the seven named screen positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservedPosition {
    LeftTop,
    Top,
    RightTop,
    Center,
    LeftBottom,
    Bottom,
    RightBottom,
}

impl ReservedPosition {
    /// Every position, in table order.
    pub const ALL: [ReservedPosition; 7] = [
        ReservedPosition::LeftTop,
        ReservedPosition::Top,
        ReservedPosition::RightTop,
        ReservedPosition::Center,
        ReservedPosition::LeftBottom,
        ReservedPosition::Bottom,
        ReservedPosition::RightBottom,
    ];

    /// Matches a keyword exactly. No trimming, no case folding.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pos| pos.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ReservedPosition::LeftTop => "left-top",
            ReservedPosition::Top => "top",
            ReservedPosition::RightTop => "right-top",
            ReservedPosition::Center => "center",
            ReservedPosition::LeftBottom => "left-bottom",
            ReservedPosition::Bottom => "bottom",
            ReservedPosition::RightBottom => "right-bottom",
        }
    }

    /// Computes the absolute point for this position on a screen of `size`.
    pub fn point_in(self, size: ScreenSize, geometry: &ReservedGeometry) -> ScreenPoint {
        let (w, h) = (size.width, size.height);
        let m = geometry.margin(size);

        let (x, y) = match self {
            ReservedPosition::LeftTop => (m, m),
            ReservedPosition::Top => (w / 2.0, m),
            ReservedPosition::RightTop => (w - m, m),
            ReservedPosition::Center => (w / 2.0, h / 2.0),
            ReservedPosition::LeftBottom => (m, h - m),
            ReservedPosition::Bottom => (w / 2.0, h - m),
            ReservedPosition::RightBottom => (w - m, h - m),
        };
        ScreenPoint::new(x, y)
    }
}

impl fmt::Display for ReservedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Free-form platform label, e.g. `ios` or `android`.
///
/// All platforms currently share one geometry table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Ios,
    Android,
    Other(String),
}

impl From<String> for Platform {
    fn from(label: String) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "ios" => Platform::Ios,
            "android" => Platform::Android,
            _ => Platform::Other(label),
        }
    }
}

impl From<&str> for Platform {
    fn from(label: &str) -> Self {
        Platform::from(label.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => f.write_str("ios"),
            Platform::Android => f.write_str("android"),
            Platform::Other(label) => f.write_str(label),
        }
    }
}

/// Configuration consulted when turning a keyword into coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedGeometry {
    /// Fraction of `min(w, h)` used as the distance from the screen edges.
    pub margin_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

impl Default for ReservedGeometry {
    fn default() -> Self {
        Self {
            margin_ratio: DEFAULT_MARGIN_RATIO,
            platform: None,
        }
    }
}

impl ReservedGeometry {
    pub fn with_platform(mut self, platform: impl Into<Platform>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_margin_ratio(mut self, margin_ratio: f64) -> Self {
        self.margin_ratio = margin_ratio;
        self
    }

    /// Whether `ratio` lies in `0..=MAX_MARGIN_RATIO`.
    pub fn is_valid_margin_ratio(ratio: f64) -> bool {
        (0.0..=MAX_MARGIN_RATIO).contains(&ratio)
    }

    /// Edge margin `m` for a screen of `size`.
    pub fn margin(&self, size: ScreenSize) -> f64 {
        size.min_side() * self.margin_ratio
    }
}

/// A position argument as received from an upstream command: a reserved
/// keyword or an explicit `x,y` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Reserved(ReservedPosition),
    Coordinates(ScreenPoint),
}

impl Target {
    pub fn resolve(self, size: ScreenSize, geometry: &ReservedGeometry) -> ScreenPoint {
        match self {
            Target::Reserved(pos) => pos.point_in(size, geometry),
            Target::Coordinates(point) => point,
        }
    }
}

impl FromStr for Target {
    type Err = ParseError;

    /// Keywords take precedence; anything else must be a coordinate pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ReservedPosition::from_keyword(s) {
            Some(pos) => Ok(Target::Reserved(pos)),
            None => s.parse().map(Target::Coordinates),
        }
    }
}
