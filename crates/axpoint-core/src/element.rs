//! UI element handles returned by element lookup.
//!
//! The host accessibility subsystem reports elements in this shape. The
//! resolver never inspects them; it only hands coordinates to the lookup and
//! passes the result back to the caller.

use serde::{Deserialize, Serialize};

use crate::point::ScreenPoint;

/// The element found under a point.
///
/// Only the keys a caller needs to recognise the hit are kept. Anything else
/// the lookup reports, such as the subtree below the element, is dropped on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UIElement {
    #[serde(rename = "AXUniqueId", default)]
    pub identifier: Option<String>,

    /// Visible text, when the element has any.
    #[serde(rename = "AXLabel", default)]
    pub label: Option<String>,

    #[serde(rename = "AXValue", default)]
    pub value: Option<String>,

    /// Widget class as reported by the host, e.g. `Button`.
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,

    #[serde(default)]
    pub frame: Option<ElementFrame>,
}

/// Bounds of an element in screen points, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementFrame {
    /// Whether `point` lies inside the frame. The left and top edges are
    /// inclusive, the right and bottom edges exclusive.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}
