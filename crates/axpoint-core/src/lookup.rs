//! Element lookup collaborator.
//!
//! Resolving the element rendered at a coordinate belongs to the host
//! accessibility subsystem. [`ElementLookup`] is the seam: the resolver only
//! supplies coordinates and passes the answer through.

use crate::element::UIElement;

/// Finds the UI element at a screen coordinate.
///
/// Calls are synchronous and carry no timeout of their own. `None` means no
/// element occupies the point, which is a normal outcome (e.g. empty
/// background or an off-screen point).
pub trait ElementLookup: Send + Sync {
    fn lookup_element(&self, x: f64, y: f64) -> Option<UIElement>;
}

impl<F> ElementLookup for F
where
    F: Fn(f64, f64) -> Option<UIElement> + Send + Sync,
{
    fn lookup_element(&self, x: f64, y: f64) -> Option<UIElement> {
        self(x, y)
    }
}

/// A lookup that never finds anything. Useful when only coordinate
/// resolution is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoElementLookup;

impl ElementLookup for NoElementLookup {
    fn lookup_element(&self, _x: f64, _y: f64) -> Option<UIElement> {
        None
    }
}
