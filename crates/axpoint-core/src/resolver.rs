//! Current-point resolution and element lookup.
//!
//! [`PointResolver`] owns the "current point": the coordinate an automation
//! step targets before asking which element sits there. It is a plain value
//! owned by the caller, so no global state is involved. Callers that need a
//! single instance shared across threads use [`SharedPointResolver`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use axpoint_core::lookup::NoElementLookup;
//! use axpoint_core::point::{ScreenPoint, ScreenSize};
//! use axpoint_core::resolver::PointResolver;
//!
//! let mut resolver = PointResolver::new(Arc::new(NoElementLookup), ScreenSize::new(1000.0, 500.0));
//!
//! resolver.set_from_string("12.5,-3").unwrap();
//! assert_eq!(resolver.current(), ScreenPoint::new(12.5, -3.0));
//!
//! assert_eq!(resolver.resolve_reserved("center"), Some(ScreenPoint::new(500.0, 250.0)));
//! assert_eq!(resolver.resolve_reserved("diagonal"), None);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::element::UIElement;
use crate::lookup::ElementLookup;
use crate::point::{ParseError, ScreenPoint, ScreenSize};
use crate::reserved::{ReservedGeometry, ReservedPosition, Target};

/// Holds the current screen point and resolves coordinates and keywords
/// against the screen.
#[derive(Clone)]
pub struct PointResolver {
    current: ScreenPoint,
    screen: ScreenSize,
    geometry: ReservedGeometry,
    lookup: Arc<dyn ElementLookup>,
}

impl PointResolver {
    /// Creates a resolver whose current point is the origin.
    pub fn new(lookup: Arc<dyn ElementLookup>, screen: ScreenSize) -> Self {
        Self {
            current: ScreenPoint::ORIGIN,
            screen,
            geometry: ReservedGeometry::default(),
            lookup,
        }
    }

    pub fn with_geometry(mut self, geometry: ReservedGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn current(&self) -> ScreenPoint {
        self.current
    }

    /// Makes `point` the current point. NaN or infinite coordinates are
    /// rejected and leave the current point untouched.
    pub fn set_point(&mut self, point: ScreenPoint) -> Result<(), ParseError> {
        self.current = point.checked()?;
        debug!(x = point.x, y = point.y, "Current point updated");
        Ok(())
    }

    /// Parses an `x,y` string and makes it the current point.
    ///
    /// On error the current point is left untouched.
    pub fn set_from_string(&mut self, coordinates: &str) -> Result<(), ParseError> {
        self.set_point(coordinates.parse()?)
    }

    /// Accepts either a reserved keyword or an `x,y` string, stores the
    /// resolved point and returns it. A keyword that resolves to a
    /// non-finite point is rejected like malformed input.
    pub fn set_from_target(&mut self, target: &str) -> Result<ScreenPoint, ParseError> {
        let point = target.parse::<Target>()?.resolve(self.screen, &self.geometry);
        self.set_point(point)?;
        Ok(point)
    }

    /// Maps a reserved keyword to its point on the current screen.
    ///
    /// Returns `None` for anything outside the vocabulary. The current point
    /// is not modified.
    pub fn resolve_reserved(&self, keyword: &str) -> Option<ScreenPoint> {
        let Some(position) = ReservedPosition::from_keyword(keyword) else {
            debug!(keyword, "Not a reserved keyword");
            return None;
        };
        let point = position.point_in(self.screen, &self.geometry);
        debug!(
            keyword,
            x = point.x,
            y = point.y,
            platform = ?self.geometry.platform,
            "Resolved reserved keyword"
        );
        Some(point)
    }

    /// Like [`resolve_reserved`](Self::resolve_reserved), but an unknown
    /// keyword yields `(0,0)`. The result cannot tell an unknown keyword
    /// apart from a real origin point.
    pub fn resolve_reserved_or_origin(&self, keyword: &str) -> ScreenPoint {
        self.resolve_reserved(keyword).unwrap_or(ScreenPoint::ORIGIN)
    }

    /// The element at the current point, if any.
    pub fn element_at_current_point(&self) -> Option<UIElement> {
        self.element_at(self.current)
    }

    /// The element at an explicit point, if any.
    pub fn element_at(&self, point: ScreenPoint) -> Option<UIElement> {
        self.lookup.lookup_element(point.x, point.y)
    }

    /// The element at a reserved position. An unknown keyword never reaches
    /// the lookup.
    pub fn element_at_reserved(&self, keyword: &str) -> Option<UIElement> {
        self.resolve_reserved(keyword)
            .and_then(|point| self.element_at(point))
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    /// Updates the screen dimensions, e.g. after a rotation. Sizes that are
    /// not positive and finite are rejected.
    pub fn set_screen_size(&mut self, screen: ScreenSize) -> Result<(), ParseError> {
        self.screen = screen.checked()?;
        Ok(())
    }

    pub fn geometry(&self) -> &ReservedGeometry {
        &self.geometry
    }
}

impl fmt::Display for PointResolver {
    /// Renders the current point as `x,y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.current, f)
    }
}

impl fmt::Debug for PointResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointResolver")
            .field("current", &self.current)
            .field("screen", &self.screen)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

/// A [`PointResolver`] behind a mutex, for callers that keep one current
/// point shared between threads.
///
/// Each method holds the lock for one whole operation, so both coordinates
/// are always read and written together. Element lookups run outside the
/// lock on a snapshot of the point.
#[derive(Clone)]
pub struct SharedPointResolver {
    inner: Arc<Mutex<PointResolver>>,
}

impl SharedPointResolver {
    pub fn new(resolver: PointResolver) -> Self {
        Self {
            inner: Arc::new(Mutex::new(resolver)),
        }
    }

    // Writes replace the whole point in one assignment, so a poisoned guard
    // still holds a consistent value.
    fn lock(&self) -> MutexGuard<'_, PointResolver> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> ScreenPoint {
        self.lock().current()
    }

    pub fn set_point(&self, point: ScreenPoint) -> Result<(), ParseError> {
        self.lock().set_point(point)
    }

    pub fn set_from_string(&self, coordinates: &str) -> Result<(), ParseError> {
        self.lock().set_from_string(coordinates)
    }

    pub fn set_from_target(&self, target: &str) -> Result<ScreenPoint, ParseError> {
        self.lock().set_from_target(target)
    }

    pub fn resolve_reserved(&self, keyword: &str) -> Option<ScreenPoint> {
        self.lock().resolve_reserved(keyword)
    }

    pub fn resolve_reserved_or_origin(&self, keyword: &str) -> ScreenPoint {
        self.lock().resolve_reserved_or_origin(keyword)
    }

    pub fn set_screen_size(&self, screen: ScreenSize) -> Result<(), ParseError> {
        self.lock().set_screen_size(screen)
    }

    /// Renders the current point as `x,y`.
    pub fn coordinates_string(&self) -> String {
        self.lock().to_string()
    }

    pub fn element_at_current_point(&self) -> Option<UIElement> {
        let (point, lookup) = {
            let resolver = self.lock();
            (resolver.current, Arc::clone(&resolver.lookup))
        };
        lookup.lookup_element(point.x, point.y)
    }

    pub fn element_at(&self, point: ScreenPoint) -> Option<UIElement> {
        let lookup = Arc::clone(&self.lock().lookup);
        lookup.lookup_element(point.x, point.y)
    }
}
