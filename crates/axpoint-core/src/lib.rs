//! # axpoint-core
//!
//! Screen point resolution for UI-automation agents.
//!
//! An automation step names a screen position either as explicit `x,y`
//! coordinates or as a reserved keyword such as `center` or `left-bottom`.
//! This crate turns both into absolute screen points, keeps the "current
//! point" a step targets, and hands coordinates to the host's accessibility
//! subsystem to find the element underneath. A companion resolver reports the
//! device's local IPv4 address.
//!
//! ## Modules
//!
//! - [`point`] - `ScreenPoint`, `ScreenSize` and the `x,y` string format
//! - [`reserved`] - Reserved position keywords and their geometry
//! - [`element`] - UI element handles returned by element lookup
//! - [`lookup`] - The element lookup collaborator trait
//! - [`resolver`] - The current-point resolver, plain and mutex-shared
//! - [`network`] - Interface enumeration and local address selection
//! - [`config`] - Persistent settings in `~/.axpoint/config.json`
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use axpoint_core::element::UIElement;
//! use axpoint_core::point::{ScreenPoint, ScreenSize};
//! use axpoint_core::resolver::PointResolver;
//!
//! // Stand-in for the platform's accessibility lookup.
//! let lookup = |x: f64, y: f64| {
//!     (x > 400.0 && y > 200.0).then(|| UIElement {
//!         identifier: Some("play-button".to_string()),
//!         ..Default::default()
//!     })
//! };
//!
//! let mut resolver = PointResolver::new(Arc::new(lookup), ScreenSize::new(1000.0, 500.0));
//! let point = resolver.set_from_target("center").unwrap();
//! assert_eq!(point, ScreenPoint::new(500.0, 250.0));
//!
//! let element = resolver.element_at_current_point().unwrap();
//! assert_eq!(element.identifier.as_deref(), Some("play-button"));
//! ```

pub mod config;
pub mod element;
pub mod lookup;
pub mod network;
pub mod point;
pub mod reserved;
pub mod resolver;
