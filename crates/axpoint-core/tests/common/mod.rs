//! Shared stand-ins for axpoint-core integration tests.
//!
//! These replace the host accessibility subsystem and the platform's
//! interface enumeration with deterministic fakes.

#![allow(dead_code)]

use std::sync::Mutex;

use axpoint_core::element::{ElementFrame, UIElement};
use axpoint_core::lookup::ElementLookup;
use axpoint_core::network::{AddressFamily, NetworkInterface};
use axpoint_core::point::ScreenPoint;

// ---------------------------------------------------------------------------
// Element lookup
// ---------------------------------------------------------------------------

/// A flat screen of elements, searched last-to-first so that later entries
/// sit on top. Every queried coordinate is recorded.
pub struct FakeScreen {
    elements: Vec<UIElement>,
    queries: Mutex<Vec<ScreenPoint>>,
}

impl FakeScreen {
    pub fn new(elements: Vec<UIElement>) -> Self {
        Self {
            elements,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<ScreenPoint> {
        self.queries.lock().unwrap().clone()
    }
}

impl ElementLookup for FakeScreen {
    fn lookup_element(&self, x: f64, y: f64) -> Option<UIElement> {
        let point = ScreenPoint::new(x, y);
        self.queries.lock().unwrap().push(point);
        self.elements
            .iter()
            .rev()
            .find(|e| e.frame.is_some_and(|f| f.contains(point)))
            .cloned()
    }
}

pub fn element(id: &str, element_type: &str, x: f64, y: f64, width: f64, height: f64) -> UIElement {
    UIElement {
        identifier: Some(id.to_string()),
        element_type: Some(element_type.to_string()),
        frame: Some(ElementFrame { x, y, width, height }),
        ..Default::default()
    }
}

/// A 1000x500 landscape screen: a full-screen background view without an
/// identifier is deliberately absent, so empty areas resolve to nothing.
pub fn landscape_screen() -> FakeScreen {
    FakeScreen::new(vec![
        element("toolbar", "Other", 0.0, 0.0, 1000.0, 60.0),
        element("back-button", "Button", 80.0, 80.0, 60.0, 60.0),
        element("player", "Other", 300.0, 150.0, 400.0, 200.0),
        element("play-button", "Button", 470.0, 220.0, 60.0, 60.0),
        element("next-button", "Button", 860.0, 360.0, 80.0, 80.0),
    ])
}

// ---------------------------------------------------------------------------
// Interfaces
// ---------------------------------------------------------------------------

pub fn interface(name: &str, address: &str, is_up: bool) -> NetworkInterface {
    NetworkInterface::from_ip(name, address.parse().unwrap(), is_up)
}

/// Interfaces as a typical iPhone reports them while on Wi-Fi and cellular.
pub fn phone_interfaces() -> Vec<NetworkInterface> {
    vec![
        interface("lo0", "127.0.0.1", true),
        interface("lo0", "::1", true),
        interface("pdp_ip0", "10.120.4.17", true),
        interface("en0", "fe80::1c2b:3aff:fe4d:5e6f", true),
        interface("en0", "192.168.1.42", true),
        interface("awdl0", "fe80::aa:bbff:fecc:ddee", true),
    ]
}

pub fn is_dotted_quad(value: &str) -> bool {
    let parts: Vec<&str> = value.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.len() <= 3 && p.parse::<u8>().is_ok())
}

pub fn down(mut iface: NetworkInterface) -> NetworkInterface {
    iface.is_up = false;
    iface
}

pub fn ipv4_only(interfaces: &[NetworkInterface]) -> usize {
    interfaces.iter().filter(|i| i.family == AddressFamily::Ipv4).count()
}
