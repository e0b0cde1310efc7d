//! Local network address lookup.
//!
//! Reports the device's address on the local network for display and
//! diagnostics. Interface enumeration is delegated to an [`InterfaceSource`];
//! [`SystemInterfaces`] reads the host's interfaces through `getifaddrs(3)`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use axpoint_core::network::{LocalAddressResolver, SystemInterfaces};
//!
//! let resolver = LocalAddressResolver::new(Arc::new(SystemInterfaces));
//! match resolver.ip_address() {
//!     Ok(ip) => println!("device address: {ip}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};
use std::sync::Arc;

use nix::ifaddrs::getifaddrs;
use nix::net::if_::InterfaceFlags;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while looking up the local address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No interface is up, non-loopback and of the requested family.
    #[error("No qualifying network interface found")]
    NoInterface,

    /// The platform failed to enumerate its interfaces.
    #[error("Failed to enumerate network interfaces: {0}")]
    Enumeration(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    #[default]
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Whether `address` is a well-formed address of this family.
    fn accepts(self, address: &str) -> bool {
        match self {
            AddressFamily::Ipv4 => address.parse::<Ipv4Addr>().is_ok(),
            AddressFamily::Ipv6 => address.parse::<Ipv6Addr>().is_ok(),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => f.pad("ipv4"),
            AddressFamily::Ipv6 => f.pad("ipv6"),
        }
    }
}

/// One address assigned to a network interface.
///
/// An interface with several addresses appears once per address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    pub family: AddressFamily,
    pub address: String,
    pub is_up: bool,
    pub is_loopback: bool,
}

impl NetworkInterface {
    pub fn from_ip(name: impl Into<String>, ip: IpAddr, is_up: bool) -> Self {
        let family = match ip {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        };
        Self {
            name: name.into(),
            family,
            address: ip.to_string(),
            is_up,
            is_loopback: ip.is_loopback(),
        }
    }
}

/// Enumerates network interfaces.
///
/// The order of the returned list is the selection order used by
/// [`LocalAddressResolver`].
pub trait InterfaceSource: Send + Sync {
    fn list_interfaces(&self) -> Result<Vec<NetworkInterface>, LookupError>;
}

/// A fixed list of interfaces.
impl InterfaceSource for Vec<NetworkInterface> {
    fn list_interfaces(&self) -> Result<Vec<NetworkInterface>, LookupError> {
        Ok(self.clone())
    }
}

/// The host's interfaces, in the order `getifaddrs(3)` reports them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn list_interfaces(&self) -> Result<Vec<NetworkInterface>, LookupError> {
        let addrs = getifaddrs().map_err(|e| LookupError::Enumeration(e.to_string()))?;

        let interfaces = addrs
            .filter_map(|ifaddr| {
                let storage = ifaddr.address?;
                let ip = if let Some(sin) = storage.as_sockaddr_in() {
                    IpAddr::V4(*SocketAddrV4::from(*sin).ip())
                } else if let Some(sin6) = storage.as_sockaddr_in6() {
                    IpAddr::V6(*SocketAddrV6::from(*sin6).ip())
                } else {
                    return None;
                };
                let mut iface = NetworkInterface::from_ip(
                    ifaddr.interface_name,
                    ip,
                    ifaddr.flags.contains(InterfaceFlags::IFF_UP),
                );
                iface.is_loopback |= ifaddr.flags.contains(InterfaceFlags::IFF_LOOPBACK);
                Some(iface)
            })
            .collect::<Vec<_>>();

        debug!(count = interfaces.len(), "Enumerated network interfaces");
        Ok(interfaces)
    }
}

/// Picks the device's local address from the enumerated interfaces.
#[derive(Clone)]
pub struct LocalAddressResolver {
    source: Arc<dyn InterfaceSource>,
    family: AddressFamily,
    preferred_interface: Option<String>,
}

impl LocalAddressResolver {
    /// Creates a resolver for IPv4 addresses with no preferred interface.
    pub fn new(source: Arc<dyn InterfaceSource>) -> Self {
        Self {
            source,
            family: AddressFamily::Ipv4,
            preferred_interface: None,
        }
    }

    pub fn with_family(mut self, family: AddressFamily) -> Self {
        self.family = family;
        self
    }

    /// Prefers the named interface (e.g. `en0` for Wi-Fi on iOS) when it
    /// qualifies. Otherwise selection falls back to first-match.
    pub fn with_preferred_interface(mut self, name: Option<String>) -> Self {
        self.preferred_interface = name;
        self
    }

    /// Returns the address of the first qualifying interface.
    ///
    /// The list is fetched fresh on every call. A qualifying interface is up,
    /// not a loopback, and carries a valid address of the configured family.
    pub fn ip_address(&self) -> Result<String, LookupError> {
        let interfaces = self.source.list_interfaces()?;
        let mut qualifying = interfaces.iter().filter(|iface| self.qualifies(iface));

        let chosen = match self.preferred_interface.as_deref() {
            Some(preferred) => {
                let candidates: Vec<&NetworkInterface> = qualifying.collect();
                let found = candidates.iter().find(|iface| iface.name == preferred);
                if found.is_none() {
                    warn!(interface = preferred, "Preferred interface not available, using first match");
                }
                found.or_else(|| candidates.first()).copied()
            }
            None => qualifying.next(),
        };

        let iface = chosen.ok_or(LookupError::NoInterface)?;
        debug!(interface = %iface.name, address = %iface.address, "Selected local address");
        Ok(iface.address.clone())
    }

    fn qualifies(&self, iface: &NetworkInterface) -> bool {
        iface.is_up
            && !iface.is_loopback
            && iface.family == self.family
            && self.family.accepts(&iface.address)
    }
}
