//! # Interface Enumeration
//!
//! Lists the network interfaces of this host and picks the first address
//! that another cluster member could plausibly reach.

use std::io;
use std::net::IpAddr;
use std::time::Duration;

use pnet::datalink::NetworkInterface;
use tracing::debug;

use crate::network::probe::ReachabilityProbe;

/// Walking the unix interface list backwards reaches physical interfaces
/// before loopback and virtual bridge interfaces.
pub const REVERSE_INTERFACE_ORDER: bool = !cfg!(windows);

/// Source of the interfaces visited during local address discovery.
pub trait InterfaceSource: Send + Sync {
    fn interfaces(&self) -> io::Result<Vec<NetworkInterface>>;
}

/// Interfaces as reported by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> io::Result<Vec<NetworkInterface>> {
        let interfaces = pnet::datalink::interfaces();
        debug!("Identified {} network interface(s)", interfaces.len());
        Ok(interfaces)
    }
}

/// An address seen while walking the interfaces, tagged with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterfaceCandidate {
    pub interface: String,
    pub address: IpAddr,
}

/// Puts `interfaces` into the order in which they are probed.
pub fn visit_order(mut interfaces: Vec<NetworkInterface>, reverse: bool) -> Vec<NetworkInterface> {
    if reverse {
        interfaces.reverse();
    }
    interfaces
}

/// Flattens interfaces into their addresses, keeping interface order first
/// and address order within an interface second.
pub fn candidates(interfaces: &[NetworkInterface]) -> impl Iterator<Item = NetworkInterfaceCandidate> + '_ {
    interfaces.iter().flat_map(|interface| {
        interface.ips.iter().map(move |net| NetworkInterfaceCandidate {
            interface: interface.name.clone(),
            address: net.ip(),
        })
    })
}

/// IPv4, neither link-local nor loopback. Reachability is checked separately.
pub fn is_candidate_address(address: &IpAddr) -> bool {
    match address {
        IpAddr::V4(v4) => !v4.is_link_local() && !v4.is_loopback(),
        IpAddr::V6(_) => false,
    }
}

/// IPv4 and neither the unspecified nor a loopback address.
pub fn is_usable_default(address: &IpAddr) -> bool {
    address.is_ipv4() && !address.is_unspecified() && !address.is_loopback()
}

/// Returns the first candidate that passes [`is_candidate_address`] and
/// answers a probe within `timeout`. No ranking beyond that.
pub async fn select_candidate(
    interfaces: &[NetworkInterface],
    probe: &dyn ReachabilityProbe,
    timeout: Duration,
) -> Option<NetworkInterfaceCandidate> {
    for candidate in candidates(interfaces) {
        if !is_candidate_address(&candidate.address) {
            debug!(interface = %candidate.interface, address = %candidate.address, "skipping address");
            continue;
        }
        if probe.is_reachable(candidate.address, timeout).await {
            return Some(candidate);
        }
        debug!(interface = %candidate.interface, address = %candidate.address, "address not reachable");
    }
    None
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
