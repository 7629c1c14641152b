//! Shared fixtures: mock interfaces modelled on a real multihomed Linux box,
//! plus scripted name service, probe and interface source.

use std::collections::{HashMap, HashSet};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nodeaddr_core::network::interface::InterfaceSource;
use nodeaddr_core::network::naming::NameService;
use nodeaddr_core::network::probe::ReachabilityProbe;
use pnet::datalink::{MacAddr, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

pub fn ni(name: &str, index: u32, mac: Option<MacAddr>, ips: &[IpNetwork], flags: u32) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index,
        mac,
        ips: ips.to_vec(),
        flags,
    }
}

pub fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
    IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
}

pub fn v6(s: &str, p: u8) -> IpNetwork {
    IpNetwork::V6(Ipv6Network::new(s.parse::<Ipv6Addr>().unwrap(), p).unwrap())
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/*************************************************************
                  Mock interfaces for testing
**************************************************************/

/// In the order the kernel reports them.
pub fn iface_all() -> Vec<NetworkInterface> {
    vec![lo(), enp9s0(), wlan0(), tun0(), docker0(), veth1234(), virbr0()]
}

pub fn lo() -> NetworkInterface {
    ni(
        "lo",
        1,
        Some(MacAddr::new(0, 0, 0, 0, 0, 0)),
        &[v4(127, 0, 0, 1, 8), v6("::1", 128)],
        65609,
    )
}

pub fn enp9s0() -> NetworkInterface {
    ni(
        "enp9s0",
        2,
        Some(MacAddr::new(0xa8, 0xa1, 0x59, 0x13, 0x41, 0x46)),
        &[
            v6("fe80::b3dd:5c39:7c29:48b6", 64),
            v4(192, 168, 0, 32, 24),
        ],
        69699,
    )
}

pub fn wlan0() -> NetworkInterface {
    ni(
        "wlan0",
        3,
        Some(MacAddr::new(0x34, 0xcf, 0xf6, 0x9a, 0x11, 0x22)),
        &[v4(192, 168, 1, 42, 24), v6("fe80::36cf:f6ff:fe9a:1122", 64)],
        69699,
    )
}

pub fn tun0() -> NetworkInterface {
    ni(
        "tun0",
        5,
        None,
        &[v4(169, 254, 7, 7, 16), v6("fe80::c137:8964:5a63:efde", 64)],
        69841,
    )
}

pub fn docker0() -> NetworkInterface {
    ni(
        "docker0",
        7,
        Some(MacAddr::new(0x02, 0x42, 0xac, 0x11, 0x00, 0x01)),
        &[v4(172, 17, 0, 1, 16)],
        69699,
    )
}

pub fn veth1234() -> NetworkInterface {
    ni(
        "veth1234",
        8,
        Some(MacAddr::new(0x1a, 0x2b, 0x3c, 0x4d, 0x5e, 0x6f)),
        &[v6("fe80::1a2b:3cff:fe4d:5e6f", 64)],
        69699,
    )
}

pub fn virbr0() -> NetworkInterface {
    ni(
        "virbr0",
        9,
        Some(MacAddr::new(0x52, 0x54, 0x00, 0x12, 0x34, 0x56)),
        &[v4(192, 168, 122, 1, 24)],
        69699,
    )
}

/*************************************************************
                   Scripted platform adapters
**************************************************************/

pub struct StaticInterfaces(pub Vec<NetworkInterface>);

impl InterfaceSource for StaticInterfaces {
    fn interfaces(&self) -> io::Result<Vec<NetworkInterface>> {
        Ok(self.0.clone())
    }
}

pub struct BrokenInterfaces;

impl InterfaceSource for BrokenInterfaces {
    fn interfaces(&self) -> io::Result<Vec<NetworkInterface>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "getifaddrs denied"))
    }
}

/// Answers probes for a mutable set of addresses.
#[derive(Clone, Default)]
pub struct ScriptedProbe {
    reachable: Arc<Mutex<HashSet<IpAddr>>>,
}

impl ScriptedProbe {
    pub fn reaching(ips: &[&str]) -> Self {
        let probe = Self::default();
        probe.set(ips);
        probe
    }

    pub fn set(&self, ips: &[&str]) {
        let mut reachable = self.reachable.lock().unwrap();
        reachable.clear();
        reachable.extend(ips.iter().map(|s| ip(s)));
    }
}

#[async_trait]
impl ReachabilityProbe for ScriptedProbe {
    async fn is_reachable(&self, address: IpAddr, _limit: Duration) -> bool {
        self.reachable.lock().unwrap().contains(&address)
    }
}

/// A hosts-file style name service.
#[derive(Clone, Default)]
pub struct ScriptedNames {
    host: String,
    forward: HashMap<String, Vec<IpAddr>>,
    reverse: HashMap<IpAddr, String>,
}

impl ScriptedNames {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            ..Default::default()
        }
    }

    /// Registers `name` <-> `address` in both directions.
    pub fn entry(mut self, name: &str, address: &str) -> Self {
        self.forward.entry(name.to_string()).or_default().push(ip(address));
        self.reverse.insert(ip(address), name.to_string());
        self
    }

    /// Registers a forward-only alias.
    pub fn alias(mut self, name: &str, address: &str) -> Self {
        self.forward.entry(name.to_string()).or_default().push(ip(address));
        self
    }
}

#[async_trait]
impl NameService for ScriptedNames {
    async fn local_host_name(&self) -> io::Result<String> {
        Ok(self.host.clone())
    }

    async fn lookup_host(&self, name: &str) -> io::Result<Vec<IpAddr>> {
        self.forward
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("unknown host {name}")))
    }

    async fn lookup_addr(&self, address: IpAddr) -> io::Result<String> {
        self.reverse
            .get(&address)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no PTR for {address}")))
    }
}
