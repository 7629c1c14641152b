use colored::*;
use nodeaddr_core::network::interface::{
    self, InterfaceSource, REVERSE_INTERFACE_ORDER, SystemInterfaces,
};
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

use crate::terminal::{colors, print};

pub fn interfaces() -> anyhow::Result<()> {
    let found: Vec<NetworkInterface> = SystemInterfaces.interfaces()?;
    let ordered = interface::visit_order(found, REVERSE_INTERFACE_ORDER);

    for (idx, iface) in ordered.iter().enumerate() {
        print::tree_head(idx, &iface.name);
        print::as_tree_one_level(to_key_value_pair_net(&iface.ips));
    }
    Ok(())
}

/// Addresses that can never be selected are dimmed.
fn to_key_value_pair_net(ip_net: &[IpNetwork]) -> Vec<(String, ColoredString)> {
    ip_net
        .iter()
        .map(|ip_network| {
            let (key, color) = match ip_network {
                IpNetwork::V4(_) => ("IPv4", colors::IPV4_ADDR),
                IpNetwork::V6(_) => ("IPv6", colors::IPV6_ADDR),
            };
            let color = if interface::is_candidate_address(&ip_network.ip()) {
                color
            } else {
                colors::REJECTED
            };
            let value = format!("{}/{}", ip_network.ip(), ip_network.prefix()).color(color);
            (key.to_string(), value)
        })
        .collect()
}
