//! # Local Address Resolution
//!
//! Works out which IP address and host name this process advertises to the
//! rest of the cluster when nothing is configured explicitly.
//!
//! Discovery runs at most once per [`AddressResolver`]:
//! 1. The address the machine's own host name resolves to is used when it is
//!    an IPv4 address that is neither unspecified nor loopback and that
//!    answers a reachability probe.
//! 2. Otherwise every interface address is visited (see
//!    [`interface::visit_order`]) and the first reachable IPv4 address that
//!    is neither loopback nor link-local wins.
//! 3. If nothing qualifies, the default address from step 1 is returned
//!    anyway and a warning is logged.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use nodeaddr_common::error::{FormatError, ResolveError, UriError};
use nodeaddr_common::network::endpoint::NetAddress;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::network::interface::{
    self, InterfaceSource, REVERSE_INTERFACE_ORDER, SystemInterfaces,
};
use crate::network::naming::{self, NameService, SystemNameService};
use crate::network::probe::{ReachabilityProbe, TcpEchoProbe};

pub struct AddressResolver {
    interfaces: Arc<dyn InterfaceSource>,
    probe: Arc<dyn ReachabilityProbe>,
    names: Arc<dyn NameService>,
    reverse_interfaces: bool,
    local_ip: OnceCell<IpAddr>,
    local_host: OnceCell<String>,
}

impl AddressResolver {
    /// A resolver backed by the operating system.
    pub fn system() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> AddressResolverBuilder {
        AddressResolverBuilder::default()
    }

    /// Returns the IP address this host advertises.
    ///
    /// The first successful call caches its result; later calls return it
    /// without any I/O, whatever `timeout` they pass. Concurrent first calls
    /// share a single discovery.
    pub async fn local_ip(&self, timeout: Duration) -> Result<IpAddr, ResolveError> {
        self.local_ip
            .get_or_try_init(|| self.discover_local_ip(timeout))
            .await
            .copied()
    }

    /// Returns the canonical name of [`local_ip`](Self::local_ip), cached the
    /// same way. A failing reverse lookup is returned, not papered over.
    pub async fn local_host_name(&self, timeout: Duration) -> Result<String, ResolveError> {
        self.local_host
            .get_or_try_init(|| async {
                let address = self.local_ip(timeout).await?;
                let name = self.names.lookup_addr(address).await.map_err(|source| {
                    error!(%address, error = %source, "reverse lookup of local address failed");
                    ResolveError::name_resolution(address.to_string(), source)
                })?;
                info!(%address, host = %name, "resolved local host name");
                Ok::<String, ResolveError>(name)
            })
            .await
            .cloned()
    }

    pub fn cached_ip(&self) -> Option<IpAddr> {
        self.local_ip.get().copied()
    }

    pub fn cached_host_name(&self) -> Option<&str> {
        self.local_host.get().map(String::as_str)
    }

    /// Forgets both cached values so the next call discovers them again.
    pub fn reset(&mut self) {
        self.local_ip.take();
        self.local_host.take();
    }

    async fn discover_local_ip(&self, timeout: Duration) -> Result<IpAddr, ResolveError> {
        let default = self.default_address().await?;
        debug!(
            address = %default,
            loopback = default.is_loopback(),
            "checking default local address"
        );

        if interface::is_usable_default(&default) && self.probe.is_reachable(default, timeout).await {
            info!(address = %default, "using default local address");
            return Ok(default);
        }

        let interfaces = self.interfaces.interfaces().map_err(|source| {
            error!(error = %source, "failed to enumerate network interfaces");
            ResolveError::InterfaceEnumeration(source)
        })?;
        let ordered = interface::visit_order(interfaces, self.reverse_interfaces);

        if let Some(candidate) =
            interface::select_candidate(&ordered, self.probe.as_ref(), timeout).await
        {
            info!(
                interface = %candidate.interface,
                address = %candidate.address,
                "using interface address"
            );
            return Ok(candidate.address);
        }

        warn!(
            "Your host name resolves to a loopback or unreachable address {default}, \
             but no external IP address was found"
        );
        Ok(default)
    }

    /// The address the machine's own host name resolves to.
    async fn default_address(&self) -> Result<IpAddr, ResolveError> {
        let host = self
            .names
            .local_host_name()
            .await
            .map_err(ResolveError::DefaultAddress)?;
        let addresses = self
            .names
            .lookup_host(&host)
            .await
            .map_err(ResolveError::DefaultAddress)?;
        naming::preferred_address(&addresses).ok_or_else(|| {
            ResolveError::DefaultAddress(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("host name {host} has no addresses"),
            ))
        })
    }

    /// Replaces a possibly aliased host name by its canonical form.
    ///
    /// An empty or missing name yields an empty string. The result is not
    /// cached. When the reverse lookup fails the address text is returned.
    pub async fn resolve_host_name(&self, name: Option<&str>) -> Result<String, ResolveError> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(String::new()),
        };

        let addresses = self
            .names
            .lookup_host(name)
            .await
            .map_err(|source| ResolveError::name_resolution(name, source))?;
        let address = naming::preferred_address(&addresses).ok_or_else(|| {
            ResolveError::name_resolution(
                name,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"),
            )
        })?;

        match self.names.lookup_addr(address).await {
            Ok(canonical) => Ok(canonical),
            Err(err) => {
                debug!(%address, error = %err, "no canonical name, using address");
                Ok(address.to_string())
            }
        }
    }

    /// Rewrites the host of `uri` to its canonical name.
    ///
    /// Only URIs whose authority names an explicit port are rewritten; the
    /// rest of the text is kept as written. URIs without an authority or
    /// without a port (`file:///dir`, `/dir`, `hdfs://alias/dir`) are
    /// returned unchanged.
    pub async fn resolve_uri_host(&self, uri: &str) -> Result<String, UriError> {
        match Url::parse(uri) {
            Ok(url) if url.has_host() => {}
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => return Ok(uri.to_string()),
            Err(err) => {
                return Err(FormatError::InvalidUri {
                    uri: uri.to_string(),
                    reason: err.to_string(),
                }
                .into());
            }
        }

        let span = match host_with_explicit_port(uri) {
            Some(span) => span,
            None => return Ok(uri.to_string()),
        };
        let host = uri[span.clone()].trim_start_matches('[').trim_end_matches(']');
        let canonical = self.resolve_host_name(Some(host)).await?;
        let canonical = match canonical.parse::<Ipv6Addr>() {
            Ok(_) => format!("[{canonical}]"),
            Err(_) => canonical,
        };
        Ok(format!("{}{}{}", &uri[..span.start], canonical, &uri[span.end..]))
    }

    /// Canonical name of the host behind a socket address, or its address
    /// text when there is no reverse record.
    pub async fn fqdn_host(&self, addr: SocketAddr) -> String {
        let address = addr.ip();
        match self.names.lookup_addr(address).await {
            Ok(canonical) => canonical,
            Err(err) => {
                debug!(%address, error = %err, "no canonical name, using address");
                address.to_string()
            }
        }
    }

    /// Canonical name of the host of a worker's cluster address.
    pub async fn fqdn_net_address(&self, addr: &NetAddress) -> Result<String, ResolveError> {
        self.resolve_host_name(Some(&addr.host)).await
    }
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::system()
    }
}

/// Byte range of the host in `uri` when its authority carries a port.
fn host_with_explicit_port(uri: &str) -> Option<Range<usize>> {
    let start = uri.find("://")? + 3;
    let end = uri[start..].find(['/', '?', '#']).map_or(uri.len(), |i| start + i);
    let authority = &uri[start..end];
    let host_start = authority.rfind('@').map_or(0, |i| i + 1);
    let host_port = &authority[host_start..];
    let host_end = if host_port.starts_with('[') {
        host_port.find(']')? + 1
    } else {
        host_port.rfind(':')?
    };
    let port = host_port[host_end..].strip_prefix(':')?;
    if host_end == 0 || port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let host_start = start + host_start;
    Some(host_start..host_start + host_end)
}

/// Wires an [`AddressResolver`] to custom platform adapters.
pub struct AddressResolverBuilder {
    interfaces: Arc<dyn InterfaceSource>,
    probe: Arc<dyn ReachabilityProbe>,
    names: Arc<dyn NameService>,
    reverse_interfaces: bool,
}

impl Default for AddressResolverBuilder {
    fn default() -> Self {
        Self {
            interfaces: Arc::new(SystemInterfaces),
            probe: Arc::new(TcpEchoProbe::default()),
            names: Arc::new(SystemNameService),
            reverse_interfaces: REVERSE_INTERFACE_ORDER,
        }
    }
}

impl AddressResolverBuilder {
    pub fn interfaces(mut self, interfaces: impl InterfaceSource + 'static) -> Self {
        self.interfaces = Arc::new(interfaces);
        self
    }

    pub fn probe(mut self, probe: impl ReachabilityProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    pub fn names(mut self, names: impl NameService + 'static) -> Self {
        self.names = Arc::new(names);
        self
    }

    /// Overrides the platform default for walking interfaces backwards.
    pub fn reverse_interfaces(mut self, reverse: bool) -> Self {
        self.reverse_interfaces = reverse;
        self
    }

    pub fn build(self) -> AddressResolver {
        AddressResolver {
            interfaces: self.interfaces,
            probe: self.probe,
            names: self.names,
            reverse_interfaces: self.reverse_interfaces,
            local_ip: OnceCell::new(),
            local_host: OnceCell::new(),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
