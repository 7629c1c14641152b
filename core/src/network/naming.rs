//! # Name Service
//!
//! Forward and reverse lookups go through the platform resolver
//! (`getaddrinfo`/`getnameinfo`), so `/etc/hosts` aliases and search domains
//! behave exactly like they do for every other program on the host. The
//! platform resolver bounds its own lookup time.

use std::io;
use std::net::IpAddr;

use async_trait::async_trait;

#[async_trait]
pub trait NameService: Send + Sync {
    /// The name this machine calls itself, unresolved.
    async fn local_host_name(&self) -> io::Result<String>;

    /// Forward lookup. An empty result is reported as an error.
    async fn lookup_host(&self, name: &str) -> io::Result<Vec<IpAddr>>;

    /// Reverse lookup of the canonical name of `address`.
    async fn lookup_addr(&self, address: IpAddr) -> io::Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNameService;

#[async_trait]
impl NameService for SystemNameService {
    async fn local_host_name(&self) -> io::Result<String> {
        hostname::get()?.into_string().map_err(|raw| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("host name {raw:?} is not valid UTF-8"),
            )
        })
    }

    async fn lookup_host(&self, name: &str) -> io::Result<Vec<IpAddr>> {
        let name = name.to_string();
        let addresses: Vec<IpAddr> = blocking(move || {
            dns_lookup::lookup_host(&name).map(|found| found.into_iter().collect())
        })
        .await?;
        if addresses.is_empty() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no addresses found"));
        }
        Ok(addresses)
    }

    async fn lookup_addr(&self, address: IpAddr) -> io::Result<String> {
        blocking(move || dns_lookup::lookup_addr(&address)).await
    }
}

async fn blocking<T, F>(lookup: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(lookup)
        .await
        .map_err(io::Error::other)?
}

/// Picks the address a forward lookup stands for: the first IPv4 result,
/// otherwise whatever came first.
pub fn preferred_address(addresses: &[IpAddr]) -> Option<IpAddr> {
    addresses
        .iter()
        .find(|address| address.is_ipv4())
        .or_else(|| addresses.first())
        .copied()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
