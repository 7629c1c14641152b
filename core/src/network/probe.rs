//! # Reachability Probing
//!
//! A best-effort check that some host answers at all. The probe opens a TCP
//! connection to the echo port: an accepted or refused connection both prove
//! that the address is alive, while silence until the deadline does not.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

const ECHO_PORT: u16 = 7;

#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns whether `address` answered within `limit`. Never fails.
    async fn is_reachable(&self, address: IpAddr, limit: Duration) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct TcpEchoProbe {
    port: u16,
}

impl TcpEchoProbe {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

impl Default for TcpEchoProbe {
    fn default() -> Self {
        Self::new(ECHO_PORT)
    }
}

#[async_trait]
impl ReachabilityProbe for TcpEchoProbe {
    async fn is_reachable(&self, address: IpAddr, limit: Duration) -> bool {
        let socket_addr: SocketAddr = SocketAddr::new(address, self.port);

        match timeout(limit, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) if err.kind() == io::ErrorKind::ConnectionRefused => true,
            Ok(Err(err)) => {
                trace!(%address, error = %err, "probe failed");
                false
            }
            Err(_elapsed) => {
                trace!(%address, "probe timed out");
                false
            }
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
