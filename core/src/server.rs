//! # Bound Port Extraction
//!
//! Servers started on port 0 get their port from the OS. [`BoundServer`] is
//! the one place that knows how to read it back from a server resource.

use std::io;
use std::net::SocketAddr;

use nodeaddr_common::error::IntrospectionError;
use tracing::error;

/// A server resource that is bound to a local socket.
pub trait BoundServer {
    fn bound_addr(&self) -> io::Result<SocketAddr>;

    fn local_port(&self) -> Result<u16, IntrospectionError> {
        self.bound_addr()
            .map(|addr| addr.port())
            .map_err(IntrospectionError::Unbound)
    }
}

impl BoundServer for std::net::TcpListener {
    fn bound_addr(&self) -> io::Result<SocketAddr> {
        self.local_addr()
    }
}

impl BoundServer for std::net::UdpSocket {
    fn bound_addr(&self) -> io::Result<SocketAddr> {
        self.local_addr()
    }
}

impl BoundServer for tokio::net::TcpListener {
    fn bound_addr(&self) -> io::Result<SocketAddr> {
        self.local_addr()
    }
}

impl BoundServer for tokio::net::UdpSocket {
    fn bound_addr(&self) -> io::Result<SocketAddr> {
        self.local_addr()
    }
}

/// Returns the port the OS assigned to `server`.
pub fn extract_bound_port<S: BoundServer + ?Sized>(server: &S) -> Result<u16, IntrospectionError> {
    server.local_port().inspect_err(|err| {
        error!(error = %err, "cannot read bound port of server resource");
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
