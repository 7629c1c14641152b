//! # Endpoints
//!
//! A host/port pair naming where a service listens or where a client dials.
//! Endpoints are plain values: the host is kept as text and only resolved by
//! the transport when it actually opens a socket.

use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;
use std::vec;

use crate::error::FormatError;

/// Bind host meaning "all interfaces". Never a valid connect host.
pub const WILDCARD_HOST: &str = "0.0.0.0";

/// Assumed bind host when none is configured while checking for the wildcard.
pub const UNSET_BIND_HOST: &str = "localhost";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_wildcard(&self) -> bool {
        self.host == WILDCARD_HOST
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = FormatError;

    /// Parses `host:port`. Bracketed IPv6 literals are not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        let [host, port] = fields.as_slice() else {
            return Err(FormatError::InvalidEndpoint(s.to_string()));
        };
        let port: u16 = port
            .parse()
            .map_err(|_| FormatError::InvalidPort(port.to_string()))?;
        Ok(Endpoint::new(*host, port))
    }
}

impl ToSocketAddrs for Endpoint {
    type Iter = vec::IntoIter<SocketAddr>;

    fn to_socket_addrs(&self) -> io::Result<Self::Iter> {
        (self.host.as_str(), self.port).to_socket_addrs()
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Endpoint::new(addr.ip().to_string(), addr.port())
    }
}

/// Parses an optional `host:port` string. `None` is not an error.
pub fn parse_endpoint(text: Option<&str>) -> Result<Option<Endpoint>, FormatError> {
    text.map(str::parse).transpose()
}

/// Address of a worker as exchanged between cluster members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetAddress {
    pub host: String,
    pub rpc_port: u16,
    pub data_port: u16,
}

impl NetAddress {
    pub fn new(host: impl Into<String>, rpc_port: u16, data_port: u16) -> Self {
        Self {
            host: host.into(),
            rpc_port,
            data_port,
        }
    }

    pub fn rpc_endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.rpc_port)
    }

    pub fn data_endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.data_port)
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
