//! # Error Taxonomy
//!
//! One error type per failure family, so a caller can tell a degraded
//! result apart from a fatal one by looking at the type alone.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of local address discovery and host name resolution.
///
/// A reachability probe that times out is never reported here: it only
/// disqualifies the probed candidate.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Forward or reverse lookup failed for an explicit host name or address.
    #[error("cannot resolve host '{host}': {source}")]
    NameResolution {
        host: String,
        #[source]
        source: io::Error,
    },
    /// The platform could not produce its default local address.
    #[error("cannot determine the default local address: {0}")]
    DefaultAddress(#[source] io::Error),
    /// Walking the network interfaces of this host failed.
    #[error("failed to enumerate network interfaces: {0}")]
    InterfaceEnumeration(#[source] io::Error),
}

impl ResolveError {
    pub fn name_resolution(host: impl Into<String>, source: io::Error) -> Self {
        Self::NameResolution {
            host: host.into(),
            source,
        }
    }
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port {port}: {reason}")]
    InvalidPort { port: i64, reason: &'static str },
    #[error("invalid value '{value}' for key '{key}'")]
    InvalidValue { key: String, value: String },
    #[error("cannot read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },
}

/// Malformed textual input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid endpoint '{0}', expected host:port")]
    InvalidEndpoint(String),
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    #[error("invalid uri '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },
}

/// The bound port of a server resource could not be read.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("server resource is not bound to a local socket: {0}")]
    Unbound(#[source] io::Error),
}

/// Anything the endpoint builder can fail with.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Anything host substitution inside a URI can fail with.
#[derive(Debug, Error)]
pub enum UriError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
