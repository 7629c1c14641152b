pub mod config;
pub mod error;
pub mod network;

pub use config::{Configuration, Properties};
pub use error::{
    ConfigError, EndpointError, FormatError, IntrospectionError, ResolveError, UriError,
};
pub use network::endpoint::{Endpoint, NetAddress, parse_endpoint};
pub use network::role::Role;
