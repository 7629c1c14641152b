//! Network identity of a cluster process: which address and host name it
//! advertises, and which endpoints its servers bind to and are reached at.

pub mod endpoints;
pub mod network;
pub mod resolver;
pub mod server;

pub use endpoints::EndpointBuilder;
pub use resolver::{AddressResolver, AddressResolverBuilder};
pub use server::{BoundServer, extract_bound_port};
