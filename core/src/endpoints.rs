//! # Endpoint Builder
//!
//! Turns configuration into the bind and connect endpoints of every role.
//!
//! Host binding on multihomed machines follows this order:
//! 1. the role's explicit bind host setting,
//! 2. the host name discovered by the [`AddressResolver`].

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use nodeaddr_common::config::{self, Configuration, keys};
use nodeaddr_common::error::{ConfigError, EndpointError};
use nodeaddr_common::network::endpoint::{Endpoint, UNSET_BIND_HOST, WILDCARD_HOST};
use nodeaddr_common::network::role::Role;
use tracing::debug;

use crate::resolver::AddressResolver;

pub struct EndpointBuilder<C> {
    conf: C,
    resolver: Arc<AddressResolver>,
}

impl<C: Configuration> EndpointBuilder<C> {
    pub fn new(conf: C, resolver: Arc<AddressResolver>) -> Self {
        Self { conf, resolver }
    }

    pub fn conf(&self) -> &C {
        &self.conf
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    /// Probe timeout for local address discovery.
    pub fn resolution_timeout(&self) -> Result<Duration, ConfigError> {
        let key = keys::HOST_RESOLUTION_TIMEOUT_MS;
        let millis = self
            .conf
            .get_int(key, keys::DEFAULT_HOST_RESOLUTION_TIMEOUT_MS as i64)?;
        let millis = u64::try_from(millis).map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: millis.to_string(),
        })?;
        Ok(Duration::from_millis(millis))
    }

    pub async fn local_host_name(&self) -> Result<String, EndpointError> {
        let timeout = self.resolution_timeout()?;
        Ok(self.resolver.local_host_name(timeout).await?)
    }

    pub async fn local_ip(&self) -> Result<IpAddr, EndpointError> {
        let timeout = self.resolution_timeout()?;
        Ok(self.resolver.local_ip(timeout).await?)
    }

    /// The value of `key`, or the local host name when it is unset.
    async fn configured_or_local(&self, key: &str) -> Result<String, EndpointError> {
        match self.conf.get(key) {
            Some(host) => Ok(host),
            None => self.local_host_name().await,
        }
    }

    /// Host name clients use for the master.
    pub async fn master_host_name(&self) -> Result<String, EndpointError> {
        self.configured_or_local(keys::MASTER_HOSTNAME).await
    }

    /// Host a server of `role` binds to. Wildcards are passed through.
    pub async fn bind_host(&self, role: Role) -> Result<String, EndpointError> {
        self.configured_or_local(role.bind_host_key()).await
    }

    fn port(&self, role: Role) -> Result<i64, ConfigError> {
        self.conf.get_int(role.port_key(), i64::from(role.default_port()))
    }

    fn valid_port(&self, role: Role) -> Result<u16, ConfigError> {
        self.conf.assert_valid_port(self.port(role)?)
    }

    /// Endpoint a server of `role` listens on. The port is validated first.
    pub async fn bind_address(&self, role: Role) -> Result<Endpoint, EndpointError> {
        let port = self.valid_port(role)?;
        let host = self.bind_host(role).await?;
        Ok(Endpoint::new(host, port))
    }

    /// Endpoint a client dials to reach `role`.
    ///
    /// A server bound to the wildcard host cannot be dialled there, so the
    /// master's host name (master roles) or the local host name (worker roles)
    /// takes its place. Worker data and web servers look at the worker's bind
    /// host, not their own.
    pub async fn connect_address(&self, role: Role) -> Result<Endpoint, EndpointError> {
        let bind_host = self.conf.get_or(role.wildcard_check_key(), UNSET_BIND_HOST);
        if bind_host != WILDCARD_HOST {
            return self.bind_address(role).await;
        }

        let port = self.valid_port(role)?;
        let host = if role.is_worker() {
            self.local_host_name().await?
        } else {
            self.master_host_name().await?
        };
        debug!(%role, %host, port, "substituted wildcard bind host");
        Ok(Endpoint::new(host, port))
    }

    /// Host name clients use to reach this worker. Unlike
    /// [`connect_address`](Self::connect_address) no port is read.
    pub async fn worker_connect_host(&self) -> Result<String, EndpointError> {
        let bind_host = self.conf.get_or(keys::WORKER_BIND_HOST, UNSET_BIND_HOST);
        if bind_host == WILDCARD_HOST {
            self.local_host_name().await
        } else {
            self.bind_host(Role::Worker).await
        }
    }

    /// Master host name paired with the master port.
    pub async fn master_address(&self) -> Result<Endpoint, EndpointError> {
        let port = config::port_in_range(self.port(Role::Master)?)?;
        let host = self.master_host_name().await?;
        Ok(Endpoint::new(host, port))
    }

    /// Local host name paired with the worker port.
    pub async fn worker_address(&self) -> Result<Endpoint, EndpointError> {
        let port = config::port_in_range(self.port(Role::Worker)?)?;
        let host = self.local_host_name().await?;
        Ok(Endpoint::new(host, port))
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
