//! # Service Roles
//!
//! Every process of the cluster plays one or more roles, and each role has
//! its own bind host and port settings.

use std::fmt;
use std::str::FromStr;

use crate::config::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Master,
    MasterWeb,
    Worker,
    WorkerData,
    WorkerWeb,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Master,
        Role::MasterWeb,
        Role::Worker,
        Role::WorkerData,
        Role::WorkerWeb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Master => "master",
            Role::MasterWeb => "master-web",
            Role::Worker => "worker",
            Role::WorkerData => "worker-data",
            Role::WorkerWeb => "worker-web",
        }
    }

    /// Key holding the explicit bind host override of this role.
    pub fn bind_host_key(self) -> &'static str {
        match self {
            Role::Master => keys::MASTER_BIND_HOST,
            Role::MasterWeb => keys::MASTER_WEB_BIND_HOST,
            Role::Worker => keys::WORKER_BIND_HOST,
            Role::WorkerData => keys::WORKER_DATA_BIND_HOST,
            Role::WorkerWeb => keys::WORKER_WEB_BIND_HOST,
        }
    }

    pub fn port_key(self) -> &'static str {
        match self {
            Role::Master => keys::MASTER_PORT,
            Role::MasterWeb => keys::MASTER_WEB_PORT,
            Role::Worker => keys::WORKER_PORT,
            Role::WorkerData => keys::WORKER_DATA_PORT,
            Role::WorkerWeb => keys::WORKER_WEB_PORT,
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Role::Master => keys::DEFAULT_MASTER_PORT,
            Role::MasterWeb => keys::DEFAULT_MASTER_WEB_PORT,
            Role::Worker => keys::DEFAULT_WORKER_PORT,
            Role::WorkerData => keys::DEFAULT_WORKER_DATA_PORT,
            Role::WorkerWeb => keys::DEFAULT_WORKER_WEB_PORT,
        }
    }

    /// Key compared against the wildcard host when building a connect address.
    ///
    /// The data and web servers of a worker follow the worker's own bind host,
    /// not their dedicated bind host keys.
    pub fn wildcard_check_key(self) -> &'static str {
        match self {
            Role::Master => keys::MASTER_BIND_HOST,
            Role::MasterWeb => keys::MASTER_WEB_BIND_HOST,
            Role::Worker | Role::WorkerData | Role::WorkerWeb => keys::WORKER_BIND_HOST,
        }
    }

    pub fn is_worker(self) -> bool {
        matches!(self, Role::Worker | Role::WorkerData | Role::WorkerWeb)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase().replace('_', "-");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == lower)
            .ok_or_else(|| format!("unknown role: {s}"))
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
