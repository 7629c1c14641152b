//! Recognized configuration keys and their compiled-in defaults.

pub const MASTER_HOSTNAME: &str = "nodeaddr.master.hostname";
pub const MASTER_BIND_HOST: &str = "nodeaddr.master.bind.host";
pub const MASTER_PORT: &str = "nodeaddr.master.port";
pub const MASTER_WEB_BIND_HOST: &str = "nodeaddr.master.web.bind.host";
pub const MASTER_WEB_PORT: &str = "nodeaddr.master.web.port";

pub const WORKER_BIND_HOST: &str = "nodeaddr.worker.bind.host";
pub const WORKER_PORT: &str = "nodeaddr.worker.port";
pub const WORKER_DATA_BIND_HOST: &str = "nodeaddr.worker.data.bind.host";
pub const WORKER_DATA_PORT: &str = "nodeaddr.worker.data.port";
pub const WORKER_WEB_BIND_HOST: &str = "nodeaddr.worker.web.bind.host";
pub const WORKER_WEB_PORT: &str = "nodeaddr.worker.web.port";

/// Milliseconds a reachability probe may take during local address discovery.
pub const HOST_RESOLUTION_TIMEOUT_MS: &str = "nodeaddr.host.resolution.timeout.ms";
pub const TEST_MODE: &str = "nodeaddr.test.mode";

pub const DEFAULT_MASTER_PORT: u16 = 19998;
pub const DEFAULT_MASTER_WEB_PORT: u16 = 19999;
pub const DEFAULT_WORKER_PORT: u16 = 29998;
pub const DEFAULT_WORKER_DATA_PORT: u16 = 29999;
pub const DEFAULT_WORKER_WEB_PORT: u16 = 30000;
pub const DEFAULT_HOST_RESOLUTION_TIMEOUT_MS: u64 = 5000;
