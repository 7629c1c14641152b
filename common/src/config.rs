//! # Configuration
//!
//! The resolver never owns configuration; it only reads it through the
//! [`Configuration`] trait. [`Properties`] is the layered store used by the
//! command line tool and by tests.

pub mod keys;

use std::fmt;
use std::fs;
use std::mem;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::Dict;
use figment::{Figment, Provider};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Environment variables with this prefix are mapped onto configuration keys.
pub const ENV_PREFIX: &str = "NODEADDR_";

/// Read access to a layered key/value configuration.
pub trait Configuration: Send + Sync {
    /// Returns the raw value stored for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Returns the integer stored for `key`, or `default` when the key is unset.
    fn get_int(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
            },
        }
    }

    /// Checks that `port` can be bound under this configuration.
    ///
    /// Port 0 (an OS-assigned port) is only accepted in test mode.
    fn assert_valid_port(&self, port: i64) -> Result<u16, ConfigError> {
        let port_u16 = port_in_range(port)?;
        if port_u16 == 0 && !self.get_bool(keys::TEST_MODE, false)? {
            return Err(ConfigError::InvalidPort {
                port,
                reason: "port 0 is only allowed in test mode",
            });
        }
        Ok(port_u16)
    }
}

/// Converts `port` to a socket port, checking only the numeric range.
pub fn port_in_range(port: i64) -> Result<u16, ConfigError> {
    u16::try_from(port).map_err(|_| ConfigError::InvalidPort {
        port,
        reason: "port must be between 0 and 65535",
    })
}

/// Layered configuration properties.
///
/// Every layer is merged over the previous ones: a TOML file, the
/// `NODEADDR_*` environment, then explicit values. Keys are dotted paths such
/// as `nodeaddr.master.bind.host`.
#[derive(Debug, Clone)]
pub struct Properties {
    figment: Figment,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            figment: Figment::new(),
        }
    }
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.layer(Serialized::default(key, value.into()));
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Merges every entry of `other` over `self`.
    pub fn merge(&mut self, other: Properties) {
        self.layer(other.figment);
    }

    /// Loads a TOML file. Dotted keys (`nodeaddr.master.port = 19998`) and
    /// tables are both accepted.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let figment = Figment::from(Toml::file(path));
        figment.extract::<Dict>().map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(Self { figment })
    }

    /// Collects `NODEADDR_*` variables from the process environment, so that
    /// `NODEADDR_MASTER_BIND_HOST` sets `nodeaddr.master.bind.host`.
    pub fn from_env() -> Self {
        let env = Env::prefixed(ENV_PREFIX)
            .split("_")
            .map(|key| format!("nodeaddr.{key}").into());
        Self {
            figment: Figment::from(env),
        }
    }

    fn layer(&mut self, provider: impl Provider) {
        let figment = mem::replace(&mut self.figment, Figment::new());
        self.figment = figment.merge(provider);
    }
}

impl Configuration for Properties {
    fn get(&self, key: &str) -> Option<String> {
        self.figment
            .extract_inner::<Scalar>(key)
            .ok()
            .map(|value| value.to_string())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.set(key.as_ref(), value);
        }
        props
    }
}

/// A leaf value, whatever type its provider parsed it as.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Uint(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => f.write_str(value),
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
