pub mod bind;
pub mod endpoints;
pub mod interfaces;
pub mod resolve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nodeaddr_common::config::{Properties, keys};
use nodeaddr_common::network::role::Role;

#[derive(Parser)]
#[command(name = "nodeaddr")]
#[command(about = "Shows the network identity this host advertises to its cluster.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML configuration file with dotted keys
    #[arg(long, global = true)]
    pub conf_file: Option<PathBuf>,

    /// Overrides a configuration key, e.g. `--conf nodeaddr.master.port=7000`
    #[arg(long = "conf", value_name = "KEY=VALUE", value_parser = parse_key_value, global = true)]
    pub overrides: Vec<(String, String)>,

    /// Reachability probe timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Print debug output (-vv for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the IP address this host advertises
    Ip,
    /// Show the host name this host advertises
    #[command(alias = "host")]
    Hostname,
    /// Resolve a host name or alias to its canonical name
    #[command(alias = "r")]
    Resolve { name: String },
    /// Replace the host inside a URI by its canonical name
    Uri { uri: String },
    /// Parse a host:port endpoint
    Parse { endpoint: String },
    /// Show bind and connect endpoints
    #[command(alias = "e")]
    Endpoints {
        #[arg(long)]
        role: Option<Role>,
    },
    /// List network interfaces in the order they are probed
    #[command(alias = "i")]
    Interfaces,
    /// Bind the server socket of a role and report its port
    Bind { role: Role },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layers the configuration file, the environment and the command line,
    /// later layers overriding earlier ones.
    pub fn load_config(&self) -> anyhow::Result<Properties> {
        let mut conf = match &self.conf_file {
            Some(path) => Properties::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => Properties::new(),
        };
        conf.merge(Properties::from_env());
        conf.merge(self.overrides.iter().cloned().collect());
        if let Some(timeout_ms) = self.timeout_ms {
            conf.set(keys::HOST_RESOLUTION_TIMEOUT_MS, timeout_ms.to_string());
        }
        Ok(conf)
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {s}"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in {s}"));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}
