use colored::*;
use nodeaddr_common::config::Configuration;
use nodeaddr_common::network::role::Role;
use nodeaddr_core::EndpointBuilder;

use crate::terminal::{colors, print};

pub async fn endpoints<C: Configuration>(
    builder: &EndpointBuilder<C>,
    role: Option<Role>,
) -> anyhow::Result<()> {
    let roles: Vec<Role> = match role {
        Some(role) => vec![role],
        None => Role::ALL.to_vec(),
    };

    if roles.contains(&Role::Worker) {
        let host = builder.worker_connect_host().await?;
        print::aligned_line("worker host", host, colors::HOST);
    }

    for (idx, role) in roles.into_iter().enumerate() {
        let bind_host = builder.bind_host(role).await?;
        let bind = builder.bind_address(role).await?;
        let connect = builder.connect_address(role).await?;

        print::tree_head(idx, role.as_str());
        print::as_tree_one_level(vec![
            ("bind host".to_string(), bind_host.color(colors::HOST)),
            ("bind".to_string(), bind.to_string().color(colors::ACCENT)),
            ("connect".to_string(), connect.to_string().color(colors::ACCENT)),
        ]);
    }
    Ok(())
}
