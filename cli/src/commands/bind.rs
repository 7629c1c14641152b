use anyhow::Context;
use nodeaddr_common::config::Configuration;
use nodeaddr_common::network::endpoint::Endpoint;
use nodeaddr_common::network::role::Role;
use nodeaddr_core::{EndpointBuilder, extract_bound_port};
use tokio::net::TcpListener;

use crate::terminal::{colors, print};

pub async fn bind<C: Configuration>(builder: &EndpointBuilder<C>, role: Role) -> anyhow::Result<()> {
    let endpoint = builder.bind_address(role).await?;
    let listener = TcpListener::bind((endpoint.host(), endpoint.port()))
        .await
        .with_context(|| format!("binding {role} server to {endpoint}"))?;
    let port = extract_bound_port(&listener)?;
    let listening = Endpoint::from(listener.local_addr()?);

    print::aligned_line("Bound host", endpoint.host(), colors::HOST);
    print::aligned_line("Bound port", port, colors::ACCENT);
    print::aligned_line("Listening", listening, colors::IPV4_ADDR);
    Ok(())
}
