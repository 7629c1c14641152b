use anyhow::Context;
use nodeaddr_common::config::Configuration;
use nodeaddr_common::network::endpoint::parse_endpoint;
use nodeaddr_core::EndpointBuilder;

use crate::terminal::{colors, print};

pub async fn ip<C: Configuration>(builder: &EndpointBuilder<C>) -> anyhow::Result<()> {
    let ip = builder.local_ip().await.context("discovering local IP address")?;
    print::aligned_line("Local IP", ip, colors::IPV4_ADDR);
    Ok(())
}

pub async fn hostname<C: Configuration>(builder: &EndpointBuilder<C>) -> anyhow::Result<()> {
    let host = builder
        .local_host_name()
        .await
        .context("discovering local host name")?;
    print::aligned_line("Local host", host, colors::HOST);
    Ok(())
}

pub async fn resolve<C: Configuration>(builder: &EndpointBuilder<C>, name: &str) -> anyhow::Result<()> {
    let canonical = builder.resolver().resolve_host_name(Some(name)).await?;
    print::aligned_line(name, canonical, colors::HOST);
    Ok(())
}

pub async fn uri<C: Configuration>(builder: &EndpointBuilder<C>, uri: &str) -> anyhow::Result<()> {
    let resolved = builder.resolver().resolve_uri_host(uri).await?;
    print::aligned_line("URI", resolved, colors::HOST);
    Ok(())
}

pub fn parse(text: &str) -> anyhow::Result<()> {
    if let Some(endpoint) = parse_endpoint(Some(text))? {
        print::aligned_line("Host", endpoint.host(), colors::HOST);
        print::aligned_line("Port", endpoint.port(), colors::ACCENT);
    }
    Ok(())
}
