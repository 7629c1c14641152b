use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use nodeaddr_common::config::{Configuration, Properties, keys};
use nodeaddr_common::{ConfigError, Endpoint, EndpointError, Role, parse_endpoint};
use nodeaddr_core::{AddressResolver, EndpointBuilder, extract_bound_port};
use nodeaddr_integration_tests::*;

fn node7() -> Arc<AddressResolver> {
    Arc::new(
        AddressResolver::builder()
            .names(ScriptedNames::new("node7").entry("node7", "10.0.0.7"))
            .probe(ScriptedProbe::reaching(&["10.0.0.7"]))
            .interfaces(StaticInterfaces(Vec::new()))
            .build(),
    )
}

#[tokio::test]
async fn every_role_connects_via_local_host_when_all_bind_to_wildcard() {
    let conf = Properties::new()
        .with(keys::MASTER_BIND_HOST, "0.0.0.0")
        .with(keys::MASTER_WEB_BIND_HOST, "0.0.0.0")
        .with(keys::WORKER_BIND_HOST, "0.0.0.0")
        .with(keys::WORKER_DATA_BIND_HOST, "0.0.0.0")
        .with(keys::WORKER_WEB_BIND_HOST, "0.0.0.0");
    let builder = EndpointBuilder::new(conf, node7());

    for role in Role::ALL {
        let bind = builder.bind_address(role).await.unwrap();
        let connect = builder.connect_address(role).await.unwrap();
        assert!(bind.is_wildcard(), "{role} should bind to the wildcard host");
        assert_eq!(connect, Endpoint::new("node7", role.default_port()));
    }
}

#[tokio::test]
async fn unconfigured_roles_bind_to_local_host() {
    let builder = EndpointBuilder::new(Properties::new(), node7());
    for role in Role::ALL {
        let bind = builder.bind_address(role).await.unwrap();
        assert_eq!(bind, Endpoint::new("node7", role.default_port()));
        assert_eq!(builder.connect_address(role).await.unwrap(), bind);
    }
}

#[tokio::test]
async fn config_file_feeds_the_builder() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "nodeaddr.master.bind.host = \"0.0.0.0\"").unwrap();
    writeln!(file, "nodeaddr.master.port = 5000").unwrap();
    writeln!(file, "nodeaddr.worker.port = 70000").unwrap();

    let conf = Properties::load(file.path()).unwrap();
    let builder = EndpointBuilder::new(conf, node7());

    assert_eq!(
        builder.connect_address(Role::Master).await.unwrap(),
        Endpoint::new("node7", 5000)
    );
    assert_eq!(
        builder.bind_address(Role::Master).await.unwrap(),
        Endpoint::new("0.0.0.0", 5000)
    );
    assert!(matches!(
        builder.bind_address(Role::Worker).await,
        Err(EndpointError::Config(ConfigError::InvalidPort { port: 70000, .. }))
    ));
}

#[tokio::test]
async fn bound_port_is_reported_for_os_assigned_port() {
    let conf = Properties::new()
        .with(keys::TEST_MODE, "true")
        .with(keys::WORKER_DATA_BIND_HOST, "127.0.0.1")
        .with(keys::WORKER_DATA_PORT, "0");
    let builder = EndpointBuilder::new(conf, node7());

    let endpoint = builder.bind_address(Role::WorkerData).await.unwrap();
    let listener = tokio::net::TcpListener::bind((endpoint.host(), endpoint.port()))
        .await
        .unwrap();
    let port = extract_bound_port(&listener).unwrap();
    assert_ne!(port, 0);

    let advertised = parse_endpoint(Some(&format!("{}:{}", endpoint.host(), port)))
        .unwrap()
        .unwrap();
    assert_eq!(advertised.port(), port);
}

#[test]
fn configured_timeout_bounds_probing() {
    let conf = Properties::new().with(keys::HOST_RESOLUTION_TIMEOUT_MS, "1500");
    assert_eq!(conf.get_int(keys::HOST_RESOLUTION_TIMEOUT_MS, 0).unwrap(), 1500);
    let builder = EndpointBuilder::new(conf, node7());
    assert_eq!(builder.resolution_timeout().unwrap(), Duration::from_millis(1500));
}
