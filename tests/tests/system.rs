//! Runs against the real network stack of the machine.

use std::time::Duration;

use nodeaddr_core::AddressResolver;

#[tokio::test]
#[ignore]
async fn system_resolver_finds_a_stable_address() {
    let resolver = AddressResolver::system();
    let first = resolver.local_ip(Duration::from_millis(500)).await.unwrap();
    let second = resolver.local_ip(Duration::from_millis(1)).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore]
async fn system_resolver_canonicalizes_localhost() {
    let resolver = AddressResolver::system();
    let name = resolver.resolve_host_name(Some("localhost")).await.unwrap();
    assert!(!name.is_empty());
}

#[tokio::test]
async fn system_resolver_leaves_path_uris_alone() {
    let resolver = AddressResolver::system();
    assert_eq!(resolver.resolve_uri_host("file:///dir").await.unwrap(), "file:///dir");
}
