use std::time::Duration;

use nodeaddr_common::ResolveError;
use nodeaddr_core::AddressResolver;
use nodeaddr_integration_tests::*;

const TIMEOUT: Duration = Duration::from_millis(20);

/// node7 resolves to the Debian-style 127.0.1.1 entry of /etc/hosts.
fn loopback_names() -> ScriptedNames {
    ScriptedNames::new("node7")
        .entry("node7", "127.0.1.1")
        .entry("node7.cluster.local", "192.168.0.32")
}

fn resolver(probe: ScriptedProbe, reverse: bool) -> AddressResolver {
    AddressResolver::builder()
        .names(loopback_names())
        .probe(probe)
        .interfaces(StaticInterfaces(iface_all()))
        .reverse_interfaces(reverse)
        .build()
}

#[tokio::test]
async fn reversed_walk_prefers_late_interfaces() {
    let probe = ScriptedProbe::reaching(&["192.168.0.32", "192.168.1.42", "172.17.0.1", "192.168.122.1"]);
    let resolver = resolver(probe, true);
    assert_eq!(resolver.local_ip(TIMEOUT).await.unwrap(), ip("192.168.122.1"));
}

#[tokio::test]
async fn natural_walk_prefers_early_interfaces() {
    let probe = ScriptedProbe::reaching(&["192.168.0.32", "192.168.1.42", "172.17.0.1", "192.168.122.1"]);
    let resolver = resolver(probe, false);
    assert_eq!(resolver.local_ip(TIMEOUT).await.unwrap(), ip("192.168.0.32"));
}

#[tokio::test]
async fn never_selects_loopback_or_link_local_when_alternative_exists() {
    let probe = ScriptedProbe::reaching(&["127.0.0.1", "169.254.7.7", "192.168.1.42"]);
    for reverse in [true, false] {
        let selected = resolver(probe.clone(), reverse).local_ip(TIMEOUT).await.unwrap();
        assert_eq!(selected, ip("192.168.1.42"), "reverse = {reverse}");
    }
}

#[tokio::test]
async fn degrades_to_default_address_when_nothing_is_reachable() {
    let resolver = resolver(ScriptedProbe::default(), true);
    assert_eq!(resolver.local_ip(TIMEOUT).await.unwrap(), ip("127.0.1.1"));
}

#[tokio::test]
async fn enumeration_failure_is_fatal() {
    let resolver = AddressResolver::builder()
        .names(loopback_names())
        .probe(ScriptedProbe::reaching(&["192.168.0.32"]))
        .interfaces(BrokenInterfaces)
        .build();
    assert!(matches!(
        resolver.local_ip(TIMEOUT).await,
        Err(ResolveError::InterfaceEnumeration(_))
    ));
}

#[tokio::test]
async fn repeated_calls_return_the_first_answer() {
    let probe = ScriptedProbe::reaching(&["192.168.0.32"]);
    let resolver = resolver(probe.clone(), true);

    let ip_before = resolver.local_ip(TIMEOUT).await.unwrap();
    let host_before = resolver.local_host_name(TIMEOUT).await.unwrap();
    assert_eq!(ip_before, ip("192.168.0.32"));
    assert_eq!(host_before, "node7.cluster.local");

    probe.set(&["192.168.1.42"]);
    for _ in 0..3 {
        assert_eq!(resolver.local_ip(TIMEOUT).await.unwrap(), ip_before);
        assert_eq!(resolver.local_host_name(TIMEOUT).await.unwrap(), host_before);
    }
}

#[tokio::test]
async fn resolve_host_name_never_returns_empty_for_known_names() {
    let names = loopback_names().alias("storage", "192.168.0.32");
    let resolver = AddressResolver::builder().names(names).build();

    for name in ["node7", "storage", "node7.cluster.local"] {
        let canonical = resolver.resolve_host_name(Some(name)).await.unwrap();
        assert!(!canonical.is_empty(), "{name} resolved to an empty name");
    }
    assert_eq!(
        resolver.resolve_host_name(Some("storage")).await.unwrap(),
        "node7.cluster.local"
    );
    assert_eq!(resolver.resolve_host_name(Some("")).await.unwrap(), "");
}
