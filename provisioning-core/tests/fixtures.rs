use std::path::PathBuf;

use pretty_assertions::assert_eq;
use provisioning_core::{
    derive_parameter, load_images, load_provisioning, metal3_containers, metal3_init_containers,
    resolve_network_mode, validate_provisioning_spec, DeploymentKey, ProvisioningNetwork,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

const OS_URL: &str = "http://172.22.0.1/images/rhcos-44.81.202001171431.0-openstack.x86_64.qcow2.gz?sha256=e98f83a2b9d4043719664a2be75fe8134dc6ca1fdbde807996622f8cc7ecd234";

#[test]
fn all_fixtures_validate() {
    for name in [
        "fixtures/provisioning-managed.toml",
        "fixtures/provisioning-unmanaged.toml",
        "fixtures/provisioning-disabled.json",
        "fixtures/provisioning-disabled-ipv6.json",
        "fixtures/provisioning-legacy.toml",
    ] {
        let obj = load_provisioning(&fixture(name)).expect("fixture should load");
        assert_eq!(validate_provisioning_spec(&obj.spec), Ok(()), "{name}");
    }
}

#[test]
fn legacy_fixture_resolves_unmanaged() {
    let obj = load_provisioning(&fixture("fixtures/provisioning-legacy.toml")).expect("load");
    assert_eq!(resolve_network_mode(&obj.spec), ProvisioningNetwork::Unmanaged);
}

#[test]
fn managed_fixture_parameters() {
    let obj = load_provisioning(&fixture("fixtures/provisioning-managed.toml")).expect("load");
    let spec = &obj.spec;
    assert_eq!(
        derive_parameter(DeploymentKey::ProvisioningIp, spec).as_deref(),
        Some("172.30.20.3/24")
    );
    assert_eq!(
        derive_parameter(DeploymentKey::DhcpRange, spec).as_deref(),
        Some("172.30.20.11, 172.30.20.101")
    );
    assert_eq!(
        derive_parameter(DeploymentKey::MachineOsUrl, spec).as_deref(),
        Some(OS_URL)
    );
}

#[test]
fn unmanaged_fixture_interface() {
    let obj = load_provisioning(&fixture("fixtures/provisioning-unmanaged.toml")).expect("load");
    assert_eq!(
        derive_parameter(DeploymentKey::ProvisioningInterface, &obj.spec).as_deref(),
        Some("ensp0")
    );
}

#[test]
fn disabled_fixture_keeps_empty_interface() {
    let obj = load_provisioning(&fixture("fixtures/provisioning-disabled.json")).expect("load");
    assert_eq!(
        derive_parameter(DeploymentKey::ProvisioningInterface, &obj.spec).as_deref(),
        Some("")
    );
    assert_eq!(
        derive_parameter(DeploymentKey::MachineOsUrl, &obj.spec).as_deref(),
        Some(OS_URL)
    );
}

#[test]
fn ipv6_fixture_brackets_placeholder() {
    let obj =
        load_provisioning(&fixture("fixtures/provisioning-disabled-ipv6.json")).expect("load");
    assert_eq!(derive_parameter(DeploymentKey::ProvisioningIp, &obj.spec), None);
    assert_eq!(
        derive_parameter(DeploymentKey::DeployKernelUrl, &obj.spec).as_deref(),
        Some("http://[$(PROVISIONING_IP)]:6180/images/ironic-python-agent.kernel")
    );
}

#[test]
fn fixture_container_counts() {
    let images = load_images(&fixture("fixtures/images.toml")).expect("images");
    for (name, expected) in [
        ("fixtures/provisioning-managed.toml", 8),
        ("fixtures/provisioning-unmanaged.toml", 8),
        ("fixtures/provisioning-disabled.json", 7),
    ] {
        let obj = load_provisioning(&fixture(name)).expect("load");
        let containers = metal3_containers(&images, &obj.spec, "192.168.1.1");
        assert_eq!(containers.len(), expected, "{name}");
    }

    let managed = load_provisioning(&fixture("fixtures/provisioning-managed.toml")).expect("load");
    let init = metal3_init_containers(&images, &managed.spec, "192.168.1.1");
    assert_eq!(init.len(), 3);
}
