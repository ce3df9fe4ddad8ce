//! Deployment parameters derived from a validated provisioning spec.
//!
//! Derivation never fails. Values that cannot be computed here are reported
//! as absent, and the deployment fills them in later (for example the
//! provisioning IP when the provisioning network is disabled).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use ipnet::IpNet;
use serde::Serialize;
use thiserror::Error;

use crate::constants::{
    HOST_IP_FIELD_PATH, HTTP_PORT, IRONIC_ENDPOINT_SUBPATH, IRONIC_INSPECTOR_PORT, IRONIC_PORT,
    KERNEL_URL_SUBPATH, PROVISIONING_IP_PLACEHOLDER, RAMDISK_URL_SUBPATH,
};
use crate::mode::resolve_network_mode;
use crate::spec::{ProvisioningNetwork, ProvisioningSpec};

/// A parameter handed to the deployment as an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentKey {
    ProvisioningIp,
    ProvisioningInterface,
    DeployKernelUrl,
    DeployRamdiskUrl,
    IronicEndpoint,
    IronicInspectorEndpoint,
    HttpPort,
    DhcpRange,
    MachineOsUrl,
}

impl DeploymentKey {
    pub const ALL: [DeploymentKey; 9] = [
        DeploymentKey::ProvisioningIp,
        DeploymentKey::ProvisioningInterface,
        DeploymentKey::DeployKernelUrl,
        DeploymentKey::DeployRamdiskUrl,
        DeploymentKey::IronicEndpoint,
        DeploymentKey::IronicInspectorEndpoint,
        DeploymentKey::HttpPort,
        DeploymentKey::DhcpRange,
        DeploymentKey::MachineOsUrl,
    ];

    /// Environment variable name the deployment reads this parameter from.
    pub fn env_name(self) -> &'static str {
        match self {
            DeploymentKey::ProvisioningIp => "PROVISIONING_IP",
            DeploymentKey::ProvisioningInterface => "PROVISIONING_INTERFACE",
            DeploymentKey::DeployKernelUrl => "DEPLOY_KERNEL_URL",
            DeploymentKey::DeployRamdiskUrl => "DEPLOY_RAMDISK_URL",
            DeploymentKey::IronicEndpoint => "IRONIC_ENDPOINT",
            DeploymentKey::IronicInspectorEndpoint => "IRONIC_INSPECTOR_ENDPOINT",
            DeploymentKey::HttpPort => "HTTP_PORT",
            DeploymentKey::DhcpRange => "DHCP_RANGE",
            DeploymentKey::MachineOsUrl => "RHCOS_IMAGE_URL",
        }
    }
}

impl Display for DeploymentKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown deployment parameter '{0}'")]
pub struct UnknownDeploymentKey(pub String);

impl FromStr for DeploymentKey {
    type Err = UnknownDeploymentKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeploymentKey::ALL
            .into_iter()
            .find(|key| key.env_name() == s)
            .ok_or_else(|| UnknownDeploymentKey(s.to_string()))
    }
}

/// Compute the value of `key` for `spec`, or `None` when it has no value
/// under the current configuration.
pub fn derive_parameter(key: DeploymentKey, spec: &ProvisioningSpec) -> Option<String> {
    match key {
        DeploymentKey::ProvisioningIp => provisioning_ip_cidr(spec),
        DeploymentKey::ProvisioningInterface => Some(spec.provisioning_interface.clone()),
        DeploymentKey::DeployKernelUrl => Some(image_url(spec, KERNEL_URL_SUBPATH)),
        DeploymentKey::DeployRamdiskUrl => Some(image_url(spec, RAMDISK_URL_SUBPATH)),
        DeploymentKey::IronicEndpoint => Some(local_endpoint(IRONIC_PORT)),
        DeploymentKey::IronicInspectorEndpoint => Some(local_endpoint(IRONIC_INSPECTOR_PORT)),
        DeploymentKey::HttpPort => Some(HTTP_PORT.to_string()),
        DeploymentKey::DhcpRange => Some(spec.provisioning_dhcp_range.clone()),
        DeploymentKey::MachineOsUrl => non_empty(&spec.provisioning_os_download_url),
    }
}

/// `ip/prefix` with the prefix length taken from the network CIDR.
fn provisioning_ip_cidr(spec: &ProvisioningSpec) -> Option<String> {
    if spec.provisioning_ip.is_empty() || spec.provisioning_network_cidr.is_empty() {
        return None;
    }
    let net = parse_cidr(&spec.provisioning_network_cidr)?;
    Some(format!("{}/{}", spec.provisioning_ip, net.prefix_len()))
}

fn image_url(spec: &ProvisioningSpec, subpath: &str) -> String {
    let host_port = if spec.provisioning_ip.is_empty() {
        placeholder_host_port(spec, HTTP_PORT)
    } else {
        join_host_port(&spec.provisioning_ip, HTTP_PORT)
    };
    format!("http://{host_port}/{subpath}")
}

/// Host/port pair built around the IP placeholder.
///
/// The placeholder is expanded after this code runs and the expansion cannot
/// bracket IPv6 addresses, so the IP version is inferred from the network
/// CIDR up front. An unparseable CIDR and an IPv4-mapped IPv6 network are
/// both treated as IPv4.
fn placeholder_host_port(spec: &ProvisioningSpec, port: &str) -> String {
    match parse_cidr(&spec.provisioning_network_cidr) {
        Some(IpNet::V6(net)) if net.addr().to_ipv4_mapped().is_none() => {
            format!("[{PROVISIONING_IP_PLACEHOLDER}]:{port}")
        }
        _ => format!("{PROVISIONING_IP_PLACEHOLDER}:{port}"),
    }
}

fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

fn local_endpoint(port: &str) -> String {
    format!("http://localhost:{port}/{IRONIC_ENDPOINT_SUBPATH}")
}

fn parse_cidr(raw: &str) -> Option<IpNet> {
    raw.parse().ok()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Where an environment variable's value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnvSource {
    /// A literal value.
    Value { value: String },
    /// Read from the node's host IP by the deployment. `fallback` is the
    /// address the caller expects it to resolve to.
    HostIp { field_path: String, fallback: String },
    /// Declared without a value.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub name: String,
    #[serde(flatten)]
    pub source: EnvSource,
}

impl EnvVar {
    /// Value the variable takes once the deployment has resolved it.
    pub fn resolved_value(&self) -> Option<&str> {
        match &self.source {
            EnvSource::Value { value } => Some(value),
            EnvSource::HostIp { fallback, .. } => Some(fallback),
            EnvSource::Empty => None,
        }
    }
}

/// Build the environment variable for `key`.
///
/// An absent provisioning IP on a disabled provisioning network is sourced
/// from the host IP; every other absent value yields an empty variable.
pub fn build_env_var(key: DeploymentKey, spec: &ProvisioningSpec, host_ip: &str) -> EnvVar {
    let source = match derive_parameter(key, spec) {
        Some(value) => EnvSource::Value { value },
        None if key == DeploymentKey::ProvisioningIp
            && resolve_network_mode(spec) == ProvisioningNetwork::Disabled =>
        {
            EnvSource::HostIp {
                field_path: HOST_IP_FIELD_PATH.to_string(),
                fallback: host_ip.to_string(),
            }
        }
        None => EnvSource::Empty,
    };
    EnvVar {
        name: key.env_name().to_string(),
        source,
    }
}

pub fn build_env_vars(
    keys: &[DeploymentKey],
    spec: &ProvisioningSpec,
    host_ip: &str,
) -> Vec<EnvVar> {
    keys.iter()
        .map(|&key| build_env_var(key, spec, host_ip))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{build_env_var, derive_parameter, DeploymentKey, EnvSource};
    use crate::spec::{ProvisioningNetwork, ProvisioningSpec};

    const OS_URL: &str = "http://172.22.0.1/images/rhcos-44.81.202001171431.0-openstack.x86_64.qcow2.gz?sha256=e98f83a2b9d4043719664a2be75fe8134dc6ca1fdbde807996622f8cc7ecd234";

    fn managed() -> ProvisioningSpec {
        ProvisioningSpec {
            provisioning_interface: "eth0".to_string(),
            provisioning_ip: "172.30.20.3".to_string(),
            provisioning_network_cidr: "172.30.20.0/24".to_string(),
            provisioning_dhcp_range: "172.30.20.11, 172.30.20.101".to_string(),
            provisioning_os_download_url: OS_URL.to_string(),
            provisioning_network: Some(ProvisioningNetwork::Managed),
            ..ProvisioningSpec::default()
        }
    }

    fn disabled_without_ip(cidr: &str) -> ProvisioningSpec {
        ProvisioningSpec {
            provisioning_network_cidr: cidr.to_string(),
            provisioning_os_download_url: OS_URL.to_string(),
            provisioning_network: Some(ProvisioningNetwork::Disabled),
            ..ProvisioningSpec::default()
        }
    }

    fn derive(key: DeploymentKey, spec: &ProvisioningSpec) -> Option<String> {
        derive_parameter(key, spec)
    }

    #[test]
    fn provisioning_ip_takes_prefix_from_cidr() {
        assert_eq!(
            derive(DeploymentKey::ProvisioningIp, &managed()).as_deref(),
            Some("172.30.20.3/24")
        );
    }

    #[test]
    fn provisioning_ip_absent_without_ip_or_valid_cidr() {
        let mut spec = managed();
        spec.provisioning_network_cidr = "172.30.20.0".to_string();
        assert_eq!(derive(DeploymentKey::ProvisioningIp, &spec), None);

        assert_eq!(
            derive(DeploymentKey::ProvisioningIp, &disabled_without_ip("172.30.20.0/24")),
            None
        );
    }

    #[test]
    fn ipv6_provisioning_ip_keeps_prefix() {
        let mut spec = managed();
        spec.provisioning_ip = "fd00:1101::3".to_string();
        spec.provisioning_network_cidr = "fd00:1101::/64".to_string();
        assert_eq!(
            derive(DeploymentKey::ProvisioningIp, &spec).as_deref(),
            Some("fd00:1101::3/64")
        );
    }

    #[test]
    fn interface_and_dhcp_range_pass_through_empty_values() {
        let spec = disabled_without_ip("172.30.20.0/24");
        assert_eq!(derive(DeploymentKey::ProvisioningInterface, &spec).as_deref(), Some(""));
        assert_eq!(derive(DeploymentKey::DhcpRange, &spec).as_deref(), Some(""));
    }

    #[test]
    fn image_urls_use_provisioning_ip() {
        let spec = managed();
        assert_eq!(
            derive(DeploymentKey::DeployKernelUrl, &spec).as_deref(),
            Some("http://172.30.20.3:6180/images/ironic-python-agent.kernel")
        );
        assert_eq!(
            derive(DeploymentKey::DeployRamdiskUrl, &spec).as_deref(),
            Some("http://172.30.20.3:6180/images/ironic-python-agent.initramfs")
        );
    }

    #[test]
    fn image_urls_bracket_ipv6_provisioning_ip() {
        let mut spec = managed();
        spec.provisioning_ip = "fd00:1101::3".to_string();
        spec.provisioning_network_cidr = "fd00:1101::/64".to_string();
        assert_eq!(
            derive(DeploymentKey::DeployKernelUrl, &spec).as_deref(),
            Some("http://[fd00:1101::3]:6180/images/ironic-python-agent.kernel")
        );
    }

    #[test]
    fn image_urls_fall_back_to_placeholder() {
        assert_eq!(
            derive(DeploymentKey::DeployKernelUrl, &disabled_without_ip("10.0.0.0/16")).as_deref(),
            Some("http://$(PROVISIONING_IP):6180/images/ironic-python-agent.kernel")
        );
        assert_eq!(
            derive(DeploymentKey::DeployRamdiskUrl, &disabled_without_ip("fd2e:6f44:5dd8::/64"))
                .as_deref(),
            Some("http://[$(PROVISIONING_IP)]:6180/images/ironic-python-agent.initramfs")
        );
        assert_eq!(
            derive(DeploymentKey::DeployKernelUrl, &disabled_without_ip("garbage")).as_deref(),
            Some("http://$(PROVISIONING_IP):6180/images/ironic-python-agent.kernel")
        );
    }

    #[test]
    fn ipv4_mapped_network_keeps_placeholder_unbracketed() {
        assert_eq!(
            derive(DeploymentKey::DeployKernelUrl, &disabled_without_ip("::ffff:10.0.0.0/104"))
                .as_deref(),
            Some("http://$(PROVISIONING_IP):6180/images/ironic-python-agent.kernel")
        );
    }

    #[test]
    fn padded_cidr_is_not_a_valid_network() {
        let mut spec = managed();
        spec.provisioning_network_cidr = " 172.30.20.0/24 ".to_string();
        assert_eq!(derive(DeploymentKey::ProvisioningIp, &spec), None);
    }

    #[test]
    fn fixed_endpoints_ignore_config() {
        let spec = ProvisioningSpec::default();
        assert_eq!(
            derive(DeploymentKey::IronicEndpoint, &spec).as_deref(),
            Some("http://localhost:6385/v1/")
        );
        assert_eq!(
            derive(DeploymentKey::IronicInspectorEndpoint, &spec).as_deref(),
            Some("http://localhost:5050/v1/")
        );
        assert_eq!(derive(DeploymentKey::HttpPort, &spec).as_deref(), Some("6180"));
    }

    #[test]
    fn os_download_url_is_verbatim_or_absent() {
        assert_eq!(derive(DeploymentKey::MachineOsUrl, &managed()).as_deref(), Some(OS_URL));
        assert_eq!(derive(DeploymentKey::MachineOsUrl, &ProvisioningSpec::default()), None);
    }

    #[test]
    fn env_names_parse_back_to_keys() {
        for key in DeploymentKey::ALL {
            assert_eq!(key.env_name().parse::<DeploymentKey>(), Ok(key));
        }
        assert!("PROVISIONING_GATEWAY".parse::<DeploymentKey>().is_err());
    }

    #[test]
    fn disabled_provisioning_ip_comes_from_host() {
        let env = build_env_var(
            DeploymentKey::ProvisioningIp,
            &disabled_without_ip("172.30.20.0/24"),
            "192.168.1.1",
        );
        assert_eq!(env.name, "PROVISIONING_IP");
        assert_eq!(
            env.source,
            EnvSource::HostIp {
                field_path: "status.hostIP".to_string(),
                fallback: "192.168.1.1".to_string(),
            }
        );
        assert_eq!(env.resolved_value(), Some("192.168.1.1"));
    }

    #[test]
    fn absent_values_outside_disabled_mode_are_empty() {
        let mut spec = managed();
        spec.provisioning_os_download_url.clear();
        let env = build_env_var(DeploymentKey::MachineOsUrl, &spec, "192.168.1.1");
        assert_eq!(env.source, EnvSource::Empty);

        spec.provisioning_network_cidr.clear();
        let env = build_env_var(DeploymentKey::ProvisioningIp, &spec, "192.168.1.1");
        assert_eq!(env.source, EnvSource::Empty);
    }

    #[test]
    fn derivation_is_repeatable() {
        let spec = managed();
        for key in DeploymentKey::ALL {
            assert_eq!(derive(key, &spec), derive(key, &spec));
        }
    }
}
