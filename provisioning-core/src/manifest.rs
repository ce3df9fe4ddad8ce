//! Container topology of the provisioning services pod.
//!
//! This module decides which containers run for a given spec and which
//! environment each one receives. Image references come from [`Images`]
//! untouched.

use serde::{Deserialize, Serialize};

use crate::derive::{build_env_vars, DeploymentKey, EnvVar};
use crate::mode::resolve_network_mode;
use crate::spec::{ProvisioningNetwork, ProvisioningSpec};

/// Image references for the provisioning services, keyed by logical name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Images {
    pub baremetal_operator: String,
    pub ironic: String,
    pub ironic_inspector: String,
    pub ipa_downloader: String,
    pub machine_os_downloader: String,
    pub static_ip_manager: String,
}

/// What a container does in the pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerRole {
    BaremetalOperator,
    Mariadb,
    Httpd,
    IronicConductor,
    IronicApi,
    IronicInspector,
    StaticIpManager,
    Dnsmasq,
    IpaDownloader,
    MachineOsDownloader,
    StaticIpSet,
}

impl ContainerRole {
    pub fn container_name(self) -> &'static str {
        match self {
            ContainerRole::BaremetalOperator => "metal3-baremetal-operator",
            ContainerRole::Mariadb => "metal3-mariadb",
            ContainerRole::Httpd => "metal3-httpd",
            ContainerRole::IronicConductor => "metal3-ironic-conductor",
            ContainerRole::IronicApi => "metal3-ironic-api",
            ContainerRole::IronicInspector => "metal3-ironic-inspector",
            ContainerRole::StaticIpManager => "metal3-static-ip-manager",
            ContainerRole::Dnsmasq => "metal3-dnsmasq",
            ContainerRole::IpaDownloader => "metal3-ipa-downloader",
            ContainerRole::MachineOsDownloader => "metal3-machine-os-downloader",
            ContainerRole::StaticIpSet => "metal3-static-ip-set",
        }
    }

    /// Parameters handed to the container as environment variables.
    pub fn env_keys(self) -> &'static [DeploymentKey] {
        use DeploymentKey::*;

        match self {
            ContainerRole::BaremetalOperator => &[
                DeployKernelUrl,
                DeployRamdiskUrl,
                IronicEndpoint,
                IronicInspectorEndpoint,
            ],
            ContainerRole::Mariadb => &[],
            ContainerRole::Httpd => &[HttpPort, ProvisioningIp, ProvisioningInterface],
            ContainerRole::IronicConductor | ContainerRole::IronicApi => {
                &[HttpPort, ProvisioningIp, ProvisioningInterface]
            }
            ContainerRole::IronicInspector => &[ProvisioningIp, ProvisioningInterface],
            ContainerRole::StaticIpManager | ContainerRole::StaticIpSet => {
                &[ProvisioningIp, ProvisioningInterface]
            }
            ContainerRole::Dnsmasq => &[HttpPort, ProvisioningInterface, DhcpRange],
            ContainerRole::IpaDownloader => &[],
            ContainerRole::MachineOsDownloader => &[MachineOsUrl],
        }
    }
}

impl Images {
    /// Image reference used for a container role.
    pub fn image_for(&self, role: ContainerRole) -> &str {
        match role {
            ContainerRole::BaremetalOperator => &self.baremetal_operator,
            ContainerRole::Mariadb
            | ContainerRole::Httpd
            | ContainerRole::IronicConductor
            | ContainerRole::IronicApi
            | ContainerRole::Dnsmasq => &self.ironic,
            ContainerRole::IronicInspector => &self.ironic_inspector,
            ContainerRole::StaticIpManager | ContainerRole::StaticIpSet => &self.static_ip_manager,
            ContainerRole::IpaDownloader => &self.ipa_downloader,
            ContainerRole::MachineOsDownloader => &self.machine_os_downloader,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub name: String,
    pub role: ContainerRole,
    pub image: String,
    pub env: Vec<EnvVar>,
}

/// Long-running containers for `spec`, in pod order.
///
/// Managed and Unmanaged networks run 8 containers. A Disabled network runs
/// 7 when `provisioningIP` is set and 6 without it, since the static IP
/// manager is dropped too.
pub fn metal3_containers(
    images: &Images,
    spec: &ProvisioningSpec,
    host_ip: &str,
) -> Vec<Container> {
    container_roles(spec)
        .into_iter()
        .map(|role| build_container(role, images, spec, host_ip))
        .collect()
}

/// Init containers for `spec`, in run order.
pub fn metal3_init_containers(
    images: &Images,
    spec: &ProvisioningSpec,
    host_ip: &str,
) -> Vec<Container> {
    init_container_roles(spec)
        .into_iter()
        .map(|role| build_container(role, images, spec, host_ip))
        .collect()
}

pub fn container_roles(spec: &ProvisioningSpec) -> Vec<ContainerRole> {
    let mut roles = vec![
        ContainerRole::BaremetalOperator,
        ContainerRole::Mariadb,
        ContainerRole::Httpd,
        ContainerRole::IronicConductor,
        ContainerRole::IronicApi,
        ContainerRole::IronicInspector,
    ];
    if manages_static_ip(spec) {
        roles.push(ContainerRole::StaticIpManager);
    }
    if resolve_network_mode(spec) != ProvisioningNetwork::Disabled {
        roles.push(ContainerRole::Dnsmasq);
    }
    roles
}

pub fn init_container_roles(spec: &ProvisioningSpec) -> Vec<ContainerRole> {
    let mut roles = vec![
        ContainerRole::IpaDownloader,
        ContainerRole::MachineOsDownloader,
    ];
    if manages_static_ip(spec) {
        roles.push(ContainerRole::StaticIpSet);
    }
    roles
}

/// A disabled provisioning network without a requested IP leaves no address
/// for the static IP containers to manage.
fn manages_static_ip(spec: &ProvisioningSpec) -> bool {
    resolve_network_mode(spec) != ProvisioningNetwork::Disabled || !spec.provisioning_ip.is_empty()
}

fn build_container(
    role: ContainerRole,
    images: &Images,
    spec: &ProvisioningSpec,
    host_ip: &str,
) -> Container {
    Container {
        name: role.container_name().to_string(),
        role,
        image: images.image_for(role).to_string(),
        env: build_env_vars(role.env_keys(), spec, host_ip),
    }
}
