use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// How the dedicated provisioning network is operated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisioningNetwork {
    /// The control plane owns DHCP and interface configuration.
    Managed,
    /// DHCP is external; interface configuration is manual.
    Unmanaged,
    /// No provisioning network; the host network is used.
    Disabled,
}

impl ProvisioningNetwork {
    pub fn as_str(self) -> &'static str {
        match self {
            ProvisioningNetwork::Managed => "Managed",
            ProvisioningNetwork::Unmanaged => "Unmanaged",
            ProvisioningNetwork::Disabled => "Disabled",
        }
    }
}

impl Display for ProvisioningNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a network mode outside `Managed`/`Unmanaged`/`Disabled`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown provisioning network mode '{0}' (expected Managed, Unmanaged or Disabled)")]
pub struct UnknownNetworkMode(pub String);

impl FromStr for ProvisioningNetwork {
    type Err = UnknownNetworkMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Managed" => Ok(ProvisioningNetwork::Managed),
            "Unmanaged" => Ok(ProvisioningNetwork::Unmanaged),
            "Disabled" => Ok(ProvisioningNetwork::Disabled),
            other => Err(UnknownNetworkMode(other.to_string())),
        }
    }
}

impl Serialize for ProvisioningNetwork {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProvisioningNetwork {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Desired state of the provisioning network, as written by the operator.
///
/// Every field is optional on the wire. Strings default to empty and the
/// network mode defaults to unset; an empty `provisioningNetwork` string is
/// read as unset too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningSpec {
    #[serde(rename = "provisioningInterface", default)]
    pub provisioning_interface: String,
    #[serde(rename = "provisioningIP", default)]
    pub provisioning_ip: String,
    #[serde(rename = "provisioningNetworkCIDR", default)]
    pub provisioning_network_cidr: String,
    /// Deprecated. Only consulted when `provisioning_network` is unset.
    #[serde(rename = "provisioningDHCPExternal", default)]
    pub provisioning_dhcp_external: bool,
    #[serde(rename = "provisioningDHCPRange", default)]
    pub provisioning_dhcp_range: String,
    #[serde(rename = "provisioningOSDownloadURL", default)]
    pub provisioning_os_download_url: String,
    #[serde(
        rename = "provisioningNetwork",
        default,
        deserialize_with = "deserialize_optional_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub provisioning_network: Option<ProvisioningNetwork>,
}

fn deserialize_optional_mode<'de, D>(
    deserializer: D,
) -> Result<Option<ProvisioningNetwork>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Object metadata; only the name takes part in admission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
}

/// The provisioning object as stored by the control plane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provisioning {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ProvisioningSpec,
}

impl Provisioning {
    pub fn new(name: impl Into<String>, spec: ProvisioningSpec) -> Self {
        Self {
            metadata: ObjectMeta { name: name.into() },
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
