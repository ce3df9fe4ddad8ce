//! Required-field checks per provisioning network mode.
//!
//! Checks run in a fixed order per mode and stop at the first empty field.
//! Values are not parsed here: a malformed CIDR passes validation and is
//! handled by the derivation code instead.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;
use tracing::debug;

use crate::mode::resolve_network_mode_logged;
use crate::spec::{ProvisioningNetwork, ProvisioningSpec};

/// A string field of [`ProvisioningSpec`] that a mode may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecField {
    ProvisioningInterface,
    ProvisioningIp,
    ProvisioningNetworkCidr,
    ProvisioningDhcpRange,
    ProvisioningOsDownloadUrl,
}

impl SpecField {
    /// Field name as reported in validation errors.
    pub fn name(self) -> &'static str {
        match self {
            SpecField::ProvisioningInterface => "ProvisioningInterface",
            SpecField::ProvisioningIp => "ProvisioningIP",
            SpecField::ProvisioningNetworkCidr => "ProvisioningNetworkCIDR",
            SpecField::ProvisioningDhcpRange => "ProvisioningDHCPRange",
            SpecField::ProvisioningOsDownloadUrl => "ProvisioningOSDownloadURL",
        }
    }

    pub fn value(self, spec: &ProvisioningSpec) -> &str {
        match self {
            SpecField::ProvisioningInterface => &spec.provisioning_interface,
            SpecField::ProvisioningIp => &spec.provisioning_ip,
            SpecField::ProvisioningNetworkCidr => &spec.provisioning_network_cidr,
            SpecField::ProvisioningDhcpRange => &spec.provisioning_dhcp_range,
            SpecField::ProvisioningOsDownloadUrl => &spec.provisioning_os_download_url,
        }
    }
}

impl Display for SpecField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const MANAGED_REQUIRED: &[SpecField] = &[
    SpecField::ProvisioningInterface,
    SpecField::ProvisioningIp,
    SpecField::ProvisioningNetworkCidr,
    SpecField::ProvisioningDhcpRange,
    SpecField::ProvisioningOsDownloadUrl,
];

const UNMANAGED_REQUIRED: &[SpecField] = &[
    SpecField::ProvisioningInterface,
    SpecField::ProvisioningIp,
    SpecField::ProvisioningNetworkCidr,
    SpecField::ProvisioningOsDownloadUrl,
];

const DISABLED_REQUIRED: &[SpecField] = &[
    SpecField::ProvisioningNetworkCidr,
    SpecField::ProvisioningOsDownloadUrl,
];

/// Required fields for a mode, in check order.
pub fn required_fields(mode: ProvisioningNetwork) -> &'static [SpecField] {
    match mode {
        ProvisioningNetwork::Managed => MANAGED_REQUIRED,
        ProvisioningNetwork::Unmanaged => UNMANAGED_REQUIRED,
        ProvisioningNetwork::Disabled => DISABLED_REQUIRED,
    }
}

/// Rejection of a provisioning spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field required by the resolved mode is the empty string.
    #[error("{field} is required but is empty")]
    MissingRequiredField { field: SpecField },
}

/// Check `spec` against the required fields of an already resolved mode.
pub fn validate_for_mode(
    mode: ProvisioningNetwork,
    spec: &ProvisioningSpec,
) -> Result<(), ValidationError> {
    match required_fields(mode)
        .iter()
        .find(|field| field.value(spec).is_empty())
    {
        Some(&field) => Err(ValidationError::MissingRequiredField { field }),
        None => Ok(()),
    }
}

/// Resolve the network mode of `spec` and check its required fields.
pub fn validate_provisioning_spec(spec: &ProvisioningSpec) -> Result<(), ValidationError> {
    let mode = resolve_network_mode_logged(spec);
    let result = validate_for_mode(mode, spec);
    if let Err(err) = &result {
        debug!(mode = %mode, "provisioning spec rejected: {err}");
    }
    result
}
