//! Effective provisioning network mode.
//!
//! `provisioningNetwork` wins whenever it is set. Older configurations only
//! carry the deprecated `provisioningDHCPExternal` flag, which selects
//! `Unmanaged` when true and `Managed` otherwise.

use tracing::debug;

use crate::spec::{ProvisioningNetwork, ProvisioningSpec};

/// Where the resolved mode came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSource {
    /// `provisioningNetwork` was set.
    Explicit,
    /// Neither field was set; the default applies.
    Default,
    /// Derived from the deprecated `provisioningDHCPExternal` flag.
    LegacyDhcpExternal,
}

/// Resolve the effective network mode and report which input decided it.
pub fn resolve_network_mode_with_source(
    spec: &ProvisioningSpec,
) -> (ProvisioningNetwork, ModeSource) {
    if let Some(mode) = spec.provisioning_network {
        return (mode, ModeSource::Explicit);
    }
    if spec.provisioning_dhcp_external {
        (ProvisioningNetwork::Unmanaged, ModeSource::LegacyDhcpExternal)
    } else {
        (ProvisioningNetwork::Managed, ModeSource::Default)
    }
}

/// Resolve the effective network mode.
pub fn resolve_network_mode(spec: &ProvisioningSpec) -> ProvisioningNetwork {
    resolve_network_mode_with_source(spec).0
}

/// Same as [`resolve_network_mode`], emitting advisory log lines about
/// defaulting and deprecated-field usage.
pub fn resolve_network_mode_logged(spec: &ProvisioningSpec) -> ProvisioningNetwork {
    let (mode, source) = resolve_network_mode_with_source(spec);
    match source {
        ModeSource::Explicit => {}
        ModeSource::LegacyDhcpExternal => debug!(
            "provisioningDHCPExternal is deprecated and will be removed in the next release, \
             use provisioningNetwork instead"
        ),
        ModeSource::Default => debug!(
            "provisioningNetwork and provisioningDHCPExternal not set, defaulting to managed network"
        ),
    }
    debug!(mode = %mode, "provisioning network");
    mode
}
