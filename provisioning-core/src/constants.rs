//! Fixed ports, paths, and names shared by the derivation and manifest code.

/// Port the image HTTP server listens on.
pub const HTTP_PORT: &str = "6180";
/// Port of the ironic API.
pub const IRONIC_PORT: &str = "6385";
/// Port of the ironic inspector API.
pub const IRONIC_INSPECTOR_PORT: &str = "5050";

pub const KERNEL_URL_SUBPATH: &str = "images/ironic-python-agent.kernel";
pub const RAMDISK_URL_SUBPATH: &str = "images/ironic-python-agent.initramfs";
pub const IRONIC_ENDPOINT_SUBPATH: &str = "v1/";

/// Variable reference expanded by the downstream deployment once the host IP
/// is known. The expansion cannot add IPv6 brackets on its own.
pub const PROVISIONING_IP_PLACEHOLDER: &str = "$(PROVISIONING_IP)";

/// Object field the downstream deployment reads the node IP from.
pub const HOST_IP_FIELD_PATH: &str = "status.hostIP";

/// The only accepted name for the provisioning object.
pub const PROVISIONING_SINGLETON_NAME: &str = "provisioning-configuration";
