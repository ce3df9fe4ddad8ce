//! Validation and parameter derivation for bare-metal provisioning configuration.
//!
//! A [`ProvisioningSpec`] selects one of three provisioning network modes.
//! This crate resolves the effective mode, checks the fields that mode
//! requires, and derives the deployment parameters and container topology of
//! the provisioning services. Everything here is a pure function of its input
//! apart from the file loaders in [`load`].

pub mod admission;
pub mod constants;
pub mod derive;
pub mod load;
pub mod manifest;
pub mod mode;
pub mod spec;
pub mod validate;

pub use admission::{
    review, validate_create, validate_delete, validate_update, AdmissionError, Operation,
};
pub use derive::{
    build_env_var, build_env_vars, derive_parameter, DeploymentKey, EnvSource, EnvVar,
    UnknownDeploymentKey,
};
pub use load::{load_images, load_provisioning, parse_provisioning, Format, LoadError};
pub use manifest::{metal3_containers, metal3_init_containers, Container, ContainerRole, Images};
pub use mode::{resolve_network_mode, resolve_network_mode_logged, ModeSource};
pub use spec::{Provisioning, ProvisioningNetwork, ProvisioningSpec, UnknownNetworkMode};
pub use validate::{required_fields, validate_provisioning_spec, SpecField, ValidationError};
