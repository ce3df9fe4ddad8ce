//! Admission checks for create, update and delete of the provisioning object.

use thiserror::Error;
use tracing::info;

use crate::constants::PROVISIONING_SINGLETON_NAME;
use crate::spec::Provisioning;
use crate::validate::{validate_provisioning_spec, ValidationError};

/// Reason an admission request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("Provisioning object is a singleton and must be named \"{expected}\"")]
    NotSingleton { name: String, expected: &'static str },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Admission operation being reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

pub fn validate_create(obj: &Provisioning) -> Result<(), AdmissionError> {
    info!(name = obj.name(), "validate create");
    if obj.name() != PROVISIONING_SINGLETON_NAME {
        return Err(AdmissionError::NotSingleton {
            name: obj.name().to_string(),
            expected: PROVISIONING_SINGLETON_NAME,
        });
    }
    validate_provisioning_spec(&obj.spec)?;
    Ok(())
}

/// Only the new object is checked; the previous state does not constrain
/// the update.
pub fn validate_update(_old: &Provisioning, new: &Provisioning) -> Result<(), AdmissionError> {
    info!(name = new.name(), "validate update");
    validate_provisioning_spec(&new.spec)?;
    Ok(())
}

pub fn validate_delete(obj: &Provisioning) -> Result<(), AdmissionError> {
    info!(name = obj.name(), "validate delete");
    Ok(())
}

/// Dispatch an admission review. `old` is only read for updates and
/// defaults to `new` when not supplied.
pub fn review(
    operation: Operation,
    new: &Provisioning,
    old: Option<&Provisioning>,
) -> Result<(), AdmissionError> {
    match operation {
        Operation::Create => validate_create(new),
        Operation::Update => validate_update(old.unwrap_or(new), new),
        Operation::Delete => validate_delete(new),
    }
}
