use anyhow::{bail, Context, Result};
use provisioning_core::{load_provisioning, review, Operation};
use tracing::debug;

use crate::cli::{AdmitArgs, AdmitOperation};

pub fn run_admit(args: AdmitArgs) -> Result<()> {
    let new = load_provisioning(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let old = args
        .old
        .as_deref()
        .map(|path| {
            load_provisioning(path).with_context(|| format!("failed to load {}", path.display()))
        })
        .transpose()?;

    let operation = admit_operation(args.operation);
    debug!(
        operation = operation_name(operation),
        name = new.name(),
        has_old = old.is_some(),
        "reviewing admission"
    );
    if let Err(err) = review(operation, &new, old.as_ref()) {
        println!("admit operation={} name={} allowed=false", operation_name(operation), new.name());
        bail!("admission denied: {err}");
    }
    println!("admit operation={} name={} allowed=true", operation_name(operation), new.name());
    Ok(())
}

fn admit_operation(op: AdmitOperation) -> Operation {
    match op {
        AdmitOperation::Create => Operation::Create,
        AdmitOperation::Update => Operation::Update,
        AdmitOperation::Delete => Operation::Delete,
    }
}

fn operation_name(op: Operation) -> &'static str {
    match op {
        Operation::Create => "create",
        Operation::Update => "update",
        Operation::Delete => "delete",
    }
}
