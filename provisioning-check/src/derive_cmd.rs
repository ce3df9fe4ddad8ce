use anyhow::{Context, Result};
use provisioning_check::report::render_env_text;
use provisioning_core::{build_env_vars, derive_parameter, load_provisioning, DeploymentKey};
use serde::Serialize;

use crate::cli::{DeriveArgs, EnvArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct DerivedValue<'a> {
    key: &'a str,
    value: Option<String>,
}

pub fn run_derive(args: DeriveArgs) -> Result<()> {
    let obj = load_provisioning(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let value = derive_parameter(args.key, &obj.spec);

    match args.format {
        OutputFormat::Text => println!("{}", value.as_deref().unwrap_or("<absent>")),
        OutputFormat::Json => {
            let out = DerivedValue {
                key: args.key.env_name(),
                value,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

pub fn run_env(args: EnvArgs) -> Result<()> {
    let obj = load_provisioning(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let vars = build_env_vars(&DeploymentKey::ALL, &obj.spec, &args.host_ip);

    match args.format {
        OutputFormat::Text => println!("{}", render_env_text(&vars)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&vars)?),
    }
    Ok(())
}
