use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use provisioning_core::DeploymentKey;

#[derive(Parser, Debug)]
#[command(name = "provisioning-check")]
#[command(about = "Validate bare-metal provisioning configuration and show derived parameters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Check the fields required by the resolved provisioning network mode.
    Validate(ValidateArgs),
    /// Show the effective provisioning network mode.
    Mode(ModeArgs),
    /// Derive a single deployment parameter.
    Derive(DeriveArgs),
    /// Show every deployment environment variable.
    Env(EnvArgs),
    /// Show the container topology of the provisioning services.
    Manifest(ManifestArgs),
    /// Run an admission review for a create, update or delete.
    Admit(AdmitArgs),
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Provisioning object (.json or TOML).
    pub file: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ModeArgs {
    /// Provisioning object (.json or TOML).
    pub file: PathBuf,
    /// Also show which field decided the mode.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct DeriveArgs {
    pub file: PathBuf,
    /// Environment variable name, for example DEPLOY_KERNEL_URL.
    #[arg(long)]
    pub key: DeploymentKey,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct EnvArgs {
    pub file: PathBuf,
    /// Host IP the deployment substitutes when the provisioning IP is absent.
    #[arg(long, default_value = "127.0.0.1")]
    pub host_ip: String,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ManifestArgs {
    pub file: PathBuf,
    /// Image registry (.json or TOML).
    #[arg(long)]
    pub images: PathBuf,
    #[arg(long, default_value = "127.0.0.1")]
    pub host_ip: String,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Write the manifest as JSON to this path instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Skip validation of the provisioning object.
    #[arg(long)]
    pub no_validate: bool,
}

#[derive(Parser, Debug)]
pub struct AdmitArgs {
    /// Object under review; the new object for updates.
    pub file: PathBuf,
    #[arg(long, value_enum)]
    pub operation: AdmitOperation,
    /// Previous object, for updates.
    #[arg(long)]
    pub old: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum AdmitOperation {
    Create,
    Update,
    Delete,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
