use anyhow::{bail, Context, Result};
use provisioning_check::report::{build_validate_report, mode_source_name, render_validate_text};
use provisioning_core::load_provisioning;
use provisioning_core::mode::resolve_network_mode_with_source;

use crate::cli::{ModeArgs, OutputFormat, ValidateArgs};

pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let obj = load_provisioning(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let report = build_validate_report(&obj);

    match args.format {
        OutputFormat::Text => println!("{}", render_validate_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(err) = &report.error {
        bail!("validation failed: {err}");
    }
    Ok(())
}

pub fn run_mode(args: ModeArgs) -> Result<()> {
    let obj = load_provisioning(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let (mode, source) = resolve_network_mode_with_source(&obj.spec);
    if args.verbose {
        println!("mode={mode} source={}", mode_source_name(source));
    } else {
        println!("{mode}");
    }
    Ok(())
}
