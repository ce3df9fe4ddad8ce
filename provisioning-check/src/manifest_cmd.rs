use std::fs;

use anyhow::{bail, Context, Result};
use provisioning_check::report::{build_manifest_report, render_manifest_text};
use provisioning_core::{load_images, load_provisioning, validate_provisioning_spec};
use tracing::{debug, warn};

use crate::cli::{ManifestArgs, OutputFormat};
use crate::path_guard;

pub fn run_manifest(args: ManifestArgs) -> Result<()> {
    let obj = load_provisioning(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let images = load_images(&args.images)
        .with_context(|| format!("failed to load images {}", args.images.display()))?;

    debug!(
        file = %args.file.display(),
        images = %args.images.display(),
        "loaded manifest inputs"
    );

    if args.no_validate {
        warn!("building manifest without validating {}", args.file.display());
    } else if let Err(err) = validate_provisioning_spec(&obj.spec) {
        bail!("refusing to build manifest for invalid config: {err}");
    }

    let report = build_manifest_report(&images, &obj.spec, &args.host_ip);
    debug!(
        mode = %report.mode,
        containers = report.containers.len(),
        init_containers = report.init_containers.len(),
        "built manifest"
    );

    if let Some(out_path) = args.output {
        path_guard::ensure_output_not_same(&out_path, &[&args.file, &args.images])?;
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(&out_path, json)
            .with_context(|| format!("failed to write manifest {}", out_path.display()))?;
        println!(
            "wrote {} containers and {} init containers to {}",
            report.containers.len(),
            report.init_containers.len(),
            out_path.display()
        );
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => println!("{}", render_manifest_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
