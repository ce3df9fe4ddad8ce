use colored::Colorize;
use provisioning_core::mode::resolve_network_mode_with_source;
use provisioning_core::{
    metal3_containers, metal3_init_containers, required_fields, validate_provisioning_spec,
    Container, EnvSource, EnvVar, Images, ModeSource, Provisioning, ProvisioningSpec,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateReport {
    pub name: String,
    pub mode: String,
    pub mode_source: String,
    pub required_fields: Vec<String>,
    pub valid: bool,
    pub error: Option<String>,
}

pub fn build_validate_report(obj: &Provisioning) -> ValidateReport {
    let (mode, source) = resolve_network_mode_with_source(&obj.spec);
    let result = validate_provisioning_spec(&obj.spec);
    ValidateReport {
        name: obj.name().to_string(),
        mode: mode.to_string(),
        mode_source: mode_source_name(source).to_string(),
        required_fields: required_fields(mode)
            .iter()
            .map(|field| field.name().to_string())
            .collect(),
        valid: result.is_ok(),
        error: result.err().map(|err| err.to_string()),
    }
}

pub fn render_validate_text(report: &ValidateReport) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "validate name={} mode={} mode_source={}",
        report.name, report.mode, report.mode_source
    ));
    out.push(format!("required {}", report.required_fields.join(",")));
    match &report.error {
        None => out.push("result valid".green().to_string()),
        Some(err) => out.push(format!("result invalid: {err}").red().to_string()),
    }
    out.join("\n")
}

pub fn mode_source_name(source: ModeSource) -> &'static str {
    match source {
        ModeSource::Explicit => "provisioningNetwork",
        ModeSource::Default => "default",
        ModeSource::LegacyDhcpExternal => "provisioningDHCPExternal",
    }
}

/// One `NAME=value` line per variable.
pub fn render_env_text(vars: &[EnvVar]) -> String {
    vars.iter()
        .map(|var| match &var.source {
            EnvSource::Value { value } => format!("{}={value}", var.name),
            EnvSource::HostIp {
                field_path,
                fallback,
            } => format!("{}={fallback} (from {field_path})", var.name)
                .yellow()
                .to_string(),
            EnvSource::Empty => format!("{}=", var.name).dimmed().to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestReport {
    pub mode: String,
    pub containers: Vec<Container>,
    pub init_containers: Vec<Container>,
}

pub fn build_manifest_report(
    images: &Images,
    spec: &ProvisioningSpec,
    host_ip: &str,
) -> ManifestReport {
    let (mode, _) = resolve_network_mode_with_source(spec);
    ManifestReport {
        mode: mode.to_string(),
        containers: metal3_containers(images, spec, host_ip),
        init_containers: metal3_init_containers(images, spec, host_ip),
    }
}

pub fn render_manifest_text(report: &ManifestReport) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "manifest mode={} containers={} init_containers={}",
        report.mode,
        report.containers.len(),
        report.init_containers.len()
    ));
    out.push("init_containers".cyan().to_string());
    push_containers(&mut out, &report.init_containers);
    out.push("containers".cyan().to_string());
    push_containers(&mut out, &report.containers);
    out.join("\n")
}

fn push_containers(out: &mut Vec<String>, containers: &[Container]) {
    if containers.is_empty() {
        out.push("- none".to_string());
        return;
    }
    for container in containers {
        out.push(format!("- {} image={}", container.name, container.image));
        for var in &container.env {
            let value = var.resolved_value().unwrap_or("");
            out.push(format!("    {}={value}", var.name));
        }
    }
}
