use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::manifest::Images;
use crate::spec::Provisioning;

/// Errors returned when loading provisioning or image files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse TOML in {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Input encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }
}

/// Load a provisioning object from a `.json` or TOML file.
pub fn load_provisioning(path: &Path) -> Result<Provisioning, LoadError> {
    load_file(path)
}

/// Load an image registry from a `.json` or TOML file.
pub fn load_images(path: &Path) -> Result<Images, LoadError> {
    load_file(path)
}

pub fn parse_provisioning(raw: &str, format: Format) -> Result<Provisioning, LoadError> {
    parse_str(raw, format, "<inline>".to_string())
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_str(&raw, Format::from_path(path), path.display().to_string())
}

fn parse_str<T: DeserializeOwned>(
    raw: &str,
    format: Format,
    path: String,
) -> Result<T, LoadError> {
    match format {
        Format::Toml => toml::from_str(raw).map_err(|source| LoadError::Toml { path, source }),
        Format::Json => {
            serde_json::from_str(raw).map_err(|source| LoadError::Json { path, source })
        }
    }
}
