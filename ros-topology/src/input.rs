//! Loading topology models exported by the provisioning wizard.

use std::path::Path;

use thiserror::Error;

use crate::model::TopologyModel;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse TOML model {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("failed to parse JSON model {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Input encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Toml,
    Json,
}

impl ModelFormat {
    /// `.json` is JSON; everything else is treated as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ModelFormat::Json,
            _ => ModelFormat::Toml,
        }
    }
}

pub fn load_model(path: &Path) -> Result<TopologyModel, ModelLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_model(&raw, ModelFormat::from_path(path), &path.display().to_string())
}

pub fn parse_model(
    raw: &str,
    format: ModelFormat,
    origin: &str,
) -> Result<TopologyModel, ModelLoadError> {
    let model = match format {
        ModelFormat::Toml => toml::from_str(raw).map_err(|source| ModelLoadError::Toml {
            path: origin.to_string(),
            source,
        })?,
        ModelFormat::Json => serde_json::from_str(raw).map_err(|source| ModelLoadError::Json {
            path: origin.to_string(),
            source,
        })?,
    };
    log::debug!("loaded model from {origin} ({format:?})");
    Ok(model)
}
