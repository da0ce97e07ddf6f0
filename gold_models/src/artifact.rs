//! Model artifact files
//!
//! An artifact is a JSON document tagged with `"model": "arima" | "sarima"`
//! and a `format_version`. Loading distinguishes a missing file from one
//! that exists but cannot be used.

use crate::arima::ArimaModel;
use crate::error::{ModelError, Result};
use crate::sarima::SarimaModel;
use crate::LoadedModel;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::{info, warn};

/// Artifact layout this build reads and writes
pub const FORMAT_VERSION: u32 = 1;

/// The fitted model stored in an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum ModelArtifact {
    Arima(ArimaModel),
    Sarima(SarimaModel),
}

#[derive(Serialize)]
struct VersionedArtifact<'a> {
    format_version: u32,
    #[serde(flatten)]
    artifact: &'a ModelArtifact,
}

impl ModelArtifact {
    /// Validate and erase the concrete type
    pub fn into_model(self) -> Result<Box<dyn LoadedModel>> {
        match self {
            ModelArtifact::Arima(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ModelArtifact::Sarima(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }

    /// Parse an artifact body, checking the format version first
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<Self> {
        match value.get("format_version").and_then(|v| v.as_u64()) {
            Some(v) if v == u64::from(FORMAT_VERSION) => {}
            Some(v) => {
                return Err(ModelError::InvalidArtifact(format!(
                    "unsupported format_version {} (expected {})",
                    v, FORMAT_VERSION
                )))
            }
            None => {
                return Err(ModelError::InvalidArtifact(
                    "missing format_version".to_string(),
                ))
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Write the artifact as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let versioned = VersionedArtifact {
            format_version: FORMAT_VERSION,
            artifact: self,
        };
        serde_json::to_writer_pretty(&mut writer, &versioned)?;
        writer.flush()?;
        Ok(())
    }
}

/// Load a fitted model from an artifact file.
///
/// Returns [`ModelError::NotFound`] when nothing exists at `path` and
/// [`ModelError::LoadError`] for every other failure, with the cause text.
pub fn load_model(path: impl AsRef<Path>) -> Result<Box<dyn LoadedModel>> {
    let path = path.as_ref();
    let load_error = |reason: String| ModelError::LoadError {
        path: path.to_path_buf(),
        reason,
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "model artifact not found");
            return Err(ModelError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(load_error(e.to_string())),
    };

    let model = serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file))
        .map_err(ModelError::from)
        .and_then(ModelArtifact::from_value)
        .and_then(ModelArtifact::into_model)
        .map_err(|e| load_error(e.to_string()))?;

    info!(path = %path.display(), model = %model.name(), "loaded model artifact");
    Ok(model)
}
