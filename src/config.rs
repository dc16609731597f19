//! Publisher configuration
//!
//! Loaded from a YAML file; every key is optional.
//!
//! ```yaml
//! output_dir: public/
//! body_shape: flat
//! infer_datatypes: false
//! ```

use crate::error::{InstataError, InstataResult};
use crate::reconstruct::BodyShape;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Publisher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Directory receiving the rendered document and the style asset
    pub output_dir: PathBuf,
    /// Body layout handed to the renderer
    pub body_shape: BodyShape,
    /// Type data literals when they parse as numbers, dates or booleans
    pub infer_datatypes: bool,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output/"),
            body_shape: BodyShape::Grouped,
            infer_datatypes: true,
        }
    }
}

impl PublisherConfig {
    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes to unit, not to a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> InstataResult<Self> {
        let path = path.as_ref();
        let invalid = |reason: String| InstataError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config = Self::from_yaml(&text).map_err(|e| invalid(e.to_string()))?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
