//! Viewer configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use super::loader::FileLayerSource;

/// Configuration for the layered viewer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Number of layer slots
    pub max_layers: usize,
    /// Directory holding `layer-<i>.json` files
    pub layer_dir: PathBuf,
    /// Layers on each side of the current one to prefetch
    pub preload_range: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_layers: 20,
            layer_dir: PathBuf::from("public/mock"),
            preload_range: 2,
        }
    }
}

impl ViewerConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_layers == 0 {
            return Err(Error::Config("max_layers must be at least 1".into()));
        }
        if u32::try_from(self.max_layers).is_err() {
            return Err(Error::Config(format!("max_layers {} is too large", self.max_layers)));
        }
        Ok(())
    }

    /// A file source reading from `layer_dir`
    pub fn file_source(&self) -> FileLayerSource {
        FileLayerSource::new(&self.layer_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.max_layers, 20);
        assert_eq!(config.layer_dir, PathBuf::from("public/mock"));
        assert_eq!(config.preload_range, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_layers": 8 }}"#).unwrap();

        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.max_layers, 8);
        assert_eq!(config.preload_range, 2);
    }

    #[test]
    fn test_rejects_zero_layers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_layers": 0 }}"#).unwrap();
        assert!(matches!(ViewerConfig::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_file_source_path() {
        let config = ViewerConfig {
            layer_dir: PathBuf::from("assets"),
            ..Default::default()
        };
        assert_eq!(config.file_source().layer_path(3), PathBuf::from("assets/layer-3.json"));
    }
}
