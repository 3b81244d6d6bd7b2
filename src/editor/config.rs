//! Editor configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Footprint, Result};

/// Configuration for an editor store.
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid cell size in world units
    pub grid_size: f64,
    /// Maximum number of history snapshots kept
    pub max_history: usize,
    /// Color of newly added bricks (`#rrggbb`)
    pub default_color: String,
    /// Footprint of newly added bricks
    pub default_size: Footprint,
    /// Footprints offered by the size picker
    pub available_sizes: Vec<Footprint>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            max_history: 50,
            default_color: "#ff6b6b".to_string(),
            default_size: Footprint::UNIT,
            available_sizes: vec![
                Footprint(1, 1),
                Footprint(1, 2),
                Footprint(2, 1),
                Footprint(2, 2),
                Footprint(1, 3),
                Footprint(3, 1),
                Footprint(2, 3),
                Footprint(3, 2),
                Footprint(3, 3),
                Footprint(1, 4),
                Footprint(4, 1),
                Footprint(2, 4),
                Footprint(4, 2),
            ],
        }
    }
}

impl EditorConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the store cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.grid_size.is_nan() || self.grid_size <= 0.0 {
            return Err(Error::Config(format!("grid_size must be positive, got {}", self.grid_size)));
        }
        if self.max_history == 0 {
            return Err(Error::Config("max_history must be at least 1".into()));
        }
        if let Some(bad) = std::iter::once(&self.default_size)
            .chain(&self.available_sizes)
            .find(|s| !s.is_valid())
        {
            return Err(Error::Config(format!("footprint {} has a zero extent", bad)));
        }
        Ok(())
    }
}
