//! Editor format: id-keyed bricks used for interactive authoring

use serde::{Deserialize, Serialize};

use crate::core::types::{DVec3, Footprint, Result};
use crate::grid::Placed;
use super::clock::now_iso8601;

/// Version written into export metadata
pub const EXPORT_VERSION: &str = "1.0";

/// One brick in the editor format
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorBrick {
    /// Unique within a store; empty ids are replaced on import
    #[serde(default)]
    pub id: String,
    /// Grid-aligned world position; Y encodes the layer
    pub position: DVec3,
    /// Yaw in degrees
    #[serde(default)]
    pub rotation: f64,
    pub size: Footprint,
    /// `#rrggbb`
    pub color: String,
}

impl Placed for EditorBrick {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn footprint(&self) -> Footprint {
        self.size
    }
}

/// Metadata block of an editor export
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub version: String,
    /// ISO-8601 UTC
    pub export_date: String,
    pub total_bricks: usize,
    pub grid_size: f64,
}

/// Editor export document: `{ "bricks": [...], "metadata": {...} }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorExport {
    pub bricks: Vec<EditorBrick>,
    pub metadata: ExportMetadata,
}

impl EditorExport {
    /// Wrap bricks with freshly stamped metadata
    pub fn new(bricks: Vec<EditorBrick>, grid_size: f64) -> Self {
        let metadata = ExportMetadata {
            version: EXPORT_VERSION.to_string(),
            export_date: now_iso8601(),
            total_bricks: bricks.len(),
            grid_size,
        };
        Self { bricks, metadata }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
