//! Multi-layer render state.
//!
//! A [`LayerManager`] owns a fixed number of layers and decides which must be
//! fetched, which may be evicted and what the renderer should draw. Fetching
//! itself goes through a [`LayerLoader`], an owned per-index cache in front of
//! a [`LayerSource`].

pub mod config;
pub mod loader;
pub mod manager;

pub use config::ViewerConfig;
pub use loader::{FileLayerSource, LayerLoader, LayerSource};
pub use manager::{LayerManager, PerformanceInfo, RenderStats};

use crate::brick::Brick;

/// One horizontal slab of bricks.
///
/// `loading` and `loaded` are never both set once a load settles. Visibility
/// is independent of load state: a visible layer without data is what
/// triggers a fetch.
#[derive(Clone, Debug, Default)]
pub struct Layer {
    pub index: u32,
    pub bricks: Vec<Brick>,
    pub visible: bool,
    pub loading: bool,
    pub loaded: bool,
}

impl Layer {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Visible with data in hand
    pub fn is_renderable(&self) -> bool {
        self.visible && self.loaded
    }

    /// Neither loaded nor in flight
    pub fn needs_fetch(&self) -> bool {
        !self.loaded && !self.loading
    }
}
