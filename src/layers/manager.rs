//! Layer visibility, load state and render statistics

use futures::future::join_all;
use rayon::prelude::*;
use serde::Serialize;

use crate::brick::Brick;
use crate::format::ViewerBrick;
use crate::render::{InstanceBatch, InstanceBatcher};
use super::config::ViewerConfig;
use super::loader::{LayerLoader, LayerSource};
use super::Layer;

/// Aggregate numbers for the current render state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderStats {
    /// Bricks held by any layer
    pub total_bricks: usize,
    /// Bricks in layers that are visible and loaded
    pub visible_bricks: usize,
    /// Layers marked visible, loaded or not
    pub rendered_layers: usize,
    /// Batches produced by the last instancing rebuild
    pub instanced_mesh_count: usize,
    /// Distinct geometries built so far
    pub brick_type_cache_size: usize,
}

/// Render stats plus an estimate of resident brick memory
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInfo {
    #[serde(flatten)]
    pub stats: RenderStats,
    /// Bytes held by layer bricks and instance buffers
    pub resident_bytes: usize,
}

/// Tracks a fixed set of layers
pub struct LayerManager {
    layers: Vec<Layer>,
    current_layer: usize,
    stats: RenderStats,
    batcher: InstanceBatcher,
    batches: Vec<InstanceBatch>,
}

impl LayerManager {
    /// Create `max_layers` hidden, unloaded layers
    pub fn new(max_layers: usize) -> Self {
        let layers = (0..max_layers)
            .map(|i| Layer::new(u32::try_from(i).unwrap_or(u32::MAX)))
            .collect();
        Self {
            layers,
            current_layer: 0,
            stats: RenderStats::default(),
            batcher: InstanceBatcher::new(),
            batches: Vec::new(),
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.max_layers)
    }

    pub fn max_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: u32) -> Option<&Layer> {
        self.layers.get(index as usize)
    }

    pub fn current_layer(&self) -> usize {
        self.current_layer
    }

    pub fn visible_layers(&self) -> Vec<bool> {
        self.layers.iter().map(|l| l.visible).collect()
    }

    pub fn render_stats(&self) -> RenderStats {
        self.stats
    }

    pub fn instance_batches(&self) -> &[InstanceBatch] {
        &self.batches
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    /// Set every layer's visibility; layers past the end of `flags` are hidden
    pub fn update_layer_visibility(&mut self, flags: &[bool]) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.visible = flags.get(i).copied().unwrap_or(false);
        }
        self.update_stats();
    }

    pub fn toggle_layer(&mut self, index: u32) {
        if let Some(layer) = self.layers.get_mut(index as usize) {
            layer.visible = !layer.visible;
            self.update_stats();
        }
    }

    pub fn select_all(&mut self) {
        self.layers.iter_mut().for_each(|l| l.visible = true);
        self.update_stats();
    }

    pub fn deselect_all(&mut self) {
        self.layers.iter_mut().for_each(|l| l.visible = false);
        self.update_stats();
    }

    /// Step the current layer down and show everything up to it
    pub fn prev_layer(&mut self) -> bool {
        if self.current_layer == 0 {
            return false;
        }
        self.current_layer -= 1;
        self.reveal_to_current();
        true
    }

    /// Step the current layer up and show everything up to it
    pub fn next_layer(&mut self) -> bool {
        if self.current_layer + 1 >= self.layers.len() {
            return false;
        }
        self.current_layer += 1;
        self.reveal_to_current();
        true
    }

    /// Show the first `count` layers and hide the rest
    pub fn set_render_layers(&mut self, count: usize) {
        let flags: Vec<bool> = (0..self.layers.len()).map(|i| i < count).collect();
        self.update_layer_visibility(&flags);
    }

    fn reveal_to_current(&mut self) {
        let current = self.current_layer;
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.visible = i <= current;
        }
        self.update_stats();
    }

    // ------------------------------------------------------------------
    // Load state
    // ------------------------------------------------------------------

    /// Visible layers with no data and no fetch in flight
    pub fn layers_to_load(&self) -> Vec<u32> {
        self.layers
            .iter()
            .filter(|l| l.visible && l.needs_fetch())
            .map(|l| l.index)
            .collect()
    }

    /// Unloaded layers within `range` of `center`, visible or not
    pub fn preload_adjacent_layers(&self, center: usize, range: usize) -> Vec<u32> {
        let Some(last) = self.layers.len().checked_sub(1) else {
            return Vec::new();
        };
        let start = center.saturating_sub(range);
        let end = center.saturating_add(range).min(last);
        if start > end {
            return Vec::new();
        }
        self.layers[start..=end]
            .iter()
            .filter(|l| l.needs_fetch())
            .map(|l| l.index)
            .collect()
    }

    /// Drop the bricks of hidden layers. Re-showing one triggers a new fetch.
    pub fn cleanup_unused_layers(&mut self) -> usize {
        let mut evicted = 0;
        for layer in self.layers.iter_mut().filter(|l| l.loaded && !l.visible) {
            layer.bricks = Vec::new();
            layer.loaded = false;
            evicted += 1;
        }
        if evicted > 0 {
            log::debug!("Evicted {} hidden layers", evicted);
        }
        self.update_stats();
        evicted
    }

    /// Install fetched records into a layer, marking it loaded
    pub fn set_layer_data(&mut self, index: u32, records: &[ViewerBrick]) -> bool {
        let Some(layer) = self.layers.get_mut(index as usize) else {
            log::warn!("Ignoring data for layer {} (max {})", index, self.layers.len());
            return false;
        };
        layer.bricks = records.par_iter().map(Brick::from_record).collect();
        layer.loaded = true;
        layer.loading = false;
        self.update_stats();
        true
    }

    pub fn set_layer_loading(&mut self, index: u32, loading: bool) {
        if let Some(layer) = self.layers.get_mut(index as usize) {
            layer.loading = loading;
        }
    }

    /// Fetch every layer in [`Self::layers_to_load`] concurrently.
    ///
    /// Returns how many layers were installed. Failed layers go back to
    /// unloaded and not loading, so they are picked up again next time.
    pub async fn load_pending<S: LayerSource>(&mut self, loader: &LayerLoader<S>) -> usize {
        let pending = self.layers_to_load();
        self.load_layers(loader, &pending).await
    }

    /// Fetch and install the given layers concurrently
    pub async fn load_layers<S: LayerSource>(&mut self, loader: &LayerLoader<S>, indices: &[u32]) -> usize {
        if indices.is_empty() {
            return 0;
        }
        for &index in indices {
            self.set_layer_loading(index, true);
        }

        let results = join_all(
            indices
                .iter()
                .map(|&index| async move { (index, loader.load_layer(index).await) }),
        )
        .await;

        let mut installed = 0;
        for (index, result) in results {
            match result {
                Ok(bricks) => {
                    if self.set_layer_data(index, &bricks) {
                        installed += 1;
                    }
                }
                Err(e) => {
                    log::warn!("Layer {} left unloaded: {}", index, e);
                    self.set_layer_loading(index, false);
                }
            }
        }
        installed
    }

    // ------------------------------------------------------------------
    // Stats and instancing
    // ------------------------------------------------------------------

    /// Regroup renderable bricks into instancing batches
    pub fn rebuild_instances(&mut self) -> &[InstanceBatch] {
        let bricks: Vec<&Brick> = self
            .layers
            .iter()
            .filter(|l| l.is_renderable())
            .flat_map(|l| l.bricks.iter())
            .collect();
        self.batches = self.batcher.build(&bricks);
        self.stats.instanced_mesh_count = self.batches.len();
        self.stats.brick_type_cache_size = self.batcher.cache_size();
        &self.batches
    }

    pub fn performance_info(&self) -> PerformanceInfo {
        let brick_bytes = self.stats.total_bricks * std::mem::size_of::<Brick>();
        let instance_bytes: usize = self.batches.iter().map(|b| b.as_bytes().len()).sum();
        PerformanceInfo {
            stats: self.stats,
            resident_bytes: brick_bytes + instance_bytes,
        }
    }

    fn update_stats(&mut self) {
        self.stats.total_bricks = self.layers.iter().map(|l| l.bricks.len()).sum();
        self.stats.visible_bricks = self
            .layers
            .iter()
            .filter(|l| l.is_renderable())
            .map(|l| l.bricks.len())
            .sum();
        self.stats.rendered_layers = self.layers.iter().filter(|l| l.visible).count();
    }
}
