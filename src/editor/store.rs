//! The editor store: the authoritative brick collection.
//!
//! Structural operations (add, delete, clear, import) record a history
//! snapshot. Continuous edits (move, rotate, recolor) change bricks in place
//! without one. Placement checks are queries only; nothing here refuses an
//! overlapping or unsupported brick.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::types::{DVec3, Footprint, Result};
use crate::format::{generate_id, parse_brick_data, EditorBrick, EditorExport};
use crate::grid;
use crate::math::Ray;
use super::config::EditorConfig;
use super::history::{History, Snapshot};
use super::selection::{Selection, SelectionMode};

/// Active editing tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolMode {
    #[default]
    Add,
    Move,
    Delete,
    Rotate,
    Color,
}

pub struct EditorStore {
    config: EditorConfig,
    bricks: Vec<Arc<EditorBrick>>,
    selection: Selection,
    selection_mode: SelectionMode,
    tool_mode: ToolMode,
    current_color: String,
    current_size: Footprint,
    history: History,
}

impl EditorStore {
    /// Create an empty store; history starts with the empty collection
    pub fn new(config: EditorConfig) -> Self {
        let history = History::new(config.max_history, Arc::from(Vec::new()));
        Self {
            current_color: config.default_color.clone(),
            current_size: config.default_size,
            config,
            bricks: Vec::new(),
            selection: Selection::default(),
            selection_mode: SelectionMode::default(),
            tool_mode: ToolMode::default(),
            history,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn bricks(&self) -> impl Iterator<Item = &EditorBrick> {
        self.bricks.iter().map(|b| b.as_ref())
    }

    pub fn brick(&self, id: &str) -> Option<&EditorBrick> {
        self.bricks.iter().find(|b| b.id == id).map(|b| b.as_ref())
    }

    pub fn brick_count(&self) -> usize {
        self.bricks.len()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_brick_id(&self) -> Option<&str> {
        self.selection.primary()
    }

    pub fn selected_brick_ids(&self) -> &[String] {
        self.selection.ids()
    }

    /// The primary selected brick, if it still exists
    pub fn selected_brick(&self) -> Option<&EditorBrick> {
        self.selection.primary().and_then(|id| self.brick(id))
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool_mode
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    pub fn current_color(&self) -> &str {
        &self.current_color
    }

    pub fn current_size(&self) -> Footprint {
        self.current_size
    }

    pub fn available_sizes(&self) -> &[Footprint] {
        &self.config.available_sizes
    }

    pub fn grid_size(&self) -> f64 {
        self.config.grid_size
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ------------------------------------------------------------------
    // Placement queries
    // ------------------------------------------------------------------

    pub fn is_position_occupied(&self, position: DVec3, size: Footprint) -> bool {
        grid::is_occupied(position, size, &self.bricks)
    }

    pub fn has_support(&self, position: DVec3, size: Footprint) -> bool {
        grid::has_support(position, size, &self.bricks)
    }

    /// Free and fully supported
    pub fn is_position_valid(&self, position: DVec3, size: Footprint) -> bool {
        grid::is_valid_placement(position, size, &self.bricks)
    }

    pub fn brick_at_position(&self, point: DVec3) -> Option<&EditorBrick> {
        grid::brick_at(point, &self.bricks).map(|b| b.as_ref())
    }

    /// Nearest brick under a picking ray
    pub fn pick_brick(&self, ray: &Ray) -> Option<&EditorBrick> {
        grid::pick_brick(ray, &self.bricks).map(|(b, _)| b.as_ref())
    }

    // ------------------------------------------------------------------
    // Structural edits (recorded in history)
    // ------------------------------------------------------------------

    /// Add a brick with the current size and color, select it, and return its id.
    ///
    /// Does not validate the placement; check [`Self::is_position_valid`] first
    /// when enforcement is wanted.
    pub fn add_brick(&mut self, position: DVec3) -> String {
        let brick = EditorBrick {
            id: generate_id(),
            position,
            rotation: 0.0,
            size: self.current_size,
            color: self.current_color.clone(),
        };
        let id = brick.id.clone();
        log::debug!("Adding brick {} at {} ({})", id, position, brick.size);

        self.bricks.push(Arc::new(brick));
        self.selection.replace(&id);
        self.save_history();
        id
    }

    /// Remove a brick by id. Returns false (and records nothing) if absent.
    pub fn delete_brick(&mut self, id: &str) -> bool {
        let Some(index) = self.bricks.iter().position(|b| b.id == id) else {
            return false;
        };
        self.bricks.remove(index);
        self.selection.remove(id);
        log::debug!("Deleted brick {}", id);
        self.save_history();
        true
    }

    pub fn clear_all_bricks(&mut self) {
        log::debug!("Clearing {} bricks", self.bricks.len());
        self.bricks.clear();
        self.selection.clear();
        self.save_history();
    }

    /// Replace the whole collection. Duplicate or empty ids are re-keyed.
    pub fn import_bricks(&mut self, bricks: Vec<EditorBrick>) {
        self.bricks = with_unique_ids(bricks).into_iter().map(Arc::new).collect();
        self.selection.clear();
        self.save_history();
    }

    /// Import any supported JSON document.
    ///
    /// Returns false when the text cannot be parsed or holds no bricks; the
    /// store is left untouched in that case.
    pub fn import_from_json(&mut self, json: &str) -> bool {
        let bricks = match parse_brick_data(json) {
            Ok(bricks) => bricks,
            Err(e) => {
                log::error!("Failed to import brick JSON: {}", e);
                return false;
            }
        };
        if bricks.is_empty() {
            log::warn!("Brick JSON contained no bricks; nothing imported");
            return false;
        }
        log::info!("Imported {} bricks", bricks.len());
        self.import_bricks(bricks);
        true
    }

    // ------------------------------------------------------------------
    // Continuous edits (not recorded)
    // ------------------------------------------------------------------

    pub fn move_brick(&mut self, id: &str, position: DVec3) -> bool {
        self.with_brick_mut(id, |b| b.position = position)
    }

    pub fn rotate_brick(&mut self, id: &str, rotation: f64) -> bool {
        self.with_brick_mut(id, |b| b.rotation = rotation)
    }

    pub fn change_brick_color(&mut self, id: &str, color: &str) -> bool {
        self.with_brick_mut(id, |b| b.color = color.to_string())
    }

    // ------------------------------------------------------------------
    // Selection and tool state
    // ------------------------------------------------------------------

    pub fn select_brick(&mut self, id: Option<&str>) {
        self.selection.select(self.selection_mode, id);
    }

    pub fn select_all(&mut self) {
        let ids = self.bricks.iter().map(|b| b.id.clone()).collect();
        self.selection.set_all(ids);
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        self.tool_mode = mode;
    }

    /// Switching to single mode keeps only the primary selection
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
        if mode == SelectionMode::Single {
            self.selection.collapse_to_primary();
        }
    }

    pub fn set_current_color(&mut self, color: impl Into<String>) {
        self.current_color = color.into();
    }

    pub fn set_current_size(&mut self, size: Footprint) {
        self.current_size = size;
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Owned copy of every brick
    pub fn export_bricks(&self) -> Vec<EditorBrick> {
        self.bricks().cloned().collect()
    }

    /// Editor export document with metadata
    pub fn export_to_json(&self) -> Result<String> {
        EditorExport::new(self.export_bricks(), self.config.grid_size).to_json()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn snapshot(&self) -> Snapshot {
        self.bricks.iter().cloned().collect()
    }

    fn save_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        self.bricks = snapshot.to_vec();
        self.cleanup_selection();
    }

    /// Drop selected ids that no longer exist
    fn cleanup_selection(&mut self) {
        let valid: HashSet<&str> = self.bricks.iter().map(|b| b.id.as_str()).collect();
        self.selection.prune(&valid);
    }

    /// Edit a brick copy-on-write so snapshots sharing it stay intact
    fn with_brick_mut(&mut self, id: &str, edit: impl FnOnce(&mut EditorBrick)) -> bool {
        match self.bricks.iter_mut().find(|b| b.id == id) {
            Some(brick) => {
                edit(Arc::make_mut(brick));
                true
            }
            None => false,
        }
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

/// Give every brick a distinct, non-empty id
fn with_unique_ids(bricks: Vec<EditorBrick>) -> Vec<EditorBrick> {
    let mut seen = HashSet::with_capacity(bricks.len());
    bricks
        .into_iter()
        .map(|mut brick| {
            if brick.id.is_empty() || seen.contains(&brick.id) {
                let fresh = generate_id();
                if !brick.id.is_empty() {
                    log::warn!("Duplicate brick id {} re-keyed as {}", brick.id, fresh);
                }
                brick.id = fresh;
            }
            seen.insert(brick.id.clone());
            brick
        })
        .collect()
}
