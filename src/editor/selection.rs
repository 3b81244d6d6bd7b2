//! Selection state: id references into the brick collection.
//!
//! Ids are weak references. Whenever bricks are removed or the collection
//! is replaced, call [`Selection::prune`] with the ids that still exist.

use std::collections::HashSet;

/// How clicks change the selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// A click replaces the selection
    #[default]
    Single,
    /// A click toggles membership
    Multiple,
    /// Region selection, driven by the caller through [`Selection::set_all`]
    Box,
}

/// Primary selected id plus the full selected set (in selection order)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    primary: Option<String>,
    ids: Vec<String>,
}

impl Selection {
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.ids.is_empty()
    }

    /// Apply a click on `id` (or on empty space when `None`)
    pub fn select(&mut self, mode: SelectionMode, id: Option<&str>) {
        match mode {
            SelectionMode::Single => match id {
                Some(id) => self.replace(id),
                None => self.clear(),
            },
            SelectionMode::Multiple => {
                if let Some(id) = id {
                    if let Some(pos) = self.ids.iter().position(|s| s == id) {
                        self.ids.remove(pos);
                    } else {
                        self.ids.push(id.to_string());
                    }
                    self.primary = self.ids.first().cloned();
                }
            }
            SelectionMode::Box => {}
        }
    }

    /// Select exactly one id
    pub fn replace(&mut self, id: &str) {
        self.primary = Some(id.to_string());
        self.ids = vec![id.to_string()];
    }

    /// Select a set of ids; the first becomes primary
    pub fn set_all(&mut self, ids: Vec<String>) {
        self.primary = ids.first().cloned();
        self.ids = ids;
    }

    pub fn clear(&mut self) {
        self.primary = None;
        self.ids.clear();
    }

    /// Drop a single id from both the primary slot and the set
    pub fn remove(&mut self, id: &str) {
        if self.primary.as_deref() == Some(id) {
            self.primary = None;
        }
        self.ids.retain(|s| s != id);
    }

    /// Reduce the set to just the primary id
    pub fn collapse_to_primary(&mut self) {
        self.ids = self.primary.iter().cloned().collect();
    }

    /// Keep only ids present in `valid`; re-elect the primary if it vanished
    pub fn prune(&mut self, valid: &HashSet<&str>) {
        self.ids.retain(|id| valid.contains(id.as_str()));
        let primary_valid = self.primary.as_deref().is_some_and(|id| valid.contains(id));
        if !primary_valid {
            self.primary = self.ids.first().cloned();
        }
    }
}
