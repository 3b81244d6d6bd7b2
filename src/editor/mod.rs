//! Editor state: the mutable brick collection, selection, tools and history.

pub mod config;
pub mod history;
pub mod selection;
pub mod store;

pub use config::EditorConfig;
pub use history::{History, Snapshot};
pub use selection::{Selection, SelectionMode};
pub use store::{EditorStore, ToolMode};
