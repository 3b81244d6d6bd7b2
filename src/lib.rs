//! Brickyard - layered brick viewer and editor core
//!
//! Grid snapping and placement checks, a classified brick model, conversion
//! between the viewer and editor data formats, an undoable editor store and
//! a multi-layer render state manager.

pub mod core;
pub mod math;
pub mod grid;
pub mod brick;
pub mod format;
pub mod editor;
pub mod layers;
pub mod render;
