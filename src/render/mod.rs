//! Renderer-facing data derived from classified bricks.
//!
//! Nothing here talks to a GPU. Bricks are grouped by shared geometry into
//! instancing batches whose per-instance data is `bytemuck::Pod`, ready to be
//! uploaded by whichever backend draws them.

pub mod instancing;

pub use instancing::{GeometryKey, InstanceBatch, InstanceBatcher, InstanceData};
