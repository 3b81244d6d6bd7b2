//! Geometry-keyed instancing batches

use std::collections::{HashMap, HashSet};

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;

use crate::brick::{Brick, BrickKind};
use crate::core::types::{EulerRot, Footprint, Mat4, Quat};

/// Per-instance data for GPU upload (matches a `mat4x4<f32>, vec4<f32>` vertex layout)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Column-major model matrix (64 bytes, offset 0)
    pub model: [[f32; 4]; 4],
    /// RGBA color (16 bytes, offset 64)
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn from_brick(brick: &Brick) -> Self {
        let r = brick.rotation.as_vec3();
        let rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        let model = Mat4::from_rotation_translation(rotation, brick.position.as_vec3());
        let [red, green, blue] = brick.color;
        Self {
            model: model.to_cols_array_2d(),
            color: [red as f32, green as f32, blue as f32, 1.0],
        }
    }
}

/// Identity of a shared geometry. Bricks with equal keys draw from one mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    pub kind: &'static str,
    pub shape: Footprint,
    /// `f64::to_bits` of the horizontal extent (edge length or radius)
    extent_bits: u64,
    /// `f64::to_bits` of the vertical extent
    thickness_bits: u64,
}

impl GeometryKey {
    pub fn of(brick: &Brick) -> Self {
        let (extent, thickness) = match brick.kind {
            BrickKind::Cylinder { radius, thickness } => (radius, thickness),
            BrickKind::Cube | BrickKind::Plate => (brick.size, brick.thickness),
        };
        Self {
            kind: brick.kind.tag(),
            shape: brick.shape,
            extent_bits: extent.to_bits(),
            thickness_bits: thickness.to_bits(),
        }
    }

    pub fn extent(&self) -> f64 {
        f64::from_bits(self.extent_bits)
    }

    pub fn thickness(&self) -> f64 {
        f64::from_bits(self.thickness_bits)
    }
}

/// All instances sharing one geometry
#[derive(Clone, Debug)]
pub struct InstanceBatch {
    pub key: GeometryKey,
    pub instances: Vec<InstanceData>,
}

impl InstanceBatch {
    /// Raw bytes of the instance buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Groups bricks into batches and remembers every geometry it has built.
///
/// The geometry cache outlives individual rebuilds, the way a renderer keeps
/// meshes around once created.
#[derive(Debug, Default)]
pub struct InstanceBatcher {
    geometry_cache: HashSet<GeometryKey>,
}

impl InstanceBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build batches in first-seen key order
    pub fn build(&mut self, bricks: &[&Brick]) -> Vec<InstanceBatch> {
        let prepared: Vec<(GeometryKey, InstanceData)> = bricks
            .par_iter()
            .map(|brick| (GeometryKey::of(brick), InstanceData::from_brick(brick)))
            .collect();

        let mut batches: Vec<InstanceBatch> = Vec::new();
        let mut slots: HashMap<GeometryKey, usize> = HashMap::new();
        for (key, instance) in prepared {
            let slot = *slots.entry(key).or_insert_with(|| {
                batches.push(InstanceBatch { key, instances: Vec::new() });
                batches.len() - 1
            });
            batches[slot].instances.push(instance);
        }

        for key in slots.into_keys() {
            if self.geometry_cache.insert(key) {
                log::debug!(
                    "New {} geometry {} (extent {}, thickness {})",
                    key.kind,
                    key.shape,
                    key.extent(),
                    key.thickness()
                );
            }
        }
        batches
    }

    /// Number of distinct geometries built so far
    pub fn cache_size(&self) -> usize {
        self.geometry_cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.geometry_cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DVec3, Vec3};
    use crate::format::{
        standard_brick, STANDARD_CIRCLE_RADIUS, STANDARD_CYLINDER_THICKNESS, STANDARD_SIZE,
    };

    fn cube_at(x: f64) -> Brick {
        Brick::from_record(&standard_brick(DVec3::new(x, 0.0, 0.0), Footprint::UNIT, "#ff0000", false))
    }

    #[test]
    fn test_instance_data_layout() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 80);
    }

    #[test]
    fn test_instance_translation_and_color() {
        let brick = cube_at(2.0);
        let data = InstanceData::from_brick(&brick);
        assert_eq!(data.model[3][0], 2.0);
        assert_eq!(data.model[3][3], 1.0);
        assert!((data.color[0] - 1.0).abs() < 1e-6);
        assert_eq!(data.color[3], 1.0);

        // Base yaw plus East is a half turn about Y
        let model = Mat4::from_cols_array_2d(&data.model);
        let x_axis = model.transform_vector3(Vec3::X);
        assert!((x_axis - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_batches_group_by_geometry() {
        let a = cube_at(0.0);
        let b = cube_at(1.0);
        let plate = Brick::from_record(&standard_brick(DVec3::ZERO, Footprint::new(2, 2), "#00ff00", false));
        let round = Brick::from_record(&standard_brick(DVec3::ZERO, Footprint::UNIT, "#0000ff", true));

        let mut batcher = InstanceBatcher::new();
        let batches = batcher.build(&[&a, &plate, &b, &round]);

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].key.kind, "cube");
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1].key.kind, "plate");
        assert_eq!(batches[2].key.kind, "cylinder");
        assert_eq!(batches[2].key.extent(), STANDARD_CIRCLE_RADIUS);
        assert_eq!(batches[2].key.thickness(), STANDARD_CYLINDER_THICKNESS);
        assert_eq!(batches[0].key.extent(), STANDARD_SIZE);
        assert_eq!(batches[0].as_bytes().len(), 160);
        assert_eq!(batcher.cache_size(), 3);
    }

    #[test]
    fn test_cache_persists_across_builds() {
        let a = cube_at(0.0);
        let plate = Brick::from_record(&standard_brick(DVec3::ZERO, Footprint::new(1, 2), "#00ff00", false));

        let mut batcher = InstanceBatcher::new();
        batcher.build(&[&a, &plate]);
        let batches = batcher.build(&[&a]);
        assert_eq!(batches.len(), 1);
        assert_eq!(batcher.cache_size(), 2);

        batcher.clear_cache();
        assert_eq!(batcher.cache_size(), 0);
    }

    #[test]
    fn test_empty_build() {
        let mut batcher = InstanceBatcher::new();
        assert!(batcher.build(&[]).is_empty());
    }
}
