//! Brick geometry classification

use crate::core::types::Footprint;
use crate::format::ViewerBrick;

/// Geometric type of a brick, decided once when the brick is built
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BrickKind {
    /// Single-cell block
    Cube,
    /// Multi-cell flat block
    Plate,
    /// Round brick; any record with a positive radius
    Cylinder { radius: f64, thickness: f64 },
}

impl BrickKind {
    /// Classify a viewer record. The cylinder check wins over the footprint check.
    pub fn classify(record: &ViewerBrick) -> Self {
        if record.circle_radius > 0.0 {
            BrickKind::Cylinder {
                radius: record.circle_radius,
                thickness: record.cylinder_thickness,
            }
        } else if record.shape == Footprint::UNIT {
            BrickKind::Cube
        } else {
            BrickKind::Plate
        }
    }

    /// Stable lowercase name used by renderers
    pub fn tag(&self) -> &'static str {
        match self {
            BrickKind::Cube => "cube",
            BrickKind::Plate => "plate",
            BrickKind::Cylinder { .. } => "cylinder",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DVec3;
    use crate::format::standard_brick;

    #[test]
    fn test_classify() {
        let cube = standard_brick(DVec3::ZERO, Footprint::UNIT, "#ff0000", false);
        let plate = standard_brick(DVec3::ZERO, Footprint::new(2, 4), "#ff0000", false);
        assert_eq!(BrickKind::classify(&cube), BrickKind::Cube);
        assert_eq!(BrickKind::classify(&plate), BrickKind::Plate);
    }

    #[test]
    fn test_cylinder_takes_precedence() {
        let round = standard_brick(DVec3::ZERO, Footprint::UNIT, "#00ff00", true);
        match BrickKind::classify(&round) {
            BrickKind::Cylinder { radius, thickness } => {
                assert!(radius > 0.0);
                assert_eq!(thickness, 0.002);
            }
            other => panic!("expected cylinder, got {:?}", other),
        }
        assert_eq!(BrickKind::classify(&round).tag(), "cylinder");
    }
}
