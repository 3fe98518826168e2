use strata_blocks::FaceRole;
use strata_geom::Vec3;

/// Cube face, z-up: `PosZ` is the top of a voxel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosZ = 0,
    NegZ = 1,
    PosX = 2,
    NegX = 3,
    PosY = 4,
    NegY = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosZ,
        Face::NegZ,
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
    ];

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosZ => Vec3::new(0.0, 0.0, 1.0),
            Face::NegZ => Vec3::new(0.0, 0.0, -1.0),
            Face::PosX => Vec3::new(1.0, 0.0, 0.0),
            Face::NegX => Vec3::new(-1.0, 0.0, 0.0),
            Face::PosY => Vec3::new(0.0, 1.0, 0.0),
            Face::NegY => Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
        }
    }

    /// Classifies the face into top/bottom/side role for texture lookup.
    #[inline]
    pub fn role(self) -> FaceRole {
        match self {
            Face::PosZ => FaceRole::Top,
            Face::NegZ => FaceRole::Bottom,
            _ => FaceRole::Side,
        }
    }
}
