use glam::{Quat, Vec3};
use std::f32::consts::PI;

/// One of the six faces of the canonical cube.
///
/// Every face is the `z = +1` quad rotated into place by a fixed axis/angle
/// pair from [`FACE_ROTATIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Front = 0,
    Right = 1,
    Back = 2,
    Left = 3,
    Bottom = 4,
    Top = 5,
}

/// Axis/angle rotation that carries the front quad onto a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRotation {
    pub axis: Vec3,
    pub angle: f32,
}

/// Indexed by `Face as usize`.
pub const FACE_ROTATIONS: [FaceRotation; 6] = [
    FaceRotation { axis: Vec3::X, angle: 0.0 },
    FaceRotation { axis: Vec3::Y, angle: PI * 0.5 },
    FaceRotation { axis: Vec3::Y, angle: PI },
    FaceRotation { axis: Vec3::Y, angle: PI * 1.5 },
    FaceRotation { axis: Vec3::X, angle: PI * 0.5 },
    FaceRotation { axis: Vec3::X, angle: PI * -0.5 },
];

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Right,
        Face::Back,
        Face::Left,
        Face::Bottom,
        Face::Top,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn rotation(self) -> Quat {
        let r = FACE_ROTATIONS[self.index()];
        Quat::from_axis_angle(r.axis, r.angle)
    }

    /// Outward normal of the face on the unrotated cube.
    pub fn normal(self) -> Vec3 {
        self.rotation() * Vec3::Z
    }
}
