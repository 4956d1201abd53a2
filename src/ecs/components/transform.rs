//! Transform component for ECS entities.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// World-space placement of an entity.
///
/// Rotation is stored as Euler angles in degrees, applied extrinsically
/// about X, then Y, then Z. Physics ignores rotation entirely: boxes are
/// always treated as axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in degrees (extrinsic X-Y-Z).
    pub rotation: Vec3,
    /// Per-axis scale. Expected to be non-negative.
    pub scale: Vec3,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Builder-style scale override.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder-style rotation override (degrees).
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotation as a quaternion.
    pub fn rotation_quat(&self) -> Quat {
        // Extrinsic X-Y-Z is intrinsic Z-Y-X: R = Rz * Ry * Rx.
        Quat::from_euler(
            EulerRot::ZYX,
            self.rotation.z.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
        )
    }

    /// Convert to a 4x4 matrix (translation * rotation * scale).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
