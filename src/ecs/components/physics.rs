//! Physics components for ECS entities.

use glam::Vec3;

/// Rigid body component.
///
/// There is no static body type: an immovable body is a body with
/// `use_gravity == false`. Mass only weights collision response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec3,
    pub mass: f32,
    pub use_gravity: bool,
    /// Resting on a supporting surface. Recomputed every step; suppresses gravity.
    pub is_grounded: bool,
    /// Coefficient of restitution (0.0 - 1.0).
    pub restitution: f32,
    /// Friction coefficient (0.0 - 1.0). Against terrain this is the fraction
    /// of horizontal velocity kept per contact tick.
    pub friction: f32,
}

impl RigidBody {
    /// Create a new gravity-affected rigid body with the given mass.
    pub fn new_dynamic(mass: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass,
            use_gravity: true,
            is_grounded: false,
            restitution: 0.3,
            friction: 0.5,
        }
    }

    /// Create a body that ignores gravity (walls, floating platforms).
    pub fn new_static() -> Self {
        Self {
            use_gravity: false,
            ..Self::new_dynamic(1.0)
        }
    }

    /// Builder-style initial velocity.
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder-style restitution.
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Builder-style friction.
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new_dynamic(1.0)
    }
}

/// Collision shape.
///
/// Every variant carries a `radius`: the bounding sphere used wherever an
/// exact test is not implemented (mixed shape pairs, meshes, terrain).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Sphere {
        radius: f32,
    },
    /// Axis-aligned box. Half extents are `size * transform.scale * 0.5`.
    Box {
        size: Vec3,
        radius: f32,
    },
    /// Declared but not tested exactly; collides as its bounding sphere.
    Mesh {
        radius: f32,
    },
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Collider::Sphere { radius }
    }

    /// Box with its bounding radius derived from `size`.
    pub fn cuboid(size: Vec3) -> Self {
        Collider::Box {
            size,
            radius: size.length() * 0.5,
        }
    }

    pub fn mesh(radius: f32) -> Self {
        Collider::Mesh { radius }
    }

    /// Sphere-approximation radius.
    #[inline]
    pub fn radius(&self) -> f32 {
        match *self {
            Collider::Sphere { radius } => radius,
            Collider::Box { radius, .. } => radius,
            Collider::Mesh { radius } => radius,
        }
    }

    /// Builder-style override of the approximation radius.
    pub fn with_radius(self, radius: f32) -> Self {
        match self {
            Collider::Sphere { .. } => Collider::Sphere { radius },
            Collider::Box { size, .. } => Collider::Box { size, radius },
            Collider::Mesh { .. } => Collider::Mesh { radius },
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Collider::Sphere { radius: 0.5 }
    }
}
