//! Rigid body integration functions.

use glam::Vec3;

use crate::ecs::components::physics::RigidBody;
use crate::ecs::components::transform::Transform;

/// Accelerate a body by `gravity` unless it ignores gravity or is grounded.
#[inline]
pub fn apply_gravity(rb: &mut RigidBody, gravity: Vec3, dt: f32) {
    if rb.use_gravity && !rb.is_grounded {
        rb.velocity += gravity * dt;
    }
}

/// Integrate position: p += v * dt.
///
/// Semi-implicit Euler when called after [`apply_gravity`] in the same tick.
#[inline]
pub fn integrate(transform: &mut Transform, rb: &RigidBody, dt: f32) {
    transform.position += rb.velocity * dt;
}

/// Stop a body and clear its grounded state so it falls again next step.
pub fn reset_body(rb: &mut RigidBody) {
    rb.velocity = Vec3::ZERO;
    rb.is_grounded = false;
}

/// Teleport a body and [`reset_body`] it.
pub fn place_body(transform: &mut Transform, rb: &mut RigidBody, position: Vec3) {
    transform.position = position;
    reset_body(rb);
}
