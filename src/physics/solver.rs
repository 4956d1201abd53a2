//! Single-contact impulse resolver for pairs of dynamic bodies.
//!
//! Each detected contact is resolved once: positional separation, a normal
//! impulse with restitution, one friction impulse, then a grounded-flag
//! update. There is no iteration across contacts.

use tracing::debug;

use crate::ecs::components::physics::RigidBody;
use crate::ecs::components::transform::Transform;

use super::contact::Contact;
use super::PhysicsConfig;

/// How body masses weight a contact response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImpulseModel {
    /// Each body's share is the *other* body's mass over the total mass, and
    /// the normal impulse is multiplied by the opposing mass. Matches the
    /// behavior existing scenes were tuned against; physically correct only
    /// for two bodies of unit mass.
    #[default]
    MassWeighted,
    /// Standard inverse-mass weighting. Bodies with non-positive or infinite
    /// mass are immovable.
    InverseMass,
}

impl ImpulseModel {
    /// Per-body response gains `(a, b)`. Their sum is the impulse denominator.
    #[inline]
    fn gains(self, mass_a: f32, mass_b: f32) -> (f32, f32) {
        match self {
            ImpulseModel::MassWeighted => (mass_b, mass_a),
            ImpulseModel::InverseMass => (inverse_mass(mass_a), inverse_mass(mass_b)),
        }
    }

    /// Factor applied to the friction impulse before the per-body gains.
    #[inline]
    fn friction_scale(self, denominator: f32) -> f32 {
        match self {
            ImpulseModel::MassWeighted => 1.0,
            ImpulseModel::InverseMass => 1.0 / denominator,
        }
    }
}

#[inline]
fn inverse_mass(mass: f32) -> f32 {
    if mass > 0.0 && mass.is_finite() {
        1.0 / mass
    } else {
        0.0
    }
}

/// Resolve one contact between bodies A and B. `contact.normal` points from A to B.
///
/// Returns `true` if an impulse was applied (the bodies were approaching).
pub fn resolve_contact(
    transform_a: &mut Transform,
    rb_a: &mut RigidBody,
    transform_b: &mut Transform,
    rb_b: &mut RigidBody,
    contact: &Contact,
    config: &PhysicsConfig,
) -> bool {
    let normal = contact.normal;
    let model = config.impulse_model;
    let (gain_a, gain_b) = model.gains(rb_a.mass, rb_b.mass);
    let denominator = gain_a + gain_b;
    let solvable = denominator > 0.0;

    // 1. Positional correction, heavier body moves less
    if solvable {
        let correction = normal * contact.penetration;
        transform_a.position -= correction * (gain_a / denominator);
        transform_b.position += correction * (gain_b / denominator);
    }

    // 2. Normal impulse
    let relative_velocity = rb_b.velocity - rb_a.velocity;
    let velocity_along_normal = relative_velocity.dot(normal);

    if velocity_along_normal > 0.0 {
        return false;
    }

    let mut applied = false;
    if solvable {
        let restitution = rb_a.restitution.min(rb_b.restitution);
        let j = -(1.0 + restitution) * velocity_along_normal / denominator;
        let impulse = normal * j;
        rb_a.velocity -= impulse * gain_a;
        rb_b.velocity += impulse * gain_b;

        // 3. Friction from the pre-impulse tangential velocity
        let tangent = relative_velocity - normal * velocity_along_normal;
        if tangent.length() > config.friction_tangent_epsilon {
            let tangent = tangent.normalize();
            let friction = rb_a.friction.min(rb_b.friction);
            let jt = relative_velocity.dot(tangent) * friction * model.friction_scale(denominator);
            let friction_impulse = tangent * jt;
            rb_a.velocity += friction_impulse * gain_a;
            rb_b.velocity -= friction_impulse * gain_b;
        }
        applied = true;
    } else {
        debug!(
            "Skipping impulse: zero total mass response (masses {} and {})",
            rb_a.mass, rb_b.mass
        );
    }

    // 4. Grounded flag, set only, never cleared here
    if normal.y > config.grounded_normal_threshold {
        if rb_a.velocity.y <= 0.0 {
            rb_a.is_grounded = true;
        }
        if rb_b.velocity.y <= 0.0 {
            rb_b.is_grounded = true;
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn body(mass: f32, velocity: Vec3) -> RigidBody {
        RigidBody::new_dynamic(mass)
            .with_velocity(velocity)
            .with_restitution(0.5)
            .with_friction(0.5)
    }

    fn contact_x(penetration: f32) -> Contact {
        Contact {
            normal: Vec3::X,
            penetration,
        }
    }

    #[test]
    fn test_equal_mass_head_on() {
        let config = PhysicsConfig::default();
        let mut ta = Transform::from_position(Vec3::ZERO);
        let mut tb = Transform::from_position(Vec3::new(1.5, 0.0, 0.0));
        let mut a = body(1.0, Vec3::new(1.0, 0.0, 0.0));
        let mut b = body(1.0, Vec3::new(-1.0, 0.0, 0.0));

        let applied = resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.5), &config);
        assert!(applied);

        // Each body moves half the penetration
        let eps = 1e-5;
        assert!((ta.position.x + 0.25).abs() < eps);
        assert!((tb.position.x - 1.75).abs() < eps);

        // v_n = -2, j = 1.5 * 2 / 2 = 1.5
        assert!((a.velocity.x + 0.5).abs() < eps, "va = {:?}", a.velocity);
        assert!((b.velocity.x - 0.5).abs() < eps, "vb = {:?}", b.velocity);
    }

    #[test]
    fn test_separating_bodies_keep_velocity() {
        let config = PhysicsConfig::default();
        let mut ta = Transform::from_position(Vec3::ZERO);
        let mut tb = Transform::from_position(Vec3::new(1.5, 0.0, 0.0));
        let mut a = body(1.0, Vec3::new(-1.0, 0.0, 0.0));
        let mut b = body(1.0, Vec3::new(1.0, 0.0, 0.0));

        let applied = resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.5), &config);
        assert!(!applied);
        assert_eq!(a.velocity, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.velocity, Vec3::new(1.0, 0.0, 0.0));
        // Position correction still happens
        assert!((ta.position.x + 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_mass_weighted_heavier_moves_less() {
        let config = PhysicsConfig::default();
        let mut ta = Transform::from_position(Vec3::ZERO);
        let mut tb = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        let mut a = body(3.0, Vec3::ZERO);
        let mut b = body(1.0, Vec3::ZERO);

        resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.4), &config);

        let eps = 1e-5;
        assert!((ta.position.x + 0.1).abs() < eps, "a moved {}", ta.position.x);
        assert!((tb.position.x - 1.3).abs() < eps, "b at {}", tb.position.x);
    }

    #[test]
    fn test_mass_weighted_multiplies_by_opposing_mass() {
        let config = PhysicsConfig::default();
        let mut ta = Transform::identity();
        let mut tb = Transform::from_position(Vec3::X);
        let mut a = body(2.0, Vec3::new(1.0, 0.0, 0.0)).with_restitution(0.0);
        let mut b = body(1.0, Vec3::ZERO).with_restitution(0.0);

        resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.0), &config);

        // v_n = -1, j = 1 / 3, va -= j * 1, vb += j * 2
        let eps = 1e-5;
        assert!((a.velocity.x - 2.0 / 3.0).abs() < eps);
        assert!((b.velocity.x - 2.0 / 3.0).abs() < eps);
    }

    #[test]
    fn test_inverse_mass_conserves_momentum() {
        let config = PhysicsConfig {
            impulse_model: ImpulseModel::InverseMass,
            ..PhysicsConfig::default()
        };
        let mut ta = Transform::identity();
        let mut tb = Transform::from_position(Vec3::X);
        let mut a = body(2.0, Vec3::new(1.0, 0.0, 0.0)).with_restitution(0.0);
        let mut b = body(1.0, Vec3::ZERO).with_restitution(0.0);

        let before = a.velocity * a.mass + b.velocity * b.mass;
        resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.0), &config);
        let after = a.velocity * a.mass + b.velocity * b.mass;

        let eps = 1e-5;
        assert!((before - after).length() < eps);
        // Perfectly inelastic: both end at the common velocity 2/3
        assert!((a.velocity.x - b.velocity.x).abs() < eps);
    }

    #[test]
    fn test_inverse_mass_zero_mass_is_immovable() {
        let config = PhysicsConfig {
            impulse_model: ImpulseModel::InverseMass,
            ..PhysicsConfig::default()
        };
        let mut ta = Transform::identity();
        let mut tb = Transform::from_position(Vec3::X);
        let mut a = body(1.0, Vec3::new(2.0, 0.0, 0.0));
        let mut wall = body(0.0, Vec3::ZERO);

        resolve_contact(&mut ta, &mut a, &mut tb, &mut wall, &contact_x(0.2), &config);

        assert_eq!(tb.position, Vec3::X);
        assert_eq!(wall.velocity, Vec3::ZERO);
        assert!((ta.position.x + 0.2).abs() < 1e-5);
        // Bounced back with restitution 0.5
        assert!((a.velocity.x + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_total_mass_is_guarded() {
        let config = PhysicsConfig::default();
        let mut ta = Transform::identity();
        let mut tb = Transform::from_position(Vec3::X);
        let mut a = body(0.0, Vec3::new(1.0, 0.0, 0.0));
        let mut b = body(0.0, Vec3::ZERO);

        let applied = resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.5), &config);

        assert!(!applied);
        assert_eq!(ta.position, Vec3::ZERO);
        assert_eq!(tb.position, Vec3::X);
        assert!(a.velocity.is_finite() && b.velocity.is_finite());
        assert_eq!(a.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_friction_reduces_tangential_velocity() {
        let config = PhysicsConfig::default();
        let mut ta = Transform::identity();
        let mut tb = Transform::from_position(Vec3::X);
        // B slides along +Z while approaching along -X
        let mut a = body(1.0, Vec3::ZERO);
        let mut b = body(1.0, Vec3::new(-1.0, 0.0, 2.0));

        resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.0), &config);

        // jt = 2 * 0.5 = 1: a gains +1 along Z, b loses 1
        let eps = 1e-5;
        assert!((a.velocity.z - 1.0).abs() < eps);
        assert!((b.velocity.z - 1.0).abs() < eps);
    }

    #[test]
    fn test_no_friction_for_pure_normal_motion() {
        let config = PhysicsConfig::default();
        let mut ta = Transform::identity();
        let mut tb = Transform::from_position(Vec3::X);
        let mut a = body(1.0, Vec3::new(1.0, 0.0, 0.0));
        let mut b = body(1.0, Vec3::ZERO);

        resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.0), &config);

        assert_eq!(a.velocity.y, 0.0);
        assert_eq!(a.velocity.z, 0.0);
        assert!(a.velocity.is_finite());
    }

    #[test]
    fn test_upward_normal_sets_grounded() {
        let config = PhysicsConfig::default();
        // B sits on top of A and is falling onto it
        let mut ta = Transform::identity();
        let mut tb = Transform::from_position(Vec3::new(0.0, 0.9, 0.0));
        let mut a = RigidBody::new_static().with_restitution(0.0);
        let mut b = body(1.0, Vec3::new(0.0, -1.0, 0.0)).with_restitution(0.0);
        let contact = Contact {
            normal: Vec3::Y,
            penetration: 0.1,
        };

        resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact, &config);

        // Inelastic equal-mass response leaves both at vy = -0.5
        assert!(a.is_grounded);
        assert!(b.is_grounded);
    }

    #[test]
    fn test_grounded_never_cleared_by_contacts() {
        let config = PhysicsConfig::default();
        let mut ta = Transform::identity();
        let mut tb = Transform::from_position(Vec3::X);
        let mut a = body(1.0, Vec3::new(1.0, 0.0, 0.0));
        a.is_grounded = true;
        let mut b = body(1.0, Vec3::ZERO);

        resolve_contact(&mut ta, &mut a, &mut tb, &mut b, &contact_x(0.1), &config);

        assert!(a.is_grounded);
        assert!(!b.is_grounded, "Sideways contact must not ground");
    }
}
