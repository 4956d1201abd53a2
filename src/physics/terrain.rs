//! Contact between dynamic bodies and height-field terrain.
//!
//! Terrain behaves as an immovable body. Only vertical penetration is
//! corrected; horizontal velocity is damped by the body's friction.

use glam::Vec3;
use tracing::debug;

use crate::ecs::components::physics::{Collider, RigidBody};
use crate::ecs::components::terrain::Terrain;
use crate::ecs::components::transform::Transform;
use crate::terrain::HeightField;

use super::narrowphase::sphere_terrain;
use super::PhysicsConfig;

/// Snapshot of the terrain used for a step.
#[derive(Debug, Clone)]
pub struct TerrainSnapshot {
    pub field: HeightField,
    /// World position of the field origin.
    pub origin: Vec3,
}

/// Find the terrain entity used for contact. Only the first terrain in query
/// order is used; any others are ignored.
pub fn first_terrain(world: &hecs::World) -> Option<TerrainSnapshot> {
    let mut query = world.query::<(&Terrain, &Transform)>();
    let mut iter = query.iter();
    let (_, (terrain, transform)) = iter.next()?;
    let extra = iter.count();
    if extra > 0 {
        debug!("{} additional terrain entities ignored", extra);
    }
    Some(TerrainSnapshot {
        field: terrain.0.clone(),
        origin: transform.position,
    })
}

/// Resolve a body against terrain.
///
/// Returns `true` if the body bounced off (or came to rest on) the surface
/// this tick. Clears `is_grounded` when the body no longer touches terrain.
pub fn resolve_terrain_contact(
    transform: &mut Transform,
    rb: &mut RigidBody,
    collider: &Collider,
    terrain: &TerrainSnapshot,
    config: &PhysicsConfig,
) -> bool {
    let contact = sphere_terrain(transform, collider, &terrain.field, terrain.origin);

    if !contact.touching {
        rb.is_grounded = false;
        return false;
    }

    let radius = collider.radius();
    let bottom = transform.position.y - radius;
    if bottom > contact.terrain_height || rb.velocity.y >= 0.0 {
        return false;
    }

    transform.position.y = contact.terrain_height + radius;
    rb.velocity.y = -rb.velocity.y * rb.restitution;
    rb.is_grounded = true;

    rb.velocity.x *= rb.friction;
    rb.velocity.z *= rb.friction;

    // Snap micro-bounces to rest
    if rb.velocity.y.abs() < config.rest_velocity_threshold {
        rb.velocity.y = 0.0;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_ground(height: f32) -> TerrainSnapshot {
        TerrainSnapshot {
            field: HeightField::flat(8, 8, 1.0, height).unwrap(),
            origin: Vec3::ZERO,
        }
    }

    #[test]
    fn test_bounce_off_terrain() {
        let config = PhysicsConfig::default();
        let ground = flat_ground(0.0);
        let mut transform = Transform::from_position(Vec3::new(0.0, 0.3, 0.0));
        let mut rb = RigidBody::new_dynamic(1.0)
            .with_velocity(Vec3::new(2.0, -4.0, -1.0))
            .with_restitution(0.5)
            .with_friction(0.8);
        let collider = Collider::sphere(0.5);

        let hit = resolve_terrain_contact(&mut transform, &mut rb, &collider, &ground, &config);

        assert!(hit);
        let eps = 1e-5;
        assert!((transform.position.y - 0.5).abs() < eps);
        assert!((rb.velocity.y - 2.0).abs() < eps);
        assert!((rb.velocity.x - 1.6).abs() < eps);
        assert!((rb.velocity.z + 0.8).abs() < eps);
        assert!(rb.is_grounded);
    }

    #[test]
    fn test_small_bounce_snaps_to_rest() {
        let config = PhysicsConfig::default();
        let ground = flat_ground(1.0);
        let mut transform = Transform::from_position(Vec3::new(0.0, 1.4, 0.0));
        let mut rb = RigidBody::new_dynamic(1.0)
            .with_velocity(Vec3::new(0.0, -0.3, 0.0))
            .with_restitution(0.3);
        let collider = Collider::sphere(0.5);

        resolve_terrain_contact(&mut transform, &mut rb, &collider, &ground, &config);

        assert_eq!(rb.velocity.y, 0.0);
        assert!((transform.position.y - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_rising_body_not_snapped() {
        let config = PhysicsConfig::default();
        let ground = flat_ground(0.0);
        let mut transform = Transform::from_position(Vec3::new(0.0, 0.2, 0.0));
        let mut rb = RigidBody::new_dynamic(1.0).with_velocity(Vec3::new(1.0, 3.0, 0.0));
        let collider = Collider::sphere(0.5);

        let hit = resolve_terrain_contact(&mut transform, &mut rb, &collider, &ground, &config);

        assert!(!hit);
        assert_eq!(transform.position.y, 0.2);
        assert_eq!(rb.velocity, Vec3::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn test_leaving_terrain_clears_grounded() {
        let config = PhysicsConfig::default();
        let ground = flat_ground(0.0);
        let mut transform = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        let mut rb = RigidBody::new_dynamic(1.0);
        rb.is_grounded = true;

        resolve_terrain_contact(&mut transform, &mut rb, &Collider::sphere(0.5), &ground, &config);

        assert!(!rb.is_grounded);
    }

    #[test]
    fn test_all_shapes_use_bounding_radius() {
        let config = PhysicsConfig::default();
        let ground = flat_ground(0.0);
        for collider in [
            Collider::sphere(0.866),
            Collider::cuboid(Vec3::ONE),
            Collider::mesh(0.866),
        ] {
            let mut transform = Transform::from_position(Vec3::new(0.0, 0.5, 0.0));
            let mut rb = RigidBody::new_dynamic(1.0).with_velocity(Vec3::new(0.0, -1.0, 0.0));

            resolve_terrain_contact(&mut transform, &mut rb, &collider, &ground, &config);

            assert!(
                (transform.position.y - collider.radius()).abs() < 1e-5,
                "{:?} rests at {}",
                collider,
                transform.position.y
            );
        }
    }

    #[test]
    fn test_first_terrain_snapshot() {
        let mut world = hecs::World::new();
        assert!(first_terrain(&world).is_none());

        world.spawn((
            Transform::from_position(Vec3::new(0.0, -2.0, 0.0)),
            Terrain(HeightField::flat(4, 4, 1.0, 1.0).unwrap()),
        ));
        let snapshot = first_terrain(&world).unwrap();
        assert_eq!(snapshot.origin, Vec3::new(0.0, -2.0, 0.0));
        assert!((snapshot.field.height_at(snapshot.origin, 0.0, 0.0) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_first_terrain_ignores_later_ones() {
        let mut world = hecs::World::new();
        world.spawn((Transform::identity(), Terrain(HeightField::flat(4, 4, 1.0, 1.0).unwrap())));
        world.spawn((Transform::identity(), Terrain(HeightField::flat(4, 4, 1.0, 7.0).unwrap())));

        let snapshot = first_terrain(&world).unwrap();
        assert_eq!(snapshot.field.max_height(), 1.0);
    }

    #[test]
    fn test_terrain_without_transform_ignored() {
        let mut world = hecs::World::new();
        world.spawn((Terrain(HeightField::flat(4, 4, 1.0, 0.0).unwrap()),));
        assert!(first_terrain(&world).is_none());
    }
}
