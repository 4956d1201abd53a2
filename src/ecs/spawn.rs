//! Helpers for putting physics entities into a `hecs::World`.

use glam::Vec3;

use crate::ecs::components::physics::{Collider, RigidBody};
use crate::ecs::components::terrain::Terrain;
use crate::ecs::components::transform::Transform;
use crate::terrain::HeightField;

/// Spawn a simulated body.
///
/// Creates an entity with Transform, RigidBody and Collider components.
pub fn spawn_body(
    world: &mut hecs::World,
    transform: Transform,
    rb: RigidBody,
    collider: Collider,
) -> hecs::Entity {
    world.spawn((transform, rb, collider))
}

/// Spawn a terrain entity with its height-field origin at `origin`.
pub fn spawn_terrain(world: &mut hecs::World, field: HeightField, origin: Vec3) -> hecs::Entity {
    world.spawn((Transform::from_position(origin), Terrain(field)))
}

/// Remove an entity and all its components.
///
/// Returns `false` if the entity was already gone.
pub fn despawn(world: &mut hecs::World, entity: hecs::Entity) -> bool {
    world.despawn(entity).is_ok()
}
