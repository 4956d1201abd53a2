//! Shared setup helpers for rein-physics benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- narrowphase
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- terrain

use glam::Vec3;
use rein_physics::ecs::components::physics::{Collider, RigidBody};
use rein_physics::ecs::components::transform::Transform;
use rein_physics::ecs::spawn::{spawn_body, spawn_terrain};
use rein_physics::physics::{PhysicsConfig, PhysicsWorld};
use rein_physics::terrain::HeightField;

// ---------------------------------------------------------------------------
// Basic scenes
// ---------------------------------------------------------------------------

/// Spawn `n` dynamic sphere bodies in a grid layout so neighbours overlap.
pub fn setup_sphere_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let x = (i % cols) as f32 * 1.5;
        let z = (i / cols) as f32 * 1.5;
        spawn_body(
            &mut world,
            Transform::from_position(Vec3::new(x, 0.0, z)),
            RigidBody::new_dynamic(1.0),
            Collider::sphere(1.0),
        );
    }
    world
}

/// Mixed scene: alternating dynamic spheres and static unit boxes.
#[allow(clippy::manual_is_multiple_of)]
pub fn setup_mixed_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let x = (i % cols) as f32 * 1.5;
        let z = (i / cols) as f32 * 1.5;
        let transform = Transform::from_position(Vec3::new(x, 0.0, z));

        if i % 2 == 0 {
            spawn_body(&mut world, transform, RigidBody::new_dynamic(1.0), Collider::sphere(1.0));
        } else {
            spawn_body(&mut world, transform, RigidBody::new_static(), Collider::cuboid(Vec3::ONE));
        }
    }
    world
}

/// Sparse scene: bodies spread far apart (no overlaps).
pub fn setup_sparse_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let x = (i % cols) as f32 * 10.0;
        let z = (i / cols) as f32 * 10.0;
        spawn_body(
            &mut world,
            Transform::from_position(Vec3::new(x, 0.0, z)),
            RigidBody::new_dynamic(1.0),
            Collider::sphere(0.5),
        );
    }
    world
}

/// Generated terrain of the default size.
pub fn setup_terrain_field() -> anyhow::Result<HeightField> {
    Ok(HeightField::generate(
        HeightField::DEFAULT_WIDTH,
        HeightField::DEFAULT_DEPTH,
        HeightField::DEFAULT_SCALE,
        4.0,
    )?)
}

/// Generated terrain + `n` dynamic bodies dropped above it (mixed spheres/boxes).
#[allow(clippy::manual_is_multiple_of)]
pub fn setup_scene(n: usize) -> anyhow::Result<(hecs::World, PhysicsWorld)> {
    let mut world = hecs::World::new();
    spawn_terrain(&mut world, setup_terrain_field()?, Vec3::ZERO);

    let cols = (n as f32).sqrt().ceil() as usize;
    for i in 0..n {
        let x = (i % cols) as f32 * 1.2 - cols as f32 * 0.6;
        let z = (i / cols) as f32 * 1.2 - cols as f32 * 0.6;
        let y = 6.0 + (i % 3) as f32;
        let transform = Transform::from_position(Vec3::new(x, y, z));

        let collider = if i % 2 == 0 {
            Collider::sphere(0.5)
        } else {
            Collider::cuboid(Vec3::ONE)
        };
        spawn_body(&mut world, transform, RigidBody::new_dynamic(1.0), collider);
    }

    Ok((world, PhysicsWorld::new(PhysicsConfig::default())))
}
