//! Headless physics demo: bodies dropped onto generated terrain.
//!
//! Usage: `rein-app [seconds]` (default 10). Set `RUST_LOG=info` to see
//! body state once per simulated second, `RUST_LOG=trace` for every step.

use anyhow::Context;
use glam::Vec3;
use log::info;
use rein_physics::physics::rigid_body::place_body;
use rein_physics::{
    spawn_body, spawn_terrain, Collider, HeightField, PhysicsConfig, PhysicsWorld, RigidBody,
    TimestepMode, Transform,
};

const FRAME_TIME: f64 = 1.0 / 60.0;

struct Tracked {
    entity: hecs::Entity,
    start: Vec3,
    label: &'static str,
}

fn spawn_drops(world: &mut hecs::World) -> Vec<Tracked> {
    let mut drops = Vec::new();

    for i in 0..4 {
        let start = Vec3::new(i as f32 * 3.0 - 4.5, 8.0 + i as f32, -2.0);
        let entity = spawn_body(
            world,
            Transform::from_position(start),
            RigidBody::new_dynamic(1.0),
            Collider::cuboid(Vec3::ONE),
        );
        drops.push(Tracked {
            entity,
            start,
            label: "cube",
        });
    }

    for i in 0..4 {
        let start = Vec3::new(i as f32 * 3.0 - 4.5, 10.0 + i as f32, 2.0);
        let entity = spawn_body(
            world,
            Transform::from_position(start),
            RigidBody::new_dynamic(1.0).with_restitution(0.6),
            Collider::sphere(0.5),
        );
        drops.push(Tracked {
            entity,
            start,
            label: "sphere",
        });
    }

    // Two spheres dropped onto each other
    for (i, mass) in [1.0, 4.0].into_iter().enumerate() {
        let start = Vec3::new(6.0, 5.0 + i as f32 * 3.0, 0.0);
        let entity = spawn_body(
            world,
            Transform::from_position(start),
            RigidBody::new_dynamic(mass),
            Collider::sphere(0.75),
        );
        drops.push(Tracked {
            entity,
            start,
            label: "stack",
        });
    }

    drops
}

fn log_bodies(world: &hecs::World, tracked: &[Tracked], time: f64) {
    info!("t = {:.1}s", time);
    for body in tracked {
        let (Ok(transform), Ok(rb)) = (
            world.get::<&Transform>(body.entity),
            world.get::<&RigidBody>(body.entity),
        ) else {
            continue;
        };
        info!(
            "  {:<6} pos ({:7.3}, {:7.3}, {:7.3})  vel ({:6.3}, {:6.3}, {:6.3})  grounded {}",
            body.label,
            transform.position.x,
            transform.position.y,
            transform.position.z,
            rb.velocity.x,
            rb.velocity.y,
            rb.velocity.z,
            rb.is_grounded
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let seconds: f64 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid duration {arg:?}"))?,
        None => 10.0,
    };

    let mut world = hecs::World::new();
    let field = HeightField::generate(
        HeightField::DEFAULT_WIDTH,
        HeightField::DEFAULT_DEPTH,
        HeightField::DEFAULT_SCALE,
        4.0,
    )?;
    spawn_terrain(&mut world, field, Vec3::ZERO);
    let drops = spawn_drops(&mut world);

    let mut physics = PhysicsWorld::new(PhysicsConfig {
        timestep: TimestepMode::Fixed {
            step: FRAME_TIME,
            max_substeps: 4,
        },
        ..PhysicsConfig::default()
    });

    let frames = (seconds / FRAME_TIME).round() as u64;
    let reset_frame = frames / 2;
    for frame in 1..=frames {
        physics.step(&mut world, FRAME_TIME);

        // Halfway through, put the first cube back where it started
        if frame == reset_frame {
            if let Some(body) = drops.first() {
                if let Ok((transform, rb)) =
                    world.query_one_mut::<(&mut Transform, &mut RigidBody)>(body.entity)
                {
                    place_body(transform, rb, body.start);
                    info!("Reset {} to {:?}", body.label, body.start);
                }
            }
        }

        if frame % 60 == 0 {
            log_bodies(&world, &drops, frame as f64 * FRAME_TIME);
            let stats = physics.last_step();
            info!(
                "  last step: {} bodies, {} terrain contacts, {}/{} pair contacts",
                stats.bodies, stats.terrain_contacts, stats.contacts, stats.pairs_tested
            );
        }
    }

    Ok(())
}
