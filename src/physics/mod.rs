//! CPU physics: rigid body integration, collision detection and response.
//!
//! # Architecture
//!
//! Each tick runs:
//!
//! 1. Apply gravity (skipped for grounded bodies)
//! 2. Integrate positions (semi-implicit Euler)
//! 3. Resolve contact against the terrain height field
//! 4. Test every unordered pair of bodies (narrowphase only, no broadphase)
//! 5. Resolve each contact once with a single impulse
//!
//! Pair resolution is not iterated, so with three or more overlapping bodies
//! the result depends on the order entities are enumerated in.

pub mod contact;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;
pub mod terrain;

use glam::Vec3;
use tracing::{debug, trace};

use crate::ecs::components::physics::{Collider, RigidBody};
use crate::ecs::components::transform::Transform;

use self::narrowphase::detect_collision;
use self::solver::resolve_contact;
use self::terrain::{first_terrain, resolve_terrain_contact};

pub use self::solver::ImpulseModel;

/// How `PhysicsWorld::step` turns frame time into ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimestepMode {
    /// One tick per call using the caller's delta time. Frame-rate dependent.
    #[default]
    Variable,
    /// Fixed ticks drained from an accumulator.
    Fixed {
        /// Tick length in seconds.
        step: f64,
        /// Maximum ticks per call. Excess time is dropped.
        max_substeps: u32,
    },
}

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector. Default: (0, -9.81, 0).
    pub gravity: Vec3,
    /// Default: [`TimestepMode::Variable`].
    pub timestep: TimestepMode,
    /// Default: [`ImpulseModel::MassWeighted`].
    pub impulse_model: ImpulseModel,
    /// Minimum contact normal Y for a contact to ground a body. Default: 0.7.
    pub grounded_normal_threshold: f32,
    /// Vertical speed below which a terrain bounce is zeroed. Default: 0.1.
    pub rest_velocity_threshold: f32,
    /// Minimum tangential speed for friction to apply. Default: 0.001.
    pub friction_tangent_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: TimestepMode::Variable,
            impulse_model: ImpulseModel::MassWeighted,
            grounded_normal_threshold: 0.7,
            rest_velocity_threshold: 0.1,
            friction_tangent_epsilon: 0.001,
        }
    }
}

/// Counters from the most recent [`PhysicsWorld::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub ticks: u32,
    /// Bodies integrated, summed over ticks.
    pub bodies: usize,
    pub terrain_contacts: usize,
    pub pairs_tested: usize,
    pub contacts: usize,
}

impl StepStats {
    fn accumulate(&mut self, tick: StepStats) {
        self.ticks += tick.ticks;
        self.bodies += tick.bodies;
        self.terrain_contacts += tick.terrain_contacts;
        self.pairs_tested += tick.pairs_tested;
        self.contacts += tick.contacts;
    }
}

/// Body state copied out of the world for pair resolution.
#[derive(Clone, Copy)]
struct BodyState {
    transform: Transform,
    rb: RigidBody,
    collider: Collider,
}

impl BodyState {
    fn read(world: &hecs::World, entity: hecs::Entity) -> Option<Self> {
        let transform = *world.get::<&Transform>(entity).ok()?;
        let rb = *world.get::<&RigidBody>(entity).ok()?;
        let collider = *world.get::<&Collider>(entity).ok()?;
        Some(Self {
            transform,
            rb,
            collider,
        })
    }

    fn write(&self, world: &hecs::World, entity: hecs::Entity) {
        if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
            *transform = self.transform;
        }
        if let Ok(mut rb) = world.get::<&mut RigidBody>(entity) {
            *rb = self.rb;
        }
    }
}

/// The physics simulation. Owns configuration and timing state only; all
/// body state lives in the caller's `hecs::World`.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    last_step: StepStats,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            last_step: StepStats::default(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    /// Counters from the most recent call to [`step`](Self::step).
    pub fn last_step(&self) -> StepStats {
        self.last_step
    }

    /// Step the physics simulation forward by `delta_time` seconds.
    ///
    /// Mutates `Transform` and `RigidBody` components in place. Entities
    /// missing a component are skipped by the stages that need it.
    pub fn step(&mut self, world: &mut hecs::World, delta_time: f64) {
        let mut stats = StepStats::default();

        match self.config.timestep {
            TimestepMode::Variable => {
                stats.accumulate(self.tick(world, delta_time as f32));
            }
            TimestepMode::Fixed { step, max_substeps } => {
                // A NaN would otherwise stick in the accumulator for good
                if delta_time.is_finite() {
                    self.accumulator += delta_time;
                } else {
                    debug!("Ignoring non-finite delta time {}", delta_time);
                }

                let mut substeps = 0u32;
                while self.accumulator >= step && substeps < max_substeps {
                    stats.accumulate(self.tick(world, step as f32));
                    self.accumulator -= step;
                    substeps += 1;
                }

                // Clamp accumulator to avoid spiral of death
                if self.accumulator > step * max_substeps as f64 {
                    debug!(
                        "Dropping {:.4}s of simulation time after {} substeps",
                        self.accumulator, substeps
                    );
                    self.accumulator = 0.0;
                }
            }
        }

        trace!(
            ticks = stats.ticks,
            bodies = stats.bodies,
            terrain_contacts = stats.terrain_contacts,
            pairs_tested = stats.pairs_tested,
            contacts = stats.contacts,
            "physics step"
        );
        self.last_step = stats;
    }

    fn tick(&self, world: &mut hecs::World, dt: f32) -> StepStats {
        let mut stats = StepStats {
            ticks: 1,
            ..StepStats::default()
        };
        let terrain = first_terrain(world);

        // 1-3. Gravity, integration, terrain contact
        for (_, (transform, rb, collider)) in
            world.query_mut::<(&mut Transform, &mut RigidBody, Option<&Collider>)>()
        {
            rigid_body::apply_gravity(rb, self.config.gravity, dt);
            rigid_body::integrate(transform, rb, dt);
            stats.bodies += 1;

            if let (Some(terrain), Some(collider)) = (&terrain, collider) {
                if resolve_terrain_contact(transform, rb, collider, terrain, &self.config) {
                    stats.terrain_contacts += 1;
                }
            }
        }

        // 4-5. All-pairs contact resolution
        let entities: Vec<hecs::Entity> = world
            .query_mut::<(&Transform, &RigidBody)>()
            .into_iter()
            .map(|(entity, _)| entity)
            .collect();

        for i in 0..entities.len() {
            for j in (i + 1)..entities.len() {
                let (entity_a, entity_b) = (entities[i], entities[j]);
                let (Some(mut a), Some(mut b)) = (
                    BodyState::read(world, entity_a),
                    BodyState::read(world, entity_b),
                ) else {
                    continue;
                };
                stats.pairs_tested += 1;

                let Some(contact) =
                    detect_collision(&a.collider, &a.transform, &b.collider, &b.transform)
                else {
                    continue;
                };

                resolve_contact(
                    &mut a.transform,
                    &mut a.rb,
                    &mut b.transform,
                    &mut b.rb,
                    &contact,
                    &self.config,
                );
                stats.contacts += 1;

                a.write(world, entity_a);
                b.write(world, entity_b);
            }
        }

        stats
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}
