//! Rein Physics
//!
//! The physics core of the rein engine: rigid-body integration, narrow-phase
//! collision between dynamic bodies, and contact against height-field terrain.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **ecs** - Components stored in a [`hecs::World`] (transform, rigid body, collider, terrain)
//! 2. **terrain** - Height-field data, bilinear height sampling, procedural generation
//! 3. **physics** - Integrator, narrow-phase tests, contact resolver, and the per-frame step
//!
//! The caller owns the `hecs::World` and invokes [`PhysicsWorld::step`] once per frame.

pub mod ecs;
pub mod physics;
pub mod terrain;

pub use ecs::prelude::*;

pub use physics::{ImpulseModel, PhysicsConfig, PhysicsWorld, StepStats, TimestepMode};

pub use terrain::{HeightField, HeightFieldError};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
