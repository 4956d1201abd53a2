//! ECS components (transform, physics, terrain).

pub mod physics;
pub mod terrain;
pub mod transform;

pub use physics::*;
pub use terrain::*;
pub use transform::*;
