//! Entity Component System integration with hecs.

pub mod components;
pub mod spawn;

pub mod prelude {
    pub use super::components::*;
    pub use super::spawn::{despawn, spawn_body, spawn_terrain};
}
