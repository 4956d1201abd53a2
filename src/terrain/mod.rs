//! Height-field terrain data.
//!
//! A [`HeightField`] is produced once (procedurally or from caller data) and
//! read by the physics step every frame. Mesh generation for rendering lives
//! outside this crate.

pub mod generation;
pub mod heightfield;

pub use generation::FractalParams;
pub use heightfield::{HeightField, HeightFieldError};
