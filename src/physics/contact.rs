//! Contact data for collision response.

use glam::Vec3;

/// A detected contact between two shapes. Valid for a single resolution call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit contact normal (from shape A to shape B).
    pub normal: Vec3,
    /// Penetration depth, non-negative.
    pub penetration: f32,
}

/// Result of testing a body against terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainContact {
    /// World-space terrain height under the body.
    pub terrain_height: f32,
    /// Whether the body's bounding sphere reaches the surface.
    pub touching: bool,
}
