//! Narrowphase collision detection: sphere-sphere, axis-aligned box-box and
//! sphere-terrain tests.
//!
//! All tests are pure. Pairs without an exact test (sphere-box, anything
//! involving a mesh) fall back to the bounding-sphere test.

use glam::Vec3;
use tracing::debug;

use crate::ecs::components::physics::Collider;
use crate::ecs::components::transform::Transform;
use crate::terrain::HeightField;

use super::contact::{Contact, TerrainContact};

/// Below this center distance the sphere normal is undefined.
const DEGENERATE_DISTANCE: f32 = 1e-6;

/// Bounding-sphere intersection test.
///
/// The normal points from A to B. Centers closer than `DEGENERATE_DISTANCE`
/// (coincident or nearly so) use +Y.
pub fn sphere_sphere(
    transform_a: &Transform,
    radius_a: f32,
    transform_b: &Transform,
    radius_b: f32,
) -> Option<Contact> {
    let delta = transform_b.position - transform_a.position;
    let dist = delta.length();
    let min_dist = radius_a + radius_b;

    let colliding = dist < min_dist;
    if !colliding {
        return None;
    }

    let normal = if dist > DEGENERATE_DISTANCE {
        delta / dist
    } else {
        debug!("Sphere centers {} apart, using +Y contact normal", dist);
        Vec3::Y
    };

    Some(Contact {
        normal,
        penetration: min_dist - dist,
    })
}

/// Axis-aligned box overlap test. Box rotation is ignored.
///
/// `size_*` is the collider size; half extents are `size * transform.scale * 0.5`.
/// The normal is the unit axis of least overlap, signed towards B.
pub fn box_box(
    transform_a: &Transform,
    size_a: Vec3,
    transform_b: &Transform,
    size_b: Vec3,
) -> Option<Contact> {
    let half_a = size_a * transform_a.scale * 0.5;
    let half_b = size_b * transform_b.scale * 0.5;
    let delta = transform_b.position - transform_a.position;

    let overlap = half_a + half_b - delta.abs();
    let colliding = overlap.x > 0.0 && overlap.y > 0.0 && overlap.z > 0.0;
    if !colliding {
        return None;
    }

    let toward_b = |d: f32| if d > 0.0 { 1.0 } else { -1.0 };

    // Ties resolve towards the later axis.
    let (normal, penetration) = if overlap.x < overlap.y && overlap.x < overlap.z {
        (Vec3::new(toward_b(delta.x), 0.0, 0.0), overlap.x)
    } else if overlap.y < overlap.z {
        (Vec3::new(0.0, toward_b(delta.y), 0.0), overlap.y)
    } else {
        (Vec3::new(0.0, 0.0, toward_b(delta.z)), overlap.z)
    };

    Some(Contact {
        normal,
        penetration,
    })
}

/// Detect collision between two colliders, dispatching on the shape pair.
pub fn detect_collision(
    collider_a: &Collider,
    transform_a: &Transform,
    collider_b: &Collider,
    transform_b: &Transform,
) -> Option<Contact> {
    match (collider_a, collider_b) {
        (Collider::Box { size: size_a, .. }, Collider::Box { size: size_b, .. }) => {
            box_box(transform_a, *size_a, transform_b, *size_b)
        }
        (Collider::Sphere { .. }, Collider::Sphere { .. })
        | (Collider::Sphere { .. }, Collider::Box { .. } | Collider::Mesh { .. })
        | (Collider::Box { .. }, Collider::Sphere { .. } | Collider::Mesh { .. })
        | (Collider::Mesh { .. }, _) => sphere_sphere(
            transform_a,
            collider_a.radius(),
            transform_b,
            collider_b.radius(),
        ),
    }
}

/// Test a body's bounding sphere against a height field whose origin is
/// `terrain_origin`. Every collider shape uses its sphere radius here.
pub fn sphere_terrain(
    transform: &Transform,
    collider: &Collider,
    field: &HeightField,
    terrain_origin: Vec3,
) -> TerrainContact {
    let radius = collider.radius();
    let terrain_height = field.height_at(terrain_origin, transform.position.x, transform.position.z);
    let bottom = transform.position.y - radius;

    TerrainContact {
        terrain_height,
        touching: bottom <= terrain_height,
    }
}
