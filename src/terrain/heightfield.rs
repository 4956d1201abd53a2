//! Regular grid of terrain heights with bilinear sampling.
//!
//! # Coordinate System
//!
//! The grid lies in the XZ plane, heights along +Y. It is centered on its
//! origin: grid index 0 along X sits at local `-(width / 2) * scale`, and
//! likewise for Z with `depth`. Samples are stored row-major with X varying
//! fastest: `heights[z * width + x]`.

use std::sync::Arc;

use glam::Vec3;
use thiserror::Error;

/// Errors from constructing a [`HeightField`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeightFieldError {
    #[error("height field must have at least one sample per axis (got {width}x{depth})")]
    EmptyGrid { width: usize, depth: usize },
    #[error("height data length {actual} does not match grid size {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("cell scale must be positive and finite (got {0})")]
    InvalidScale(f32),
    #[error("height scale must be finite (got {0})")]
    InvalidHeightScale(f32),
    #[error("height sample {index} is not finite")]
    NonFiniteHeight { index: usize },
}

/// Terrain height samples.
///
/// Height data is shared behind an `Arc`, so cloning a field (for example to
/// read it while body components are borrowed mutably) does not copy samples.
#[derive(Debug, Clone)]
pub struct HeightField {
    heights: Arc<[f32]>,
    width: usize,
    depth: usize,
    scale: f32,
    height_scale: f32,
    min_height: f32,
    max_height: f32,
}

impl HeightField {
    /// Create a height field from raw samples.
    ///
    /// * `width` - Samples along X
    /// * `depth` - Samples along Z
    /// * `scale` - World distance between neighbouring samples
    /// * `height_scale` - Multiplier applied to every sample
    pub fn new(
        width: usize,
        depth: usize,
        scale: f32,
        height_scale: f32,
        heights: Vec<f32>,
    ) -> Result<Self, HeightFieldError> {
        if width == 0 || depth == 0 {
            return Err(HeightFieldError::EmptyGrid { width, depth });
        }
        let expected = width * depth;
        if heights.len() != expected {
            return Err(HeightFieldError::SizeMismatch {
                expected,
                actual: heights.len(),
            });
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(HeightFieldError::InvalidScale(scale));
        }
        if !height_scale.is_finite() {
            return Err(HeightFieldError::InvalidHeightScale(height_scale));
        }
        if let Some(index) = heights.iter().position(|h| !h.is_finite()) {
            return Err(HeightFieldError::NonFiniteHeight { index });
        }

        let (min_height, max_height) = heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &h| {
                (min.min(h), max.max(h))
            });

        Ok(Self {
            heights: heights.into(),
            width,
            depth,
            scale,
            height_scale,
            min_height,
            max_height,
        })
    }

    /// Create a flat height field at a given height.
    pub fn flat(
        width: usize,
        depth: usize,
        scale: f32,
        height: f32,
    ) -> Result<Self, HeightFieldError> {
        Self::new(width, depth, scale, 1.0, vec![height; width * depth])
    }

    /// Create a height field from a function of grid indices `(x, z)`.
    pub fn from_fn<F>(
        width: usize,
        depth: usize,
        scale: f32,
        height_scale: f32,
        f: F,
    ) -> Result<Self, HeightFieldError>
    where
        F: Fn(usize, usize) -> f32,
    {
        let mut heights = Vec::with_capacity(width * depth);
        for z in 0..depth {
            for x in 0..width {
                heights.push(f(x, z));
            }
        }
        Self::new(width, depth, scale, height_scale, heights)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Raw samples, row-major.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Smallest raw sample (before `height_scale`).
    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    /// Largest raw sample (before `height_scale`).
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Scaled height of grid sample `(x, z)`, with indices clamped onto the grid.
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        let x = x.min(self.width - 1);
        let z = z.min(self.depth - 1);
        self.heights[z * self.width + x] * self.height_scale
    }

    /// Bilinearly interpolated height at a point in the field's local frame.
    ///
    /// Queries off the grid return the nearest edge height. Non-finite input
    /// is clamped the same way and never indexes out of range.
    pub fn sample(&self, local_x: f32, local_z: f32) -> f32 {
        let (x0, x1, fx) = grid_cell(local_x / self.scale, self.width);
        let (z0, z1, fz) = grid_cell(local_z / self.scale, self.depth);

        let h00 = self.get(x0, z0);
        let h10 = self.get(x1, z0);
        let h01 = self.get(x0, z1);
        let h11 = self.get(x1, z1);

        h00 * (1.0 - fx) * (1.0 - fz)
            + h10 * fx * (1.0 - fz)
            + h01 * (1.0 - fx) * fz
            + h11 * fx * fz
    }

    /// World-space terrain height under `(world_x, world_z)` for a field
    /// whose origin is at `origin`.
    #[inline]
    pub fn height_at(&self, origin: Vec3, world_x: f32, world_z: f32) -> f32 {
        self.sample(world_x - origin.x, world_z - origin.z) + origin.y
    }
}

/// Map a local coordinate (in cells) onto a grid axis with `samples` entries.
///
/// Returns the lower index, the upper index and the fractional remainder.
#[inline]
fn grid_cell(cells: f32, samples: usize) -> (usize, usize, f32) {
    let last = (samples - 1) as f32;
    // `max` first so NaN collapses to 0.
    let g = (cells + samples as f32 / 2.0).max(0.0).min(last);
    let i0 = g.floor() as usize;
    let i1 = (i0 + 1).min(samples - 1);
    (i0, i1, g - i0 as f32)
}
