//! Procedural height generation.
//!
//! Heights come from a sum of octaves of layered sine/cosine waves with a
//! ridge term and a domain-warp term, normalized by the total amplitude and
//! then shaped so hills sharpen and valleys flatten.

use tracing::info;

use super::heightfield::{HeightField, HeightFieldError};

/// Parameters for [`fractal_height`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    /// Number of octaves. Default: 6.
    pub octaves: u32,
    /// Frequency of the first octave, per grid index. Default: 0.01.
    pub base_frequency: f32,
    /// Amplitude multiplier between octaves. Default: 0.5.
    pub persistence: f32,
    /// Frequency multiplier between octaves. Default: 2.0.
    pub lacunarity: f32,
    /// Exponent applied to positive heights. Default: 0.7.
    pub hill_exponent: f32,
    /// Exponent applied to the magnitude of negative heights. Default: 1.3.
    pub valley_exponent: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 6,
            base_frequency: 0.01,
            persistence: 0.5,
            lacunarity: 2.0,
            hill_exponent: 0.7,
            valley_exponent: 1.3,
        }
    }
}

/// Raw (unscaled) height for grid sample `(x, z)`.
pub fn fractal_height(x: usize, z: usize, params: &FractalParams) -> f32 {
    let mut total = 0.0f32;
    let mut frequency = params.base_frequency;
    let mut amplitude = 1.0f32;
    let mut max_amplitude = 0.0f32;

    for _ in 0..params.octaves {
        let sx = x as f32 * frequency;
        let sz = z as f32 * frequency;

        let mut n = sx.sin() * sz.cos();
        n += 0.5 * (sx * 2.3 + sz * 1.7).sin() * (sz * 2.1 - sx * 1.3).cos();
        n += 0.25 * (sx * 4.7).sin() * (sz * 3.9).cos() * (sx * 1.9 + sz * 2.8).sin();

        let ridge = 1.0 - ((sx * 1.5).sin() * (sz * 1.2).cos()).abs();
        n += 0.3 * ridge * ridge;

        let wx = sx + 0.5 * n;
        let wz = sz + 0.5 * n;
        n += 0.2 * (wx * 0.8).sin() * (wz * 0.8).cos();

        total += n * amplitude;
        max_amplitude += amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }

    if max_amplitude <= 0.0 {
        return 0.0;
    }

    let h = total / max_amplitude;
    if h > 0.0 {
        h.powf(params.hill_exponent)
    } else {
        -(-h).powf(params.valley_exponent)
    }
}

impl HeightField {
    /// Default grid width (samples along X).
    pub const DEFAULT_WIDTH: usize = 64;
    /// Default grid depth (samples along Z).
    pub const DEFAULT_DEPTH: usize = 64;
    /// Default distance between samples.
    pub const DEFAULT_SCALE: f32 = 2.0;

    /// Generate a field with the default [`FractalParams`].
    pub fn generate(
        width: usize,
        depth: usize,
        scale: f32,
        height_scale: f32,
    ) -> Result<Self, HeightFieldError> {
        Self::generate_with(width, depth, scale, height_scale, &FractalParams::default())
    }

    pub fn generate_with(
        width: usize,
        depth: usize,
        scale: f32,
        height_scale: f32,
        params: &FractalParams,
    ) -> Result<Self, HeightFieldError> {
        let field = Self::from_fn(width, depth, scale, height_scale, |x, z| {
            fractal_height(x, z, params)
        })?;
        info!(
            "Generated {}x{} height field (scale {}, heights {:.3}..{:.3})",
            width,
            depth,
            scale,
            field.min_height(),
            field.max_height()
        );
        Ok(field)
    }
}
