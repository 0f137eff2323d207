//! Closed-form wave calculations matching the water shader.
//!
//! This module provides CPU-side wave height and slope calculations that
//! exactly match the GPU vertex displacement in `shaders/water.wgsl`. Objects
//! placed on the surface use these to stay visually in sync with the rendered
//! waves.
//!
//! ## Synchronization
//!
//! The functions here are parameterized by [`WaveParams`], which is read from
//! the live water material every frame. Editing a wave parameter in the debug
//! panel therefore affects the rendered surface and the floating ship in the
//! same frame, with one documented exception: slope animation runs at
//! `speed + SLOPE_SPEED_OFFSET`, a tuned decoupling of the rocking rhythm
//! from the bobbing rhythm.

use bevy::math::Vec2;

/// Constant added to the wave speed when computing slopes. Decouples the
/// rocking animation speed from the bobbing animation speed. Empirically
/// tuned, not derived.
pub const SLOPE_SPEED_OFFSET: f32 = 1.5;

/// Dampens the wave height before it is applied to a floating object.
pub const BOB_SCALE: f32 = 0.1;

/// Flotation offset keeping a floating object above the mean surface.
pub const FLOAT_OFFSET: f32 = 0.15;

/// Converts a surface slope into a small rocking angle (radians). Small-angle
/// approximation, not a physical rotation.
pub const ROCK_SCALE: f32 = 0.015;

/// Wave parameters shared between the shader uniforms and the CPU-side sync
/// functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    /// Animation speed multiplier applied to elapsed time.
    pub speed: f32,
    /// Peak displacement of a single trig term.
    pub elevation: f32,
    /// Spatial frequency along X and Z.
    pub frequency: Vec2,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            speed: 0.75,
            elevation: 0.062,
            frequency: Vec2::new(5.259, 1.856),
        }
    }
}

/// Surface height at `(x, z)` after `time` seconds.
///
/// Mirrors the vertex shader:
/// `(sin(x·freq.x + t·speed) + cos(z·freq.y + t·speed)) · elevation`.
/// Bounded by `±2 · elevation`.
pub fn wave_height(x: f32, z: f32, time: f32, params: &WaveParams) -> f32 {
    let phase = time * params.speed;
    ((x * params.frequency.x + phase).sin() + (z * params.frequency.y + phase).cos())
        * params.elevation
}

/// Surface slope at `(x, z)` after `time` seconds, as partial derivatives
/// `(d/dx, d/dz)` of the height field.
///
/// Uses `speed + SLOPE_SPEED_OFFSET` as the phase speed; see the module docs.
/// Each component is bounded by the matching frequency component.
pub fn wave_slope(x: f32, z: f32, time: f32, params: &WaveParams) -> Vec2 {
    let phase = time * (params.speed + SLOPE_SPEED_OFFSET);
    Vec2::new(
        (x * params.frequency.x + phase).cos() * params.frequency.x,
        -(z * params.frequency.y + phase).sin() * params.frequency.y,
    )
}

/// Pose of an object floating at `(x, z)`: vertical position plus rocking
/// angles about the two horizontal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPose {
    /// Vertical position above the water plane.
    pub y: f32,
    /// Rotation about the X axis (radians).
    pub pitch: f32,
    /// Rotation about the Z axis (radians).
    pub roll: f32,
}

/// Computes where a floating object should sit on the surface.
///
/// The height is dampened by [`BOB_SCALE`] and lifted by [`FLOAT_OFFSET`];
/// the slope is converted into rocking angles via [`ROCK_SCALE`].
pub fn float_pose(x: f32, z: f32, time: f32, params: &WaveParams) -> FloatPose {
    let height = wave_height(x, z, time, params);
    let slope = wave_slope(x, z, time, params);

    FloatPose {
        y: height * BOB_SCALE + FLOAT_OFFSET,
        pitch: slope.y * ROCK_SCALE,
        roll: -slope.x * ROCK_SCALE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_height_at_origin_equals_elevation() {
        let params = WaveParams::default();
        // sin(0) + cos(0) = 1, so the height at the origin at t=0 is exactly
        // the configured elevation.
        let height = wave_height(0.0, 0.0, 0.0, &params);
        assert!((height - params.elevation).abs() < EPSILON);
    }

    #[test]
    fn test_height_is_bounded_by_twice_elevation() {
        let params = WaveParams::default();
        let bound = 2.0 * params.elevation + EPSILON;
        for xi in -10..=10 {
            for zi in -10..=10 {
                for ti in 0..20 {
                    let x = xi as f32 * 0.37;
                    let z = zi as f32 * 0.53;
                    let t = ti as f32 * 0.71;
                    let height = wave_height(x, z, t, &params);
                    assert!(
                        height.abs() <= bound,
                        "height {height} out of bounds at ({x}, {z}, {t})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_height_is_periodic_in_time() {
        let params = WaveParams::default();
        let period = TAU / params.speed;
        for ti in 0..10 {
            let t = ti as f32 * 0.9;
            let h1 = wave_height(1.3, -0.7, t, &params);
            let h2 = wave_height(1.3, -0.7, t + period, &params);
            assert!((h1 - h2).abs() < EPSILON, "height not periodic at t={t}");
        }
    }

    #[test]
    fn test_slope_components_are_bounded_by_frequency() {
        let params = WaveParams::default();
        for xi in -10..=10 {
            for ti in 0..20 {
                let x = xi as f32 * 0.41;
                let z = xi as f32 * 0.29;
                let t = ti as f32 * 0.63;
                let slope = wave_slope(x, z, t, &params);
                assert!(slope.x.abs() <= params.frequency.x + EPSILON);
                assert!(slope.y.abs() <= params.frequency.y + EPSILON);
            }
        }
    }

    #[test]
    fn test_slope_phase_speed_is_height_speed_plus_offset() {
        // The slope must animate at speed + 1.5 for any configured speed.
        for speed in [0.0, 0.4, 0.75, 2.0] {
            let params = WaveParams {
                speed,
                ..Default::default()
            };
            let (x, z, t) = (0.8, -1.2, 2.4);
            let slope = wave_slope(x, z, t, &params);
            let phase = t * (speed + SLOPE_SPEED_OFFSET);
            let expected_dx = (x * params.frequency.x + phase).cos() * params.frequency.x;
            let expected_dz = -(z * params.frequency.y + phase).sin() * params.frequency.y;
            assert!((slope.x - expected_dx).abs() < EPSILON);
            assert!((slope.y - expected_dz).abs() < EPSILON);
        }
    }

    #[test]
    fn test_float_pose_applies_named_constants() {
        let params = WaveParams::default();
        let (x, z, t) = (0.25, -0.5, 3.1);
        let pose = float_pose(x, z, t, &params);
        let height = wave_height(x, z, t, &params);
        let slope = wave_slope(x, z, t, &params);

        assert!((pose.y - (height * BOB_SCALE + FLOAT_OFFSET)).abs() < EPSILON);
        assert!((pose.pitch - slope.y * ROCK_SCALE).abs() < EPSILON);
        assert!((pose.roll + slope.x * ROCK_SCALE).abs() < EPSILON);
    }

    #[test]
    fn test_float_pose_rests_at_offset_on_flat_water() {
        // With zero elevation the surface is flat and the pose reduces to the
        // flotation offset with no vertical bob.
        let params = WaveParams {
            elevation: 0.0,
            ..Default::default()
        };
        let pose = float_pose(1.0, 1.0, 5.0, &params);
        assert!((pose.y - FLOAT_OFFSET).abs() < EPSILON);
    }
}
