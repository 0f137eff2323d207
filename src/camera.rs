//! Orbit camera with damped interpolation.
//!
//! Left-drag rotates around the focus point, scrolling zooms. Input writes
//! target angles only; a second system eases the live angles toward the
//! targets each frame so the camera settles smoothly instead of snapping.

use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};
use std::f32::consts::FRAC_PI_2;

use crate::TickSet;

/// Radians of rotation per pixel of mouse drag.
const ROTATE_SENSITIVITY: f32 = 0.005;

/// Zoom distance per scroll line; pixel deltas are scaled down to match.
const ZOOM_SENSITIVITY: f32 = 0.15;
const PIXELS_PER_LINE: f32 = 50.0;

/// Exponential damping rate; higher values settle faster.
const DAMPING_RATE: f32 = 8.0;

/// Keeps the camera off the poles, where the orbit basis degenerates.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 20.0;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            (orbit_input, orbit_damping)
                .chain()
                .in_set(TickSet::Controls),
        );
    }
}

/// Orbit state for a camera circling a focus point.
#[derive(Component, Debug)]
pub struct OrbitCamera {
    pub focus: Vec3,
    yaw: f32,
    pitch: f32,
    radius: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_radius: f32,
}

impl OrbitCamera {
    /// Builds orbit state whose current and target orientation both match a
    /// camera at `position` looking at `focus`.
    pub fn looking_from(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let radius = offset.length().max(MIN_RADIUS);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        Self {
            focus,
            yaw,
            pitch,
            radius,
            target_yaw: yaw,
            target_pitch: pitch,
            target_radius: radius,
        }
    }

    /// Camera position for the current (damped) orbit state.
    fn position(&self) -> Vec3 {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        self.focus + rotation * Vec3::new(0.0, 0.0, self.radius)
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::looking_from(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO),
    ));
}

/// Applies mouse input to the orbit targets.
fn orbit_input(
    mut motion_events: EventReader<MouseMotion>,
    mut wheel_events: EventReader<MouseWheel>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let mut rotation = Vec2::ZERO;
    if buttons.pressed(MouseButton::Left) {
        for event in motion_events.read() {
            rotation += event.delta;
        }
    } else {
        motion_events.clear();
    }

    let mut zoom = 0.0;
    for event in wheel_events.read() {
        zoom += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        };
    }

    if rotation == Vec2::ZERO && zoom == 0.0 {
        return;
    }

    for mut camera in &mut cameras {
        camera.target_yaw -= rotation.x * ROTATE_SENSITIVITY;
        camera.target_pitch = (camera.target_pitch + rotation.y * ROTATE_SENSITIVITY)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        camera.target_radius =
            (camera.target_radius - zoom * ZOOM_SENSITIVITY).clamp(MIN_RADIUS, MAX_RADIUS);
    }
}

/// Eases the live orbit state toward its targets and writes the transform.
fn orbit_damping(time: Res<Time>, mut cameras: Query<(&mut OrbitCamera, &mut Transform)>) {
    let blend = damping_blend(DAMPING_RATE, time.delta_secs());
    for (mut camera, mut transform) in &mut cameras {
        camera.yaw += (camera.target_yaw - camera.yaw) * blend;
        camera.pitch += (camera.target_pitch - camera.pitch) * blend;
        camera.radius += (camera.target_radius - camera.radius) * blend;

        transform.translation = camera.position();
        transform.look_at(camera.focus, Vec3::Y);
    }
}

/// Frame-rate independent interpolation factor for exponential damping.
fn damping_blend(rate: f32, delta_secs: f32) -> f32 {
    1.0 - (-rate * delta_secs).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_from_recovers_the_position() {
        let position = Vec3::new(1.0, 1.0, 1.0);
        let camera = OrbitCamera::looking_from(position, Vec3::ZERO);
        assert!((camera.position() - position).length() < 1e-5);
    }

    #[test]
    fn test_damping_converges_on_target() {
        let mut camera = OrbitCamera::looking_from(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO);
        camera.target_yaw = 2.0;

        // Sixty simulated frames at 60 fps.
        for _ in 0..60 {
            let blend = damping_blend(DAMPING_RATE, 1.0 / 60.0);
            camera.yaw += (camera.target_yaw - camera.yaw) * blend;
        }
        assert!((camera.yaw - camera.target_yaw).abs() < 1e-3);
    }

    #[test]
    fn test_damping_blend_is_bounded() {
        assert!(damping_blend(DAMPING_RATE, 0.0) == 0.0);
        for dt in [0.001, 0.016, 0.1, 1.0, 10.0] {
            let blend = damping_blend(DAMPING_RATE, dt);
            assert!((0.0..=1.0).contains(&blend), "blend {blend} out of range");
        }
    }
}
