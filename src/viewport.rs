//! Viewport resize handling.
//!
//! Bevy recomputes the camera's projection aspect from the window on its own;
//! what it does not do is bound the device pixel ratio. High-DPI displays can
//! report ratios of 3 or more, which quadruples the fragment load for little
//! visual gain on an animated surface, so we clamp the scale factor to 2.

use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};

/// Upper bound for the device pixel ratio used for rendering.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, clamp_pixel_ratio_on_resize);
    }
}

/// Device pixel ratio actually used for rendering.
pub fn clamped_pixel_ratio(ratio: f32) -> f32 {
    ratio.min(MAX_PIXEL_RATIO)
}

pub fn aspect_ratio(width: f32, height: f32) -> f32 {
    width / height
}

fn clamp_pixel_ratio_on_resize(
    mut resize_events: EventReader<WindowResized>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    for event in resize_events.read() {
        let Ok(mut window) = windows.get_mut(event.window) else {
            continue;
        };
        let native = window.resolution.base_scale_factor();
        let clamped = clamped_pixel_ratio(native);
        if window.resolution.scale_factor_override() != Some(clamped) {
            window.resolution.set_scale_factor_override(Some(clamped));
        }
        debug!(
            "viewport resized to {}x{} (aspect {:.3}, pixel ratio {})",
            event.width,
            event.height,
            aspect_ratio(event.width, event.height),
            clamped
        );
    }
}
