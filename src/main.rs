//! A shader-animated sea with a ship bobbing on it.
//!
//! The water plane is displaced in the vertex shader; the ship's position and
//! rocking are computed on the CPU from the same wave formula so the two stay
//! visually in sync. Orbit the camera with left-drag, zoom with the scroll
//! wheel, and tune the wave parameters in the debug panel.

mod camera;
mod settings;
mod ship;
mod ui;
mod viewport;
mod water;
mod waves;

use bevy::{prelude::*, window::PresentMode};
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use camera::OrbitCameraPlugin;
use settings::WaterSettings;
use ship::ShipPlugin;
use ui::DebugPanelPlugin;
use viewport::ViewportPlugin;
use water::WaterPlugin;

/// Per-frame phases, in the order the original render loop runs them:
/// controls first, then the shader uniforms, then object placement on the
/// updated surface.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Controls,
    Uniforms,
    Buoyancy,
}

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Raging Sea".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    app.add_plugins(EguiPlugin {
        enable_multipass_for_primary_context: false,
    });

    app.configure_sets(
        Update,
        (TickSet::Controls, TickSet::Uniforms, TickSet::Buoyancy).chain(),
    )
    .insert_resource(WaterSettings::load_or_default())
    .add_plugins((
        WaterPlugin,
        ShipPlugin,
        OrbitCameraPlugin,
        ViewportPlugin,
        DebugPanelPlugin,
    ))
    .add_systems(Startup, spawn_lights)
    .run();
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 10_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 7.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
}
