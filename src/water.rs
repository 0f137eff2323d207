//! Shader-animated water surface.
//!
//! This module provides the custom water material and the plane it is applied
//! to. The material uses our own WGSL shader for vertex displacement and
//! depth-based coloring; the displacement formula is mirrored on the CPU by
//! [`crate::waves`] so floating objects stay in sync with the surface.

use bevy::{
    asset::embedded_asset,
    prelude::*,
    render::render_resource::{AsBindGroup, ShaderRef},
};

use crate::settings::WaterSettings;
use crate::waves::WaveParams;
use crate::TickSet;

/// Side length of the square water plane, in world units.
pub const WATER_SIZE: f32 = 4.0;

/// Plane subdivisions along each axis; yields a 128x128 quad grid, enough
/// resolution for the vertex displacement to read as smooth waves.
pub const WATER_SUBDIVISIONS: u32 = 127;

const WATER_SHADER_PATH: &str = "embedded://raging_sea/shaders/water.wgsl";

/// Plugin that registers the water material, spawns the water plane and
/// drives the shader's time uniform.
pub struct WaterPlugin;

impl Plugin for WaterPlugin {
    fn build(&self, app: &mut App) {
        // Embed the shader at compile time
        embedded_asset!(app, "shaders/water.wgsl");

        app.add_plugins(MaterialPlugin::<WaterMaterial>::default())
            .add_systems(Startup, spawn_water)
            .add_systems(Update, update_water_time.in_set(TickSet::Uniforms));
    }
}

/// Water material backing `shaders/water.wgsl`.
///
/// All fields land in a single uniform block; the WGSL `WaterUniforms` struct
/// must declare them in the same order.
#[derive(Asset, AsBindGroup, Reflect, Debug, Clone)]
pub struct WaterMaterial {
    /// Color of wave troughs.
    #[uniform(0)]
    pub depth_color: LinearRgba,

    /// Color of wave crests.
    #[uniform(0)]
    pub surface_color: LinearRgba,

    /// Spatial wave frequency along X and Z.
    #[uniform(0)]
    pub big_waves_frequency: Vec2,

    /// Elapsed seconds; written every frame.
    #[uniform(0)]
    pub time: f32,

    /// Wave animation speed.
    #[uniform(0)]
    pub big_waves_speed: f32,

    /// Wave amplitude.
    #[uniform(0)]
    pub big_waves_elevation: f32,

    /// Added to the vertex elevation before color mixing.
    #[uniform(0)]
    pub color_offset: f32,

    /// Scales the elevation's influence on the depth/surface color mix.
    #[uniform(0)]
    pub color_multiplier: f32,
}

impl WaterMaterial {
    /// Builds the material from the startup settings.
    pub fn from_settings(settings: &WaterSettings) -> Self {
        let [dr, dg, db] = settings.depth_color;
        let [sr, sg, sb] = settings.surface_color;
        Self {
            depth_color: Color::srgb(dr, dg, db).to_linear(),
            surface_color: Color::srgb(sr, sg, sb).to_linear(),
            big_waves_frequency: Vec2::from(settings.big_waves_frequency),
            time: 0.0,
            big_waves_speed: settings.big_waves_speed,
            big_waves_elevation: settings.big_waves_elevation,
            color_offset: settings.color_offset,
            color_multiplier: settings.color_multiplier,
        }
    }

    /// The live wave parameters, as consumed by [`crate::waves`].
    pub fn wave_params(&self) -> WaveParams {
        WaveParams {
            speed: self.big_waves_speed,
            elevation: self.big_waves_elevation,
            frequency: self.big_waves_frequency,
        }
    }
}

impl Material for WaterMaterial {
    fn vertex_shader() -> ShaderRef {
        WATER_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        WATER_SHADER_PATH.into()
    }
}

/// Handle to the single water material, so the time-uniform system, the
/// buoyancy system and the debug panel all edit the same asset.
#[derive(Resource)]
pub struct WaterMaterialHandle(pub Handle<WaterMaterial>);

fn spawn_water(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<WaterMaterial>>,
    settings: Res<WaterSettings>,
) {
    let mesh = meshes.add(
        Plane3d::default()
            .mesh()
            .size(WATER_SIZE, WATER_SIZE)
            .subdivisions(WATER_SUBDIVISIONS),
    );
    let material = materials.add(WaterMaterial::from_settings(&settings));
    commands.insert_resource(WaterMaterialHandle(material.clone()));
    commands.spawn((Mesh3d(mesh), MeshMaterial3d(material)));
}

/// Writes the monotonic elapsed time into the shader's time uniform.
fn update_water_time(
    time: Res<Time>,
    handle: Res<WaterMaterialHandle>,
    mut materials: ResMut<Assets<WaterMaterial>>,
) {
    if let Some(material) = materials.get_mut(&handle.0) {
        material.time = time.elapsed_secs();
    }
}
