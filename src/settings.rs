//! Startup configuration for the water surface.
//!
//! An optional `settings.ron` in the working directory overrides the wave and
//! color defaults. The file is read once at startup; a missing file is
//! normal, a malformed one is reported and replaced with defaults. Live edits
//! happen through the debug panel instead, which mutates the material
//! directly.

use bevy::prelude::*;
use ron::from_str;
use serde::{Deserialize, Serialize};
use std::fs;

pub const SETTINGS_PATH: &str = "settings.ron";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    pub big_waves_speed: f32,
    pub big_waves_elevation: f32,
    pub big_waves_frequency: [f32; 2],
    /// Wave trough color, sRGB components.
    pub depth_color: [f32; 3],
    /// Wave crest color, sRGB components.
    pub surface_color: [f32; 3],
    pub color_offset: f32,
    pub color_multiplier: f32,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            big_waves_speed: 0.75,
            big_waves_elevation: 0.062,
            big_waves_frequency: [5.259, 1.856],
            // #186691
            depth_color: [0.094, 0.4, 0.569],
            // #9bd8ff
            surface_color: [0.608, 0.847, 1.0],
            color_offset: 0.05,
            color_multiplier: 5.0,
        }
    }
}

impl WaterSettings {
    /// Reads `settings.ron` if present, falling back to defaults otherwise.
    pub fn load_or_default() -> Self {
        match fs::read_to_string(SETTINGS_PATH) {
            Ok(contents) => Self::from_ron(&contents),
            Err(_) => Self::default(),
        }
    }

    fn from_ron(contents: &str) -> Self {
        match from_str(contents) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("malformed {SETTINGS_PATH}, using defaults: {err}");
                Self::default()
            }
        }
    }
}
