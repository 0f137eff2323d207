//! Debug panel for live-editing the water parameters.
//!
//! Writes straight into the single [`WaterMaterial`] asset, so edits reach
//! the shader uniforms and the CPU-side wave sync in the same frame.

use bevy::prelude::*;
use bevy_inspector_egui::bevy_egui::EguiContexts;

use crate::water::{WaterMaterial, WaterMaterialHandle};

pub struct DebugPanelPlugin;

impl Plugin for DebugPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, water_panel);
    }
}

fn water_panel(
    mut contexts: EguiContexts,
    handle: Res<WaterMaterialHandle>,
    mut materials: ResMut<Assets<WaterMaterial>>,
) {
    let Some(material) = materials.get_mut(&handle.0) else {
        return;
    };

    egui::Window::new("Water")
        .default_width(340.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.add(egui::Slider::new(&mut material.big_waves_speed, 0.0..=4.0).text("wave speed"));
            ui.add(
                egui::Slider::new(&mut material.big_waves_elevation, 0.0..=0.5)
                    .text("wave elevation"),
            );
            ui.add(
                egui::Slider::new(&mut material.big_waves_frequency.x, 0.0..=10.0)
                    .text("frequency x"),
            );
            ui.add(
                egui::Slider::new(&mut material.big_waves_frequency.y, 0.0..=10.0)
                    .text("frequency y"),
            );
            ui.add(egui::Slider::new(&mut material.color_offset, 0.0..=1.0).text("color offset"));
            ui.add(
                egui::Slider::new(&mut material.color_multiplier, 0.0..=10.0)
                    .text("color multiplier"),
            );
            color_edit(ui, "depth color", &mut material.depth_color);
            color_edit(ui, "surface color", &mut material.surface_color);
        });
}

/// Edits a linear color through an sRGB picker, which is what the picker
/// widget expects.
fn color_edit(ui: &mut egui::Ui, label: &str, color: &mut LinearRgba) {
    let srgba = Srgba::from(*color);
    let mut rgb = [srgba.red, srgba.green, srgba.blue];
    ui.horizontal(|ui| {
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            *color = Srgba::new(rgb[0], rgb[1], rgb[2], 1.0).into();
        }
        ui.label(label);
    });
}
