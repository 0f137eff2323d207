//! Ship model loading and buoyancy.
//!
//! The ship is loaded asynchronously from a binary glTF file. The frame loop
//! never waits for it: a polling system spawns the scene once the asset is
//! ready, and the buoyancy system is a no-op until the entity exists. A failed
//! load is logged and leaves the rest of the scene running without a ship.

use bevy::{asset::LoadState, gltf::Gltf, prelude::*, scene::SceneInstanceReady};

use crate::water::{WaterMaterial, WaterMaterialHandle};
use crate::waves;
use crate::TickSet;

/// Asset path of the ship model, relative to the assets directory.
pub const SHIP_MODEL_PATH: &str = "models/ship.glb";

pub struct ShipPlugin;

impl Plugin for ShipPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, begin_ship_load).add_systems(
            Update,
            (poll_ship_load, float_ship.in_set(TickSet::Buoyancy)),
        );
    }
}

/// Marker for the ship's scene root entity. Spawned exactly once, after the
/// glTF load completes.
#[derive(Component)]
pub struct Ship;

/// Tracks the in-flight glTF load.
#[derive(Resource)]
struct ShipLoad {
    gltf: Handle<Gltf>,
    spawned: bool,
    failed: bool,
}

/// Animation clips carried by the ship model, ready to play once the scene
/// instance is spawned.
#[derive(Resource)]
struct ShipAnimations {
    graph: Handle<AnimationGraph>,
    nodes: Vec<AnimationNodeIndex>,
}

fn begin_ship_load(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("loading ship model from {SHIP_MODEL_PATH}");
    commands.insert_resource(ShipLoad {
        gltf: asset_server.load(SHIP_MODEL_PATH),
        spawned: false,
        failed: false,
    });
}

/// Spawns the ship scene once the asynchronous load completes.
///
/// Load failure is non-fatal: it is reported once and the ship feature stays
/// inactive for the lifetime of the app.
fn poll_ship_load(
    mut commands: Commands,
    mut load: ResMut<ShipLoad>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
) {
    if load.spawned || load.failed {
        return;
    }

    if let LoadState::Failed(err) = asset_server.load_state(&load.gltf) {
        error!("failed to load ship model {SHIP_MODEL_PATH}: {err}");
        load.failed = true;
        return;
    }

    let Some(gltf) = gltfs.get(&load.gltf) else {
        // Still loading.
        return;
    };

    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        warn!("ship model {SHIP_MODEL_PATH} contains no scenes");
        load.failed = true;
        return;
    };

    if !gltf.animations.is_empty() {
        let (graph, nodes) = AnimationGraph::from_clips(gltf.animations.iter().cloned());
        commands.insert_resource(ShipAnimations {
            graph: graphs.add(graph),
            nodes,
        });
    }

    info!(
        "ship model loaded ({} animation clips)",
        gltf.animations.len()
    );
    commands
        .spawn((Ship, SceneRoot(scene)))
        .observe(play_ship_animations);
    load.spawned = true;
}

/// Starts every animation clip the model carries, looping, on the scene's
/// animation player.
fn play_ship_animations(
    trigger: Trigger<SceneInstanceReady>,
    animations: Option<Res<ShipAnimations>>,
    children: Query<&Children>,
    mut players: Query<&mut AnimationPlayer>,
    mut commands: Commands,
) {
    let Some(animations) = animations else {
        return;
    };
    for entity in children.iter_descendants(trigger.target()) {
        let Ok(mut player) = players.get_mut(entity) else {
            continue;
        };
        for &node in &animations.nodes {
            player.play(node).repeat();
        }
        commands
            .entity(entity)
            .insert(AnimationGraphHandle(animations.graph.clone()));
    }
}

/// Bobs and rocks the ship in sync with the water surface.
///
/// Reads the live material parameters so debug-panel edits move the ship and
/// the rendered waves together.
pub(crate) fn float_ship(
    time: Res<Time>,
    handle: Res<WaterMaterialHandle>,
    materials: Res<Assets<WaterMaterial>>,
    mut ships: Query<&mut Transform, With<Ship>>,
) {
    let Some(material) = materials.get(&handle.0) else {
        return;
    };
    let params = material.wave_params();
    let elapsed = time.elapsed_secs();

    for mut transform in &mut ships {
        let pose = waves::float_pose(
            transform.translation.x,
            transform.translation.z,
            elapsed,
            &params,
        );
        transform.translation.y = pose.y;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, pose.pitch, 0.0, pose.roll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WaterSettings;

    #[test]
    fn test_float_ship_applies_pose_to_ship_entity() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<WaterMaterial>();

        let handle = {
            let mut materials = app.world_mut().resource_mut::<Assets<WaterMaterial>>();
            materials.add(WaterMaterial::from_settings(&WaterSettings::default()))
        };
        app.insert_resource(WaterMaterialHandle(handle));
        app.add_systems(Update, float_ship);

        let ship = app
            .world_mut()
            .spawn((Ship, Transform::from_xyz(0.3, 0.0, -0.6)))
            .id();
        app.update();

        let transform = app.world().entity(ship).get::<Transform>().unwrap();
        let material = WaterMaterial::from_settings(&WaterSettings::default());
        let elapsed = app.world().resource::<Time>().elapsed_secs();
        let pose = waves::float_pose(0.3, -0.6, elapsed, &material.wave_params());
        assert!((transform.translation.y - pose.y).abs() < 1e-5);
        let (pitch, yaw, roll) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((pitch - pose.pitch).abs() < 1e-5);
        assert!(yaw.abs() < 1e-5);
        assert!((roll - pose.roll).abs() < 1e-5);
    }
}
