//! Craft model loading.
//!
//! Reports progress to the session as [`AssetLoadEvent`]s. A glTF scene is
//! loaded through the asset server; without one, a built-in placeholder
//! hull is used after a short cosmetic load so the warp tunnel still runs.

use bevy::asset::RecursiveDependencyLoadState;
use bevy::prelude::*;

use crate::config::FlightConfig;
use crate::session::AssetLoadEvent;

/// Seconds the placeholder pretends to load for.
const PLACEHOLDER_LOAD_SECS: f32 = 1.5;

/// Which craft model to show.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub enum CraftModel {
    #[default]
    Placeholder,
    /// Asset path of a glTF/GLB file; its first scene is used.
    Gltf(String),
}

/// Load in progress.
#[derive(Resource, Debug)]
pub struct CraftLoad {
    entity: Entity,
    scene: Option<Handle<Scene>>,
    progress: f32,
    finished: bool,
}

/// Spawn the craft entity and start loading its model.
pub fn begin_craft_load(
    mut commands: Commands,
    model: Res<CraftModel>,
    config: Res<FlightConfig>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut events: MessageWriter<AssetLoadEvent>,
) {
    let pose = Transform::from_translation(config.craft.start_position)
        .with_rotation(Quat::from_rotation_y(config.craft.start_heading));

    let (entity, scene) = match &*model {
        CraftModel::Gltf(path) => {
            info!("Loading craft model {path}");
            let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
            let entity = commands
                .spawn((Name::new("Craft"), SceneRoot(handle.clone()), pose))
                .id();
            (entity, Some(handle))
        }
        CraftModel::Placeholder => {
            let hull = materials.add(StandardMaterial {
                base_color: Color::srgb(0.75, 0.78, 0.85),
                metallic: 0.6,
                perceptual_roughness: 0.4,
                ..default()
            });
            let entity = commands
                .spawn((Name::new("Craft"), pose, Visibility::default()))
                .with_children(|craft| {
                    // Saucer and a nose cone pointing along local +Z.
                    craft.spawn((
                        Mesh3d(meshes.add(Cylinder::new(2.5, 0.4))),
                        MeshMaterial3d(hull.clone()),
                        Transform::from_xyz(0.0, 0.6, 1.0),
                    ));
                    craft.spawn((
                        Mesh3d(meshes.add(Cone {
                            radius: 0.8,
                            height: 4.0,
                        })),
                        MeshMaterial3d(hull),
                        Transform::from_xyz(0.0, 0.0, -0.5)
                            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                    ));
                })
                .id();
            (entity, None)
        }
    };

    events.write(AssetLoadEvent::Progress(0.0));
    commands.insert_resource(CraftLoad {
        entity,
        scene,
        progress: 0.0,
        finished: false,
    });
}

/// Report progress until the model is ready or has failed.
pub fn poll_craft_load(
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    load: Option<ResMut<CraftLoad>>,
    mut events: MessageWriter<AssetLoadEvent>,
) {
    let Some(mut load) = load else {
        return;
    };
    if load.finished {
        return;
    }
    let dt = time.delta_secs();

    let Some(handle) = load.scene.clone() else {
        load.progress = (load.progress + dt / PLACEHOLDER_LOAD_SECS).min(1.0);
        events.write(AssetLoadEvent::Progress(load.progress));
        if load.progress >= 1.0 {
            load.finished = true;
            events.write(AssetLoadEvent::Ready(load.entity));
        }
        return;
    };

    match asset_server.get_recursive_dependency_load_state(&handle) {
        Some(RecursiveDependencyLoadState::Loaded) => {
            load.finished = true;
            events.write(AssetLoadEvent::Progress(1.0));
            events.write(AssetLoadEvent::Ready(load.entity));
        }
        Some(RecursiveDependencyLoadState::Failed(err)) => {
            load.finished = true;
            events.write(AssetLoadEvent::Failed(err.to_string()));
        }
        _ => {
            // The asset server has no byte-level progress; creep toward 90%.
            load.progress += (0.9 - load.progress) * dt.min(1.0);
            events.write(AssetLoadEvent::Progress(load.progress));
        }
    }
}
