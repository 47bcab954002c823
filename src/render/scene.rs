//! Scene spawning: lights, stars, bodies, boundary rings, the warp tunnel
//! and the chase-camera rig.

use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    AccretionDisk, BoundaryMaterial, BoundaryRing, CameraHolder, CameraPivot, Forcefield,
    LoadingCamera, MainCamera, OrbitPivot, WarpParticles,
};
use crate::bodies::SolarSystem;
use crate::camera::CameraRig;
use crate::craft::Craft;
use crate::frame::WARP_TUNNEL_LENGTH;

/// Where the warp tunnel lives, far outside the main scene's view range.
pub const WARP_ORIGIN: Vec3 = Vec3::new(10_000.0, 0.0, 0.0);

const STAR_COUNT: usize = 600;
const WARP_PARTICLE_COUNT: usize = 1500;
const RING_THICKNESS: f32 = 0.1;
/// Forcefield sphere radius, just outside the craft collision radius.
const FORCEFIELD_MARGIN: f32 = 0.1;

pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 4000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 15.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Background stars on a thick shell around the system.
pub fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.8,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(0.6));

    let mut rng = StdRng::seed_from_u64(0x5741_5253);
    for _ in 0..STAR_COUNT {
        let direction = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-0.4..0.4),
            rng.random_range(-1.0..1.0),
        )
        .normalize_or(Vec3::X);
        let distance: f32 = rng.random_range(350.0..600.0);
        let scale: f32 = rng.random_range(0.5..1.5);

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(direction * distance).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}

/// Central body, pacing ring, and one pivot per orbiting body.
pub fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    system: Res<SolarSystem>,
) {
    let ring_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.5),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    commands.insert_resource(BoundaryMaterial(ring_material.clone()));

    let central = &system.central;
    commands.spawn((
        Name::new(central.name.clone()),
        Mesh3d(meshes.add(Sphere::new(central.collision_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::BLACK,
            unlit: true,
            ..default()
        })),
        Transform::from_translation(central.position),
    ));
    commands.spawn((
        AccretionDisk,
        Mesh3d(meshes.add(Torus {
            minor_radius: 0.4,
            major_radius: central.collision_radius * 2.2,
        })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.6, 0.3),
            emissive: LinearRgba::rgb(2.0, 0.9, 0.3),
            ..default()
        })),
        Transform::from_translation(central.position)
            .with_rotation(Quat::from_rotation_x(0.3))
            .with_scale(Vec3::new(1.0, 0.1, 1.0)),
    ));
    commands.spawn((
        BoundaryRing,
        Mesh3d(meshes.add(Torus {
            minor_radius: RING_THICKNESS,
            major_radius: central.boundary_radius,
        })),
        MeshMaterial3d(ring_material.clone()),
        Transform::from_translation(central.position),
    ));

    let mut rng = StdRng::seed_from_u64(0x504c_4e54);
    for (index, body) in system.orbiting.iter().enumerate() {
        let hue: f32 = rng.random_range(0.0..360.0);
        let planet_material = materials.add(StandardMaterial {
            base_color: Color::hsl(hue, 0.7, 0.5),
            perceptual_roughness: 0.8,
            ..default()
        });

        commands
            .spawn((
                OrbitPivot(index),
                Transform::from_rotation(Quat::from_rotation_y(body.pivot_angle)),
                Visibility::default(),
            ))
            .with_children(|pivot| {
                pivot
                    .spawn((
                        Name::new(body.name.clone()),
                        Mesh3d(meshes.add(Sphere::new(body.radius))),
                        MeshMaterial3d(planet_material),
                        Transform::from_xyz(body.orbit_radius, 0.0, 0.0),
                    ))
                    .with_children(|planet| {
                        planet.spawn((
                            BoundaryRing,
                            Mesh3d(meshes.add(Torus {
                                minor_radius: RING_THICKNESS,
                                major_radius: body.boundary_radius,
                            })),
                            MeshMaterial3d(ring_material.clone()),
                            Transform::default(),
                        ));
                    });
            });
    }

    info!("Spawned {} orbiting bodies", system.orbiting.len());
}

/// Camera and particle field for the loading overlay.
pub fn spawn_loading_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        LoadingCamera,
        Camera3d::default(),
        Camera {
            order: 1,
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            ..default()
        }),
        Transform::from_translation(WARP_ORIGIN).looking_to(Vec3::NEG_Z, Vec3::Y),
    ));

    let particle_mesh = meshes.add(Sphere::new(0.05));
    let particle_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 2.0,
        unlit: true,
        ..default()
    });

    let mut rng = StdRng::seed_from_u64(0x5741_5250);
    let half = WARP_TUNNEL_LENGTH / 2.0;
    commands
        .spawn((
            WarpParticles,
            Transform::from_translation(WARP_ORIGIN),
            Visibility::default(),
        ))
        .with_children(|tunnel| {
            for _ in 0..WARP_PARTICLE_COUNT {
                tunnel.spawn((
                    Mesh3d(particle_mesh.clone()),
                    MeshMaterial3d(particle_material.clone()),
                    Transform::from_xyz(
                        rng.random_range(-25.0..25.0),
                        rng.random_range(-25.0..25.0),
                        rng.random_range(-half..half),
                    ),
                ));
            }
        });
}

/// Hang the forcefield and the chase-camera rig off the craft entity.
pub fn spawn_camera_rig(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    craft: Res<Craft>,
    rig: Res<CameraRig>,
) {
    commands.spawn((
        Forcefield,
        Mesh3d(meshes.add(Sphere::new(craft.radius + FORCEFIELD_MARGIN))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.6, 0.8, 1.0, 0.0),
            unlit: true,
            alpha_mode: AlphaMode::Add,
            cull_mode: None,
            double_sided: true,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        ChildOf(craft.entity),
    ));

    let pivot = commands
        .spawn((
            CameraPivot,
            Transform::from_rotation(rig.pivot_rotation()),
            Visibility::default(),
            ChildOf(craft.entity),
        ))
        .id();
    let holder = commands
        .spawn((
            CameraHolder,
            Transform::from_rotation(rig.holder_rotation()),
            Visibility::default(),
            ChildOf(pivot),
        ))
        .id();
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Camera {
            is_active: false,
            ..default()
        },
        rig.camera_local(),
        ChildOf(holder),
    ));

    info!("Camera rig attached to craft {}", craft.entity);
}
