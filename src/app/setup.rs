//! Startup systems that build the scene: floor, platforms, lighting, the
//! character body, and the follow camera.
//!
//! Platform X positions are jittered with a small deterministic LCG so the
//! course is varied but reproducible run to run.
use avian3d::prelude::*;
use bevy::pbr::{CascadeShadowConfigBuilder, FogFalloff, FogSettings};
use bevy::prelude::*;
use hopper::character::collision::CHARACTER_FRICTION;
use hopper::character::{Character, Controls};
use hopper::platform::Platform;
use hopper::settings::Settings;

const FLOOR_SIZE: Vec3 = Vec3::new(200.0, 1.0, 200.0);
const PLATFORM_SIZE: Vec3 = Vec3::new(40.0, 1.0, 3.0);
const PLATFORM_SPACING: f32 = 4.0;
const PLATFORM_X_JITTER: f32 = 10.0;

/// Build the world and spawn the character and camera rig.
#[allow(clippy::needless_pass_by_value, clippy::cast_precision_loss)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    // Sky and fog share one color so the fogged horizon blends into it.
    let fog_color = Color::srgb(0.5, 0.5, 0.7);
    commands.insert_resource(ClearColor(fog_color));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            shadows_enabled: settings.graphics.shadows,
            ..default()
        },
        transform: Transform::default().looking_to(Vec3::new(0.3, -0.5, 0.425), Vec3::Y),
        cascade_shadow_config: CascadeShadowConfigBuilder {
            maximum_distance: 200.0,
            ..default()
        }
        .build(),
        ..default()
    });

    // Floor
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::new(FLOOR_SIZE.x, FLOOR_SIZE.y, FLOOR_SIZE.z)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(0.45, 0.45, 0.42),
                perceptual_roughness: 0.9,
                ..default()
            }),
            transform: Transform::from_xyz(0.0, -0.5, 0.0),
            ..default()
        },
        RigidBody::Static,
        Collider::cuboid(FLOOR_SIZE.x, FLOOR_SIZE.y, FLOOR_SIZE.z),
        Friction::new(1.0),
    ));

    // Platforms: one mesh/material shared, alternating kinematic and static
    // bodies; either kind is repositioned directly by `platform_motion`.
    let platform_mesh = meshes.add(Cuboid::new(PLATFORM_SIZE.x, PLATFORM_SIZE.y, PLATFORM_SIZE.z));
    let platform_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.55, 0.8),
        perceptual_roughness: 0.6,
        ..default()
    });

    let mut lcg_state: u32 = 0x1234_5678;
    for i in 0..settings.world.platform_count {
        lcg_state = lcg_state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let unit = ((lcg_state >> 16) & 0x7fff) as f32 / 32767.0;
        let x = unit * 2.0 * PLATFORM_X_JITTER - PLATFORM_X_JITTER;
        let origin = Vec3::new(x, 0.0, i as f32 * PLATFORM_SPACING);

        let body = if i % 2 == 1 {
            RigidBody::Kinematic
        } else {
            RigidBody::Static
        };

        commands.spawn((
            PbrBundle {
                mesh: platform_mesh.clone(),
                material: platform_material.clone(),
                transform: Transform::from_translation(origin),
                ..default()
            },
            body,
            Collider::cuboid(PLATFORM_SIZE.x, PLATFORM_SIZE.y, PLATFORM_SIZE.z),
            Friction::new(1.0),
            Platform::new(i, origin),
        ));
    }

    // Character: a dynamic box steered by impulses. Rotation is locked so the
    // solver never tips it over; yaw is written straight to the transform.
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::new(1.0, 2.0, 1.0)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(0.8, 0.55, 0.3),
                ..default()
            }),
            transform: Transform::from_xyz(0.0, 2.0, 0.0),
            ..default()
        },
        RigidBody::Dynamic,
        Collider::cuboid(1.0, 2.0, 1.0),
        Mass(1.0),
        Friction::new(CHARACTER_FRICTION),
        Restitution::new(0.0).with_combine_rule(CoefficientCombine::Min),
        LockedAxes::new()
            .lock_rotation_x()
            .lock_rotation_y()
            .lock_rotation_z(),
        ExternalImpulse::default().with_persistence(false),
        Character::default(),
        Controls::default(),
    ));

    // Third-person camera
    let mut camera = commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 3.7, 10.0).looking_at(Vec3::new(0.0, 1.7, 0.0), Vec3::Y),
            ..default()
        },
        crate::app::camera::FollowCamera,
    ));
    if settings.graphics.fog {
        camera.insert(FogSettings {
            color: fog_color,
            falloff: FogFalloff::Linear {
                start: 100.0,
                end: 300.0,
            },
            ..default()
        });
    }
}
