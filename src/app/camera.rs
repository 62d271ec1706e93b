//! Third-person follow camera.
//!
//! Positions the camera behind the character along the yaw+pitch look
//! direction each render frame, after the physics transforms have synced.
use bevy::prelude::*;
use hopper::character::{Character, Controls};
use hopper::settings::Settings;

/// Marker for the camera entity driven by `camera_follow`.
#[derive(Component)]
pub struct FollowCamera;

/// Place the camera behind the character's aim point.
#[allow(clippy::needless_pass_by_value)]
pub fn camera_follow(
    settings: Res<Settings>,
    characters: Query<(&Transform, &Controls), (With<Character>, Without<FollowCamera>)>,
    mut cameras: Query<&mut Transform, With<FollowCamera>>,
) {
    let Ok((character_tf, controls)) = characters.get_single() else {
        return;
    };
    let Ok(mut camera_tf) = cameras.get_single_mut() else {
        return;
    };

    let yaw = Quat::from_rotation_y(controls.yaw);
    let look = yaw * Quat::from_rotation_x(controls.pitch);

    // Aim slightly above the character origin, in its yaw frame.
    let aim = character_tf.translation + yaw * Vec3::new(0.0, settings.camera.aim_height, 0.0);

    camera_tf.translation = aim + look * Vec3::Z * settings.camera.distance;
    camera_tf.rotation = look;
}
