//! Per-frame input sampling into the control snapshot.
//!
//! The bitmask is cleared and rebuilt from keyboard state every render frame,
//! mouse motion accumulates into yaw/pitch, and yaw is applied to the
//! character's transform here so the facing updates at render rate instead of
//! physics rate. Sampling pauses while the cursor is released.

use crate::character::controls::{Controls, CTRL_BACK, CTRL_FORWARD, CTRL_JUMP, CTRL_LEFT, CTRL_RIGHT};
use crate::character::Character;
use crate::settings::Settings;
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

/// Sample keyboard and mouse state into each character's `Controls`.
#[allow(clippy::needless_pass_by_value)]
pub fn sample_controls(
    windows: Query<&Window, With<PrimaryWindow>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut motion: EventReader<MouseMotion>,
    settings: Res<Settings>,
    mut query: Query<(&mut Transform, &mut Controls), With<Character>>,
) {
    let mut delta = Vec2::ZERO;
    for ev in motion.read() {
        delta += ev.delta;
    }

    let cursor_grabbed = windows
        .get_single()
        .map(|w| !w.cursor.visible)
        .unwrap_or(false);

    let max_pitch = settings.camera.max_pitch_degrees.to_radians();

    for (mut transform, mut controls) in &mut query {
        // Clear previous controls, then re-sample while the cursor is grabbed.
        controls.set(CTRL_FORWARD | CTRL_BACK | CTRL_LEFT | CTRL_RIGHT | CTRL_JUMP, false);

        if cursor_grabbed {
            controls.set(CTRL_FORWARD, keyboard.pressed(settings.key("forward", KeyCode::KeyW)));
            controls.set(CTRL_BACK, keyboard.pressed(settings.key("back", KeyCode::KeyS)));
            controls.set(CTRL_LEFT, keyboard.pressed(settings.key("left", KeyCode::KeyA)));
            controls.set(CTRL_RIGHT, keyboard.pressed(settings.key("right", KeyCode::KeyD)));
            controls.set(CTRL_JUMP, keyboard.pressed(settings.key("jump", KeyCode::Space)));

            if delta != Vec2::ZERO {
                controls.apply_look(delta, &settings.controls, max_pitch);
            }
        }

        // Apply yaw every render frame; pitch belongs to the camera rig only.
        transform.rotation = Quat::from_rotation_y(controls.yaw);
    }
}

/// Grab the cursor on left click, release it on the mapped pause key.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left) {
        window.cursor.grab_mode = CursorGrabMode::Locked;
        window.cursor.visible = false;
    }

    if keyboard.just_pressed(settings.key("pause", KeyCode::Escape)) {
        window.cursor.grab_mode = CursorGrabMode::None;
        window.cursor.visible = true;
    }
}
