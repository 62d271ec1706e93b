//! Per-tick character movement: impulses, braking, and jumping.
//!
//! Runs in `FixedUpdate` ahead of the physics step. The actual math lives in
//! `movement_step` so tests and benchmarks exercise exactly what the system
//! runs.

use crate::character::controls::{Controls, CTRL_BACK, CTRL_FORWARD, CTRL_JUMP, CTRL_LEFT, CTRL_RIGHT};
use crate::character::Character;
use crate::settings::{MovementSettings, Settings};
use avian3d::prelude::*;
use bevy::prelude::*;

/// Compute the impulse to apply to the character body for one physics tick.
///
/// Updates the in-air timer, the grounded latch and the jump latch on
/// `character` as a side effect. The returned impulse combines movement,
/// braking and jumping; with a mass-1 body it reads as a velocity delta.
///
/// # Arguments
/// * `character` - contact state from the classification pass
/// * `controls` - the input snapshot sampled this frame
/// * `yaw_rot` - character yaw as a rotation (movement is camera-relative)
/// * `velocity` - current linear velocity of the body
/// * `dt` - fixed timestep in seconds
/// * `tuning` - force constants from settings
pub fn movement_step(
    character: &mut Character,
    controls: &Controls,
    yaw_rot: Quat,
    velocity: Vec3,
    dt: f32,
    tuning: &MovementSettings,
) -> Vec3 {
    // Update the in-air timer; reset if grounded.
    if character.on_ground {
        character.in_air_timer = 0.0;
    } else {
        character.in_air_timer += dt;
    }
    // A character airborne for a fraction of a second still counts as
    // grounded, so stepping off a ledge doesn't instantly kill steering.
    let soft_grounded = character.in_air_timer < tuning.air_grace;

    let mut move_dir = Vec3::ZERO;
    if controls.is_down(CTRL_FORWARD) {
        move_dir += Vec3::NEG_Z;
    }
    if controls.is_down(CTRL_BACK) {
        move_dir += Vec3::Z;
    }
    if controls.is_down(CTRL_LEFT) {
        move_dir += Vec3::NEG_X;
    }
    if controls.is_down(CTRL_RIGHT) {
        move_dir += Vec3::X;
    }

    // Normalize so diagonal strafing is not faster.
    move_dir = move_dir.normalize_or_zero();

    // Air control is allowed, but much weaker than ground movement.
    let force = if soft_grounded { tuning.move_force } else { tuning.air_move_force };
    let mut impulse = yaw_rot * move_dir * force;

    if soft_grounded {
        // Braking against planar velocity caps the maximum ground speed.
        let plane_velocity = Vec3::new(velocity.x, 0.0, velocity.z);
        impulse -= plane_velocity * tuning.brake_force;

        // Jump is edge-triggered: the key must be released between jumps.
        if controls.is_down(CTRL_JUMP) {
            if character.ok_to_jump {
                impulse += Vec3::Y * tuning.jump_force;
                character.ok_to_jump = false;
            }
        } else {
            character.ok_to_jump = true;
        }
    }

    // Grounded is re-derived from contacts every tick.
    character.on_ground = false;

    impulse
}

/// Apply `movement_step` to every character body once per physics tick.
#[allow(clippy::needless_pass_by_value)]
pub fn character_movement(
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<(&Controls, &Rotation, &LinearVelocity, &mut ExternalImpulse, &mut Character)>,
) {
    let dt = time.delta_seconds();
    for (controls, rotation, velocity, mut impulse, mut character) in &mut query {
        let step = movement_step(&mut character, controls, rotation.0, velocity.0, dt, &settings.movement);
        impulse.apply_impulse(step);
    }
}
