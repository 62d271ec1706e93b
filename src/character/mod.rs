//! Character controller: input snapshot, per-tick movement, and contact
//! classification.
//!
//! The controller steers a dynamic rigid body by applying impulses once per
//! physics tick, based on the `Controls` snapshot sampled each render frame.
//! Contact flags (`on_ground`, `riding`) are produced by the collision
//! classification systems from the previous physics step and consumed on the
//! next tick.
pub mod collision;
pub mod controls;
pub mod input;
pub mod movement;

use bevy::prelude::*;

pub use collision::{carry_riders, classify_contacts};
pub use controls::{Controls, CTRL_BACK, CTRL_FORWARD, CTRL_JUMP, CTRL_LEFT, CTRL_RIGHT};
pub use input::{cursor_grab, sample_controls};
pub use movement::character_movement;

/// Active coupling to a moving platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Riding {
    /// The platform entity being stood on.
    pub platform: Entity,
    /// Platform position at the previous tick; used to copy per-tick deltas.
    pub last_platform_pos: Vec3,
}

/// Contact state tracked for the player character across physics ticks.
#[derive(Component, Debug)]
pub struct Character {
    /// True when a near-vertical contact below the center was seen this tick.
    pub on_ground: bool,
    /// Jump latch; cleared on jump, re-armed when the jump key is released.
    pub ok_to_jump: bool,
    /// Seconds since the character was last grounded.
    pub in_air_timer: f32,
    /// Set while standing on a platform; cleared when the contact ends.
    pub riding: Option<Riding>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            on_ground: false,
            ok_to_jump: true,
            in_air_timer: 0.0,
            riding: None,
        }
    }
}
