//! Per-frame control snapshot: a button bitmask plus look angles.
//!
//! Input sampling rebuilds the bitmask every render frame and the character
//! controller consumes it once per physics tick. Yaw/pitch accumulate across
//! frames instead of being rebuilt, since mouse motion is a delta stream.

use crate::settings::ControlsSettings;
use bevy::prelude::*;

pub const CTRL_FORWARD: u8 = 1;
pub const CTRL_BACK: u8 = 1 << 1;
pub const CTRL_LEFT: u8 = 1 << 2;
pub const CTRL_RIGHT: u8 = 1 << 3;
pub const CTRL_JUMP: u8 = 1 << 4;

/// Radians of look rotation per pixel of mouse motion at sensitivity 1.0.
const LOOK_SCALE: f32 = 0.002;

/// Control intents for one frame: held buttons and accumulated look angles.
#[derive(Component, Clone, Debug, Default)]
pub struct Controls {
    /// Held-button bitmask (`CTRL_*` constants).
    pub buttons: u8,
    /// Horizontal look angle (radians).
    pub yaw: f32,
    /// Vertical look angle (radians), clamped by `apply_look`.
    pub pitch: f32,
}

impl Controls {
    /// Set or clear every button in `mask`.
    pub fn set(&mut self, mask: u8, down: bool) {
        if down {
            self.buttons |= mask;
        } else {
            self.buttons &= !mask;
        }
    }

    #[must_use]
    pub fn is_down(&self, mask: u8) -> bool {
        self.buttons & mask != 0
    }

    /// Accumulate a mouse delta into yaw/pitch, honoring sensitivity and axis
    /// inversion, and clamp pitch to `max_pitch` radians either way.
    pub fn apply_look(&mut self, delta: Vec2, controls: &ControlsSettings, max_pitch: f32) {
        let mut delta = delta;
        if controls.invert_x {
            delta.x = -delta.x;
        }
        if controls.invert_y {
            delta.y = -delta.y;
        }

        let scale = controls.mouse_sensitivity * LOOK_SCALE;
        self.yaw -= delta.x * scale;
        self.pitch -= delta.y * scale;
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear_buttons() {
        let mut c = Controls::default();
        c.set(CTRL_FORWARD | CTRL_JUMP, true);
        assert!(c.is_down(CTRL_FORWARD));
        assert!(c.is_down(CTRL_JUMP));
        assert!(!c.is_down(CTRL_LEFT));

        c.set(CTRL_FORWARD, false);
        assert!(!c.is_down(CTRL_FORWARD));
        assert!(c.is_down(CTRL_JUMP));
    }

    #[test]
    fn clearing_all_masks_resets_bitmask() {
        let mut c = Controls::default();
        c.set(CTRL_FORWARD | CTRL_BACK | CTRL_LEFT | CTRL_RIGHT | CTRL_JUMP, true);
        c.set(CTRL_FORWARD | CTRL_BACK | CTRL_LEFT | CTRL_RIGHT | CTRL_JUMP, false);
        assert_eq!(c.buttons, 0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut c = Controls::default();
        let settings = ControlsSettings::default();
        let max_pitch = 80.0f32.to_radians();

        // Drag the mouse down a very long way; pitch must stop at the clamp.
        c.apply_look(Vec2::new(0.0, 1.0e6), &settings, max_pitch);
        assert!((c.pitch + max_pitch).abs() < 1.0e-6);

        c.apply_look(Vec2::new(0.0, -2.0e6), &settings, max_pitch);
        assert!((c.pitch - max_pitch).abs() < 1.0e-6);
    }

    #[test]
    fn inversion_flips_look_direction() {
        let settings = ControlsSettings::default();
        let inverted = ControlsSettings {
            invert_x: true,
            invert_y: true,
            ..ControlsSettings::default()
        };
        let max_pitch = 80.0f32.to_radians();

        let mut a = Controls::default();
        let mut b = Controls::default();
        a.apply_look(Vec2::new(10.0, 4.0), &settings, max_pitch);
        b.apply_look(Vec2::new(10.0, 4.0), &inverted, max_pitch);

        assert_eq!(a.yaw, -b.yaw);
        assert_eq!(a.pitch, -b.pitch);
    }
}
