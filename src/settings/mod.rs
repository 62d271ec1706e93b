//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are
//! hot-reloadable using the RON watcher utilities (see `ron::setup_ron_watcher`).
//! Every field carries a serde default so a partial file is always valid.
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Cap FPS to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_shadows")]
    pub shadows: bool, // Directional light shadow mapping.
    #[serde(default = "GraphicsSettings::default_fog")]
    pub fog: bool, // Linear distance fog on the main camera.
    #[serde(default)]
    pub physics_debug: bool, // Wireframe collider/contact rendering (requires restart).
}

impl GraphicsSettings {
    fn default_vsync() -> bool { false }
    fn default_shadows() -> bool { true }
    fn default_fog() -> bool { true }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            vsync: Self::default_vsync(),
            shadows: Self::default_shadows(),
            fog: Self::default_fog(),
            physics_debug: false,
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_x: bool, // Invert mouse X axis
    #[serde(default)]
    pub invert_y: bool, // Invert mouse Y axis
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Mouse sensitivity multiplier
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 1.0 }

    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("forward".to_string(), "W".to_string());
        m.insert("back".to_string(), "S".to_string());
        m.insert("left".to_string(), "A".to_string());
        m.insert("right".to_string(), "D".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("pause".to_string(), "Escape".to_string());
        m.insert("toggle_debug".to_string(), "F1".to_string());
        m.insert("dump_debug".to_string(), "F3".to_string());
        m
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_x: false,
            invert_y: false,
            mouse_sensitivity: Self::default_sensitivity(),
            keybinds: Self::default_keybinds(),
        }
    }
}

/// Tuning constants for the character controller, applied once per physics
/// tick. Impulse magnitudes assume the character body has mass 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_move_force")]
    pub move_force: f32, // Movement impulse per tick while grounded
    #[serde(default = "MovementSettings::default_air_move_force")]
    pub air_move_force: f32, // Reduced movement impulse while airborne
    #[serde(default = "MovementSettings::default_brake_force")]
    pub brake_force: f32, // Fraction of planar velocity removed per tick on ground
    #[serde(default = "MovementSettings::default_jump_force")]
    pub jump_force: f32, // Upward jump impulse
    #[serde(default = "MovementSettings::default_air_grace")]
    pub air_grace: f32, // Seconds airborne before the character stops counting as grounded
    #[serde(default = "MovementSettings::default_ground_normal_min")]
    pub ground_normal_min: f32, // Minimum |normal.y| for a contact to count as ground
}

impl MovementSettings {
    fn default_move_force() -> f32 { 0.8 }
    fn default_air_move_force() -> f32 { 0.02 }
    fn default_brake_force() -> f32 { 0.2 }
    fn default_jump_force() -> f32 { 7.0 }
    fn default_air_grace() -> f32 { 0.1 }
    fn default_ground_normal_min() -> f32 { 0.75 }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_force: Self::default_move_force(),
            air_move_force: Self::default_air_move_force(),
            brake_force: Self::default_brake_force(),
            jump_force: Self::default_jump_force(),
            air_grace: Self::default_air_grace(),
            ground_normal_min: Self::default_ground_normal_min(),
        }
    }
}

/// Scene layout: how many platforms to spawn and how they oscillate.
/// `platform_count` is read once at startup; the rest hot-reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    #[serde(default = "WorldSettings::default_platform_count")]
    pub platform_count: u32, // Number of platforms spawned at startup
    #[serde(default = "WorldSettings::default_platform_amplitude")]
    pub platform_amplitude: f32, // Max X displacement from the spawn origin
    #[serde(default = "WorldSettings::default_platform_speed")]
    pub platform_speed: f32, // Angular speed of the oscillation (rad/s)
}

impl WorldSettings {
    fn default_platform_count() -> u32 { 60 }
    fn default_platform_amplitude() -> f32 { 3.0 }
    fn default_platform_speed() -> f32 { 1.0 }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            platform_count: Self::default_platform_count(),
            platform_amplitude: Self::default_platform_amplitude(),
            platform_speed: Self::default_platform_speed(),
        }
    }
}

/// Third-person camera rig tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default = "CameraSettings::default_distance")]
    pub distance: f32, // How far behind the character the camera sits
    #[serde(default = "CameraSettings::default_aim_height")]
    pub aim_height: f32, // Aim point height above the character origin
    #[serde(default = "CameraSettings::default_max_pitch_degrees")]
    pub max_pitch_degrees: f32, // Pitch clamp in either direction
}

impl CameraSettings {
    fn default_distance() -> f32 { 10.0 }
    fn default_aim_height() -> f32 { 1.7 }
    fn default_max_pitch_degrees() -> f32 { 80.0 }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            distance: Self::default_distance(),
            aim_height: Self::default_aim_height(),
            max_pitch_degrees: Self::default_max_pitch_degrees(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub world: WorldSettings,
    #[serde(default)]
    pub camera: CameraSettings,
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Look up the key bound to `action`, falling back to `default` when the
    /// binding is missing or names an unknown key.
    #[must_use]
    pub fn key(&self, action: &str, default: KeyCode) -> KeyCode {
        self.controls
            .keybinds
            .get(action)
            .and_then(|s| Self::keycode_from_str(s))
            .unwrap_or(default)
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into a
    /// `KeyCode` usable with Bevy's input system.
    ///
    /// # Returns
    /// `None` if the string does not match any known key.
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.to_ascii_uppercase();
        if s.len() == 1 {
            let c = s.chars().next()?;
            if c.is_ascii_uppercase() {
                return Some(match c {
                    'A' => KeyCode::KeyA,
                    'B' => KeyCode::KeyB,
                    'C' => KeyCode::KeyC,
                    'D' => KeyCode::KeyD,
                    'E' => KeyCode::KeyE,
                    'F' => KeyCode::KeyF,
                    'G' => KeyCode::KeyG,
                    'H' => KeyCode::KeyH,
                    'I' => KeyCode::KeyI,
                    'J' => KeyCode::KeyJ,
                    'K' => KeyCode::KeyK,
                    'L' => KeyCode::KeyL,
                    'M' => KeyCode::KeyM,
                    'N' => KeyCode::KeyN,
                    'O' => KeyCode::KeyO,
                    'P' => KeyCode::KeyP,
                    'Q' => KeyCode::KeyQ,
                    'R' => KeyCode::KeyR,
                    'S' => KeyCode::KeyS,
                    'T' => KeyCode::KeyT,
                    'U' => KeyCode::KeyU,
                    'V' => KeyCode::KeyV,
                    'W' => KeyCode::KeyW,
                    'X' => KeyCode::KeyX,
                    'Y' => KeyCode::KeyY,
                    'Z' => KeyCode::KeyZ,
                    _ => return None,
                });
            }
            if c.is_ascii_digit() {
                return Some(match c {
                    '0' => KeyCode::Digit0,
                    '1' => KeyCode::Digit1,
                    '2' => KeyCode::Digit2,
                    '3' => KeyCode::Digit3,
                    '4' => KeyCode::Digit4,
                    '5' => KeyCode::Digit5,
                    '6' => KeyCode::Digit6,
                    '7' => KeyCode::Digit7,
                    '8' => KeyCode::Digit8,
                    '9' => KeyCode::Digit9,
                    _ => return None,
                });
            }
        }

        Some(match s.as_str() {
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" => KeyCode::Backspace,

            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            _ => return None,
        })
    }
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_defaults_match_tuning() {
        let m = MovementSettings::default();
        assert_eq!(m.move_force, 0.8);
        assert_eq!(m.air_move_force, 0.02);
        assert_eq!(m.brake_force, 0.2);
        assert_eq!(m.jump_force, 7.0);
        assert_eq!(m.air_grace, 0.1);
        assert_eq!(m.ground_normal_min, 0.75);
    }

    #[test]
    fn partial_ron_falls_back_to_defaults() {
        // Only one section present; everything else must come from defaults.
        let s: Settings = ron::from_str("(movement: (jump_force: 9.5))").expect("valid settings");
        assert_eq!(s.movement.jump_force, 9.5);
        assert_eq!(s.movement.move_force, 0.8);
        assert_eq!(s.world.platform_count, 60);
        assert_eq!(s.camera.distance, 10.0);
    }

    #[test]
    fn keybind_lookup_with_fallback() {
        let s = Settings::default();
        assert_eq!(s.key("jump", KeyCode::KeyZ), KeyCode::Space);
        assert_eq!(s.key("no_such_action", KeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_parsing() {
        assert_eq!(Settings::keycode_from_str("w"), Some(KeyCode::KeyW));
        assert_eq!(Settings::keycode_from_str("Space"), Some(KeyCode::Space));
        assert_eq!(Settings::keycode_from_str("F1"), Some(KeyCode::F1));
        assert_eq!(Settings::keycode_from_str("7"), Some(KeyCode::Digit7));
        assert_eq!(Settings::keycode_from_str("NotAKey"), None);
    }
}
