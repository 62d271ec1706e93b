//! Settings loading and hot-reloading.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If
//! multiple RON files are present the first successfully parsed `Settings`
//! wins. A `notify` watcher flags changes so edits to the tuning constants
//! apply while the game is running; a reload that parses nothing keeps the
//! values already in place.
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use crate::settings::Settings;
use bevy::prelude::{Res, ResMut, Resource};

pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher(pub crate::ron::RonWatcher);

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher(crate::ron::RonWatcher::stub())
    }
}

/// Load settings from `path` (directory). If multiple `.ron` files are present
/// the first parsed `Settings` is used; `None` when nothing parses, so the
/// caller decides between defaults (startup) and last-good values (reload).
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Option<Settings> {
    let items: Vec<Settings> = load_ron_files(path);
    items.into_iter().next()
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Returns a `notify::Error` when the underlying filesystem watcher cannot be
/// created; callers fall back to `SettingsWatcher::stub()`.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(SettingsWatcher)
}

/// Reload the settings resource when the watcher reports a change.
///
/// A change that parses to nothing (file deleted, half-saved edit) leaves the
/// current resource untouched; only a successfully parsed file replaces it.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    let mut flag = match watcher.0.changed.lock() {
        Ok(flag) => flag,
        Err(poisoned) => poisoned.into_inner(),
    };
    if *flag {
        match load_settings_from_dir(SETTINGS_DIR) {
            Some(reloaded) => {
                bevy::log::info!("settings changed, reloading");
                *settings = reloaded;
            }
            None => bevy::log::warn!("settings changed but nothing parsed, keeping current values"),
        }
        *flag = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hopper-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }

    #[test]
    fn missing_dir_loads_nothing() {
        assert!(load_settings_from_dir("no/such/settings/dir").is_none());
    }

    #[test]
    fn reload_after_bad_edit_keeps_last_good_values() {
        let dir = scratch_dir("reload");
        let file = dir.join("settings.ron");
        let path = dir.to_str().expect("utf8 temp path");

        fs::write(&file, "(movement: (jump_force: 9.5))").expect("write settings");
        let mut current = load_settings_from_dir(path).expect("valid file parses");
        assert_eq!(current.movement.jump_force, 9.5);

        // A half-saved edit: reload parses nothing, so the resource keeps the
        // previously loaded values instead of snapping back to defaults.
        fs::write(&file, "(movement: (jump_force:").expect("write settings");
        if let Some(reloaded) = load_settings_from_dir(path) {
            current = reloaded;
        }
        assert_eq!(current.movement.jump_force, 9.5);

        fs::write(&file, "(movement: (jump_force: 3.0))").expect("write settings");
        if let Some(reloaded) = load_settings_from_dir(path) {
            current = reloaded;
        }
        assert_eq!(current.movement.jump_force, 3.0);

        let _ = fs::remove_dir_all(&dir);
    }
}
