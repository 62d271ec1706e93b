//! Display-related systems: syncing the vsync setting to the primary
//! window's present mode so it can be toggled from the settings file at
//! runtime.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use hopper::settings::Settings;

/// Sync `Settings.graphics.vsync` into the primary window's present mode.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut last: Local<Option<bool>>,
) {
    let desired = settings.graphics.vsync;
    if *last == Some(desired) {
        return;
    }

    for mut w in windows.iter_mut() {
        w.present_mode = if desired {
            PresentMode::Fifo
        } else {
            PresentMode::AutoNoVsync
        };
    }
    *last = Some(desired);
}
