use avian3d::prelude::*;
use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use hopper::character::{
    carry_riders, character_movement, classify_contacts, cursor_grab, sample_controls,
};
use hopper::debug::DebugDumpPlugin;
use hopper::platform::platform_motion;
use hopper::settings::loader as settings_loader;
use hopper::ui::{
    setup_debug_overlay, spawn_debug_overlay, spawn_help_text, toggle_debug_overlay,
    update_debug_overlay,
};

mod app;
use app::display::sync_vsync_settings;
use app::{camera_follow, setup};

fn main() {
    let settings = settings_loader::load_settings_from_dir(settings_loader::SETTINGS_DIR)
        .unwrap_or_default();
    let settings_watcher = settings_loader::setup_settings_watcher(settings_loader::SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "hopper".to_string(),
            position: WindowPosition::Centered(MonitorSelection::Primary),
            present_mode: if settings.graphics.vsync {
                PresentMode::Fifo
            } else {
                PresentMode::AutoNoVsync
            },
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins(FrameTimeDiagnosticsPlugin)
    .add_plugins(LogDiagnosticsPlugin::default())
    .add_plugins(DebugDumpPlugin);

    if settings.graphics.physics_debug {
        app.add_plugins(PhysicsDebugPlugin::default());
    }

    app.insert_resource(settings.clone());
    app.insert_resource(settings_watcher);

    app.add_systems(
        Startup,
        (setup_debug_overlay, spawn_debug_overlay, spawn_help_text, setup),
    );

    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, sync_vsync_settings);
    app.add_systems(Update, (cursor_grab, sample_controls));
    app.add_systems(Update, (toggle_debug_overlay, update_debug_overlay));

    // One pipeline per physics tick: move platforms, classify the previous
    // step's contacts, steer the body, then carry riders along.
    app.add_systems(
        FixedUpdate,
        (platform_motion, classify_contacts, character_movement, carry_riders).chain(),
    );

    // After the physics transforms have synced, so the camera tracks the
    // rendered character position.
    app.add_systems(PostUpdate, camera_follow.after(PhysicsSet::Sync));

    app.run();
}
