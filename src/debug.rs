//! Debug dump: a keypress (F3 by default) writes a snapshot of diagnostics,
//! entity/asset counts, process memory, and the full character and platform
//! state to a timestamped text file under `./debug-dumps/`.
//!
//! Useful for capturing "why did the ride drop me" moments without attaching
//! a debugger.
use crate::character::Character;
use crate::platform::Platform;
use crate::settings::Settings;
use avian3d::prelude::LinearVelocity;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};
use sysinfo::{Pid, PidExt, ProcessExt, System, SystemExt};

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_dump_system);
    }
}

fn bytes_to_mb(bytes: u64) -> String {
    format!("{:.2} MB", (bytes as f64) / 1_048_576.0)
}

/// Write the debug snapshot when the mapped dump key is pressed.
#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
fn debug_dump_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    diagnostics: Res<DiagnosticsStore>,
    query_entities: Query<Entity>,
    meshes: Res<Assets<Mesh>>,
    materials: Res<Assets<StandardMaterial>>,
    characters: Query<(&Transform, &LinearVelocity, &Character)>,
    platforms: Query<(&Transform, &Platform)>,
) {
    if !keys.just_pressed(settings.key("dump_debug", KeyCode::F3)) {
        return;
    }

    let now = SystemTime::now();
    let ts_secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let dt: DateTime<Utc> = DateTime::from(now);
    let human_ts = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    let dir = "debug-dumps";
    let fname = format!("{dir}/debug-{ts_secs}.txt");

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let entity_count = query_entities.iter().count();

    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let mut sys = System::new_all();
    sys.refresh_all();
    let pid = std::process::id();
    let proc = sys.process(Pid::from_u32(pid));
    let proc_mem_bytes = proc.map(|p| p.memory()).unwrap_or(0);
    let proc_virt_bytes = proc.map(|p| p.virtual_memory()).unwrap_or(0);

    let mut out = String::new();
    writeln!(out, "Debug dump: {ts_secs}").ok();
    writeln!(out, "Timestamp: {human_ts} (epoch secs: {ts_secs})").ok();
    writeln!(out, "FPS: {fps:.1}, frame_time: {frame_time:.4} ms").ok();
    writeln!(out, "Entities: {entity_count}").ok();
    writeln!(out, "Assets: meshes={} materials={}", meshes.len(), materials.len()).ok();
    writeln!(out, "CPU cores (available): {cores}").ok();
    writeln!(
        out,
        "Process memory: {} (virtual {})",
        bytes_to_mb(proc_mem_bytes),
        bytes_to_mb(proc_virt_bytes)
    )
    .ok();

    writeln!(out, "\nCharacters:").ok();
    for (transform, velocity, character) in &characters {
        let p = transform.translation;
        let v = velocity.0;
        writeln!(
            out,
            "  pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2}) on_ground={} ok_to_jump={} in_air={:.3}s riding={:?}",
            p.x, p.y, p.z, v.x, v.y, v.z,
            character.on_ground, character.ok_to_jump, character.in_air_timer, character.riding,
        )
        .ok();
    }

    writeln!(out, "\nPlatforms:").ok();
    for (transform, platform) in &platforms {
        let p = transform.translation;
        writeln!(
            out,
            "  id={} pos=({:.2}, {:.2}, {:.2}) origin_x={:.2} elapsed={:.2}s",
            platform.id, p.x, p.y, p.z, platform.origin.x, platform.elapsed,
        )
        .ok();
    }

    if let Err(e) = fs::create_dir_all(dir) {
        error!("debug dump: failed to create dir '{dir}': {e}");
        return;
    }
    if let Err(e) = fs::write(&fname, out) {
        error!("debug dump: failed to write {fname}: {e}");
    } else {
        info!("wrote debug dump: {fname}");
    }
}
