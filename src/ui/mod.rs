//! On-screen debug overlay and help text.
//!
//! The overlay shows FPS, the character's position, velocity and contact
//! flags, and the platform count. It refreshes on a timer rather than every
//! frame and toggles with the mapped `toggle_debug` key (F1 by default).

use crate::character::Character;
use crate::platform::Platform;
use crate::settings::Settings;
use avian3d::prelude::LinearVelocity;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Component)]
pub struct DebugOverlayText;

/// Insert the overlay resources.
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(
        0.25,
        TimerMode::Repeating,
    )));
    commands.insert_resource(DebugOverlayState::default());
}

/// Toggle the debug overlay with the mapped key.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.key("toggle_debug", KeyCode::F1)) {
        state.visible = !state.visible;
    }
}

/// Spawn the (initially empty) overlay text node in the top-left corner.
pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle {
                    font_size: 18.0,
                    color: Color::srgb(1.0, 1.0, 0.0),
                    ..default()
                },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ..default()
        },
        DebugOverlayText,
    ));
}

/// Spawn the static help line at the bottom of the screen.
pub fn spawn_help_text(mut commands: Commands) {
    commands.spawn(TextBundle {
        text: Text::from_section(
            "Click to capture the mouse. WASD to move, Space to jump, Esc to release. F1 overlay, F3 dump.",
            TextStyle {
                font_size: 16.0,
                color: Color::srgb(0.9, 0.9, 0.9),
                ..default()
            },
        ),
        style: Style {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            bottom: Val::Px(10.0),
            ..default()
        },
        ..default()
    });
}

/// System parameters for the overlay update, grouped for a readable signature.
#[derive(bevy::ecs::system::SystemParam)]
pub struct DebugOverlayCtx<'w, 's> {
    pub diagnostics: Res<'w, DiagnosticsStore>,
    pub state: Res<'w, DebugOverlayState>,
    pub time: Res<'w, Time>,
    pub timer: ResMut<'w, DebugOverlayTimer>,
    pub query: Query<'w, 's, &'static mut Text, With<DebugOverlayText>>,
    pub character_query: Query<
        'w,
        's,
        (&'static Transform, &'static LinearVelocity, &'static Character),
    >,
    pub platform_query: Query<'w, 's, (), With<Platform>>,
}

/// Refresh the overlay text once per timer interval.
pub fn update_debug_overlay(mut ctx: DebugOverlayCtx<'_, '_>) {
    if !ctx.timer.0.tick(ctx.time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = ctx.query.get_single_mut() else {
        return;
    };

    if !ctx.state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = ctx
        .diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = ctx
        .diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let platform_count = ctx.platform_query.iter().count();

    let character_lines = if let Ok((transform, velocity, character)) =
        ctx.character_query.get_single()
    {
        let pos = transform.translation;
        let compass = compass_from_forward(transform.forward().into());
        let riding = match character.riding {
            Some(riding) => format!("riding {:?}", riding.platform),
            None => "-".to_string(),
        };
        format!(
            "Pos: ({:.1}, {:.1}, {:.1})\nVel: ({:.1}, {:.1}, {:.1})\nGround: {} (air {:.2}s) | Platform: {}\nFacing: {compass}",
            pos.x, pos.y, pos.z,
            velocity.0.x, velocity.0.y, velocity.0.z,
            character.on_ground, character.in_air_timer, riding,
        )
    } else {
        "Character: N/A".to_string()
    };

    text.sections[0].value = format!(
        "FPS: {:.1}\nFrame Time: {:.2} ms\nPlatforms: {}\n{}",
        fps,
        frame_time,
        platform_count,
        character_lines,
    );
}

/// Compass label for a forward vector on the XZ plane.
fn compass_from_forward(forward: Vec3) -> &'static str {
    let angle = forward.x.atan2(forward.z).to_degrees();
    if (-22.5..22.5).contains(&angle) {
        "S"
    } else if (22.5..67.5).contains(&angle) {
        "SE"
    } else if (67.5..112.5).contains(&angle) {
        "E"
    } else if (112.5..157.5).contains(&angle) {
        "NE"
    } else if !(-157.5..157.5).contains(&angle) {
        "N"
    } else if (-157.5..-112.5).contains(&angle) {
        "NW"
    } else if (-112.5..-67.5).contains(&angle) {
        "W"
    } else {
        "SW"
    }
}
