//! Moving platforms: a per-instance time accumulator driving a bounded
//! one-dimensional oscillation along X.
//!
//! Platforms are repositioned directly each physics tick; their motion is
//! independent of any physics impulse. Riders pick up the resulting position
//! deltas through `character::carry_riders`.

use crate::settings::Settings;
use avian3d::prelude::*;
use bevy::prelude::*;

/// An oscillating platform instance.
#[derive(Component, Debug)]
pub struct Platform {
    /// Spawn index; selects the phase and sine/cosine variant.
    pub id: u32,
    /// Spawn position the oscillation is centered on.
    pub origin: Vec3,
    /// Accumulated time in seconds.
    pub elapsed: f32,
}

impl Platform {
    #[must_use]
    pub fn new(id: u32, origin: Vec3) -> Self {
        Self { id, origin, elapsed: 0.0 }
    }
}

/// X displacement from the origin for platform `id` at accumulated time `t`.
///
/// Each id gets its own phase so neighboring platforms don't move in lockstep;
/// even ids swing on a sine, odd ids on a cosine. The result stays within
/// `±amplitude` for all `t`.
#[must_use]
pub fn oscillation_offset(id: u32, t: f32, amplitude: f32, speed: f32) -> f32 {
    let phase = id as f32 * 0.5;
    let angle = speed * t + phase;
    if id % 2 == 0 {
        amplitude * angle.sin()
    } else {
        amplitude * angle.cos()
    }
}

/// Advance every platform's accumulator and reposition it, once per tick.
#[allow(clippy::needless_pass_by_value)]
pub fn platform_motion(
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<(&mut Position, &mut Platform)>,
) {
    let dt = time.delta_seconds();
    let amplitude = settings.world.platform_amplitude;
    let speed = settings.world.platform_speed;

    for (mut position, mut platform) in &mut query {
        platform.elapsed += dt;
        position.0.x = platform.origin.x
            + oscillation_offset(platform.id, platform.elapsed, amplitude, speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_bounded_by_amplitude() {
        for id in 0..8 {
            for step in 0..1000 {
                let t = step as f32 * 0.1;
                let offset = oscillation_offset(id, t, 3.0, 1.0);
                assert!(offset.abs() <= 3.0 + 1.0e-4, "id {id} t {t} offset {offset}");
            }
        }
    }

    #[test]
    fn parity_selects_sine_or_cosine() {
        // At t = 0 with zero phase, sine starts centered and cosine starts
        // at full deflection.
        assert!(oscillation_offset(0, 0.0, 3.0, 1.0).abs() < 1.0e-6);
        let odd = oscillation_offset(1, 0.0, 3.0, 1.0);
        assert!((odd - 3.0 * 0.5f32.cos()).abs() < 1.0e-5);
    }

    #[test]
    fn ids_get_distinct_phases() {
        let a = oscillation_offset(0, 1.0, 3.0, 1.0);
        let b = oscillation_offset(2, 1.0, 3.0, 1.0);
        assert!((a - b).abs() > 1.0e-3);
    }

    #[test]
    fn speed_scales_the_period() {
        // Half speed at double time lands on the same angle.
        let slow = oscillation_offset(0, 2.0, 3.0, 0.5);
        let fast = oscillation_offset(0, 1.0, 3.0, 1.0);
        assert!((slow - fast).abs() < 1.0e-5);
    }
}
