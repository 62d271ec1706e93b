use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bevy::math::{Quat, Vec2, Vec3};
use hopper::character::controls::{Controls, CTRL_FORWARD, CTRL_JUMP, CTRL_RIGHT};
use hopper::character::movement::movement_step;
use hopper::character::Character;
use hopper::platform::oscillation_offset;
use hopper::settings::{ControlsSettings, MovementSettings};

/// Small look deltas, as produced by ordinary mouse movement.
fn bench_look_small(c: &mut Criterion) {
    let settings = ControlsSettings::default();
    let max_pitch = 80.0f32.to_radians();
    c.bench_function("look_small", |b| {
        b.iter(|| {
            let mut controls = Controls::default();
            for i in 0..1_000usize {
                let dx = ((i * 13) % 17) as f32 * 0.1;
                let dy = ((i * 7) % 23) as f32 * 0.2 - 5.0;
                controls.apply_look(black_box(Vec2::new(dx, dy)), &settings, max_pitch);
            }
            black_box((controls.yaw, controls.pitch));
        })
    });
}

/// Randomized look deltas (deterministic LCG) to approximate variable input.
fn bench_look_random(c: &mut Criterion) {
    let settings = ControlsSettings::default();
    let max_pitch = 80.0f32.to_radians();
    c.bench_function("look_random", |b| {
        b.iter(|| {
            let mut controls = Controls::default();
            let mut state: u32 = 0x12345678;
            for _ in 0..1_000usize {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let dx = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 200.0 - 100.0;
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let dy = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 200.0 - 100.0;
                controls.apply_look(black_box(Vec2::new(dx, dy)), &settings, max_pitch);
            }
            black_box((controls.yaw, controls.pitch));
        })
    });
}

/// A thousand controller ticks of running and jumping.
fn bench_movement_step(c: &mut Criterion) {
    let tuning = MovementSettings::default();
    let dt = 1.0 / 60.0;
    c.bench_function("movement_step", |b| {
        b.iter(|| {
            let mut character = Character::default();
            let mut controls = Controls::default();
            controls.set(CTRL_FORWARD | CTRL_RIGHT, true);
            let mut velocity = Vec3::ZERO;
            for i in 0..1_000usize {
                // Re-ground periodically and tap jump so both branches run.
                character.on_ground = i % 4 != 3;
                controls.set(CTRL_JUMP, i % 7 == 0);
                let impulse = movement_step(
                    &mut character,
                    &controls,
                    Quat::IDENTITY,
                    black_box(velocity),
                    dt,
                    &tuning,
                );
                velocity += impulse;
            }
            black_box(velocity);
        })
    });
}

/// Evaluating a full course of platform offsets for one tick.
fn bench_platform_offsets(c: &mut Criterion) {
    c.bench_function("platform_offsets", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for tick in 0..100u32 {
                let t = tick as f32 * (1.0 / 60.0);
                for id in 0..60u32 {
                    acc += oscillation_offset(id, black_box(t), 3.0, 1.0);
                }
            }
            black_box(acc);
        })
    });
}

criterion_group!(
    benches,
    bench_look_small,
    bench_look_random,
    bench_movement_step,
    bench_platform_offsets
);
criterion_main!(benches);
