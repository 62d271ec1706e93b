//! Contact classification and platform riding.
//!
//! Ground state is re-derived every physics tick from the current contact
//! set, while platform attach/detach follows the collision start/end events.
//! Both run in `FixedUpdate` before `character_movement`, so the controller
//! always consumes flags produced by the previous physics step.

use crate::character::{Character, Riding};
use crate::platform::Platform;
use crate::settings::Settings;
use avian3d::prelude::*;
use bevy::prelude::*;

/// Minimum |normal.y| for a contact to count as standing on a platform top.
/// Stricter than the ground threshold so brushing a platform's side while
/// jumping past it doesn't start a ride.
const ATTACH_NORMAL_MIN: f32 = 0.99;

/// Friction the character body spawns with; restored when a ride ends.
pub const CHARACTER_FRICTION: f32 = 1.0;

/// A contact counts as ground when it lies below the character's center and
/// its normal is near-vertical.
#[must_use]
pub fn is_ground_contact(point_y: f32, center_y: f32, normal_y: f32, min_normal_y: f32) -> bool {
    point_y < center_y && normal_y.abs() > min_normal_y
}

/// A contact qualifies for riding when its normal is almost exactly vertical
/// and the character sits above the platform center.
#[must_use]
pub fn is_platform_top_contact(normal_y: f32, character_y: f32, platform_y: f32) -> bool {
    normal_y.abs() > ATTACH_NORMAL_MIN && character_y > platform_y
}

/// One tick of position-delta coupling: the rider picks up however far the
/// platform moved since the last tick, and the ride state remembers the new
/// platform position for the next one.
#[must_use]
pub fn ride_delta(riding: Riding, platform_pos: Vec3, character_pos: Vec3) -> (Vec3, Riding) {
    (
        character_pos + platform_pos - riding.last_platform_pos,
        Riding {
            platform: riding.platform,
            last_platform_pos: platform_pos,
        },
    )
}

fn stop_riding(commands: &mut Commands, entity: Entity, character: &mut Character) {
    character.riding = None;
    // Undo the slippery contact material applied while riding.
    commands.entity(entity).insert((
        Friction::new(CHARACTER_FRICTION),
        Restitution::new(0.0).with_combine_rule(CoefficientCombine::Min),
    ));
}

/// Classify the character's contacts for this tick.
///
/// Ground: any current contact below the center with a near-vertical normal
/// sets `on_ground`. Platform attach: a collision-start against a `Platform`
/// with a flat-top contact begins riding and zeroes the character's friction
/// and restitution so the platform slides underneath without dragging.
/// Platform detach: the collision-end for the ridden platform stops the ride.
#[allow(clippy::needless_pass_by_value)]
pub fn classify_contacts(
    mut commands: Commands,
    collisions: Res<Collisions>,
    mut started: EventReader<CollisionStarted>,
    mut ended: EventReader<CollisionEnded>,
    mut characters: Query<(Entity, &Position, &mut Character)>,
    platforms: Query<&Position, With<Platform>>,
    frames: Query<(&Position, &Rotation)>,
    settings: Res<Settings>,
) {
    let min_normal_y = settings.movement.ground_normal_min;

    for (entity, position, mut character) in &mut characters {
        'contacts: for contacts in collisions.collisions_with_entity(entity) {
            if !contacts.during_current_frame {
                continue;
            }
            // World-space contact data is expressed in entity1's frame.
            let Ok((pos1, rot1)) = frames.get(contacts.entity1) else {
                continue;
            };
            for manifold in &contacts.manifolds {
                for contact in &manifold.contacts {
                    let point = contact.global_point1(pos1, rot1);
                    let normal = contact.global_normal1(rot1);
                    if is_ground_contact(point.y, position.0.y, normal.y, min_normal_y) {
                        character.on_ground = true;
                        break 'contacts;
                    }
                }
            }
        }
    }

    for event in started.read() {
        let (char_entity, other) = if characters.contains(event.0) {
            (event.0, event.1)
        } else if characters.contains(event.1) {
            (event.1, event.0)
        } else {
            continue;
        };
        let Ok(platform_pos) = platforms.get(other) else {
            continue;
        };
        let Ok((_, position, mut character)) = characters.get_mut(char_entity) else {
            continue;
        };
        if character.riding.is_some() {
            continue;
        }
        let Some(contacts) = collisions.get(event.0, event.1) else {
            continue;
        };
        let Ok((_, rot1)) = frames.get(contacts.entity1) else {
            continue;
        };

        let on_top = contacts.manifolds.iter().any(|manifold| {
            manifold.contacts.iter().any(|contact| {
                let normal = contact.global_normal1(rot1);
                is_platform_top_contact(normal.y, position.0.y, platform_pos.0.y)
            })
        });
        if on_top {
            character.riding = Some(Riding {
                platform: other,
                last_platform_pos: platform_pos.0,
            });
            commands.entity(char_entity).insert((
                Friction::new(0.0).with_combine_rule(CoefficientCombine::Min),
                Restitution::new(0.0).with_combine_rule(CoefficientCombine::Min),
            ));
        }
    }

    for event in ended.read() {
        for (entity, other) in [(event.0, event.1), (event.1, event.0)] {
            if let Ok((entity, _, mut character)) = characters.get_mut(entity)
                && character.riding.is_some_and(|r| r.platform == other)
            {
                stop_riding(&mut commands, entity, &mut character);
            }
        }
    }
}

/// Copy the ridden platform's per-tick position delta onto each rider.
///
/// Runs after `character_movement`, so the character keeps its own
/// impulse-driven motion on top of the platform's. A vanished platform
/// entity ends the ride.
pub fn carry_riders(
    mut commands: Commands,
    mut characters: Query<(Entity, &mut Position, &mut Character), Without<Platform>>,
    platforms: Query<&Position, (With<Platform>, Without<Character>)>,
) {
    for (entity, mut position, mut character) in &mut characters {
        let Some(riding) = character.riding else {
            continue;
        };
        match platforms.get(riding.platform) {
            Ok(platform_pos) => {
                let (new_pos, next) = ride_delta(riding, platform_pos.0, position.0);
                position.0 = new_pos;
                character.riding = Some(next);
            }
            Err(_) => stop_riding(&mut commands, entity, &mut character),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_contact_below_center_is_ground() {
        assert!(is_ground_contact(0.0, 1.0, 1.0, 0.75));
        assert!(is_ground_contact(0.0, 1.0, -1.0, 0.75));
    }

    #[test]
    fn steep_normal_is_not_ground() {
        // A wall touch at foot height: below center but sideways normal.
        assert!(!is_ground_contact(0.5, 1.0, 0.1, 0.75));
        assert!(!is_ground_contact(0.5, 1.0, 0.75, 0.75));
    }

    #[test]
    fn contact_above_center_is_not_ground() {
        // Bumping a ceiling produces a vertical normal above the center.
        assert!(!is_ground_contact(2.5, 1.0, -1.0, 0.75));
    }

    #[test]
    fn slope_threshold_is_configurable() {
        assert!(is_ground_contact(0.0, 1.0, 0.8, 0.75));
        assert!(!is_ground_contact(0.0, 1.0, 0.8, 0.9));
    }

    #[test]
    fn riding_copies_platform_delta_and_remembers_position() {
        let platform = Entity::from_raw(7);
        let riding = Riding {
            platform,
            last_platform_pos: Vec3::new(1.0, 0.0, 8.0),
        };

        // Platform slid 2 units along X; the rider moves with it, own height
        // and depth untouched.
        let (pos, next) = ride_delta(riding, Vec3::new(3.0, 0.0, 8.0), Vec3::new(1.5, 2.0, 8.0));
        assert_eq!(pos, Vec3::new(3.5, 2.0, 8.0));
        assert_eq!(next.platform, platform);
        assert_eq!(next.last_platform_pos, Vec3::new(3.0, 0.0, 8.0));

        // Next tick the platform holds still: zero delta, rider stays put.
        let (pos, next) = ride_delta(next, Vec3::new(3.0, 0.0, 8.0), pos);
        assert_eq!(pos, Vec3::new(3.5, 2.0, 8.0));
        assert_eq!(next.last_platform_pos, Vec3::new(3.0, 0.0, 8.0));
    }

    #[test]
    fn riding_needs_flat_top_contact_from_above() {
        assert!(is_platform_top_contact(1.0, 1.5, 0.0));
        // Side hit: near-horizontal normal.
        assert!(!is_platform_top_contact(0.2, 1.5, 0.0));
        // Flat contact but the character is underneath the platform.
        assert!(!is_platform_top_contact(1.0, -1.5, 0.0));
    }

    #[test]
    fn vanished_platform_ends_ride_and_restores_friction() {
        let mut app = App::new();
        app.add_systems(Update, carry_riders);

        let platform_pos = Vec3::new(0.0, 0.0, 4.0);
        let platform = app
            .world_mut()
            .spawn((Platform::new(0, platform_pos), Position(platform_pos)))
            .id();
        let rider = app
            .world_mut()
            .spawn((
                Character {
                    riding: Some(Riding {
                        platform,
                        last_platform_pos: platform_pos,
                    }),
                    ..Character::default()
                },
                Position(Vec3::new(0.0, 2.0, 4.0)),
                Friction::new(0.0).with_combine_rule(CoefficientCombine::Min),
                Restitution::new(0.0).with_combine_rule(CoefficientCombine::Min),
            ))
            .id();

        app.world_mut().entity_mut(platform).despawn();
        app.update();

        let character = app.world().get::<Character>(rider).expect("rider alive");
        assert!(character.riding.is_none());
        let friction = app.world().get::<Friction>(rider).expect("friction present");
        assert_eq!(friction.dynamic_coefficient, CHARACTER_FRICTION);
    }
}
