//! Contact resolution: turns Rapier `CollisionEvent`s into removals and the
//! round-ending [`ShipDestroyed`] signal.
//!
//! | Pair                     | Effect                                  |
//! |--------------------------|-----------------------------------------|
//! | {Projectile, Enemy}      | remove both                             |
//! | {Ship, Enemy}            | remove both, emit [`ShipDestroyed`]     |
//! | anything else            | nothing                                 |
//!
//! The resolver is stateless between frames.  Within a frame every contact is
//! resolved, but an entity caught in two contacts during the same step is
//! only removed once.

use crate::collision::{Category, CollisionCategory};
use crate::phase::GamePhase;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

/// Termination signal: the ship touched an enemy.  Zero payload; any number of
/// readers may observe it.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ShipDestroyed;

/// What a contact between two categories does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Ignore,
    DestroyBoth,
    DestroyBothAndEndRound,
}

/// Classify an unordered category pair.
pub fn classify(a: CollisionCategory, b: CollisionCategory) -> ContactOutcome {
    use CollisionCategory::*;
    match (a, b) {
        (Projectile, Enemy) | (Enemy, Projectile) => ContactOutcome::DestroyBoth,
        (Ship, Enemy) | (Enemy, Ship) => ContactOutcome::DestroyBothAndEndRound,
        _ => ContactOutcome::Ignore,
    }
}

pub struct ContactPlugin;

impl Plugin for ContactPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            resolve_contacts_system.run_if(in_state(GamePhase::Playing)),
        );
    }
}

/// Apply the contact policy to every `CollisionEvent::Started` of this frame.
///
/// Ignores `Stopped`.  An entity without a [`Category`] (despawned in an
/// earlier frame, or never a participant) makes the whole contact a no-op.
pub fn resolve_contacts_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_category: Query<&Category>,
    mut signal: MessageWriter<ShipDestroyed>,
) {
    let mut removed: HashSet<Entity> = HashSet::new();
    let mut round_ended = false;

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        // Despawns are deferred, so an entity removed earlier this frame
        // still has its `Category` here.
        let (Ok(c1), Ok(c2)) = (q_category.get(e1), q_category.get(e2)) else {
            continue;
        };

        let outcome = classify(c1.get(), c2.get());
        debug!("Contact {:?} x {:?} -> {:?}", c1.get(), c2.get(), outcome);
        match outcome {
            ContactOutcome::Ignore => continue,
            ContactOutcome::DestroyBoth => {}
            ContactOutcome::DestroyBothAndEndRound => round_ended = true,
        }

        for entity in [e1, e2] {
            if removed.insert(entity) {
                commands.entity(entity).try_despawn();
            }
        }
    }

    if round_ended {
        signal.write(ShipDestroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    #[derive(Resource, Default)]
    struct SignalCount(usize);

    fn count_signals(mut signals: MessageReader<ShipDestroyed>, mut count: ResMut<SignalCount>) {
        count.0 += signals.read().count();
    }

    fn contact_test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<GamePhase>();
        app.add_message::<CollisionEvent>();
        app.add_message::<ShipDestroyed>();
        app.init_resource::<SignalCount>();
        app.add_plugins(ContactPlugin);
        app.add_systems(Last, count_signals);
        app.update();
        app
    }

    fn started(a: Entity, b: Entity) -> CollisionEvent {
        CollisionEvent::Started(a, b, CollisionEventFlags::SENSOR)
    }

    #[test]
    fn classify_is_symmetric() {
        for a in CollisionCategory::ALL {
            for b in CollisionCategory::ALL {
                assert_eq!(classify(a, b), classify(b, a), "{a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn only_two_pairs_have_effects() {
        use CollisionCategory::*;
        assert_eq!(classify(Projectile, Enemy), ContactOutcome::DestroyBoth);
        assert_eq!(classify(Enemy, Ship), ContactOutcome::DestroyBothAndEndRound);
        for (a, b) in [
            (Projectile, Ship),
            (Projectile, Projectile),
            (Enemy, Enemy),
            (Ship, Ship),
            (None, Enemy),
            (None, Ship),
            (None, None),
        ] {
            assert_eq!(classify(a, b), ContactOutcome::Ignore, "{a:?} / {b:?}");
        }
    }

    #[test]
    fn laser_hit_removes_both_without_signal() {
        let mut app = contact_test_app();
        let laser = app.world_mut().spawn(Category::projectile()).id();
        let enemy = app.world_mut().spawn(Category::enemy()).id();

        app.world_mut().write_message(started(laser, enemy));
        app.update();

        assert!(app.world().get_entity(laser).is_err());
        assert!(app.world().get_entity(enemy).is_err());
        assert_eq!(app.world().resource::<SignalCount>().0, 0);
    }

    #[test]
    fn ignored_pair_leaves_both_entities() {
        let mut app = contact_test_app();
        let laser = app.world_mut().spawn(Category::projectile()).id();
        let ship = app.world_mut().spawn(Category::ship()).id();
        let other_enemy = app.world_mut().spawn(Category::enemy()).id();
        let enemy = app.world_mut().spawn(Category::enemy()).id();

        app.world_mut().write_message(started(laser, ship));
        app.world_mut().write_message(started(enemy, other_enemy));
        app.update();

        for e in [laser, ship, enemy, other_enemy] {
            assert!(app.world().get_entity(e).is_ok());
        }
        assert_eq!(app.world().resource::<SignalCount>().0, 0);
    }

    #[test]
    fn ship_hit_removes_both_and_signals_once() {
        let mut app = contact_test_app();
        let ship = app.world_mut().spawn(Category::ship()).id();
        let enemy = app.world_mut().spawn(Category::enemy()).id();

        app.world_mut().write_message(started(enemy, ship));
        // Duplicate report of the same contact in the same step.
        app.world_mut().write_message(started(ship, enemy));
        app.update();
        app.update();

        assert!(app.world().get_entity(ship).is_err());
        assert!(app.world().get_entity(enemy).is_err());
        assert_eq!(app.world().resource::<SignalCount>().0, 1);
    }

    #[test]
    fn laser_and_ship_hitting_same_enemy_still_ends_round() {
        let mut app = contact_test_app();
        let laser = app.world_mut().spawn(Category::projectile()).id();
        let ship = app.world_mut().spawn(Category::ship()).id();
        let enemy = app.world_mut().spawn(Category::enemy()).id();

        app.world_mut().write_message(started(laser, enemy));
        app.world_mut().write_message(started(ship, enemy));
        app.update();

        for e in [laser, ship, enemy] {
            assert!(app.world().get_entity(e).is_err(), "{e:?} survived");
        }
        assert_eq!(app.world().resource::<SignalCount>().0, 1);
    }

    #[test]
    fn ship_contact_before_laser_contact_ends_round_once() {
        let mut app = contact_test_app();
        let laser = app.world_mut().spawn(Category::projectile()).id();
        let ship = app.world_mut().spawn(Category::ship()).id();
        let enemy = app.world_mut().spawn(Category::enemy()).id();

        app.world_mut().write_message(started(enemy, ship));
        app.world_mut().write_message(started(enemy, laser));
        app.update();
        app.update();

        for e in [laser, ship, enemy] {
            assert!(app.world().get_entity(e).is_err(), "{e:?} survived");
        }
        assert_eq!(app.world().resource::<SignalCount>().0, 1);
    }

    #[test]
    fn contact_with_already_removed_entity_is_a_no_op() {
        let mut app = contact_test_app();
        let laser = app.world_mut().spawn(Category::projectile()).id();
        let enemy = app.world_mut().spawn(Category::enemy()).id();

        app.world_mut().write_message(started(laser, enemy));
        app.update();

        let second_laser = app.world_mut().spawn(Category::projectile()).id();
        app.world_mut().write_message(started(second_laser, enemy));
        app.update();

        assert!(app.world().get_entity(second_laser).is_ok());
    }

    #[test]
    fn stopped_events_are_ignored() {
        let mut app = contact_test_app();
        let laser = app.world_mut().spawn(Category::projectile()).id();
        let enemy = app.world_mut().spawn(Category::enemy()).id();

        app.world_mut()
            .write_message(CollisionEvent::Stopped(laser, enemy, CollisionEventFlags::SENSOR));
        app.update();

        assert!(app.world().get_entity(laser).is_ok());
        assert!(app.world().get_entity(enemy).is_ok());
    }
}
