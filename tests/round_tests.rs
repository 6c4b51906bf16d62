//! Headless round tests: scene, spawner, ship, contacts and phase together.
//!
//! Rapier is not installed; contacts are injected as `CollisionEvent`s the way
//! the physics step would report them.  Frames are a fixed 250 ms.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use space_battle::background::{BackgroundPlugin, BackgroundTile};
use space_battle::config::GameConfig;
use space_battle::contact::{ContactPlugin, ShipDestroyed};
use space_battle::motion::MotionPlugin;
use space_battle::phase::{GamePhase, PhasePlugin, SessionEpoch, StartRequested};
use space_battle::scene::{BodySize, ScenePlugin};
use space_battle::ship::{FireLaser, Laser, Ship, ShipIntent, ShipPlugin};
use space_battle::spawner::{
    roll_enemy_blueprint, spawn_enemy, Enemy, EnemyLayer, EnemyPlugin, EnemySpawner, SpawnRng,
};
use std::time::Duration;

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Resource, Default)]
struct SignalCount(usize);

fn count_signals(mut signals: MessageReader<ShipDestroyed>, mut count: ResMut<SignalCount>) {
    count.0 += signals.read().count();
}

fn round_test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)));
    app.insert_resource(GameConfig::default());
    app.insert_resource(SpawnRng::seeded(7));
    app.add_message::<CollisionEvent>();
    app.init_resource::<SignalCount>();
    app.add_plugins((
        PhasePlugin,
        ScenePlugin,
        EnemyPlugin,
        MotionPlugin,
        ShipPlugin,
        ContactPlugin,
        BackgroundPlugin,
    ));
    app.add_systems(Last, count_signals);
    app.update();
    app
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn phase(app: &App) -> GamePhase {
    *app.world().resource::<State<GamePhase>>().get()
}

fn count<T: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<Entity, With<T>>().iter(world).count()
}

fn single<T: Component>(app: &mut App) -> Entity {
    let world = app.world_mut();
    world
        .query_filtered::<Entity, With<T>>()
        .single(world)
        .expect("exactly one entity")
}

/// Spawn one enemy under the scene's enemy layer.
fn spawn_test_enemy(app: &mut App) -> Entity {
    let layer = single::<EnemyLayer>(app);
    let config = app.world().resource::<GameConfig>().clone();
    let blueprint = {
        let mut rng = app.world_mut().resource_mut::<SpawnRng>();
        roll_enemy_blueprint(&mut rng.0, &config, config.ship_size())
    };
    let world = app.world_mut();
    let enemy = {
        let mut commands = world.commands();
        spawn_enemy(&mut commands, layer, &blueprint)
    };
    world.flush();
    enemy
}

fn contact(app: &mut App, a: Entity, b: Entity) {
    app.world_mut()
        .write_message(CollisionEvent::Started(a, b, CollisionEventFlags::SENSOR));
}

// ── Scene ─────────────────────────────────────────────────────────────────────

#[test]
fn first_frame_builds_the_scene() {
    let mut app = round_test_app();
    assert_eq!(phase(&app), GamePhase::Playing);
    assert_eq!(count::<Ship>(&mut app), 1);
    assert_eq!(count::<EnemyLayer>(&mut app), 1);
    assert_eq!(count::<Enemy>(&mut app), 0);
    assert_eq!(count::<BackgroundTile>(&mut app), 6);

    let ship = single::<Ship>(&mut app);
    let pos = app.world().get::<Transform>(ship).map(|t| t.translation.truncate());
    assert_eq!(pos, Some(Vec2::new(0.0, -380.0)));
}

#[test]
fn ship_stays_inside_bounds() {
    let mut app = round_test_app();
    app.insert_resource(ShipIntent {
        axis: Vec2::new(1.0, 1.0),
    });
    run(&mut app, 20);

    let ship = single::<Ship>(&mut app);
    let pos = app.world().get::<Transform>(ship).map(|t| t.translation.truncate());
    assert_eq!(pos, Some(Vec2::new(206.0, 135.0)));
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn enemies_spawn_on_the_session_interval() {
    let mut app = round_test_app();
    app.insert_resource(EnemySpawner::with_interval(1.0));

    run(&mut app, 3);
    assert_eq!(count::<Enemy>(&mut app), 0, "spawned before the interval");

    run(&mut app, 2);
    assert_eq!(count::<Enemy>(&mut app), 1);

    let layer = single::<EnemyLayer>(&mut app);
    let enemy = single::<Enemy>(&mut app);
    assert_eq!(app.world().get::<ChildOf>(enemy).map(|c| c.parent()), Some(layer));
    assert!(app.world().get::<BodySize>(enemy).is_some());
}

#[test]
fn enemy_leaves_after_its_path() {
    let mut app = round_test_app();
    let enemy = spawn_test_enemy(&mut app);
    // Longest wave duration is 6 s.
    run(&mut app, 26);
    assert!(app.world().get_entity(enemy).is_err());
}

#[test]
fn nothing_spawns_without_an_enemy_layer() {
    let mut app = round_test_app();
    let layer = single::<EnemyLayer>(&mut app);
    app.world_mut().despawn(layer);
    app.insert_resource(EnemySpawner::with_interval(0.5));

    run(&mut app, 10);
    assert_eq!(count::<Enemy>(&mut app), 0);
}

// ── Lasers and contacts ───────────────────────────────────────────────────────

#[test]
fn fire_spawns_a_laser_that_leaves_the_screen() {
    let mut app = round_test_app();
    app.world_mut().write_message(FireLaser);
    app.update();
    assert_eq!(count::<Laser>(&mut app), 1);

    // 2 s flight.
    run(&mut app, 9);
    assert_eq!(count::<Laser>(&mut app), 0);
}

#[test]
fn laser_hit_removes_both_and_round_continues() {
    let mut app = round_test_app();
    app.world_mut().write_message(FireLaser);
    app.update();
    let laser = single::<Laser>(&mut app);
    let enemy = spawn_test_enemy(&mut app);

    contact(&mut app, laser, enemy);
    run(&mut app, 12);

    assert!(app.world().get_entity(laser).is_err());
    assert!(app.world().get_entity(enemy).is_err());
    assert_eq!(app.world().resource::<SignalCount>().0, 0);
    assert_eq!(phase(&app), GamePhase::Playing);
}

#[test]
fn ship_hit_ends_round_after_delay() {
    let mut app = round_test_app();
    let ship = single::<Ship>(&mut app);
    let enemy = spawn_test_enemy(&mut app);

    contact(&mut app, ship, enemy);
    app.update();
    assert!(app.world().get_entity(ship).is_err());
    assert!(app.world().get_entity(enemy).is_err());
    assert_eq!(app.world().resource::<SignalCount>().0, 1);

    // 1.75 s after the contact frame.
    run(&mut app, 7);
    assert_eq!(phase(&app), GamePhase::Playing);

    run(&mut app, 2);
    assert_eq!(phase(&app), GamePhase::Menu);
    assert_eq!(app.world().resource::<SignalCount>().0, 1);
}

#[test]
fn scene_is_frozen_under_the_menu() {
    let mut app = round_test_app();
    app.insert_resource(EnemySpawner::with_interval(0.5));
    run(&mut app, 2);
    let ship = single::<Ship>(&mut app);
    let enemy = spawn_test_enemy(&mut app);
    contact(&mut app, ship, enemy);
    run(&mut app, 10);
    assert_eq!(phase(&app), GamePhase::Menu);

    let enemies = count::<Enemy>(&mut app);
    run(&mut app, 20);
    assert_eq!(count::<Enemy>(&mut app), enemies);
}

#[test]
fn restart_rebuilds_a_fresh_scene() {
    let mut app = round_test_app();
    app.world_mut().write_message(FireLaser);
    app.update();
    spawn_test_enemy(&mut app);
    let ship = single::<Ship>(&mut app);
    let enemy = spawn_test_enemy(&mut app);
    contact(&mut app, ship, enemy);
    run(&mut app, 10);
    assert_eq!(phase(&app), GamePhase::Menu);

    app.world_mut().write_message(StartRequested);
    run(&mut app, 2);

    assert_eq!(phase(&app), GamePhase::Playing);
    assert_eq!(app.world().resource::<SessionEpoch>().current(), 2);
    assert_eq!(count::<Ship>(&mut app), 1);
    assert_eq!(count::<EnemyLayer>(&mut app), 1);
    assert_eq!(count::<Enemy>(&mut app), 0);
    assert_eq!(count::<Laser>(&mut app), 0);
    assert_eq!(count::<BackgroundTile>(&mut app), 6);

    let spawner = app.world().resource::<EnemySpawner>();
    assert_eq!(spawner.total_spawned(), 0);
    assert!((2.0..=4.0).contains(&spawner.interval_secs()));
}
