//! Player ship and its laser.
//!
//! ## Pipeline (runs in order every `Update` frame while `Playing`)
//!
//! 1. `keyboard_to_intent_system` (in [`crate::controls`]) fills [`ShipIntent`]
//!    and writes [`FireLaser`].
//! 2. [`apply_ship_intent_system`] moves the ship and clamps it to [`ShipBounds`].
//! 3. [`fire_laser_system`] spawns one laser per [`FireLaser`] at the ship.
//!
//! Tests drive the ship by writing `ShipIntent` / `FireLaser` directly, with no
//! input plugin installed.

use crate::collision::{contact_sensor, Category};
use crate::config::GameConfig;
use crate::motion::MotionProgram;
use crate::phase::GamePhase;
use crate::scene::{BodySize, PlayScene};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Marker for the player ship.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Ship;

/// Marker for a laser bolt.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Laser;

/// Discrete fire action.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct FireLaser;

/// Desired ship movement for this frame.  `axis` is clamped to unit length.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipIntent {
    pub axis: Vec2,
}

/// Rectangle the ship's centre is confined to.
///
/// Horizontally the ship keeps one ship-width from either edge; vertically it
/// ranges from `ship_bottom_margin` above the bottom edge up to a quarter of
/// the viewport width above the centre line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl ShipBounds {
    pub fn from_config(config: &GameConfig) -> Self {
        let x_limit = (config.viewport_width / 2.0 - config.ship_width).max(0.0);
        let min_y = -config.viewport_height / 2.0 + config.ship_bottom_margin;
        let max_y = (config.viewport_width / 4.0).max(min_y);
        Self {
            min: Vec2::new(-x_limit, min_y),
            max: Vec2::new(x_limit, max_y),
        }
    }

    pub fn clamp(&self, position: Vec2) -> Vec2 {
        position.clamp(self.min, self.max)
    }

    /// Where the ship starts each session: centred, at the lowest allowed row.
    pub fn home(&self) -> Vec2 {
        Vec2::new(0.0, self.min.y)
    }
}

pub struct ShipPlugin;

impl Plugin for ShipPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShipIntent>()
            .add_message::<FireLaser>()
            .add_systems(OnEnter(GamePhase::Playing), clear_ship_intent_system)
            .add_systems(
                Update,
                (apply_ship_intent_system, fire_laser_system)
                    .chain()
                    .run_if(in_state(GamePhase::Playing)),
            );
    }
}

pub fn spawn_ship(commands: &mut Commands, config: &GameConfig) -> Entity {
    let size = config.ship_size();
    let home = ShipBounds::from_config(config).home();
    commands
        .spawn((
            Ship,
            PlayScene,
            BodySize(size),
            Transform::from_translation(home.extend(2.0)),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            Collider::ball(size.x / 2.0),
            contact_sensor(Category::ship()),
        ))
        .id()
}

/// Laser from `origin` straight up until it clears the top edge.
pub fn spawn_laser(commands: &mut Commands, origin: Vec2, config: &GameConfig) -> Entity {
    let size = Vec2::new(config.laser_width, config.laser_height);
    let target = Vec2::new(origin.x, config.viewport_height + config.laser_height);
    commands
        .spawn((
            Laser,
            PlayScene,
            BodySize(size),
            Transform::from_translation(origin.extend(4.0)),
            Visibility::default(),
            MotionProgram::linear(origin, target, config.laser_flight_secs),
            RigidBody::KinematicPositionBased,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            contact_sensor(Category::projectile()),
        ))
        .id()
}

fn clear_ship_intent_system(mut intent: ResMut<ShipIntent>) {
    *intent = ShipIntent::default();
}

/// Move the ship by `intent.axis * ship_speed * dt`, clamped to [`ShipBounds`].
pub fn apply_ship_intent_system(
    mut q: Query<&mut Transform, With<Ship>>,
    intent: Res<ShipIntent>,
    time: Res<Time>,
    config: Res<GameConfig>,
) {
    let Ok(mut transform) = q.single_mut() else {
        return;
    };
    let step = intent.axis.clamp_length_max(1.0) * config.ship_speed * time.delta_secs();
    let next = ShipBounds::from_config(&config).clamp(transform.translation.truncate() + step);
    transform.translation.x = next.x;
    transform.translation.y = next.y;
}

/// Spawn one laser at the ship for every [`FireLaser`] this frame.
///
/// Requests with no ship in the scene are dropped.
pub fn fire_laser_system(
    mut commands: Commands,
    mut requests: MessageReader<FireLaser>,
    q_ship: Query<&Transform, With<Ship>>,
    config: Res<GameConfig>,
) {
    let shots = requests.read().count();
    if shots == 0 {
        return;
    }
    let Ok(ship) = q_ship.single() else {
        return;
    };
    let origin = ship.translation.truncate();
    for _ in 0..shots {
        spawn_laser(&mut commands, origin, &config);
    }
}
