//! Keyboard input → [`ShipIntent`] / [`FireLaser`].
//!
//! | Key                 | Effect              |
//! |---------------------|---------------------|
//! | Arrows / WASD       | move the ship       |
//! | Space               | fire one laser      |
//!
//! Kept out of [`crate::ship::ShipPlugin`] so headless tests can run the ship
//! without `ButtonInput`.

use crate::phase::GamePhase;
use crate::ship::{apply_ship_intent_system, FireLaser, ShipIntent};
use bevy::prelude::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            keyboard_to_intent_system
                .before(apply_ship_intent_system)
                .run_if(in_state(GamePhase::Playing)),
        );
    }
}

pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<ShipIntent>,
    mut fire: MessageWriter<FireLaser>,
) {
    let mut axis = Vec2::ZERO;
    if keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
        axis.x += 1.0;
    }
    if keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]) {
        axis.y += 1.0;
    }
    intent.axis = axis.normalize_or_zero();

    if keys.just_pressed(KeyCode::Space) {
        fire.write(FireLaser);
    }
}
