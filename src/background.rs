//! Parallax star-field background.
//!
//! Each layer is a pair of viewport-sized tiles stacked vertically.  Both
//! tiles scroll down at the layer's speed; a tile that has fully left the
//! bottom edge jumps back on top of its partner, so the pair always covers
//! the screen.

use crate::config::GameConfig;
use crate::phase::GamePhase;
use crate::scene::{BodySize, PlayScene};
use bevy::prelude::*;
use std::collections::HashMap;

/// One of the two tiles of a background layer.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BackgroundTile {
    pub layer: usize,
    pub speed: f32,
    pub height: f32,
}

pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            background_scroll_system.run_if(in_state(GamePhase::Playing)),
        );
    }
}

/// Spawn two tiles per configured scroll speed; slower layers sit further back.
pub fn spawn_background_layers(commands: &mut Commands, config: &GameConfig) {
    let size = Vec2::new(config.viewport_width, config.viewport_height);
    for (layer, &speed) in config.background_scroll_speeds.iter().enumerate() {
        let z = -10.0 + layer as f32 * 0.1;
        for slot in 0..2 {
            commands.spawn((
                BackgroundTile {
                    layer,
                    speed,
                    height: size.y,
                },
                PlayScene,
                BodySize(size),
                Transform::from_xyz(0.0, slot as f32 * size.y, z),
                Visibility::default(),
            ));
        }
    }
}

/// Scroll a tile pair down by `dy`, wrapping a tile that passed `-height`
/// to sit directly above the other one.
pub fn scroll_pair(a: f32, b: f32, height: f32, dy: f32) -> (f32, f32) {
    let mut a = a - dy;
    let mut b = b - dy;
    if a <= -height {
        a = b + height;
    }
    if b <= -height {
        b = a + height;
    }
    (a, b)
}

pub fn background_scroll_system(
    time: Res<Time>,
    mut q_tiles: Query<(&BackgroundTile, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let mut layers: HashMap<usize, Vec<(BackgroundTile, Mut<Transform>)>> = HashMap::new();
    for (tile, transform) in q_tiles.iter_mut() {
        layers.entry(tile.layer).or_default().push((*tile, transform));
    }

    for (layer, mut tiles) in layers {
        let count = tiles.len();
        let [(tile, a), (_, b)] = tiles.as_mut_slice() else {
            debug!("Background layer {layer} has {count} tiles, expected 2");
            continue;
        };
        let (ya, yb) = scroll_pair(
            a.translation.y,
            b.translation.y,
            tile.height,
            tile.speed * dt,
        );
        a.translation.y = ya;
        b.translation.y = yb;
    }
}
