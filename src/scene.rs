//! Play-scene lifecycle.
//!
//! Every entry into [`GamePhase::Playing`] tears down whatever the previous
//! session left behind (it stays frozen under the menu overlay) and builds a
//! fresh scene: ship recentred, an empty enemy layer, and the scrolling
//! background.  A session is never resumed.

use crate::background::spawn_background_layers;
use crate::config::GameConfig;
use crate::phase::{begin_session_system, GamePhase};
use crate::ship::spawn_ship;
use crate::spawner::EnemyLayer;
use bevy::prelude::*;

/// Tags every root entity that belongs to the play scene.
///
/// Enemies are children of the [`EnemyLayer`] and go with it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayScene;

/// Size of an entity's sprite / collider footprint.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodySize(pub Vec2);

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GamePhase::Playing),
            (cleanup_play_scene, setup_play_scene)
                .chain()
                .after(begin_session_system),
        );
    }
}

/// Despawn the previous session's scene, children included.
pub fn cleanup_play_scene(mut commands: Commands, query: Query<Entity, With<PlayScene>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn setup_play_scene(mut commands: Commands, config: Res<GameConfig>) {
    spawn_background_layers(&mut commands, &config);
    commands.spawn((
        EnemyLayer,
        PlayScene,
        Transform::default(),
        Visibility::default(),
    ));
    spawn_ship(&mut commands, &config);
}
