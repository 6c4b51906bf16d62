use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use space_battle::background::BackgroundPlugin;
use space_battle::config::{GameConfig, CONFIG_PATH};
use space_battle::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use space_battle::contact::ContactPlugin;
use space_battle::controls::ControlsPlugin;
use space_battle::graphics;
use space_battle::menu::MenuPlugin;
use space_battle::motion::MotionPlugin;
use space_battle::phase::PhasePlugin;
use space_battle::rendering::RenderingPlugin;
use space_battle::scene::ScenePlugin;
use space_battle::ship::ShipPlugin;
use space_battle::spawner::EnemyPlugin;

/// Configure Rapier physics: no gravity, contacts are sensor-only.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Space Battle".into(),
            resolution: WindowResolution::new(VIEWPORT_WIDTH as u32, VIEWPORT_HEIGHT as u32),
            resizable: false,
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK));

    // Loaded after DefaultPlugins so the log subscriber is up, and before the
    // first update so the initial OnEnter(Playing) sees the final values.
    app.insert_resource(GameConfig::load_or_default(CONFIG_PATH))
        // pixels_per_meter(1.0) keeps world units equal to pixels.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins((
            PhasePlugin,
            ScenePlugin,
            EnemyPlugin,
            MotionPlugin,
            ShipPlugin,
            ContactPlugin,
            BackgroundPlugin,
        ))
        .add_plugins((ControlsPlugin, MenuPlugin, RenderingPlugin))
        .add_systems(
            Startup,
            (
                graphics::setup_camera,
                graphics::fit_window_to_viewport,
                setup_physics_config,
            ),
        );

    app.run();
}
