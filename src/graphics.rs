use crate::config::GameConfig;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // World origin at the centre of the viewport, one world unit per pixel.
    commands.spawn(Camera2d);
    info!("Camera spawned");
}

/// Resize the primary window to the configured viewport.
///
/// The window is created before `GameConfig` is loaded, so a `game.toml`
/// that changes the viewport is applied here.
pub fn fit_window_to_viewport(
    mut q_window: Query<&mut Window, With<PrimaryWindow>>,
    config: Res<GameConfig>,
) {
    let Ok(mut window) = q_window.single_mut() else {
        return;
    };
    window
        .resolution
        .set(config.viewport_width, config.viewport_height);
}
