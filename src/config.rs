//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  Missing keys fall back to the compile-time defaults,
//! so a minimal TOML can override just the values you care about:
//!
//! ```toml
//! spawn_interval_min = 1.0
//! spawn_interval_max = 1.5
//! background_scroll_speeds = [10.0, 30.0]
//! ```
//!
//! The binary calls [`GameConfig::load_or_default`] before the first update:
//! the initial `Playing` phase is entered ahead of the `Startup` schedule, so
//! the first session must already see the final values.

use crate::constants::*;
use crate::error::{
    validate_at_least, validate_positive, validate_range, GameError, GameResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Viewport ─────────────────────────────────────────────────────────────
    pub viewport_width: f32,
    pub viewport_height: f32,

    // ── Ship ──────────────────────────────────────────────────────────────────
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_speed: f32,
    pub ship_bottom_margin: f32,

    // ── Enemy spawning ────────────────────────────────────────────────────────
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    pub enemy_scale_min: f32,
    pub enemy_scale_max: f32,
    pub spawn_height_offset: f32,

    // ── Wave path ─────────────────────────────────────────────────────────────
    pub wave_amplitude_min: f32,
    pub wave_amplitude_max: f32,
    pub wave_frequency_min: f32,
    pub wave_frequency_max: f32,
    pub wave_duration_min: f32,
    pub wave_duration_max: f32,

    // ── Laser ─────────────────────────────────────────────────────────────────
    pub laser_width: f32,
    pub laser_height: f32,
    pub laser_flight_secs: f32,

    // ── Round flow ────────────────────────────────────────────────────────────
    pub game_over_delay_secs: f32,

    // ── Background ────────────────────────────────────────────────────────────
    pub background_scroll_speeds: Vec<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_speed: SHIP_SPEED,
            ship_bottom_margin: SHIP_BOTTOM_MARGIN,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            enemy_scale_min: ENEMY_SCALE_MIN,
            enemy_scale_max: ENEMY_SCALE_MAX,
            spawn_height_offset: SPAWN_HEIGHT_OFFSET,
            wave_amplitude_min: WAVE_AMPLITUDE_MIN,
            wave_amplitude_max: WAVE_AMPLITUDE_MAX,
            wave_frequency_min: WAVE_FREQUENCY_MIN,
            wave_frequency_max: WAVE_FREQUENCY_MAX,
            wave_duration_min: WAVE_DURATION_MIN,
            wave_duration_max: WAVE_DURATION_MAX,
            laser_width: LASER_WIDTH,
            laser_height: LASER_HEIGHT,
            laser_flight_secs: LASER_FLIGHT_SECS,
            game_over_delay_secs: GAME_OVER_DELAY_SECS,
            background_scroll_speeds: BACKGROUND_SCROLL_SPEEDS.to_vec(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.  `origin` names the source in errors.
    pub fn from_toml_str(contents: &str, origin: &str) -> GameResult<Self> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|e| GameError::ConfigParse {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every range and strictly-positive value.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("viewport_width", self.viewport_width)?;
        validate_positive("viewport_height", self.viewport_height)?;
        validate_positive("ship_width", self.ship_width)?;
        validate_positive("ship_height", self.ship_height)?;
        validate_positive("ship_speed", self.ship_speed)?;
        validate_positive("spawn_interval_min", self.spawn_interval_min)?;
        validate_range(
            "spawn_interval",
            self.spawn_interval_min,
            self.spawn_interval_max,
        )?;
        validate_positive("enemy_scale_min", self.enemy_scale_min)?;
        validate_range("enemy_scale", self.enemy_scale_min, self.enemy_scale_max)?;
        validate_range(
            "wave_amplitude",
            self.wave_amplitude_min,
            self.wave_amplitude_max,
        )?;
        validate_positive("wave_frequency_min", self.wave_frequency_min)?;
        validate_range(
            "wave_frequency",
            self.wave_frequency_min,
            self.wave_frequency_max,
        )?;
        if self.wave_frequency_max > WAVE_FREQUENCY_LIMIT {
            return Err(GameError::InvalidRange {
                name: "wave_frequency",
                min: self.wave_frequency_min,
                max: self.wave_frequency_max,
            });
        }
        validate_positive("wave_duration_min", self.wave_duration_min)?;
        validate_range(
            "wave_duration",
            self.wave_duration_min,
            self.wave_duration_max,
        )?;
        validate_positive("laser_width", self.laser_width)?;
        validate_positive("laser_height", self.laser_height)?;
        validate_positive("laser_flight_secs", self.laser_flight_secs)?;
        // The round always lasts at least the compiled delay after a ship loss.
        validate_at_least(
            "game_over_delay_secs",
            self.game_over_delay_secs,
            GAME_OVER_DELAY_SECS,
        )?;
        for speed in &self.background_scroll_speeds {
            validate_positive("background_scroll_speeds", *speed)?;
        }
        Ok(())
    }

    /// Read `path`, falling back to defaults when the file is absent or bad.
    ///
    /// A missing file is not an error.  Read, parse and validation errors are
    /// logged and the compiled defaults are used instead.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(Some(config)) => {
                info!("Loaded game config from {path}");
                config
            }
            Ok(None) => {
                info!("No {path} found; using compiled defaults");
                Self::default()
            }
            Err(e) => {
                warn!("{e}; using compiled defaults");
                Self::default()
            }
        }
    }

    fn load(path: &str) -> GameResult<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GameError::ConfigRead {
                    path: path.to_string(),
                    reason: e.to_string(),
                })
            }
        };
        Self::from_toml_str(&contents, path).map(Some)
    }

    /// Size of the ship sprite.
    pub fn ship_size(&self) -> Vec2 {
        Vec2::new(self.ship_width, self.ship_height)
    }
}
