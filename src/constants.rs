//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found and modified in one
//! place.  Each constant is mirrored by a field of
//! [`GameConfig`](crate::config::GameConfig), which can override it at
//! runtime from `assets/game.toml`.

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Width of the visible play area (world units).  The origin is the centre.
pub const VIEWPORT_WIDTH: f32 = 540.0;

/// Height of the visible play area (world units).
pub const VIEWPORT_HEIGHT: f32 = 960.0;

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Ship sprite width.  Enemy sizes are drawn as a fraction of this.
pub const SHIP_WIDTH: f32 = 64.0;

/// Ship sprite height.
pub const SHIP_HEIGHT: f32 = 64.0;

/// Ship movement speed while a direction key is held (units/s).
pub const SHIP_SPEED: f32 = 420.0;

/// Distance kept between the bottom edge of the viewport and the lowest
/// position the ship may reach.
pub const SHIP_BOTTOM_MARGIN: f32 = 100.0;

// ── Enemy spawning ────────────────────────────────────────────────────────────

/// Lower bound of the per-session spawn interval (seconds).
pub const SPAWN_INTERVAL_MIN: f32 = 2.0;

/// Upper bound of the per-session spawn interval (seconds).
///
/// The interval is drawn once when a session starts and then reused for every
/// spawn of that session.
pub const SPAWN_INTERVAL_MAX: f32 = 4.0;

/// Smallest enemy, as a fraction of the ship size.
pub const ENEMY_SCALE_MIN: f32 = 0.5;

/// Largest enemy, as a fraction of the ship size.
pub const ENEMY_SCALE_MAX: f32 = 0.8;

/// Enemies appear this far above the top edge of the viewport.
pub const SPAWN_HEIGHT_OFFSET: f32 = 50.0;

// ── Wave path ─────────────────────────────────────────────────────────────────

/// Horizontal swing of the descent path, lower bound.
pub const WAVE_AMPLITUDE_MIN: f32 = 75.0;

/// Horizontal swing of the descent path, upper bound.
pub const WAVE_AMPLITUDE_MAX: f32 = 125.0;

/// Path frequency lower bound.  Also scales the waypoint count.
pub const WAVE_FREQUENCY_MIN: f32 = 2.0;

/// Path frequency upper bound.
pub const WAVE_FREQUENCY_MAX: f32 = 3.0;

/// Largest frequency a config may ask for.  Caps a path at 2000 waypoints.
pub const WAVE_FREQUENCY_LIMIT: f32 = 20.0;

/// Shortest time an enemy takes to cross the screen (seconds).
pub const WAVE_DURATION_MIN: f32 = 3.0;

/// Longest time an enemy takes to cross the screen (seconds).
pub const WAVE_DURATION_MAX: f32 = 6.0;

/// Waypoints generated per unit of frequency.
pub const WAVE_SAMPLES_PER_FREQUENCY: f32 = 100.0;

/// Phase advance between consecutive waypoints (radians).  One full swing
/// spans 100 waypoints.
pub const WAVE_PHASE_STEP: f32 = std::f32::consts::PI / 50.0;

// ── Laser ─────────────────────────────────────────────────────────────────────

pub const LASER_WIDTH: f32 = 3.0;
pub const LASER_HEIGHT: f32 = 30.0;

/// Time a laser takes to travel from the ship to its off-screen target.
pub const LASER_FLIGHT_SECS: f32 = 2.0;

// ── Round flow ────────────────────────────────────────────────────────────────

/// Delay between the ship being destroyed and the menu appearing.
pub const GAME_OVER_DELAY_SECS: f32 = 2.0;

// ── Background ────────────────────────────────────────────────────────────────

/// Scroll speed of each parallax layer, back to front (units/s).
pub const BACKGROUND_SCROLL_SPEEDS: [f32; 3] = [20.0, 45.0, 90.0];
