//! Enemy spawn scheduling.
//!
//! A session draws its spawn interval once (uniform in
//! `[spawn_interval_min, spawn_interval_max]`) and then spawns one enemy every
//! interval until the session ends.  Each enemy gets a fresh random kind,
//! size, column and wave path, and removes itself when its path runs out.
//!
//! All randomness comes from the [`SpawnRng`] resource so tests can seed it.

use crate::collision::{contact_sensor, Category};
use crate::config::GameConfig;
use crate::constants::SPAWN_INTERVAL_MIN;
use crate::motion::MotionProgram;
use crate::path::{WaveParams, WavePath};
use crate::phase::GamePhase;
use crate::scene::BodySize;
use crate::ship::Ship;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shortest interval the scheduler will run with, whatever it is given.
const MIN_INTERVAL_SECS: f32 = 0.05;

/// The two enemy designs; picked with a fair coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Dart,
    Saucer,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Container every enemy is spawned under.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct EnemyLayer;

/// Random source for spawning.
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

impl Default for SpawnRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl SpawnRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Per-session spawn clock.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EnemySpawner {
    interval_secs: f32,
    timer_secs: f32,
    total_spawned: u64,
}

impl Default for EnemySpawner {
    fn default() -> Self {
        Self::with_interval(SPAWN_INTERVAL_MIN)
    }
}

impl EnemySpawner {
    /// First spawn happens one full interval after creation.
    pub fn with_interval(interval_secs: f32) -> Self {
        let interval_secs = if interval_secs.is_finite() {
            interval_secs.max(MIN_INTERVAL_SECS)
        } else {
            MIN_INTERVAL_SECS
        };
        Self {
            interval_secs,
            timer_secs: interval_secs,
            total_spawned: 0,
        }
    }

    /// Draw the session interval from the configured range.
    pub fn roll(rng: &mut impl Rng, config: &GameConfig) -> Self {
        Self::with_interval(uniform(
            rng,
            config.spawn_interval_min,
            config.spawn_interval_max,
        ))
    }

    pub fn interval_secs(&self) -> f32 {
        self.interval_secs
    }

    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Advance the clock; returns how many spawns fell due.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.timer_secs -= dt;
        let mut due = 0;
        while self.timer_secs <= 0.0 {
            due += 1;
            self.timer_secs += self.interval_secs;
        }
        due
    }
}

/// Uniform draw in `[min, max]`; collapses to `min` for an empty range.
pub fn uniform(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// Everything random about one enemy, drawn before it is spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBlueprint {
    pub kind: EnemyKind,
    pub size: Vec2,
    pub position: Vec2,
    pub wave: WaveParams,
}

pub fn roll_enemy_blueprint(
    rng: &mut impl Rng,
    config: &GameConfig,
    ship_size: Vec2,
) -> EnemyBlueprint {
    let kind = if rng.gen_bool(0.5) {
        EnemyKind::Dart
    } else {
        EnemyKind::Saucer
    };
    let size = ship_size * uniform(rng, config.enemy_scale_min, config.enemy_scale_max);

    let half_width = config.viewport_width / 2.0;
    let position = Vec2::new(
        uniform(rng, -half_width, half_width),
        config.viewport_height / 2.0 + config.spawn_height_offset,
    );

    let wave = WaveParams {
        start: position,
        amplitude: uniform(rng, config.wave_amplitude_min, config.wave_amplitude_max),
        frequency: uniform(rng, config.wave_frequency_min, config.wave_frequency_max),
        duration: uniform(rng, config.wave_duration_min, config.wave_duration_max),
        screen_height: config.viewport_height,
        entity_height: size.y,
    };

    EnemyBlueprint {
        kind,
        size,
        position,
        wave,
    }
}

/// Spawn an enemy under `layer`, already following its wave path.
pub fn spawn_enemy(commands: &mut Commands, layer: Entity, blueprint: &EnemyBlueprint) -> Entity {
    let path = WavePath::generate(&blueprint.wave);
    commands
        .spawn((
            Enemy {
                kind: blueprint.kind,
            },
            BodySize(blueprint.size),
            Transform::from_translation(blueprint.position.extend(1.0)),
            Visibility::default(),
            MotionProgram::follow(path),
            RigidBody::KinematicPositionBased,
            Collider::ball(blueprint.size.x / 2.0),
            contact_sensor(Category::enemy()),
            ChildOf(layer),
        ))
        .id()
}

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnRng>()
            .init_resource::<EnemySpawner>()
            .add_systems(OnEnter(GamePhase::Playing), reset_spawner_system)
            .add_systems(
                Update,
                enemy_spawn_system.run_if(in_state(GamePhase::Playing)),
            );
    }
}

/// Start the session with a freshly drawn interval.
pub fn reset_spawner_system(
    mut spawner: ResMut<EnemySpawner>,
    mut rng: ResMut<SpawnRng>,
    config: Res<GameConfig>,
) {
    *spawner = EnemySpawner::roll(&mut rng.0, &config);
    info!(
        "Enemy spawn interval {:.2}s this session",
        spawner.interval_secs()
    );
}

/// Spawn enemies as the session clock falls due.
///
/// Without a ship or an enemy layer in the scene the spawn is skipped.
pub fn enemy_spawn_system(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<EnemySpawner>,
    mut rng: ResMut<SpawnRng>,
    config: Res<GameConfig>,
    q_layer: Query<Entity, With<EnemyLayer>>,
    q_ship: Query<&BodySize, With<Ship>>,
) {
    let due = spawner.tick(time.delta_secs());
    if due == 0 {
        return;
    }
    let Ok(layer) = q_layer.single() else {
        return;
    };
    let Ok(ship_size) = q_ship.single() else {
        return;
    };

    for _ in 0..due {
        let blueprint = roll_enemy_blueprint(&mut rng.0, &config, ship_size.0);
        let enemy = spawn_enemy(&mut commands, layer, &blueprint);
        spawner.total_spawned += 1;
        debug!(
            "Spawned {:?} {:?} at {:?} (A={:.0}, f={:.2}, d={:.1})",
            blueprint.kind,
            enemy,
            blueprint.position,
            blueprint.wave.amplitude,
            blueprint.wave.frequency,
            blueprint.wave.duration
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_interval_is_drawn_within_range() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let spawner = EnemySpawner::roll(&mut rng, &cfg);
            assert!((2.0..=4.0).contains(&spawner.interval_secs()));
        }
    }

    #[test]
    fn interval_is_reused_for_every_tick() {
        let mut spawner = EnemySpawner::with_interval(2.5);
        assert_eq!(spawner.tick(2.0), 0);
        assert_eq!(spawner.tick(0.5), 1);
        assert_eq!(spawner.tick(2.25), 0);
        assert_eq!(spawner.tick(0.25), 1);
        assert_eq!(spawner.interval_secs(), 2.5);
    }

    #[test]
    fn long_frame_releases_every_due_spawn() {
        let mut spawner = EnemySpawner::with_interval(1.0);
        assert_eq!(spawner.tick(3.0), 3);
    }

    #[test]
    fn degenerate_interval_is_clamped() {
        assert_eq!(
            EnemySpawner::with_interval(0.0).interval_secs(),
            MIN_INTERVAL_SECS
        );
        assert_eq!(
            EnemySpawner::with_interval(f32::NAN).interval_secs(),
            MIN_INTERVAL_SECS
        );
    }

    #[test]
    fn blueprint_respects_configured_ranges() {
        let cfg = GameConfig::default();
        let ship = Vec2::new(64.0, 64.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let bp = roll_enemy_blueprint(&mut rng, &cfg, ship);
            assert!(bp.size.x >= 32.0 - 1e-3 && bp.size.x <= 51.2 + 1e-3);
            assert_eq!(bp.size.x, bp.size.y);
            assert!(bp.position.x.abs() <= cfg.viewport_width / 2.0);
            assert_eq!(bp.position.y, cfg.viewport_height / 2.0 + 50.0);
            assert_eq!(bp.wave.start, bp.position);
            assert!((75.0..=125.0).contains(&bp.wave.amplitude));
            assert!((2.0..=3.0).contains(&bp.wave.frequency));
            assert!((3.0..=6.0).contains(&bp.wave.duration));
            assert_eq!(bp.wave.entity_height, bp.size.y);
            assert_eq!(bp.wave.screen_height, cfg.viewport_height);
        }
    }

    #[test]
    fn both_kinds_are_drawn() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let darts = (0..400)
            .filter(|_| roll_enemy_blueprint(&mut rng, &cfg, Vec2::splat(64.0)).kind == EnemyKind::Dart)
            .count();
        assert!(darts > 120 && darts < 280, "darts = {darts}");
    }

    #[test]
    fn collapsed_range_returns_lower_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uniform(&mut rng, 3.0, 3.0), 3.0);
        assert_eq!(uniform(&mut rng, 4.0, 2.0), 4.0);
    }
}
