//! Top-level `Playing` / `Menu` state machine.
//!
//! ## Transitions
//!
//! | From      | To        | Trigger                                             |
//! |-----------|-----------|-----------------------------------------------------|
//! | `Playing` | `Menu`    | [`ShipDestroyed`] followed by `game_over_delay_secs` |
//! | `Menu`    | `Playing` | [`StartRequested`]                                  |
//!
//! The delayed `Playing → Menu` transition cannot be cancelled once armed.  It
//! is stamped with the [`SessionEpoch`] it was armed in; if a new session has
//! started by the time it expires, it is discarded instead of bouncing the
//! fresh session back to the menu.
//!
//! ## Systems (registered by `PhasePlugin`)
//!
//! | System                            | Schedule            |
//! |-----------------------------------|---------------------|
//! | `begin_session_system`            | `OnEnter(Playing)`  |
//! | `schedule_menu_transition_system` | `Update / Playing`  |
//! | `tick_menu_transition_system`     | `Update`            |
//! | `start_game_system`               | `Update`            |

use crate::config::GameConfig;
use crate::contact::ShipDestroyed;
use bevy::prelude::*;

/// Top-level game phase.
///
/// Gameplay systems run under `.run_if(in_state(GamePhase::Playing))`, so the
/// play scene is frozen underneath the menu overlay.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// Active round; also the phase the app starts in.
    #[default]
    Playing,
    /// Menu overlay with a single start control.
    Menu,
}

/// Explicit user request to start a new round.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct StartRequested;

/// Generation counter bumped on every entry into `Playing`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionEpoch(u64);

impl SessionEpoch {
    pub fn current(&self) -> u64 {
        self.0
    }

    pub fn advance(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }
}

/// A `Playing → Menu` transition waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayedTransition {
    remaining_secs: f32,
    epoch: u64,
}

impl DelayedTransition {
    pub fn new(delay_secs: f32, epoch: u64) -> Self {
        Self {
            remaining_secs: delay_secs,
            epoch,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn remaining_secs(&self) -> f32 {
        self.remaining_secs
    }

    /// Count down by `dt`; returns `true` once the delay has fully elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining_secs -= dt;
        self.remaining_secs <= 0.0
    }
}

/// The armed menu transition, if any.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingMenuTransition(pub Option<DelayedTransition>);

pub struct PhasePlugin;

impl Plugin for PhasePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GamePhase>()
            .add_message::<ShipDestroyed>()
            .add_message::<StartRequested>()
            .init_resource::<SessionEpoch>()
            .init_resource::<PendingMenuTransition>()
            .add_systems(OnEnter(GamePhase::Playing), begin_session_system)
            .add_systems(OnEnter(GamePhase::Menu), announce_menu_system)
            .add_systems(
                Update,
                (
                    schedule_menu_transition_system.run_if(in_state(GamePhase::Playing)),
                    tick_menu_transition_system,
                    start_game_system,
                )
                    .chain(),
            );
    }
}

pub fn begin_session_system(mut epoch: ResMut<SessionEpoch>) {
    let current = epoch.advance();
    info!("Session {current} started");
}

fn announce_menu_system(epoch: Res<SessionEpoch>) {
    info!("Session {} over; menu shown", epoch.current());
}

/// Arm the delayed menu transition on the first [`ShipDestroyed`] of a session.
pub fn schedule_menu_transition_system(
    mut signals: MessageReader<ShipDestroyed>,
    mut pending: ResMut<PendingMenuTransition>,
    epoch: Res<SessionEpoch>,
    config: Res<GameConfig>,
) {
    if signals.read().count() == 0 {
        return;
    }
    let current = epoch.current();
    if pending.0.is_some_and(|t| t.epoch() == current) {
        return;
    }
    pending.0 = Some(DelayedTransition::new(config.game_over_delay_secs, current));
    info!(
        "Ship destroyed; menu in {:.1}s",
        config.game_over_delay_secs
    );
}

/// Count the armed transition down and apply it when it expires.
pub fn tick_menu_transition_system(
    time: Res<Time>,
    mut pending: ResMut<PendingMenuTransition>,
    epoch: Res<SessionEpoch>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    let Some(transition) = pending.0.as_mut() else {
        return;
    };
    if !transition.tick(time.delta_secs()) {
        return;
    }
    let expired = *transition;
    pending.0 = None;

    if expired.epoch() != epoch.current() {
        debug!(
            "Discarding menu transition from session {} (now {})",
            expired.epoch(),
            epoch.current()
        );
        return;
    }
    if *phase.get() == GamePhase::Playing {
        next_phase.set(GamePhase::Menu);
    }
}

/// `Menu → Playing` on an explicit start request; ignored in any other phase.
pub fn start_game_system(
    mut requests: MessageReader<StartRequested>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if *phase.get() == GamePhase::Menu {
        next_phase.set(GamePhase::Playing);
    }
}
