//! Scripted motion for enemies and projectiles.
//!
//! Every moving entity carries one [`MotionProgram`].  When the program runs
//! out the entity removes itself from the scene.  The ship has no program;
//! it is moved by [`crate::ship::apply_ship_intent_system`].

use crate::path::WavePath;
use crate::phase::GamePhase;
use bevy::prelude::*;

/// Result of advancing a program by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionStep {
    Moving(Vec2),
    Finished(Vec2),
}

#[derive(Component, Debug, Clone)]
pub enum MotionProgram {
    /// Follow a precomputed wave path over its duration.
    FollowPath { path: WavePath, elapsed: f32 },
    /// Straight line from `from` to `to` over `duration` seconds.
    Linear {
        from: Vec2,
        to: Vec2,
        duration: f32,
        elapsed: f32,
    },
}

impl MotionProgram {
    pub fn follow(path: WavePath) -> Self {
        MotionProgram::FollowPath { path, elapsed: 0.0 }
    }

    pub fn linear(from: Vec2, to: Vec2, duration: f32) -> Self {
        MotionProgram::Linear {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) -> MotionStep {
        match self {
            MotionProgram::FollowPath { path, elapsed } => {
                *elapsed += dt;
                let pos = path.position_at(*elapsed);
                if path.is_complete(*elapsed) {
                    MotionStep::Finished(pos)
                } else {
                    MotionStep::Moving(pos)
                }
            }
            MotionProgram::Linear {
                from,
                to,
                duration,
                elapsed,
            } => {
                *elapsed += dt;
                if *duration <= 0.0 || *elapsed >= *duration {
                    return MotionStep::Finished(*to);
                }
                MotionStep::Moving(from.lerp(*to, *elapsed / *duration))
            }
        }
    }
}

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            motion_system.run_if(in_state(GamePhase::Playing)),
        );
    }
}

/// Advance every motion program and despawn entities whose program finished.
pub fn motion_system(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut MotionProgram, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut program, mut transform) in query.iter_mut() {
        match program.advance(dt) {
            MotionStep::Moving(pos) => {
                transform.translation.x = pos.x;
                transform.translation.y = pos.y;
            }
            MotionStep::Finished(pos) => {
                transform.translation.x = pos.x;
                transform.translation.y = pos.y;
                commands.entity(entity).despawn();
            }
        }
    }
}
