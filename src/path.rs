//! Sinusoidal descent paths for enemies.
//!
//! A path is sampled once at spawn time into `n + 1` waypoints where
//! `n = max(1, floor(100 · frequency))`:
//!
//! ```text
//! x_i = x0 + A · sin(i · π / 50)
//! y_i = y0 − (H + 2h) · i / n
//! ```
//!
//! The total vertical drop `H + 2h` carries the enemy from above the top edge
//! to fully below the bottom edge whatever its amplitude.  Consumers traverse
//! the waypoints at constant speed over the path's duration.

use crate::constants::{WAVE_PHASE_STEP, WAVE_SAMPLES_PER_FREQUENCY};
use bevy::prelude::*;

/// Inputs of a single descent path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub start: Vec2,
    pub amplitude: f32,
    pub frequency: f32,
    /// Seconds taken to traverse the whole path.
    pub duration: f32,
    /// Viewport height `H`.
    pub screen_height: f32,
    /// Height `h` of the entity following the path.
    pub entity_height: f32,
}

impl WaveParams {
    /// Total vertical distance covered: `H + 2h`.
    pub fn travel(&self) -> f32 {
        self.screen_height + 2.0 * self.entity_height
    }
}

/// Number of path segments for a frequency.  Never zero.
pub fn sample_count(frequency: f32) -> usize {
    let n = (frequency * WAVE_SAMPLES_PER_FREQUENCY).floor();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        1
    }
}

/// Precomputed waypoint sequence.  Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePath {
    waypoints: Vec<Vec2>,
    /// Arc length from the first waypoint to waypoint `i`.
    cumulative: Vec<f32>,
    duration: f32,
}

impl WavePath {
    pub fn generate(params: &WaveParams) -> Self {
        let n = sample_count(params.frequency);
        let travel = params.travel();
        let waypoints: Vec<Vec2> = (0..=n)
            .map(|i| {
                let x = params.start.x + params.amplitude * (i as f32 * WAVE_PHASE_STEP).sin();
                let y = params.start.y - travel * (i as f32 / n as f32);
                Vec2::new(x, y)
            })
            .collect();

        let mut cumulative = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in waypoints.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Self {
            waypoints,
            cumulative,
            duration: params.duration,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Number of segments `n` (one less than the waypoint count).
    pub fn segments(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    pub fn end(&self) -> Vec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Total polyline length.
    pub fn length(&self) -> f32 {
        self.cumulative[self.cumulative.len() - 1]
    }

    pub fn is_complete(&self, elapsed: f32) -> bool {
        elapsed >= self.duration
    }

    /// Position after `elapsed` seconds of constant-speed traversal.
    pub fn position_at(&self, elapsed: f32) -> Vec2 {
        let length = self.length();
        if self.duration <= 0.0 || length <= 0.0 {
            return self.end();
        }
        let progress = (elapsed / self.duration).clamp(0.0, 1.0);
        let target = progress * length;

        // First waypoint whose arc length reaches the target.
        let idx = self.cumulative.partition_point(|&d| d < target);
        if idx == 0 {
            return self.start();
        }
        if idx >= self.waypoints.len() {
            return self.end();
        }
        let seg_start = self.cumulative[idx - 1];
        let seg_len = self.cumulative[idx] - seg_start;
        if seg_len <= f32::EPSILON {
            return self.waypoints[idx];
        }
        let t = (target - seg_start) / seg_len;
        self.waypoints[idx - 1].lerp(self.waypoints[idx], t)
    }
}
