//! Game-specific error types.
//!
//! Runtime systems never fail: a missing scene anchor is a silent no-op and a
//! degenerate random draw is clamped.  The only fallible path is loading and
//! validating [`GameConfig`](crate::config::GameConfig), which reports through
//! [`GameError`] and falls back to compiled defaults.

use std::fmt;

/// Top-level error enum for space_battle.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The configuration file exists but could not be read.
    ConfigRead {
        path: String,
        reason: String,
    },

    /// The configuration file is not valid TOML or has a mistyped key.
    ConfigParse {
        path: String,
        reason: String,
    },

    /// A `[min, max]` pair is inverted or has a non-finite bound.
    InvalidRange {
        /// Name of the range (for logging).
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// A size, duration or speed that must be strictly positive is not.
    NonPositive {
        /// Name of the value (for logging).
        name: &'static str,
        value: f32,
    },

    /// A value is below the smallest amount the game allows for it.
    BelowMinimum {
        /// Name of the value (for logging).
        name: &'static str,
        value: f32,
        min: f32,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, reason } => {
                write!(f, "failed to read {}: {}", path, reason)
            }
            GameError::ConfigParse { path, reason } => {
                write!(f, "failed to parse {}: {}", path, reason)
            }
            GameError::InvalidRange { name, min, max } => write!(
                f,
                "range '{}' is invalid: min {} must be finite and not exceed max {}",
                name, min, max
            ),
            GameError::NonPositive { name, value } => {
                write!(f, "'{}' must be greater than zero (got {})", name, value)
            }
            GameError::BelowMinimum { name, value, min } => {
                write!(f, "'{}' must be at least {} (got {})", name, min, value)
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `min <= max` and both bounds are finite.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> GameResult<()> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(GameError::InvalidRange { name, min, max })
    }
}

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::NonPositive { name, value })
    }
}

/// Returns an error unless `value` is finite and at least `min`.
pub fn validate_at_least(name: &'static str, value: f32, min: f32) -> GameResult<()> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(GameError::BelowMinimum { name, value, min })
    }
}
