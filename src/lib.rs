//! Space Battle: a vertical arcade shooter built on Bevy and Rapier.
//!
//! The ship holds the bottom of the screen while enemies weave down along
//! sine-wave paths.  Lasers destroy enemies; touching one ends the round and,
//! after a short delay, drops to the menu.
//!
//! Gameplay plugins are headless and run under `MinimalPlugins` in tests.
//! Input, menu UI and rendering live in their own plugins and are only added
//! by the binary.

pub mod background;
pub mod collision;
pub mod config;
pub mod constants;
pub mod contact;
pub mod controls;
pub mod error;
pub mod graphics;
pub mod menu;
pub mod motion;
pub mod path;
pub mod phase;
pub mod rendering;
pub mod scene;
pub mod ship;
pub mod spawner;
