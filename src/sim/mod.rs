//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Stable stone order (creation order)
//! - No rendering or platform dependencies
//! - Variable `dt` per tick, supplied by the host; hosts wanting identical
//!   physics across machines step it with a fixed-timestep accumulator

pub mod collision;
pub mod curve;
pub mod state;
pub mod tick;

pub use collision::{check_collisions, resolve_collision, stones_colliding};
pub use curve::QuadraticBezier;
pub use state::{Broom, GameState, Stone, Team, TrajectoryMode};
pub use tick::{LaunchCommand, TickInput, tick};
