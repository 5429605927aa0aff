//! Roaring Game - an interactive 3D curling simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stone physics, collisions, turn loop)
//! - `settings`: Data-driven launch parameters
//!
//! Rendering, mesh construction, and the tweak UI live in the host; the crate
//! exposes a per-frame `sim::tick` the host calls with the elapsed time.

pub mod settings;
pub mod sim;

pub use settings::{LaunchKind, LaunchSettings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep for headless hosts and tests (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Sheet dimensions
    pub const SHEET_WIDTH: f32 = 40.0;
    pub const SHEET_LENGTH: f32 = 80.0;

    /// Radius of the house (the circular scoring zone)
    pub const HOUSE_RADIUS: f32 = 35.0 / 2.0 / 2.0;
    /// The sheet sits offset from the launch origin and carries the house at
    /// 35% of its length, which puts the house center here on the launch axis.
    pub const HOUSE_CENTER_DIST: f32 = SHEET_LENGTH / 2.5 + SHEET_LENGTH * 0.35;
    /// Center of the house in world space
    pub const HOUSE_CENTER: Vec3 = Vec3::new(HOUSE_CENTER_DIST, 0.0, 0.0);

    /// Stone defaults
    pub const STONE_RADIUS: f32 = 2.0;
    /// Friction coefficients (arbitrary units, not a physical model)
    pub const NORMAL_FRICTION: f32 = 1.0;
    pub const BROOM_FRICTION: f32 = 0.2;

    /// The broom hovers this far ahead of its stone while sweeping
    pub const STONE_BROOM_DIST: f32 = 4.0;

    /// Empirical restitution-like coefficient for stone-on-stone impacts
    pub const RESTITUTION: f32 = 0.85;

    /// Below this squared speed a stone counts as at rest
    pub const REST_EPSILON: f32 = 1e-3;
    /// Below this squared speed the travel direction falls back to +X
    pub const FORWARD_EPSILON: f32 = 1e-5;
}

/// Rotate a vector about the vertical (Y) axis
#[inline]
pub fn rotate_about_y(v: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}

/// Heading angle about the vertical axis for a direction in the sheet plane
#[inline]
pub fn heading_about_y(dir: Vec3) -> f32 {
    (-dir.z).atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_about_y_quarter_turns() {
        let v = rotate_about_y(Vec3::X, -FRAC_PI_2);
        assert!((v - Vec3::Z).length() < 1e-6);

        let v = rotate_about_y(Vec3::X, FRAC_PI_2);
        assert!((v - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_heading_about_y() {
        assert!(heading_about_y(Vec3::X).abs() < 1e-6);
        assert!((heading_about_y(Vec3::NEG_Z) - FRAC_PI_2).abs() < 1e-6);
        assert!((heading_about_y(Vec3::Z) + FRAC_PI_2).abs() < 1e-6);
    }
}
