//! Launch parameters
//!
//! The tweak UI lives in the host; the parameter model, its valid ranges, and
//! the conversion into launch commands live here. Defaults match the launch
//! panel's initial values.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::rotate_about_y;
use crate::sim::{LaunchCommand, QuadraticBezier};

/// Which kind of throw the player has dialed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LaunchKind {
    #[default]
    Curved,
    Straight,
}

impl LaunchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchKind::Curved => "Curved",
            LaunchKind::Straight => "Straight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "curved" | "curve" => Some(LaunchKind::Curved),
            "straight" | "linear" => Some(LaunchKind::Straight),
            _ => None,
        }
    }
}

/// Launch parameters, clamped to the ranges the tweak UI exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSettings {
    pub kind: LaunchKind,

    // === Curved throw ===
    /// Initial velocity; also places the curve's control point
    pub velocity: Vec3,
    /// How far the path reaches: the endpoint sits at `1/curvature` of the
    /// way from the origin to the house center
    pub curvature: f32,

    // === Straight throw ===
    /// Aim in [-1, 1], as a fraction of a quarter turn off the launch axis
    pub direction: f32,
    /// Scalar speed
    pub straight_speed: f32,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            kind: LaunchKind::Curved,
            velocity: Vec3::new(30.0, 0.0, 0.0),
            curvature: 1.0,
            direction: 0.0,
            straight_speed: 50.0,
        }
    }
}

impl LaunchSettings {
    /// Clamp every field to its UI range
    pub fn clamp(&mut self) {
        self.velocity.x = self.velocity.x.clamp(0.0, 30.0);
        self.velocity.y = 0.0;
        self.velocity.z = self.velocity.z.clamp(-30.0, 30.0);
        self.curvature = self.curvature.clamp(0.01, 2.0);
        self.direction = self.direction.clamp(-1.0, 1.0);
        self.straight_speed = self.straight_speed.clamp(1.0, 100.0);
    }

    /// Path of a curved throw from `origin` toward the house
    pub fn curve(&self, origin: Vec3, house_center: Vec3) -> QuadraticBezier {
        let control = origin + self.velocity;
        let end = origin.lerp(house_center, 1.0 / self.curvature);
        QuadraticBezier::new(origin, control, end)
    }

    /// Velocity vector of a straight throw
    pub fn straight_velocity(&self) -> Vec3 {
        rotate_about_y(Vec3::X, -self.direction * std::f32::consts::FRAC_PI_2)
            * self.straight_speed
    }

    /// Build the launch command for the current parameters
    pub fn to_command(&self, origin: Vec3, house_center: Vec3) -> LaunchCommand {
        match self.kind {
            LaunchKind::Curved => LaunchCommand::Curved {
                velocity: self.velocity,
                curve: self.curve(origin, house_center),
            },
            LaunchKind::Straight => LaunchCommand::Straight {
                velocity: self.straight_velocity(),
            },
        }
    }
}
