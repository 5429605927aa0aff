//! Game state and core simulation types
//!
//! Everything that must be persisted for snapshots lives here: stones and
//! their kinematic state machine, the per-team brooms, and the game state the
//! turn driver mutates each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::curve::QuadraticBezier;
use crate::consts::*;
use crate::heading_about_y;

/// The two curling teams, throwing in round-robin order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Team {
    #[default]
    Blue,
    Red,
}

impl Team {
    pub fn other(self) -> Self {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    /// Index into per-team arrays (scores, brooms)
    pub fn index(self) -> usize {
        match self {
            Team::Blue => 0,
            Team::Red => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Blue => "Blue",
            Team::Red => "Red",
        }
    }
}

/// How a launched stone advances each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrajectoryMode {
    /// Straight free slide under friction only
    Linear,
    /// Following a Bézier path; `t` is the arc-length fraction covered so far.
    /// `t` never decreases, and once the advance would pass 1 the stone drops
    /// to `Linear` for good.
    Curved { curve: QuadraticBezier, t: f32 },
}

/// A curling stone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stone {
    pub position: Vec3,
    /// Position before the most recent movement step, kept so collision
    /// resolution can undo an overlapping step
    pub last_position: Vec3,
    pub velocity: Vec3,
    /// Current friction coefficient (arbitrary units, not a physical model)
    pub friction: f32,
    /// Whether the broom is being used on this stone
    pub sweeping: bool,
    pub mode: TrajectoryMode,
    pub radius: f32,
    pub team: Team,
    /// False until the player triggers the launch
    pub launched: bool,
}

impl Stone {
    pub fn new(radius: f32, position: Vec3, team: Team) -> Self {
        Self {
            position,
            last_position: position,
            velocity: Vec3::ZERO,
            friction: NORMAL_FRICTION,
            sweeping: false,
            mode: TrajectoryMode::Linear,
            radius,
            team,
            launched: false,
        }
    }

    /// Advance one tick of `dt` seconds. Does nothing until launched.
    pub fn update(&mut self, dt: f32) {
        if !self.launched {
            return;
        }

        match &mut self.mode {
            TrajectoryMode::Linear => {
                self.last_position = self.position;
                self.position += self.velocity * dt;
            }
            TrajectoryMode::Curved { curve, t } => {
                let speed = self.velocity.length();
                // Fraction of the curve this tick covers, over total arc length
                let next = *t + speed * dt / curve.length();

                if next > 1.0 {
                    // End of the curve reached mid-tick: drop to free slide and
                    // re-run the whole step as Linear so no time is lost at the
                    // boundary.
                    self.set_free_fall();
                    self.update(dt);
                    return;
                }

                self.last_position = self.position;
                self.position = curve.point_at(next);
                // Velocity stays tangent to the curve, magnitude preserved
                self.velocity = curve.tangent_at(next) * speed;
                *t = next;
            }
        }

        self.apply_friction(dt);
    }

    /// First-order decay toward zero; deterministic, not physically exact
    fn apply_friction(&mut self, dt: f32) {
        self.velocity += -self.velocity * self.friction * dt;
    }

    /// Toggle sweeping. Only the decay rate used on subsequent ticks changes;
    /// the velocity is left alone.
    pub fn use_broom(&mut self, active: bool) {
        self.sweeping = active;
        self.friction = if active {
            BROOM_FRICTION
        } else {
            NORMAL_FRICTION
        };
    }

    /// Restore the position saved before the last movement step
    pub fn cancel_last_movement(&mut self) {
        self.position = self.last_position;
    }

    /// Abandon any curve; the stone free-slides from here on
    pub fn set_free_fall(&mut self) {
        self.mode = TrajectoryMode::Linear;
    }

    pub fn is_moving(&self) -> bool {
        self.velocity.length_squared() > REST_EPSILON
    }

    /// Unit travel direction; falls back to +X when nearly stopped
    pub fn forward(&self) -> Vec3 {
        if self.velocity.length_squared() < FORWARD_EPSILON {
            Vec3::X
        } else {
            self.velocity.normalize()
        }
    }

    /// Launch along a Bézier path with the given initial velocity
    pub fn launch_curved(&mut self, velocity: Vec3, curve: QuadraticBezier) {
        self.velocity = velocity;
        self.mode = TrajectoryMode::Curved { curve, t: 0.0 };
        self.launched = true;
    }

    /// Launch into a straight free slide with the given velocity
    pub fn launch_straight(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.mode = TrajectoryMode::Linear;
        self.launched = true;
    }
}

/// A team's broom, following the swept stone just ahead of it on the ice
///
/// The broom owns no stone; it holds an index into the stone collection and
/// re-derives its pose from that stone each tick. The visual layer reads
/// `position`/`yaw` and never feeds anything back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broom {
    pub team: Team,
    /// Index of the stone being followed, if any
    pub attached: Option<usize>,
    /// Whether the broom is actively sweeping
    pub sweeping: bool,
    /// World position, on the travel circle of radius `STONE_BROOM_DIST`
    pub position: Vec3,
    /// Heading about the vertical axis; strokes run orthogonal to travel
    pub yaw: f32,
}

impl Broom {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            attached: None,
            sweeping: false,
            position: Vec3::ZERO,
            yaw: 0.0,
        }
    }

    pub fn attach(&mut self, stone_index: usize) {
        self.attached = Some(stone_index);
    }

    pub fn detach(&mut self) {
        self.attached = None;
        self.sweeping = false;
    }

    pub fn set_sweeping(&mut self, active: bool) {
        self.sweeping = active;
    }

    /// Re-derive the follow pose from the swept stone
    pub fn update(&mut self, stones: &[Stone]) {
        let Some(index) = self.attached else {
            return;
        };
        if !self.sweeping {
            return;
        }
        let Some(stone) = stones.get(index) else {
            return;
        };

        let forward = stone.forward();
        self.position = stone.position + forward * STONE_BROOM_DIST;
        self.yaw = heading_about_y(forward);
    }
}

/// Complete game state, passed to the tick driver each frame
///
/// Explicit struct instead of host globals: the host owns one of these and
/// hands it to `sim::tick` along with the elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Team throwing the current stone
    pub current_team: Team,
    /// Per-team stones-in-house counts, recomputed from scratch each update
    pub scores: [u32; 2],
    /// Every stone on the sheet, in creation order; stones are never removed
    pub stones: Vec<Stone>,
    /// Index into `stones` of the stone currently in play
    pub current: Option<usize>,
    /// One broom per team
    pub brooms: [Broom; 2],
    /// Center of the scoring zone
    pub house_center: Vec3,
    /// Where each new stone is placed for its throw
    pub launch_origin: Vec3,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            current_team: Team::Blue,
            scores: [0, 0],
            stones: Vec::new(),
            current: None,
            brooms: [Broom::new(Team::Blue), Broom::new(Team::Red)],
            house_center: HOUSE_CENTER,
            launch_origin: Vec3::ZERO,
        }
    }

    /// The stone currently in play, if one exists
    pub fn current_stone(&self) -> Option<&Stone> {
        self.current.and_then(|i| self.stones.get(i))
    }

    pub fn current_stone_mut(&mut self) -> Option<&mut Stone> {
        self.current.and_then(|i| self.stones.get_mut(i))
    }

    /// Spawn a fresh stone at the launch origin and make it current
    pub fn spawn_stone(&mut self, team: Team) -> usize {
        let index = self.stones.len();
        self.stones
            .push(Stone::new(STONE_RADIUS, self.launch_origin, team));
        self.current = Some(index);
        index
    }

    pub fn broom(&self, team: Team) -> &Broom {
        &self.brooms[team.index()]
    }

    pub fn broom_mut(&mut self, team: Team) -> &mut Broom {
        &mut self.brooms[team.index()]
    }

    /// Which team currently leads, if either
    pub fn leading_team(&self) -> Option<Team> {
        match self.scores[0].cmp(&self.scores[1]) {
            Ordering::Greater => Some(Team::Blue),
            Ordering::Less => Some(Team::Red),
            Ordering::Equal => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
