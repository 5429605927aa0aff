//! Quadratic Bézier paths for curved stone trajectories
//!
//! A curved throw follows a quadratic Bézier in the sheet plane. The stone
//! advances by arc length, so the curve keeps a cumulative length table and
//! exposes arc-length parameterized sampling: equal steps of `u` cover equal
//! distances along the path.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of segments in the cached arc-length table
const ARC_LENGTH_SEGMENTS: usize = 200;

/// A quadratic Bézier curve with a cached arc-length table
///
/// Serialized as its three control points; the table is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ControlPoints", into = "ControlPoints")]
pub struct QuadraticBezier {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
    /// Cumulative chord lengths at uniform parameter samples
    lengths: Vec<f32>,
}

/// Serialized form of [`QuadraticBezier`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ControlPoints {
    start: Vec3,
    control: Vec3,
    end: Vec3,
}

impl From<ControlPoints> for QuadraticBezier {
    fn from(p: ControlPoints) -> Self {
        Self::new(p.start, p.control, p.end)
    }
}

impl From<QuadraticBezier> for ControlPoints {
    fn from(c: QuadraticBezier) -> Self {
        Self {
            start: c.start,
            control: c.control,
            end: c.end,
        }
    }
}

impl QuadraticBezier {
    pub fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_SEGMENTS + 1);
        lengths.push(0.0);

        let mut total = 0.0;
        let mut prev = start;
        for i in 1..=ARC_LENGTH_SEGMENTS {
            let t = i as f32 / ARC_LENGTH_SEGMENTS as f32;
            let p = eval(start, control, end, t);
            total += p.distance(prev);
            lengths.push(total);
            prev = p;
        }

        Self {
            start,
            control,
            end,
            lengths,
        }
    }

    /// Point at the raw curve parameter `t` ∈ [0, 1]
    #[inline]
    pub fn point(&self, t: f32) -> Vec3 {
        eval(self.start, self.control, self.end, t)
    }

    /// Unit tangent at the raw curve parameter `t`
    ///
    /// Zero for a degenerate curve whose control points coincide.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let d = 2.0 * (1.0 - t) * (self.control - self.start) + 2.0 * t * (self.end - self.control);
        d.normalize_or_zero()
    }

    /// Total arc length
    #[inline]
    pub fn length(&self) -> f32 {
        *self.lengths.last().unwrap_or(&0.0)
    }

    /// Point at the arc-length fraction `u` ∈ [0, 1]
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.param_at(u))
    }

    /// Unit tangent at the arc-length fraction `u` ∈ [0, 1]
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.param_at(u))
    }

    /// Map an arc-length fraction to the raw curve parameter
    fn param_at(&self, u: f32) -> f32 {
        let target = u.clamp(0.0, 1.0) * self.length();

        let i = self.lengths.partition_point(|&len| len < target);
        if i == 0 {
            return 0.0;
        }
        let i = i.min(self.lengths.len() - 1);

        let segment = self.lengths[i] - self.lengths[i - 1];
        let frac = if segment > 0.0 {
            (target - self.lengths[i - 1]) / segment
        } else {
            0.0
        };

        ((i - 1) as f32 + frac) / ARC_LENGTH_SEGMENTS as f32
    }

    /// Sample points along the curve (for trajectory preview lines)
    pub fn sample_points(&self, num_points: usize) -> Vec<Vec3> {
        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                self.point(t)
            })
            .collect()
    }
}

#[inline]
fn eval(start: Vec3, control: Vec3, end: Vec3, t: f32) -> Vec3 {
    let s = 1.0 - t;
    start * (s * s) + control * (2.0 * s * t) + end * (t * t)
}
