//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world space (pixels).
///
/// Used for the visible playfield supplied by the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Whether a circle of `radius` around `point` touches this rectangle.
    pub fn overlaps_circle(&self, point: Vec2, radius: f32) -> bool {
        let closest = point.clamp(self.min, self.max);
        closest.distance_squared(point) <= radius * radius
    }

    /// Grow (or shrink, for negative values) every edge by `margin`.
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(self.min - Vec2::splat(margin), self.max + Vec2::splat(margin))
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::centered(
            Vec2::ZERO,
            Vec2::new(
                crate::constants::DEFAULT_PLAYFIELD_WIDTH,
                crate::constants::DEFAULT_PLAYFIELD_HEIGHT,
            ),
        )
    }
}

/// Simulation time tracking.
///
/// Only advances while gameplay is running; pausing freezes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of gameplay ticks processed.
    pub tick: u64,
    /// Elapsed gameplay time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one tick of `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += elapsed_ms;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }
}

/// Rotate a vector by `radians` counter-clockwise.
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v)
}
