//! Axis-aligned rectangle geometry for the paddle and bricks
//!
//! Screen space: origin at the top-left corner, x grows right, y grows down.
//! A rectangle is stored as its top-left corner plus an integer extent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Extent as a float vector
    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub position: Vec2,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: u32, height: u32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width as f32
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height as f32
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.width()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.height()
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size.as_vec2() * 0.5
    }

    /// Half the width and height
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size.as_vec2() * 0.5
    }

    /// Same rectangle moved by `offset`
    #[cfg(test)]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            position: self.position + offset,
            size: self.size,
        }
    }

    /// Closest point on (or inside) the rectangle to `point`
    ///
    /// Each axis is clamped to the rectangle's span independently.
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.top(), self.bottom()),
        )
    }
}
