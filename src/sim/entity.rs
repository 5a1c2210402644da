//! Capability traits shared by simulation entities
//!
//! Each entity implements only the behaviors it needs: the avatar updates and
//! collides but never scrolls, the backdrop scrolls but has no bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap on the horizontal axis (touching edges do not overlap)
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }
}

/// Advances with the normalized frame factor
pub trait Updatable {
    fn update(&mut self, dt: f32);
}

/// Occupies space that can be hit or leave the screen
pub trait Collidable {
    /// Bounding rectangle (circles report their enclosing square)
    fn bounds(&self) -> Rect;

    /// Trailing (right) edge has passed the left screen boundary
    fn is_off_screen(&self) -> bool {
        self.bounds().right() < 0.0
    }
}

/// Moves with the world scroll; speed is retuned when settings change
pub trait Scrolling {
    fn set_speed(&mut self, speed: f32);
}
