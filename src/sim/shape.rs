//! Shape geometry for entities
//!
//! A body is either circle-like (the ball) or rectangle-like (paddle, bricks).
//! Circles are anchored at their centre, rectangles at their top-left corner.
//! Both reduce to an axis-aligned bounding box for collision purposes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::Surface;

/// Axis-aligned bounding box in surface coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square of half-extent `half` centred on `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self {
            min: center - Vec2::splat(half),
            max: center + Vec2::splat(half),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap; boxes that only touch along an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleDimensions {
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleDimensions {
    pub width: f32,
    pub height: f32,
}

/// Type-erased dimensions of any entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Dimensions {
    Circle(CircleDimensions),
    Rectangle(RectangleDimensions),
}

/// Shape capability shared by all bodies
pub trait Shape: Copy {
    /// Bounding box when anchored at `position`
    fn bounds(&self, position: Vec2) -> Aabb;

    fn dimensions(&self) -> Dimensions;

    /// Fill the shape; style and save/restore are the caller's job
    fn fill(&self, position: Vec2, surface: &mut dyn Surface);
}

impl Shape for CircleDimensions {
    fn bounds(&self, position: Vec2) -> Aabb {
        Aabb::around(position, self.radius)
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::Circle(*self)
    }

    fn fill(&self, position: Vec2, surface: &mut dyn Surface) {
        surface.fill_circle(position.x, position.y, self.radius);
    }
}

impl Shape for RectangleDimensions {
    fn bounds(&self, position: Vec2) -> Aabb {
        Aabb::new(position, position + Vec2::new(self.width, self.height))
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::Rectangle(*self)
    }

    fn fill(&self, position: Vec2, surface: &mut dyn Surface) {
        surface.fill_rect(position.x, position.y, self.width, self.height);
    }
}
