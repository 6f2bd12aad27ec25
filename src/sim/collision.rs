//! Collision detection and response for axis-aligned bodies
//!
//! The ball is approximated by its bounding square, so every test here is an
//! AABB test. Responses are pure functions of velocity; the engine in `tick`
//! decides which of them to apply and owns all world mutation.

use glam::Vec2;

use super::shape::Aabb;

/// Which walls of the surface a ball is currently past
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeContacts {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl EdgeContacts {
    pub fn sides(&self) -> bool {
        self.left || self.right
    }
}

/// Edge tests for a ball of `radius` at `center` inside a surface of `size`
pub fn edge_contacts(center: Vec2, radius: f32, size: Vec2) -> EdgeContacts {
    EdgeContacts {
        left: center.x < radius,
        right: center.x > size.x - radius,
        top: center.y < radius,
        bottom: center.y > size.y - radius,
    }
}

/// Which face of a brick the ball struck, judged from the ball centre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickFace {
    /// Centre is left or right of the brick
    Side,
    /// Centre is above or below the brick
    TopOrBottom,
    /// Centre is diagonally outside: both of the above
    Corner,
    /// Centre is inside the brick (deep overlap)
    Inside,
}

pub fn struck_face(ball_center: Vec2, brick: &Aabb) -> BrickFace {
    let side = ball_center.x > brick.max.x || ball_center.x < brick.min.x;
    let top_or_bottom = ball_center.y > brick.max.y || ball_center.y < brick.min.y;
    match (side, top_or_bottom) {
        (true, true) => BrickFace::Corner,
        (true, false) => BrickFace::Side,
        (false, true) => BrickFace::TopOrBottom,
        (false, false) => BrickFace::Inside,
    }
}

/// Velocity after bouncing off a brick face.
///
/// Both components are scaled by `restitution`. Side hits flip x, top/bottom
/// hits flip y, corners flip both. A centre already inside the brick is
/// treated like a top/bottom hit.
pub fn bounce_off_brick(velocity: Vec2, face: BrickFace, restitution: f32) -> Vec2 {
    let flip = match face {
        BrickFace::Corner => Vec2::new(-1.0, -1.0),
        BrickFace::Side => Vec2::new(-1.0, 1.0),
        BrickFace::TopOrBottom | BrickFace::Inside => Vec2::new(1.0, -1.0),
    };
    velocity * flip * restitution
}

#[inline]
pub fn reflect_x(velocity: Vec2) -> Vec2 {
    Vec2::new(-velocity.x, velocity.y)
}

#[inline]
pub fn reflect_y(velocity: Vec2) -> Vec2 {
    Vec2::new(velocity.x, -velocity.y)
}

/// Whether a rectangle moved to `next_x` would leave `[0, surface_width - width]`
pub fn leaves_horizontal_bounds(next_x: f32, width: f32, surface_width: f32) -> bool {
    next_x > surface_width - width || next_x < 0.0
}
