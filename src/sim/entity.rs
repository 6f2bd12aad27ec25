//! Entities: the ball, the paddle, and bricks
//!
//! Every entity is a `Body` (position, shape, colour). Movable entities also
//! carry a `Motion`. `Entity` is the closed set the world stores and the
//! collision engine dispatches on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::{Aabb, CircleDimensions, Dimensions, RectangleDimensions, Shape};
use crate::renderer::Surface;

/// Stable identity of an entity within a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Positioned, coloured shape. The shape is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body<S> {
    pub position: Vec2,
    shape: S,
    pub colour: String,
}

impl<S: Shape> Body<S> {
    pub fn new(position: Vec2, shape: S, colour: impl Into<String>) -> Self {
        Self {
            position,
            shape,
            colour: colour.into(),
        }
    }

    pub fn shape(&self) -> S {
        self.shape
    }

    pub fn bounds(&self) -> Aabb {
        self.shape.bounds(self.position)
    }

    /// Paint with save/restore so fill style never leaks to the next draw
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.set_fill_style(&self.colour);
        self.shape.fill(self.position, surface);
        surface.restore();
    }
}

/// Velocity plus the one-shot freeze gate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    pub velocity: Vec2,
    /// Skip the next advance, then clear
    frozen: bool,
}

impl Motion {
    /// Suppress exactly one pending advance
    pub fn freeze_once(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Integrate one step into `position`, unless a freeze is pending
    pub fn advance(&mut self, position: &mut Vec2) {
        if self.frozen {
            self.frozen = false;
            return;
        }
        *position += self.velocity;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    pub body: Body<CircleDimensions>,
    pub motion: Motion,
}

impl Ball {
    pub fn new(id: EntityId, position: Vec2, radius: f32, colour: impl Into<String>) -> Self {
        Self {
            id,
            body: Body::new(position, CircleDimensions { radius }, colour),
            motion: Motion::default(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.motion.velocity = velocity;
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.body.shape().radius
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity
    }

    /// Place the ball and stop it until it is launched again
    pub fn park(&mut self, position: Vec2) {
        self.body.position = position;
        self.motion = Motion::default();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub id: EntityId,
    pub body: Body<RectangleDimensions>,
    pub motion: Motion,
}

impl Paddle {
    pub fn new(
        id: EntityId,
        position: Vec2,
        width: f32,
        height: f32,
        colour: impl Into<String>,
    ) -> Self {
        Self {
            id,
            body: Body::new(position, RectangleDimensions { width, height }, colour),
            motion: Motion::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.body.shape().width
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Where the ball waits for launch: just above the paddle's left end
    pub fn spawn_point(&self, ball_radius: f32) -> Vec2 {
        spawn_point_above(self.body.position, ball_radius)
    }
}

/// Ball spawn offset relative to a paddle's top-left corner
pub fn spawn_point_above(paddle_position: Vec2, ball_radius: f32) -> Vec2 {
    Vec2::new(
        paddle_position.x + ball_radius + 1.0,
        paddle_position.y - ball_radius - 1.0,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    pub body: Body<RectangleDimensions>,
    pub points: u32,
}

impl Brick {
    pub fn new(
        id: EntityId,
        position: Vec2,
        width: f32,
        height: f32,
        colour: impl Into<String>,
        points: u32,
    ) -> Self {
        Self {
            id,
            body: Body::new(position, RectangleDimensions { width, height }, colour),
            points,
        }
    }
}

/// Everything that can live in the world's active list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Paddle(Paddle),
    Ball(Ball),
    Brick(Brick),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Paddle(p) => p.id,
            Entity::Ball(b) => b.id,
            Entity::Brick(b) => b.id,
        }
    }

    pub fn position(&self) -> Vec2 {
        match self {
            Entity::Paddle(p) => p.body.position,
            Entity::Ball(b) => b.body.position,
            Entity::Brick(b) => b.body.position,
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Entity::Paddle(p) => p.body.position = position,
            Entity::Ball(b) => b.body.position = position,
            Entity::Brick(b) => b.body.position = position,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        match self {
            Entity::Paddle(p) => p.body.shape().dimensions(),
            Entity::Ball(b) => b.body.shape().dimensions(),
            Entity::Brick(b) => b.body.shape().dimensions(),
        }
    }

    /// Velocity of movable entities; bricks are static
    pub fn velocity(&self) -> Option<Vec2> {
        self.motion().map(|m| m.velocity)
    }

    /// Returns false for static entities
    pub fn set_velocity(&mut self, velocity: Vec2) -> bool {
        match self.motion_mut() {
            Some(motion) => {
                motion.velocity = velocity;
                true
            }
            None => false,
        }
    }

    pub fn motion(&self) -> Option<&Motion> {
        match self {
            Entity::Paddle(p) => Some(&p.motion),
            Entity::Ball(b) => Some(&b.motion),
            Entity::Brick(_) => None,
        }
    }

    pub fn motion_mut(&mut self) -> Option<&mut Motion> {
        match self {
            Entity::Paddle(p) => Some(&mut p.motion),
            Entity::Ball(b) => Some(&mut b.motion),
            Entity::Brick(_) => None,
        }
    }

    /// Advance one simulation step (no-op for static entities)
    pub fn advance(&mut self) {
        match self {
            Entity::Paddle(p) => p.motion.advance(&mut p.body.position),
            Entity::Ball(b) => b.motion.advance(&mut b.body.position),
            Entity::Brick(_) => {}
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Entity::Paddle(p) => p.body.draw(surface),
            Entity::Ball(b) => b.body.draw(surface),
            Entity::Brick(b) => b.body.draw(surface),
        }
    }

    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Entity::Ball(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_ball_mut(&mut self) -> Option<&mut Ball> {
        match self {
            Entity::Ball(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match self {
            Entity::Paddle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paddle_mut(&mut self) -> Option<&mut Paddle> {
        match self {
            Entity::Paddle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_brick(&self) -> Option<&Brick> {
        match self {
            Entity::Brick(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Ball> for Entity {
    fn from(ball: Ball) -> Self {
        Entity::Ball(ball)
    }
}

impl From<Paddle> for Entity {
    fn from(paddle: Paddle) -> Self {
        Entity::Paddle(paddle)
    }
}

impl From<Brick> for Entity {
    fn from(brick: Brick) -> Self {
        Entity::Brick(brick)
    }
}
