//! World state
//!
//! The single mutable state a frame reads and writes: the active entity list
//! plus score and life bookkeeping. Bricks live in the same list as the
//! paddle and ball, so removing a brick from the active set and from the
//! brick collection is one operation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Brick, Entity, EntityId, Paddle, spawn_point_above};
use super::input::{Direction, HeldDirections};
use super::layout::generate_bricks;
use super::tick::CollisionEvent;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    settings: Settings,
    /// Paddle first, then ball, then bricks
    entities: Vec<Entity>,
    pub score: u64,
    pub balls_remaining: u32,
    pub ball_speed: f32,
    /// Cleared whenever the ball is parked; the next press launches it
    pub can_ball_move: bool,
    held: HeldDirections,
    /// Completed rounds
    round: u32,
    next_id: u32,
}

impl World {
    /// A fresh session: paddle, a parked ball, and a full brick set
    pub fn new(settings: Settings) -> Self {
        let mut world = Self::empty(settings);

        let origin = world.settings.paddle_origin();
        let paddle_id = world.next_entity_id();
        world.entities.push(
            Paddle::new(
                paddle_id,
                origin,
                world.settings.paddle_width,
                world.settings.paddle_height,
                world.settings.paddle_colour.clone(),
            )
            .into(),
        );
        world.spawn_ball();
        world.regenerate_bricks();

        log::info!(
            "World created: {}x{} surface, {} bricks, {} balls",
            world.settings.surface_width,
            world.settings.surface_height,
            world.brick_count(),
            world.balls_remaining
        );
        world
    }

    /// Bookkeeping only, no entities
    pub fn empty(settings: Settings) -> Self {
        Self {
            score: 0,
            balls_remaining: settings.initial_balls,
            ball_speed: settings.initial_ball_speed,
            can_ball_move: false,
            held: HeldDirections::default(),
            round: 0,
            next_id: 1,
            entities: Vec::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Surface size the ball is confined to
    pub fn bounds(&self) -> Vec2 {
        self.settings.surface_size_vec()
    }

    /// Rounds cleared so far
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Append an entity to the active list
    pub fn add(&mut self, entity: impl Into<Entity>) -> EntityId {
        let entity = entity.into();
        let id = entity.id();
        // Keep freshly allocated ids clear of externally built entities
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.entities.push(entity);
        id
    }

    /// Remove an entity from the active list
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        Some(self.entities.remove(index))
    }

    /// The session paddle (first paddle in the list)
    pub fn paddle(&self) -> Option<&Paddle> {
        self.entities.iter().find_map(Entity::as_paddle)
    }

    pub fn paddle_mut(&mut self) -> Option<&mut Paddle> {
        self.entities.iter_mut().find_map(Entity::as_paddle_mut)
    }

    pub fn balls(&self) -> impl Iterator<Item = &Ball> {
        self.entities.iter().filter_map(Entity::as_ball)
    }

    pub fn balls_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.entities.iter_mut().filter_map(Entity::as_ball_mut)
    }

    pub fn bricks(&self) -> impl Iterator<Item = &Brick> {
        self.entities.iter().filter_map(Entity::as_brick)
    }

    pub fn brick_count(&self) -> usize {
        self.bricks().count()
    }

    pub fn has_ball(&self) -> bool {
        self.balls().next().is_some()
    }

    /// No lives left; the loop decides what that means for the session
    pub fn is_over(&self) -> bool {
        self.balls_remaining == 0
    }

    /// Where a ball of `radius` waits for launch
    pub fn spawn_point(&self, radius: f32) -> Vec2 {
        let origin = self
            .paddle()
            .map_or_else(|| self.settings.paddle_origin(), Paddle::position);
        spawn_point_above(origin, radius)
    }

    /// Add a parked ball at the spawn point. At most one ball is ever in
    /// play, so this does nothing while one exists.
    pub fn spawn_ball(&mut self) -> Option<EntityId> {
        if self.has_ball() {
            return None;
        }
        let id = self.next_entity_id();
        let radius = self.settings.ball_radius;
        let ball = Ball::new(
            id,
            self.spawn_point(radius),
            radius,
            self.settings.ball_colour.clone(),
        );
        self.entities.push(ball.into());
        self.can_ball_move = false;
        Some(id)
    }

    /// Park a ball at the spawn point with zero velocity and wait for input
    pub fn park_ball(&mut self, id: EntityId) {
        let Some(radius) = self.get(id).and_then(Entity::as_ball).map(Ball::radius) else {
            return;
        };
        let spawn = self.spawn_point(radius);
        if let Some(ball) = self.get_mut(id).and_then(Entity::as_ball_mut) {
            ball.park(spawn);
        }
        self.can_ball_move = false;
    }

    /// Consume a life for a ball that left through the bottom
    pub fn lose_ball(&mut self, id: EntityId) -> CollisionEvent {
        self.balls_remaining = self.balls_remaining.saturating_sub(1);
        if self.balls_remaining == 0 {
            self.remove(id);
            log::info!("Last ball lost, final score {}", self.score);
            CollisionEvent::BallsExhausted { ball: id }
        } else {
            self.park_ball(id);
            log::info!("Ball lost, {} remaining", self.balls_remaining);
            CollisionEvent::BallLost {
                ball: id,
                remaining: self.balls_remaining,
            }
        }
    }

    /// Replace the brick set with a freshly generated one
    pub fn regenerate_bricks(&mut self) {
        self.entities.retain(|e| !matches!(e, Entity::Brick(_)));
        let bricks = generate_bricks(&self.settings.layout, self.settings.surface_width, || {
            let id = EntityId(self.next_id);
            self.next_id += 1;
            id
        });
        self.entities.extend(bricks.into_iter().map(Entity::Brick));
    }

    /// Brick set cleared: new bricks, a bonus life, a faster ball
    pub fn complete_round(&mut self, ball: EntityId) -> u32 {
        self.round += 1;
        self.regenerate_bricks();
        self.balls_remaining += self.settings.bonus_balls;
        self.ball_speed += self.settings.speed_increment;
        self.park_ball(ball);
        log::info!(
            "Round {} cleared: score {}, ball speed {}",
            self.round,
            self.score,
            self.ball_speed
        );
        self.round
    }

    /// Directional press: launches a parked ball and steers the paddle
    pub fn press(&mut self, direction: Direction) {
        self.held.press(direction);
        if !self.can_ball_move && self.has_ball() {
            self.launch(direction);
        }
        self.set_paddle_speed(direction.sign() * self.settings.paddle_speed);
    }

    /// Directional release: paddle follows whatever is still held
    pub fn release(&mut self, direction: Direction) {
        self.held.release(direction);
        let vx = self
            .held
            .current()
            .map_or(0.0, |d| d.sign() * self.settings.paddle_speed);
        self.set_paddle_speed(vx);
    }

    pub fn held(&self) -> &HeldDirections {
        &self.held
    }

    fn launch(&mut self, direction: Direction) {
        let velocity = Vec2::new(direction.sign() * self.ball_speed, -self.ball_speed);
        for ball in self.balls_mut() {
            if ball.velocity() == Vec2::ZERO {
                ball.motion.velocity = velocity;
            }
        }
        self.can_ball_move = true;
        log::debug!("Ball launched with velocity {:?}", velocity);
    }

    fn set_paddle_speed(&mut self, vx: f32) {
        if let Some(paddle) = self.paddle_mut() {
            paddle.motion.velocity = Vec2::new(vx, 0.0);
        }
    }
}
