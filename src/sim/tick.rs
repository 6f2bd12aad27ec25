//! Per-frame simulation step
//!
//! For each movable entity, in list order: resolve its collisions against the
//! world, then advance it by one velocity increment. Every collision is a
//! state mutation on the world; the returned events only describe them.

use glam::Vec2;

use super::collision::{
    bounce_off_brick, edge_contacts, leaves_horizontal_bounds, reflect_x, reflect_y, struck_face,
};
use super::entity::{Entity, EntityId};
use super::shape::Aabb;
use super::state::World;
use crate::settings::BottomEdge;

/// What a collision resolution did
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionEvent {
    BrickDestroyed { ball: EntityId, brick: EntityId, points: u32 },
    /// Left, right or top wall (or the floor when it reflects)
    WallBounce { ball: EntityId },
    PaddleBounce { ball: EntityId },
    BallLost { ball: EntityId, remaining: u32 },
    /// Last life used; the ball left the active set
    BallsExhausted { ball: EntityId },
    RoundCleared { round: u32 },
    /// Paddle would leave the surface and skips its next move
    PaddleHeld { paddle: EntityId },
}

/// Advance the world by one frame
pub fn step(world: &mut World) -> Vec<CollisionEvent> {
    // Bricks neither collide on their own nor move
    let movers: Vec<EntityId> = world
        .entities()
        .iter()
        .filter(|e| !matches!(e, Entity::Brick(_)))
        .map(Entity::id)
        .collect();

    let mut events = Vec::new();
    for id in movers {
        events.extend(resolve_collisions(world, id));
        if let Some(entity) = world.get_mut(id) {
            entity.advance();
        }
    }

    for event in &events {
        log::debug!("{:?}", event);
    }
    events
}

/// Detect and apply collisions for one entity. Call once per entity per
/// frame, before that entity advances.
pub fn resolve_collisions(world: &mut World, id: EntityId) -> Vec<CollisionEvent> {
    match world.get(id) {
        Some(Entity::Ball(_)) => resolve_ball(world, id),
        Some(Entity::Paddle(_)) => resolve_paddle(world, id),
        Some(Entity::Brick(_)) | None => Vec::new(),
    }
}

fn resolve_ball(world: &mut World, id: EntityId) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let Some(ball) = world.get(id).and_then(Entity::as_ball) else {
        return events;
    };
    let center = ball.position();
    let radius = ball.radius();
    let ball_box = ball.body.bounds();
    let mut velocity = ball.velocity();

    let hits_paddle = world
        .paddle()
        .is_some_and(|p| ball_box.overlaps(&p.body.bounds()));

    let struck: Vec<(EntityId, Aabb, u32)> = world
        .bricks()
        .filter(|b| ball_box.overlaps(&b.body.bounds()))
        .map(|b| (b.id, b.body.bounds(), b.points))
        .collect();

    let restitution = world.settings().brick_restitution;
    for (brick, bounds, points) in &struck {
        world.remove(*brick);
        world.score += u64::from(*points);
        velocity = bounce_off_brick(velocity, struck_face(center, bounds), restitution);
        events.push(CollisionEvent::BrickDestroyed {
            ball: id,
            brick: *brick,
            points: *points,
        });
    }

    if !struck.is_empty() && world.brick_count() == 0 {
        let round = world.complete_round(id);
        events.push(CollisionEvent::RoundCleared { round });
        return events;
    }

    let edges = edge_contacts(center, radius, world.bounds());
    if edges.sides() {
        velocity = reflect_x(velocity);
        events.push(CollisionEvent::WallBounce { ball: id });
    }

    // The paddle reflects exactly like the ceiling, no spin
    if hits_paddle || edges.top {
        velocity = reflect_y(velocity);
        set_ball_velocity(world, id, velocity);
        events.push(if hits_paddle {
            CollisionEvent::PaddleBounce { ball: id }
        } else {
            CollisionEvent::WallBounce { ball: id }
        });
        return events;
    }

    if edges.bottom {
        let bottom_edge = world.settings().bottom_edge;
        match bottom_edge {
            BottomEdge::Reflect => {
                velocity = reflect_y(velocity);
                events.push(CollisionEvent::WallBounce { ball: id });
            }
            BottomEdge::LoseLife => {
                events.push(world.lose_ball(id));
                return events;
            }
        }
    }

    set_ball_velocity(world, id, velocity);
    events
}

fn resolve_paddle(world: &mut World, id: EntityId) -> Vec<CollisionEvent> {
    let surface_width = world.bounds().x;
    let Some(paddle) = world.get_mut(id).and_then(Entity::as_paddle_mut) else {
        return Vec::new();
    };

    let next_x = paddle.position().x + paddle.motion.velocity.x;
    if leaves_horizontal_bounds(next_x, paddle.width(), surface_width) {
        // One-frame stick at the wall instead of clamping
        paddle.motion.freeze_once();
        return vec![CollisionEvent::PaddleHeld { paddle: id }];
    }
    Vec::new()
}

fn set_ball_velocity(world: &mut World, id: EntityId, velocity: Vec2) {
    if let Some(ball) = world.get_mut(id).and_then(Entity::as_ball_mut) {
        ball.motion.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BrickLayout, Settings};
    use crate::sim::entity::{Ball, Brick, Paddle};
    use crate::sim::input::Direction;

    fn arena(width: f32, height: f32, bottom_edge: BottomEdge) -> World {
        let mut settings = Settings::default();
        settings.surface_width = width;
        settings.surface_height = height;
        settings.bottom_edge = bottom_edge;
        World::empty(settings)
    }

    fn lone_ball(x: f32, y: f32, vx: f32, vy: f32) -> (World, EntityId) {
        let mut world = arena(100.0, 100.0, BottomEdge::Reflect);
        let id = world.add(
            Ball::new(EntityId(1), Vec2::new(x, y), 10.0, "#414868")
                .with_velocity(Vec2::new(vx, vy)),
        );
        (world, id)
    }

    fn ball(world: &World, id: EntityId) -> (Vec2, Vec2) {
        let b = world.get(id).and_then(Entity::as_ball).unwrap();
        (b.position(), b.velocity())
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_right_edge_reflection() {
        let (mut world, id) = lone_ball(90.0, 50.0, 1.0, 1.0);
        step(&mut world);
        step(&mut world);
        assert_eq!(ball(&world, id), (Vec2::new(90.0, 52.0), Vec2::new(-1.0, 1.0)));
    }

    #[test]
    fn test_left_edge_reflection() {
        let (mut world, id) = lone_ball(10.0, 50.0, -1.0, 1.0);
        step(&mut world);
        step(&mut world);
        assert_eq!(ball(&world, id), (Vec2::new(10.0, 52.0), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_bottom_edge_reflection_without_life_loss() {
        let (mut world, id) = lone_ball(50.0, 90.0, 1.0, 1.0);
        step(&mut world);
        step(&mut world);
        assert_eq!(ball(&world, id), (Vec2::new(52.0, 90.0), Vec2::new(1.0, -1.0)));
        assert_eq!(world.balls_remaining, 3);
    }

    #[test]
    fn test_top_edge_reflection() {
        let (mut world, id) = lone_ball(50.0, 10.0, 1.0, -1.0);
        step(&mut world);
        let events = step(&mut world);
        assert_eq!(ball(&world, id), (Vec2::new(52.0, 10.0), Vec2::new(1.0, 1.0)));
        assert_eq!(events, vec![CollisionEvent::WallBounce { ball: id }]);
    }

    #[test]
    fn test_paddle_reflects_like_ceiling() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        world.add(Paddle::new(
            EntityId(1),
            Vec2::new(400.0, 500.0),
            100.0,
            62.5,
            "#15161E",
        ));
        let id = world.add(
            Ball::new(EntityId(2), Vec2::new(450.0, 495.0), 9.0, "#414868")
                .with_velocity(Vec2::new(3.0, 5.0)),
        );

        let events = resolve_collisions(&mut world, id);
        assert_eq!(events, vec![CollisionEvent::PaddleBounce { ball: id }]);
        assert_eq!(ball(&world, id).1, Vec2::new(3.0, -5.0));
    }

    #[test]
    fn test_brick_destroyed_once_and_scored() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        let target = world.add(Brick::new(
            EntityId(1),
            Vec2::new(100.0, 100.0),
            50.0,
            20.0,
            "#9ECE6A",
            3,
        ));
        world.add(Brick::new(
            EntityId(2),
            Vec2::new(600.0, 100.0),
            50.0,
            20.0,
            "#9ECE6A",
            1,
        ));
        // Approaching the bottom face from below
        let id = world.add(
            Ball::new(EntityId(3), Vec2::new(125.0, 125.0), 9.0, "#414868")
                .with_velocity(Vec2::new(0.0, -2.0)),
        );

        let events = step(&mut world);
        assert_eq!(
            events,
            vec![CollisionEvent::BrickDestroyed {
                ball: id,
                brick: target,
                points: 3
            }]
        );
        assert_eq!(world.score, 3);
        assert!(world.get(target).is_none());
        assert_eq!(world.brick_count(), 1);
        assert!(approx(ball(&world, id).1, Vec2::new(0.0, 2.04)));

        // Same spot next frame: nothing left to hit there
        step(&mut world);
        assert_eq!(world.score, 3);
    }

    #[test]
    fn test_brick_side_hit_reflects_x() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        world.add(Brick::new(EntityId(1), Vec2::new(100.0, 100.0), 50.0, 20.0, "x", 1));
        world.add(Brick::new(EntityId(2), Vec2::new(600.0, 100.0), 50.0, 20.0, "x", 1));
        let id = world.add(
            Ball::new(EntityId(3), Vec2::new(95.0, 110.0), 9.0, "#414868")
                .with_velocity(Vec2::new(2.0, 1.0)),
        );

        resolve_collisions(&mut world, id);
        assert!(approx(ball(&world, id).1, Vec2::new(-2.04, 1.02)));
    }

    #[test]
    fn test_bottom_edge_loses_life_and_respawns() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        world.add(Paddle::new(EntityId(1), Vec2::new(100.0, 500.0), 100.0, 62.5, "p"));
        let id = world.add(
            Ball::new(EntityId(2), Vec2::new(700.0, 620.0), 9.0, "#414868")
                .with_velocity(Vec2::new(5.0, 5.0)),
        );
        world.can_ball_move = true;

        let events = step(&mut world);
        assert_eq!(
            events,
            vec![CollisionEvent::BallLost {
                ball: id,
                remaining: 2
            }]
        );
        assert_eq!(ball(&world, id), (Vec2::new(110.0, 490.0), Vec2::ZERO));
        assert!(!world.can_ball_move);

        // Next press launches and steers at once
        world.press(Direction::Left);
        assert_eq!(ball(&world, id).1, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_last_ball_leaves_active_set() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        world.balls_remaining = 1;
        let id = world.add(
            Ball::new(EntityId(1), Vec2::new(500.0, 620.0), 9.0, "#414868")
                .with_velocity(Vec2::new(0.0, 5.0)),
        );

        let events = step(&mut world);
        assert_eq!(events, vec![CollisionEvent::BallsExhausted { ball: id }]);
        assert!(!world.has_ball());
        assert!(world.is_over());
        assert!(step(&mut world).is_empty());
    }

    #[test]
    fn test_paddle_contact_beats_floor() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        world.add(Paddle::new(EntityId(1), Vec2::new(400.0, 600.0), 100.0, 25.0, "p"));
        let id = world.add(
            Ball::new(EntityId(2), Vec2::new(450.0, 620.0), 9.0, "#414868")
                .with_velocity(Vec2::new(0.0, 2.0)),
        );

        resolve_collisions(&mut world, id);
        assert_eq!(world.balls_remaining, 3);
        assert_eq!(ball(&world, id).1, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_round_completion() {
        let mut settings = Settings::default();
        settings.surface_width = 1000.0;
        settings.surface_height = 625.0;
        settings.layout = BrickLayout {
            colours: vec!["#9ECE6A".into()],
            ..Default::default()
        };
        let mut world = World::empty(settings);
        let paddle = world.add(Paddle::new(EntityId(1), Vec2::new(400.0, 550.0), 100.0, 62.5, "p"));
        let id = world.add(
            Ball::new(EntityId(2), Vec2::new(125.0, 125.0), 9.0, "#414868")
                .with_velocity(Vec2::new(1.0, -3.0)),
        );
        world.add(Brick::new(EntityId(3), Vec2::new(100.0, 100.0), 50.0, 20.0, "x", 2));
        world.can_ball_move = true;
        assert_eq!(world.brick_count(), 1);

        let events = step(&mut world);
        assert_eq!(events.last(), Some(&CollisionEvent::RoundCleared { round: 1 }));
        assert_eq!(world.brick_count(), 8);
        assert_eq!(world.score, 2);
        assert_eq!(world.ball_speed, 6.0);
        assert_eq!(world.balls_remaining, 4);
        assert!(!world.can_ball_move);

        let spawn = world.get(paddle).and_then(Entity::as_paddle).unwrap().spawn_point(9.0);
        assert_eq!(ball(&world, id), (spawn, Vec2::ZERO));
    }

    #[test]
    fn test_paddle_one_shot_freeze_at_wall() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        let id = world.add(Paddle::new(EntityId(1), Vec2::new(895.0, 550.0), 100.0, 62.5, "p"));
        world.press(Direction::Right);

        let events = step(&mut world);
        assert_eq!(events, vec![CollisionEvent::PaddleHeld { paddle: id }]);
        assert_eq!(world.get(id).unwrap().position().x, 895.0);

        // Reversing is not blocked
        world.release(Direction::Right);
        world.press(Direction::Left);
        assert!(step(&mut world).is_empty());
        assert_eq!(world.get(id).unwrap().position().x, 885.0);
    }

    #[test]
    fn test_paddle_freeze_clears_after_one_skip() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        let id = world.add(Paddle::new(EntityId(1), Vec2::new(5.0, 550.0), 100.0, 62.5, "p"));
        world.get_mut(id).unwrap().set_velocity(Vec2::new(-10.0, 0.0));

        resolve_collisions(&mut world, id);
        let paddle = world.get_mut(id).unwrap();
        paddle.advance();
        assert_eq!(paddle.position().x, 5.0);
        paddle.advance();
        assert_eq!(paddle.position().x, -5.0);
    }

    #[test]
    fn test_bricks_have_nothing_to_resolve() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        let id = world.add(Brick::new(EntityId(1), Vec2::ZERO, 50.0, 20.0, "x", 1));
        assert!(resolve_collisions(&mut world, id).is_empty());
        assert!(resolve_collisions(&mut world, EntityId(99)).is_empty());
    }

    #[test]
    fn test_two_bricks_in_one_frame_each_bounce() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        let above = world.add(Brick::new(EntityId(1), Vec2::new(100.0, 100.0), 50.0, 20.0, "x", 2));
        let below = world.add(Brick::new(EntityId(2), Vec2::new(100.0, 130.0), 50.0, 20.0, "x", 1));
        world.add(Brick::new(EntityId(3), Vec2::new(600.0, 100.0), 50.0, 20.0, "x", 1));
        // Wedged between two rows: top face of one, bottom face of the other
        let id = world.add(
            Ball::new(EntityId(4), Vec2::new(125.0, 125.0), 9.0, "#414868")
                .with_velocity(Vec2::new(1.0, -2.0)),
        );

        let events = resolve_collisions(&mut world, id);
        assert_eq!(
            events,
            vec![
                CollisionEvent::BrickDestroyed { ball: id, brick: above, points: 2 },
                CollisionEvent::BrickDestroyed { ball: id, brick: below, points: 1 },
            ]
        );
        assert_eq!(world.score, 3);
        assert_eq!(world.brick_count(), 1);
        // The two y flips cancel, the speed-up compounds
        let scale = 1.02 * 1.02;
        assert!(approx(ball(&world, id).1, Vec2::new(scale, -2.0 * scale)));
    }

    #[test]
    fn test_brick_corner_hit_reflects_both_axes() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        let corner = world.add(Brick::new(EntityId(1), Vec2::new(100.0, 100.0), 50.0, 20.0, "x", 1));
        world.add(Brick::new(EntityId(2), Vec2::new(600.0, 100.0), 50.0, 20.0, "x", 1));
        // Centre beyond the bottom-right corner
        let id = world.add(
            Ball::new(EntityId(3), Vec2::new(155.0, 125.0), 9.0, "#414868")
                .with_velocity(Vec2::new(-2.0, -1.0)),
        );

        let events = resolve_collisions(&mut world, id);
        assert_eq!(
            events,
            vec![CollisionEvent::BrickDestroyed { ball: id, brick: corner, points: 1 }]
        );
        assert!(approx(ball(&world, id).1, Vec2::new(2.04, 1.02)));
    }

    #[test]
    fn test_round_completion_beats_floor() {
        let mut world = arena(1000.0, 625.0, BottomEdge::LoseLife);
        let last = world.add(Brick::new(EntityId(1), Vec2::new(480.0, 605.0), 50.0, 10.0, "x", 1));
        let id = world.add(
            Ball::new(EntityId(2), Vec2::new(500.0, 620.0), 9.0, "#414868")
                .with_velocity(Vec2::new(0.0, 5.0)),
        );
        world.can_ball_move = true;

        let events = step(&mut world);
        assert_eq!(
            events,
            vec![
                CollisionEvent::BrickDestroyed { ball: id, brick: last, points: 1 },
                CollisionEvent::RoundCleared { round: 1 },
            ]
        );
        assert_eq!(world.balls_remaining, 4);
        assert!(world.has_ball());
        assert_eq!(world.round(), 1);
        assert_eq!(ball(&world, id), (world.spawn_point(9.0), Vec2::ZERO));
        assert_eq!(world.brick_count(), 32);
    }

    #[test]
    fn test_full_session_is_deterministic() {
        let run = || {
            let mut world = World::new(Settings::default());
            world.press(Direction::Right);
            for i in 0..600 {
                if i == 40 {
                    world.release(Direction::Right);
                    world.press(Direction::Left);
                }
                step(&mut world);
            }
            (world.score, world.balls_remaining, world.brick_count())
        };
        assert_eq!(run(), run());
    }
}
