//! Per-frame simulation step
//!
//! One call to [`tick`] is one frame. Positions move by a fixed amount per
//! frame (no delta-time scaling), so game speed follows the display's refresh
//! rate. `dt` only advances the simulated clock that drives the respawn timer.

use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionEdge, circle_intersects_rect, classify_collision_edge};
use super::state::{Ball, GameState, Paddle};

/// Keyboard state sampled once per frame (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce { wall: Wall },
    PaddleHit { hit_factor: f32 },
    BrickBroken { index: usize, edge: CollisionEdge },
    /// Ball fell past the bottom edge
    BallLost,
    BallRespawned,
    /// Every brick had been broken and the field was restored
    FieldReset,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: Duration) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.clock += dt;
    state.frame += 1;

    // Paddle: both keys held cancel out
    let mut dx = 0.0;
    if input.left {
        dx -= state.paddle.speed;
    }
    if input.right {
        dx += state.paddle.speed;
    }
    state.paddle.slide(dx, state.arena.width as f32);

    if state.ball.is_waiting() {
        if state.ball.ready_to_respawn(state.clock) {
            if state.all_bricks_broken() {
                state.reset_bricks();
                events.push(GameEvent::FieldReset);
            }
            state.ball.respawn(&state.paddle);
            events.push(GameEvent::BallRespawned);
        }
        // The ball stays at its respawn point until the next frame
        return events;
    }

    bounce_off_walls(&mut state.ball, state.arena.width as f32, &mut events);

    if state.ball.center.y > state.arena.height as f32 + state.ball.radius {
        state.ball.go_out(state.clock);
        events.push(GameEvent::BallLost);
        return events;
    }

    if let Some(hit_factor) = paddle_hit_factor(&state.ball, &state.paddle) {
        let ball = &mut state.ball;
        ball.velocity = bounce_velocity(hit_factor, ball.speed, state.bounce_angle_floor);
        ball.center.y = state.paddle.top() - ball.radius - 1.0;
        events.push(GameEvent::PaddleHit { hit_factor });
    }

    if let Some(event) = break_first_brick(state) {
        events.push(event);
    }

    state.ball.center += state.ball.velocity;

    events
}

/// Reflect off the left, right and top walls, pulling the ball back inside
fn bounce_off_walls(ball: &mut Ball, arena_width: f32, events: &mut Vec<GameEvent>) {
    if ball.left() < 0.0 {
        ball.center.x = ball.radius;
        ball.velocity.x = -ball.velocity.x;
        events.push(GameEvent::WallBounce { wall: Wall::Left });
    } else if ball.right() > arena_width {
        ball.center.x = arena_width - ball.radius;
        ball.velocity.x = -ball.velocity.x;
        events.push(GameEvent::WallBounce { wall: Wall::Right });
    }

    if ball.top() < 0.0 {
        ball.center.y = ball.radius;
        ball.velocity.y = -ball.velocity.y;
        events.push(GameEvent::WallBounce { wall: Wall::Top });
    }
}

/// Where the ball strikes the paddle's top face, in `[-1, 1]` (0 = dead center)
///
/// Only the top face is solid: a ball reaching the paddle from the side or
/// below passes through.
pub fn paddle_hit_factor(ball: &Ball, paddle: &Paddle) -> Option<f32> {
    let r = ball.radius;
    let top = paddle.top();
    let within_x = ball.center.x >= paddle.position.x - r
        && ball.center.x <= paddle.position.x + paddle.width() + r;

    if ball.bottom() >= top && ball.center.y < top && within_x {
        let half_reach = paddle.width() / 2.0 + r;
        Some(((ball.center.x - paddle.center_x()) / half_reach).clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// Velocity leaving the paddle for a given hit factor
///
/// The angle from horizontal runs from `floor` at the paddle's ends to 90° at
/// its center. Hits left of center send the ball left.
pub fn bounce_velocity(hit_factor: f32, speed: f32, floor: f32) -> Vec2 {
    let acute = floor + (FRAC_PI_2 - floor) * (1.0 - hit_factor.abs());
    let angle = if hit_factor < 0.0 { PI - acute } else { acute };
    Vec2::new(speed * angle.cos(), -speed * angle.sin())
}

/// Break the first intact brick the ball overlaps, in array order
fn break_first_brick(state: &mut GameState) -> Option<GameEvent> {
    let ball = &mut state.ball;
    let index = state
        .bricks
        .iter()
        .position(|b| !b.broken && circle_intersects_rect(ball.center, ball.radius, &b.rect))?;

    let brick = &mut state.bricks[index];
    brick.broken = true;

    let edge = classify_collision_edge(ball.center, ball.radius, &brick.rect);
    if edge.is_horizontal_face() {
        ball.velocity.y = -ball.velocity.y;
    } else if edge.is_vertical_face() {
        ball.velocity.x = -ball.velocity.x;
    } else {
        unreachable!(
            "brick {index} overlaps the ball at {:?} but has no collision edge",
            ball.center
        );
    }

    Some(GameEvent::BrickBroken { index, edge })
}
