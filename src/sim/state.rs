//! Game state and core entity types
//!
//! Everything the update step reads or mutates lives in [`GameState`], so a
//! frame can be simulated without a window or GPU.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size};
use crate::config::GameConfig;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Ball state - in play or waiting out the respawn delay after a miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Moving under its own velocity
    Flying,
    /// Fell past the bottom edge at simulated time `since`
    Waiting { since: Duration },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub center: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    /// Respawn velocity is `(-speed, -speed)`; paddle bounces keep `|velocity| == speed`
    pub speed: f32,
    pub state: BallState,
    pub respawn_delay: Duration,
}

impl Ball {
    #[inline]
    pub fn is_flying(&self) -> bool {
        self.state == BallState::Flying
    }

    #[inline]
    pub fn is_waiting(&self) -> bool {
        matches!(self.state, BallState::Waiting { .. })
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }

    /// Stop the ball and start the respawn timer
    pub fn go_out(&mut self, now: Duration) {
        self.velocity = Vec2::ZERO;
        self.state = BallState::Waiting { since: now };
    }

    /// Whether the respawn delay has fully elapsed at simulated time `now`
    pub fn ready_to_respawn(&self, now: Duration) -> bool {
        match self.state {
            BallState::Waiting { since } => now.saturating_sub(since) >= self.respawn_delay,
            BallState::Flying => false,
        }
    }

    /// Put the ball back in play just above the paddle, heading up-left
    pub fn respawn(&mut self, paddle: &Paddle) {
        self.center = Vec2::new(paddle.center_x(), paddle.top() - 2.0 * self.radius);
        self.velocity = Vec2::new(-self.speed, -self.speed);
        self.state = BallState::Flying;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub position: Vec2,
    pub size: Size,
    /// Horizontal movement per frame
    pub speed: f32,
}

impl Paddle {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            position: self.position,
            size: self.size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width as f32
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.position.x + self.width() / 2.0
    }

    /// Move by `dx` then keep the paddle fully inside `[0, arena_width]`
    pub fn slide(&mut self, dx: f32, arena_width: f32) {
        let max_x = (arena_width - self.width()).max(0.0);
        self.position.x = (self.position.x + dx).clamp(0.0, max_x);
    }
}

/// A brick in the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: Rgb,
    pub broken: bool,
}

/// Lay out the brick field in row-major order
///
/// Row `r` takes color `palette[r % palette.len()]`.
pub fn build_brick_field(config: &GameConfig) -> Vec<Brick> {
    let columns = config.brick_columns;
    let rows = config.brick_rows;
    let mut bricks = Vec::with_capacity((columns as usize).saturating_mul(rows as usize));

    for row in 0..rows {
        let color = config
            .palette
            .get(row as usize % config.palette.len().max(1))
            .copied()
            .unwrap_or(Rgb::WHITE);
        for column in 0..columns {
            let x = column as f32 * config.brick_width as f32;
            let y = config.brick_field_top + row as f32 * config.brick_height as f32;
            bricks.push(Brick {
                rect: Rect::new(x, y, config.brick_width, config.brick_height),
                color,
                broken: false,
            });
        }
    }

    bricks
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Playfield extent (the window's logical size)
    pub arena: Size,
    /// Shallowest paddle bounce angle from horizontal (radians)
    pub bounce_angle_floor: f32,
    /// Number of brick columns, for row/column lookups
    pub brick_columns: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Row-major brick grid
    pub bricks: Vec<Brick>,
    /// Simulated clock (sum of all frame deltas)
    pub clock: Duration,
    /// Frames simulated so far
    pub frame: u64,
}

impl GameState {
    /// Create the opening state: centered paddle, full field, ball ready to launch
    pub fn new(config: &GameConfig) -> Self {
        let arena = Size::new(config.window_width, config.window_height);
        let paddle_size = Size::new(config.paddle_width, config.paddle_height);
        let paddle = Paddle {
            position: Vec2::new(
                (arena.width as f32 - paddle_size.width as f32) / 2.0,
                arena.height as f32 - config.paddle_bottom_margin - paddle_size.height as f32,
            ),
            size: paddle_size,
            speed: config.paddle_speed,
        };

        let mut ball = Ball {
            center: Vec2::ZERO,
            radius: config.ball_radius,
            velocity: Vec2::ZERO,
            speed: config.ball_speed,
            state: BallState::Flying,
            respawn_delay: config.respawn_delay(),
        };
        ball.respawn(&paddle);

        Self {
            arena,
            bounce_angle_floor: config.bounce_angle_floor_deg.to_radians(),
            brick_columns: config.brick_columns,
            paddle,
            ball,
            bricks: build_brick_field(config),
            clock: Duration::ZERO,
            frame: 0,
        }
    }

    /// Brick at grid cell (`row`, `column`)
    #[cfg(test)]
    pub fn brick_at(&self, row: u32, column: u32) -> Option<&Brick> {
        if column >= self.brick_columns {
            return None;
        }
        let index = (row as usize)
            .checked_mul(self.brick_columns as usize)?
            .checked_add(column as usize)?;
        self.bricks.get(index)
    }

    /// Grid cell (`row`, `column`) of the brick at `index`
    pub fn brick_cell(&self, index: usize) -> (u32, u32) {
        let columns = self.brick_columns.max(1) as usize;
        ((index / columns) as u32, (index % columns) as u32)
    }

    pub fn all_bricks_broken(&self) -> bool {
        self.bricks.iter().all(|b| b.broken)
    }

    pub fn remaining_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| !b.broken).count()
    }

    /// Restore every brick
    pub fn reset_bricks(&mut self) {
        for brick in &mut self.bricks {
            brick.broken = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let config = GameConfig::default();
        let state = GameState::new(&config);

        assert_eq!(state.bricks.len(), 200);
        assert_eq!(state.remaining_bricks(), 200);
        // Paddle centered, 20 px above the bottom edge
        assert_eq!(state.paddle.position, Vec2::new(325.0, 570.0));
        // Ball starts at the respawn position, flying up-left
        assert_eq!(state.ball.center, Vec2::new(400.0, 554.0));
        assert_eq!(state.ball.velocity, Vec2::new(-7.0, -7.0));
        assert!(state.ball.is_flying());
    }

    #[test]
    fn test_brick_grid_indexing_and_palette() {
        let config = GameConfig::default();
        let state = GameState::new(&config);

        let first = state.brick_at(0, 0).unwrap();
        assert_eq!(first.rect, Rect::new(0.0, 50.0, 40, 15));

        let last = state.brick_at(9, 19).unwrap();
        assert_eq!(last.rect, Rect::new(760.0, 185.0, 40, 15));
        assert_eq!(last.color, config.palette[9]);

        // Every brick in a row shares that row's color
        for column in 0..20 {
            assert_eq!(state.brick_at(3, column).unwrap().color, config.palette[3]);
        }

        assert!(state.brick_at(0, 20).is_none());
        assert!(state.brick_at(10, 0).is_none());
        assert!(state.brick_at(u32::MAX, 19).is_none());
        assert_eq!(state.brick_cell(45), (2, 5));
    }

    #[test]
    fn test_palette_cycles_by_row() {
        let config = GameConfig {
            brick_rows: 5,
            palette: vec![Rgb::new(1, 0, 0), Rgb::new(0, 1, 0)],
            ..GameConfig::default()
        };
        let state = GameState::new(&config);
        let row_colors: Vec<Rgb> = (0..5).map(|r| state.brick_at(r, 0).unwrap().color).collect();
        assert_eq!(row_colors[0], row_colors[2]);
        assert_eq!(row_colors[2], row_colors[4]);
        assert_eq!(row_colors[1], row_colors[3]);
        assert_ne!(row_colors[0], row_colors[1]);
    }

    #[test]
    fn test_brick_positions_use_float_math() {
        // Cell coordinates that would overflow as u32 products
        let config = GameConfig {
            brick_columns: 2,
            brick_rows: 1,
            brick_width: 3_000_000_000,
            ..GameConfig::default()
        };
        let bricks = build_brick_field(&config);
        assert_eq!(bricks.len(), 2);
        assert_eq!(bricks[1].rect.left(), 3.0e9);
    }

    #[test]
    fn test_paddle_slide_clamps() {
        let mut paddle = GameState::new(&GameConfig::default()).paddle;
        paddle.slide(-10_000.0, 800.0);
        assert_eq!(paddle.position.x, 0.0);
        paddle.slide(10_000.0, 800.0);
        assert_eq!(paddle.position.x, 650.0);
    }

    #[test]
    fn test_ball_respawn_timer() {
        let mut ball = GameState::new(&GameConfig::default()).ball;
        ball.go_out(Duration::from_millis(500));
        assert!(ball.is_waiting());
        assert_eq!(ball.velocity, Vec2::ZERO);
        assert!(!ball.ready_to_respawn(Duration::from_millis(2499)));
        assert!(ball.ready_to_respawn(Duration::from_millis(2500)));
    }

    #[test]
    fn test_reset_bricks() {
        let mut state = GameState::new(&GameConfig::default());
        for brick in &mut state.bricks {
            brick.broken = true;
        }
        assert!(state.all_bricks_broken());
        state.reset_bricks();
        assert_eq!(state.remaining_bricks(), 200);
    }
}
