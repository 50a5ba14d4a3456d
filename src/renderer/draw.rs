//! Draw-command adapter
//!
//! Turns game state into an ordered list of primitive draw calls. Nothing here
//! depends on the GPU, so frames can be inspected in tests.

use glam::Vec2;

use crate::sim::{GameState, Rect, Rgb};

/// A primitive the backend knows how to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Rgb },
    /// Rasterized with [`circle_spans`]
    CircleOutline { center: Vec2, radius: f32, color: Rgb },
}

pub const PADDLE_COLOR: Rgb = Rgb::WHITE;
pub const BALL_COLOR: Rgb = Rgb::WHITE;

/// Build this frame's draw list: paddle, ball, then intact bricks in field order
pub fn build_frame(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(2 + state.bricks.len());

    commands.push(DrawCommand::FillRect {
        rect: state.paddle.rect(),
        color: PADDLE_COLOR,
    });
    commands.push(DrawCommand::CircleOutline {
        center: state.ball.center,
        radius: state.ball.radius,
        color: BALL_COLOR,
    });
    commands.extend(
        state
            .bricks
            .iter()
            .filter(|b| !b.broken)
            .map(|b| DrawCommand::FillRect {
                rect: b.rect,
                color: b.color,
            }),
    );

    commands
}

/// One horizontal run of pixels, `x_start..=x_end` on row `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}

/// Largest radius [`circle_spans`] rasterizes; bigger radii are clamped
pub const MAX_CIRCLE_RADIUS: f32 = 16_384.0;

/// Midpoint circle rasterization as horizontal scanlines
///
/// Walks one octant and emits four mirrored spans per step. The center is
/// truncated to whole pixels.
pub fn circle_spans(center: Vec2, radius: f32) -> Vec<Span> {
    let cx = center.x as i32;
    let cy = center.y as i32;
    // NaN rounds to 0 and yields nothing
    let r = radius.round().min(MAX_CIRCLE_RADIUS) as i32;
    if r <= 0 {
        return Vec::new();
    }

    let diameter = r * 2;
    let mut x = r - 1;
    let mut y = 0;
    let mut tx = 1;
    let mut ty = 1;
    let mut error = tx - diameter;

    let mut spans = Vec::with_capacity(4 * r as usize);
    while x >= y {
        spans.push(Span { y: cy - y, x_start: cx - x, x_end: cx + x });
        spans.push(Span { y: cy + y, x_start: cx - x, x_end: cx + x });
        spans.push(Span { y: cy - x, x_start: cx - y, x_end: cx + y });
        spans.push(Span { y: cy + x, x_start: cx - y, x_end: cx + y });

        if error <= 0 {
            y += 1;
            error += ty;
            ty += 2;
        }
        if error > 0 {
            x -= 1;
            tx += 2;
            error += tx - diameter;
        }
    }

    spans
}
