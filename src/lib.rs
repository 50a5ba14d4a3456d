//! Breakout - a single-screen paddle and brick arcade game
//!
//! Core modules:
//! - `sim`: Headless simulation (collision, entities, per-frame update)
//! - `renderer`: Draw-command adapter and wgpu rendering pipeline
//! - `platform`: Window, keyboard and frame clock plumbing over winit
//! - `config`: Data-driven game constants loaded from JSON

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use sim::{GameEvent, GameState, Simulation, TickInput};

/// Default game constants (all overridable through [`GameConfig`])
pub mod consts {
    /// Window dimensions in pixels
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 600;
    /// Largest window side a config may ask for
    pub const MAX_WINDOW_SIDE: u32 = 8192;

    /// Paddle defaults
    pub const PADDLE_WIDTH: u32 = 150;
    pub const PADDLE_HEIGHT: u32 = 10;
    /// Horizontal movement per frame while a direction key is held
    pub const PADDLE_SPEED: f32 = 15.0;
    /// Gap between the paddle's bottom edge and the window's bottom edge
    pub const PADDLE_BOTTOM_MARGIN: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Per-axis speed on respawn, and total speed after a paddle bounce
    pub const BALL_SPEED: f32 = 7.0;
    /// Shallowest angle (from horizontal) the paddle can send the ball at
    pub const BOUNCE_ANGLE_FLOOR_DEG: f32 = 10.0;
    pub const RESPAWN_DELAY_MS: u64 = 2000;

    /// Brick field layout
    pub const BRICK_COLUMNS: u32 = 20;
    pub const BRICK_ROWS: u32 = 10;
    pub const BRICK_WIDTH: u32 = 40;
    pub const BRICK_HEIGHT: u32 = 15;
    pub const BRICK_FIELD_TOP: f32 = 50.0;

    /// Background clear color
    pub const BACKGROUND: (u8, u8, u8) = (26, 16, 46);
}
