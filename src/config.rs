//! Game configuration
//!
//! Every tunable constant of the game, loadable from a JSON file. Fields left
//! out of the file keep their defaults from [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rgb;

/// Row colors of the default brick field, top row first
pub const DEFAULT_PALETTE: [Rgb; 10] = [
    Rgb::new(230, 57, 70),
    Rgb::new(244, 132, 55),
    Rgb::new(252, 196, 63),
    Rgb::new(168, 218, 72),
    Rgb::new(72, 199, 116),
    Rgb::new(58, 190, 180),
    Rgb::new(69, 160, 230),
    Rgb::new(90, 110, 230),
    Rgb::new(150, 90, 220),
    Rgb::new(214, 90, 190),
];

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(std::io::Error),
    /// File is not valid config JSON
    Parse(serde_json::Error),
    /// Values parsed but do not describe a playable game
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,

    // === Paddle ===
    pub paddle_width: u32,
    pub paddle_height: u32,
    /// Pixels per frame while a direction key is held
    pub paddle_speed: f32,
    pub paddle_bottom_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Pixels per frame
    pub ball_speed: f32,
    /// Shallowest paddle bounce, degrees from horizontal
    pub bounce_angle_floor_deg: f32,
    pub respawn_delay_ms: u64,

    // === Bricks ===
    pub brick_columns: u32,
    pub brick_rows: u32,
    pub brick_width: u32,
    pub brick_height: u32,
    /// y of the top row's upper edge
    pub brick_field_top: f32,
    /// Row colors, cycled when there are more rows than entries
    pub palette: Vec<Rgb>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            bounce_angle_floor_deg: BOUNCE_ANGLE_FLOOR_DEG,
            respawn_delay_ms: RESPAWN_DELAY_MS,

            brick_columns: BRICK_COLUMNS,
            brick_rows: BRICK_ROWS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_field_top: BRICK_FIELD_TOP,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pretty JSON for `--print-config`
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn respawn_delay(&self) -> Duration {
        Duration::from_millis(self.respawn_delay_ms)
    }

    /// Reject values that would make the game unplayable or break invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        if self.window_width == 0 || self.window_height == 0 {
            return invalid(format!(
                "window size must be non-zero (got {}x{})",
                self.window_width, self.window_height
            ));
        }
        if self.window_width > MAX_WINDOW_SIDE || self.window_height > MAX_WINDOW_SIDE {
            return invalid(format!(
                "window size {}x{} exceeds {MAX_WINDOW_SIDE}x{MAX_WINDOW_SIDE}",
                self.window_width, self.window_height
            ));
        }
        if self.paddle_width == 0 || self.paddle_height == 0 {
            return invalid("paddle size must be non-zero".to_string());
        }
        if self.paddle_width > self.window_width {
            return invalid(format!(
                "paddle width {} exceeds window width {}",
                self.paddle_width, self.window_width
            ));
        }
        if !(self.paddle_speed.is_finite() && self.paddle_speed > 0.0) {
            return invalid(format!("paddle speed must be positive (got {})", self.paddle_speed));
        }
        if !(self.paddle_bottom_margin.is_finite() && self.paddle_bottom_margin >= 0.0) {
            return invalid("paddle bottom margin must be non-negative".to_string());
        }
        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            return invalid(format!("ball radius must be positive (got {})", self.ball_radius));
        }
        let shorter_side = self.window_width.min(self.window_height) as f32;
        if self.ball_radius >= shorter_side / 2.0 {
            return invalid(format!(
                "ball radius {} does not fit a {}x{} window",
                self.ball_radius, self.window_width, self.window_height
            ));
        }
        if !(self.ball_speed.is_finite() && self.ball_speed > 0.0) {
            return invalid(format!("ball speed must be positive (got {})", self.ball_speed));
        }
        if !(self.bounce_angle_floor_deg > 0.0 && self.bounce_angle_floor_deg < 90.0) {
            return invalid(format!(
                "bounce angle floor must be between 0 and 90 degrees (got {})",
                self.bounce_angle_floor_deg
            ));
        }
        if self.brick_width == 0 || self.brick_height == 0 {
            return invalid("brick size must be non-zero".to_string());
        }
        if !(self.brick_field_top.is_finite() && self.brick_field_top >= 0.0) {
            return invalid("brick field top must be non-negative".to_string());
        }
        // u64 so oversized grids are reported instead of overflowing
        let field_width = u64::from(self.brick_columns) * u64::from(self.brick_width);
        if field_width > u64::from(self.window_width) {
            return invalid(format!(
                "{} columns of {}px bricks exceed window width {}",
                self.brick_columns, self.brick_width, self.window_width
            ));
        }
        let field_height = u64::from(self.brick_rows) * u64::from(self.brick_height);
        if self.brick_field_top as f64 + field_height as f64 > f64::from(self.window_height) {
            return invalid(format!(
                "{} rows of {}px bricks starting at y={} exceed window height {}",
                self.brick_rows, self.brick_height, self.brick_field_top, self.window_height
            ));
        }
        if self.brick_rows > 0 && self.palette.is_empty() {
            return invalid("palette must have at least one color".to_string());
        }
        Ok(())
    }
}
