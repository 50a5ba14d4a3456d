//! Window creation

use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::config::GameConfig;

pub const WINDOW_TITLE: &str = "Breakout";

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl WindowConfig {
    pub fn from_game(config: &GameConfig) -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: config.window_width,
            height: config.window_height,
        }
    }

    /// Fixed-size window; the playfield does not scale
    pub fn attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(false)
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &WindowConfig,
) -> Result<Arc<Window>, OsError> {
    let window = event_loop.create_window(config.attributes())?;
    log::info!("Window created: {}x{}", config.width, config.height);
    Ok(Arc::new(window))
}
