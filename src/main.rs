//! Breakout entry point
//!
//! Parses the command line, loads the config and runs the winit event loop.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use breakout::platform::{FrameClock, Key, KeyboardState, WindowConfig, create_window};
use breakout::renderer::{FrameStatus, RenderState, frame_vertices};
use breakout::sim::Size;
use breakout::{GameConfig, Simulation};

#[derive(Parser)]
#[command(name = "breakout")]
#[command(about = "Single-screen paddle and brick arcade game")]
struct Cli {
    /// JSON file overriding the default game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

/// Window, GPU and game state, created once the event loop is running
struct GameWindow {
    window: Arc<Window>,
    render: RenderState,
}

struct App {
    window_config: WindowConfig,
    world: Size,
    sim: Simulation,
    keyboard: KeyboardState,
    clock: FrameClock,
    game: Option<GameWindow>,
    /// First fatal error; reported after the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        let sim = Simulation::new(config);
        let window_config = WindowConfig::from_game(sim.config());
        let world = Size::new(sim.config().window_width, sim.config().window_height);
        Self {
            window_config,
            world,
            sim,
            keyboard: KeyboardState::new(),
            clock: FrameClock::new(),
            game: None,
            error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<GameWindow> {
        let window = create_window(event_loop, &self.window_config)
            .context("Failed to create window")?;
        let render = RenderState::new(window.clone(), self.world)
            .context("Failed to initialize GPU renderer")?;
        Ok(GameWindow { window, render })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    /// One simulation tick and one presented frame
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        let dt = self.clock.tick();
        let input = self.keyboard.tick_input();
        self.sim.step(&input, dt);

        let vertices = frame_vertices(&self.sim.frame());
        if game.render.render_frame(&vertices) == FrameStatus::Fatal {
            self.fail(event_loop, anyhow!("GPU out of memory"));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.is_some() {
            return;
        }
        match self.init_window(event_loop) {
            Ok(game) => self.game = Some(game),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(game) = &self.game {
            game.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(game) = self.game.as_mut() {
                    game.render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::Focused(false) => self.keyboard.clear(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.keyboard.key_down(code),
                        ElementState::Released => self.keyboard.key_up(code),
                    }
                }
                if self.keyboard.is_held(Key::Quit) {
                    log::info!("Escape pressed, exiting");
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("Event loop error")?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Breakout starting...");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
