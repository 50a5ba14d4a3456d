//! Headless simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the window,
//! the GPU or the wall clock:
//! - One `tick` per displayed frame
//! - Time only enters through the `dt` argument
//! - Bricks are scanned in a stable (row-major) order

pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

use std::time::Duration;

pub use collision::{CollisionEdge, circle_intersects_rect, classify_collision_edge};
pub use geometry::{Rect, Size};
pub use state::{Ball, BallState, Brick, GameState, Paddle, Rgb, build_brick_field};
pub use tick::{GameEvent, TickInput, Wall, bounce_velocity, paddle_hit_factor, tick};

use crate::config::GameConfig;
use crate::renderer::draw::{DrawCommand, build_frame};

/// Owns the game state and the config it was built from
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
    state: GameState,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        log::info!(
            "New game: {}x{} arena, {} bricks",
            state.arena.width,
            state.arena.height,
            state.bricks.len()
        );
        Self { config, state }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for tests and debug tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Run one frame and log what happened
    pub fn step(&mut self, input: &TickInput, dt: Duration) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, dt);
        for event in &events {
            self.log_event(event);
        }
        events
    }

    /// Start over with a full field and the ball above the paddle
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config);
        log::info!("Game reset");
    }

    /// Draw commands for the current state
    pub fn frame(&self) -> Vec<DrawCommand> {
        build_frame(&self.state)
    }

    fn log_event(&self, event: &GameEvent) {
        match *event {
            GameEvent::BrickBroken { index, edge } => {
                let (row, column) = self.state.brick_cell(index);
                log::trace!(
                    "Brick ({row}, {column}) broken on {edge:?} edge, {} left",
                    self.state.remaining_bricks()
                );
            }
            GameEvent::PaddleHit { hit_factor } => {
                log::trace!("Paddle hit at {hit_factor:+.2}");
            }
            GameEvent::WallBounce { wall } => log::trace!("Wall bounce: {wall:?}"),
            GameEvent::BallLost => log::debug!(
                "Ball lost at {:.1}s, respawning in {}ms",
                self.state.clock.as_secs_f32(),
                self.state.ball.respawn_delay.as_millis()
            ),
            GameEvent::BallRespawned => log::debug!("Ball respawned"),
            GameEvent::FieldReset => log::info!("All bricks cleared, field reset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_step_and_reset() {
        let mut sim = Simulation::new(GameConfig::default());
        let start = sim.state().ball.center;

        sim.step(&TickInput::default(), Duration::from_millis(16));
        assert_ne!(sim.state().ball.center, start);
        assert_eq!(sim.state().frame, 1);

        sim.state_mut().bricks[0].broken = true;
        sim.reset();
        assert_eq!(sim.state().frame, 0);
        assert_eq!(sim.state().ball.center, start);
        assert_eq!(sim.state().remaining_bricks(), 200);
    }

    #[test]
    fn test_simulation_uses_config() {
        let config = GameConfig {
            window_width: 400,
            paddle_width: 100,
            brick_columns: 10,
            ..GameConfig::default()
        };
        let mut sim = Simulation::new(config);
        for _ in 0..50 {
            sim.step(
                &TickInput { left: false, right: true },
                Duration::from_millis(16),
            );
        }
        assert_eq!(sim.state().paddle.position.x, 300.0);
        assert_eq!(sim.state().bricks.len(), 100);
        assert_eq!(sim.config().window_width, 400);
        // Reset rebuilds from the stored config, not the defaults
        sim.reset();
        assert_eq!(sim.state().arena.width, 400);
        assert_eq!(sim.state().bricks.len(), 100);
    }

    #[test]
    fn test_frame_matches_state() {
        let sim = Simulation::new(GameConfig::default());
        // Paddle + ball + every brick
        assert_eq!(sim.frame().len(), 202);
    }

    #[test]
    fn test_long_run_keeps_invariants() {
        let mut sim = Simulation::new(GameConfig::default());
        let inputs = [
            TickInput { left: true, right: false },
            TickInput::default(),
            TickInput { left: false, right: true },
        ];

        for i in 0..5_000 {
            let input = inputs[(i / 37) % inputs.len()];
            let before = sim.state().remaining_bricks();
            sim.step(&input, Duration::from_millis(16));
            let state = sim.state();

            assert!((0.0..=650.0).contains(&state.paddle.position.x));
            assert!(state.remaining_bricks() + 1 >= before || state.remaining_bricks() == 200);
            if state.ball.is_flying() {
                assert!(state.ball.center.x >= 0.0 && state.ball.center.x <= 800.0);
            }
        }
    }
}
