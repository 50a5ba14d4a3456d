//! Desktop platform layer
//!
//! Keyboard state, frame timing and window creation on top of winit.

pub mod clock;
pub mod input;
pub mod window;

pub use clock::{FrameClock, MAX_FRAME_DELTA, cap_frame_delta};
pub use input::{Key, KeyboardState, bindings};
pub use window::{WindowConfig, create_window};
