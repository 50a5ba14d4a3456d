//! Level-triggered keyboard state
//!
//! The window layer feeds raw key transitions in; the game reads which keys are
//! held once per frame. Each action can be bound to several physical keys.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::sim::TickInput;

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Quit,
}

/// Physical keys bound to each action
pub fn bindings(key: Key) -> &'static [KeyCode] {
    match key {
        Key::Left => &[KeyCode::ArrowLeft, KeyCode::KeyA],
        Key::Right => &[KeyCode::ArrowRight, KeyCode::KeyD],
        Key::Quit => &[KeyCode::Escape],
    }
}

#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: KeyCode) {
        self.held.insert(code);
    }

    pub fn key_up(&mut self, code: KeyCode) {
        self.held.remove(&code);
    }

    /// Release everything (window lost focus, so key-up events may never arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Whether any key bound to `key` is down
    pub fn is_held(&self, key: Key) -> bool {
        bindings(key).iter().any(|code| self.held.contains(code))
    }

    /// Snapshot for one simulation tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
        }
    }
}
