//! Held-key state and key bindings
//!
//! Input handlers only flip flags here; the next tick reads whatever is held
//! at that moment. There is no event queue.

use serde::{Deserialize, Serialize};

/// Currently held controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub firing: bool,
}

/// Recognized bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
    Reset,
}

impl Key {
    /// Classify a browser key identifier (`KeyboardEvent.key` or `.code`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "d" | "D" | "KeyD" => Some(Key::Right),
            " " | "Space" | "Spacebar" => Some(Key::Fire),
            "r" | "R" | "KeyR" => Some(Key::Reset),
            _ => None,
        }
    }
}

impl InputState {
    /// -1, 0 or +1; both directions held cancel out
    pub fn direction(&self) -> f32 {
        let mut dir = 0.0;
        if self.move_left {
            dir -= 1.0;
        }
        if self.move_right {
            dir += 1.0;
        }
        dir
    }

    /// Apply a key press. Returns true if the press asks for a reset.
    pub fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Left => self.move_left = true,
            Key::Right => self.move_right = true,
            Key::Fire => self.firing = true,
            Key::Reset => return true,
        }
        false
    }

    /// Apply a key release
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.move_left = false,
            Key::Right => self.move_right = false,
            Key::Fire => self.firing = false,
            Key::Reset => {}
        }
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("A"), Some(Key::Left));
        assert_eq!(Key::from_name("d"), Some(Key::Right));
        assert_eq!(Key::from_name(" "), Some(Key::Fire));
        assert_eq!(Key::from_name("Space"), Some(Key::Fire));
        assert_eq!(Key::from_name("R"), Some(Key::Reset));
        assert_eq!(Key::from_name("q"), None);
    }

    #[test]
    fn test_direction_cancels() {
        let mut input = InputState::default();
        assert_eq!(input.direction(), 0.0);
        input.key_down(Key::Left);
        assert_eq!(input.direction(), -1.0);
        input.key_down(Key::Right);
        assert_eq!(input.direction(), 0.0);
        input.key_up(Key::Left);
        assert_eq!(input.direction(), 1.0);
    }

    #[test]
    fn test_reset_is_not_a_held_key() {
        let mut input = InputState::default();
        assert!(input.key_down(Key::Reset));
        assert!(!input.key_down(Key::Fire));
        assert_eq!(
            input,
            InputState {
                firing: true,
                ..Default::default()
            }
        );
        input.clear();
        assert_eq!(input, InputState::default());
    }
}
