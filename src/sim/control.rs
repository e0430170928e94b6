//! Keyboard steering for the ball

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One steering command (one key press)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value (WASD or arrows)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Control::Up),
            "ArrowDown" => Some(Control::Down),
            "ArrowLeft" => Some(Control::Left),
            "ArrowRight" => Some(Control::Right),
            _ => match key.to_ascii_lowercase().as_str() {
                "w" => Some(Control::Up),
                "s" => Some(Control::Down),
                "a" => Some(Control::Left),
                "d" => Some(Control::Right),
                _ => None,
            },
        }
    }

    /// Unit vector in screen space (y grows downward)
    pub fn direction(&self) -> Vec2 {
        match self {
            Control::Up => Vec2::NEG_Y,
            Control::Down => Vec2::Y,
            Control::Left => Vec2::NEG_X,
            Control::Right => Vec2::X,
        }
    }

    /// Nudge `velocity` by `step`, keeping each axis within `max_velocity`
    pub fn apply(&self, velocity: Vec2, step: f32, max_velocity: f32) -> Vec2 {
        let max = Vec2::splat(max_velocity.abs());
        (velocity + self.direction() * step).clamp(-max, max)
    }
}
