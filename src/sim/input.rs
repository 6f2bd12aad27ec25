//! Directional input tracking
//!
//! Keeps the set of held directions in press order so releasing one key
//! while another is still held resumes motion in the held direction.

use serde::{Deserialize, Serialize};

use crate::consts::{ARROW_LEFT, ARROW_RIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            ARROW_LEFT => Some(Direction::Left),
            ARROW_RIGHT => Some(Direction::Right),
            _ => None,
        }
    }

    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Held directions, most recent last
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeldDirections {
    order: Vec<Direction>,
}

impl HeldDirections {
    /// Record a press; a repeated press (key auto-repeat) moves it to the back
    pub fn press(&mut self, direction: Direction) {
        self.order.retain(|d| *d != direction);
        self.order.push(direction);
    }

    pub fn release(&mut self, direction: Direction) {
        self.order.retain(|d| *d != direction);
    }

    /// The direction that should drive the paddle now
    pub fn current(&self) -> Option<Direction> {
        self.order.last().copied()
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.order.contains(&direction)
    }
}
