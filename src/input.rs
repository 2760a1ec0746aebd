//! Per-frame input snapshot handed to the simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Movement keys held during the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementKeys {
    /// Walk along the look direction.
    pub forward: bool,
    /// Walk against the look direction.
    pub backward: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
}

/// Discrete input that happened since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Primary button pressed: fire a standard shot.
    PrimaryFire,
    /// Secondary button pressed: start aiming.
    AimPressed,
    /// Secondary button released: fire a sniper shot if aiming.
    AimReleased,
    /// Jump key went down. Two presses in quick succession climb a building.
    JumpPressed,
}

/// Everything the simulation reads from the player in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    /// Held movement keys.
    pub keys: MovementKeys,
    /// Whether the jump key is held.
    pub jump: bool,
    /// Camera look direction.
    pub look: Vec3,
    /// Discrete events in the order they happened.
    pub events: Vec<InputEvent>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            keys: MovementKeys::default(),
            jump: false,
            look: Vec3::NEG_Z,
            events: Vec::new(),
        }
    }
}

impl FrameInput {
    /// Input that only looks in `look`.
    #[must_use]
    pub fn looking(look: Vec3) -> Self {
        Self {
            look,
            ..Self::default()
        }
    }

    /// Adds a discrete event.
    #[must_use]
    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let input: FrameInput =
            serde_json::from_str(r#"{"keys": {"forward": true}, "events": ["PrimaryFire"]}"#)
                .expect("valid frame input");
        assert!(input.keys.forward);
        assert!(!input.keys.left);
        assert_eq!(input.look, Vec3::NEG_Z);
        assert_eq!(input.events, vec![InputEvent::PrimaryFire]);
    }
}
