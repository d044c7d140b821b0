//! Player domain: the logical input the controller consumes.

use bevy::prelude::*;

/// Debounced input for one frame. Devices are mapped onto this elsewhere.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub left_just_pressed: bool,
    pub right_just_pressed: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub run_held: bool,
    pub punch_pressed: bool,
    pub kick_pressed: bool,
    pub sword_pressed: bool,
    pub dodge_held: bool,
    pub tuning_held: bool,
    pub tuning_pressed: bool,
}

impl PlayerInput {
    /// -1, 0 or +1 from the horizontal keys.
    pub fn axis_x(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
