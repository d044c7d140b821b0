//! Player domain: controller, tuning powers, and plugin wiring.

mod components;
mod controller;
mod events;
mod powers;
mod resources;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    Abilities, AttackCommit, Player, PlayerController, PlayerOutput, PlayerState, PowerAction,
};
pub use controller::PlayerBody;
pub use events::PowerEvent;
pub use powers::{
    POWER_VERTICAL_REACH, deflect_projectiles, in_front, pull_velocity, push_impulse,
};
pub use resources::PlayerInput;

use bevy::prelude::*;

use crate::core::SimSet;
use crate::player::systems::{
    apply_tuning_powers, apply_unlocks, detect_ground, read_player_input, spawn_player,
    tick_player,
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_message::<PowerEvent>()
            .add_systems(Startup, spawn_player)
            .add_systems(Update, read_player_input.before(SimSet::Player))
            .add_systems(
                Update,
                (detect_ground, tick_player, apply_tuning_powers)
                    .chain()
                    .in_set(SimSet::Player),
            )
            // Unlocks must not wait out a hit-stop or the message expires
            .add_systems(Update, apply_unlocks.in_set(SimSet::Cleanup));
    }
}
