//! Core domain: actor state machine, health, hit-stop, and simulation ordering.

mod components;
mod resources;
mod state_machine;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    Combatant, DamageOutcome, GameLayer, Health, Hurtbox, Team, aabb_overlap,
};
pub use resources::{HitStop, SimConfig, SimRng, SimSet, delta_ms, simulation_running};
pub use state_machine::{ActorState, direction_of};

use bevy::prelude::*;

use crate::core::systems::{seed_sim_rng, tick_hit_stop};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>()
            .init_resource::<SimRng>()
            .init_resource::<HitStop>()
            .configure_sets(
                Update,
                (
                    (SimSet::Player, SimSet::Enemies, SimSet::Combat, SimSet::World)
                        .chain()
                        .run_if(simulation_running),
                    SimSet::Cleanup,
                )
                    .chain(),
            )
            .add_systems(Startup, seed_sim_rng)
            .add_systems(First, tick_hit_stop);
    }
}
