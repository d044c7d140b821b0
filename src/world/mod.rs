//! World domain: arena geometry, bounds, hazards, pickups, and boss encounters.

mod components;
mod events;
mod layout;
mod resources;
pub(crate) mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    ArenaPlatform, Breakable, Hazard, Pickup, PickupKind, Pushable, SkyDrift, TuningPlatform,
};
pub use events::ArenaCommand;
pub use layout::{LEDGE_SIZE, PlatformPlacement, platform_placements};
pub use resources::{BossEncounter, Checkpoint, HazardCooldown, WorldBounds};

use bevy::prelude::*;

use crate::core::SimSet;
use crate::world::systems::{
    apply_hazards, check_world_bounds, collect_pickups, finish_boss_encounter,
    handle_arena_commands, spawn_training_arena, tick_platforms, trigger_boss_encounter,
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldBounds>()
            .init_resource::<Checkpoint>()
            .init_resource::<HazardCooldown>()
            .init_resource::<BossEncounter>()
            .add_message::<ArenaCommand>()
            .add_systems(Startup, spawn_training_arena)
            .add_systems(
                Update,
                (
                    trigger_boss_encounter,
                    handle_arena_commands,
                    check_world_bounds,
                    apply_hazards,
                    collect_pickups,
                    tick_platforms,
                    finish_boss_encounter,
                )
                    .chain()
                    .in_set(SimSet::World),
            );
    }
}
