//! Combat domain: attack volumes, hit resolution, and enemy behavior.

pub mod ai;
mod attacks;
mod components;
mod resolver;
mod spawn;
mod systems;

pub use ai::{BossBrain, BossVariant, MAX_MINIONS, mirror_multiplier};
pub use attacks::{
    AttackKind, AttackRegistry, AttackVolume, ComboState, VolumeId, VolumeMotion,
    combo_multiplier,
};
pub use components::{
    AiCommand, AiOutput, Corpse, Enemy, EnemyBrain, EnemyState, Minion, PatrolRoute,
    Perception, PlatformLayout, TargetView,
};
pub use resolver::{
    BreakableTarget, Contact, Damageable, Hit, ResolveReport, Target, knockback_vector,
    resolve_hits,
};
pub use spawn::{EnemyBundle, spawn_enemy, spawn_minion};

use bevy::prelude::*;

use crate::combat::systems::{
    advance_attack_volumes, compact_attack_registry, fade_corpses, process_deaths,
    resolve_attack_volumes, tick_enemies,
};
use crate::core::SimSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AttackRegistry>()
            .add_systems(Update, tick_enemies.in_set(SimSet::Enemies))
            .add_systems(
                Update,
                (
                    advance_attack_volumes,
                    resolve_attack_volumes,
                    process_deaths,
                    fade_corpses,
                )
                    .chain()
                    .in_set(SimSet::Combat),
            )
            .add_systems(Update, compact_attack_registry.in_set(SimSet::Cleanup));

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, systems::draw_attack_volumes);
    }
}
