//! Content domain: data-driven tuning loaded from RON files.

mod data;
mod loader;
#[cfg(test)]
mod tests;

pub use data::{
    AttackSpec, CombatTuning, EnemyKind, EnemyProfile, EnemyRoster, PlayerTuning, TuningFile,
    TuningPowers,
};
pub use loader::{ContentLoadError, load_tuning_file, parse_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::core::SimConfig;

pub const TUNING_PATH: &str = "assets/data/tuning.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<CombatTuning>()
            .init_resource::<EnemyRoster>()
            .register_type::<PlayerTuning>()
            .register_type::<CombatTuning>()
            .register_type::<EnemyRoster>()
            .add_systems(PreStartup, load_tuning_content);
    }
}

/// Load tuning at startup; built-in defaults stay in place if the file is unusable.
fn load_tuning_content(
    mut player: ResMut<PlayerTuning>,
    mut combat: ResMut<CombatTuning>,
    mut roster: ResMut<EnemyRoster>,
    mut config: ResMut<SimConfig>,
) {
    match load_tuning_file(Path::new(TUNING_PATH)) {
        Ok(file) => {
            info!(
                "Loaded tuning v{} from {}",
                file.schema_version, TUNING_PATH
            );
            *player = file.player;
            *combat = file.combat;
            *roster = file.enemies;
            if let Some(seed) = file.seed {
                config.seed = seed;
            }
        }
        Err(e) => {
            warn!("{}; using built-in tuning", e);
        }
    }
}
