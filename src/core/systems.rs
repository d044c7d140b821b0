//! Core domain: hit-stop clock and simulation seeding.

use bevy::prelude::*;

use crate::core::resources::{HitStop, SimConfig, SimRng};

pub(crate) fn seed_sim_rng(config: Res<SimConfig>, mut rng: ResMut<SimRng>) {
    *rng = SimRng::from_seed(config.seed);
    info!("Simulation seeded with {}", config.seed);
}

/// Hit-stop runs on real time so the frozen virtual clock can still thaw.
pub(crate) fn tick_hit_stop(
    real_time: Res<Time<Real>>,
    mut hit_stop: ResMut<HitStop>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    if hit_stop.begin_frame(real_time.delta_secs() * 1000.0) {
        debug!("Hit-stop released");
    }
    if hit_stop.is_frozen() {
        if !virtual_time.is_paused() {
            virtual_time.pause();
        }
    } else if virtual_time.is_paused() {
        virtual_time.unpause();
    }
}
