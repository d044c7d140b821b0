//! Signals domain: outbound signal queue, score, and ability unlocks.

mod events;
#[cfg(test)]
mod tests;

pub use events::{Ability, GameSignal, ScoreEvent, UnlockEvent};

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use std::collections::HashSet;

use crate::core::SimSet;

/// Running totals that outlive individual actors.
#[derive(Resource, Debug, Default)]
pub struct Progress {
    pub score: u64,
    pub unlocked: HashSet<Ability>,
}

impl Progress {
    pub fn add_score(&mut self, delta: u32) {
        self.score += u64::from(delta);
    }

    /// Returns false when the ability was already unlocked.
    pub fn unlock(&mut self, ability: Ability) -> bool {
        self.unlocked.insert(ability)
    }
}

pub struct SignalsPlugin;

impl Plugin for SignalsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Progress>()
            .add_message::<GameSignal>()
            .add_message::<ScoreEvent>()
            .add_message::<UnlockEvent>()
            .add_systems(
                Update,
                (tally_score, record_unlocks).in_set(SimSet::Cleanup),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, trace_signals.in_set(SimSet::Cleanup));
    }
}

fn tally_score(mut events: MessageReader<ScoreEvent>, mut progress: ResMut<Progress>) {
    for event in events.read() {
        progress.add_score(event.delta);
        debug!("Score +{} -> {}", event.delta, progress.score);
    }
}

fn record_unlocks(mut events: MessageReader<UnlockEvent>, mut progress: ResMut<Progress>) {
    for event in events.read() {
        if progress.unlock(event.ability) {
            info!("Unlocked {:?}", event.ability);
        }
    }
}

/// Dev tooling: one JSON line per signal at debug level.
#[cfg(feature = "dev-tools")]
fn trace_signals(mut signals: MessageReader<GameSignal>, time: Res<Time>) {
    for signal in signals.read() {
        match serde_json::to_value(signal) {
            Ok(value) => {
                let record = serde_json::json!({ "t": time.elapsed_secs(), "signal": value });
                debug!(target: "midnight_brawler::signals", "{}", record);
            }
            Err(err) => warn!("Could not serialize {:?}: {}", signal, err),
        }
    }
}
