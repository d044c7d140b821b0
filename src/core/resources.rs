//! Core domain: simulation-wide resources and schedule ordering.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fixed per-frame order of the simulation.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Player,
    Enemies,
    Combat,
    World,
    /// Always runs, even during hit-stop.
    Cleanup,
}

#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// The only source of randomness the simulation draws from.
#[derive(Resource, Debug)]
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform draw in `[low, high)`; a degenerate range returns `low`.
    pub fn range(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.0.random_range(low..high)
    }

    pub fn coin_flip(&mut self) -> bool {
        self.0.random_bool(0.5)
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed(SimConfig::default().seed)
    }
}

/// Short global freeze after impactful hits.
///
/// A new request replaces whatever is pending instead of stacking on top of it.
/// Requests take effect from the next frame, so the frame that asked for the
/// freeze finishes in one piece.
#[derive(Resource, Debug, Default)]
pub struct HitStop {
    remaining_ms: f32,
    frozen: bool,
    /// Set by `start` until the freeze latches, so its first frame is not charged.
    latching: bool,
}

impl HitStop {
    pub const MAX_MS: f32 = 200.0;

    pub fn start(&mut self, duration_ms: f32) {
        if duration_ms <= 0.0 {
            return;
        }
        self.remaining_ms = duration_ms.min(Self::MAX_MS);
        self.latching = true;
    }

    /// Returns true on the tick the freeze ends.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.remaining_ms <= 0.0 {
            return false;
        }
        self.remaining_ms -= dt_ms;
        if self.remaining_ms <= 0.0 {
            self.remaining_ms = 0.0;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    /// Tick at frame start and latch whether this frame is frozen.
    pub fn begin_frame(&mut self, dt_ms: f32) -> bool {
        // The delta belongs to the frame that requested the freeze
        let released = if std::mem::take(&mut self.latching) {
            false
        } else {
            self.tick(dt_ms)
        };
        self.frozen = self.is_active();
        released
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }
}

/// Run condition: the simulation advances only on frames not frozen by hit-stop.
pub fn simulation_running(hit_stop: Res<HitStop>) -> bool {
    !hit_stop.is_frozen()
}

/// Frame delta in milliseconds, the unit every gameplay timer uses.
pub fn delta_ms(time: &Time) -> f32 {
    time.delta_secs() * 1000.0
}
