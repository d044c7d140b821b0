//! World domain: markers for arena geometry and collectibles.

use bevy::prelude::*;
use std::f32::consts::TAU;

/// Crate or wall segment that player attacks shatter.
#[derive(Component, Debug, Clone, Copy)]
pub struct Breakable {
    pub half_size: Vec2,
}

/// Damages the player on contact, rate limited.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    pub half_size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Health,
    Energy,
    /// Collectible worth score only.
    Memory,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: PickupKind,
    pub half_size: Vec2,
}

/// Loose object the tuning push and pull can move.
#[derive(Component, Debug)]
pub struct Pushable;

/// Short-lived ledge raised by the player's tuning power.
#[derive(Component, Debug)]
pub struct TuningPlatform {
    pub remaining_ms: f32,
}

/// Ledge raised by a boss phase change.
#[derive(Component, Debug)]
pub struct ArenaPlatform;

/// Horizontal sine drift for sky platforms.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SkyDrift {
    pub amplitude: f32,
    pub period_ms: f32,
    pub elapsed_ms: f32,
}

impl SkyDrift {
    pub fn new(amplitude: f32, period_ms: f32, phase_ms: f32) -> Self {
        Self {
            amplitude,
            period_ms: period_ms.max(1.0),
            elapsed_ms: phase_ms,
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms) % self.period_ms;
    }

    /// Velocity along the drift, in units per second.
    pub fn velocity_x(&self) -> f32 {
        let omega = TAU / (self.period_ms / 1000.0);
        let t = self.elapsed_ms / 1000.0;
        self.amplitude * omega * (omega * t).cos()
    }
}
