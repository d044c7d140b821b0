//! Core domain: components shared by the player and enemies.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors, ledges, and raised platforms
    Ground,
    Player,
    Enemy,
    /// Crates and other props a hit or a charge can shatter
    Breakable,
    /// Hazards and pickups, never blocking
    Sensor,
}

/// What happened when damage was offered to a [`Health`] pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The actor was already dead or the amount was not positive.
    Ignored,
    Damaged,
    /// This hit brought the actor to zero. Reported once per life.
    Lethal,
}

impl DamageOutcome {
    pub fn landed(self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Health pool clamped to `0..=max` with a one-way death latch.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
    dead: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(1.0);
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn ratio(&self) -> f32 {
        self.current / self.max
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead || amount <= 0.0 {
            return DamageOutcome::Ignored;
        }
        self.current = (self.current - amount).max(0.0);
        if self.current <= 0.0 {
            self.dead = true;
            DamageOutcome::Lethal
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Returns the amount actually restored. The dead stay dead.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.dead || amount <= 0.0 {
            return 0.0;
        }
        let actual = amount.min(self.max - self.current);
        self.current += actual;
        actual
    }

    /// Only the player comes back, and only through a respawn.
    pub fn revive(&mut self) {
        self.current = self.max;
        self.dead = false;
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opposing(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }
}

/// Static combat stats of an actor.
#[derive(Component, Debug, Clone, Copy)]
pub struct Combatant {
    /// Divisor applied to incoming knockback, at least 1.
    pub knockback_resist: f32,
    /// Score awarded when this actor dies.
    pub score_value: u32,
}

impl Default for Combatant {
    fn default() -> Self {
        Self {
            knockback_resist: 1.0,
            score_value: 0,
        }
    }
}

/// Axis-aligned body that attack volumes test against, centered on the transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hurtbox {
    pub half_size: Vec2,
}

impl Hurtbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_size: Vec2::new(width * 0.5, height * 0.5),
        }
    }
}

/// Axis-aligned overlap test between two center/half-extent boxes.
pub fn aabb_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    (a_center.x - b_center.x).abs() < a_half.x + b_half.x
        && (a_center.y - b_center.y).abs() < a_half.y + b_half.y
}
