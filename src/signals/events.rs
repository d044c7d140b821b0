//! Signals domain: outbound messages for presentation and progression.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::AttackKind;
use crate::content::EnemyKind;
use crate::core::Health;

/// Everything the simulation tells the outside world about.
///
/// Nothing is required to read these; presentation layers pick what they need.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "signal")]
pub enum GameSignal {
    AttackCommitted { kind: AttackKind, damage: f32 },
    ComboHit { count: u32 },
    ComboReset,
    Jumped { double: bool },
    Dodged { direction: f32 },
    ActorHurt { entity: Entity, amount: f32, hp: f32, max_hp: f32 },
    ActorDied { entity: Entity, position: Vec2, score_value: u32 },
    PlayerDied { lives_left: u32 },
    Respawned,
    GameOver,
    BossIntro { kind: EnemyKind, position: Vec2 },
    BossPhaseChanged { boss: Entity, phase: u8 },
    BossDefeated { boss: Entity, kind: EnemyKind },
    HitStop { duration_ms: f32 },
    KnockOut { position: Vec2 },
    CameraShake { intensity: f32, duration_ms: f32 },
    CameraFlash { duration_ms: f32 },
    BreakableShattered { position: Vec2 },
    PlatformRaised { position: Vec2 },
    ProjectileDeflected { position: Vec2 },
    PickupCollected { position: Vec2 },
}

impl Message for GameSignal {}

impl GameSignal {
    /// Hurt signal carrying the victim's health after the hit.
    pub fn actor_hurt(entity: Entity, amount: f32, health: &Health) -> Self {
        GameSignal::ActorHurt {
            entity,
            amount,
            hp: health.current(),
            max_hp: health.max(),
        }
    }
}

/// Score change, emitted on kills and collectibles.
#[derive(Debug, Clone, Copy)]
pub struct ScoreEvent {
    pub delta: u32,
}

impl Message for ScoreEvent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Ability {
    DoubleJump,
    Sword,
    Tuning,
    /// Unlocks the airborne platform power.
    FullTuning,
}

#[derive(Debug, Clone, Copy)]
pub struct UnlockEvent {
    pub ability: Ability,
}

impl Message for UnlockEvent {}
