//! Player domain: the controller component and what one tick produces.

use bevy::prelude::*;

use crate::combat::{AttackKind, ComboState};
use crate::core::ActorState;
use crate::signals::GameSignal;

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Normal,
    Attacking,
    Dodging,
    Hurt,
    Dead,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Abilities {
    pub double_jump: bool,
    pub sword: bool,
    pub tuning: bool,
    pub full_tuning: bool,
}

/// Player mechanics: every timer and flag one player needs between ticks.
#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    pub fsm: ActorState<PlayerState>,
    pub abilities: Abilities,
    pub lives: u32,
    pub combo: ComboState,
    pub energy: f32,
    pub(crate) on_ground: bool,
    pub(crate) airborne_ms: f32,
    pub(crate) jumped_since_ground: bool,
    pub(crate) jump_buffer_age_ms: Option<f32>,
    pub(crate) jump_hold_ms: Option<f32>,
    pub(crate) air_jump_used: bool,
    pub(crate) crouching: bool,
    pub(crate) attack_kind: Option<AttackKind>,
    pub(crate) attack_duration_ms: f32,
    pub(crate) dodge_dir: f32,
    pub(crate) since_dodge_ms: f32,
    pub(crate) invincible_ms: f32,
    pub(crate) since_damage_ms: f32,
    pub(crate) respawn_ms: Option<f32>,
    pub(crate) death_reported: bool,
    pub(crate) game_over: bool,
    pub(crate) attack_started: Option<AttackKind>,
    pub(crate) tuning_active: bool,
}

/// One attack the controller wants spawned this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackCommit {
    pub kind: AttackKind,
    pub damage: f32,
    pub offset: Vec2,
    pub size: Vec2,
    pub duration_ms: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerAction {
    /// Shove enemies and pushables away while held.
    Push { direction: f32, dt_ms: f32 },
    /// Drag pushables toward the player while held.
    Pull { direction: f32 },
    Deflect { direction: f32 },
    RaisePlatform { offset: Vec2 },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerOutput {
    pub commits: Vec<AttackCommit>,
    pub powers: Vec<PowerAction>,
    pub signals: Vec<GameSignal>,
    pub respawned: bool,
}
