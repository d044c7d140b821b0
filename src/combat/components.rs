//! Combat domain: enemy components and the AI's view of the world.

use bevy::prelude::*;

use crate::combat::ai::boss::BossBrain;
use crate::combat::attacks::AttackKind;
use crate::content::{EnemyKind, EnemyProfile};
use crate::core::ActorState;

/// Marks an entity as an enemy
#[derive(Component, Debug)]
pub struct Enemy;

/// Grunt spawned by a boss; counted against the summon cap.
#[derive(Component, Debug)]
pub struct Minion {
    pub summoner: Entity,
}

/// Dead body waiting to be removed.
#[derive(Component, Debug)]
pub struct Corpse {
    pub remaining_ms: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyState {
    Idle,
    Patrol,
    Alert,
    Chase,
    Attack,
    Hurt,
    Dead,
    // Boss states
    Intro,
    PhaseTransition,
    Stunned,
    ChargeWindup,
    Charge,
    Teleport,
    Taunt,
    Lunge,
    Mirror,
    TuningAttack,
    Retreat,
    Summon,
    RangedSpread,
    Hurl,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolRoute {
    pub min_x: f32,
    pub max_x: f32,
    pub direction: f32,
}

/// Behavior state of one enemy. Bosses carry an extra [`BossBrain`].
#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    pub fsm: ActorState<EnemyState>,
    pub kind: EnemyKind,
    pub profile: EnemyProfile,
    pub patrol: PatrolRoute,
    /// Drawn on first use so spawn-time idles vary too.
    pub(crate) idle_wait_ms: Option<f32>,
    pub(crate) strike_landed: bool,
    pub boss: Option<BossBrain>,
    /// Commands raised outside a tick (phase changes on hit), flushed on the next tick.
    pub(crate) deferred: Vec<AiCommand>,
}

/// Where the player is and what they are doing, as seen by one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub position: Vec2,
    pub alive: bool,
    pub crouching: bool,
    pub facing_right: bool,
    /// Attack the target committed this tick, if any.
    pub attack_started: Option<AttackKind>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub position: Vec2,
    pub health_ratio: f32,
    /// A wall or ledge blocks movement in the facing direction.
    pub blocked: bool,
    pub target: Option<TargetView>,
    /// Nearest other grunt close enough to coordinate with.
    pub nearby_ally: Option<Vec2>,
    pub live_minions: usize,
}

impl Perception {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            health_ratio: 1.0,
            blocked: false,
            target: None,
            nearby_ally: None,
            live_minions: 0,
        }
    }

    /// The target, but only while it is alive.
    pub fn live_target(&self) -> Option<&TargetView> {
        self.target.as_ref().filter(|t| t.alive)
    }

    pub fn distance_to_target(&self) -> f32 {
        self.live_target()
            .map(|t| t.position.distance(self.position))
            .unwrap_or(f32::INFINITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformLayout {
    /// Five fixed ledges around the arena floor.
    Static,
    /// Six drifting platforms for the airborne finale.
    Sky,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AiCommand {
    /// Melee damage straight to the target.
    Strike {
        damage: f32,
        knockback: Option<Vec2>,
    },
    Fire {
        velocity: Vec2,
        damage: f32,
        lifetime_ms: f32,
        kind: AttackKind,
        deflectable: bool,
    },
    Reposition(Vec2),
    Summon {
        x: f32,
    },
    /// Shatter breakables within `reach` of this enemy's edges.
    SmashBreakables {
        reach: f32,
    },
    RaisePlatforms(PlatformLayout),
    Levitate(bool),
    PhaseChanged(u8),
    CameraShake {
        intensity: f32,
        duration_ms: f32,
    },
    CameraFlash {
        duration_ms: f32,
    },
}

/// Everything one AI tick wants to happen.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AiOutput {
    pub velocity_x: Option<f32>,
    pub velocity_y: Option<f32>,
    pub commands: Vec<AiCommand>,
}

impl AiOutput {
    pub fn push(&mut self, command: AiCommand) {
        self.commands.push(command);
    }

    pub fn halt(&mut self) {
        self.velocity_x = Some(0.0);
    }
}
