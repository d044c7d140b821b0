//! World domain: arena bounds, checkpoint, and the boss encounter.

use bevy::prelude::*;

use crate::content::EnemyKind;
use crate::signals::Ability;

#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldBounds {
    /// Anything below this height has fallen out of the arena.
    pub kill_y: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self { kill_y: -400.0 }
    }
}

/// Where the player reappears after a fall or a death.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Checkpoint {
    pub position: Vec2,
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self {
            position: Vec2::new(-300.0, 40.0),
        }
    }
}

/// Time until the next hazard contact may hurt the player.
#[derive(Resource, Debug, Default)]
pub struct HazardCooldown {
    pub remaining_ms: f32,
}

/// One scripted boss fight: trigger line, spawn point, and rewards.
#[derive(Resource, Debug, Clone)]
pub struct BossEncounter {
    pub kind: EnemyKind,
    pub trigger_x: f32,
    pub spawn: Vec2,
    pub unlocks: Vec<Ability>,
    boss: Option<Entity>,
    started: bool,
    defeated: bool,
}

impl Default for BossEncounter {
    fn default() -> Self {
        Self::new(
            EnemyKind::Charger,
            600.0,
            Vec2::new(900.0, 40.0),
            vec![Ability::DoubleJump, Ability::Sword],
        )
    }
}

impl BossEncounter {
    pub fn new(kind: EnemyKind, trigger_x: f32, spawn: Vec2, unlocks: Vec<Ability>) -> Self {
        Self {
            kind,
            trigger_x,
            spawn,
            unlocks,
            boss: None,
            started: false,
            defeated: false,
        }
    }

    pub fn boss(&self) -> Option<Entity> {
        self.boss
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// True once, the first time the player crosses the trigger line.
    pub fn should_trigger(&self, player_x: f32) -> bool {
        !self.started && player_x >= self.trigger_x
    }

    pub fn start(&mut self, boss: Entity) {
        self.started = true;
        self.boss = Some(boss);
    }

    /// Rewards for defeating `boss`; empty unless it is this encounter's boss
    /// and the encounter has not already paid out.
    pub fn finish(&mut self, boss: Entity) -> Vec<Ability> {
        if self.defeated || self.boss != Some(boss) {
            return Vec::new();
        }
        self.defeated = true;
        self.unlocks.clone()
    }
}
