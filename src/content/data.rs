//! Data definitions for the tuning file.
//!
//! These structs mirror assets/data/tuning.ron. Every field has a built-in
//! default, so a partial file only overrides what it names.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// File root (tuning.ron)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TuningFile {
    pub schema_version: u32,
    /// Fixed seed for reproducible runs; a random seed is used when absent.
    pub seed: Option<u64>,
    pub player: PlayerTuning,
    pub combat: CombatTuning,
    pub enemies: EnemyRoster,
}

// ============================================================================
// Player
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub lives: u32,
    pub width: f32,
    pub standing_height: f32,
    pub crouch_height: f32,

    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed_factor: f32,
    pub gravity: f32,

    pub jump_velocity: f32,
    pub double_jump_velocity: f32,
    pub max_jump_hold_ms: f32,
    pub coyote_ms: f32,
    pub jump_buffer_ms: f32,

    pub dodge_speed: f32,
    pub dodge_duration_ms: f32,
    pub dodge_invuln_ms: f32,
    pub dodge_cooldown_ms: f32,

    pub hurt_ms: f32,
    pub hit_invuln_ms: f32,
    pub respawn_invuln_ms: f32,
    pub respawn_delay_ms: f32,
    pub knockback_x: f32,
    pub knockback_y: f32,

    pub regen_delay_ms: f32,
    pub regen_per_sec: f32,

    pub tuning: TuningPowers,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            lives: 3,
            width: 20.0,
            standing_height: 44.0,
            crouch_height: 30.0,
            walk_speed: 150.0,
            run_speed: 280.0,
            crouch_speed_factor: 0.5,
            gravity: 800.0,
            jump_velocity: 420.0,
            double_jump_velocity: 350.0,
            max_jump_hold_ms: 200.0,
            coyote_ms: 100.0,
            jump_buffer_ms: 100.0,
            dodge_speed: 350.0,
            dodge_duration_ms: 350.0,
            dodge_invuln_ms: 250.0,
            dodge_cooldown_ms: 600.0,
            hurt_ms: 300.0,
            hit_invuln_ms: 2000.0,
            respawn_invuln_ms: 4000.0,
            respawn_delay_ms: 1500.0,
            knockback_x: 250.0,
            knockback_y: 200.0,
            regen_delay_ms: 5000.0,
            regen_per_sec: 2.0,
            tuning: TuningPowers::default(),
        }
    }
}

/// Energy-gated telekinetic powers.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct TuningPowers {
    pub max_energy: f32,
    pub drain_per_sec: f32,
    pub recharge_per_sec: f32,
    pub push_range: f32,
    pub push_force: f32,
    pub push_lift: f32,
    pub push_damage_per_sec: f32,
    pub pull_range: f32,
    pub pull_force: f32,
    pub deflect_cost: f32,
    pub deflect_range: f32,
    pub hurled_deflect_range: f32,
    pub deflect_damage_mult: f32,
    pub hurled_return_damage: f32,
    pub platform_cost: f32,
    pub platform_ms: f32,
    pub platform_size: [f32; 2],
}

impl Default for TuningPowers {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            drain_per_sec: 25.0,
            recharge_per_sec: 15.0,
            push_range: 100.0,
            push_force: 300.0,
            push_lift: 100.0,
            push_damage_per_sec: 20.0,
            pull_range: 120.0,
            pull_force: 200.0,
            deflect_cost: 20.0,
            deflect_range: 80.0,
            hurled_deflect_range: 100.0,
            deflect_damage_mult: 2.0,
            hurled_return_damage: 30.0,
            platform_cost: 30.0,
            platform_ms: 4000.0,
            platform_size: [64.0, 12.0],
        }
    }
}

// ============================================================================
// Combat
// ============================================================================

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Reflect)]
pub struct AttackSpec {
    pub damage: f32,
    pub duration_ms: f32,
    pub size: [f32; 2],
    pub hit_stop_ms: f32,
}

impl AttackSpec {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size[0], self.size[1])
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct CombatTuning {
    pub punch: AttackSpec,
    pub kick: AttackSpec,
    pub sword: AttackSpec,
    pub dive_kick: AttackSpec,
    pub dive_kick_velocity: [f32; 2],
    pub dive_kick_bounce: f32,
    /// Gap between the attacker's edge and the near side of a melee volume.
    pub reach_gap: f32,

    pub combo_window_ms: f32,
    pub combo_step: f32,
    pub combo_max_steps: u32,

    pub knockback_force: f32,
    pub knockback_lift: f32,
    pub kick_lateral_bonus: f32,
    pub kick_lift: f32,

    pub default_hit_stop_ms: f32,
    pub knockout_pause_ms: f32,
    pub corpse_fade_ms: f32,

    pub fall_damage: f32,
    pub hazard_damage: f32,
    pub hazard_cooldown_ms: f32,
    pub pickup_health: f32,
    pub pickup_energy: f32,
    pub pickup_memory_score: u32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            punch: AttackSpec {
                damage: 10.0,
                duration_ms: 300.0,
                size: [30.0, 20.0],
                hit_stop_ms: 40.0,
            },
            kick: AttackSpec {
                damage: 15.0,
                duration_ms: 450.0,
                size: [40.0, 24.0],
                hit_stop_ms: 60.0,
            },
            sword: AttackSpec {
                damage: 25.0,
                duration_ms: 400.0,
                size: [45.0, 30.0],
                hit_stop_ms: 100.0,
            },
            dive_kick: AttackSpec {
                damage: 18.0,
                duration_ms: 400.0,
                size: [30.0, 30.0],
                hit_stop_ms: 80.0,
            },
            dive_kick_velocity: [250.0, -400.0],
            dive_kick_bounce: 280.0,
            reach_gap: 10.0,
            combo_window_ms: 800.0,
            combo_step: 0.15,
            combo_max_steps: 4,
            knockback_force: 250.0,
            knockback_lift: 150.0,
            kick_lateral_bonus: 1.5,
            kick_lift: 200.0,
            default_hit_stop_ms: 50.0,
            knockout_pause_ms: 150.0,
            corpse_fade_ms: 800.0,
            fall_damage: 30.0,
            hazard_damage: 20.0,
            hazard_cooldown_ms: 500.0,
            pickup_health: 25.0,
            pickup_energy: 30.0,
            pickup_memory_score: 200,
        }
    }
}

// ============================================================================
// Enemies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Reflect)]
pub enum EnemyKind {
    Grunt,
    /// Wall-like bruiser that charges along the ground.
    Charger,
    /// Blinks behind the player, taunts, then lunges.
    Teleporter,
    /// Copies the player's last attack back at them.
    Mirror,
    /// Stays at range, summons help and reshapes the arena.
    Orchestrator,
}

impl EnemyKind {
    pub fn is_boss(self) -> bool {
        !matches!(self, EnemyKind::Grunt)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct EnemyProfile {
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub detect_range: f32,
    pub attack_range: f32,
    pub attack_cooldown_ms: f32,
    pub score_value: u32,
    pub knockback_resist: f32,
    /// Chase gives up beyond `detect_range * lose_range_factor`.
    pub lose_range_factor: f32,
    /// Extra reach allowed when the strike window opens.
    pub reach_tolerance: f32,
    pub strike_window_ms: [f32; 2],
    pub patrol_span: f32,
    pub size: [f32; 2],
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            max_health: 30.0,
            speed: 100.0,
            damage: 8.0,
            detect_range: 200.0,
            attack_range: 40.0,
            attack_cooldown_ms: 1000.0,
            score_value: 100,
            knockback_resist: 1.0,
            lose_range_factor: 2.0,
            reach_tolerance: 10.0,
            strike_window_ms: [200.0, 400.0],
            patrol_span: 100.0,
            size: [24.0, 40.0],
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct EnemyRoster {
    pub grunt: EnemyProfile,
    pub charger: EnemyProfile,
    pub teleporter: EnemyProfile,
    pub mirror: EnemyProfile,
    pub orchestrator: EnemyProfile,
}

impl EnemyRoster {
    pub fn profile(&self, kind: EnemyKind) -> &EnemyProfile {
        match kind {
            EnemyKind::Grunt => &self.grunt,
            EnemyKind::Charger => &self.charger,
            EnemyKind::Teleporter => &self.teleporter,
            EnemyKind::Mirror => &self.mirror,
            EnemyKind::Orchestrator => &self.orchestrator,
        }
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        let base = EnemyProfile::default();
        Self {
            grunt: EnemyProfile {
                lose_range_factor: 2.5,
                reach_tolerance: 15.0,
                strike_window_ms: [200.0, 350.0],
                ..base
            },
            charger: EnemyProfile {
                max_health: 150.0,
                speed: 80.0,
                damage: 25.0,
                detect_range: 300.0,
                attack_range: 50.0,
                attack_cooldown_ms: 2000.0,
                score_value: 300,
                knockback_resist: 3.0,
                size: [48.0, 56.0],
                ..base
            },
            teleporter: EnemyProfile {
                max_health: 80.0,
                speed: 180.0,
                damage: 20.0,
                detect_range: 500.0,
                attack_range: 50.0,
                attack_cooldown_ms: 1500.0,
                score_value: 1000,
                knockback_resist: 2.0,
                size: [28.0, 48.0],
                ..base
            },
            mirror: EnemyProfile {
                max_health: 120.0,
                speed: 150.0,
                damage: 18.0,
                detect_range: 400.0,
                attack_range: 45.0,
                attack_cooldown_ms: 1200.0,
                score_value: 2000,
                knockback_resist: 2.0,
                size: [28.0, 48.0],
                ..base
            },
            orchestrator: EnemyProfile {
                max_health: 300.0,
                speed: 120.0,
                damage: 25.0,
                detect_range: 600.0,
                attack_range: 80.0,
                attack_cooldown_ms: 2000.0,
                score_value: 5000,
                knockback_resist: 4.0,
                size: [36.0, 60.0],
                ..base
            },
        }
    }
}
