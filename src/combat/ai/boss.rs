//! Combat domain: phase-gated boss behavior layered on the enemy state machine.

use bevy::prelude::*;

use crate::combat::attacks::AttackKind;
use crate::combat::components::{
    AiCommand, AiOutput, EnemyState, Perception, PlatformLayout,
};
use crate::content::{EnemyKind, EnemyProfile};
use crate::core::{ActorState, SimRng, direction_of};

pub const DEFAULT_THRESHOLDS: [f32; 2] = [0.66, 0.33];
pub const TRANSITION_MS: f32 = 500.0;
pub const ORCHESTRATOR_TRANSITION_MS: f32 = 2000.0;
const BOSS_IDLE_MS: f32 = 500.0;

// Charger
const CHARGE_WINDUP_MS: f32 = 800.0;
const CHARGE_MAX_MS: f32 = 1500.0;
const CHARGE_SPEED: f32 = 300.0;
const CHARGE_HIT_RANGE: f32 = 40.0;
const CHARGE_SMASH_REACH: f32 = 30.0;
const CHARGE_DAMAGE_MULT: f32 = 1.5;
const CHARGE_KNOCKBACK: Vec2 = Vec2::new(400.0, 250.0);
const CHARGE_MAX_DY: f32 = 30.0;
const CHARGE_DX: (f32, f32) = (80.0, 400.0);
const CHARGE_COOLDOWN_MS: [f32; 3] = [4000.0, 3000.0, 2000.0];

// Teleporter
const TELEPORT_COOLDOWN_MS: [f32; 3] = [3000.0, 2500.0, 2000.0];
const TELEPORT_MIN_DISTANCE: f32 = 100.0;
const TELEPORT_FADE_OUT_MS: f32 = 300.0;
const TELEPORT_END_MS: f32 = 700.0;
const TELEPORT_BEHIND_OFFSET: f32 = 80.0;
const TAUNT_MS: f32 = 800.0;
const TAUNT_REACH_BONUS: f32 = 20.0;
const LUNGE_WINDUP_MS: f32 = 100.0;
const LUNGE_END_MS: f32 = 500.0;
const LUNGE_SPEED: [f32; 3] = [400.0, 400.0, 500.0];
const LUNGE_HIT_RANGE: f32 = 35.0;
const TELEPORTER_SPEED_MULT: [f32; 3] = [1.0, 1.3, 1.6];

// Mirror
const MIRROR_COOLDOWN_MS: [f32; 3] = [2000.0, 2000.0, 1500.0];
const MIRROR_WINDOW_MS: (f32, f32) = (400.0, 600.0);
const MIRROR_END_MS: f32 = 800.0;
const MIRROR_RANGE: f32 = 60.0;
const TUNING_ATTACK_COOLDOWN_MS: [f32; 3] = [3000.0, 3000.0, 2000.0];
const TUNING_ATTACK_MIN_DISTANCE: f32 = 100.0;
const TUNING_ATTACK_FIRE_MS: f32 = 500.0;
const TUNING_ATTACK_END_MS: f32 = 1000.0;
const BOLT_SPEED: f32 = 250.0;
const BOLT_DAMAGE: f32 = 15.0;
const BOLT_LIFETIME_MS: f32 = 3000.0;
const RETREAT_COOLDOWN_MS: f32 = 5000.0;
const RETREAT_MS: f32 = 800.0;
const RETREAT_TRIGGER_RANGE: f32 = 60.0;
const RETREAT_HEALTH_RATIO: f32 = 0.5;
const RETREAT_SPEED_MULT: f32 = 1.5;
const MIRROR_SPEED_MULT: [f32; 3] = [1.0, 1.2, 1.4];

// Orchestrator
const SUMMON_COOLDOWN_MS: f32 = 8000.0;
const SUMMON_END_MS: f32 = 600.0;
const SUMMON_OFFSET: f32 = 100.0;
pub const MAX_MINIONS: usize = 3;
const SPREAD_COOLDOWN_MS: f32 = 3000.0;
const SPREAD_RANGE: f32 = 300.0;
const SPREAD_ANGLES_DEG: [f32; 3] = [-20.0, 0.0, 20.0];
const SPREAD_STAGGER_MS: f32 = 200.0;
const SPREAD_END_MS: f32 = 600.0;
const SPREAD_SPEED: f32 = 200.0;
const SPREAD_DAMAGE: f32 = 15.0;
const SPREAD_LIFETIME_MS: f32 = 4000.0;
const HURL_COOLDOWN_MS: f32 = 4000.0;
const HURL_VELOCITY: Vec2 = Vec2::new(180.0, -50.0);
const HURL_DAMAGE: f32 = 25.0;
const HURL_LIFETIME_MS: f32 = 5000.0;
const HURL_END_MS: f32 = 500.0;
const FINALE_COOLDOWN_MS: f32 = 2500.0;
const KEEP_AWAY_FAR: f32 = 150.0;
const KEEP_AWAY_NEAR: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub enum BossVariant {
    Charger {
        charge_cd_ms: f32,
        charge_dir: f32,
        charge_hit: bool,
    },
    Teleporter {
        teleport_cd_ms: f32,
        repositioned: bool,
        lunge_dir: f32,
        lunge_hit: bool,
    },
    Mirror {
        mirror_cd_ms: f32,
        tuning_cd_ms: f32,
        retreat_cd_ms: f32,
        /// Last attack the player threw since the previous mirror.
        remembered: Option<AttackKind>,
        mirrored: Option<AttackKind>,
        mirror_hit: bool,
        fired: bool,
        retreat_dir: f32,
    },
    Orchestrator {
        summon_cd_ms: f32,
        spread_cd_ms: f32,
        hurl_cd_ms: f32,
        finale_cd_ms: f32,
        /// Shots (or summons) already released in the current state.
        released: usize,
        hurl_next: bool,
    },
}

impl BossVariant {
    fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Grunt | EnemyKind::Charger => BossVariant::Charger {
                charge_cd_ms: 0.0,
                charge_dir: 1.0,
                charge_hit: false,
            },
            EnemyKind::Teleporter => BossVariant::Teleporter {
                teleport_cd_ms: 0.0,
                repositioned: false,
                lunge_dir: 1.0,
                lunge_hit: false,
            },
            EnemyKind::Mirror => BossVariant::Mirror {
                mirror_cd_ms: 0.0,
                tuning_cd_ms: 0.0,
                retreat_cd_ms: 0.0,
                remembered: None,
                mirrored: None,
                mirror_hit: false,
                fired: false,
                retreat_dir: 1.0,
            },
            EnemyKind::Orchestrator => BossVariant::Orchestrator {
                summon_cd_ms: 0.0,
                spread_cd_ms: 0.0,
                hurl_cd_ms: 0.0,
                finale_cd_ms: 0.0,
                released: 0,
                hurl_next: false,
            },
        }
    }
}

/// Boss-only state: a phase that only moves forward, plus per-variant data.
#[derive(Debug, Clone, PartialEq)]
pub struct BossBrain {
    phase: u8,
    thresholds: Vec<f32>,
    pub variant: BossVariant,
}

fn by_phase(table: [f32; 3], phase: u8) -> f32 {
    table[(phase.clamp(1, 3) - 1) as usize]
}

fn tick_down(cooldown: &mut f32, dt_ms: f32) {
    *cooldown = (*cooldown - dt_ms).max(0.0);
}

/// Damage multiplier when the mirror boss replays a player attack.
pub fn mirror_multiplier(kind: AttackKind) -> f32 {
    match kind {
        AttackKind::Kick | AttackKind::DiveKick => 1.3,
        AttackKind::Sword => 1.5,
        _ => 1.0,
    }
}

impl BossBrain {
    pub fn new(kind: EnemyKind) -> Self {
        Self::with_thresholds(kind, DEFAULT_THRESHOLDS.to_vec())
    }

    /// Thresholds are health ratios, highest first; phase N+1 starts at or below entry N.
    pub fn with_thresholds(kind: EnemyKind, thresholds: Vec<f32>) -> Self {
        Self {
            phase: 1,
            thresholds,
            variant: BossVariant::for_kind(kind),
        }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Advance at most one phase if health has dropped to the next threshold.
    pub fn check_phase(&mut self, health_ratio: f32) -> Option<u8> {
        let threshold = *self.thresholds.get(usize::from(self.phase) - 1)?;
        if health_ratio <= threshold + f32::EPSILON {
            self.phase += 1;
            Some(self.phase)
        } else {
            None
        }
    }

    pub fn transition_ms(&self) -> f32 {
        match self.variant {
            BossVariant::Orchestrator { .. } => ORCHESTRATOR_TRANSITION_MS,
            _ => TRANSITION_MS,
        }
    }

    /// Super armor: damage never interrupts the current action.
    pub fn has_super_armor(&self) -> bool {
        matches!(self.variant, BossVariant::Orchestrator { .. })
    }

    pub fn speed_mult(&self) -> f32 {
        match self.variant {
            BossVariant::Teleporter { .. } => by_phase(TELEPORTER_SPEED_MULT, self.phase),
            BossVariant::Mirror { .. } => by_phase(MIRROR_SPEED_MULT, self.phase),
            _ => 1.0,
        }
    }

    pub(crate) fn enter_phase(
        &mut self,
        phase: u8,
        fsm: &mut ActorState<EnemyState>,
        commands: &mut Vec<AiCommand>,
    ) {
        fsm.transition(EnemyState::PhaseTransition);
        commands.push(AiCommand::PhaseChanged(phase));
        commands.push(AiCommand::CameraShake {
            intensity: 0.02,
            duration_ms: 500.0,
        });
        commands.push(AiCommand::CameraFlash { duration_ms: 300.0 });

        if let BossVariant::Orchestrator { .. } = self.variant {
            match phase {
                2 => commands.push(AiCommand::RaisePlatforms(PlatformLayout::Static)),
                3 => {
                    commands.push(AiCommand::RaisePlatforms(PlatformLayout::Sky));
                    commands.push(AiCommand::Levitate(true));
                }
                _ => {}
            }
        }
        info!("Boss entering phase {}", phase);
    }

    pub(crate) fn cool_down(&mut self, dt_ms: f32) {
        match &mut self.variant {
            BossVariant::Charger { charge_cd_ms, .. } => tick_down(charge_cd_ms, dt_ms),
            BossVariant::Teleporter { teleport_cd_ms, .. } => tick_down(teleport_cd_ms, dt_ms),
            BossVariant::Mirror {
                mirror_cd_ms,
                tuning_cd_ms,
                retreat_cd_ms,
                ..
            } => {
                tick_down(mirror_cd_ms, dt_ms);
                tick_down(tuning_cd_ms, dt_ms);
                tick_down(retreat_cd_ms, dt_ms);
            }
            BossVariant::Orchestrator {
                summon_cd_ms,
                spread_cd_ms,
                hurl_cd_ms,
                finale_cd_ms,
                ..
            } => {
                tick_down(summon_cd_ms, dt_ms);
                tick_down(spread_cd_ms, dt_ms);
                tick_down(hurl_cd_ms, dt_ms);
                tick_down(finale_cd_ms, dt_ms);
            }
        }
    }

    /// Remember what the player is doing, for bosses that react to it.
    pub(crate) fn observe(&mut self, perception: &Perception) {
        if let BossVariant::Mirror { remembered, .. } = &mut self.variant {
            if let Some(kind) = perception.live_target().and_then(|t| t.attack_started) {
                *remembered = Some(kind);
            }
        }
    }

    /// Run variant behavior for the current state. Returns false when the
    /// shared enemy machine should handle it instead.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn tick_state(
        &mut self,
        fsm: &mut ActorState<EnemyState>,
        profile: &EnemyProfile,
        speed: f32,
        strike_landed: &mut bool,
        perception: &Perception,
        rng: &mut SimRng,
        out: &mut AiOutput,
    ) -> bool {
        let phase = self.phase;
        let timer = fsm.timer_ms();
        let distance = perception.distance_to_target();
        let toward = perception
            .live_target()
            .map(|t| direction_of(t.position.x - perception.position.x))
            .unwrap_or_else(|| fsm.facing_sign());

        match &mut self.variant {
            BossVariant::Charger {
                charge_cd_ms,
                charge_dir,
                charge_hit,
            } => match fsm.state() {
                EnemyState::Chase => {
                    let Some(target) = perception.live_target() else {
                        return false;
                    };
                    let dx = (target.position.x - perception.position.x).abs();
                    let dy = (target.position.y - perception.position.y).abs();
                    if *charge_cd_ms <= 0.0
                        && dy < CHARGE_MAX_DY
                        && dx > CHARGE_DX.0
                        && dx < CHARGE_DX.1
                    {
                        *charge_dir = toward;
                        *charge_cd_ms = by_phase(CHARGE_COOLDOWN_MS, phase);
                        fsm.transition(EnemyState::ChargeWindup);
                        out.halt();
                        return true;
                    }
                    false
                }
                EnemyState::ChargeWindup => {
                    out.halt();
                    if timer > CHARGE_WINDUP_MS {
                        *charge_hit = false;
                        fsm.transition(EnemyState::Charge);
                    }
                    true
                }
                EnemyState::Charge => {
                    out.velocity_x = Some(*charge_dir * CHARGE_SPEED);
                    out.push(AiCommand::SmashBreakables {
                        reach: CHARGE_SMASH_REACH,
                    });
                    if !*charge_hit && distance < CHARGE_HIT_RANGE {
                        out.push(AiCommand::Strike {
                            damage: profile.damage * CHARGE_DAMAGE_MULT,
                            knockback: Some(Vec2::new(
                                *charge_dir * CHARGE_KNOCKBACK.x,
                                CHARGE_KNOCKBACK.y,
                            )),
                        });
                        *charge_hit = true;
                    }
                    if perception.blocked || timer > CHARGE_MAX_MS {
                        out.halt();
                        fsm.transition(EnemyState::Stunned);
                    }
                    true
                }
                _ => false,
            },

            BossVariant::Teleporter {
                teleport_cd_ms,
                repositioned,
                lunge_dir,
                lunge_hit,
            } => match fsm.state() {
                EnemyState::Idle => {
                    out.halt();
                    if timer > BOSS_IDLE_MS && perception.live_target().is_some() {
                        fsm.transition(EnemyState::Chase);
                    }
                    true
                }
                EnemyState::Chase => {
                    if perception.live_target().is_none() {
                        out.halt();
                        fsm.transition(EnemyState::Idle);
                    } else if *teleport_cd_ms <= 0.0 && distance > TELEPORT_MIN_DISTANCE {
                        *teleport_cd_ms = by_phase(TELEPORT_COOLDOWN_MS, phase);
                        *repositioned = false;
                        out.halt();
                        fsm.transition(EnemyState::Teleport);
                    } else if distance < profile.attack_range + TAUNT_REACH_BONUS {
                        out.halt();
                        fsm.transition(EnemyState::Taunt);
                    } else {
                        out.velocity_x = Some(toward * speed);
                    }
                    true
                }
                EnemyState::Teleport => {
                    out.halt();
                    if !*repositioned && timer >= TELEPORT_FADE_OUT_MS {
                        if let Some(target) = perception.live_target() {
                            let behind = if target.facing_right { -1.0 } else { 1.0 };
                            out.push(AiCommand::Reposition(Vec2::new(
                                target.position.x + behind * TELEPORT_BEHIND_OFFSET,
                                perception.position.y,
                            )));
                        }
                        *repositioned = true;
                    }
                    if timer >= TELEPORT_END_MS {
                        fsm.transition(EnemyState::Taunt);
                    }
                    true
                }
                EnemyState::Taunt => {
                    out.halt();
                    fsm.update_facing(toward);
                    if timer > TAUNT_MS {
                        *lunge_dir = toward;
                        *lunge_hit = false;
                        fsm.transition(EnemyState::Lunge);
                    }
                    true
                }
                EnemyState::Lunge => {
                    if timer < LUNGE_WINDUP_MS {
                        out.halt();
                        return true;
                    }
                    out.velocity_x = Some(*lunge_dir * by_phase(LUNGE_SPEED, phase));
                    if !*lunge_hit && distance < LUNGE_HIT_RANGE {
                        out.push(AiCommand::Strike {
                            damage: profile.damage,
                            knockback: None,
                        });
                        *lunge_hit = true;
                        out.halt();
                        fsm.transition(EnemyState::Chase);
                    } else if timer >= LUNGE_END_MS {
                        out.halt();
                        fsm.transition(EnemyState::Chase);
                    }
                    true
                }
                _ => false,
            },

            BossVariant::Mirror {
                mirror_cd_ms,
                tuning_cd_ms,
                retreat_cd_ms,
                remembered,
                mirrored,
                mirror_hit,
                fired,
                retreat_dir,
            } => match fsm.state() {
                EnemyState::Idle => {
                    out.halt();
                    if timer > BOSS_IDLE_MS && perception.live_target().is_some() {
                        fsm.transition(EnemyState::Chase);
                    }
                    true
                }
                EnemyState::Chase => {
                    if perception.live_target().is_none() {
                        out.halt();
                        fsm.transition(EnemyState::Idle);
                    } else if distance < RETREAT_TRIGGER_RANGE
                        && perception.health_ratio < RETREAT_HEALTH_RATIO
                        && *retreat_cd_ms <= 0.0
                    {
                        *retreat_cd_ms = RETREAT_COOLDOWN_MS;
                        *retreat_dir = -toward;
                        fsm.transition(EnemyState::Retreat);
                    } else if remembered.is_some() && *mirror_cd_ms <= 0.0 {
                        *mirror_cd_ms = by_phase(MIRROR_COOLDOWN_MS, phase);
                        *mirrored = remembered.take();
                        *mirror_hit = false;
                        out.halt();
                        fsm.transition(EnemyState::Mirror);
                    } else if phase >= 2
                        && distance > TUNING_ATTACK_MIN_DISTANCE
                        && *tuning_cd_ms <= 0.0
                    {
                        *tuning_cd_ms = by_phase(TUNING_ATTACK_COOLDOWN_MS, phase);
                        *fired = false;
                        out.halt();
                        fsm.transition(EnemyState::TuningAttack);
                    } else if distance < profile.attack_range {
                        *strike_landed = false;
                        out.halt();
                        fsm.transition(EnemyState::Attack);
                    } else {
                        out.velocity_x = Some(toward * speed);
                    }
                    true
                }
                EnemyState::Mirror => {
                    out.halt();
                    fsm.update_facing(toward);
                    if !*mirror_hit
                        && timer > MIRROR_WINDOW_MS.0
                        && timer < MIRROR_WINDOW_MS.1
                        && distance < MIRROR_RANGE
                    {
                        let mult = mirrored.map_or(1.0, mirror_multiplier);
                        out.push(AiCommand::Strike {
                            damage: profile.damage * mult,
                            knockback: None,
                        });
                        *mirror_hit = true;
                    }
                    if timer > MIRROR_END_MS {
                        fsm.transition(EnemyState::Chase);
                    }
                    true
                }
                EnemyState::TuningAttack => {
                    out.halt();
                    fsm.update_facing(toward);
                    if !*fired && timer >= TUNING_ATTACK_FIRE_MS {
                        out.push(aimed_shot(
                            perception,
                            toward,
                            0.0,
                            BOLT_SPEED,
                            BOLT_DAMAGE,
                            BOLT_LIFETIME_MS,
                        ));
                        *fired = true;
                    }
                    if timer > TUNING_ATTACK_END_MS {
                        fsm.transition(EnemyState::Chase);
                    }
                    true
                }
                EnemyState::Retreat => {
                    out.velocity_x = Some(*retreat_dir * speed * RETREAT_SPEED_MULT);
                    if timer > RETREAT_MS {
                        out.halt();
                        fsm.transition(EnemyState::Chase);
                    }
                    true
                }
                _ => false,
            },

            BossVariant::Orchestrator {
                summon_cd_ms,
                spread_cd_ms,
                hurl_cd_ms,
                finale_cd_ms,
                released,
                hurl_next,
            } => {
                if phase >= 2 {
                    out.velocity_y = Some(0.0);
                }
                match fsm.state() {
                    EnemyState::Idle => {
                        out.halt();
                        if timer > BOSS_IDLE_MS && perception.live_target().is_some() {
                            fsm.transition(EnemyState::Chase);
                        }
                        true
                    }
                    EnemyState::Chase => {
                        let Some(target) = perception.live_target() else {
                            out.halt();
                            return true;
                        };
                        let next = match phase {
                            1 => {
                                if *summon_cd_ms <= 0.0 && perception.live_minions < MAX_MINIONS {
                                    *summon_cd_ms = SUMMON_COOLDOWN_MS;
                                    Some(EnemyState::Summon)
                                } else if *spread_cd_ms <= 0.0 && distance < SPREAD_RANGE {
                                    *spread_cd_ms = SPREAD_COOLDOWN_MS;
                                    Some(EnemyState::RangedSpread)
                                } else if distance < profile.attack_range {
                                    *strike_landed = false;
                                    Some(EnemyState::Attack)
                                } else {
                                    None
                                }
                            }
                            2 => {
                                if *hurl_cd_ms <= 0.0 {
                                    *hurl_cd_ms = HURL_COOLDOWN_MS;
                                    Some(EnemyState::Hurl)
                                } else if *spread_cd_ms <= 0.0 {
                                    *spread_cd_ms = SPREAD_COOLDOWN_MS * 0.8;
                                    Some(EnemyState::RangedSpread)
                                } else {
                                    None
                                }
                            }
                            _ => {
                                if *finale_cd_ms <= 0.0 {
                                    *finale_cd_ms = FINALE_COOLDOWN_MS;
                                    let state = if *hurl_next {
                                        EnemyState::Hurl
                                    } else {
                                        EnemyState::RangedSpread
                                    };
                                    *hurl_next = !*hurl_next;
                                    Some(state)
                                } else {
                                    None
                                }
                            }
                        };
                        if let Some(state) = next {
                            *released = 0;
                            out.halt();
                            fsm.transition(state);
                            return true;
                        }
                        match phase {
                            1 => {
                                out.velocity_x = Some(if distance > KEEP_AWAY_FAR {
                                    toward * speed * 0.5
                                } else if distance < KEEP_AWAY_NEAR {
                                    -toward * speed * 0.3
                                } else {
                                    0.0
                                });
                            }
                            2 => out.velocity_x = Some(toward * speed * 0.6),
                            _ => {
                                out.velocity_x = Some(toward * speed * 0.8);
                                out.velocity_y =
                                    Some((target.position.y - perception.position.y) * 0.5);
                            }
                        }
                        true
                    }
                    EnemyState::Summon => {
                        out.halt();
                        if *released == 0 {
                            let side = if rng.coin_flip() { 1.0 } else { -1.0 };
                            out.push(AiCommand::Summon {
                                x: perception.position.x + side * SUMMON_OFFSET,
                            });
                            *released = 1;
                        }
                        if timer > SUMMON_END_MS {
                            fsm.transition(EnemyState::Chase);
                        }
                        true
                    }
                    EnemyState::RangedSpread => {
                        out.halt();
                        fsm.update_facing(toward);
                        while *released < SPREAD_ANGLES_DEG.len()
                            && timer >= *released as f32 * SPREAD_STAGGER_MS
                        {
                            out.push(aimed_shot(
                                perception,
                                toward,
                                SPREAD_ANGLES_DEG[*released],
                                SPREAD_SPEED,
                                SPREAD_DAMAGE,
                                SPREAD_LIFETIME_MS,
                            ));
                            *released += 1;
                        }
                        if timer >= SPREAD_END_MS {
                            fsm.transition(EnemyState::Chase);
                        }
                        true
                    }
                    EnemyState::Hurl => {
                        out.halt();
                        if *released == 0 {
                            out.push(AiCommand::Fire {
                                velocity: Vec2::new(toward * HURL_VELOCITY.x, HURL_VELOCITY.y),
                                damage: HURL_DAMAGE,
                                lifetime_ms: HURL_LIFETIME_MS,
                                kind: AttackKind::Hurled,
                                deflectable: true,
                            });
                            *released = 1;
                        }
                        if timer > HURL_END_MS {
                            fsm.transition(EnemyState::Chase);
                        }
                        true
                    }
                    _ => false,
                }
            }
        }
    }
}

/// Projectile aimed at the target, rotated by `angle_deg`.
fn aimed_shot(
    perception: &Perception,
    fallback_dir: f32,
    angle_deg: f32,
    speed: f32,
    damage: f32,
    lifetime_ms: f32,
) -> AiCommand {
    let aim = perception
        .live_target()
        .map(|t| (t.position - perception.position).normalize_or_zero())
        .filter(|v| *v != Vec2::ZERO)
        .unwrap_or(Vec2::new(fallback_dir, 0.0));
    let direction = Vec2::from_angle(angle_deg.to_radians()).rotate(aim);
    AiCommand::Fire {
        velocity: direction * speed,
        damage,
        lifetime_ms,
        kind: AttackKind::EnemyRanged,
        deflectable: true,
    }
}
