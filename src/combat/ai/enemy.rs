//! Combat domain: the shared enemy state machine.

use bevy::prelude::*;

use crate::combat::ai::boss::BossBrain;
use crate::combat::components::{
    AiCommand, AiOutput, EnemyBrain, EnemyState, PatrolRoute, Perception,
};
use crate::content::{EnemyKind, EnemyProfile};
use crate::core::{ActorState, DamageOutcome, SimRng, direction_of};

pub const ALERT_MS: f32 = 300.0;
pub const HURT_MS: f32 = 300.0;
pub const STUN_MS: f32 = 1000.0;
pub const INTRO_MS: f32 = 1500.0;
pub const IDLE_WAIT_MS: (f32, f32) = (1000.0, 2000.0);
pub const PATROL_SPEED_FACTOR: f32 = 0.6;
/// Once a strike lands the attack jumps ahead to its recovery.
pub const STRIKE_RECOVERY_MS: f32 = 500.0;
/// A crouching target ducks strikes from farther than this share of attack range.
pub const CROUCH_DODGE_FACTOR: f32 = 0.4;

const FLANK_RADIUS: f32 = 150.0;
const FLANK_OFFSET: f32 = 50.0;
const GRUNT_LUNGE_MS: (f32, f32) = (100.0, 200.0);
const GRUNT_LUNGE_SPEED: f32 = 80.0;

impl EnemyBrain {
    pub fn new(kind: EnemyKind, profile: EnemyProfile, spawn_x: f32) -> Self {
        let boss = kind.is_boss().then(|| BossBrain::new(kind));
        let initial = if boss.is_some() {
            EnemyState::Intro
        } else {
            EnemyState::Idle
        };
        Self {
            fsm: ActorState::new(initial),
            kind,
            profile,
            patrol: PatrolRoute {
                min_x: spawn_x - profile.patrol_span,
                max_x: spawn_x + profile.patrol_span,
                direction: 1.0,
            },
            idle_wait_ms: None,
            strike_landed: false,
            boss,
            deferred: Vec::new(),
        }
    }

    pub fn with_patrol(mut self, min_x: f32, max_x: f32) -> Self {
        self.patrol.min_x = min_x.min(max_x);
        self.patrol.max_x = max_x.max(min_x);
        self
    }

    pub fn state(&self) -> EnemyState {
        self.fsm.state()
    }

    pub fn is_dead(&self) -> bool {
        self.fsm.is(EnemyState::Dead)
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(
            self.fsm.state(),
            EnemyState::Intro | EnemyState::PhaseTransition
        )
    }

    pub fn phase(&self) -> u8 {
        self.boss.as_ref().map_or(1, BossBrain::phase)
    }

    /// Movement speed including any phase bonus.
    pub fn speed(&self) -> f32 {
        self.profile.speed * self.boss.as_ref().map_or(1.0, BossBrain::speed_mult)
    }

    /// React to a hit already applied to this enemy's health.
    pub fn receive_hit(&mut self, outcome: DamageOutcome, health_ratio: f32) {
        match outcome {
            DamageOutcome::Ignored => return,
            DamageOutcome::Lethal => {
                self.fsm.transition(EnemyState::Dead);
                return;
            }
            DamageOutcome::Damaged => {}
        }
        if self.is_invulnerable() {
            return;
        }
        if let Some(boss) = self.boss.as_mut() {
            if let Some(phase) = boss.check_phase(health_ratio) {
                let mut commands = Vec::new();
                boss.enter_phase(phase, &mut self.fsm, &mut commands);
                self.deferred.extend(commands);
                return;
            }
            if boss.has_super_armor() {
                return;
            }
        }
        self.fsm.transition(EnemyState::Hurt);
    }

    /// Advance one tick of behavior.
    pub fn tick(&mut self, dt_ms: f32, perception: &Perception, rng: &mut SimRng, out: &mut AiOutput) {
        if self.is_dead() {
            return;
        }
        out.commands.append(&mut self.deferred);
        self.fsm.advance(dt_ms);

        let mut handled = false;
        if let Some(boss) = self.boss.as_mut() {
            boss.cool_down(dt_ms);
            boss.observe(perception);
            if !self.fsm.is(EnemyState::Intro) && !self.fsm.is(EnemyState::PhaseTransition) {
                if let Some(phase) = boss.check_phase(perception.health_ratio) {
                    boss.enter_phase(phase, &mut self.fsm, &mut out.commands);
                }
            }
            let speed = self.profile.speed * boss.speed_mult();
            handled = boss.tick_state(
                &mut self.fsm,
                &self.profile,
                speed,
                &mut self.strike_landed,
                perception,
                rng,
                out,
            );
        }
        if !handled {
            self.tick_common(perception, rng, out);
        }

        if let Some(vx) = out.velocity_x {
            self.fsm.update_facing(vx);
        }
    }

    fn enter_idle(&mut self, rng: &mut SimRng) {
        self.idle_wait_ms = Some(rng.range(IDLE_WAIT_MS.0, IDLE_WAIT_MS.1));
        self.fsm.transition(EnemyState::Idle);
    }

    fn enter_attack(&mut self) {
        self.strike_landed = false;
        self.fsm.transition(EnemyState::Attack);
    }

    fn face_target(&mut self, perception: &Perception) {
        if let Some(target) = perception.live_target() {
            self.fsm
                .update_facing(direction_of(target.position.x - perception.position.x));
        }
    }

    fn tick_common(&mut self, perception: &Perception, rng: &mut SimRng, out: &mut AiOutput) {
        let distance = perception.distance_to_target();
        let sees_target = distance < self.profile.detect_range;
        let timer = self.fsm.timer_ms();

        match self.fsm.state() {
            EnemyState::Idle => {
                out.halt();
                let wait = *self
                    .idle_wait_ms
                    .get_or_insert_with(|| rng.range(IDLE_WAIT_MS.0, IDLE_WAIT_MS.1));
                if sees_target {
                    self.fsm.transition(EnemyState::Alert);
                } else if timer > wait {
                    self.fsm.transition(EnemyState::Patrol);
                }
            }
            EnemyState::Patrol => {
                if sees_target {
                    out.halt();
                    self.fsm.transition(EnemyState::Alert);
                    return;
                }
                let x = perception.position.x;
                if x <= self.patrol.min_x {
                    self.patrol.direction = 1.0;
                } else if x >= self.patrol.max_x {
                    self.patrol.direction = -1.0;
                }
                out.velocity_x = Some(self.patrol.direction * self.speed() * PATROL_SPEED_FACTOR);
            }
            EnemyState::Alert => {
                out.halt();
                self.face_target(perception);
                if timer > ALERT_MS {
                    self.fsm.transition(EnemyState::Chase);
                }
            }
            EnemyState::Chase => {
                let Some(target) = perception.live_target() else {
                    out.halt();
                    self.fsm.transition(EnemyState::Patrol);
                    return;
                };
                if distance > self.profile.detect_range * self.profile.lose_range_factor {
                    out.halt();
                    self.fsm.transition(EnemyState::Patrol);
                } else if distance < self.profile.attack_range {
                    out.halt();
                    self.face_target(perception);
                    self.enter_attack();
                } else {
                    let aim_x = self.chase_aim_x(target.position.x, perception);
                    out.velocity_x =
                        Some(direction_of(aim_x - perception.position.x) * self.speed());
                }
            }
            EnemyState::Attack => {
                out.velocity_x = Some(self.attack_drift(timer));
                self.try_strike(perception, 1.0, out);
                if timer > self.profile.attack_cooldown_ms {
                    self.fsm.transition(EnemyState::Chase);
                }
            }
            EnemyState::Hurt => {
                // Knockback owns velocity while hurt
                if timer > HURT_MS {
                    self.fsm.transition(EnemyState::Chase);
                }
            }
            EnemyState::Stunned => {
                out.halt();
                if timer > STUN_MS {
                    self.enter_idle(rng);
                }
            }
            EnemyState::Intro => {
                out.halt();
                if timer > INTRO_MS {
                    self.enter_idle(rng);
                }
            }
            EnemyState::PhaseTransition => {
                out.halt();
                let duration = self.boss.as_ref().map_or(0.0, BossBrain::transition_ms);
                if timer > duration {
                    self.fsm.transition(EnemyState::Chase);
                }
            }
            EnemyState::Dead => {}
            _ => {
                // Boss-only state without a boss brain; fall back to the basics
                out.halt();
                self.fsm.transition(EnemyState::Chase);
            }
        }
    }

    /// Grunts spread out around the target instead of stacking on one side.
    fn chase_aim_x(&self, target_x: f32, perception: &Perception) -> f32 {
        if self.kind != EnemyKind::Grunt {
            return target_x;
        }
        match perception.nearby_ally {
            Some(ally) if ally.distance(perception.position) < FLANK_RADIUS => {
                if ally.x < perception.position.x {
                    target_x + FLANK_OFFSET
                } else {
                    target_x - FLANK_OFFSET
                }
            }
            _ => target_x,
        }
    }

    fn attack_drift(&self, timer: f32) -> f32 {
        if self.kind == EnemyKind::Grunt && timer > GRUNT_LUNGE_MS.0 && timer < GRUNT_LUNGE_MS.1 {
            self.fsm.facing_sign() * GRUNT_LUNGE_SPEED
        } else {
            0.0
        }
    }

    /// Land the common melee strike once, inside the attack's strike window.
    pub(crate) fn try_strike(&mut self, perception: &Perception, damage_mult: f32, out: &mut AiOutput) {
        strike_in_window(
            &mut self.fsm,
            &self.profile,
            &mut self.strike_landed,
            perception,
            damage_mult,
            out,
        );
    }
}

/// Shared melee rule: one hit per attack while the window is open and the
/// target is in reach. A crouching target ducks hits that are not point-blank.
fn strike_in_window(
    fsm: &mut ActorState<EnemyState>,
    profile: &EnemyProfile,
    strike_landed: &mut bool,
    perception: &Perception,
    damage_mult: f32,
    out: &mut AiOutput,
) {
    let timer = fsm.timer_ms();
    let [open, close] = profile.strike_window_ms;
    if *strike_landed || timer <= open || timer >= close {
        return;
    }
    let Some(target) = perception.live_target() else {
        return;
    };
    let distance = target.position.distance(perception.position);
    if distance >= profile.attack_range + profile.reach_tolerance {
        return;
    }
    if target.crouching && distance > profile.attack_range * CROUCH_DODGE_FACTOR {
        return;
    }
    out.push(AiCommand::Strike {
        damage: profile.damage * damage_mult,
        knockback: None,
    });
    *strike_landed = true;
    fsm.skip_to(STRIKE_RECOVERY_MS);
}
