//! Player domain: per-tick player mechanics, independent of the ECS.
//!
//! Tick order: respawn countdown (while dead), state timers, dodge, movement,
//! jump, attacks, tuning powers, invincibility, regeneration.

use bevy::prelude::*;

use crate::combat::{AttackKind, ComboState, Damageable, Hit, combo_multiplier};
use crate::content::{CombatTuning, PlayerTuning};
use crate::core::{ActorState, DamageOutcome, Health};
use crate::player::components::{
    Abilities, AttackCommit, PlayerController, PlayerOutput, PlayerState, PowerAction,
};
use crate::player::resources::PlayerInput;
use crate::signals::{Ability, GameSignal};

const PLATFORM_DROP: f32 = 30.0;

impl PlayerController {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            fsm: ActorState::new(PlayerState::Normal),
            abilities: Abilities::default(),
            lives: tuning.lives,
            combo: ComboState::default(),
            energy: 0.0,
            on_ground: false,
            airborne_ms: 0.0,
            jumped_since_ground: false,
            jump_buffer_age_ms: None,
            jump_hold_ms: None,
            air_jump_used: false,
            crouching: false,
            attack_kind: None,
            attack_duration_ms: 0.0,
            dodge_dir: 1.0,
            since_dodge_ms: f32::INFINITY,
            invincible_ms: 0.0,
            since_damage_ms: 0.0,
            respawn_ms: None,
            death_reported: false,
            game_over: false,
            attack_started: None,
            tuning_active: false,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.fsm.state()
    }

    pub fn is_dead(&self) -> bool {
        self.fsm.is(PlayerState::Dead)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    pub fn is_grounded(&self) -> bool {
        self.on_ground
    }

    pub fn facing_right(&self) -> bool {
        self.fsm.facing_right()
    }

    pub fn current_attack(&self) -> Option<AttackKind> {
        self.attack_kind
    }

    /// Attack committed during the latest tick.
    pub fn attack_started(&self) -> Option<AttackKind> {
        self.attack_started
    }

    pub fn is_tuning(&self) -> bool {
        self.tuning_active
    }

    fn is_channeling(&self, input: &PlayerInput) -> bool {
        self.abilities.tuning && input.tuning_held && self.energy > 0.0
    }

    /// Post-hit, respawn, or early-dodge invincibility.
    pub fn is_invincible(&self, tuning: &PlayerTuning) -> bool {
        self.invincible_ms > 0.0
            || (self.fsm.is(PlayerState::Dodging) && self.fsm.timer_ms() < tuning.dodge_invuln_ms)
    }

    pub fn can_be_hit(&self, tuning: &PlayerTuning) -> bool {
        !self.is_dead() && !self.is_invincible(tuning)
    }

    pub fn body_height(&self, tuning: &PlayerTuning) -> f32 {
        if self.crouching {
            tuning.crouch_height
        } else {
            tuning.standing_height
        }
    }

    /// Knockback the player takes from a hit coming from `direction`.
    pub fn knockback(&self, direction: f32, tuning: &PlayerTuning) -> Vec2 {
        Vec2::new(direction * tuning.knockback_x, tuning.knockback_y)
    }

    /// Feed the ground ray result; landing restores jumps.
    pub fn set_grounded(&mut self, on_ground: bool) {
        if on_ground && !self.on_ground {
            self.jumped_since_ground = false;
            self.air_jump_used = false;
            self.jump_hold_ms = None;
        }
        if on_ground {
            self.airborne_ms = 0.0;
        }
        self.on_ground = on_ground;
    }

    pub fn unlock(&mut self, ability: Ability, tuning: &PlayerTuning) {
        match ability {
            Ability::DoubleJump => self.abilities.double_jump = true,
            Ability::Sword => self.abilities.sword = true,
            Ability::Tuning | Ability::FullTuning => {
                if !self.abilities.tuning {
                    self.energy = tuning.tuning.max_energy;
                }
                self.abilities.tuning = true;
                self.abilities.full_tuning |= ability == Ability::FullTuning;
            }
        }
        debug!("Unlocked {:?}", ability);
    }

    pub fn add_energy(&mut self, amount: f32, tuning: &PlayerTuning) {
        self.energy = (self.energy + amount).clamp(0.0, tuning.tuning.max_energy);
    }

    /// Apply damage unless invincible. A hit that lands mid-dodge cancels the dodge.
    pub fn take_damage(
        &mut self,
        health: &mut Health,
        amount: f32,
        tuning: &PlayerTuning,
    ) -> DamageOutcome {
        if !self.can_be_hit(tuning) {
            return DamageOutcome::Ignored;
        }
        let outcome = health.take_damage(amount);
        match outcome {
            DamageOutcome::Ignored => return outcome,
            DamageOutcome::Lethal => {
                self.fsm.transition(PlayerState::Dead);
                self.lives = self.lives.saturating_sub(1);
                self.respawn_ms = Some(tuning.respawn_delay_ms);
                self.death_reported = false;
                info!("Player died, {} lives left", self.lives);
            }
            DamageOutcome::Damaged => {
                self.fsm.transition(PlayerState::Hurt);
                self.invincible_ms = tuning.hit_invuln_ms;
            }
        }
        self.attack_kind = None;
        self.crouching = false;
        self.tuning_active = false;
        self.jump_hold_ms = None;
        self.since_damage_ms = 0.0;
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        dt_ms: f32,
        input: &PlayerInput,
        velocity: &mut Vec2,
        health: &mut Health,
        tuning: &PlayerTuning,
        combat: &CombatTuning,
        out: &mut PlayerOutput,
    ) {
        self.attack_started = None;

        if self.is_dead() {
            self.tick_respawn(dt_ms, velocity, health, tuning, out);
            return;
        }

        self.fsm.advance(dt_ms);
        self.since_dodge_ms += dt_ms;
        self.since_damage_ms += dt_ms;
        if !self.on_ground {
            self.airborne_ms += dt_ms;
        }
        if self.combo.tick(dt_ms) {
            out.signals.push(GameSignal::ComboReset);
        }

        let timer = self.fsm.timer_ms();
        match self.fsm.state() {
            PlayerState::Hurt if timer >= tuning.hurt_ms => {
                self.fsm.transition(PlayerState::Normal)
            }
            PlayerState::Attacking if timer >= self.attack_duration_ms => {
                self.attack_kind = None;
                self.fsm.transition(PlayerState::Normal);
            }
            PlayerState::Dodging if timer >= tuning.dodge_duration_ms => {
                self.fsm.transition(PlayerState::Normal)
            }
            _ => {}
        }

        self.tick_dodge(input, velocity, tuning, out);
        self.tick_movement(dt_ms, input, velocity, tuning);
        self.tick_jump(dt_ms, input, velocity, tuning, out);
        self.tick_attacks(input, velocity, tuning, combat, out);
        self.tick_tuning(dt_ms, input, tuning, out);

        self.invincible_ms = (self.invincible_ms - dt_ms).max(0.0);
        if self.since_damage_ms >= tuning.regen_delay_ms {
            health.heal(tuning.regen_per_sec * dt_ms / 1000.0);
        }
    }

    fn tick_respawn(
        &mut self,
        dt_ms: f32,
        velocity: &mut Vec2,
        health: &mut Health,
        tuning: &PlayerTuning,
        out: &mut PlayerOutput,
    ) {
        velocity.x = 0.0;
        velocity.y -= tuning.gravity * dt_ms / 1000.0;
        if !self.death_reported {
            self.death_reported = true;
            out.signals.push(GameSignal::PlayerDied {
                lives_left: self.lives,
            });
        }
        let Some(remaining) = self.respawn_ms.as_mut() else {
            return;
        };
        *remaining -= dt_ms;
        if *remaining > 0.0 {
            return;
        }
        self.respawn_ms = None;

        if self.lives > 0 {
            health.revive();
            *velocity = Vec2::ZERO;
            self.fsm.transition(PlayerState::Normal);
            self.invincible_ms = tuning.respawn_invuln_ms;
            self.since_damage_ms = 0.0;
            self.combo = ComboState::default();
            out.respawned = true;
            out.signals.push(GameSignal::Respawned);
            info!("Player respawned with {} lives", self.lives);
        } else if !self.game_over {
            self.game_over = true;
            out.signals.push(GameSignal::GameOver);
            info!("Game over");
        }
    }

    fn tick_dodge(
        &mut self,
        input: &PlayerInput,
        velocity: &mut Vec2,
        tuning: &PlayerTuning,
        out: &mut PlayerOutput,
    ) {
        let requested = input.dodge_held && (input.left_just_pressed || input.right_just_pressed);
        if requested
            && self.fsm.is(PlayerState::Normal)
            && self.since_dodge_ms >= tuning.dodge_cooldown_ms
        {
            self.dodge_dir = if input.left_just_pressed { -1.0 } else { 1.0 };
            self.since_dodge_ms = 0.0;
            self.crouching = false;
            self.jump_hold_ms = None;
            self.fsm.transition(PlayerState::Dodging);
            self.fsm.update_facing(self.dodge_dir);
            out.signals.push(GameSignal::Dodged {
                direction: self.dodge_dir,
            });
            debug!("Dodge toward {}", self.dodge_dir);
        }

        if self.fsm.is(PlayerState::Dodging) {
            velocity.x = self.dodge_dir * tuning.dodge_speed;
            velocity.y = 0.0;
        }
    }

    fn tick_movement(
        &mut self,
        dt_ms: f32,
        input: &PlayerInput,
        velocity: &mut Vec2,
        tuning: &PlayerTuning,
    ) {
        match self.fsm.state() {
            PlayerState::Dodging => return,
            PlayerState::Normal if self.is_channeling(input) => {
                // Direction input steers the power, not the body
                self.crouching = false;
                velocity.x = 0.0;
            }
            PlayerState::Normal => {
                self.crouching = self.on_ground && input.down;
                let axis = input.axis_x();
                let speed = if self.crouching {
                    tuning.walk_speed * tuning.crouch_speed_factor
                } else if input.run_held {
                    tuning.run_speed
                } else {
                    tuning.walk_speed
                };
                velocity.x = axis * speed;
                self.fsm.update_facing(axis);
            }
            PlayerState::Attacking => {
                if self.attack_kind != Some(AttackKind::DiveKick) {
                    velocity.x = 0.0;
                }
            }
            PlayerState::Hurt | PlayerState::Dead => {}
        }
        velocity.y -= tuning.gravity * dt_ms / 1000.0;
    }

    fn tick_jump(
        &mut self,
        dt_ms: f32,
        input: &PlayerInput,
        velocity: &mut Vec2,
        tuning: &PlayerTuning,
        out: &mut PlayerOutput,
    ) {
        if let Some(age) = self.jump_buffer_age_ms.as_mut() {
            *age += dt_ms;
            if *age > tuning.jump_buffer_ms {
                self.jump_buffer_age_ms = None;
            }
        }
        if input.jump_pressed {
            self.jump_buffer_age_ms = Some(0.0);
        }

        // Hold to keep rising at full speed, up to the cap
        if let Some(held) = self.jump_hold_ms.as_mut() {
            *held += dt_ms;
            if !input.jump_held || *held > tuning.max_jump_hold_ms || velocity.y <= 0.0 {
                self.jump_hold_ms = None;
            } else {
                velocity.y = tuning.jump_velocity;
            }
        }

        if !self.fsm.is(PlayerState::Normal) || self.jump_buffer_age_ms.is_none() {
            return;
        }

        let can_ground_jump = self.on_ground
            || (!self.jumped_since_ground && self.airborne_ms <= tuning.coyote_ms);

        if can_ground_jump {
            velocity.y = tuning.jump_velocity;
            self.jumped_since_ground = true;
            self.jump_buffer_age_ms = None;
            self.jump_hold_ms = Some(0.0);
            self.crouching = false;
            out.signals.push(GameSignal::Jumped { double: false });
            debug!(
                "Ground jump: on_ground={}, airborne_ms={}",
                self.on_ground, self.airborne_ms
            );
        } else if input.jump_pressed && self.abilities.double_jump && !self.air_jump_used {
            velocity.y = tuning.double_jump_velocity;
            self.jumped_since_ground = true;
            self.air_jump_used = true;
            self.jump_buffer_age_ms = None;
            self.jump_hold_ms = None;
            out.signals.push(GameSignal::Jumped { double: true });
            debug!("Double jump");
        }
    }

    fn tick_attacks(
        &mut self,
        input: &PlayerInput,
        velocity: &mut Vec2,
        tuning: &PlayerTuning,
        combat: &CombatTuning,
        out: &mut PlayerOutput,
    ) {
        if !self.fsm.is(PlayerState::Normal) {
            return;
        }
        let kind = if input.kick_pressed && !self.on_ground && input.down {
            AttackKind::DiveKick
        } else if input.punch_pressed {
            AttackKind::Punch
        } else if input.kick_pressed {
            AttackKind::Kick
        } else if input.sword_pressed && self.abilities.sword {
            AttackKind::Sword
        } else {
            return;
        };
        let Some(spec) = kind.spec(combat).copied() else {
            return;
        };

        let count = self.combo.register(kind, combat.combo_window_ms);
        let damage =
            spec.damage * combo_multiplier(count, combat.combo_step, combat.combo_max_steps);
        let facing = self.fsm.facing_sign();
        let size = spec.size();
        let offset = if kind == AttackKind::DiveKick {
            Vec2::new(facing * size.x * 0.5, -self.body_height(tuning) * 0.5)
        } else {
            Vec2::new(facing * (size.x * 0.5 + combat.reach_gap), 0.0)
        };

        if kind == AttackKind::DiveKick {
            velocity.x = facing * combat.dive_kick_velocity[0];
            velocity.y = combat.dive_kick_velocity[1];
        } else {
            velocity.x = 0.0;
        }
        self.jump_hold_ms = None;
        self.attack_kind = Some(kind);
        self.attack_duration_ms = spec.duration_ms;
        self.attack_started = Some(kind);
        self.fsm.transition(PlayerState::Attacking);

        out.commits.push(AttackCommit {
            kind,
            damage,
            offset,
            size,
            duration_ms: spec.duration_ms,
        });
        out.signals.push(GameSignal::AttackCommitted { kind, damage });
        debug!("Attack {:?} x{} for {:.1}", kind, count, damage);
    }

    fn tick_tuning(
        &mut self,
        dt_ms: f32,
        input: &PlayerInput,
        tuning: &PlayerTuning,
        out: &mut PlayerOutput,
    ) {
        if !self.abilities.tuning {
            self.tuning_active = false;
            return;
        }
        let powers = &tuning.tuning;
        let facing = self.fsm.facing_sign();

        if input.tuning_pressed {
            if input.up
                && !self.on_ground
                && self.abilities.full_tuning
                && self.energy >= powers.platform_cost
            {
                self.energy -= powers.platform_cost;
                out.powers.push(PowerAction::RaisePlatform {
                    offset: Vec2::new(0.0, -PLATFORM_DROP),
                });
            } else if self.energy >= powers.deflect_cost {
                self.energy -= powers.deflect_cost;
                out.powers.push(PowerAction::Deflect { direction: facing });
            }
        }

        if input.tuning_held && self.energy > 0.0 {
            self.tuning_active = true;
            self.energy = (self.energy - powers.drain_per_sec * dt_ms / 1000.0).max(0.0);
            let axis = input.axis_x();
            if axis * facing > 0.0 {
                out.powers.push(PowerAction::Push {
                    direction: facing,
                    dt_ms,
                });
            } else if axis * facing < 0.0 {
                out.powers.push(PowerAction::Pull { direction: facing });
            }
        } else {
            self.tuning_active = false;
            self.energy =
                (self.energy + powers.recharge_per_sec * dt_ms / 1000.0).min(powers.max_energy);
        }
    }
}

/// The player as a resolver target.
pub struct PlayerBody<'a> {
    pub controller: &'a mut PlayerController,
    pub health: &'a mut Health,
    pub tuning: &'a PlayerTuning,
}

impl Damageable for PlayerBody<'_> {
    fn can_be_hit(&self) -> bool {
        self.controller.can_be_hit(self.tuning)
    }

    fn receive_hit(&mut self, hit: &Hit) -> DamageOutcome {
        self.controller
            .take_damage(self.health, hit.damage, self.tuning)
    }

    fn knockback_for(&self, direction: f32, _kind: AttackKind, _tuning: &CombatTuning) -> Vec2 {
        self.controller.knockback(direction, self.tuning)
    }
}
