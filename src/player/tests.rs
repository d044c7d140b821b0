//! Player domain: tests for movement timing, combos, dodge, damage, and powers.

use std::time::Duration;

use avian2d::prelude::{Collider, CollisionLayers, Gravity, PhysicsPlugins, RigidBody};
use bevy::asset::AssetPlugin;
use bevy::mesh::MeshPlugin;
use bevy::prelude::{
    App, Entity, Fixed, IntoScheduleConfigs, MinimalPlugins, Startup, Time, Transform,
    TransformPlugin, Update, Vec2, With,
};
use bevy::scene::ScenePlugin;
use bevy::time::TimeUpdateStrategy;

use super::systems::{detect_ground, spawn_player, tick_player};
use super::{
    Player, PlayerController, PlayerInput, PlayerOutput, PlayerState, PowerAction, PowerEvent,
    deflect_projectiles, pull_velocity, push_impulse,
};
use crate::combat::{AttackKind, AttackRegistry, AttackVolume};
use crate::content::{CombatTuning, PlayerTuning};
use crate::core::{DamageOutcome, GameLayer, Health, Team};
use crate::signals::{Ability, GameSignal};
use crate::world::Checkpoint;

const DT: f32 = 10.0;

struct Rig {
    controller: PlayerController,
    health: Health,
    velocity: Vec2,
    tuning: PlayerTuning,
    combat: CombatTuning,
}

impl Rig {
    fn grounded() -> Self {
        let tuning = PlayerTuning::default();
        let mut controller = PlayerController::new(&tuning);
        controller.set_grounded(true);
        Self {
            health: Health::new(tuning.max_health),
            controller,
            velocity: Vec2::ZERO,
            tuning,
            combat: CombatTuning::default(),
        }
    }

    fn step(&mut self, input: PlayerInput) -> PlayerOutput {
        let mut out = PlayerOutput::default();
        self.controller.tick(
            DT,
            &input,
            &mut self.velocity,
            &mut self.health,
            &self.tuning,
            &self.combat,
            &mut out,
        );
        out
    }

    /// Run `ticks` idle ticks and gather every signal.
    fn idle(&mut self, ticks: usize) -> Vec<GameSignal> {
        (0..ticks)
            .flat_map(|_| self.step(PlayerInput::default()).signals)
            .collect()
    }

    fn hit(&mut self, amount: f32) -> DamageOutcome {
        self.controller
            .take_damage(&mut self.health, amount, &self.tuning)
    }
}

fn press(f: impl FnOnce(&mut PlayerInput)) -> PlayerInput {
    let mut input = PlayerInput::default();
    f(&mut input);
    input
}

fn dodge_right() -> PlayerInput {
    press(|i| {
        i.dodge_held = true;
        i.right = true;
        i.right_just_pressed = true;
    })
}

fn punch() -> PlayerInput {
    press(|i| i.punch_pressed = true)
}

fn jump() -> PlayerInput {
    press(|i| {
        i.jump_pressed = true;
        i.jump_held = true;
    })
}

fn jumped(out: &PlayerOutput) -> Option<bool> {
    out.signals.iter().find_map(|s| match s {
        GameSignal::Jumped { double } => Some(*double),
        _ => None,
    })
}

// -----------------------------------------------------------------------------
// Movement tests
// -----------------------------------------------------------------------------

#[test]
fn test_walk_run_and_crouch_speeds() {
    let mut rig = Rig::grounded();

    rig.step(press(|i| i.right = true));
    assert_eq!(rig.velocity.x, 150.0);

    rig.step(press(|i| {
        i.right = true;
        i.run_held = true;
    }));
    assert_eq!(rig.velocity.x, 280.0);

    rig.step(press(|i| {
        i.left = true;
        i.down = true;
    }));
    assert_eq!(rig.velocity.x, -75.0);
    assert!(rig.controller.is_crouching());
    assert_eq!(rig.controller.body_height(&rig.tuning), 30.0);
    assert!(!rig.controller.facing_right());
}

#[test]
fn test_crouch_needs_ground() {
    let mut rig = Rig::grounded();
    rig.controller.set_grounded(false);
    rig.step(press(|i| i.down = true));
    assert!(!rig.controller.is_crouching());
    assert_eq!(rig.controller.body_height(&rig.tuning), 44.0);
}

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_sets_jump_velocity() {
    let mut rig = Rig::grounded();
    let out = rig.step(jump());
    assert_eq!(jumped(&out), Some(false));
    assert_eq!(rig.velocity.y, 420.0);
}

#[test]
fn test_coyote_jump_allowed_at_100ms() {
    let mut rig = Rig::grounded();
    rig.controller.set_grounded(false);
    rig.idle(9);

    let out = rig.step(jump());
    assert_eq!(jumped(&out), Some(false));
    assert_eq!(rig.velocity.y, 420.0);
}

#[test]
fn test_coyote_jump_refused_after_100ms() {
    let mut rig = Rig::grounded();
    rig.controller.set_grounded(false);
    rig.idle(10);

    let out = rig.step(jump());
    assert_eq!(jumped(&out), None);
    assert!(rig.velocity.y < 0.0);
}

#[test]
fn test_no_coyote_jump_after_jumping_off_the_ground() {
    let mut rig = Rig::grounded();
    rig.step(jump());
    rig.controller.set_grounded(false);

    let out = rig.step(jump());
    assert_eq!(jumped(&out), None);
}

#[test]
fn test_buffered_jump_fires_on_landing_within_100ms() {
    let mut rig = Rig::grounded();
    rig.controller.set_grounded(false);
    rig.idle(20);

    assert_eq!(jumped(&rig.step(jump())), None);
    rig.idle(9);
    rig.controller.set_grounded(true);

    let out = rig.step(PlayerInput::default());
    assert_eq!(jumped(&out), Some(false));
    assert_eq!(rig.velocity.y, 420.0);
}

#[test]
fn test_buffered_jump_expires_after_100ms() {
    let mut rig = Rig::grounded();
    rig.controller.set_grounded(false);
    rig.idle(20);

    rig.step(jump());
    rig.idle(10);
    rig.controller.set_grounded(true);

    let out = rig.step(PlayerInput::default());
    assert_eq!(jumped(&out), None);
}

#[test]
fn test_double_jump_once_per_airtime_when_unlocked() {
    let mut rig = Rig::grounded();
    rig.controller.set_grounded(false);
    rig.idle(20);
    assert_eq!(jumped(&rig.step(jump())), None);

    rig.controller.unlock(Ability::DoubleJump, &rig.tuning);
    let out = rig.step(jump());
    assert_eq!(jumped(&out), Some(true));
    assert_eq!(rig.velocity.y, 350.0);

    assert_eq!(jumped(&rig.step(jump())), None);

    // Landing restores it
    rig.controller.set_grounded(true);
    rig.step(jump());
    rig.controller.set_grounded(false);
    assert_eq!(jumped(&rig.step(jump())), Some(true));
}

#[test]
fn test_holding_jump_sustains_rise_up_to_cap() {
    let mut rig = Rig::grounded();
    rig.step(jump());
    rig.controller.set_grounded(false);

    let held = press(|i| i.jump_held = true);
    for _ in 0..20 {
        rig.step(held);
        assert_eq!(rig.velocity.y, 420.0);
    }
    rig.step(held);
    assert!(rig.velocity.y < 420.0);
}

#[test]
fn test_releasing_jump_stops_sustain() {
    let mut rig = Rig::grounded();
    rig.step(jump());
    rig.controller.set_grounded(false);
    rig.step(PlayerInput::default());
    assert!(rig.velocity.y < 420.0);
}

// -----------------------------------------------------------------------------
// Combo tests
// -----------------------------------------------------------------------------

fn committed_damage(out: &PlayerOutput) -> Option<f32> {
    out.commits.first().map(|c| c.damage)
}

#[test]
fn test_punch_chain_scales_damage_and_caps() {
    let mut rig = Rig::grounded();
    let expected = [10.0, 11.5, 13.0, 14.5, 16.0, 16.0];

    for (i, want) in expected.iter().enumerate() {
        if i > 0 {
            // Punch recovers after 300 ms, well inside the 800 ms window
            rig.idle(29);
        }
        let out = rig.step(punch());
        let damage = committed_damage(&out).expect("punch should commit");
        assert!((damage - want).abs() < 1e-4, "hit {} dealt {}", i + 1, damage);
    }
}

#[test]
fn test_combo_breaks_after_window_and_restarts() {
    let mut rig = Rig::grounded();
    rig.step(punch());
    rig.idle(29);
    rig.step(punch());
    assert_eq!(rig.controller.combo.count(), 2);

    let signals = rig.idle(80);
    assert_eq!(
        signals
            .iter()
            .filter(|s| matches!(s, GameSignal::ComboReset))
            .count(),
        1
    );
    assert_eq!(rig.controller.combo.count(), 0);

    let out = rig.step(punch());
    assert_eq!(committed_damage(&out), Some(10.0));
}

#[test]
fn test_attack_locks_out_new_attacks_and_movement() {
    let mut rig = Rig::grounded();
    rig.step(punch());
    assert_eq!(rig.controller.state(), PlayerState::Attacking);

    let out = rig.step(press(|i| {
        i.kick_pressed = true;
        i.right = true;
    }));
    assert!(out.commits.is_empty());
    assert_eq!(rig.velocity.x, 0.0);
}

#[test]
fn test_attack_volume_sits_in_front_of_player() {
    let mut rig = Rig::grounded();
    let out = rig.step(press(|i| i.kick_pressed = true));
    let commit = out.commits[0];
    assert_eq!(commit.kind, AttackKind::Kick);
    assert_eq!(commit.offset, Vec2::new(30.0, 0.0));
    assert_eq!(commit.size, Vec2::new(40.0, 24.0));
    assert!(out.signals.iter().any(|s| matches!(
        s,
        GameSignal::AttackCommitted {
            kind: AttackKind::Kick,
            ..
        }
    )));
}

#[test]
fn test_sword_requires_unlock() {
    let mut rig = Rig::grounded();
    let sword = press(|i| i.sword_pressed = true);
    assert!(rig.step(sword).commits.is_empty());

    rig.controller.unlock(Ability::Sword, &rig.tuning);
    let out = rig.step(sword);
    assert_eq!(committed_damage(&out), Some(25.0));
}

#[test]
fn test_dive_kick_only_in_air_with_down() {
    let mut rig = Rig::grounded();
    rig.controller.set_grounded(false);
    let out = rig.step(press(|i| {
        i.kick_pressed = true;
        i.down = true;
    }));
    assert_eq!(out.commits[0].kind, AttackKind::DiveKick);
    assert_eq!(rig.velocity, Vec2::new(250.0, -400.0));
    assert!(out.commits[0].offset.y < 0.0);
}

// -----------------------------------------------------------------------------
// Dodge tests
// -----------------------------------------------------------------------------

#[test]
fn test_dodge_invincible_for_first_250ms_of_350() {
    let mut rig = Rig::grounded();
    let out = rig.step(dodge_right());
    assert_eq!(rig.controller.state(), PlayerState::Dodging);
    assert_eq!(rig.velocity.x, 350.0);
    assert!(out.signals.contains(&GameSignal::Dodged { direction: 1.0 }));

    rig.idle(24);
    assert!(rig.controller.is_invincible(&rig.tuning));
    rig.idle(1);
    assert!(!rig.controller.is_invincible(&rig.tuning));

    rig.idle(9);
    assert_eq!(rig.controller.state(), PlayerState::Dodging);
    rig.idle(1);
    assert_eq!(rig.controller.state(), PlayerState::Normal);
}

#[test]
fn test_dodge_cooldown_counts_from_dodge_start() {
    let mut rig = Rig::grounded();
    rig.step(dodge_right());
    rig.idle(58);

    rig.step(dodge_right());
    assert_eq!(rig.controller.state(), PlayerState::Normal);

    rig.step(dodge_right());
    assert_eq!(rig.controller.state(), PlayerState::Dodging);
}

#[test]
fn test_dodge_blocked_while_attacking() {
    let mut rig = Rig::grounded();
    rig.step(punch());
    rig.step(dodge_right());
    assert_eq!(rig.controller.state(), PlayerState::Attacking);
}

#[test]
fn test_hit_after_invulnerable_part_cancels_dodge() {
    let mut rig = Rig::grounded();
    rig.step(dodge_right());
    assert_eq!(rig.hit(10.0), DamageOutcome::Ignored);

    rig.idle(26);
    assert_eq!(rig.hit(10.0), DamageOutcome::Damaged);
    assert_eq!(rig.controller.state(), PlayerState::Hurt);
}

// -----------------------------------------------------------------------------
// Damage, regeneration, and lives tests
// -----------------------------------------------------------------------------

#[test]
fn test_hit_grants_invincibility_window() {
    let mut rig = Rig::grounded();
    assert_eq!(rig.hit(10.0), DamageOutcome::Damaged);
    assert_eq!(rig.health.current(), 90.0);
    assert_eq!(rig.hit(10.0), DamageOutcome::Ignored);

    rig.idle(199);
    assert_eq!(rig.hit(10.0), DamageOutcome::Ignored);
    rig.idle(1);
    assert_eq!(rig.hit(10.0), DamageOutcome::Damaged);
}

#[test]
fn test_hurt_blocks_movement_and_jump_for_300ms() {
    let mut rig = Rig::grounded();
    rig.hit(10.0);
    rig.velocity = Vec2::new(-250.0, 0.0);

    let out = rig.step(press(|i| {
        i.right = true;
        i.jump_pressed = true;
    }));
    assert_eq!(jumped(&out), None);
    assert_eq!(rig.velocity.x, -250.0);

    rig.idle(29);
    assert_eq!(rig.controller.state(), PlayerState::Normal);
}

#[test]
fn test_regeneration_waits_five_seconds() {
    let mut rig = Rig::grounded();
    rig.hit(10.0);

    rig.idle(499);
    assert_eq!(rig.health.current(), 90.0);

    rig.idle(101);
    assert!(rig.health.current() > 91.9 && rig.health.current() < 92.1);
}

#[test]
fn test_death_then_respawn_with_invincibility() {
    let mut rig = Rig::grounded();
    assert_eq!(rig.hit(150.0), DamageOutcome::Lethal);
    assert!(rig.controller.is_dead());
    assert_eq!(rig.controller.lives, 2);

    let first = rig.step(PlayerInput::default());
    assert!(first.signals.contains(&GameSignal::PlayerDied { lives_left: 2 }));

    let signals = rig.idle(149);
    assert!(signals.contains(&GameSignal::Respawned));
    assert!(!rig.controller.is_dead());
    assert_eq!(rig.health.current(), 100.0);
    assert!(rig.controller.is_invincible(&rig.tuning));

    // Respawn protection lasts four seconds
    rig.idle(399);
    assert!(rig.controller.is_invincible(&rig.tuning));
    rig.idle(1);
    assert!(!rig.controller.is_invincible(&rig.tuning));
}

#[test]
fn test_last_life_ends_in_single_game_over() {
    let mut rig = Rig::grounded();
    rig.controller.lives = 1;
    rig.hit(500.0);
    assert_eq!(rig.controller.lives, 0);

    let signals = rig.idle(400);
    let game_overs = signals
        .iter()
        .filter(|s| matches!(s, GameSignal::GameOver))
        .count();
    assert_eq!(game_overs, 1);
    assert!(!signals.contains(&GameSignal::Respawned));
    assert!(rig.controller.is_game_over());
}

#[test]
fn test_dead_player_ignores_damage() {
    let mut rig = Rig::grounded();
    rig.hit(200.0);
    assert_eq!(rig.hit(5.0), DamageOutcome::Ignored);
    assert_eq!(rig.controller.lives, 2);
}

// -----------------------------------------------------------------------------
// Tuning power tests
// -----------------------------------------------------------------------------

#[test]
fn test_tuning_needs_unlock() {
    let mut rig = Rig::grounded();
    let out = rig.step(press(|i| {
        i.tuning_held = true;
        i.tuning_pressed = true;
    }));
    assert!(out.powers.is_empty());
    assert!(!rig.controller.is_tuning());
}

#[test]
fn test_tap_deflects_and_spends_energy() {
    let mut rig = Rig::grounded();
    rig.controller.unlock(Ability::Tuning, &rig.tuning);
    assert_eq!(rig.controller.energy, 100.0);

    let out = rig.step(press(|i| i.tuning_pressed = true));
    assert_eq!(out.powers, vec![PowerAction::Deflect { direction: 1.0 }]);
    assert!((rig.controller.energy - 80.15).abs() < 1e-3);
}

#[test]
fn test_air_tap_with_up_raises_platform_when_fully_unlocked() {
    let mut rig = Rig::grounded();
    rig.controller.unlock(Ability::FullTuning, &rig.tuning);
    rig.controller.set_grounded(false);

    let out = rig.step(press(|i| {
        i.tuning_pressed = true;
        i.up = true;
    }));
    assert!(matches!(
        out.powers.as_slice(),
        [PowerAction::RaisePlatform { .. }]
    ));
}

#[test]
fn test_holding_tuning_pushes_forward_and_pulls_backward() {
    let mut rig = Rig::grounded();
    rig.controller.unlock(Ability::Tuning, &rig.tuning);

    let out = rig.step(press(|i| {
        i.tuning_held = true;
        i.right = true;
    }));
    assert!(matches!(
        out.powers.as_slice(),
        [PowerAction::Push { direction, .. }] if *direction == 1.0
    ));
    assert_eq!(rig.velocity.x, 0.0);

    let out = rig.step(press(|i| {
        i.tuning_held = true;
        i.left = true;
    }));
    assert_eq!(out.powers, vec![PowerAction::Pull { direction: 1.0 }]);
    assert!(rig.controller.facing_right());
}

#[test]
fn test_energy_drains_while_held_and_recharges_otherwise() {
    let mut rig = Rig::grounded();
    rig.controller.unlock(Ability::Tuning, &rig.tuning);
    let held = press(|i| i.tuning_held = true);

    for _ in 0..100 {
        rig.step(held);
    }
    assert!((rig.controller.energy - 75.0).abs() < 1e-2);

    rig.idle(100);
    assert!((rig.controller.energy - 90.0).abs() < 1e-2);

    rig.idle(1000);
    assert_eq!(rig.controller.energy, 100.0);
}

#[test]
fn test_push_impulse_only_in_front_and_in_range() {
    let powers = PlayerTuning::default().tuning;
    let origin = Vec2::ZERO;

    assert_eq!(
        push_impulse(origin, 1.0, Vec2::new(60.0, 0.0), &powers),
        Some(Vec2::new(300.0, 100.0))
    );
    assert_eq!(push_impulse(origin, 1.0, Vec2::new(-60.0, 0.0), &powers), None);
    assert_eq!(push_impulse(origin, 1.0, Vec2::new(140.0, 0.0), &powers), None);
    assert_eq!(
        pull_velocity(origin, -1.0, Vec2::new(-110.0, 10.0), &powers),
        Some(200.0)
    );
}

#[test]
fn test_deflect_reverses_nearby_enemy_projectiles() {
    let powers = PlayerTuning::default().tuning;
    let player = Entity::from_bits(1);
    let boss = Entity::from_bits(2);
    let mut registry = AttackRegistry::default();
    let size = Vec2::splat(12.0);

    let shot = |x: f32| {
        AttackVolume::projectile(
            boss,
            Vec2::new(x, 0.0),
            Team::Enemy,
            AttackKind::EnemyRanged,
            15.0,
            Vec2::new(-250.0, 0.0),
            size,
            3000.0,
        )
        .deflectable()
    };
    let near = registry.insert(shot(50.0));
    let far = registry.insert(shot(90.0));
    let hurled = registry.insert(
        AttackVolume::projectile(
            boss,
            Vec2::new(95.0, 0.0),
            Team::Enemy,
            AttackKind::Hurled,
            25.0,
            Vec2::new(-180.0, -50.0),
            size,
            5000.0,
        )
        .deflectable(),
    );

    let positions = deflect_projectiles(&mut registry, player, Vec2::ZERO, &powers);
    assert_eq!(positions.len(), 2);

    let near = registry.get(near).unwrap();
    assert_eq!(near.team, Team::Player);
    assert_eq!(near.owner, player);
    assert_eq!(near.damage, 30.0);

    assert_eq!(registry.get(far).unwrap().team, Team::Enemy);

    let hurled = registry.get(hurled).unwrap();
    assert_eq!(hurled.team, Team::Player);
    assert_eq!(hurled.damage, 30.0);
}

#[test]
fn test_deflect_leaves_undeflectable_projectiles_alone() {
    let powers = PlayerTuning::default().tuning;
    let player = Entity::from_bits(1);
    let boss = Entity::from_bits(2);
    let mut registry = AttackRegistry::default();

    let solid = registry.insert(AttackVolume::projectile(
        boss,
        Vec2::new(30.0, 0.0),
        Team::Enemy,
        AttackKind::EnemyRanged,
        15.0,
        Vec2::new(-250.0, 0.0),
        Vec2::splat(12.0),
        3000.0,
    ));

    assert!(deflect_projectiles(&mut registry, player, Vec2::ZERO, &powers).is_empty());
    let solid = registry.get(solid).unwrap();
    assert_eq!(solid.team, Team::Enemy);
    assert_eq!(solid.owner, boss);
    assert_eq!(solid.damage, 15.0);
}

#[test]
fn test_deflected_projectile_cannot_bounce_back() {
    let powers = PlayerTuning::default().tuning;
    let player = Entity::from_bits(1);
    let mut registry = AttackRegistry::default();
    let id = registry.insert(
        AttackVolume::projectile(
            Entity::from_bits(2),
            Vec2::new(30.0, 0.0),
            Team::Enemy,
            AttackKind::EnemyRanged,
            15.0,
            Vec2::new(-250.0, 0.0),
            Vec2::splat(12.0),
            3000.0,
        )
        .deflectable(),
    );

    assert_eq!(deflect_projectiles(&mut registry, player, Vec2::ZERO, &powers).len(), 1);
    assert!(!registry.get(id).unwrap().deflectable);
    assert!(deflect_projectiles(&mut registry, player, Vec2::ZERO, &powers).is_empty());
}

// -----------------------------------------------------------------------------
// Physics integration tests
// -----------------------------------------------------------------------------

const FRAME_SECS: f32 = 1.0 / 60.0;
/// Standing body center over a floor whose top is y = 0.
const STANDING_Y: f32 = 22.0;
const CROUCHED_Y: f32 = 15.0;

fn physics_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        AssetPlugin::default(),
        ScenePlugin,
        MeshPlugin,
        PhysicsPlugins::default(),
    ))
    .insert_resource(Gravity(Vec2::NEG_Y * 800.0))
    .insert_resource(Time::<Fixed>::from_seconds(f64::from(FRAME_SECS)))
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        FRAME_SECS,
    )))
    .init_resource::<PlayerInput>()
    .init_resource::<PlayerTuning>()
    .init_resource::<CombatTuning>()
    .init_resource::<AttackRegistry>()
    .insert_resource(Checkpoint {
        position: Vec2::new(0.0, 40.0),
    })
    .add_message::<GameSignal>()
    .add_message::<PowerEvent>()
    .add_systems(Startup, spawn_player)
    .add_systems(Update, (detect_ground, tick_player).chain());

    app.world_mut().spawn((
        RigidBody::Static,
        Collider::rectangle(400.0, 40.0),
        Transform::from_xyz(0.0, -20.0, 0.0),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
    ));
    app.finish();
    app.cleanup();
    app
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// (grounded, crouching, center y) of the single player body.
fn player_body(app: &mut App) -> (bool, bool, f32) {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(&Transform, &PlayerController), With<Player>>();
    let (transform, controller) = query.single(world).unwrap();
    (
        controller.is_grounded(),
        controller.is_crouching(),
        transform.translation.y,
    )
}

fn hold_down(app: &mut App, held: bool) {
    app.world_mut().resource_mut::<PlayerInput>().down = held;
}

#[test]
fn test_player_settles_grounded_on_the_floor() {
    let mut app = physics_app();
    run_frames(&mut app, 120);

    let (grounded, crouching, y) = player_body(&mut app);
    assert!(grounded, "resting player must count as grounded");
    assert!(!crouching);
    assert!((y - STANDING_Y).abs() < 1.0, "rested at {y}");
}

#[test]
fn test_crouch_holds_steady_while_down_is_held() {
    let mut app = physics_app();
    run_frames(&mut app, 120);

    hold_down(&mut app, true);
    let mut crouched_frames = 0;
    for _ in 0..20 {
        app.update();
        let (grounded, crouching, _) = player_body(&mut app);
        assert!(grounded);
        if crouching {
            crouched_frames += 1;
        }
    }
    assert_eq!(crouched_frames, 20);

    // The shorter body keeps its feet on the floor
    let (_, _, y) = player_body(&mut app);
    assert!((y - CROUCHED_Y).abs() < 1.0, "crouched at {y}");

    hold_down(&mut app, false);
    run_frames(&mut app, 5);
    let (grounded, crouching, y) = player_body(&mut app);
    assert!(grounded);
    assert!(!crouching);
    assert!((y - STANDING_Y).abs() < 1.0, "stood up at {y}");
}
