//! Core domain: tests for health, the actor state machine, and hit-stop.

use bevy::prelude::Vec2;

use super::{ActorState, DamageOutcome, Health, HitStop, SimRng, Team, aabb_overlap, direction_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Busy,
}

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_clamps_at_zero_and_dies_once() {
    let mut health = Health::new(30.0);

    assert_eq!(health.take_damage(10.0), DamageOutcome::Damaged);
    assert_eq!(health.take_damage(50.0), DamageOutcome::Lethal);
    assert_eq!(health.current(), 0.0);
    assert!(health.is_dead());

    // Further hits on a dead actor are ignored, never a second death
    assert_eq!(health.take_damage(5.0), DamageOutcome::Ignored);
    assert_eq!(health.current(), 0.0);
}

#[test]
fn test_health_non_increasing_under_damage() {
    let mut health = Health::new(100.0);
    let mut last = health.current();
    for amount in [3.0, 0.0, -4.0, 12.5, 40.0, 60.0] {
        health.take_damage(amount);
        assert!(health.current() <= last);
        assert!(health.current() >= 0.0);
        last = health.current();
    }
}

#[test]
fn test_heal_clamps_to_max_and_skips_dead() {
    let mut health = Health::new(100.0);
    health.take_damage(10.0);
    assert_eq!(health.heal(25.0), 10.0);
    assert_eq!(health.current(), 100.0);

    health.take_damage(100.0);
    assert_eq!(health.heal(50.0), 0.0);
    assert!(health.is_dead());
}

#[test]
fn test_revive_restores_full_health() {
    let mut health = Health::new(100.0);
    health.take_damage(100.0);
    health.revive();
    assert!(!health.is_dead());
    assert_eq!(health.current(), 100.0);
}

// -----------------------------------------------------------------------------
// ActorState tests
// -----------------------------------------------------------------------------

#[test]
fn test_transition_resets_timer() {
    let mut fsm = ActorState::new(Phase::Idle);
    fsm.advance(250.0);
    assert_eq!(fsm.timer_ms(), 250.0);

    fsm.transition(Phase::Busy);
    assert!(fsm.is(Phase::Busy));
    assert_eq!(fsm.timer_ms(), 0.0);
}

#[test]
fn test_skip_to_never_rewinds() {
    let mut fsm = ActorState::new(Phase::Busy);
    fsm.advance(600.0);
    fsm.skip_to(500.0);
    assert_eq!(fsm.timer_ms(), 600.0);
    fsm.transition(Phase::Busy);
    fsm.skip_to(500.0);
    assert_eq!(fsm.timer_ms(), 500.0);
}

#[test]
fn test_facing_is_sticky_at_zero_velocity() {
    let mut fsm = ActorState::new(Phase::Idle);
    fsm.update_facing(-10.0);
    assert!(!fsm.facing_right());
    fsm.update_facing(0.0);
    assert!(!fsm.facing_right());
    assert_eq!(fsm.facing_sign(), -1.0);
    fsm.update_facing(3.0);
    assert!(fsm.facing_right());
}

#[test]
fn test_direction_of_treats_zero_as_positive() {
    assert_eq!(direction_of(0.0), 1.0);
    assert_eq!(direction_of(-0.5), -1.0);
    assert_eq!(direction_of(12.0), 1.0);
}

// -----------------------------------------------------------------------------
// HitStop tests
// -----------------------------------------------------------------------------

#[test]
fn test_hit_stop_supersedes_instead_of_stacking() {
    let mut hit_stop = HitStop::default();
    hit_stop.start(100.0);
    hit_stop.tick(30.0);
    hit_stop.start(40.0);
    assert_eq!(hit_stop.remaining_ms(), 40.0);
}

#[test]
fn test_hit_stop_is_capped() {
    let mut hit_stop = HitStop::default();
    hit_stop.start(5000.0);
    assert_eq!(hit_stop.remaining_ms(), HitStop::MAX_MS);
}

#[test]
fn test_hit_stop_freezes_from_the_next_frame() {
    let mut hit_stop = HitStop::default();
    hit_stop.start(50.0);
    assert!(hit_stop.is_active());
    assert!(!hit_stop.is_frozen());

    assert!(!hit_stop.begin_frame(16.0));
    assert!(hit_stop.is_frozen());

    assert!(!hit_stop.begin_frame(20.0));
    assert!(!hit_stop.begin_frame(20.0));
    assert!(hit_stop.begin_frame(20.0));
    assert!(!hit_stop.is_frozen());
}

#[test]
fn test_hit_stop_freezes_for_its_full_duration() {
    let mut hit_stop = HitStop::default();
    hit_stop.start(40.0);

    // The requesting frame's delta is not charged to the freeze
    hit_stop.begin_frame(16.0);
    assert_eq!(hit_stop.remaining_ms(), 40.0);

    let mut frozen_ms = 0.0;
    while hit_stop.is_frozen() {
        hit_stop.begin_frame(10.0);
        frozen_ms += 10.0;
    }
    assert_eq!(frozen_ms, 40.0);
}

#[test]
fn test_hit_stop_reports_release_once() {
    let mut hit_stop = HitStop::default();
    hit_stop.start(50.0);
    assert!(!hit_stop.tick(20.0));
    assert!(hit_stop.is_active());
    assert!(hit_stop.tick(40.0));
    assert!(!hit_stop.is_active());
    assert!(!hit_stop.tick(40.0));
}

// -----------------------------------------------------------------------------
// Misc
// -----------------------------------------------------------------------------

#[test]
fn test_seeded_rng_is_reproducible() {
    let mut a = SimRng::from_seed(7);
    let mut b = SimRng::from_seed(7);
    for _ in 0..8 {
        let x = a.range(1000.0, 2000.0);
        assert_eq!(x, b.range(1000.0, 2000.0));
        assert!((1000.0..2000.0).contains(&x));
    }
    assert_eq!(a.range(5.0, 5.0), 5.0);
}

#[test]
fn test_team_opposing() {
    assert_eq!(Team::Player.opposing(), Team::Enemy);
    assert_eq!(Team::Enemy.opposing(), Team::Player);
}

#[test]
fn test_aabb_overlap_excludes_touching_edges() {
    let half = Vec2::splat(10.0);
    assert!(aabb_overlap(Vec2::ZERO, half, Vec2::new(19.0, 0.0), half));
    assert!(!aabb_overlap(Vec2::ZERO, half, Vec2::new(20.0, 0.0), half));
    assert!(!aabb_overlap(Vec2::ZERO, half, Vec2::new(0.0, 25.0), half));
}
