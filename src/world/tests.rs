//! World domain: tests for the boss encounter, platform layouts, and drift.

use bevy::prelude::{Entity, Vec2};

use super::{BossEncounter, LEDGE_SIZE, SkyDrift, WorldBounds, platform_placements};
use crate::combat::PlatformLayout;
use crate::content::EnemyKind;
use crate::signals::Ability;

// -----------------------------------------------------------------------------
// BossEncounter tests
// -----------------------------------------------------------------------------

fn encounter() -> BossEncounter {
    BossEncounter::new(
        EnemyKind::Teleporter,
        500.0,
        Vec2::new(800.0, 40.0),
        vec![Ability::Tuning],
    )
}

#[test]
fn test_encounter_triggers_once_past_the_line() {
    let mut encounter = encounter();
    assert!(!encounter.should_trigger(499.0));
    assert!(encounter.should_trigger(500.0));

    encounter.start(Entity::from_bits(7));
    assert!(encounter.is_started());
    assert!(!encounter.should_trigger(900.0));
}

#[test]
fn test_encounter_pays_out_once_for_its_own_boss() {
    let mut encounter = encounter();
    let boss = Entity::from_bits(7);
    let stranger = Entity::from_bits(8);
    encounter.start(boss);

    assert!(encounter.finish(stranger).is_empty());
    assert!(!encounter.is_defeated());

    assert_eq!(encounter.finish(boss), vec![Ability::Tuning]);
    assert!(encounter.is_defeated());
    assert!(encounter.finish(boss).is_empty());
}

#[test]
fn test_encounter_ignores_defeat_before_start() {
    let mut encounter = encounter();
    assert!(encounter.finish(Entity::from_bits(1)).is_empty());
    assert!(!encounter.is_defeated());
}

#[test]
fn test_world_bounds_default_kill_line_is_below_floor() {
    assert!(WorldBounds::default().kill_y < 0.0);
}

// -----------------------------------------------------------------------------
// Platform layout tests
// -----------------------------------------------------------------------------

#[test]
fn test_static_layout_raises_five_fixed_ledges() {
    let center = Vec2::new(900.0, 0.0);
    let placements = platform_placements(PlatformLayout::Static, center);

    assert_eq!(placements.len(), 5);
    for placement in &placements {
        assert!(placement.drift.is_none());
        assert_eq!(placement.size, LEDGE_SIZE);
        assert!(placement.position.y > center.y);
    }
}

#[test]
fn test_sky_layout_raises_six_drifting_ledges() {
    let placements = platform_placements(PlatformLayout::Sky, Vec2::ZERO);

    assert_eq!(placements.len(), 6);
    assert!(placements.iter().all(|p| p.drift.is_some()));
}

#[test]
fn test_sky_drift_velocity_peaks_at_start_and_reverses_half_period_later() {
    let mut drift = SkyDrift::new(40.0, 2000.0, 0.0);
    let start = drift.velocity_x();
    assert!(start > 0.0);

    drift.advance(1000.0);
    assert!((drift.velocity_x() + start).abs() < 1e-3);

    // Wraps around the period
    drift.advance(1000.0);
    assert!((drift.velocity_x() - start).abs() < 1e-3);
}
