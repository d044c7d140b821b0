//! Signals domain: tests for progress bookkeeping.

use bevy::prelude::{Entity, Vec2};
use serde_json::json;

use super::{Ability, GameSignal, Progress};
use crate::combat::AttackKind;

#[test]
fn test_score_accumulates() {
    let mut progress = Progress::default();
    progress.add_score(100);
    progress.add_score(200);
    assert_eq!(progress.score, 300);
}

#[test]
fn test_unlock_reports_first_time_only() {
    let mut progress = Progress::default();
    assert!(progress.unlock(Ability::Tuning));
    assert!(!progress.unlock(Ability::Tuning));
    assert!(progress.unlocked.contains(&Ability::Tuning));
    assert!(!progress.unlocked.contains(&Ability::Sword));
}

#[test]
fn test_signals_serialize_with_their_variant_tag() {
    let committed = GameSignal::AttackCommitted {
        kind: AttackKind::Kick,
        damage: 15.0,
    };
    assert_eq!(
        serde_json::to_value(&committed).ok(),
        Some(json!({ "signal": "AttackCommitted", "kind": "Kick", "damage": 15.0 }))
    );

    let reset = serde_json::to_value(&GameSignal::ComboReset).ok();
    assert_eq!(reset, Some(json!({ "signal": "ComboReset" })));
}

#[test]
fn test_hurt_signal_serializes_its_entity_and_position_fields() {
    let hurt = GameSignal::ActorHurt {
        entity: Entity::from_bits(42),
        amount: 10.0,
        hp: 20.0,
        max_hp: 30.0,
    };
    let value = serde_json::to_value(&hurt).unwrap();
    assert_eq!(value["signal"], "ActorHurt");
    assert_eq!(value["hp"], 20.0);
    assert!(value.get("entity").is_some());

    let knockout = serde_json::to_value(&GameSignal::KnockOut {
        position: Vec2::new(3.0, 4.0),
    })
    .unwrap();
    assert_eq!(knockout["position"], json!([3.0, 4.0]));
}
