//! Combat domain: overlap resolution between attack volumes and bodies.

use bevy::prelude::*;

use crate::combat::attacks::{AttackKind, AttackRegistry, VolumeId};
use crate::content::CombatTuning;
use crate::core::{DamageOutcome, Team, aabb_overlap, direction_of};

/// One landed attack, as seen by the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub kind: AttackKind,
    pub damage: f32,
    /// +1 pushes the target right, -1 left.
    pub direction: f32,
    pub knockback: Vec2,
}

/// Anything an attack volume can land on.
pub trait Damageable {
    /// False while dead, invulnerable, or otherwise not a valid target.
    fn can_be_hit(&self) -> bool;

    fn receive_hit(&mut self, hit: &Hit) -> DamageOutcome;

    fn knockback_resist(&self) -> f32 {
        1.0
    }

    fn score_value(&self) -> u32 {
        0
    }

    fn knockback_for(&self, direction: f32, kind: AttackKind, tuning: &CombatTuning) -> Vec2 {
        knockback_vector(direction, kind, self.knockback_resist(), tuning)
    }
}

/// Base knockback scaled down by resistance, with the kick-class bonus.
pub fn knockback_vector(direction: f32, kind: AttackKind, resist: f32, tuning: &CombatTuning) -> Vec2 {
    let mut lateral = direction * tuning.knockback_force / resist.max(1.0);
    let mut lift = tuning.knockback_lift;
    if kind.is_kick_class() {
        lateral *= tuning.kick_lateral_bonus;
        lift = tuning.kick_lift;
    }
    Vec2::new(lateral, lift)
}

#[derive(Debug)]
pub struct Target<D> {
    pub entity: Entity,
    pub center: Vec2,
    pub half_size: Vec2,
    pub body: D,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakableTarget {
    pub entity: Entity,
    pub center: Vec2,
    pub half_size: Vec2,
    pub intact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub volume: VolumeId,
    pub attacker: Entity,
    pub target: Entity,
    pub kind: AttackKind,
    pub damage: f32,
    pub knockback: Vec2,
    pub outcome: DamageOutcome,
    pub position: Vec2,
    pub score_value: u32,
}

#[derive(Debug, Default)]
pub struct ResolveReport {
    pub contacts: Vec<Contact>,
    pub shattered: Vec<(Entity, Vec2)>,
    /// Freeze requested by the most recent contact.
    pub hit_stop_ms: Option<f32>,
}

/// Resolve every live volume of `attacker_team` against `targets`.
///
/// Player volumes break every intact breakable they overlap and keep going.
/// A volume lands on the first hittable overlapping target in slice order,
/// then is retired; a volume that lands nothing stays live.
pub fn resolve_hits<D: Damageable>(
    registry: &mut AttackRegistry,
    attacker_team: Team,
    targets: &mut [Target<D>],
    breakables: &mut [BreakableTarget],
    tuning: &CombatTuning,
    report: &mut ResolveReport,
) {
    for id in registry.ids() {
        let Some(volume) = registry.get(id) else {
            continue;
        };
        if volume.team != attacker_team {
            continue;
        }
        let volume = volume.clone();

        if volume.team == Team::Player {
            for breakable in breakables.iter_mut().filter(|b| b.intact) {
                if aabb_overlap(volume.center, volume.half_size, breakable.center, breakable.half_size) {
                    breakable.intact = false;
                    report.shattered.push((breakable.entity, breakable.center));
                }
            }
        }

        let Some(target) = targets.iter_mut().find(|t| {
            t.entity != volume.owner
                && t.body.can_be_hit()
                && aabb_overlap(volume.center, volume.half_size, t.center, t.half_size)
        }) else {
            continue;
        };

        let direction = direction_of(target.center.x - volume.owner_x);
        let hit = Hit {
            kind: volume.kind,
            damage: volume.damage,
            direction,
            knockback: target.body.knockback_for(direction, volume.kind, tuning),
        };
        let outcome = target.body.receive_hit(&hit);
        if !outcome.landed() {
            continue;
        }
        registry.retire(id);

        report.contacts.push(Contact {
            volume: id,
            attacker: volume.owner,
            target: target.entity,
            kind: volume.kind,
            damage: volume.damage,
            knockback: hit.knockback,
            outcome,
            position: target.center,
            score_value: target.body.score_value(),
        });
        report.hit_stop_ms = Some(volume.kind.hit_stop_ms(tuning));
    }
}
