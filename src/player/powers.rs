//! Player domain: what the tuning powers do to the things around the player.

use bevy::prelude::*;

use crate::combat::{AttackKind, AttackRegistry};
use crate::content::TuningPowers;
use crate::core::Team;

/// Push and pull only reach things roughly level with the player.
pub const POWER_VERTICAL_REACH: f32 = 40.0;

/// True when `target` sits in front of `origin` within `range`.
pub fn in_front(origin: Vec2, direction: f32, target: Vec2, range: f32) -> bool {
    let dx = target.x - origin.x;
    dx * direction > 0.0 && dx.abs() <= range && (target.y - origin.y).abs() <= POWER_VERTICAL_REACH
}

/// Velocity imparted by one push tick, or `None` when out of reach.
pub fn push_impulse(origin: Vec2, direction: f32, target: Vec2, powers: &TuningPowers) -> Option<Vec2> {
    in_front(origin, direction, target, powers.push_range)
        .then(|| Vec2::new(direction * powers.push_force, powers.push_lift))
}

/// Horizontal velocity that drags a pushable back toward the player.
pub fn pull_velocity(origin: Vec2, direction: f32, target: Vec2, powers: &TuningPowers) -> Option<f32> {
    in_front(origin, direction, target, powers.pull_range).then(|| -direction * powers.pull_force)
}

/// Turn every deflectable enemy projectile close enough to `origin` around. Ranged shots
/// come back harder; hurled objects come back at a flat damage.
/// Returns where each deflection happened.
pub fn deflect_projectiles(
    registry: &mut AttackRegistry,
    source: Entity,
    origin: Vec2,
    powers: &TuningPowers,
) -> Vec<Vec2> {
    let mut deflected = Vec::new();
    for id in registry.ids() {
        let Some(volume) = registry.get_mut(id) else {
            continue;
        };
        if volume.team != Team::Enemy || !volume.is_projectile() || !volume.deflectable {
            continue;
        }
        let distance = volume.center.distance(origin);
        let damage = match volume.kind {
            AttackKind::Hurled if distance <= powers.hurled_deflect_range => {
                powers.hurled_return_damage
            }
            AttackKind::EnemyRanged if distance <= powers.deflect_range => {
                volume.damage * powers.deflect_damage_mult
            }
            _ => continue,
        };
        volume.deflect(source, origin.x, damage);
        deflected.push(volume.center);
    }
    deflected
}
