//! Combat domain: attack kinds, attack volumes, and the volume arena.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::{AttackSpec, CombatTuning};
use crate::core::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AttackKind {
    Punch,
    Kick,
    Sword,
    DiveKick,
    EnemyMelee,
    EnemyRanged,
    /// Thrown scenery; can be sent back with a deflect.
    Hurled,
}

impl AttackKind {
    /// Kick-class hits throw targets harder and higher.
    pub fn is_kick_class(self) -> bool {
        matches!(self, AttackKind::Kick | AttackKind::DiveKick)
    }

    pub fn spec(self, tuning: &CombatTuning) -> Option<&AttackSpec> {
        match self {
            AttackKind::Punch => Some(&tuning.punch),
            AttackKind::Kick => Some(&tuning.kick),
            AttackKind::Sword => Some(&tuning.sword),
            AttackKind::DiveKick => Some(&tuning.dive_kick),
            AttackKind::EnemyMelee | AttackKind::EnemyRanged | AttackKind::Hurled => None,
        }
    }

    pub fn hit_stop_ms(self, tuning: &CombatTuning) -> f32 {
        self.spec(tuning)
            .map(|spec| spec.hit_stop_ms)
            .unwrap_or(tuning.default_hit_stop_ms)
    }
}

/// Damage multiplier for the `count`-th attack of a chain (1-based).
pub fn combo_multiplier(count: u32, step: f32, max_steps: u32) -> f32 {
    let steps = count.saturating_sub(1).min(max_steps);
    1.0 + steps as f32 * step
}

/// Hit chain bookkeeping for the player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboState {
    count: u32,
    timer_ms: f32,
    last_kind: Option<AttackKind>,
}

impl ComboState {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    pub fn last_kind(&self) -> Option<AttackKind> {
        self.last_kind
    }

    /// Start or extend the chain and refresh its window. Returns the new count.
    pub fn register(&mut self, kind: AttackKind, window_ms: f32) -> u32 {
        self.count += 1;
        self.timer_ms = window_ms;
        self.last_kind = Some(kind);
        self.count
    }

    /// Returns true on the tick the window runs out and the chain breaks.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.count == 0 {
            return false;
        }
        self.timer_ms -= dt_ms;
        if self.timer_ms <= 0.0 {
            self.timer_ms = 0.0;
            self.count = 0;
            self.last_kind = None;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeMotion {
    /// Melee swing glued to the attacker.
    FollowOwner { offset: Vec2 },
    Projectile { velocity: Vec2 },
}

/// Short-lived hit area. Resolved at most once: retired after its first landed hit.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackVolume {
    pub owner: Entity,
    pub team: Team,
    pub kind: AttackKind,
    pub damage: f32,
    pub center: Vec2,
    pub half_size: Vec2,
    /// Last known attacker position, used for knockback direction.
    pub owner_x: f32,
    pub motion: VolumeMotion,
    pub remaining_ms: f32,
    pub deflectable: bool,
}

impl AttackVolume {
    #[allow(clippy::too_many_arguments)]
    pub fn melee(
        owner: Entity,
        owner_pos: Vec2,
        team: Team,
        kind: AttackKind,
        damage: f32,
        offset: Vec2,
        size: Vec2,
        duration_ms: f32,
    ) -> Self {
        Self {
            owner,
            team,
            kind,
            damage,
            center: owner_pos + offset,
            half_size: size * 0.5,
            owner_x: owner_pos.x,
            motion: VolumeMotion::FollowOwner { offset },
            remaining_ms: duration_ms,
            deflectable: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn projectile(
        owner: Entity,
        origin: Vec2,
        team: Team,
        kind: AttackKind,
        damage: f32,
        velocity: Vec2,
        size: Vec2,
        lifetime_ms: f32,
    ) -> Self {
        Self {
            owner,
            team,
            kind,
            damage,
            center: origin,
            half_size: size * 0.5,
            owner_x: origin.x,
            motion: VolumeMotion::Projectile { velocity },
            remaining_ms: lifetime_ms,
            deflectable: false,
        }
    }

    pub fn deflectable(mut self) -> Self {
        self.deflectable = true;
        self
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.motion, VolumeMotion::Projectile { .. })
    }

    /// Advance one tick. Returns false once the volume should be pruned:
    /// its lifetime ran out or its owner no longer exists.
    pub fn advance(&mut self, dt_ms: f32, owner_pos: Option<Vec2>) -> bool {
        let Some(owner_pos) = owner_pos else {
            return false;
        };
        self.remaining_ms -= dt_ms;
        self.owner_x = owner_pos.x;
        match self.motion {
            VolumeMotion::FollowOwner { offset } => self.center = owner_pos + offset,
            VolumeMotion::Projectile { velocity } => self.center += velocity * (dt_ms / 1000.0),
        }
        self.remaining_ms > 0.0
    }

    /// Send a projectile back at its sender under new ownership.
    pub fn deflect(&mut self, new_owner: Entity, new_owner_x: f32, damage: f32) {
        if let VolumeMotion::Projectile { velocity } = self.motion {
            self.motion = VolumeMotion::Projectile { velocity: -velocity };
        }
        self.owner = new_owner;
        self.owner_x = new_owner_x;
        self.team = self.team.opposing();
        self.damage = damage;
        self.deflectable = false;
    }
}

/// Stable handle into the [`AttackRegistry`]. Stale handles never alias new volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    volume: Option<AttackVolume>,
    retired: bool,
}

/// Generational arena of live attack volumes.
///
/// Removal is two-step: `retire` hides a volume immediately, `compact` frees
/// its slot at the end of the tick.
#[derive(Resource, Debug, Default)]
pub struct AttackRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl AttackRegistry {
    pub fn insert(&mut self, volume: AttackVolume) -> VolumeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.volume = Some(volume);
            slot.retired = false;
            return VolumeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            volume: Some(volume),
            retired: false,
        });
        VolumeId {
            index,
            generation: 0,
        }
    }

    fn slot(&self, id: VolumeId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation && !slot.retired)
    }

    pub fn get(&self, id: VolumeId) -> Option<&AttackVolume> {
        self.slot(id).and_then(|slot| slot.volume.as_ref())
    }

    pub fn get_mut(&mut self, id: VolumeId) -> Option<&mut AttackVolume> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation && !slot.retired)
            .and_then(|slot| slot.volume.as_mut())
    }

    pub fn retire(&mut self, id: VolumeId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            if slot.generation == id.generation && slot.volume.is_some() {
                slot.retired = true;
            }
        }
    }

    /// Free every retired slot. Surviving ids stay valid.
    pub fn compact(&mut self) -> usize {
        let mut freed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.retired {
                slot.volume = None;
                slot.retired = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
                freed += 1;
            }
        }
        freed
    }

    /// Ids of every live volume, in slot order.
    pub fn ids(&self) -> Vec<VolumeId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.volume.is_some() && !slot.retired)
            .map(|(index, slot)| VolumeId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttackVolume> {
        self.slots
            .iter()
            .filter(|slot| !slot.retired)
            .filter_map(|slot| slot.volume.as_ref())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retire everything a given actor owns.
    pub fn retire_owned_by(&mut self, owner: Entity) {
        for slot in &mut self.slots {
            if slot.volume.as_ref().is_some_and(|v| v.owner == owner) {
                slot.retired = true;
            }
        }
    }
}
