//! Combat domain: enemy and boss spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{Enemy, EnemyBrain, Minion};
use crate::content::{EnemyKind, EnemyRoster};
use crate::core::{Combatant, GameLayer, Health, Hurtbox, Team};

/// Bundle for spawning any enemy or boss from its roster profile
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub team: Team,
    pub combatant: Combatant,
    pub health: Health,
    pub hurtbox: Hurtbox,
    pub brain: EnemyBrain,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub damping: LinearDamping,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
}

impl EnemyBundle {
    pub fn new(kind: EnemyKind, roster: &EnemyRoster, position: Vec2) -> Self {
        let profile = *roster.profile(kind);
        let size = Vec2::from(profile.size);

        Self {
            enemy: Enemy,
            team: Team::Enemy,
            combatant: Combatant {
                knockback_resist: profile.knockback_resist,
                score_value: profile.score_value,
            },
            health: Health::new(profile.max_health),
            hurtbox: Hurtbox::new(size.x, size.y),
            brain: EnemyBrain::new(kind, profile, position.x),
            sprite: Sprite {
                color: kind_color(kind),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(size.x, size.y),
            collision_layers: CollisionLayers::new(GameLayer::Enemy, [GameLayer::Ground, GameLayer::Breakable]),
            velocity: LinearVelocity::default(),
            // Decays knockback quickly once the brain stops steering
            damping: LinearDamping(5.0),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(1.0),
        }
    }
}

fn kind_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Grunt => Color::srgb(0.7, 0.3, 0.3),
        EnemyKind::Charger => Color::srgb(0.8, 0.45, 0.2),
        EnemyKind::Teleporter => Color::srgb(0.5, 0.3, 0.8),
        EnemyKind::Mirror => Color::srgb(0.75, 0.75, 0.85),
        EnemyKind::Orchestrator => Color::srgb(0.3, 0.6, 0.7),
    }
}

pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    roster: &EnemyRoster,
    position: Vec2,
) -> Entity {
    let entity = commands.spawn(EnemyBundle::new(kind, roster, position)).id();
    debug!("Spawned {:?} at {:?}", kind, position);
    entity
}

/// Grunt that counts against its summoner's minion cap.
pub fn spawn_minion(
    commands: &mut Commands,
    roster: &EnemyRoster,
    summoner: Entity,
    position: Vec2,
) -> Entity {
    commands
        .spawn((
            EnemyBundle::new(EnemyKind::Grunt, roster, position),
            Minion { summoner },
        ))
        .id()
}
