//! World domain: arena setup, bounds, hazards, pickups, and the boss encounter.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{AttackRegistry, Enemy, spawn_enemy};
use crate::content::{CombatTuning, EnemyKind, EnemyRoster, PlayerTuning};
use crate::core::{GameLayer, Health, Hurtbox, aabb_overlap, delta_ms};
use crate::player::{Player, PlayerController};
use crate::signals::{GameSignal, ScoreEvent, UnlockEvent};
use crate::world::components::{
    ArenaPlatform, Breakable, Hazard, Pickup, PickupKind, Pushable, SkyDrift, TuningPlatform,
};
use crate::world::events::ArenaCommand;
use crate::world::layout::platform_placements;
use crate::world::resources::{BossEncounter, Checkpoint, HazardCooldown, WorldBounds};

const GROUND_COLOR: Color = Color::srgb(0.25, 0.25, 0.3);

fn ground_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Ground,
        [GameLayer::Player, GameLayer::Enemy, GameLayer::Ground],
    )
}

/// Solid to actors, but never seen by an enemy's wall ray.
pub(crate) fn breakable_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Breakable, [GameLayer::Player, GameLayer::Enemy])
}

fn spawn_ground(commands: &mut Commands, center: Vec2, size: Vec2) -> Entity {
    commands
        .spawn((
            Sprite {
                color: GROUND_COLOR,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers(),
        ))
        .id()
}

/// Lay out the playable arena: floor with a pit, walls, props, and a few grunts.
pub(crate) fn spawn_training_arena(mut commands: Commands, roster: Res<EnemyRoster>) {
    // Floor top sits at y = 0
    spawn_ground(&mut commands, Vec2::new(-75.0, -20.0), Vec2::new(1050.0, 40.0));
    spawn_ground(&mut commands, Vec2::new(960.0, -20.0), Vec2::new(880.0, 40.0));
    spawn_ground(&mut commands, Vec2::new(-620.0, 200.0), Vec2::new(40.0, 480.0));
    spawn_ground(&mut commands, Vec2::new(1420.0, 200.0), Vec2::new(40.0, 480.0));
    spawn_ground(&mut commands, Vec2::new(-100.0, 90.0), Vec2::new(100.0, 12.0));

    let crate_size = Vec2::new(24.0, 40.0);
    commands.spawn((
        Breakable {
            half_size: crate_size * 0.5,
        },
        Sprite {
            color: Color::srgb(0.55, 0.4, 0.25),
            custom_size: Some(crate_size),
            ..default()
        },
        Transform::from_xyz(200.0, 20.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(crate_size.x, crate_size.y),
        breakable_layers(),
    ));

    let box_size = Vec2::splat(28.0);
    commands.spawn((
        Pushable,
        Sprite {
            color: Color::srgb(0.45, 0.45, 0.5),
            custom_size: Some(box_size),
            ..default()
        },
        Transform::from_xyz(60.0, 14.0, 0.0),
        RigidBody::Dynamic,
        Collider::rectangle(box_size.x, box_size.y),
        LockedAxes::ROTATION_LOCKED,
        LinearDamping(3.0),
        LinearVelocity::default(),
        ground_layers(),
    ));

    let spikes = Vec2::new(60.0, 10.0);
    commands.spawn((
        Hazard {
            half_size: spikes * 0.5,
        },
        Sprite {
            color: Color::srgb(0.8, 0.2, 0.2),
            custom_size: Some(spikes),
            ..default()
        },
        Transform::from_xyz(380.0, 5.0, 0.0),
    ));

    for (kind, position, color) in [
        (PickupKind::Health, Vec2::new(-100.0, 120.0), Color::srgb(0.3, 0.9, 0.4)),
        (PickupKind::Energy, Vec2::new(280.0, 30.0), Color::srgb(0.3, 0.6, 1.0)),
        (PickupKind::Memory, Vec2::new(600.0, 30.0), Color::srgb(1.0, 0.85, 0.3)),
    ] {
        let size = Vec2::splat(14.0);
        commands.spawn((
            Pickup {
                kind,
                half_size: size * 0.5,
            },
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
        ));
    }

    for x in [150.0, 320.0] {
        spawn_enemy(&mut commands, EnemyKind::Grunt, &roster, Vec2::new(x, 40.0));
    }

    info!("Training arena ready");
}

pub(crate) fn trigger_boss_encounter(
    mut commands: Commands,
    roster: Res<EnemyRoster>,
    mut encounter: ResMut<BossEncounter>,
    mut signals: MessageWriter<GameSignal>,
    players: Query<&Transform, With<Player>>,
) {
    let Ok(transform) = players.single() else {
        return;
    };
    if !encounter.should_trigger(transform.translation.x) {
        return;
    }

    let boss = spawn_enemy(&mut commands, encounter.kind, &roster, encounter.spawn);
    encounter.start(boss);
    signals.write(GameSignal::BossIntro {
        kind: encounter.kind,
        position: encounter.spawn,
    });
    info!("Boss encounter started: {:?}", encounter.kind);
}

pub(crate) fn finish_boss_encounter(
    mut encounter: ResMut<BossEncounter>,
    mut signals: MessageReader<GameSignal>,
    mut unlocks: MessageWriter<UnlockEvent>,
) {
    for signal in signals.read() {
        if let GameSignal::BossDefeated { boss, kind } = signal {
            for ability in encounter.finish(*boss) {
                info!("{:?} defeated, unlocking {:?}", kind, ability);
                unlocks.write(UnlockEvent { ability });
            }
        }
    }
}

/// Falling out of the arena hurts and sends the player back to the checkpoint.
#[allow(clippy::too_many_arguments)]
pub(crate) fn check_world_bounds(
    mut commands: Commands,
    bounds: Res<WorldBounds>,
    checkpoint: Res<Checkpoint>,
    tuning: Res<PlayerTuning>,
    combat: Res<CombatTuning>,
    mut registry: ResMut<AttackRegistry>,
    mut signals: MessageWriter<GameSignal>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut LinearVelocity,
            &mut PlayerController,
            &mut Health,
        ),
        With<Player>,
    >,
    enemies: Query<(Entity, &Transform), (With<Enemy>, Without<Player>)>,
) {
    for (entity, mut transform, mut velocity, mut controller, mut health) in &mut players {
        if transform.translation.y >= bounds.kill_y {
            continue;
        }
        let outcome = controller.take_damage(&mut health, combat.fall_damage, &tuning);
        if outcome.landed() {
            signals.write(GameSignal::actor_hurt(entity, combat.fall_damage, &health));
        }
        if !controller.is_dead() {
            transform.translation.x = checkpoint.position.x;
            transform.translation.y = checkpoint.position.y;
            velocity.0 = Vec2::ZERO;
            debug!("Player fell out, back to {:?}", checkpoint.position);
        }
    }

    for (entity, transform) in &enemies {
        if transform.translation.y < bounds.kill_y {
            registry.retire_owned_by(entity);
            commands.entity(entity).try_despawn();
            debug!("Enemy {:?} fell out of the arena", entity);
        }
    }
}

pub(crate) fn apply_hazards(
    time: Res<Time>,
    tuning: Res<PlayerTuning>,
    combat: Res<CombatTuning>,
    mut cooldown: ResMut<HazardCooldown>,
    mut signals: MessageWriter<GameSignal>,
    hazards: Query<(&Transform, &Hazard), Without<Player>>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &Hurtbox,
            &mut PlayerController,
            &mut Health,
        ),
        With<Player>,
    >,
) {
    cooldown.remaining_ms = (cooldown.remaining_ms - delta_ms(&time)).max(0.0);
    if cooldown.remaining_ms > 0.0 {
        return;
    }

    for (entity, transform, hurtbox, mut controller, mut health) in &mut players {
        let center = transform.translation.truncate();
        let touching = hazards.iter().any(|(hazard_transform, hazard)| {
            aabb_overlap(
                center,
                hurtbox.half_size,
                hazard_transform.translation.truncate(),
                hazard.half_size,
            )
        });
        if !touching {
            continue;
        }
        if controller
            .take_damage(&mut health, combat.hazard_damage, &tuning)
            .landed()
        {
            cooldown.remaining_ms = combat.hazard_cooldown_ms;
            signals.write(GameSignal::actor_hurt(entity, combat.hazard_damage, &health));
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn collect_pickups(
    mut commands: Commands,
    tuning: Res<PlayerTuning>,
    combat: Res<CombatTuning>,
    mut signals: MessageWriter<GameSignal>,
    mut score: MessageWriter<ScoreEvent>,
    pickups: Query<(Entity, &Transform, &Pickup), Without<Player>>,
    mut players: Query<(&Transform, &Hurtbox, &mut PlayerController, &mut Health), With<Player>>,
) {
    for (transform, hurtbox, mut controller, mut health) in &mut players {
        if controller.is_dead() {
            continue;
        }
        let center = transform.translation.truncate();
        for (pickup_entity, pickup_transform, pickup) in &pickups {
            let position = pickup_transform.translation.truncate();
            if !aabb_overlap(center, hurtbox.half_size, position, pickup.half_size) {
                continue;
            }
            match pickup.kind {
                PickupKind::Health => {
                    health.heal(combat.pickup_health);
                }
                PickupKind::Energy => controller.add_energy(combat.pickup_energy, &tuning),
                PickupKind::Memory => {
                    score.write(ScoreEvent {
                        delta: combat.pickup_memory_score,
                    });
                }
            }
            commands.entity(pickup_entity).despawn();
            signals.write(GameSignal::PickupCollected { position });
            debug!("Collected {:?} at {:?}", pickup.kind, position);
        }
    }
}

pub(crate) fn tick_platforms(
    time: Res<Time>,
    mut commands: Commands,
    mut tuning_platforms: Query<(Entity, &mut TuningPlatform)>,
    mut drifting: Query<(&mut SkyDrift, &mut LinearVelocity)>,
) {
    let dt = delta_ms(&time);
    for (entity, mut platform) in &mut tuning_platforms {
        platform.remaining_ms -= dt;
        if platform.remaining_ms <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
    for (mut drift, mut velocity) in &mut drifting {
        drift.advance(dt);
        velocity.x = drift.velocity_x();
    }
}

pub(crate) fn handle_arena_commands(
    mut commands: Commands,
    tuning: Res<PlayerTuning>,
    mut requests: MessageReader<ArenaCommand>,
    mut signals: MessageWriter<GameSignal>,
    breakables: Query<(Entity, &Transform, &Breakable)>,
) {
    for request in requests.read() {
        match *request {
            ArenaCommand::RaisePlatforms { layout, center } => {
                for placement in platform_placements(layout, center) {
                    let mut platform = commands.spawn((
                        ArenaPlatform,
                        Sprite {
                            color: Color::srgb(0.35, 0.5, 0.6),
                            custom_size: Some(placement.size),
                            ..default()
                        },
                        Transform::from_xyz(placement.position.x, placement.position.y, 0.0),
                        Collider::rectangle(placement.size.x, placement.size.y),
                        ground_layers(),
                    ));
                    match placement.drift {
                        Some(drift) => {
                            platform.insert((drift, RigidBody::Kinematic, LinearVelocity::default()));
                        }
                        None => {
                            platform.insert(RigidBody::Static);
                        }
                    }
                    signals.write(GameSignal::PlatformRaised {
                        position: placement.position,
                    });
                }
                info!("Raised {:?} platforms around {:?}", layout, center);
            }
            ArenaCommand::SmashBreakables {
                center,
                half_size,
                reach,
            } => {
                let reach_box = half_size + Vec2::splat(reach);
                for (entity, transform, breakable) in &breakables {
                    let position = transform.translation.truncate();
                    if aabb_overlap(center, reach_box, position, breakable.half_size) {
                        commands.entity(entity).try_despawn();
                        signals.write(GameSignal::BreakableShattered { position });
                    }
                }
            }
            ArenaCommand::RaiseTuningPlatform { position } => {
                let size = Vec2::from(tuning.tuning.platform_size);
                commands.spawn((
                    TuningPlatform {
                        remaining_ms: tuning.tuning.platform_ms,
                    },
                    Sprite {
                        color: Color::srgba(0.5, 0.8, 1.0, 0.8),
                        custom_size: Some(size),
                        ..default()
                    },
                    Transform::from_xyz(position.x, position.y, 0.0),
                    RigidBody::Static,
                    Collider::rectangle(size.x, size.y),
                    ground_layers(),
                ));
                signals.write(GameSignal::PlatformRaised { position });
            }
        }
    }
}
