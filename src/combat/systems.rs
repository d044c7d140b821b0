//! Combat domain: enemy ticks, attack volume resolution, deaths, and cleanup.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::ai::MAX_MINIONS;
use crate::combat::attacks::{AttackKind, AttackRegistry, AttackVolume};
use crate::combat::components::{
    AiCommand, AiOutput, Corpse, Enemy, EnemyBrain, Minion, Perception, TargetView,
};
use crate::combat::resolver::{BreakableTarget, Damageable, Hit, ResolveReport, Target, resolve_hits};
use crate::combat::spawn::spawn_minion;
use crate::content::{CombatTuning, EnemyKind, EnemyRoster, PlayerTuning};
use crate::core::{
    Combatant, DamageOutcome, GameLayer, Health, HitStop, Hurtbox, SimRng, Team, delta_ms,
    direction_of,
};
use crate::player::{Player, PlayerBody, PlayerController};
use crate::signals::{GameSignal, ScoreEvent};
use crate::world::{ArenaCommand, Breakable};

const PROJECTILE_SIZE: Vec2 = Vec2::splat(12.0);
const HURLED_SIZE: Vec2 = Vec2::splat(24.0);
const WALL_RAY_REACH: f32 = 4.0;

/// An enemy as a resolver target.
struct EnemyBody<'a> {
    health: Mut<'a, Health>,
    brain: Mut<'a, EnemyBrain>,
    combatant: &'a Combatant,
}

impl Damageable for EnemyBody<'_> {
    fn can_be_hit(&self) -> bool {
        !self.health.is_dead() && !self.brain.is_dead() && !self.brain.is_invulnerable()
    }

    fn receive_hit(&mut self, hit: &Hit) -> DamageOutcome {
        let outcome = self.health.take_damage(hit.damage);
        let ratio = self.health.ratio();
        self.brain.receive_hit(outcome, ratio);
        outcome
    }

    fn knockback_resist(&self) -> f32 {
        self.combatant.knockback_resist
    }

    fn score_value(&self) -> u32 {
        self.combatant.score_value
    }
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub(crate) fn tick_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut rng: ResMut<SimRng>,
    tuning: Res<PlayerTuning>,
    roster: Res<EnemyRoster>,
    spatial_query: SpatialQuery,
    mut registry: ResMut<AttackRegistry>,
    mut arena: MessageWriter<ArenaCommand>,
    mut signals: MessageWriter<GameSignal>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut LinearVelocity,
            &mut PlayerController,
            &mut Health,
        ),
        (With<Player>, Without<Enemy>),
    >,
    mut enemies: Query<
        (
            Entity,
            &mut Transform,
            &mut LinearVelocity,
            &Health,
            &Hurtbox,
            &mut EnemyBrain,
        ),
        (With<Enemy>, Without<Player>, Without<Corpse>),
    >,
    minions: Query<&Minion, Without<Corpse>>,
) {
    let dt = delta_ms(&time);
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    // Positions of every living grunt, for flanking
    let grunts: Vec<(Entity, Vec2)> = enemies
        .iter()
        .filter(|(_, _, _, _, _, brain)| brain.kind == EnemyKind::Grunt && !brain.is_dead())
        .map(|(entity, transform, ..)| (entity, transform.translation.truncate()))
        .collect();

    let mut player = players.single_mut().ok();
    let target = player.as_ref().map(|(_, transform, _, controller, _)| TargetView {
        position: transform.translation.truncate(),
        alive: !controller.is_dead(),
        crouching: controller.is_crouching(),
        facing_right: controller.facing_right(),
        attack_started: controller.attack_started(),
    });

    for (entity, mut transform, mut velocity, health, hurtbox, mut brain) in &mut enemies {
        if brain.is_dead() {
            continue;
        }
        let position = transform.translation.truncate();

        let mut perception = Perception::new(position);
        perception.health_ratio = health.ratio();
        perception.target = target;
        perception.blocked = spatial_query
            .cast_ray(
                position,
                if brain.fsm.facing_right() {
                    Dir2::X
                } else {
                    Dir2::NEG_X
                },
                hurtbox.half_size.x + WALL_RAY_REACH,
                true,
                &wall_filter,
            )
            .is_some();
        perception.nearby_ally = grunts
            .iter()
            .filter(|(other, _)| *other != entity)
            .map(|(_, pos)| *pos)
            .min_by(|a, b| a.distance(position).total_cmp(&b.distance(position)));
        perception.live_minions = minions.iter().filter(|m| m.summoner == entity).count();

        let mut out = AiOutput::default();
        brain.tick(dt, &perception, &mut rng, &mut out);

        if let Some(vx) = out.velocity_x {
            velocity.x = vx;
        }
        if let Some(vy) = out.velocity_y {
            velocity.y = vy;
        }

        for command in out.commands {
            match command {
                AiCommand::Strike { damage, knockback } => {
                    let Some((player_entity, player_transform, player_velocity, controller, player_health)) =
                        player.as_mut()
                    else {
                        continue;
                    };
                    let direction = direction_of(player_transform.translation.x - position.x);
                    let outcome = controller.take_damage(player_health, damage, &tuning);
                    if outcome.landed() {
                        player_velocity.0 =
                            knockback.unwrap_or_else(|| controller.knockback(direction, &tuning));
                        signals.write(GameSignal::actor_hurt(
                            *player_entity,
                            damage,
                            player_health,
                        ));
                        debug!("{:?} struck the player for {}", brain.kind, damage);
                    }
                }
                AiCommand::Fire {
                    velocity: shot_velocity,
                    damage,
                    lifetime_ms,
                    kind,
                    deflectable,
                } => {
                    let size = if kind == AttackKind::Hurled {
                        HURLED_SIZE
                    } else {
                        PROJECTILE_SIZE
                    };
                    let volume = AttackVolume::projectile(
                        entity,
                        position,
                        Team::Enemy,
                        kind,
                        damage,
                        shot_velocity,
                        size,
                        lifetime_ms,
                    );
                    registry.insert(if deflectable {
                        volume.deflectable()
                    } else {
                        volume
                    });
                }
                AiCommand::Reposition(to) => {
                    transform.translation.x = to.x;
                    transform.translation.y = to.y;
                }
                AiCommand::Summon { x } => {
                    if perception.live_minions < MAX_MINIONS {
                        spawn_minion(&mut commands, &roster, entity, Vec2::new(x, position.y));
                        perception.live_minions += 1;
                    }
                }
                AiCommand::SmashBreakables { reach } => {
                    arena.write(ArenaCommand::SmashBreakables {
                        center: position,
                        half_size: hurtbox.half_size,
                        reach,
                    });
                }
                AiCommand::RaisePlatforms(layout) => {
                    arena.write(ArenaCommand::RaisePlatforms {
                        layout,
                        center: position,
                    });
                }
                AiCommand::Levitate(on) => {
                    commands
                        .entity(entity)
                        .insert(GravityScale(if on { 0.0 } else { 1.0 }));
                }
                AiCommand::PhaseChanged(phase) => {
                    signals.write(GameSignal::BossPhaseChanged {
                        boss: entity,
                        phase,
                    });
                }
                AiCommand::CameraShake {
                    intensity,
                    duration_ms,
                } => {
                    signals.write(GameSignal::CameraShake {
                        intensity,
                        duration_ms,
                    });
                }
                AiCommand::CameraFlash { duration_ms } => {
                    signals.write(GameSignal::CameraFlash { duration_ms });
                }
            }
        }
    }
}

/// Move melee volumes with their owners and projectiles along their paths.
pub(crate) fn advance_attack_volumes(
    time: Res<Time>,
    mut registry: ResMut<AttackRegistry>,
    actors: Query<&Transform, Or<(With<Player>, With<Enemy>)>>,
) {
    let dt = delta_ms(&time);
    for id in registry.ids() {
        let Some(volume) = registry.get_mut(id) else {
            continue;
        };
        let owner_pos = actors
            .get(volume.owner)
            .ok()
            .map(|t| t.translation.truncate());
        if !volume.advance(dt, owner_pos) {
            registry.retire(id);
        }
    }
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub(crate) fn resolve_attack_volumes(
    mut commands: Commands,
    tuning: Res<PlayerTuning>,
    combat: Res<CombatTuning>,
    mut registry: ResMut<AttackRegistry>,
    mut hit_stop: ResMut<HitStop>,
    mut signals: MessageWriter<GameSignal>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &Hurtbox,
            &mut LinearVelocity,
            &mut PlayerController,
            &mut Health,
        ),
        (With<Player>, Without<Enemy>),
    >,
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &Hurtbox,
            &Combatant,
            &mut LinearVelocity,
            &mut Health,
            &mut EnemyBrain,
        ),
        (With<Enemy>, Without<Player>),
    >,
    breakables: Query<(Entity, &Transform, &Breakable)>,
) {
    let mut report = ResolveReport::default();

    // Player attacks against enemies and breakables
    {
        let mut targets: Vec<Target<EnemyBody<'_>>> = enemies
            .iter_mut()
            .map(
                |(entity, transform, hurtbox, combatant, _, health, brain)| Target {
                    entity,
                    center: transform.translation.truncate(),
                    half_size: hurtbox.half_size,
                    body: EnemyBody {
                        health,
                        brain,
                        combatant,
                    },
                },
            )
            .collect();
        targets.sort_by_key(|t| t.entity);
        let mut intact: Vec<BreakableTarget> = breakables
            .iter()
            .map(|(entity, transform, breakable)| BreakableTarget {
                entity,
                center: transform.translation.truncate(),
                half_size: breakable.half_size,
                intact: true,
            })
            .collect();
        resolve_hits(
            &mut registry,
            Team::Player,
            &mut targets,
            &mut intact,
            &combat,
            &mut report,
        );
    }

    for contact in &report.contacts {
        if let Ok((.., mut velocity, health, _)) = enemies.get_mut(contact.target) {
            velocity.0 = contact.knockback;
            signals.write(GameSignal::actor_hurt(contact.target, contact.damage, &health));
        }
        if let Ok((_, _, _, mut velocity, controller, _)) = players.get_mut(contact.attacker) {
            signals.write(GameSignal::ComboHit {
                count: controller.combo.count(),
            });
            if contact.kind == AttackKind::DiveKick {
                velocity.y = combat.dive_kick_bounce;
            }
        }
        debug!(
            "{:?} hit {:?} for {:.1}, knockback {:?}",
            contact.kind, contact.target, contact.damage, contact.knockback
        );
    }
    for (entity, position) in &report.shattered {
        commands.entity(*entity).try_despawn();
        signals.write(GameSignal::BreakableShattered {
            position: *position,
        });
    }

    // Enemy attacks against the player
    let player_report = {
        let mut report = ResolveReport::default();
        let mut targets: Vec<Target<PlayerBody<'_>>> = players
            .iter_mut()
            .map(|(entity, transform, hurtbox, _, controller, health)| Target {
                entity,
                center: transform.translation.truncate(),
                half_size: hurtbox.half_size,
                body: PlayerBody {
                    controller: controller.into_inner(),
                    health: health.into_inner(),
                    tuning: tuning.as_ref(),
                },
            })
            .collect();
        resolve_hits(
            &mut registry,
            Team::Enemy,
            &mut targets,
            &mut [],
            &combat,
            &mut report,
        );
        report
    };

    for contact in &player_report.contacts {
        if let Ok((_, _, _, mut velocity, _, health)) = players.get_mut(contact.target) {
            velocity.0 = contact.knockback;
            signals.write(GameSignal::actor_hurt(contact.target, contact.damage, &health));
        }
    }

    if let Some(duration_ms) = player_report.hit_stop_ms.or(report.hit_stop_ms) {
        hit_stop.start(duration_ms);
        signals.write(GameSignal::HitStop { duration_ms });
    }
}

/// Turn freshly killed enemies into corpses and report the kill once.
#[allow(clippy::too_many_arguments)]
pub(crate) fn process_deaths(
    mut commands: Commands,
    combat: Res<CombatTuning>,
    mut registry: ResMut<AttackRegistry>,
    mut hit_stop: ResMut<HitStop>,
    mut signals: MessageWriter<GameSignal>,
    mut score: MessageWriter<ScoreEvent>,
    mut enemies: Query<
        (Entity, &Transform, &Health, &Combatant, &mut EnemyBrain),
        (With<Enemy>, Without<Corpse>),
    >,
) {
    for (entity, transform, health, combatant, mut brain) in &mut enemies {
        if !health.is_dead() {
            continue;
        }
        if !brain.is_dead() {
            brain.receive_hit(DamageOutcome::Lethal, 0.0);
        }
        let position = transform.translation.truncate();

        commands.entity(entity).insert(Corpse {
            remaining_ms: combat.corpse_fade_ms,
        });
        registry.retire_owned_by(entity);

        signals.write(GameSignal::ActorDied {
            entity,
            position,
            score_value: combatant.score_value,
        });
        if combatant.score_value > 0 {
            score.write(ScoreEvent {
                delta: combatant.score_value,
            });
        }
        signals.write(GameSignal::KnockOut { position });
        hit_stop.start(combat.knockout_pause_ms);
        signals.write(GameSignal::HitStop {
            duration_ms: combat.knockout_pause_ms,
        });

        if brain.kind.is_boss() {
            signals.write(GameSignal::BossDefeated {
                boss: entity,
                kind: brain.kind,
            });
            info!("{:?} defeated", brain.kind);
        } else {
            debug!("{:?} {:?} knocked out", brain.kind, entity);
        }
    }
}

pub(crate) fn fade_corpses(
    time: Res<Time>,
    combat: Res<CombatTuning>,
    mut commands: Commands,
    mut corpses: Query<(Entity, &mut Corpse, &mut Sprite)>,
) {
    let dt = delta_ms(&time);
    let fade = combat.corpse_fade_ms.max(1.0);
    for (entity, mut corpse, mut sprite) in &mut corpses {
        corpse.remaining_ms -= dt;
        if corpse.remaining_ms <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        let alpha = (corpse.remaining_ms / fade).clamp(0.0, 1.0);
        sprite.color = sprite.color.with_alpha(alpha);
    }
}

pub(crate) fn compact_attack_registry(mut registry: ResMut<AttackRegistry>) {
    let freed = registry.compact();
    if freed > 0 {
        trace!("Freed {} attack volume slots", freed);
    }
}

#[cfg(feature = "dev-tools")]
pub(crate) fn draw_attack_volumes(registry: Res<AttackRegistry>, mut gizmos: Gizmos) {
    for volume in registry.iter() {
        let color = match volume.team {
            Team::Player => Color::srgb(0.3, 0.9, 0.4),
            Team::Enemy => Color::srgb(0.95, 0.3, 0.3),
        };
        gizmos.rect_2d(
            Isometry2d::from_translation(volume.center),
            volume.half_size * 2.0,
            color,
        );
    }
}
