//! Player domain: input sampling, ground detection, and the per-frame controller tick.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{AttackRegistry, AttackVolume, Enemy, EnemyBrain};
use crate::content::{CombatTuning, PlayerTuning};
use crate::core::{Combatant, GameLayer, Health, Hurtbox, Team, delta_ms};
use crate::player::components::{Player, PlayerController, PlayerOutput, PowerAction};
use crate::player::events::PowerEvent;
use crate::player::powers::{deflect_projectiles, push_impulse, pull_velocity};
use crate::player::resources::PlayerInput;
use crate::signals::{GameSignal, UnlockEvent};
use crate::world::{ArenaCommand, Checkpoint, Pushable};

const GROUND_RAY_REACH: f32 = 4.0;
/// Resting contact leaves a tiny upward residue on the body's velocity.
const RESTING_VY: f32 = 1.0;

pub(crate) fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<PlayerInput>,
) {
    let left = [KeyCode::KeyA, KeyCode::ArrowLeft];
    let right = [KeyCode::KeyD, KeyCode::ArrowRight];

    input.left = keyboard.any_pressed(left);
    input.right = keyboard.any_pressed(right);
    input.up = keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    input.down = keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]);
    input.left_just_pressed = keyboard.any_just_pressed(left);
    input.right_just_pressed = keyboard.any_just_pressed(right);
    input.jump_pressed = keyboard.just_pressed(KeyCode::Space);
    input.jump_held = keyboard.pressed(KeyCode::Space);
    input.run_held = keyboard.pressed(KeyCode::ShiftLeft);
    input.punch_pressed = keyboard.any_just_pressed([KeyCode::KeyJ, KeyCode::KeyZ]);
    input.kick_pressed = keyboard.any_just_pressed([KeyCode::KeyK, KeyCode::KeyX]);
    input.sword_pressed = keyboard.any_just_pressed([KeyCode::KeyL, KeyCode::KeyC]);
    // Dodge is a modifier: hold it and tap a direction
    input.dodge_held = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::KeyE]);
    input.tuning_held = keyboard.any_pressed([KeyCode::KeyF, KeyCode::KeyV]);
    input.tuning_pressed = keyboard.any_just_pressed([KeyCode::KeyF, KeyCode::KeyV]);
}

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<PlayerTuning>,
    checkpoint: Res<Checkpoint>,
) {
    let size = Vec2::new(tuning.width, tuning.standing_height);
    commands.spawn((
        // Identity & combat
        (
            Player,
            Team::Player,
            Combatant::default(),
            Health::new(tuning.max_health),
            Hurtbox::new(size.x, size.y),
            PlayerController::new(&tuning),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.95),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(checkpoint.position.x, checkpoint.position.y, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity is applied by the controller
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Breakable]),
        ),
    ));
    info!(
        "Spawned player at {:?} with {} hp",
        checkpoint.position, tuning.max_health
    );
}

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &Hurtbox, &LinearVelocity, &mut PlayerController), With<Player>>,
) {
    // Floors, ledges, and crates count, never enemies
    let ground_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Breakable]);

    for (transform, hurtbox, velocity, mut controller) in &mut query {
        let was_on_ground = controller.is_grounded();
        let feet = transform.translation.truncate() - Vec2::new(0.0, hurtbox.half_size.y);
        let hit = spatial_query.cast_ray(feet, Dir2::NEG_Y, GROUND_RAY_REACH, true, &ground_filter);

        // Rising through a ledge is not standing on it
        let on_ground = hit.is_some() && velocity.y <= RESTING_VY;
        controller.set_grounded(on_ground);

        if on_ground != was_on_ground {
            debug!("Ground contact changed: on_ground={}", on_ground);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn tick_player(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<PlayerTuning>,
    combat: Res<CombatTuning>,
    checkpoint: Res<Checkpoint>,
    mut registry: ResMut<AttackRegistry>,
    mut signals: MessageWriter<GameSignal>,
    mut powers: MessageWriter<PowerEvent>,
    mut query: Query<
        (
            Entity,
            &mut Transform,
            &mut LinearVelocity,
            &mut Collider,
            &mut Hurtbox,
            &mut PlayerController,
            &mut Health,
        ),
        With<Player>,
    >,
) {
    let dt = delta_ms(&time);

    for (entity, mut transform, mut velocity, mut collider, mut hurtbox, mut controller, mut health) in
        &mut query
    {
        let mut out = PlayerOutput::default();
        let mut next_velocity = velocity.0;
        controller.tick(
            dt,
            &input,
            &mut next_velocity,
            &mut health,
            &tuning,
            &combat,
            &mut out,
        );
        velocity.0 = next_velocity;

        if out.respawned {
            transform.translation.x = checkpoint.position.x;
            transform.translation.y = checkpoint.position.y;
        }

        let position = transform.translation.truncate();
        for commit in out.commits {
            registry.insert(AttackVolume::melee(
                entity,
                position,
                Team::Player,
                commit.kind,
                commit.damage,
                commit.offset,
                commit.size,
                commit.duration_ms,
            ));
        }
        for action in out.powers {
            powers.write(PowerEvent {
                source: entity,
                origin: position,
                action,
            });
        }
        for signal in out.signals {
            signals.write(signal);
        }

        // Crouching shrinks the body; the feet stay put
        let height = controller.body_height(&tuning);
        let previous = hurtbox.half_size.y * 2.0;
        if (previous - height).abs() > f32::EPSILON {
            transform.translation.y += (height - previous) * 0.5;
            *collider = Collider::rectangle(tuning.width, height);
            *hurtbox = Hurtbox::new(tuning.width, height);
        }
    }
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub(crate) fn apply_tuning_powers(
    tuning: Res<PlayerTuning>,
    mut requests: MessageReader<PowerEvent>,
    mut registry: ResMut<AttackRegistry>,
    mut arena: MessageWriter<ArenaCommand>,
    mut signals: MessageWriter<GameSignal>,
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &mut LinearVelocity,
            &mut Health,
            &mut EnemyBrain,
        ),
        (With<Enemy>, Without<Player>),
    >,
    mut pushables: Query<
        (&Transform, &mut LinearVelocity),
        (With<Pushable>, Without<Enemy>, Without<Player>),
    >,
) {
    let powers = &tuning.tuning;

    for request in requests.read() {
        let origin = request.origin;
        match request.action {
            PowerAction::Push { direction, dt_ms } => {
                for (entity, transform, mut velocity, mut health, mut brain) in &mut enemies {
                    if brain.is_dead() || brain.is_invulnerable() {
                        continue;
                    }
                    let position = transform.translation.truncate();
                    let Some(impulse) = push_impulse(origin, direction, position, powers) else {
                        continue;
                    };
                    velocity.0 = impulse;
                    let amount = powers.push_damage_per_sec * dt_ms / 1000.0;
                    let outcome = health.take_damage(amount);
                    brain.receive_hit(outcome, health.ratio());
                    if outcome.landed() {
                        signals.write(GameSignal::actor_hurt(entity, amount, &health));
                    }
                }
                for (transform, mut velocity) in &mut pushables {
                    let position = transform.translation.truncate();
                    if let Some(impulse) = push_impulse(origin, direction, position, powers) {
                        velocity.x = impulse.x;
                    }
                }
            }
            PowerAction::Pull { direction } => {
                for (transform, mut velocity) in &mut pushables {
                    let position = transform.translation.truncate();
                    if let Some(vx) = pull_velocity(origin, direction, position, powers) {
                        velocity.x = vx;
                    }
                }
            }
            PowerAction::Deflect { .. } => {
                for position in deflect_projectiles(&mut registry, request.source, origin, powers) {
                    signals.write(GameSignal::ProjectileDeflected { position });
                }
            }
            PowerAction::RaisePlatform { offset } => {
                arena.write(ArenaCommand::RaiseTuningPlatform {
                    position: origin + offset,
                });
            }
        }
    }
}

pub(crate) fn apply_unlocks(
    tuning: Res<PlayerTuning>,
    mut unlocks: MessageReader<UnlockEvent>,
    mut query: Query<&mut PlayerController, With<Player>>,
) {
    for event in unlocks.read() {
        for mut controller in &mut query {
            controller.unlock(event.ability, &tuning);
        }
    }
}
