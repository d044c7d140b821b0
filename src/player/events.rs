//! Player domain: power requests handed from the controller to the world.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::player::components::PowerAction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerEvent {
    pub source: Entity,
    pub origin: Vec2,
    pub action: PowerAction,
}

impl Message for PowerEvent {}
