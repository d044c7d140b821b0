//! World domain: requests from actors to reshape the arena.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::PlatformLayout;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaCommand {
    /// Boss phase change raises a set of ledges around `center`.
    RaisePlatforms {
        layout: PlatformLayout,
        center: Vec2,
    },
    /// Shatter breakables within `reach` of the smasher's box.
    SmashBreakables {
        center: Vec2,
        half_size: Vec2,
        reach: f32,
    },
    /// Player tuning power: one temporary ledge.
    RaiseTuningPlatform {
        position: Vec2,
    },
}

impl Message for ArenaCommand {}
