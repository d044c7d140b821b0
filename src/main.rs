use avian2d::prelude::*;
use bevy::prelude::*;

use midnight_brawler::combat::CombatPlugin;
use midnight_brawler::content::ContentPlugin;
use midnight_brawler::core::CorePlugin;
use midnight_brawler::player::PlayerPlugin;
use midnight_brawler::signals::SignalsPlugin;
use midnight_brawler::world::WorldPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Midnight Brawler".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        // Enemies fall under physics gravity; the player controller applies its own
        .insert_resource(Gravity(Vec2::NEG_Y * 800.0))
        .add_plugins((
            CorePlugin,
            ContentPlugin,
            SignalsPlugin,
            PlayerPlugin,
            CombatPlugin,
            WorldPlugin,
        ))
        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
