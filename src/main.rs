//! Arena Survival - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - Mouse: Look around
//! - Shift: Sprint
//! - Space: Jump
//! - Left click: Light attack (alternating fists)
//! - Right click: Heavy attack (both fists)
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Arena Survival".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(arena_survival::ArenaSurvivalPlugin)

        .run();
}
