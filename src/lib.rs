//! Arena Survival - a first-person arena survival game in Bevy.
//!
//! The player fights waves of sword and bow wielding enemies with bare
//! fists, trying to stay alive as long as possible.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, survival clock, data loading
//! - **Settings**: Volume sliders and difficulty, persisted to disk
//! - **Audio**: Named sounds, music and effect channels
//! - **Player**: First-person movement, camera, fists, second phase
//! - **Combat**: Weapons, hitboxes, damage, death, projectiles
//! - **Enemies**: Enemy definitions, AI state machine, attacks
//! - **Spawner**: Spawn points and wave bookkeeping
//! - **World**: Arena construction
//! - **UI**: Menus, HUD, death screen

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod settings;
pub mod spawner;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct ArenaSurvivalPlugin;

impl Plugin for ArenaSurvivalPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Settings are read before audio applies them
            .add_plugins(settings::SettingsPlugin)
            .add_plugins(audio::SoundPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Waves
            .add_plugins(spawner::SpawnerPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
