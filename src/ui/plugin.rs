//! UI plugin - menus, HUD, and interface elements.

use bevy::prelude::*;

use super::hud;
use super::menus::*;
use super::widgets::{button_feedback, refresh_volume_readouts, volume_buttons};
use crate::core::{GameState, PlayState};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(
                OnExit(GameState::MainMenu),
                (despawn_screen::<MainMenuUi>, despawn_screen::<MenuCamera>),
            )

            // Pause menu
            .add_systems(OnEnter(PlayState::Paused), setup_pause_menu)
            .add_systems(OnExit(PlayState::Paused), despawn_screen::<PauseMenuUi>)

            // Death screen
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(
                OnExit(GameState::GameOver),
                (despawn_screen::<GameOverUi>, despawn_screen::<MenuCamera>),
            )

            // Buttons work the same on every screen
            .add_systems(
                Update,
                (
                    button_feedback,
                    menu_button_actions,
                    volume_buttons,
                    refresh_volume_readouts,
                )
                    .chain(),
            );
    }
}
