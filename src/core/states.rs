//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! enemy AI only runs while a run is in progress and not paused, while
//! menu systems only run in the MainMenu state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The game transitions between these states based on player actions:
/// - Start in `Loading` while data files are read
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts a run (or retries)
/// - `GameOver` when the player dies and the death screen is shown
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files and settings
    #[default]
    Loading,
    /// Title screen with audio sliders
    MainMenu,
    /// A survival run is in progress
    InGame,
    /// Player has died, death screen is up
    GameOver,
}

/// Sub-states for a run - only active when GameState::InGame.
///
/// Pausing is a sub-state so that resuming does not re-enter `InGame`
/// and rebuild the arena.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - movement, combat, waves
    #[default]
    Running,
    /// In-game settings menu is open, virtual time is stopped
    Paused,
}
