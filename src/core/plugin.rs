//! Core plugin that sets up game states, events, and run bookkeeping.

use bevy::prelude::*;

use super::clock::{tick_survival_clock, SurvivalClock};
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, GameOver) and the pause sub-state
/// - Global events (DamageEvent, DeathEvent, SoundEvent)
/// - The survival clock and pause handling
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<SoundEvent>()

            .init_resource::<SurvivalClock>()

            // Data files are read in Startup, so by the time Loading is
            // entered everything is ready
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)

            .add_systems(OnEnter(GameState::InGame), start_survival_clock)
            .add_systems(OnEnter(GameState::GameOver), stop_survival_clock)
            .add_systems(OnEnter(PlayState::Paused), pause_virtual_time)
            .add_systems(OnExit(PlayState::Paused), resume_virtual_time)

            // Escape toggles the in-game settings menu
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                tick_survival_clock.run_if(in_state(PlayState::Running)),
            );
    }
}

/// Leave Loading once startup data has been read.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

fn start_survival_clock(mut clock: ResMut<SurvivalClock>) {
    clock.reset();
    clock.set_running(true);
}

fn stop_survival_clock(mut clock: ResMut<SurvivalClock>) {
    clock.set_running(false);
    info!("Run ended after {}", clock.formatted());
}

/// Handle Escape key to open/close the in-game settings menu.
///
/// Only registered for InGame, so the main menu and death screen never
/// react to it.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Running => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Running),
        }
    }
}

fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
