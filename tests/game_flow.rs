//! Game flow through the core plugin: menu, run, pause and the clock.

use arena_survival::core::{CorePlugin, GameState, PlayState, SurvivalClock};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

fn flow_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, CorePlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .init_resource::<ButtonInput<KeyCode>>();
    // Loading hands over to the main menu on its own
    app.update();
    app.update();
    app
}

fn press_escape(app: &mut App) {
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(KeyCode::Escape);
    keys.clear();
    keys.press(KeyCode::Escape);
}

/// Press Escape for one frame, then let the transition apply.
fn tap_escape(app: &mut App) {
    press_escape(app);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    app.update();
}

fn start_run(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
}

fn play_state(app: &App) -> Option<PlayState> {
    app.world()
        .get_resource::<State<PlayState>>()
        .map(|state| *state.get())
}

#[test]
fn boots_into_main_menu() {
    let app = flow_app();
    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::MainMenu
    );
}

#[test]
fn escape_is_ignored_on_the_main_menu() {
    let mut app = flow_app();

    tap_escape(&mut app);

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::MainMenu
    );
    assert_eq!(play_state(&app), None);
}

#[test]
fn escape_toggles_pause_during_a_run() {
    let mut app = flow_app();
    start_run(&mut app);
    assert_eq!(play_state(&app), Some(PlayState::Running));

    tap_escape(&mut app);
    assert_eq!(play_state(&app), Some(PlayState::Paused));
    assert!(app.world().resource::<Time<Virtual>>().is_paused());

    tap_escape(&mut app);
    assert_eq!(play_state(&app), Some(PlayState::Running));
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());
}

/// The clock runs during play, holds while paused and stops at death.
#[test]
fn survival_clock_follows_the_run() {
    let mut app = flow_app();
    start_run(&mut app);

    for _ in 0..10 {
        app.update();
    }
    let running = app.world().resource::<SurvivalClock>().elapsed;
    assert!(running > 0.5);

    tap_escape(&mut app);
    let paused_at = app.world().resource::<SurvivalClock>().elapsed;
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(app.world().resource::<SurvivalClock>().elapsed, paused_at);

    tap_escape(&mut app);
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::GameOver);
    app.update();
    let final_time = app.world().resource::<SurvivalClock>().elapsed;
    assert!(!app.world().resource::<SurvivalClock>().running);

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(app.world().resource::<SurvivalClock>().elapsed, final_time);
}

#[test]
fn escape_does_nothing_on_the_death_screen() {
    let mut app = flow_app();
    start_run(&mut app);
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::GameOver);
    app.update();

    tap_escape(&mut app);

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::GameOver
    );
    assert_eq!(play_state(&app), None);
}
