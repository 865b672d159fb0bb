//! Main menu, pause menu and death screen.

use bevy::prelude::*;

use super::widgets::{spawn_menu_button, spawn_volume_rows, MenuButton};
use crate::core::{GameState, PlayState, SurvivalClock};
use crate::settings::VolumeSettings;

/// Marker for main menu UI entities.
#[derive(Component)]
pub struct MainMenuUi;

/// Marker for the menu camera (used when no game camera exists).
#[derive(Component)]
pub struct MenuCamera;

/// Marker for pause menu UI entities.
#[derive(Component)]
pub struct PauseMenuUi;

/// Marker for game over UI entities.
#[derive(Component)]
pub struct GameOverUi;

/// Text of the death screen's survival time.
#[derive(Component)]
pub struct FinalTime;

fn title(text: &str, font_size: f32, color: Color, gap: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(gap)),
            ..default()
        },
    )
}

fn full_screen(background: Color) -> (Node, BackgroundColor) {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(background),
    )
}

/// Set up the main menu.
pub fn setup_main_menu(mut commands: Commands, settings: Res<VolumeSettings>) {
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn((full_screen(Color::srgb(0.05, 0.05, 0.08)), MainMenuUi))
        .with_children(|parent| {
            parent.spawn(title("ARENA SURVIVAL", 72.0, Color::srgb(0.8, 0.7, 0.6), 20.0));
            parent.spawn(title(
                "Hold out as long as you can",
                22.0,
                Color::srgb(0.5, 0.5, 0.55),
                40.0,
            ));

            spawn_menu_button(parent, "Play", MenuButton::Play);
            spawn_volume_rows(parent, &settings);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

/// Set up the pause menu.
pub fn setup_pause_menu(mut commands: Commands, settings: Res<VolumeSettings>) {
    commands
        .spawn((full_screen(Color::srgba(0.0, 0.0, 0.0, 0.7)), PauseMenuUi))
        .with_children(|parent| {
            parent.spawn(title("PAUSED", 48.0, Color::srgb(0.8, 0.8, 0.85), 30.0));

            spawn_volume_rows(parent, &settings);
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// Set up the death screen.
pub fn setup_game_over(mut commands: Commands, clock: Res<SurvivalClock>) {
    commands.spawn((Camera2d, MenuCamera));

    commands
        .spawn((full_screen(Color::srgba(0.1, 0.0, 0.0, 0.9)), GameOverUi))
        .with_children(|parent| {
            parent.spawn(title("YOU DIED", 72.0, Color::srgb(0.8, 0.2, 0.2), 20.0));
            parent.spawn((
                title(
                    &format!("Survived {}", clock.formatted()),
                    32.0,
                    Color::srgb(0.8, 0.8, 0.85),
                    50.0,
                ),
                FinalTime,
            ));

            spawn_menu_button(parent, "Retry", MenuButton::Retry);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// Handle menu button presses on any screen.
pub fn menu_button_actions(
    interaction_query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut next_game_state: ResMut<NextState<GameState>>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button) in interaction_query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            MenuButton::Play | MenuButton::Retry => next_game_state.set(GameState::InGame),
            MenuButton::MainMenu => next_game_state.set(GameState::MainMenu),
            MenuButton::Resume => next_play_state.set(PlayState::Running),
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

/// Despawn every entity with marker `T`.
pub fn despawn_screen<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
