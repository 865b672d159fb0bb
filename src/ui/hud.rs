//! In-game HUD - health, survival time and the crosshair.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::{GameState, SurvivalClock};
use crate::player::Player;

const HEALTH_FULL: Color = Color::srgb(0.75, 0.15, 0.15);
const HEALTH_LOW: Color = Color::srgb(1.0, 0.45, 0.1);
const HUD_TEXT: Color = Color::srgb(0.85, 0.85, 0.85);

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

/// Fill of the health bar; its width follows the player's health.
#[derive(Component)]
pub struct HealthBar;

/// "current / max" text beside the bar.
#[derive(Component)]
pub struct HealthReadout;

/// Running survival time.
#[derive(Component)]
pub struct ClockReadout;

pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_health_bar, update_clock_readout).run_if(in_state(GameState::InGame)),
        );
}

fn hud_text(text: impl Into<String>, font_size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(HUD_TEXT),
    )
}

fn spawn_hud(mut commands: Commands) {
    // Health in the bottom-left corner
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(24.0),
                bottom: Val::Px(24.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(10.0),
                ..default()
            },
        ))
        .with_children(|row| {
            row.spawn((
                Node {
                    width: Val::Px(240.0),
                    height: Val::Px(16.0),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BorderColor(Color::srgb(0.3, 0.3, 0.3)),
                BackgroundColor(Color::srgb(0.08, 0.08, 0.08)),
            ))
            .with_children(|frame| {
                frame.spawn((
                    HealthBar,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(HEALTH_FULL),
                ));
            });

            row.spawn((HealthReadout, hud_text("", 16.0)));
        });

    // Survival time, top center
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Px(16.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|top| {
            top.spawn((ClockReadout, hud_text("0:00", 28.0)));
        });

    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|center| {
            center.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));
        });
}

/// Scale the health bar with the player's health; it turns orange below half.
pub fn update_health_bar(
    player_query: Query<&Health, (With<Player>, Changed<Health>)>,
    mut bar_query: Query<(&mut Node, &mut BackgroundColor), With<HealthBar>>,
    mut readout_query: Query<&mut Text, With<HealthReadout>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };

    for (mut node, mut color) in bar_query.iter_mut() {
        node.width = Val::Percent(health.ratio() * 100.0);
        color.0 = if health.ratio() <= 0.5 {
            HEALTH_LOW
        } else {
            HEALTH_FULL
        };
    }

    for mut text in readout_query.iter_mut() {
        text.0 = format!("{:.0} / {:.0}", health.current.ceil(), health.maximum);
    }
}

pub fn update_clock_readout(
    clock: Res<SurvivalClock>,
    mut readout_query: Query<&mut Text, With<ClockReadout>>,
) {
    if !clock.is_changed() {
        return;
    }

    for mut text in readout_query.iter_mut() {
        text.0 = clock.formatted();
    }
}

fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
