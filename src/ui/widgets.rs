//! Shared menu widgets: buttons and volume rows.

use bevy::prelude::*;

use crate::core::SoundEvent;
use crate::settings::{VolumeChannel, VolumeSettings, SLIDER_STEP};

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);
const TEXT_COLOR: Color = Color::srgb(0.8, 0.8, 0.85);

/// Marker for menu buttons.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    Quit,
    Resume,
    MainMenu,
    Retry,
}

/// A -/+ button next to a volume readout.
#[derive(Component, Debug, Clone, Copy)]
pub struct VolumeButton {
    pub channel: VolumeChannel,
    pub delta: f32,
}

/// Text showing a channel's slider value.
#[derive(Component, Debug, Clone, Copy)]
pub struct VolumeReadout(pub VolumeChannel);

fn button_node(width: f32, height: f32) -> Node {
    Node {
        width: Val::Px(width),
        height: Val::Px(height),
        margin: UiRect::all(Val::Px(8.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn label(text: impl Into<String>, font_size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(TEXT_COLOR),
    )
}

/// Helper to spawn a menu button.
pub fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            button_node(200.0, 50.0),
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn(label(text, 24.0));
        });
}

/// One "Label  -  100%  +" row per mixer channel.
pub fn spawn_volume_rows(parent: &mut ChildBuilder, settings: &VolumeSettings) {
    for channel in VolumeChannel::ALL {
        parent
            .spawn(Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    label(channel.label(), 20.0),
                    Node {
                        width: Val::Px(100.0),
                        ..default()
                    },
                ));

                for (text, delta) in [("-", -SLIDER_STEP), ("+", SLIDER_STEP)] {
                    if delta > 0.0 {
                        row.spawn((
                            label(format!("{}%", settings.percent(channel)), 20.0),
                            VolumeReadout(channel),
                            Node {
                                width: Val::Px(70.0),
                                justify_content: JustifyContent::Center,
                                ..default()
                            },
                        ));
                    }

                    row.spawn((
                        Button,
                        button_node(40.0, 36.0),
                        BackgroundColor(BUTTON_IDLE),
                        VolumeButton { channel, delta },
                    ))
                    .with_children(|button| {
                        button.spawn(label(text, 22.0));
                    });
                }
            });
    }
}

/// Hover and press colors, plus the click sound, for every button.
pub fn button_feedback(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut sounds: EventWriter<SoundEvent>,
) {
    for (interaction, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                sounds.send(SoundEvent::play_2d("Button"));
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVER.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

/// Move sliders when -/+ is pressed.
pub fn volume_buttons(
    interaction_query: Query<(&Interaction, &VolumeButton), Changed<Interaction>>,
    mut settings: ResMut<VolumeSettings>,
) {
    for (interaction, button) in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            settings.step(button.channel, button.delta);
        }
    }
}

/// Keep readouts in sync with the sliders.
pub fn refresh_volume_readouts(
    settings: Res<VolumeSettings>,
    mut readouts: Query<(&VolumeReadout, &mut Text)>,
) {
    if !settings.is_changed() {
        return;
    }

    for (readout, mut text) in readouts.iter_mut() {
        text.0 = format!("{}%", settings.percent(readout.0));
    }
}
