//! Settings plugin - persisted volume sliders and difficulty.

use bevy::prelude::*;

use super::persistence::{load_settings, save_settings_on_change, SettingsPath};
use super::volume::VolumeSettings;
use crate::combat::Difficulty;

/// Settings plugin - loads settings before anything reads them.
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SettingsPath>()
            .init_resource::<VolumeSettings>()
            .init_resource::<Difficulty>()
            .add_systems(PreStartup, load_settings)
            .add_systems(Update, save_settings_on_change);
    }
}
