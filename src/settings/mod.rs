//! Settings module - volume sliders, difficulty and the settings file.

mod persistence;
mod plugin;
mod volume;

pub use persistence::{load_settings, save_settings_on_change, SettingsFile, SettingsPath};
pub use plugin::SettingsPlugin;
pub use volume::{
    decibels_to_amplitude, slider_to_decibels, VolumeChannel, VolumeSettings, SILENT_DB,
    SLIDER_MAX, SLIDER_STEP,
};
