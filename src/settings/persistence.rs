//! Loading and saving the settings file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::volume::VolumeSettings;
use crate::combat::Difficulty;
use crate::core::{read_ron, write_ron, DataLoadError};

/// Where settings are stored.
#[derive(Resource, Debug, Clone)]
pub struct SettingsPath(pub PathBuf);

impl Default for SettingsPath {
    fn default() -> Self {
        Self(PathBuf::from("settings.ron"))
    }
}

/// On-disk layout of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub volume: VolumeSettings,
    #[serde(default = "default_difficulty")]
    pub difficulty: f32,
}

fn default_difficulty() -> f32 {
    Difficulty::default().0
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            volume: VolumeSettings::default(),
            difficulty: default_difficulty(),
        }
    }
}

impl SettingsFile {
    pub fn load(path: &SettingsPath) -> Result<Self, DataLoadError> {
        read_ron(&path.0)
    }

    pub fn save(&self, path: &SettingsPath) -> Result<(), DataLoadError> {
        write_ron(&path.0, self)
    }
}

/// Read settings at startup, falling back to defaults.
pub fn load_settings(mut commands: Commands, path: Res<SettingsPath>) {
    let settings = match SettingsFile::load(&path) {
        Ok(settings) => {
            info!("Loaded settings from {:?}", path.0);
            settings
        }
        Err(DataLoadError::FileNotFound(_)) => {
            info!("No settings file at {:?}, using defaults", path.0);
            SettingsFile::default()
        }
        Err(e) => {
            error!("{}. Using default settings.", e);
            SettingsFile::default()
        }
    };

    commands.insert_resource(settings.volume);
    commands.insert_resource(Difficulty(settings.difficulty));
}

/// Write settings whenever the sliders or difficulty change.
pub fn save_settings_on_change(
    path: Res<SettingsPath>,
    volume: Res<VolumeSettings>,
    difficulty: Res<Difficulty>,
    mut loaded: Local<bool>,
) {
    if !volume.is_changed() && !difficulty.is_changed() {
        return;
    }

    // The first change is the load itself
    if !*loaded {
        *loaded = true;
        return;
    }

    let file = SettingsFile {
        volume: *volume,
        difficulty: difficulty.0,
    };

    if let Err(e) = file.save(&path) {
        error!("Failed to save settings: {}", e);
    }
}
