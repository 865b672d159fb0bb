//! Named sounds loaded from `assets/data/sounds.ron`.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::read_ron;

pub const SOUNDS_FILE: &str = "assets/data/sounds.ron";

/// Which mixer group a sound plays through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SoundGroup {
    Music,
    Sfx,
}

/// One entry of the sound library file.
#[derive(Debug, Clone, Deserialize)]
pub struct SoundDefinition {
    /// Asset path relative to `assets/`
    pub path: String,
    pub group: SoundGroup,
    /// Per-sound gain on top of the channel volume
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Positional sounds are inaudible beyond this distance
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
}

fn default_volume() -> f64 {
    1.0
}

fn default_max_distance() -> f32 {
    40.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoundLibraryFile {
    pub sounds: HashMap<String, SoundDefinition>,
}

/// A sound ready to play.
#[derive(Debug, Clone)]
pub struct LoadedSound {
    pub definition: SoundDefinition,
    pub source: Handle<AudioSource>,
}

/// Every named sound the game can request.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    pub sounds: HashMap<String, LoadedSound>,
}

impl SoundLibrary {
    pub fn get(&self, name: &str) -> Option<&LoadedSound> {
        self.sounds.get(name)
    }
}

/// Read the library file and start loading every sound.
pub fn load_sound_library(asset_server: Res<AssetServer>, mut library: ResMut<SoundLibrary>) {
    let file = match read_ron::<SoundLibraryFile>(Path::new(SOUNDS_FILE)) {
        Ok(file) => file,
        Err(e) => {
            error!("{}. Playing without sounds.", e);
            return;
        }
    };

    for (name, definition) in file.sounds {
        let source = asset_server.load(definition.path.clone());
        library.sounds.insert(name, LoadedSound { definition, source });
    }

    info!("Loaded {} sound definitions", library.sounds.len());
}
