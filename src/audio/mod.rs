//! Audio module - named sounds, channels and volumes.

mod library;
mod music;
mod playback;
mod plugin;

pub use library::{LoadedSound, SoundDefinition, SoundGroup, SoundLibrary, SoundLibraryFile};
pub use playback::{
    distance_attenuation, stop_looping, LoopingSounds, MusicChannel, SfxChannel,
};
pub use plugin::SoundPlugin;
