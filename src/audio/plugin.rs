//! Sound plugin - kira channels, the sound library and state music.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use super::library::{load_sound_library, SoundLibrary};
use super::music::{play_game_music, play_menu_music, stop_footsteps};
use super::playback::{
    apply_volume_settings, play_sound_events, LoopingSounds, MusicChannel, SfxChannel,
};
use crate::core::GameState;

/// Sound plugin - plays SoundEvents through the music and effects channels.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_audio_channel::<MusicChannel>()
            .add_audio_channel::<SfxChannel>()
            .init_resource::<SoundLibrary>()
            .init_resource::<LoopingSounds>()
            .add_systems(Startup, load_sound_library)
            .add_systems(OnEnter(GameState::MainMenu), play_menu_music)
            .add_systems(OnEnter(GameState::InGame), play_game_music)
            .add_systems(OnExit(GameState::InGame), stop_footsteps)
            .add_systems(Update, (apply_volume_settings, play_sound_events));
    }
}
