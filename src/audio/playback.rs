//! Turning SoundEvents into playing audio.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;
use std::collections::HashMap;

use super::library::{SoundGroup, SoundLibrary};
use crate::core::SoundEvent;
use crate::player::PlayerCamera;
use crate::settings::{VolumeChannel, VolumeSettings};

/// Channel for music and ambience.
#[derive(Resource)]
pub struct MusicChannel;

/// Channel for sound effects.
#[derive(Resource)]
pub struct SfxChannel;

/// Full volume inside this distance.
const REFERENCE_DISTANCE: f32 = 2.0;

/// Looping sounds currently playing, by name.
#[derive(Resource, Default)]
pub struct LoopingSounds(pub HashMap<String, Handle<AudioInstance>>);

impl LoopingSounds {
    pub fn is_playing(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// Gain of a positional sound at `distance` from the listener.
///
/// Inverse-distance rolloff past the reference distance, silent beyond
/// `max_distance`.
pub fn distance_attenuation(distance: f32, max_distance: f32) -> f64 {
    if distance >= max_distance {
        return 0.0;
    }
    (REFERENCE_DISTANCE / distance.max(REFERENCE_DISTANCE)) as f64
}

/// Stop a tracked looping sound. Returns whether it was being tracked.
pub fn stop_looping(
    looping: &mut LoopingSounds,
    instances: &mut Assets<AudioInstance>,
    name: &str,
) -> bool {
    let Some(handle) = looping.0.remove(name) else {
        return false;
    };

    if let Some(instance) = instances.get_mut(&handle) {
        if let Some(err) = instance.stop(AudioTween::default()) {
            warn!("Failed to stop looping sound {}: {:?}", name, err);
        }
    }
    true
}

fn start<T: Resource>(
    channel: &AudioChannel<T>,
    source: Handle<AudioSource>,
    volume: f64,
    looped: bool,
) -> Handle<AudioInstance> {
    let mut command = channel.play(source);
    command.with_volume(volume);
    if looped {
        command.looped();
    }
    command.handle()
}

/// Play and stop sounds requested by gameplay.
pub fn play_sound_events(
    mut events: EventReader<SoundEvent>,
    library: Res<SoundLibrary>,
    music: Res<AudioChannel<MusicChannel>>,
    sfx: Res<AudioChannel<SfxChannel>>,
    listener: Query<&GlobalTransform, With<PlayerCamera>>,
    mut looping: ResMut<LoopingSounds>,
    mut instances: ResMut<Assets<AudioInstance>>,
) {
    let listener_position = listener.get_single().ok().map(|t| t.translation());

    for event in events.read() {
        let (name, looped, position) = match event {
            SoundEvent::Play2d { sound } => (sound, false, None),
            SoundEvent::Play3d { sound, position } => (sound, false, Some(*position)),
            SoundEvent::PlayLooping { sound } => {
                if looping.is_playing(sound) {
                    continue;
                }
                (sound, true, None)
            }
            SoundEvent::Stop { sound } => {
                stop_looping(&mut looping, &mut instances, sound);
                continue;
            }
        };

        let Some(loaded) = library.get(name) else {
            warn!("Unknown sound: {}", name);
            continue;
        };

        let mut volume = loaded.definition.volume;
        if let (Some(position), Some(listener)) = (position, listener_position) {
            volume *= distance_attenuation(
                position.distance(listener),
                loaded.definition.max_distance,
            );
            if volume <= 0.0 {
                continue;
            }
        }

        let source = loaded.source.clone();
        let handle = match loaded.definition.group {
            SoundGroup::Music => start(&music, source, volume, looped),
            SoundGroup::Sfx => start(&sfx, source, volume, looped),
        };

        if looped {
            looping.0.insert(name.clone(), handle);
        }
    }
}

/// Push slider changes to the channels.
pub fn apply_volume_settings(
    settings: Res<VolumeSettings>,
    music: Res<AudioChannel<MusicChannel>>,
    sfx: Res<AudioChannel<SfxChannel>>,
) {
    if !settings.is_changed() {
        return;
    }

    music.set_volume(settings.amplitude(VolumeChannel::Music));
    sfx.set_volume(settings.amplitude(VolumeChannel::Sfx));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_sounds_play_at_full_volume() {
        assert_eq!(distance_attenuation(0.0, 40.0), 1.0);
        assert_eq!(distance_attenuation(REFERENCE_DISTANCE, 40.0), 1.0);
    }

    #[test]
    fn volume_falls_off_with_distance() {
        let near = distance_attenuation(4.0, 40.0);
        let far = distance_attenuation(20.0, 40.0);
        assert!((near - 0.5).abs() < 1e-6);
        assert!(far < near);
    }

    #[test]
    fn stopping_forgets_the_loop_even_without_an_instance() {
        let mut looping = LoopingSounds::default();
        let mut instances = Assets::<AudioInstance>::default();
        looping.0.insert("Walking".to_string(), Handle::default());

        assert!(stop_looping(&mut looping, &mut instances, "Walking"));
        assert!(!looping.is_playing("Walking"));

        // A second stop has nothing left to do
        assert!(!stop_looping(&mut looping, &mut instances, "Walking"));
    }

    #[test]
    fn sounds_beyond_range_are_silent() {
        assert_eq!(distance_attenuation(40.0, 40.0), 0.0);
        assert_eq!(distance_attenuation(100.0, 40.0), 0.0);
    }
}
