//! Music and ambience following the game state.

use bevy::prelude::*;

use crate::core::SoundEvent;

pub fn play_menu_music(mut sounds: EventWriter<SoundEvent>) {
    sounds.send(SoundEvent::stop("Game Music"));
    sounds.send(SoundEvent::stop("Wind"));
    sounds.send(SoundEvent::looping("Main Menu Music"));
}

pub fn play_game_music(mut sounds: EventWriter<SoundEvent>) {
    sounds.send(SoundEvent::stop("Main Menu Music"));
    sounds.send(SoundEvent::looping("Game Music"));
    sounds.send(SoundEvent::looping("Wind"));
}

/// The run is over; nothing keeps walking.
pub fn stop_footsteps(mut sounds: EventWriter<SoundEvent>) {
    sounds.send(SoundEvent::stop("Walking"));
}
