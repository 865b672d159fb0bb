//! Global events used for cross-system communication.
//!
//! The combat pipeline is event driven: hitboxes send DamageEvents, the
//! health system applies them and sends DeathEvents, and the death system
//! decides what dying means for the entity (despawn, wave bookkeeping or
//! the end of the run).

use bevy::prelude::*;

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that owns the weapon that hit
    pub source: Entity,
    /// Damage amount, already scaled by difficulty and multipliers
    pub amount: f32,
}

/// Sent once when an entity's health reaches 0.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that dealt the killing blow (if any)
    pub killed_by: Option<Entity>,
}

/// Request to play or stop a named sound from the sound library.
///
/// Gameplay code never talks to the audio backend directly; it sends these
/// and the audio plugin resolves names, channels and volumes.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SoundEvent {
    /// Non-positional one-shot (UI clicks, deaths, wave horns)
    Play2d { sound: String },
    /// One-shot attenuated by distance to the listener
    Play3d { sound: String, position: Vec3 },
    /// Looping sound; ignored if the same sound is already looping
    PlayLooping { sound: String },
    /// Stop a looping sound
    Stop { sound: String },
}

impl SoundEvent {
    pub fn play_2d(sound: impl Into<String>) -> Self {
        Self::Play2d { sound: sound.into() }
    }

    pub fn play_3d(sound: impl Into<String>, position: Vec3) -> Self {
        Self::Play3d {
            sound: sound.into(),
            position,
        }
    }

    pub fn looping(sound: impl Into<String>) -> Self {
        Self::PlayLooping { sound: sound.into() }
    }

    pub fn stop(sound: impl Into<String>) -> Self {
        Self::Stop { sound: sound.into() }
    }
}
