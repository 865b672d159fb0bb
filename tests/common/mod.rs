//! Shared helpers for headless integration tests.

#![allow(dead_code)]

use arena_survival::core::{DamageEvent, DeathEvent, GameState, SoundEvent};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::CollisionEvent;
use std::time::Duration;

/// Seconds advanced by every `app.update()`.
pub const STEP_SECS: f32 = 0.1;

/// Sound events seen so far, newest last.
#[derive(Resource, Default)]
pub struct HeardSounds(pub Vec<SoundEvent>);

impl HeardSounds {
    pub fn contains(&self, event: &SoundEvent) -> bool {
        self.0.iter().any(|heard| heard == event)
    }
}

fn record_sounds(mut events: EventReader<SoundEvent>, mut heard: ResMut<HeardSounds>) {
    heard.0.extend(events.read().cloned());
}

/// Minimal app with game states, gameplay events and a fixed time step.
pub fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            STEP_SECS,
        )))
        .init_state::<GameState>()
        .add_event::<DamageEvent>()
        .add_event::<DeathEvent>()
        .add_event::<SoundEvent>()
        .add_event::<CollisionEvent>()
        .init_resource::<HeardSounds>()
        .add_systems(Last, record_sounds);
    app
}

/// Run `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
