//! Player plugin - movement, camera, attacks and the second phase.

use bevy::prelude::*;

use super::attacks::{enter_second_phase, player_attack_input};
use super::movement;
use crate::combat::CombatSet;

/// Player plugin - handles player movement, camera, and attacks.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Set up movement systems
        movement::setup_movement_systems(app);

        app.add_systems(Update, player_attack_input.in_set(CombatSet::Input))
            .add_systems(Update, enter_second_phase.in_set(CombatSet::Aftermath));
    }
}
