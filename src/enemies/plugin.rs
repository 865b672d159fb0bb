//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::spawning::setup_enemy_assets;
use crate::combat::CombatSet;

/// Enemy plugin - handles enemy definitions, AI decisions, movement and attacks.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            // Definitions are needed before any arena is built
            .add_systems(Startup, (load_enemy_definitions, setup_enemy_assets).chain())
            // Decide first, then act on the decision
            .add_systems(
                Update,
                (
                    ai::ai_think,
                    ai::ai_move,
                    ai::tick_bow_cooldowns,
                    ai::ai_attack,
                )
                    .chain()
                    .in_set(CombatSet::Input),
            );
    }
}
