//! Enemies module - enemy entities, AI, and spawning.

mod ai;
mod components;
mod data;
mod plugin;
mod spawning;

pub use ai::{
    ai_attack, ai_move, ai_think, horizontal_distance, tick_bow_cooldowns, Decision, Perception,
};
pub use components::*;
pub use data::{load_enemy_definitions, ColliderConfig, EnemyArm, EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_enemy, EnemyAssets};
