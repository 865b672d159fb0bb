//! World module - the arena and everything placed in it.

mod builder;
mod data;
mod plugin;

pub use builder::{build_arena, ArenaGeometry};
pub use data::{
    load_arena_definition, AmbientDef, ArenaDefinition, LightDef, ObstacleDef, PlacedEnemyDef,
    SpawnerDef, ARENA_FILE,
};
pub use plugin::{cleanup_arena, setup_arena, WorldPlugin};
