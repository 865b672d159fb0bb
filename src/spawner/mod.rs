//! Spawner module - spawn points and wave bookkeeping.

mod manager;
mod plugin;

pub use manager::{SpawnedFrom, Spawner, SpawnerKind, WavePlan, WaveSpawner};
pub use plugin::{begin_waves, register_spawners, release_waves, SpawnerPlugin};
