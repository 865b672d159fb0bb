//! Arena data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::core::{read_ron, DataLoadError};
use crate::spawner::SpawnerKind;

pub const ARENA_FILE: &str = "assets/data/arena.ron";

/// Global ambient light settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AmbientDef {
    pub color: (f32, f32, f32),
    pub brightness: f32,
}

/// A point light placed in the arena.
#[derive(Debug, Clone, Deserialize)]
pub struct LightDef {
    pub position: (f32, f32, f32),
    pub color: (f32, f32, f32),
    pub intensity: f32,
    pub range: f32,
}

/// A solid block standing on the floor (cover, pillars).
#[derive(Debug, Clone, Deserialize)]
pub struct ObstacleDef {
    pub position: (f32, f32),
    pub size: (f32, f32, f32),
}

/// A spawn point and what it produces.
#[derive(Debug, Clone, Deserialize)]
pub struct SpawnerDef {
    pub position: (f32, f32),
    pub kind: SpawnerKind,
    pub enemy_types: Vec<String>,
    #[serde(default = "default_scatter")]
    pub scatter: f32,
}

fn default_scatter() -> f32 {
    1.5
}

/// An enemy standing in the arena from the start.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedEnemyDef {
    pub enemy_type: String,
    pub position: (f32, f32),
}

/// Arena definition loaded from RON file.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct ArenaDefinition {
    pub name: String,
    /// Half the floor's side length; the arena spans -half_size..half_size
    pub half_size: f32,
    pub wall_height: f32,
    pub floor_color: (f32, f32, f32),
    pub wall_color: (f32, f32, f32),
    pub ambient: AmbientDef,
    #[serde(default)]
    pub sun_illuminance: f32,
    #[serde(default)]
    pub lights: Vec<LightDef>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
    pub player_start: (f32, f32),
    pub spawners: Vec<SpawnerDef>,
    #[serde(default)]
    pub placed_enemies: Vec<PlacedEnemyDef>,
}

impl Default for ArenaDefinition {
    fn default() -> Self {
        let wave_types = vec!["swordsman".to_string(), "archer".to_string()];
        let corner = |x: f32, z: f32| SpawnerDef {
            position: (x, z),
            kind: SpawnerKind::Wave,
            enemy_types: wave_types.clone(),
            scatter: default_scatter(),
        };

        Self {
            name: "Courtyard".to_string(),
            half_size: 30.0,
            wall_height: 5.0,
            floor_color: (0.35, 0.33, 0.3),
            wall_color: (0.45, 0.42, 0.38),
            ambient: AmbientDef {
                color: (0.75, 0.8, 0.9),
                brightness: 300.0,
            },
            sun_illuminance: 6000.0,
            lights: Vec::new(),
            obstacles: Vec::new(),
            player_start: (0.0, 0.0),
            spawners: vec![
                corner(-24.0, -24.0),
                corner(24.0, -24.0),
                corner(-24.0, 24.0),
                corner(24.0, 24.0),
            ],
            placed_enemies: Vec::new(),
        }
    }
}

impl ArenaDefinition {
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        read_ron(path)
    }

    /// Whether a floor position lies inside the walls.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x.abs() < self.half_size && z.abs() < self.half_size
    }
}

/// Load the arena at startup, falling back to the built-in courtyard.
pub fn load_arena_definition(mut commands: Commands) {
    let arena = match ArenaDefinition::load(Path::new(ARENA_FILE)) {
        Ok(arena) => {
            info!("Loaded arena definition: {}", arena.name);
            arena
        }
        Err(e) => {
            warn!("{}. Using built-in arena.", e);
            ArenaDefinition::default()
        }
    };

    commands.insert_resource(arena);
}
