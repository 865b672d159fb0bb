//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::{AiConfig, AiState};
use crate::combat::DamageSource;
use crate::core::read_ron;

/// Directory scanned for enemy definitions at startup.
pub const ENEMIES_DIR: &str = "assets/data/enemies";

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.3,
        }
    }
}

/// The weapon an enemy carries.
#[derive(Deserialize, Clone, Debug)]
pub enum EnemyArm {
    /// Melee weapon swung with its primary action
    Sword {
        damage: DamageSource,
        /// Seconds a swing takes
        swing_secs: f32,
        #[serde(default)]
        sound: Option<String>,
    },
    /// Fires arrows while attacking
    Bow {
        arrow_damage: DamageSource,
        arrow_speed: f32,
        shoot_cooldown: f32,
    },
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub arm: EnemyArm,
    pub ai: AiConfig,
    pub scale: f32,
    /// Body color (linear sRGB)
    pub color: (f32, f32, f32),
    #[serde(default)]
    pub collider: Option<ColliderConfig>,
    #[serde(default)]
    pub damage_sound: Option<String>,
    #[serde(default)]
    pub death_sound: Option<String>,
}

impl EnemyDefinition {
    /// Built-in melee enemy, used when no data files are present.
    pub fn swordsman() -> Self {
        Self {
            name: "Swordsman".to_string(),
            max_health: 60.0,
            arm: EnemyArm::Sword {
                damage: DamageSource::new(8.0, 14.0).with_difficulty(),
                swing_secs: 0.7,
                sound: Some("Sword Swing".to_string()),
            },
            ai: AiConfig {
                start_state: AiState::Idle,
                move_speed: 3.5,
                sight_distance: 30.0,
                attack_distance: 2.2,
                flee_distance: 12.0,
                percent_health_to_flee: 0.15,
                disable_distance: 80.0,
                stopping_distance: 1.4,
            },
            scale: 1.0,
            color: (0.55, 0.18, 0.16),
            collider: None,
            damage_sound: Some("Hit".to_string()),
            death_sound: Some("Enemy Death".to_string()),
        }
    }

    /// Built-in ranged enemy, used when no data files are present.
    pub fn archer() -> Self {
        Self {
            name: "Archer".to_string(),
            max_health: 35.0,
            arm: EnemyArm::Bow {
                arrow_damage: DamageSource::new(6.0, 6.0).with_difficulty(),
                arrow_speed: 22.0,
                shoot_cooldown: 2.5,
            },
            ai: AiConfig {
                start_state: AiState::Idle,
                move_speed: 3.0,
                sight_distance: 35.0,
                attack_distance: 14.0,
                flee_distance: 9.0,
                percent_health_to_flee: 0.4,
                disable_distance: 80.0,
                stopping_distance: 10.0,
            },
            scale: 0.9,
            color: (0.2, 0.42, 0.2),
            collider: None,
            damage_sound: Some("Hit".to_string()),
            death_sound: Some("Enemy Death".to_string()),
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Registry with the built-in roster.
    pub fn builtin() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert("swordsman".to_string(), EnemyDefinition::swordsman());
        definitions.insert("archer".to_string(), EnemyDefinition::archer());
        Self { definitions }
    }

    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Load every `*.ron` file in `dir`, keyed by file stem.
    ///
    /// Files that fail to parse are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        let Ok(entries) = fs::read_dir(dir) else {
            warn!("Failed to read enemy definitions directory {:?}", dir);
            return 0;
        };

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();

            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }

            let Some(enemy_type) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let enemy_type = enemy_type.to_string();

            match read_ron::<EnemyDefinition>(&path) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    self.definitions.insert(enemy_type, definition);
                    loaded += 1;
                }
                Err(e) => error!("{}", e),
            }
        }
        loaded
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(ENEMIES_DIR);

    if !enemies_dir.exists() {
        warn!(
            "Enemy definitions directory not found: {:?}, using built-in roster",
            enemies_dir
        );
        *registry = EnemyRegistry::builtin();
        return;
    }

    if registry.load_dir(enemies_dir) == 0 {
        warn!("No enemy definitions loaded, using built-in roster");
        *registry = EnemyRegistry::builtin();
        return;
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
