//! World plugin - arena loading, construction and cleanup.

use bevy::prelude::*;

use crate::combat::{Difficulty, Projectile};
use crate::core::GameState;
use crate::enemies::{spawn_enemy, Enemy, EnemyAssets, EnemyRegistry};
use crate::player::{spawn_player, Player, PlayerAssets, PlayerConfig};
use crate::spawner::{begin_waves, SpawnerKind};

use super::builder::{build_arena, ArenaGeometry};
use super::data::{load_arena_definition, ArenaDefinition};

/// World plugin - handles arena loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_arena_definition)
            .add_systems(OnEnter(GameState::InGame), setup_arena.after(begin_waves))
            .add_systems(OnExit(GameState::InGame), cleanup_arena);
    }
}

/// Build the arena, the player and the enemies placed by hand.
#[allow(clippy::too_many_arguments)]
pub fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    arena: Option<Res<ArenaDefinition>>,
    player_config: Res<PlayerConfig>,
    player_assets: Option<Res<PlayerAssets>>,
    enemy_registry: Res<EnemyRegistry>,
    enemy_assets: Option<Res<EnemyAssets>>,
    difficulty: Res<Difficulty>,
) {
    let Some(arena) = arena else {
        error!("No arena definition loaded!");
        return;
    };

    info!("Building arena: {}", arena.name);

    let player_pos = build_arena(&mut commands, &mut meshes, &mut materials, &arena);

    spawn_player(
        &mut commands,
        player_assets.as_deref(),
        player_pos,
        &player_config,
    );

    for placed in &arena.placed_enemies {
        let Some(definition) = enemy_registry.get(&placed.enemy_type) else {
            warn!("Unknown enemy type in arena: {}", placed.enemy_type);
            continue;
        };

        spawn_enemy(
            &mut commands,
            enemy_assets.as_deref(),
            &placed.enemy_type,
            definition,
            Vec3::new(placed.position.0, 0.0, placed.position.1),
            SpawnerKind::Placed,
            *difficulty,
        );
    }
}

/// Clean up the run when leaving InGame state.
pub fn cleanup_arena(
    mut commands: Commands,
    query: Query<
        Entity,
        Or<(
            With<ArenaGeometry>,
            With<Player>,
            With<Enemy>,
            With<Projectile>,
        )>,
    >,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
