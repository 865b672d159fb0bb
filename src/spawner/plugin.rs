//! Spawner plugin - registers spawn points and releases waves.

use bevy::prelude::*;

use super::manager::{Spawner, SpawnerKind, WaveSpawner};
use crate::combat::{CombatSet, Difficulty};
use crate::core::{GameState, PlayState, SoundEvent};
use crate::enemies::{spawn_enemy, EnemyAssets, EnemyRegistry};

/// Spawner plugin - wave budget and timed enemy waves.
pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaveSpawner>()
            .add_systems(OnEnter(GameState::InGame), begin_waves)
            .add_systems(
                Update,
                (register_spawners, release_waves)
                    .chain()
                    .before(CombatSet::Input)
                    .run_if(in_state(PlayState::Running)),
            );
    }
}

/// Fresh arena: forget old spawners and schedule the first wave.
pub fn begin_waves(mut wave: ResMut<WaveSpawner>) {
    wave.reset();
    wave.check_can_spawn();
}

/// Wave spawners join the list as soon as they exist.
pub fn register_spawners(
    mut wave: ResMut<WaveSpawner>,
    spawners: Query<(Entity, &Spawner), Added<Spawner>>,
) {
    for (entity, spawner) in spawners.iter() {
        if spawner.kind == SpawnerKind::Wave {
            wave.add_spawner(entity);
        }
    }
}

/// When the wave timer runs out, spawn the planned enemies.
pub fn release_waves(
    mut commands: Commands,
    time: Res<Time>,
    mut wave: ResMut<WaveSpawner>,
    spawners: Query<(&Spawner, &Transform)>,
    registry: Res<EnemyRegistry>,
    assets: Option<Res<EnemyAssets>>,
    difficulty: Res<Difficulty>,
    mut sounds: EventWriter<SoundEvent>,
) {
    if !wave.tick(time.delta()) {
        return;
    }

    let mut rng = rand::thread_rng();

    let Some(plan) = wave.plan_wave(&mut rng) else {
        return;
    };

    sounds.send(SoundEvent::play_2d("Wave Spawn"));

    let Ok((spawner, spawner_transform)) = spawners.get(plan.spawner) else {
        warn!("Wave spawner {:?} no longer exists", plan.spawner);
        wave.refund(plan.count);
        return;
    };

    let mut spawned = 0;
    for _ in 0..plan.count {
        let Some(enemy_type) = spawner.pick(&mut rng) else {
            warn!("Spawner {:?} has no enemy types", plan.spawner);
            break;
        };

        let Some(definition) = registry.get(enemy_type) else {
            warn!("Unknown enemy type in spawner: {}", enemy_type);
            continue;
        };

        let position = spawner_transform.translation + spawner.scatter_offset(&mut rng);

        spawn_enemy(
            &mut commands,
            assets.as_deref(),
            enemy_type,
            definition,
            position,
            spawner.kind,
            *difficulty,
        );
        spawned += 1;
    }

    // Slots of enemies that failed to spawn would otherwise never come back
    wave.refund(plan.count - spawned);

    info!("Released a wave of {} enemies ({} slots left)", spawned, wave.available);
}
