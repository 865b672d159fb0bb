//! Combat systems - attack clips, hitboxes, damage and death handling.

use bevy::ecs::query::Has;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::collections::HashSet;

use super::components::*;
use super::projectile::expire_projectiles;
use crate::core::{GameState, PlayState, SoundEvent};
use crate::player::Player;
use crate::spawner::{SpawnedFrom, SpawnerKind, WaveSpawner};

/// System set ordering for combat.
///
/// Input and AI decide what to do, Action advances clips and hitboxes,
/// Damage turns contacts into health changes, Aftermath reacts to deaths.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Action,
    Damage,
    Aftermath,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        .init_resource::<Difficulty>()

        // System ordering
        .configure_sets(
            Update,
            (
                CombatSet::Input,
                CombatSet::Action,
                CombatSet::Damage,
                CombatSet::Aftermath,
            )
                .chain()
                .run_if(in_state(PlayState::Running)),
        )

        // Action systems
        .add_systems(
            Update,
            (
                tick_attack_animations,
                tick_hit_guards,
                sync_hitbox_colliders,
                expire_projectiles,
            )
                .in_set(CombatSet::Action),
        )

        // Damage systems
        .add_systems(
            Update,
            (detect_weapon_hits, apply_damage)
                .chain()
                .in_set(CombatSet::Damage),
        )

        .add_systems(Update, handle_deaths.in_set(CombatSet::Aftermath))
        .add_systems(OnExit(GameState::InGame), clear_stale_combat_events);
}

/// Advance playing attack clips.
pub fn tick_attack_animations(time: Res<Time>, mut query: Query<&mut AttackAnimation>) {
    for mut animation in query.iter_mut() {
        animation.tick(time.delta());
    }
}

/// Clear the "dealt damage recently" flag once its delay has passed.
pub fn tick_hit_guards(time: Res<Time>, mut query: Query<&mut MultiHitGuard>) {
    for mut guard in query.iter_mut() {
        guard.tick(time.delta());
    }
}

/// Enable hitbox colliders only during the live part of an attack clip.
///
/// Hitboxes of weapons without an AttackAnimation (arrows) stay live.
pub fn sync_hitbox_colliders(
    mut commands: Commands,
    hitboxes: Query<(Entity, &Hitbox, Has<ColliderDisabled>)>,
    animations: Query<&AttackAnimation>,
) {
    for (entity, hitbox, disabled) in hitboxes.iter() {
        let Ok(animation) = animations.get(hitbox.weapon) else {
            continue;
        };

        let active = animation.hitbox_active();
        if active && disabled {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else if !active && !disabled {
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}

/// Turn hitbox contacts into damage events.
pub fn detect_weapon_hits(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    hitboxes: Query<&Hitbox>,
    mut weapons: Query<(&Weapon, &mut MultiHitGuard, Option<&AttackAnimation>)>,
    targets: Query<(), (With<Health>, Without<Dead>)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    // Projectiles broken this frame must not hit again before despawn applies
    let mut destroyed = HashSet::new();

    for event in collisions.read() {
        let CollisionEvent::Started(first, second, _) = event else {
            continue;
        };

        for (hitbox_entity, other) in [(*first, *second), (*second, *first)] {
            let Ok(hitbox) = hitboxes.get(hitbox_entity) else {
                continue;
            };

            if other == hitbox.owner || destroyed.contains(&hitbox.weapon) {
                continue;
            }

            let Ok((weapon, mut guard, animation)) = weapons.get_mut(hitbox.weapon) else {
                continue;
            };

            let clip = animation.and_then(|a| a.playing);
            let outcome = weapon.resolve_contact(&mut guard, clip, targets.contains(other));

            if let Some(amount) = outcome.damage {
                damage_events.send(DamageEvent {
                    target: other,
                    source: hitbox.owner,
                    amount,
                });
            }

            if outcome.destroy_weapon {
                destroyed.insert(hitbox.weapon);
                commands.entity(hitbox.weapon).despawn_recursive();
            }
        }
    }
}

/// Apply damage to entities.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(
        &mut Health,
        Option<&HealthSounds>,
        Option<&GlobalTransform>,
        Has<Dead>,
    )>,
    mut death_events: EventWriter<DeathEvent>,
    mut sounds: EventWriter<SoundEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, health_sounds, transform, dead)) = health_query.get_mut(event.target)
        else {
            continue;
        };

        if dead {
            continue;
        }

        health.take_damage(event.amount);

        if let Some(sound) = health_sounds.and_then(|s| s.damage.as_ref()) {
            let position = transform.map_or(Vec3::ZERO, |t| t.translation());
            sounds.send(SoundEvent::play_3d(sound.clone(), position));
        }

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// React to deaths: end the run, return wave budget, or just despawn.
pub fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    victims: Query<(Option<&HealthSounds>, Option<&SpawnedFrom>, Has<Player>)>,
    mut wave: ResMut<WaveSpawner>,
    mut sounds: EventWriter<SoundEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        let Ok((health_sounds, spawned_from, is_player)) = victims.get(event.entity) else {
            continue;
        };

        if let Some(sound) = health_sounds.and_then(|s| s.death.as_ref()) {
            sounds.send(SoundEvent::play_2d(sound.clone()));
        }

        if is_player {
            info!("Player died! Showing death screen...");
            next_state.set(GameState::GameOver);
            continue;
        }

        if spawned_from.is_some_and(|s| s.0 == SpawnerKind::Wave) {
            wave.increment_available();
        }

        commands.entity(event.entity).despawn_recursive();
    }
}

/// Drop contacts queued by the physics step of the last frame of a run.
fn clear_stale_combat_events(
    mut collisions: ResMut<Events<CollisionEvent>>,
    mut damage: ResMut<Events<DamageEvent>>,
) {
    collisions.clear();
    damage.clear();
}
