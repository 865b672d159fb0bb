//! Enemy spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::collections::HashMap;

use super::components::*;
use super::data::{EnemyArm, EnemyDefinition, EnemyRegistry};
use crate::combat::{
    AttackAnimation, Difficulty, Health, HealthSounds, Hitbox, MultiHitGuard, Weapon,
};
use crate::spawner::{SpawnedFrom, SpawnerKind};

/// Meshes and per-type materials for enemy bodies and weapons.
#[derive(Resource)]
pub struct EnemyAssets {
    pub body: Handle<Mesh>,
    pub sword: Handle<Mesh>,
    pub bow: Handle<Mesh>,
    pub weapon_material: Handle<StandardMaterial>,
    pub body_materials: HashMap<String, Handle<StandardMaterial>>,
}

/// Build enemy render assets once the registry is loaded.
pub fn setup_enemy_assets(
    mut commands: Commands,
    registry: Res<EnemyRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let body_materials = registry
        .definitions
        .iter()
        .map(|(enemy_type, definition)| {
            let (r, g, b) = definition.color;
            let material = materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, b),
                perceptual_roughness: 0.8,
                ..default()
            });
            (enemy_type.clone(), material)
        })
        .collect();

    commands.insert_resource(EnemyAssets {
        body: meshes.add(Capsule3d::new(0.3, 1.0)),
        sword: meshes.add(Cuboid::new(0.06, 0.06, 0.9)),
        bow: meshes.add(Torus::new(0.25, 0.3)),
        weapon_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.7, 0.7, 0.75),
            metallic: 0.8,
            ..default()
        }),
        body_materials,
    });
}

/// Spawn one enemy standing on the floor at `position`.
pub fn spawn_enemy(
    commands: &mut Commands,
    assets: Option<&EnemyAssets>,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec3,
    origin: SpawnerKind,
    difficulty: Difficulty,
) -> Entity {
    let collider_config = definition.collider.clone().unwrap_or_default();
    let feet_offset = (collider_config.half_height + collider_config.radius) * definition.scale;

    let enemy = commands
        .spawn((
            Name::new(definition.name.clone()),
            Enemy,
            EnemyType(enemy_type.to_string()),
            definition.ai.start_state,
            definition.ai.clone(),
            AiTarget::default(),
            AiIntent::default(),
            Health::new(definition.max_health),
            HealthSounds {
                damage: definition.damage_sound.clone(),
                death: definition.death_sound.clone(),
            },
            SpawnedFrom(origin),
            Transform::from_translation(Vec3::new(position.x, feet_offset, position.z))
                .with_scale(Vec3::splat(definition.scale)),
            Visibility::default(),
            Collider::capsule_y(collider_config.half_height, collider_config.radius),
            RigidBody::KinematicPositionBased,
        ))
        .id();

    if let Some(assets) = assets {
        if let Some(material) = assets.body_materials.get(enemy_type) {
            commands
                .entity(enemy)
                .insert((Mesh3d(assets.body.clone()), MeshMaterial3d(material.clone())));
        }
    }

    match &definition.arm {
        EnemyArm::Sword {
            damage,
            swing_secs,
            sound,
        } => {
            let mut weapon = Weapon::from_source(*damage, difficulty);
            if let Some(sound) = sound {
                weapon = weapon.with_sound(sound.clone());
            }

            let mut sword_entity = Entity::PLACEHOLDER;
            commands.entity(enemy).with_children(|parent| {
                let mut sword = parent.spawn((
                    Name::new("Sword"),
                    weapon,
                    AttackAnimation::new(*swing_secs, *swing_secs * 1.5),
                    MultiHitGuard::default(),
                    Transform::from_xyz(0.4, 0.1, -0.45),
                    Visibility::default(),
                ));
                let sword_id = sword.id();
                sword_entity = sword_id;

                if let Some(assets) = assets {
                    sword.insert((
                        Mesh3d(assets.sword.clone()),
                        MeshMaterial3d(assets.weapon_material.clone()),
                    ));
                }

                sword.with_children(|blade| {
                    blade.spawn((
                        Hitbox {
                            weapon: sword_id,
                            owner: enemy,
                        },
                        Collider::cuboid(0.15, 0.15, 0.6),
                        Sensor,
                        ActiveEvents::COLLISION_EVENTS,
                        ActiveCollisionTypes::default()
                            | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
                        ColliderDisabled,
                        Transform::from_xyz(0.0, 0.0, -0.3),
                    ));
                });
            });

            commands.entity(enemy).insert(EnemySword(sword_entity));
        }
        EnemyArm::Bow {
            arrow_damage,
            arrow_speed,
            shoot_cooldown,
        } => {
            let arrow = Weapon::from_source(*arrow_damage, difficulty);
            commands
                .entity(enemy)
                .insert(EnemyBow::new(*arrow_speed, arrow, *shoot_cooldown));

            if let Some(assets) = assets {
                commands.entity(enemy).with_children(|parent| {
                    parent.spawn((
                        Name::new("Bow"),
                        Mesh3d(assets.bow.clone()),
                        MeshMaterial3d(assets.weapon_material.clone()),
                        Transform::from_xyz(0.35, 0.1, -0.35)
                            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                    ));
                });
            }
        }
    }

    info!("Spawned {} at ({:.1}, {:.1})", definition.name, position.x, position.z);

    enemy
}
