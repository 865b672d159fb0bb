//! Enemy AI behavior systems.
//!
//! The state machine itself is the pure `AiState::decide`; the systems
//! around it gather perception, store the decision as an `AiIntent`, and
//! act on that intent (movement, sword swings, arrows).

use bevy::prelude::*;

use super::components::{
    AiAction, AiConfig, AiIntent, AiState, AiTarget, Enemy, EnemyBow, EnemySword,
};
use crate::combat::{
    spawn_projectile, AttackAnimation, AttackClip, Dead, Health, ProjectileAssets,
    ProjectileLaunch, Weapon,
};
use crate::core::SoundEvent;
use crate::player::Player;

/// Arrows are removed after this many seconds in flight.
const ARROW_LIFETIME: f32 = 4.0;

/// What an enemy knows about its surroundings this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    /// Horizontal distance to the current target, if there is one
    pub target_distance: Option<f32>,
    /// Own health as a fraction of maximum
    pub health_ratio: f32,
}

/// Output of one state machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Action of the state the enemy was in when it decided
    pub action: AiAction,
    pub next: AiState,
}

impl AiState {
    /// Run this state's action and check its transitions, in order.
    pub fn decide(self, perception: &Perception, config: &AiConfig) -> Decision {
        let wants_to_flee = perception.health_ratio <= config.percent_health_to_flee;

        let (action, next) = match self {
            AiState::Idle => {
                let next = if perception.target_distance.is_some() {
                    AiState::Chase
                } else if wants_to_flee {
                    AiState::Flee
                } else {
                    AiState::Idle
                };
                (AiAction::Hold, next)
            }
            AiState::Chase => {
                let next = match perception.target_distance {
                    None => AiState::Idle,
                    Some(_) if wants_to_flee => AiState::Flee,
                    Some(distance) if distance < config.attack_distance => AiState::SeekAndAttack,
                    Some(_) => AiState::Chase,
                };
                (AiAction::Seek, next)
            }
            AiState::SeekAndAttack => {
                let next = match perception.target_distance {
                    None => AiState::Idle,
                    Some(distance) if distance >= config.attack_distance => AiState::Chase,
                    Some(_) => AiState::SeekAndAttack,
                };
                (AiAction::SeekAndAttack, next)
            }
            AiState::Flee => {
                let next = match perception.target_distance {
                    None => AiState::Idle,
                    Some(distance) if distance >= config.flee_distance => AiState::Idle,
                    Some(_) => AiState::Flee,
                };
                (AiAction::Flee, next)
            }
        };

        Decision { action, next }
    }
}

/// Distance on the floor plane, ignoring height.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec3::new(b.x - a.x, 0.0, b.z - a.z).length()
}

/// Acquire targets and step every enemy's state machine.
pub fn ai_think(
    player_query: Query<(Entity, &Transform), (With<Player>, Without<Enemy>, Without<Dead>)>,
    mut enemy_query: Query<
        (
            &Transform,
            &AiConfig,
            &Health,
            &mut AiState,
            &mut AiTarget,
            &mut AiIntent,
        ),
        (With<Enemy>, Without<Player>, Without<Dead>),
    >,
) {
    let player = player_query.get_single().ok();

    for (transform, config, health, mut state, mut target, mut intent) in enemy_query.iter_mut() {
        intent.0 = AiAction::Hold;

        let Some((player_entity, player_transform)) = player else {
            target.0 = None;
            continue;
        };

        let player_distance =
            horizontal_distance(transform.translation, player_transform.translation);

        // Without a target the only job is to look for one
        let Some(current_target) = target.0 else {
            if player_distance <= config.sight_distance {
                target.0 = Some(player_entity);
            }
            continue;
        };

        if current_target != player_entity {
            target.0 = None;
            continue;
        }

        if player_distance >= config.disable_distance {
            continue;
        }

        let perception = Perception {
            target_distance: Some(player_distance),
            health_ratio: health.ratio(),
        };
        let decision = state.decide(&perception, config);

        intent.0 = decision.action;
        if decision.next != *state {
            debug!("Enemy AI {:?} -> {:?}", *state, decision.next);
            *state = decision.next;
        }
    }
}

/// Move enemies according to their intent, in straight lines on the floor.
pub fn ai_move(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (&mut Transform, &AiConfig, &AiTarget, &AiIntent),
        (With<Enemy>, Without<Player>, Without<Dead>),
    >,
) {
    let dt = time.delta_secs();

    for (mut enemy_transform, config, target, intent) in enemy_query.iter_mut() {
        if intent.0 == AiAction::Hold {
            continue;
        }

        let Some(target_transform) = target.0.and_then(|t| player_query.get(t).ok()) else {
            continue;
        };

        let target_pos = target_transform.translation;
        let enemy_pos = enemy_transform.translation;
        let to_target = Vec3::new(target_pos.x - enemy_pos.x, 0.0, target_pos.z - enemy_pos.z);
        let distance = to_target.length();

        if distance < 0.01 {
            continue;
        }

        let toward = to_target / distance;
        let step = config.move_speed * dt;

        match intent.0 {
            AiAction::Seek | AiAction::SeekAndAttack => {
                let travel = step.min((distance - config.stopping_distance).max(0.0));
                enemy_transform.translation += toward * travel;

                let look_target = Vec3::new(target_pos.x, enemy_transform.translation.y, target_pos.z);
                enemy_transform.look_at(look_target, Vec3::Y);
            }
            AiAction::Flee => {
                enemy_transform.translation -= toward * step;

                let away = enemy_transform.translation - toward;
                enemy_transform.look_at(away, Vec3::Y);
            }
            AiAction::Hold => {}
        }
    }
}

/// Advance bow cooldowns.
pub fn tick_bow_cooldowns(time: Res<Time>, mut bows: Query<&mut EnemyBow>) {
    for mut bow in bows.iter_mut() {
        bow.cooldown.tick(time.delta());
    }
}

/// Swing swords and loose arrows for enemies that decided to attack.
pub fn ai_attack(
    mut commands: Commands,
    mut enemy_query: Query<
        (
            Entity,
            &Transform,
            &AiIntent,
            Option<&EnemySword>,
            Option<&mut EnemyBow>,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    mut weapons: Query<(&Weapon, &mut AttackAnimation)>,
    projectile_assets: Option<Res<ProjectileAssets>>,
    mut sounds: EventWriter<SoundEvent>,
) {
    for (entity, transform, intent, sword, bow) in enemy_query.iter_mut() {
        if intent.0 != AiAction::SeekAndAttack {
            continue;
        }

        if let Some(sword) = sword {
            let Ok((weapon, mut animation)) = weapons.get_mut(sword.0) else {
                continue;
            };

            if animation.try_play(AttackClip::Swing) {
                if let Some(sound) = &weapon.sound {
                    sounds.send(SoundEvent::play_3d(sound.clone(), transform.translation));
                }
            }
        }

        if let Some(mut bow) = bow {
            if !bow.try_shoot() {
                continue;
            }

            let forward = transform.forward().as_vec3();
            let origin = transform.translation + forward * 0.6 + Vec3::Y * 0.4;

            sounds.send(SoundEvent::play_3d("Arrow", origin));
            spawn_projectile(
                &mut commands,
                projectile_assets.as_deref(),
                ProjectileLaunch {
                    origin,
                    direction: forward,
                    speed: bow.arrow_speed,
                    weapon: bow.arrow.clone(),
                    owner: entity,
                    lifetime: ARROW_LIFETIME,
                },
            );
        }
    }
}
