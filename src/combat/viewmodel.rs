//! First-person hand viewmodels.
//!
//! The hands are spawned as children of the player's camera, so they follow
//! the view without any manual position tracking. Each hand is a weapon
//! with its own attack clip and a sensor hitbox that swings with it.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::f32::consts::PI;

use super::components::*;
use crate::core::GameState;

/// A hand rendered in front of the camera.
#[derive(Component)]
pub struct HandViewmodel {
    /// Resting offset relative to the camera
    pub rest: Vec3,
}

/// Light attached to a hand, lit during the player's second phase.
#[derive(Component)]
pub struct HandGlow;

/// Setup hand viewmodel systems.
pub fn setup_viewmodel_systems(app: &mut App) {
    app.add_systems(
        Update,
        animate_hand_viewmodels.run_if(in_state(GameState::InGame)),
    );
}

/// Spawn one hand under the camera and return its entity.
pub fn spawn_hand(
    parent: &mut ChildBuilder,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    rest: Vec3,
    weapon: Weapon,
    owner: Entity,
) -> Entity {
    let mut hand = parent.spawn((
        Name::new("Hand"),
        HandViewmodel { rest },
        weapon,
        AttackAnimation::default(),
        MultiHitGuard::default(),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(rest),
        Visibility::default(),
    ));
    let hand_entity = hand.id();

    hand.with_children(|hand| {
        // Sensor reaching ahead of the fist; disabled until a clip is live
        hand.spawn((
            Hitbox {
                weapon: hand_entity,
                owner,
            },
            Collider::ball(0.35),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
            ColliderDisabled,
            Transform::from_xyz(0.0, 0.0, -0.6),
        ));

        hand.spawn((
            HandGlow,
            PointLight {
                color: Color::srgb(1.0, 0.45, 0.15),
                intensity: 0.0,
                range: 3.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::default(),
        ));
    });

    hand_entity
}

/// Push hands forward while a clip plays, bob gently otherwise.
fn animate_hand_viewmodels(
    time: Res<Time>,
    mut hands: Query<(&HandViewmodel, &AttackAnimation, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let t = (15.0 * dt).min(1.0);

    for (hand, animation, mut transform) in hands.iter_mut() {
        let swing = (animation.progress() * PI).sin();

        let offset = match animation.playing {
            Some(AttackClip::Light | AttackClip::Swing) => {
                Vec3::new(-hand.rest.x * 0.5, 0.05, -0.45) * swing
            }
            Some(AttackClip::Heavy) => Vec3::new(-hand.rest.x * 0.3, 0.15, -0.6) * swing,
            None => {
                let bob = (time.elapsed_secs() * 2.0).sin() * 0.01;
                Vec3::new(0.0, bob, 0.0)
            }
        };

        transform.translation = transform.translation.lerp(hand.rest + offset, t);
    }
}
