//! First-person player movement and camera control.

use bevy::input::mouse::MouseMotion;
use bevy::pbr::FogFalloff;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{spawn_hand, Difficulty, Health, HealthSounds, Weapon};
use crate::core::{GameState, PlayState, SoundEvent};

/// Marker component for the player's camera.
#[derive(Component)]
pub struct PlayerCamera {
    /// Current pitch angle in radians (looking up/down)
    pub pitch: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self { pitch: 0.0 }
    }
}

/// Shared mesh and material for the player's fists.
#[derive(Resource)]
pub struct PlayerAssets {
    pub hand_mesh: Handle<Mesh>,
    pub hand_material: Handle<StandardMaterial>,
}

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app
        .init_resource::<PlayerConfig>()
        .add_systems(Startup, setup_player_assets)
        .add_systems(OnEnter(PlayState::Running), grab_cursor)
        .add_systems(OnEnter(PlayState::Paused), (release_cursor, silence_footsteps))
        .add_systems(OnExit(GameState::InGame), release_cursor)
        .add_systems(
            Update,
            (
                mouse_look,
                player_movement,
            )
            .run_if(in_state(PlayState::Running))
        );
}

fn setup_player_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(PlayerAssets {
        hand_mesh: meshes.add(Cuboid::new(0.12, 0.12, 0.22)),
        hand_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.68, 0.55),
            perceptual_roughness: 0.9,
            ..default()
        }),
    });
}

/// Grab and hide cursor while playing.
fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor for menus.
fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Stop the walking loop when the game pauses mid-stride.
pub fn silence_footsteps(
    mut player_query: Query<&mut MovementState, With<Player>>,
    mut sounds: EventWriter<SoundEvent>,
) {
    for mut movement_state in player_query.iter_mut() {
        if movement_state.walking {
            movement_state.walking = false;
            sounds.send(SoundEvent::stop("Walking"));
        }
    }
}

/// Handle mouse movement for looking around.
///
/// Rotates the player entity horizontally (yaw) and the camera vertically (pitch).
/// The camera is a child of the player, so horizontal rotation affects both.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<PlayerConfig>,
    mut player_query: Query<&mut Transform, With<Player>>,
    mut camera_query: Query<(&mut Transform, &mut PlayerCamera), (With<Camera3d>, Without<Player>)>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(mut player_transform) = player_query.get_single_mut() else {
        return;
    };
    let Ok((mut camera_transform, mut camera)) = camera_query.get_single_mut() else {
        return;
    };

    let sensitivity = config.mouse_sensitivity * 0.001;
    let y_invert = if config.invert_y { -1.0 } else { 1.0 };

    player_transform.rotate_y(-delta.x * sensitivity);

    // Straight up to straight down
    camera.pitch -= delta.y * sensitivity * y_invert;
    camera.pitch = camera.pitch.clamp(-1.55, 1.55);

    camera_transform.rotation = Quat::from_rotation_x(camera.pitch);
}

/// Ease the input direction toward the keys instead of snapping.
pub fn smooth_direction(current: Vec2, target: Vec2, smooth_time: f32, dt: f32) -> Vec2 {
    if smooth_time <= 0.0 {
        return target;
    }
    let blend = 1.0 - (-dt / smooth_time).exp();
    current.lerp(target, blend)
}

/// Handle WASD movement and jumping.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(
        Entity,
        &Transform,
        &MovementStats,
        &mut MovementState,
        &mut KinematicCharacterController,
    ), With<Player>>,
    mut sounds: EventWriter<SoundEvent>,
) {
    let Ok((player_entity, transform, stats, mut movement_state, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };
    let dt = time.delta_secs();

    // Player capsule is capsule_y(0.5, 0.3), so bottom is 0.8 units below center
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * 0.75;
        context.cast_ray(
            ray_origin,
            Vec3::NEG_Y,
            0.15,
            true,
            QueryFilter::default().exclude_collider(player_entity),
        ).is_some()
    } else {
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
        if keyboard.just_pressed(KeyCode::Space) {
            movement_state.vertical_velocity = stats.jump_velocity(&config);
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * dt;
    }

    // x = strafe, y = forward
    let mut target = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        target.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        target.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        target.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        target.x += 1.0;
    }
    let target = target.normalize_or_zero();

    movement_state.direction =
        smooth_direction(movement_state.direction, target, config.move_smooth_time, dt);

    // Footsteps follow the keys, not the eased direction
    let moving = target != Vec2::ZERO;
    if moving != movement_state.walking {
        movement_state.walking = moving;
        sounds.send(if moving {
            SoundEvent::looping("Walking")
        } else {
            SoundEvent::stop("Walking")
        });
    }

    let yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
    let rotation = Quat::from_rotation_y(yaw);
    let direction = Vec3::new(movement_state.direction.x, 0.0, -movement_state.direction.y);
    let movement = rotation * direction;

    let speed = if keyboard.pressed(KeyCode::ShiftLeft) {
        stats.sprint_speed
    } else {
        stats.walk_speed
    };

    let horizontal = movement * speed * dt;
    let vertical = Vec3::new(0.0, movement_state.vertical_velocity * dt, 0.0);

    controller.translation = Some(horizontal + vertical);
}

/// Spawn the player entity with camera and fists.
pub fn spawn_player(
    commands: &mut Commands,
    assets: Option<&PlayerAssets>,
    position: Vec3,
    config: &PlayerConfig,
) -> Entity {
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            MovementState::default(),
            config.movement_stats(),
            SecondPhase::default(),
            Health::new(config.max_health),
            HealthSounds {
                damage: Some("Player Hurt".to_string()),
                death: Some("Player Death".to_string()),
            },
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.4),
                    min_width: CharacterLength::Absolute(0.3),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    let (hand_mesh, hand_material) = assets
        .map(|a| (a.hand_mesh.clone(), a.hand_material.clone()))
        .unwrap_or_default();

    // Fists ignore difficulty
    let fist = Weapon::from_source(config.fist_damage, Difficulty::default()).with_sound("Punch");

    let mut hands = (Entity::PLACEHOLDER, Entity::PLACEHOLDER);

    commands.entity(player).with_children(|parent| {
        parent
            .spawn((
                Camera3d::default(),
                Camera {
                    clear_color: ClearColorConfig::Custom(Color::srgb(0.52, 0.6, 0.68)),
                    ..default()
                },
                DistanceFog {
                    color: Color::srgb(0.52, 0.6, 0.68),
                    falloff: FogFalloff::Linear {
                        start: 25.0,
                        end: 80.0,
                    },
                    ..default()
                },
                PlayerCamera::default(),
                // Eye level relative to the capsule center
                Transform::from_xyz(0.0, 0.6, 0.0),
            ))
            .with_children(|camera| {
                let left = spawn_hand(
                    camera,
                    hand_mesh.clone(),
                    hand_material.clone(),
                    Vec3::new(-0.32, -0.28, -0.55),
                    fist.clone(),
                    player,
                );
                let right = spawn_hand(
                    camera,
                    hand_mesh.clone(),
                    hand_material.clone(),
                    Vec3::new(0.32, -0.28, -0.55),
                    fist.clone(),
                    player,
                );
                hands = (left, right);
            });
    });

    commands.entity(player).insert(PlayerHands::new(hands.0, hands.1));

    player
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_smoothing_snaps_to_target() {
        let result = smooth_direction(Vec2::ZERO, Vec2::Y, 0.0, 0.016);
        assert_eq!(result, Vec2::Y);
    }

    #[test]
    fn smoothing_approaches_target_over_time() {
        let mut direction = Vec2::ZERO;
        direction = smooth_direction(direction, Vec2::Y, 0.1, 0.016);
        assert!(direction.y > 0.0 && direction.y < 1.0);

        for _ in 0..120 {
            direction = smooth_direction(direction, Vec2::Y, 0.1, 0.016);
        }
        assert!((direction.y - 1.0).abs() < 1e-3);
    }
}
