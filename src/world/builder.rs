//! Arena construction from data definitions.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::data::ArenaDefinition;
use crate::spawner::Spawner;

/// Marker for everything that belongs to the arena and is removed with it.
#[derive(Component)]
pub struct ArenaGeometry;

const FLOOR_DEPTH: f32 = 0.5;
const WALL_THICKNESS: f32 = 0.5;

fn color((r, g, b): (f32, f32, f32)) -> Color {
    Color::srgb(r, g, b)
}

/// Build the arena and return the player's start position.
pub fn build_arena(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    arena: &ArenaDefinition,
) -> Vec3 {
    setup_environment(commands, arena);

    let size = arena.half_size * 2.0;

    // Floor as a box whose top surface is y = 0
    commands.spawn((
        Name::new("Floor"),
        Mesh3d(meshes.add(Cuboid::new(size, FLOOR_DEPTH, size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color(arena.floor_color),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::from_xyz(0.0, -FLOOR_DEPTH / 2.0, 0.0),
        Collider::cuboid(arena.half_size, FLOOR_DEPTH / 2.0, arena.half_size),
        ArenaGeometry,
    ));

    let wall_material = materials.add(StandardMaterial {
        base_color: color(arena.wall_color),
        perceptual_roughness: 0.9,
        ..default()
    });
    spawn_walls(commands, meshes, wall_material.clone(), arena);

    for obstacle in &arena.obstacles {
        let (w, h, d) = obstacle.size;
        commands.spawn((
            Name::new("Obstacle"),
            Mesh3d(meshes.add(Cuboid::new(w, h, d))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_xyz(obstacle.position.0, h / 2.0, obstacle.position.1),
            Collider::cuboid(w / 2.0, h / 2.0, d / 2.0),
            ArenaGeometry,
        ));
    }

    for light in &arena.lights {
        commands.spawn((
            PointLight {
                color: color(light.color),
                intensity: light.intensity,
                range: light.range,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(light.position.0, light.position.1, light.position.2),
            ArenaGeometry,
        ));
    }

    for spawner in &arena.spawners {
        commands.spawn((
            Name::new("Spawner"),
            Spawner {
                kind: spawner.kind,
                enemy_types: spawner.enemy_types.clone(),
                scatter: spawner.scatter,
            },
            Transform::from_xyz(spawner.position.0, 0.0, spawner.position.1),
            ArenaGeometry,
        ));
    }

    info!(
        "Built arena '{}' with {} spawners",
        arena.name,
        arena.spawners.len()
    );

    Vec3::new(arena.player_start.0, 1.0, arena.player_start.1)
}

/// Set up global ambient light and the sun.
fn setup_environment(commands: &mut Commands, arena: &ArenaDefinition) {
    commands.insert_resource(AmbientLight {
        color: color(arena.ambient.color),
        brightness: arena.ambient.brightness,
    });

    if arena.sun_illuminance > 0.0 {
        commands.spawn((
            DirectionalLight {
                color: Color::srgb(1.0, 0.95, 0.85),
                illuminance: arena.sun_illuminance,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_rotation(Quat::from_euler(
                EulerRot::XYZ,
                -std::f32::consts::FRAC_PI_3,
                std::f32::consts::FRAC_PI_6,
                0.0,
            )),
            ArenaGeometry,
        ));
    }
}

/// Four walls enclosing the floor.
fn spawn_walls(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    arena: &ArenaDefinition,
) {
    let half = arena.half_size;
    let height = arena.wall_height;
    let length = half * 2.0 + WALL_THICKNESS * 2.0;
    let offset = half + WALL_THICKNESS / 2.0;

    // (center, dimensions)
    let walls = [
        (Vec3::new(0.0, height / 2.0, -offset), Vec3::new(length, height, WALL_THICKNESS)),
        (Vec3::new(0.0, height / 2.0, offset), Vec3::new(length, height, WALL_THICKNESS)),
        (Vec3::new(-offset, height / 2.0, 0.0), Vec3::new(WALL_THICKNESS, height, length)),
        (Vec3::new(offset, height / 2.0, 0.0), Vec3::new(WALL_THICKNESS, height, length)),
    ];

    for (center, dims) in walls {
        commands.spawn((
            Name::new("Wall"),
            Mesh3d(meshes.add(Cuboid::new(dims.x, dims.y, dims.z))),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(center),
            Collider::cuboid(dims.x / 2.0, dims.y / 2.0, dims.z / 2.0),
            ArenaGeometry,
        ));
    }
}
