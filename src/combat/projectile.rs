//! Fired projectiles (arrows) - physics bodies whose own collider is the hitbox.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Hitbox, MultiHitGuard, Projectile, Weapon};

/// Shared mesh and material for arrows, created at startup.
#[derive(Resource)]
pub struct ProjectileAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn setup_projectile_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ProjectileAssets {
        mesh: meshes.add(Cuboid::new(0.04, 0.04, 0.6)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.32, 0.2),
            ..default()
        }),
    });
}

/// Everything needed to launch one projectile.
pub struct ProjectileLaunch {
    pub origin: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub weapon: Weapon,
    pub owner: Entity,
    pub lifetime: f32,
}

/// Spawn a projectile flying along `direction`.
pub fn spawn_projectile(
    commands: &mut Commands,
    assets: Option<&ProjectileAssets>,
    launch: ProjectileLaunch,
) -> Entity {
    let direction = launch.direction.normalize_or_zero();

    let projectile = commands
        .spawn((
            Name::new("Arrow"),
            launch.weapon,
            MultiHitGuard::default(),
            Projectile::new(launch.lifetime),
            Transform::from_translation(launch.origin).looking_to(direction, Vec3::Y),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::ball(0.08),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            Velocity::linear(direction * launch.speed),
            GravityScale(0.25),
            Ccd::enabled(),
        ))
        .id();

    commands.entity(projectile).insert(Hitbox {
        weapon: projectile,
        owner: launch.owner,
    });

    if let Some(assets) = assets {
        commands.entity(projectile).insert((
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
        ));
    }

    projectile
}

/// Despawn projectiles that never hit anything.
pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Projectile)>,
) {
    for (entity, mut projectile) in query.iter_mut() {
        projectile.lifetime.tick(time.delta());

        if projectile.lifetime.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
