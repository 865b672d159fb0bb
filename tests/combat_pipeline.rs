//! Hitbox contacts flowing through damage, death and wave bookkeeping.

mod common;

use arena_survival::combat::{
    apply_damage, detect_weapon_hits, handle_deaths, tick_hit_guards, AttackAnimation,
    AttackClip, DamageSource, Dead, Difficulty, Health, HealthSounds, Hitbox, MultiHitGuard,
    Projectile, Weapon,
};
use arena_survival::core::{GameState, SoundEvent};
use arena_survival::player::Player;
use arena_survival::spawner::{SpawnedFrom, SpawnerKind, WaveSpawner};
use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;
use common::{run_frames, test_app, HeardSounds};

const SLASH: f32 = 12.0;
const HEAVY: f32 = 30.0;

fn combat_app() -> App {
    let mut app = test_app();
    app.init_resource::<WaveSpawner>().add_systems(
        Update,
        (tick_hit_guards, detect_weapon_hits, apply_damage, handle_deaths).chain(),
    );
    app
}

/// An armed swordsman: owner, sword weapon mid-slash, and its hitbox.
struct Sword {
    owner: Entity,
    hitbox: Entity,
}

fn spawn_sword(app: &mut App, clip: Option<AttackClip>) -> Sword {
    let world = app.world_mut();
    let owner = world.spawn(Health::new(50.0)).id();

    let mut animation = AttackAnimation::default();
    if let Some(clip) = clip {
        animation.try_play(clip);
    }

    let weapon = world
        .spawn((
            Weapon::from_source(DamageSource::new(SLASH, HEAVY), Difficulty::default()),
            MultiHitGuard::default(),
            animation,
        ))
        .id();
    let hitbox = world.spawn(Hitbox { weapon, owner }).id();

    Sword { owner, hitbox }
}

fn spawn_target(app: &mut App, health: f32) -> Entity {
    app.world_mut()
        .spawn((
            Health::new(health),
            HealthSounds {
                damage: Some("Hit".into()),
                death: Some("Enemy Death".into()),
            },
        ))
        .id()
}

fn touch(app: &mut App, hitbox: Entity, other: Entity) {
    app.world_mut()
        .send_event(CollisionEvent::Started(hitbox, other, CollisionEventFlags::SENSOR));
}

fn health_of(app: &App, entity: Entity) -> f32 {
    app.world().get::<Health>(entity).unwrap().current
}

/// A light slash deals primary damage and plays the hit sound.
#[test]
fn light_slash_deals_primary_damage() {
    let mut app = combat_app();
    let sword = spawn_sword(&mut app, Some(AttackClip::Light));
    let target = spawn_target(&mut app, 100.0);

    touch(&mut app, sword.hitbox, target);
    app.update();

    assert_eq!(health_of(&app, target), 100.0 - SLASH);
    assert!(app
        .world()
        .resource::<HeardSounds>()
        .contains(&SoundEvent::play_3d("Hit", Vec3::ZERO)));
}

/// Anything but a light clip uses the secondary damage.
#[test]
fn heavy_swing_deals_secondary_damage() {
    let mut app = combat_app();
    let sword = spawn_sword(&mut app, Some(AttackClip::Heavy));
    let target = spawn_target(&mut app, 100.0);

    // Contact order in the event does not matter
    touch(&mut app, target, sword.hitbox);
    app.update();

    assert_eq!(health_of(&app, target), 100.0 - HEAVY);
}

/// Sword slashes are not hand attacks, so they use the secondary damage.
#[test]
fn sword_swing_deals_secondary_damage() {
    let mut app = combat_app();
    let sword = spawn_sword(&mut app, Some(AttackClip::Swing));
    let target = spawn_target(&mut app, 100.0);

    touch(&mut app, sword.hitbox, target);
    app.update();

    assert_eq!(health_of(&app, target), 100.0 - HEAVY);
}

#[test]
fn hitbox_never_hurts_its_owner() {
    let mut app = combat_app();
    let sword = spawn_sword(&mut app, Some(AttackClip::Light));

    touch(&mut app, sword.hitbox, sword.owner);
    app.update();

    assert_eq!(health_of(&app, sword.owner), 50.0);
}

/// Overlapping contacts only count once until the guard delay runs out.
#[test]
fn guard_blocks_repeat_hits_for_one_second() {
    let mut app = combat_app();
    let sword = spawn_sword(&mut app, Some(AttackClip::Light));
    let target = spawn_target(&mut app, 100.0);

    touch(&mut app, sword.hitbox, target);
    app.update();
    touch(&mut app, sword.hitbox, target);
    app.update();
    assert_eq!(health_of(&app, target), 100.0 - SLASH);

    run_frames(&mut app, 12);
    touch(&mut app, sword.hitbox, target);
    app.update();
    assert_eq!(health_of(&app, target), 100.0 - 2.0 * SLASH);
}

/// Health stops at zero and the death pipeline runs exactly once.
#[test]
fn lethal_hit_kills_once_and_despawns() {
    let mut app = combat_app();
    let sword = spawn_sword(&mut app, Some(AttackClip::Heavy));
    let target = spawn_target(&mut app, 10.0);

    touch(&mut app, sword.hitbox, target);
    app.update();

    assert!(app.world().get_entity(target).is_err());
    let deaths = app
        .world()
        .resource::<HeardSounds>()
        .0
        .iter()
        .filter(|sound| **sound == SoundEvent::play_2d("Enemy Death"))
        .count();
    assert_eq!(deaths, 1);
}

/// Arrows break on anything they touch, with or without health.
#[test]
fn arrow_breaks_on_a_wall() {
    let mut app = combat_app();
    let archer = app.world_mut().spawn(Health::new(30.0)).id();
    let wall = app.world_mut().spawn_empty().id();
    let arrow = app
        .world_mut()
        .spawn((
            Weapon::from_source(DamageSource::new(8.0, 8.0), Difficulty::default()).projectile(),
            MultiHitGuard::default(),
            Projectile::new(4.0),
        ))
        .id();
    app.world_mut().entity_mut(arrow).insert(Hitbox {
        weapon: arrow,
        owner: archer,
    });

    touch(&mut app, arrow, wall);
    app.update();

    assert!(app.world().get_entity(arrow).is_err());
}

/// A guarded projectile ignores the contact entirely and keeps flying.
#[test]
fn guarded_arrow_survives_contact() {
    let mut app = combat_app();
    let archer = app.world_mut().spawn(Health::new(30.0)).id();
    let target = spawn_target(&mut app, 100.0);

    let mut guard = MultiHitGuard::default();
    guard.arm();
    let arrow = app
        .world_mut()
        .spawn((
            Weapon::from_source(DamageSource::new(8.0, 8.0), Difficulty::default()).projectile(),
            guard,
        ))
        .id();
    app.world_mut().entity_mut(arrow).insert(Hitbox {
        weapon: arrow,
        owner: archer,
    });

    touch(&mut app, arrow, target);
    app.update();

    assert!(app.world().get_entity(arrow).is_ok());
    assert_eq!(health_of(&app, target), 100.0);
}

/// Killing a wave enemy frees its slot and, once all are free, re-arms the timer.
#[test]
fn wave_enemy_death_returns_budget() {
    let mut app = combat_app();
    {
        let mut wave = app.world_mut().resource_mut::<WaveSpawner>();
        wave.available = wave.max_in_scene - 1;
        wave.can_spawn = false;
    }

    let sword = spawn_sword(&mut app, Some(AttackClip::Heavy));
    let target = spawn_target(&mut app, 10.0);
    app.world_mut()
        .entity_mut(target)
        .insert(SpawnedFrom(SpawnerKind::Wave));

    touch(&mut app, sword.hitbox, target);
    app.update();

    let wave = app.world().resource::<WaveSpawner>();
    assert_eq!(wave.available, wave.max_in_scene);
    assert!(wave.can_spawn);
}

#[test]
fn placed_enemy_death_leaves_budget_alone() {
    let mut app = combat_app();
    app.world_mut().resource_mut::<WaveSpawner>().available = 2;

    let sword = spawn_sword(&mut app, Some(AttackClip::Heavy));
    let target = spawn_target(&mut app, 10.0);
    app.world_mut()
        .entity_mut(target)
        .insert(SpawnedFrom(SpawnerKind::Placed));

    touch(&mut app, sword.hitbox, target);
    app.update();

    assert!(app.world().get_entity(target).is_err());
    assert_eq!(app.world().resource::<WaveSpawner>().available, 2);
}

/// The player is not despawned on death; the run ends instead.
#[test]
fn player_death_ends_the_run() {
    let mut app = combat_app();
    let sword = spawn_sword(&mut app, Some(AttackClip::Heavy));
    let player = app
        .world_mut()
        .spawn((
            Player,
            Health::new(20.0),
            HealthSounds {
                damage: Some("Player Hurt".into()),
                death: Some("Player Death".into()),
            },
        ))
        .id();

    touch(&mut app, sword.hitbox, player);
    app.update();
    app.update();

    assert!(app.world().get::<Dead>(player).is_some());
    assert_eq!(health_of(&app, player), 0.0);
    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::GameOver
    );
    assert!(app
        .world()
        .resource::<HeardSounds>()
        .contains(&SoundEvent::play_2d("Player Death")));
}
