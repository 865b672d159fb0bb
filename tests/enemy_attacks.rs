//! Enemy sword swings and bow shots, acting on the AI's decision.

mod common;

use arena_survival::combat::{
    AttackAnimation, AttackClip, DamageSource, Difficulty, MultiHitGuard, Projectile, Weapon,
};
use arena_survival::core::SoundEvent;
use arena_survival::enemies::{
    ai_attack, tick_bow_cooldowns, AiAction, AiIntent, Enemy, EnemyBow, EnemySword,
};
use bevy::prelude::*;
use common::{run_frames, test_app, HeardSounds};

const BOW_COOLDOWN: f32 = 1.0;

fn attack_app() -> App {
    let mut app = test_app();
    app.add_systems(Update, (tick_bow_cooldowns, ai_attack).chain());
    app
}

fn spawn_swordsman(app: &mut App, action: AiAction) -> (Entity, Entity) {
    let world = app.world_mut();
    let sword = world
        .spawn((
            Weapon::from_source(DamageSource::new(8.0, 14.0), Difficulty::default())
                .with_sound("Sword Swing"),
            AttackAnimation::new(0.5, 0.75),
            MultiHitGuard::default(),
        ))
        .id();
    let enemy = world
        .spawn((
            Enemy,
            AiIntent(action),
            EnemySword(sword),
            Transform::default(),
        ))
        .id();
    (enemy, sword)
}

fn spawn_archer(app: &mut App) -> Entity {
    let arrow = Weapon::from_source(DamageSource::new(6.0, 6.0), Difficulty::default());
    app.world_mut()
        .spawn((
            Enemy,
            AiIntent(AiAction::SeekAndAttack),
            EnemyBow::new(20.0, arrow, BOW_COOLDOWN),
            Transform::default(),
        ))
        .id()
}

fn count_sounds(app: &App, name: &str) -> usize {
    app.world()
        .resource::<HeardSounds>()
        .0
        .iter()
        .filter(|sound| matches!(sound, SoundEvent::Play3d { sound: played, .. } if played == name))
        .count()
}

fn arrows(app: &mut App) -> usize {
    let mut query = app.world_mut().query::<&Projectile>();
    query.iter(app.world()).count()
}

#[test]
fn attacking_swordsman_swings_once_per_clip() {
    let mut app = attack_app();
    let (_, sword) = spawn_swordsman(&mut app, AiAction::SeekAndAttack);

    app.update();
    assert_eq!(
        app.world().get::<AttackAnimation>(sword).unwrap().playing,
        Some(AttackClip::Swing)
    );

    // The clip is still running, so no new swing starts
    run_frames(&mut app, 2);
    assert_eq!(count_sounds(&app, "Sword Swing"), 1);
}

#[test]
fn chasing_swordsman_keeps_sword_down() {
    let mut app = attack_app();
    let (_, sword) = spawn_swordsman(&mut app, AiAction::Seek);

    run_frames(&mut app, 3);

    assert_eq!(app.world().get::<AttackAnimation>(sword).unwrap().playing, None);
    assert_eq!(count_sounds(&app, "Sword Swing"), 0);
}

/// The first arrow flies at once, the next only after the cooldown.
#[test]
fn archer_shoots_on_cooldown() {
    let mut app = attack_app();
    let archer = spawn_archer(&mut app);

    app.update();
    assert_eq!(arrows(&mut app), 1);
    assert_eq!(count_sounds(&app, "Arrow"), 1);

    let mut query = app.world_mut().query::<(&Projectile, &Weapon)>();
    let (_, weapon) = query.single(app.world());
    assert!(weapon.destroyed_on_contact);

    run_frames(&mut app, 5);
    assert_eq!(arrows(&mut app), 1);
    assert!(!app.world().get::<EnemyBow>(archer).unwrap().is_ready());

    run_frames(&mut app, 20);
    let shot = arrows(&mut app);
    assert!((2..=3).contains(&shot), "expected 2 or 3 arrows, got {shot}");
    assert_eq!(count_sounds(&app, "Arrow"), shot);
}
