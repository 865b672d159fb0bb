//! Combat-related components.

use bevy::prelude::*;
use serde::Deserialize;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent};

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Subtract damage, never going below zero. Returns the amount applied.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Current health as a fraction of maximum.
    pub fn ratio(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        self.current / self.maximum
    }
}

/// Sounds played by the health pipeline.
#[derive(Component, Debug, Clone, Default)]
pub struct HealthSounds {
    /// Played at the entity's position when it takes damage
    pub damage: Option<String>,
    /// Played (non-positional) when it dies
    pub death: Option<String>,
}

/// Global damage multiplier for difficulty-aware damage sources.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Difficulty(pub f32);

impl Default for Difficulty {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Damage values as authored in data files.
///
/// Resolved once against the current difficulty when the weapon is built.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DamageSource {
    pub primary: f32,
    pub secondary: f32,
    #[serde(default)]
    pub affected_by_difficulty: bool,
}

impl DamageSource {
    pub fn new(primary: f32, secondary: f32) -> Self {
        Self {
            primary,
            secondary,
            affected_by_difficulty: false,
        }
    }

    pub fn with_difficulty(mut self) -> Self {
        self.affected_by_difficulty = true;
        self
    }

    /// Primary and secondary damage for the given difficulty.
    pub fn resolve(&self, difficulty: Difficulty) -> (f32, f32) {
        if self.affected_by_difficulty {
            (self.primary * difficulty.0, self.secondary * difficulty.0)
        } else {
            (self.primary, self.secondary)
        }
    }
}

/// Which attack clip a weapon is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackClip {
    /// Left or right hand light attack, the only clip dealing primary damage
    Light,
    /// Two-handed heavy attack
    Heavy,
    /// Sword slash, timed like a light attack but dealing secondary damage
    Swing,
}

/// Weapon definition component.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub primary_damage: f32,
    pub secondary_damage: f32,
    /// Despawn the weapon entity on any contact (arrows)
    pub destroyed_on_contact: bool,
    /// Animated weapons pick damage from the playing clip
    pub animated: bool,
    /// Sound played when an action starts
    pub sound: Option<String>,
}

impl Weapon {
    pub fn from_source(source: DamageSource, difficulty: Difficulty) -> Self {
        let (primary_damage, secondary_damage) = source.resolve(difficulty);
        Self {
            primary_damage,
            secondary_damage,
            destroyed_on_contact: false,
            animated: true,
            sound: None,
        }
    }

    /// Projectile weapons are not animated and break on contact.
    pub fn projectile(mut self) -> Self {
        self.destroyed_on_contact = true;
        self.animated = false;
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn add_damage_multiplier(&mut self, multiplier: f32) {
        self.primary_damage *= multiplier;
        self.secondary_damage *= multiplier;
    }

    /// Damage for a hit given the clip currently playing.
    pub fn damage_for(&self, clip: Option<AttackClip>) -> f32 {
        if !self.animated {
            return self.primary_damage;
        }
        match clip {
            Some(AttackClip::Light) => self.primary_damage,
            _ => self.secondary_damage,
        }
    }

    /// Resolve a hitbox contact.
    ///
    /// A set guard swallows the contact entirely, including destruction.
    /// Otherwise a target with health takes damage and arms the guard, and
    /// projectile weapons break whether or not the target had health.
    pub fn resolve_contact(
        &self,
        guard: &mut MultiHitGuard,
        clip: Option<AttackClip>,
        target_has_health: bool,
    ) -> ContactOutcome {
        if guard.recently_hit {
            return ContactOutcome::default();
        }

        let damage = if target_has_health {
            guard.arm();
            Some(self.damage_for(clip))
        } else {
            None
        };

        ContactOutcome {
            damage,
            destroy_weapon: self.destroyed_on_contact,
        }
    }
}

/// Result of a hitbox touching another collider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactOutcome {
    pub damage: Option<f32>,
    pub destroy_weapon: bool,
}

/// Prevents one swing from damaging repeatedly while colliders overlap.
#[derive(Component, Debug)]
pub struct MultiHitGuard {
    pub recently_hit: bool,
    pub timer: Timer,
}

impl Default for MultiHitGuard {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MultiHitGuard {
    pub fn new(seconds: f32) -> Self {
        Self {
            recently_hit: false,
            timer: Timer::from_seconds(seconds, TimerMode::Once),
        }
    }

    pub fn arm(&mut self) {
        self.recently_hit = true;
        self.timer.reset();
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        if !self.recently_hit {
            return;
        }
        self.timer.tick(delta);
        if self.timer.finished() {
            self.recently_hit = false;
        }
    }
}

/// Stand-in for the weapon's animator: the playing attack clip and its progress.
#[derive(Component, Debug)]
pub struct AttackAnimation {
    pub playing: Option<AttackClip>,
    pub timer: Timer,
    pub light_secs: f32,
    pub heavy_secs: f32,
    /// Fraction of the clip (start, end) during which the hitbox is live
    pub active_window: (f32, f32),
}

impl Default for AttackAnimation {
    fn default() -> Self {
        Self::new(0.45, 0.8)
    }
}

impl AttackAnimation {
    pub fn new(light_secs: f32, heavy_secs: f32) -> Self {
        Self {
            playing: None,
            timer: Timer::from_seconds(light_secs, TimerMode::Once),
            light_secs,
            heavy_secs,
            active_window: (0.25, 0.7),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.playing.is_none()
    }

    /// Start a clip if the previous one has finished.
    pub fn try_play(&mut self, clip: AttackClip) -> bool {
        if !self.is_ready() {
            return false;
        }

        let secs = match clip {
            AttackClip::Light | AttackClip::Swing => self.light_secs,
            AttackClip::Heavy => self.heavy_secs,
        };
        self.timer = Timer::from_seconds(secs, TimerMode::Once);
        self.playing = Some(clip);
        true
    }

    /// Normalized time of the playing clip (0.0 when idle).
    pub fn progress(&self) -> f32 {
        if self.playing.is_none() {
            return 0.0;
        }
        self.timer.fraction()
    }

    pub fn hitbox_active(&self) -> bool {
        let progress = self.progress();
        self.playing.is_some()
            && progress >= self.active_window.0
            && progress <= self.active_window.1
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        if self.playing.is_none() {
            return;
        }
        self.timer.tick(delta);
        if self.timer.finished() {
            self.playing = None;
        }
    }
}

/// Collider that reports contacts on behalf of a weapon.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox {
    /// Entity carrying the Weapon (may be the hitbox itself)
    pub weapon: Entity,
    /// Entity wielding the weapon; never hit by its own hitbox
    pub owner: Entity,
}

/// Despawns a fired projectile after its lifetime.
#[derive(Component, Debug)]
pub struct Projectile {
    pub lifetime: Timer,
}

impl Projectile {
    pub fn new(seconds: f32) -> Self {
        Self {
            lifetime: Timer::from_seconds(seconds, TimerMode::Once),
        }
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn health_clamps_at_zero() {
        let mut health = Health::new(30.0);
        assert_eq!(health.take_damage(50.0), 30.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut health = Health::new(30.0);
        health.take_damage(-10.0);
        assert_eq!(health.current, 30.0);
    }

    #[test]
    fn ratio_tracks_current_over_maximum() {
        let mut health = Health::new(80.0);
        health.take_damage(60.0);
        assert!((health.ratio() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn difficulty_only_scales_flagged_sources() {
        let plain = DamageSource::new(10.0, 20.0);
        let scaled = DamageSource::new(10.0, 20.0).with_difficulty();

        assert_eq!(plain.resolve(Difficulty(2.0)), (10.0, 20.0));
        assert_eq!(scaled.resolve(Difficulty(2.0)), (20.0, 40.0));
    }

    #[test]
    fn light_clip_uses_primary_damage() {
        let weapon = Weapon::from_source(DamageSource::new(5.0, 12.0), Difficulty::default());
        assert_eq!(weapon.damage_for(Some(AttackClip::Light)), 5.0);
        assert_eq!(weapon.damage_for(Some(AttackClip::Heavy)), 12.0);
        assert_eq!(weapon.damage_for(None), 12.0);
    }

    #[test]
    fn sword_swing_uses_secondary_damage() {
        let sword = Weapon::from_source(DamageSource::new(8.0, 14.0), Difficulty::default());
        assert_eq!(sword.damage_for(Some(AttackClip::Swing)), 14.0);

        let mut anim = AttackAnimation::new(0.5, 0.75);
        assert!(anim.try_play(AttackClip::Swing));
        assert_eq!(anim.timer.duration().as_secs_f32(), 0.5);
    }

    #[test]
    fn unanimated_weapon_always_uses_primary_damage() {
        let arrow =
            Weapon::from_source(DamageSource::new(7.0, 30.0), Difficulty::default()).projectile();
        assert_eq!(arrow.damage_for(Some(AttackClip::Heavy)), 7.0);
        assert_eq!(arrow.damage_for(None), 7.0);
    }

    #[test]
    fn damage_multiplier_scales_both_values() {
        let mut weapon = Weapon::from_source(DamageSource::new(5.0, 10.0), Difficulty::default());
        weapon.add_damage_multiplier(2.8);
        assert!((weapon.primary_damage - 14.0).abs() < 1e-4);
        assert!((weapon.secondary_damage - 28.0).abs() < 1e-4);
    }

    #[test]
    fn guard_blocks_second_contact_until_timer_elapses() {
        let weapon = Weapon::from_source(DamageSource::new(5.0, 10.0), Difficulty::default());
        let mut guard = MultiHitGuard::new(1.0);

        let first = weapon.resolve_contact(&mut guard, Some(AttackClip::Light), true);
        assert_eq!(first.damage, Some(5.0));

        let second = weapon.resolve_contact(&mut guard, Some(AttackClip::Light), true);
        assert_eq!(second.damage, None);

        guard.tick(Duration::from_millis(600));
        assert!(guard.recently_hit);
        guard.tick(Duration::from_millis(500));
        assert!(!guard.recently_hit);

        let third = weapon.resolve_contact(&mut guard, Some(AttackClip::Heavy), true);
        assert_eq!(third.damage, Some(10.0));
    }

    #[test]
    fn contact_without_health_does_not_arm_guard() {
        let weapon = Weapon::from_source(DamageSource::new(5.0, 10.0), Difficulty::default());
        let mut guard = MultiHitGuard::default();

        let outcome = weapon.resolve_contact(&mut guard, Some(AttackClip::Light), false);
        assert_eq!(outcome, ContactOutcome::default());
        assert!(!guard.recently_hit);
    }

    #[test]
    fn projectile_breaks_on_any_contact_unless_guarded() {
        let arrow =
            Weapon::from_source(DamageSource::new(8.0, 8.0), Difficulty::default()).projectile();
        let mut guard = MultiHitGuard::default();

        let wall = arrow.resolve_contact(&mut guard, None, false);
        assert!(wall.destroy_weapon);
        assert_eq!(wall.damage, None);

        guard.arm();
        let blocked = arrow.resolve_contact(&mut guard, None, true);
        assert!(!blocked.destroy_weapon);
    }

    #[test]
    fn attack_animation_refuses_overlapping_clips() {
        let mut anim = AttackAnimation::new(0.5, 1.0);
        assert!(anim.try_play(AttackClip::Light));
        assert!(!anim.try_play(AttackClip::Heavy));

        anim.tick(Duration::from_millis(500));
        assert!(anim.is_ready());
        assert!(anim.try_play(AttackClip::Heavy));
        assert_eq!(anim.playing, Some(AttackClip::Heavy));
    }

    #[test]
    fn hitbox_is_live_only_inside_window() {
        let mut anim = AttackAnimation::new(1.0, 1.0);
        assert!(!anim.hitbox_active());

        anim.try_play(AttackClip::Light);
        anim.tick(Duration::from_millis(100));
        assert!(!anim.hitbox_active());

        anim.tick(Duration::from_millis(300));
        assert!(anim.hitbox_active());

        anim.tick(Duration::from_millis(400));
        assert!(!anim.hitbox_active());
    }
}
