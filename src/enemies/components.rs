//! Enemy-related components.

use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

use crate::combat::Weapon;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug, Deserialize)]
pub enum AiState {
    /// Standing still until a target shows up.
    #[default]
    Idle,
    /// Moving toward the target.
    Chase,
    /// Moving toward the target while attacking.
    SeekAndAttack,
    /// Running away from the target.
    Flee,
}

/// What the AI asked its body to do this frame.
#[derive(Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiAction {
    #[default]
    Hold,
    Seek,
    SeekAndAttack,
    Flee,
}

/// Thresholds that drive the AI state machine, loaded from RON data files.
#[derive(Component, Clone, Debug, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub start_state: AiState,
    pub move_speed: f32,
    /// Range at which the player is noticed
    pub sight_distance: f32,
    /// Below this distance the enemy attacks
    pub attack_distance: f32,
    /// A fleeing enemy calms down beyond this distance
    pub flee_distance: f32,
    /// Health ratio (0..1) at or below which the enemy flees
    pub percent_health_to_flee: f32,
    /// Beyond this distance from the player the AI is frozen
    pub disable_distance: f32,
    /// Seeking stops this close to the target
    pub stopping_distance: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            start_state: AiState::Idle,
            move_speed: 3.5,
            sight_distance: 25.0,
            attack_distance: 2.0,
            flee_distance: 12.0,
            percent_health_to_flee: 0.0,
            disable_distance: 60.0,
            stopping_distance: 1.5,
        }
    }
}

/// Entity the AI is interested in.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct AiTarget(pub Option<Entity>);

/// Latest decision of the state machine, consumed by movement and attacks.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiIntent(pub AiAction);

/// Melee arm: the sword weapon entity carried by this enemy.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemySword(pub Entity);

/// Ranged arm: shoots arrows on a cooldown.
#[derive(Component, Debug, Clone)]
pub struct EnemyBow {
    pub arrow_speed: f32,
    /// Weapon cloned onto every arrow
    pub arrow: Weapon,
    pub cooldown: Timer,
}

impl EnemyBow {
    /// A bow whose first shot is ready immediately.
    pub fn new(arrow_speed: f32, arrow: Weapon, cooldown_secs: f32) -> Self {
        let mut cooldown = Timer::from_seconds(cooldown_secs, TimerMode::Once);
        cooldown.tick(Duration::from_secs_f32(cooldown_secs));
        Self {
            arrow_speed,
            arrow: arrow.projectile(),
            cooldown,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown.finished()
    }

    /// Start the cooldown if the bow is ready. Returns whether it fired.
    pub fn try_shoot(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.cooldown.reset();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageSource, Difficulty};

    fn arrow() -> Weapon {
        Weapon::from_source(DamageSource::new(5.0, 5.0), Difficulty::default())
    }

    #[test]
    fn bow_is_ready_on_spawn() {
        let bow = EnemyBow::new(20.0, arrow(), 2.0);
        assert!(bow.is_ready());
        assert!(bow.arrow.destroyed_on_contact);
    }

    #[test]
    fn bow_waits_for_cooldown_between_shots() {
        let mut bow = EnemyBow::new(20.0, arrow(), 2.0);
        assert!(bow.try_shoot());
        assert!(!bow.try_shoot());

        bow.cooldown.tick(Duration::from_secs_f32(1.5));
        assert!(!bow.try_shoot());

        bow.cooldown.tick(Duration::from_secs_f32(0.5));
        assert!(bow.try_shoot());
    }
}
