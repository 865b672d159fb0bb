//! Player-related components.

use bevy::prelude::*;

use crate::combat::DamageSource;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Tracks player movement state for physics.
#[derive(Component)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
    /// Smoothed input direction (x = strafe, y = forward)
    pub direction: Vec2,
    /// Whether the walking loop is currently requested
    pub walking: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
            direction: Vec2::ZERO,
            walking: false,
        }
    }
}

/// Per-player movement numbers; raised by the second phase.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovementStats {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Jump strength, scaled by `PlayerConfig::jump_scale` into a velocity
    pub jump_multiplier: f32,
}

impl MovementStats {
    pub fn jump_velocity(&self, config: &PlayerConfig) -> f32 {
        self.jump_multiplier * config.jump_scale
    }
}

/// The two fists and whose turn it is for a light attack.
#[derive(Component, Debug, Clone)]
pub struct PlayerHands {
    pub left: Entity,
    pub right: Entity,
    pub right_next: bool,
}

impl PlayerHands {
    pub fn new(left: Entity, right: Entity) -> Self {
        Self {
            left,
            right,
            right_next: true,
        }
    }

    /// Light attack with hand alternation.
    ///
    /// `try_hand` performs the primary action on a hand and reports success.
    /// The hand whose turn it is goes first; if it succeeds the turn passes
    /// to the other hand, otherwise the other hand tries and the turn stays.
    pub fn light_attack(&mut self, mut try_hand: impl FnMut(Entity) -> bool) {
        let (first, second) = if self.right_next {
            (self.right, self.left)
        } else {
            (self.left, self.right)
        };

        if try_hand(first) {
            self.right_next = !self.right_next;
        } else {
            try_hand(second);
        }
    }
}

/// Set once the player has dropped to half health.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondPhase(pub bool);

/// Configuration for the first-person controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Invert Y-axis for mouse look
    pub invert_y: bool,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Seconds for the input direction to catch up with the keys
    pub move_smooth_time: f32,
    pub jump_multiplier: f32,
    /// Converts the jump multiplier into an upward velocity
    pub jump_scale: f32,
    /// Gravity acceleration
    pub gravity: f32,
    pub max_health: f32,
    /// Fist damage: primary for light attacks, secondary for heavy
    pub fist_damage: DamageSource,
    pub second_phase_damage_multiplier: f32,
    pub second_phase_speed_bonus: f32,
    pub second_phase_jump_bonus: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.5,
            invert_y: false,
            walk_speed: 6.0,
            sprint_speed: 10.0,
            move_smooth_time: 0.1,
            jump_multiplier: 10.0,
            jump_scale: 0.6,
            gravity: 20.0,
            max_health: 100.0,
            fist_damage: DamageSource::new(10.0, 18.0),
            second_phase_damage_multiplier: 2.8,
            second_phase_speed_bonus: 10.0,
            second_phase_jump_bonus: 15.0,
        }
    }
}

impl PlayerConfig {
    pub fn movement_stats(&self) -> MovementStats {
        MovementStats {
            walk_speed: self.walk_speed,
            sprint_speed: self.sprint_speed,
            jump_multiplier: self.jump_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hands() -> PlayerHands {
        PlayerHands::new(Entity::from_raw(1), Entity::from_raw(2))
    }

    #[test]
    fn light_attacks_alternate_starting_right() {
        let mut hands = hands();
        let mut used = Vec::new();

        for _ in 0..3 {
            hands.light_attack(|hand| {
                used.push(hand);
                true
            });
        }

        assert_eq!(used, vec![hands.right, hands.left, hands.right]);
    }

    #[test]
    fn busy_hand_falls_back_without_passing_the_turn() {
        let mut hands = hands();
        let right = hands.right;
        let mut used = Vec::new();

        hands.light_attack(|hand| {
            used.push(hand);
            hand != right
        });

        assert_eq!(used, vec![hands.right, hands.left]);
        assert!(hands.right_next);
    }

    #[test]
    fn jump_velocity_scales_multiplier() {
        let config = PlayerConfig::default();
        let stats = config.movement_stats();
        assert!((stats.jump_velocity(&config) - 6.0).abs() < 1e-5);
    }
}
