//! Player attacks and the second phase.

use bevy::prelude::*;

use super::components::*;
use crate::combat::{AttackAnimation, AttackClip, Dead, HandGlow, Health, Weapon};
use crate::core::SoundEvent;

/// Light of a hand glow once the second phase starts.
const GLOW_INTENSITY: f32 = 40_000.0;

/// Left click: light attack with alternating hands. Right click: both hands heavy.
pub fn player_attack_input(
    mouse: Res<ButtonInput<MouseButton>>,
    mut players: Query<&mut PlayerHands, (With<Player>, Without<Dead>)>,
    mut hands: Query<(&Weapon, &mut AttackAnimation, &GlobalTransform)>,
    mut sounds: EventWriter<SoundEvent>,
) {
    let Ok(mut player_hands) = players.get_single_mut() else {
        return;
    };

    let mut try_hand = |hand: Entity, clip: AttackClip| -> bool {
        let Ok((weapon, mut animation, transform)) = hands.get_mut(hand) else {
            return false;
        };

        if !animation.try_play(clip) {
            return false;
        }

        if let Some(sound) = &weapon.sound {
            sounds.send(SoundEvent::play_3d(sound.clone(), transform.translation()));
        }
        true
    };

    if mouse.just_pressed(MouseButton::Left) {
        player_hands.light_attack(|hand| try_hand(hand, AttackClip::Light));
    } else if mouse.just_pressed(MouseButton::Right) {
        try_hand(player_hands.left, AttackClip::Heavy);
        try_hand(player_hands.right, AttackClip::Heavy);
    }
}

/// At half health the player powers up, once per run.
pub fn enter_second_phase(
    config: Res<PlayerConfig>,
    mut players: Query<(&Health, &PlayerHands, &mut SecondPhase, &mut MovementStats), With<Player>>,
    mut weapons: Query<&mut Weapon>,
    mut glows: Query<&mut PointLight, With<HandGlow>>,
) {
    for (health, hands, mut phase, mut stats) in players.iter_mut() {
        if phase.0 || health.current > health.maximum / 2.0 {
            continue;
        }

        phase.0 = true;

        for hand in [hands.left, hands.right] {
            if let Ok(mut weapon) = weapons.get_mut(hand) {
                weapon.add_damage_multiplier(config.second_phase_damage_multiplier);
            }
        }

        stats.walk_speed += config.second_phase_speed_bonus;
        stats.sprint_speed += config.second_phase_speed_bonus;
        stats.jump_multiplier += config.second_phase_jump_bonus;

        for mut light in glows.iter_mut() {
            light.intensity = GLOW_INTENSITY;
        }

        info!("Player entered second phase");
    }
}
