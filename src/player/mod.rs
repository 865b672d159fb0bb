//! Player module - player entity, movement, camera control and attacks.

mod attacks;
mod components;
mod movement;
mod plugin;

pub use attacks::{enter_second_phase, player_attack_input};
pub use components::*;
pub use movement::{
    player_movement, silence_footsteps, smooth_direction, spawn_player, PlayerAssets,
    PlayerCamera,
};
pub use plugin::PlayerPlugin;
